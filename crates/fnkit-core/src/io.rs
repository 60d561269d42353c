use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting generated files. An existing
/// file keeps its permissions.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let existing = match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Names of the immediate child directories of `path`, sorted.
/// Files and entries whose names are not valid UTF-8 are skipped.
pub fn list_directories(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Recursively copy everything under `src` into `dst`, creating
/// directories as needed. Existing files in `dst` are overwritten.
/// Symlinks are followed and their targets copied; a dangling link or any
/// entry that is neither file nor directory is an error.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in walkdir::WalkDir::new(src).follow_links(true).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }
        if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
            continue;
        }
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("cannot copy special file {}", entry.path().display()),
        )
        .into());
    }
    Ok(())
}

/// Replace every occurrence of `token` in the file at `path` with
/// `replacement`. All other bytes are left untouched. Returns the number of
/// occurrences replaced; the file is not rewritten when that is zero.
pub fn replace_token(path: &Path, token: &str, replacement: &str) -> Result<usize> {
    let content = std::fs::read_to_string(path)?;
    let count = content.matches(token).count();
    if count == 0 {
        return Ok(0);
    }
    let updated = content.replace(token, replacement);
    atomic_write(path, updated.as_bytes())?;
    Ok(count)
}
