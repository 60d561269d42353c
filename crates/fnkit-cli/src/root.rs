use fnkit_core::paths::FNKIT_DIR;
use std::path::{Path, PathBuf};

/// Resolve the project root directory.
///
/// Priority:
/// 1. `--root` flag / `FNKIT_ROOT` env var (passed in as `explicit`)
/// 2. Nearest ancestor of `cwd` containing `.fnkit/`
/// 3. Nearest ancestor of `cwd` containing `.git/`
/// 4. `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_root_from(&cwd)
}

fn find_root_from(start: &Path) -> PathBuf {
    [FNKIT_DIR, ".git"]
        .iter()
        .find_map(|marker| nearest_with(start, marker))
        .unwrap_or_else(|| start.to_path_buf())
}

fn nearest_with(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
