//! Filesystem seam used by the workflows.
//!
//! Every read and mutation performed by `attach_action` and `add_function`
//! goes through [`Filesystem`], so tests can observe exactly which writes a
//! run performed.

use crate::error::Result;
use crate::io;
use std::path::Path;

pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    /// Sorted names of the child directories of `path`.
    fn list_directories(&self, path: &Path) -> Result<Vec<String>>;

    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Recursive copy, overwriting collisions in `dst`.
    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Replace `token` in the file at `path`; returns the number of
    /// occurrences replaced.
    fn replace_token(&self, path: &Path, token: &str, replacement: &str) -> Result<usize>;

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_directories(&self, path: &Path) -> Result<Vec<String>> {
        io::list_directories(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::rename(from, to)?;
        Ok(())
    }

    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<()> {
        io::copy_dir_recursive(src, dst)
    }

    fn replace_token(&self, path: &Path, token: &str, replacement: &str) -> Result<usize> {
        io::replace_token(path, token, replacement)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        io::atomic_write(path, data)
    }
}
