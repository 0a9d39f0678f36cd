//! Filesystem capability used by the resolver and the writer
//!
//! Everything in this crate that touches disk goes through [`TextFs`], so the
//! whole read-check-write pass can run against [`MemoryFs`] in tests.

use std::io;
use std::path::Path;

/// Whole-file text access by path.
pub trait TextFs: std::fmt::Debug {
    /// Read the entire file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file's contents, creating it if needed.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// [`TextFs`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl TextFs for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
pub use memory::MemoryFs;
