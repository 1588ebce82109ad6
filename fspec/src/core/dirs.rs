// src/core/dirs.rs
pub mod local;
pub mod memory;

pub use local::LocalDirs;
pub use memory::MemoryDirs;

use crate::models::DirEntry;
use std::io::{self, BufRead};

/// The directory iterator the enumerator searches through.
///
/// Paths are passed exactly as the enumerator built them: either slash
/// may separate components and a leading `X:` names a drive. Backends
/// report every entry they have; attribute filtering and wildcard
/// matching happen in the enumerator.
pub trait DirSource {
    /// Entries of directory `dir` in the backend's native order. An empty
    /// `dir` is the current directory.
    ///
    /// # Errors
    ///
    /// Fails when `dir` does not exist or cannot be read.
    fn list(&self, dir: &str) -> io::Result<Vec<DirEntry>>;

    /// The entry `path` names, with `name` set to its final component.
    ///
    /// # Errors
    ///
    /// Fails when nothing exists at `path`.
    fn stat(&self, path: &str) -> io::Result<DirEntry>;

    /// Opens an indirect list file for reading.
    ///
    /// # Errors
    ///
    /// Fails when the file does not exist or cannot be opened.
    fn open_list(&self, path: &str) -> io::Result<Box<dyn BufRead>>;

    /// Drive letters to try for a wildcard drive, in order.
    fn drives(&self) -> Vec<char>;
}
