// src/core.rs
pub mod codepage;
pub mod dirs;
pub mod enumerator;
pub mod indirect;
pub mod matcher;
pub mod path;
pub mod switches;

pub use dirs::{DirSource, LocalDirs, MemoryDirs};
pub use enumerator::{Enumerator, MAX_LEVEL};
pub use matcher::string_match;
pub use path::PathParts;
