// src/models.rs
pub mod attributes;
pub mod dir_entry;
pub mod options;
pub mod progress;

pub use attributes::Attributes;
pub use dir_entry::DirEntry;
pub use options::{EnumerationOptions, PassFlags};
pub use progress::Progress;
