// src/models/dir_entry.rs
use crate::models::Attributes;
use std::time::SystemTime;

/// One item produced by a directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry within its directory (not a full path).
    pub name: String,
    pub attributes: Attributes,
    pub modified: SystemTime,
    /// Size in bytes, zero for directories.
    pub size: u64,
}

impl DirEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Attributes, modified: SystemTime, size: u64) -> Self {
        Self {
            name: name.into(),
            attributes,
            modified,
            size,
        }
    }

    /// Stand-in for a name that was asked for but does not exist.
    ///
    /// Attributes, size and time are all zero.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::new(name, Attributes::empty(), SystemTime::UNIX_EPOCH, 0)
    }

    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.attributes.is_dir()
    }

    /// `.` and `..` as some directory iterators report them.
    #[inline]
    #[must_use]
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_is_zeroed() {
        let entry = DirEntry::missing("ghost.txt");
        assert_eq!(entry.name, "ghost.txt");
        assert!(entry.attributes.is_empty());
        assert_eq!(entry.size, 0);
        assert_eq!(entry.modified, SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn test_dot_entries() {
        assert!(DirEntry::missing(".").is_dot_entry());
        assert!(DirEntry::missing("..").is_dot_entry());
        assert!(!DirEntry::missing(".git").is_dot_entry());
    }
}
