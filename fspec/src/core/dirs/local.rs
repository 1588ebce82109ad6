// src/core/dirs/local.rs
use crate::core::dirs::DirSource;
use crate::models::{Attributes, DirEntry};
use std::fs::{self, File, Metadata};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::SystemTime;
use tracing::{trace, warn};
use walkdir::WalkDir;

/// The real filesystem.
///
/// Symbolic links are followed. On Unix a dot-prefixed name is reported
/// as hidden; on Windows the attribute byte comes from the file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDirs;

impl LocalDirs {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DirSource for LocalDirs {
    fn list(&self, dir: &str) -> io::Result<Vec<DirEntry>> {
        let root = if dir.is_empty() { Path::new(".") } else { Path::new(dir) };
        if !fs::metadata(root)?.is_dir() {
            return Err(io::Error::other(format!("not a directory: {}", root.display())));
        }

        let mut entries = Vec::new();
        for item in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    trace!(dir = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let metadata = match item.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    trace!(path = %item.path().display(), error = %err, "skipping entry without metadata");
                    continue;
                }
            };
            // names travel as `str`; a lossy name would point at no file
            let Some(name) = item.file_name().to_str() else {
                warn!(path = %item.path().display(), "skipping entry whose name is not valid UTF-8");
                continue;
            };
            entries.push(to_entry(name, &metadata));
        }
        Ok(entries)
    }

    fn stat(&self, path: &str) -> io::Result<DirEntry> {
        let metadata = fs::metadata(path)?;
        let name = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);
        Ok(to_entry(name, &metadata))
    }

    fn open_list(&self, path: &str) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    #[cfg(windows)]
    fn drives(&self) -> Vec<char> {
        ('C'..='Z')
            .filter(|letter| Path::new(&format!("{letter}:\\")).exists())
            .collect()
    }

    #[cfg(not(windows))]
    fn drives(&self) -> Vec<char> {
        Vec::new()
    }
}

fn to_entry(name: &str, metadata: &Metadata) -> DirEntry {
    let mut attributes = native_attributes(name, metadata);
    attributes.set(Attributes::DIRECTORY, metadata.is_dir());
    attributes.set(Attributes::READ_ONLY, metadata.permissions().readonly());

    let size = if metadata.is_dir() { 0 } else { metadata.len() };
    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    DirEntry::new(name, attributes, modified, size)
}

#[cfg(windows)]
fn native_attributes(_name: &str, metadata: &Metadata) -> Attributes {
    use std::os::windows::fs::MetadataExt as _;

    let low = u8::try_from(metadata.file_attributes() & 0x3f).unwrap_or_default();
    Attributes::from_bits_truncate(low)
}

#[cfg(not(windows))]
fn native_attributes(name: &str, _metadata: &Metadata) -> Attributes {
    if crate::utils::is_hidden_name(name) {
        Attributes::HIDDEN
    } else {
        Attributes::empty()
    }
}
