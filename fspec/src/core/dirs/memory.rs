// src/core/dirs/memory.rs
use crate::core::dirs::DirSource;
use crate::core::matcher::string_compare;
use crate::core::path::is_separator;
use crate::models::{Attributes, DirEntry};
use std::cmp::Ordering;
use std::io::{self, BufRead, Cursor};
use std::time::SystemTime;

#[derive(Debug, Clone)]
struct Node {
    drive: char,
    parent: Vec<String>,
    entry: DirEntry,
    contents: Vec<u8>,
}

/// A directory tree held in memory.
///
/// Entries are listed in insertion order, names compare without regard to
/// case (through the code-page tables) unless [`MemoryDirs::case_sensitive`]
/// is set, and paths without a drive resolve against the current drive.
/// Any attribute bits can be attached, which a real file system on Unix
/// cannot express.
///
/// ```
/// use fspec::core::dirs::{DirSource, MemoryDirs};
///
/// let mut dirs = MemoryDirs::new();
/// dirs.add_file("src/main.rs", "fn main() {}").add_dir("docs");
///
/// let names: Vec<String> = dirs.list("").unwrap().into_iter().map(|e| e.name).collect();
/// assert_eq!(names, ["src", "docs"]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDirs {
    nodes: Vec<Node>,
    drives: Vec<char>,
    current_drive: char,
    case_sensitive: bool,
}

impl Default for MemoryDirs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDirs {
    /// An empty tree on drive `C:`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            drives: vec!['C'],
            current_drive: 'C',
            case_sensitive: false,
        }
    }

    /// Replaces the set of drives; the first becomes the current drive.
    #[must_use]
    pub fn with_drives(mut self, drives: &[char]) -> Self {
        self.drives = drives.iter().map(char::to_ascii_uppercase).collect();
        if let Some(&first) = self.drives.first() {
            self.current_drive = first;
        }
        self
    }

    #[must_use]
    pub const fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Adds a file, creating missing parent directories.
    pub fn add_file(&mut self, path: &str, contents: impl Into<Vec<u8>>) -> &mut Self {
        let contents = contents.into();
        let size = u64::try_from(contents.len()).unwrap_or(u64::MAX);
        self.insert(path, Attributes::ARCHIVE, size, contents);
        self
    }

    /// Adds a directory, creating missing parent directories.
    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        self.insert(path, Attributes::DIRECTORY, 0, Vec::new());
        self
    }

    /// Adds `attributes` to an existing entry. Unknown paths are ignored.
    pub fn set_attributes(&mut self, path: &str, attributes: Attributes) -> &mut Self {
        if let Some(index) = self.find_node(path) {
            self.nodes[index].entry.attributes |= attributes;
        }
        self
    }

    pub fn set_modified(&mut self, path: &str, modified: SystemTime) -> &mut Self {
        if let Some(index) = self.find_node(path) {
            self.nodes[index].entry.modified = modified;
        }
        self
    }

    /// Contents of the file at `path`.
    #[must_use]
    pub fn contents(&self, path: &str) -> Option<&[u8]> {
        self.find_node(path)
            .map(|index| self.nodes[index].contents.as_slice())
    }

    fn names_equal(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            string_compare(a, b, false) == Ordering::Equal
        }
    }

    fn same_dir(&self, a: &[String], b: &[String]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.names_equal(x, y))
    }

    /// Drive letter and normalized components of `path`.
    fn locate(&self, path: &str) -> (char, Vec<String>) {
        let mut chars = path.chars();
        let (drive, rest) = match (chars.next(), chars.next()) {
            (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => {
                (letter.to_ascii_uppercase(), &path[2..])
            }
            _ => (self.current_drive, path),
        };

        let mut components: Vec<String> = Vec::new();
        for part in rest.split(is_separator) {
            match part {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                name => components.push(name.to_owned()),
            }
        }
        (drive, components)
    }

    fn find_node(&self, path: &str) -> Option<usize> {
        let (drive, mut components) = self.locate(path);
        let name = components.pop()?;
        self.nodes.iter().position(|node| {
            node.drive == drive
                && self.same_dir(&node.parent, &components)
                && self.names_equal(&node.entry.name, &name)
        })
    }

    fn is_directory(&self, drive: char, components: &[String]) -> bool {
        let Some((name, parent)) = components.split_last() else {
            return self.drives.contains(&drive);
        };
        self.nodes.iter().any(|node| {
            node.drive == drive
                && node.entry.is_dir()
                && self.same_dir(&node.parent, parent)
                && self.names_equal(&node.entry.name, name)
        })
    }

    fn insert(&mut self, path: &str, attributes: Attributes, size: u64, contents: Vec<u8>) {
        let (drive, components) = self.locate(path);
        for depth in 1..=components.len() {
            let (name, parent) = (&components[depth - 1], &components[..depth - 1]);
            let exists = self.nodes.iter().any(|node| {
                node.drive == drive
                    && self.same_dir(&node.parent, parent)
                    && self.names_equal(&node.entry.name, name)
            });
            if exists {
                continue;
            }
            let leaf = depth == components.len();
            let node = Node {
                drive,
                parent: parent.to_vec(),
                entry: DirEntry::new(
                    name.clone(),
                    if leaf { attributes } else { Attributes::DIRECTORY },
                    SystemTime::UNIX_EPOCH,
                    if leaf { size } else { 0 },
                ),
                contents: if leaf { contents.clone() } else { Vec::new() },
            };
            self.nodes.push(node);
        }
    }
}

impl DirSource for MemoryDirs {
    fn list(&self, dir: &str) -> io::Result<Vec<DirEntry>> {
        let (drive, components) = self.locate(dir);
        if !self.is_directory(drive, &components) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {dir}"),
            ));
        }
        Ok(self
            .nodes
            .iter()
            .filter(|node| node.drive == drive && self.same_dir(&node.parent, &components))
            .map(|node| node.entry.clone())
            .collect())
    }

    fn stat(&self, path: &str) -> io::Result<DirEntry> {
        let (drive, components) = self.locate(path);
        if components.is_empty() && self.drives.contains(&drive) {
            return Ok(DirEntry::new(
                path,
                Attributes::DIRECTORY,
                SystemTime::UNIX_EPOCH,
                0,
            ));
        }
        self.find_node(path)
            .map(|index| self.nodes[index].entry.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("not found: {path}")))
    }

    fn open_list(&self, path: &str) -> io::Result<Box<dyn BufRead>> {
        match self.find_node(path).map(|index| &self.nodes[index]) {
            Some(node) if !node.entry.is_dir() => Ok(Box::new(Cursor::new(node.contents.clone()))),
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {path}"),
            )),
        }
    }

    fn drives(&self) -> Vec<char> {
        self.drives.clone()
    }
}
