// src/core/path.rs
use crate::core::matcher::has_wildcard;
use std::path::MAIN_SEPARATOR;

/// Whether `c` separates directory components. Both slashes are accepted
/// on every platform.
#[inline]
#[must_use]
pub const fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// A path split into drive, directory, base name and extension.
///
/// * `drive` is a single letter (or `*`/`?`) followed by `:`, or empty.
/// * `dir` keeps its trailing separator when non-empty.
/// * `ext` starts at the last `.` of the final component, dot included.
///
/// Any component may contain wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    pub drive: String,
    pub dir: String,
    pub base: String,
    pub ext: String,
}

impl PathParts {
    /// Splits `path` into its four components.
    ///
    /// ```
    /// use fspec::core::path::PathParts;
    ///
    /// let parts = PathParts::split("C:docs/old/report.txt");
    /// assert_eq!(parts.drive, "C:");
    /// assert_eq!(parts.dir, "docs/old/");
    /// assert_eq!(parts.base, "report");
    /// assert_eq!(parts.ext, ".txt");
    /// assert_eq!(parts.join(), "C:docs/old/report.txt");
    /// ```
    #[must_use]
    pub fn split(path: &str) -> Self {
        let (drive, rest) = split_drive(path);
        let name_start = rest.rfind(is_separator).map_or(0, |i| i + 1);
        let (dir, name) = rest.split_at(name_start);
        let (base, ext) = name.rfind('.').map_or((name, ""), |i| name.split_at(i));

        Self {
            drive: drive.to_owned(),
            dir: dir.to_owned(),
            base: base.to_owned(),
            ext: ext.to_owned(),
        }
    }

    /// Reassembles the components, see [`join`].
    #[must_use]
    pub fn join(&self) -> String {
        join(&self.drive, &self.dir, &self.base, &self.ext)
    }

    #[must_use]
    pub fn with_dir(&self, dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_base(&self, base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_ext(&self, ext: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            ..self.clone()
        }
    }

    /// Drive and directory together, the location a search lists.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}{}", self.drive, self.dir)
    }

    /// Base name and extension together.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}{}", self.base, self.ext)
    }

    #[inline]
    #[must_use]
    pub fn drive_is_wild(&self) -> bool {
        has_wildcard(&self.drive)
    }

    #[inline]
    #[must_use]
    pub fn dir_is_wild(&self) -> bool {
        has_wildcard(&self.dir)
    }

    /// Whether the base name or the extension holds a wildcard.
    #[inline]
    #[must_use]
    pub fn name_is_wild(&self) -> bool {
        has_wildcard(&self.base) || has_wildcard(&self.ext)
    }
}

/// Builds a path from its components.
///
/// A missing `:` is added after a bare drive letter, a separator after a
/// directory that lacks one, and a `.` before an extension that lacks one.
/// Empty components are left out.
#[must_use]
pub fn join(drive: &str, dir: &str, base: &str, ext: &str) -> String {
    let mut path = String::with_capacity(drive.len() + dir.len() + base.len() + ext.len() + 2);

    if !drive.is_empty() {
        path.push_str(drive);
        if !drive.ends_with(':') {
            path.push(':');
        }
    }
    if !dir.is_empty() {
        path.push_str(dir);
        if !dir.ends_with(is_separator) {
            path.push(MAIN_SEPARATOR);
        }
    }
    path.push_str(base);
    if !ext.is_empty() {
        if !ext.starts_with('.') {
            path.push('.');
        }
        path.push_str(ext);
    }
    path
}

/// The final component of `path`: whatever follows the last separator or
/// the drive marker.
///
/// ```
/// use fspec::core::path::file_name_part;
///
/// assert_eq!(file_name_part("a/b\\c.txt"), "c.txt");
/// assert_eq!(file_name_part("C:c.txt"), "c.txt");
/// assert_eq!(file_name_part("dir/"), "");
/// ```
#[must_use]
pub fn file_name_part(path: &str) -> &str {
    let (_, rest) = split_drive(path);
    rest.rfind(is_separator).map_or(rest, |i| &rest[i + 1..])
}

fn split_drive(path: &str) -> (&str, &str) {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() || letter == '*' || letter == '?' => {
            path.split_at(2)
        }
        _ => ("", path),
    }
}
