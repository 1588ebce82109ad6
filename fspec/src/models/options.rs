// src/models/options.rs
use crate::models::Attributes;
use bitflags::bitflags;

bitflags! {
    /// Which kinds of arguments a pass over the command line honours.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PassFlags: u8 {
        /// Apply switches.
        const OPTIONS = 0x01;
        /// Expand file specifications.
        const FILES = 0x02;
    }
}

/// Switch-controlled settings shared by every tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationOptions {
    /// Don't report specs that matched nothing (`-q`).
    pub quiet: bool,
    /// Treat visitor failures as zero-count results and keep going (`-i`).
    pub ignore_errors: bool,
    /// Include hidden files (`-h`).
    pub include_hidden: bool,
    /// Include system files (`-y`).
    pub include_system: bool,
    /// Visit directories along with files (`-d`).
    pub include_dirs: bool,
    /// Repeat each spec in every subdirectory (`-s`).
    pub recurse_subdirs: bool,
    /// Visit a non-wildcard spec once even when nothing matches it.
    pub process_nonwild_missing: bool,
    /// Read indirect files as directory listings instead of word lists.
    pub dir_listing: bool,
    /// Also accept `/x` as a switch, not just `-x`.
    pub slash_switches: bool,
    /// Directory put in front of specs that name no drive or directory (`-e`).
    pub default_path: Option<String>,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            ignore_errors: false,
            include_hidden: false,
            include_system: false,
            include_dirs: false,
            recurse_subdirs: false,
            process_nonwild_missing: false,
            dir_listing: false,
            slash_switches: cfg!(windows),
            default_path: None,
        }
    }
}

impl EnumerationOptions {
    /// Attribute mask for the entries a file search should return.
    #[must_use]
    pub fn file_mask(&self) -> Attributes {
        let mut mask = Attributes::READ_ONLY;
        mask.set(Attributes::HIDDEN, self.include_hidden);
        mask.set(Attributes::SYSTEM, self.include_system);
        mask.set(Attributes::DIRECTORY, self.include_dirs);
        mask
    }

    /// Attribute mask for subdirectory searches.
    #[must_use]
    pub fn subdir_mask(&self) -> Attributes {
        Attributes::subdir_mask(self.include_hidden, self.include_system)
    }

    /// Whether `arg` is written as a switch under these options.
    #[must_use]
    pub fn is_switch(&self, arg: &str) -> bool {
        arg.starts_with('-') || (self.slash_switches && arg.starts_with('/'))
    }
}
