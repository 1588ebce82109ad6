// src/config.rs
use crate::models::EnumerationOptions;
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const CONFIG_FILE: &str = ".fspec.toml";

/// Option defaults read from `.fspec.toml`.
///
/// Every field is optional; only the ones present override the built-in
/// defaults, and switches on the command line override both.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub quiet: Option<bool>,
    pub ignore_errors: Option<bool>,
    pub include_hidden: Option<bool>,
    pub include_system: Option<bool>,
    pub include_dirs: Option<bool>,
    pub recurse_subdirs: Option<bool>,
    pub process_nonwild_missing: Option<bool>,
    pub dir_listing: Option<bool>,
    pub slash_switches: Option<bool>,
    pub default_path: Option<String>,
}

impl Config {
    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML, on wrongly typed values and on unknown keys.
    #[inline]
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Overlays the values present onto `options`.
    pub fn apply(&self, options: &mut EnumerationOptions) {
        let flags = [
            (self.quiet, &mut options.quiet),
            (self.ignore_errors, &mut options.ignore_errors),
            (self.include_hidden, &mut options.include_hidden),
            (self.include_system, &mut options.include_system),
            (self.include_dirs, &mut options.include_dirs),
            (self.recurse_subdirs, &mut options.recurse_subdirs),
            (self.process_nonwild_missing, &mut options.process_nonwild_missing),
            (self.dir_listing, &mut options.dir_listing),
            (self.slash_switches, &mut options.slash_switches),
        ];
        for (value, slot) in flags {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(path) = &self.default_path {
            options.default_path = (!path.is_empty()).then(|| path.clone());
        }
    }
}

/// Finds the nearest `.fspec.toml`, starting in `dir` and checking each
/// parent directory until one is found.
///
/// # Returns
///
/// * `Some(path)` of the first file found, or `None`
#[must_use]
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let mut current_dir = dir.to_path_buf();
    let mut visited = HashSet::new();

    while visited.insert(current_dir.clone()) {
        let candidate = current_dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => break,
        }
    }
    None
}

/// Reads one configuration file.
///
/// # Errors
///
/// Fails when the file cannot be read or does not parse.
#[inline]
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Config::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Loads the configuration that applies in `dir`, or the empty
/// configuration when there is none.
///
/// # Errors
///
/// Fails when a configuration file exists but cannot be read or parsed.
#[inline]
pub fn load_config(dir: &Path) -> Result<Config> {
    find_config(dir).map_or_else(|| Ok(Config::default()), |path| load_config_file(&path))
}
