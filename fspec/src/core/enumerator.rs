// src/core/enumerator.rs
//! Expansion of command-line file specifications.
//!
//! Every argument is one of three things. A switch (`-x`) updates the
//! options of the list it appears in. An indirect reference (`@file`)
//! reads more arguments from a file. Anything else is a path spec that
//! may hold wildcards in its drive, directory or name. Ambiguous drives and
//! directories are resolved one component at a time by recursion, and
//! names are matched with [`string_match`] rather than by the directory
//! backend.

use crate::core::dirs::DirSource;
use crate::core::indirect::ListTokens;
use crate::core::matcher::{WILDCARDS, has_wildcard, string_match};
use crate::core::path::{PathParts, file_name_part, is_separator, join};
use crate::core::switches::StandardSwitch;
use crate::error::SpecError;
use crate::models::{Attributes, DirEntry, EnumerationOptions, PassFlags, Progress};
use crate::visitor::{OptionOutcome, Visitor};
use std::borrow::Cow;
use std::io::{self, BufRead};
use std::path::{MAIN_SEPARATOR, PathBuf};
use tracing::{debug, trace, warn};

/// Deepest nesting of indirect files and subdirectory scans.
pub const MAX_LEVEL: usize = 50;

/// Drives a [`Visitor`] over everything a command line names.
///
/// ```
/// use fspec::{Enumerator, PassFlags};
/// use fspec::core::dirs::MemoryDirs;
///
/// let mut dirs = MemoryDirs::new();
/// dirs.add_file("a.txt", "").add_file("b.log", "").add_file("c.txt", "");
///
/// let mut seen = Vec::new();
/// let mut visit = |path: &str, _: &fspec::DirEntry| -> anyhow::Result<usize> {
///     seen.push(path.to_owned());
///     Ok(1)
/// };
///
/// let mut enumerator = Enumerator::new(dirs);
/// let count = enumerator.process_cmdline(&["*.txt"], PassFlags::all(), &mut visit)?;
/// assert_eq!(count, 2);
/// assert_eq!(seen, ["a.txt", "c.txt"]);
/// # Ok::<(), fspec::SpecError>(())
/// ```
pub struct Enumerator<D> {
    dirs: D,
    options: EnumerationOptions,
    program: String,
    warnings: usize,
    default_input: Option<Box<dyn BufRead>>,
}

impl<D: DirSource> Enumerator<D> {
    #[must_use]
    pub fn new(dirs: D) -> Self {
        Self {
            dirs,
            options: EnumerationOptions::default(),
            program: String::from("FSPEC"),
            warnings: 0,
            default_input: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EnumerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the name diagnostics are prefixed with.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replaces standard input as the source for a bare `@`.
    #[must_use]
    pub fn with_default_input(mut self, input: impl BufRead + 'static) -> Self {
        self.default_input = Some(Box::new(input));
        self
    }

    /// Options as set by configuration and the switches seen so far on the
    /// command line itself.
    #[must_use]
    pub const fn options(&self) -> &EnumerationOptions {
        &self.options
    }

    #[must_use]
    pub const fn options_mut(&mut self) -> &mut EnumerationOptions {
        &mut self.options
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Number of warnings printed so far: specs that matched nothing and
    /// visit failures absorbed by permissive mode.
    #[must_use]
    pub const fn warnings(&self) -> usize {
        self.warnings
    }

    /// Processes a whole command line (without the program name).
    ///
    /// With only [`PassFlags::OPTIONS`], every switch is applied to the base
    /// options and the number of switches recognised is returned. Once
    /// [`PassFlags::FILES`] is included, every argument is expanded in order
    /// at level 0; switches then apply to the arguments after them and are
    /// not counted.
    ///
    /// # Returns
    ///
    /// * `Ok(n)` - switches recognised, or entries visited
    ///
    /// # Errors
    ///
    /// Stops at the first hard error: a bad switch, `-?`, an unreadable
    /// indirect file, too much nesting, a declined subtree, or a visitor
    /// failure outside permissive mode.
    pub fn process_cmdline<S, V>(&mut self, args: &[S], pass: PassFlags, visitor: &mut V) -> Result<usize, SpecError>
    where
        S: AsRef<str>,
        V: Visitor + ?Sized,
    {
        if !pass.contains(PassFlags::FILES) {
            if !pass.contains(PassFlags::OPTIONS) {
                return Ok(0);
            }
            let mut recognised = 0;
            for arg in args {
                let arg = arg.as_ref();
                if self.options.is_switch(arg) {
                    recognised += apply_switch(arg, pass, &mut self.options, visitor)?;
                }
            }
            return Ok(recognised);
        }

        let mut total = 0;
        for arg in args {
            total += self.process_arg(arg.as_ref(), pass, visitor)?;
        }
        Ok(total)
    }

    /// Expands a single top-level argument.
    ///
    /// Switches it contains stay in effect for later calls.
    ///
    /// # Errors
    ///
    /// See [`Enumerator::process_cmdline`].
    pub fn process_arg<V>(&mut self, arg: &str, pass: PassFlags, visitor: &mut V) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        let mut scope = self.options.clone();
        let result = self.expand(arg, 0, pass, &mut scope, visitor);
        self.options = scope;
        result
    }

    /// Returns the entries `spec` names that are eligible under `mask`.
    ///
    /// A final component of `*` or `*.*` takes the whole directory, other
    /// wildcard names are matched here, and a literal name is looked up
    /// directly. Lookup failures count as no match.
    #[must_use]
    pub fn find(&self, spec: &str, mask: Attributes) -> Vec<DirEntry> {
        let parts = PathParts::split(spec);
        let name = parts.name();

        if !has_wildcard(&name) {
            return match self.dirs.stat(spec) {
                Ok(entry) if entry.attributes.eligible(mask) => vec![entry],
                Ok(_) => Vec::new(),
                Err(err) => {
                    trace!(spec, error = %err, "no such entry");
                    Vec::new()
                }
            };
        }

        let entries = match self.dirs.list(&parts.location()) {
            Ok(entries) => entries,
            Err(err) => {
                trace!(spec, error = %err, "cannot list directory");
                return Vec::new();
            }
        };

        let everything = name == "*" || name == "*.*";
        let dot = name.contains('.');
        entries
            .into_iter()
            .filter(|entry| entry.attributes.eligible(mask))
            .filter(|entry| everything || string_match(&dotted(&entry.name, dot), &name, false))
            .collect()
    }

    fn expand<V>(
        &mut self,
        arg: &str,
        level: usize,
        pass: PassFlags,
        scope: &mut EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        if scope.is_switch(arg) {
            if pass.contains(PassFlags::OPTIONS) {
                apply_switch(arg, pass, scope, visitor)?;
            }
            return Ok(0);
        }

        if let Some(name) = arg.strip_prefix('@') {
            return self.expand_list(arg, name, level, pass, scope, visitor);
        }

        self.expand_path(arg, level, scope, visitor)
    }

    fn expand_list<V>(
        &mut self,
        arg: &str,
        name: &str,
        level: usize,
        pass: PassFlags,
        scope: &EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        if level > MAX_LEVEL {
            return Err(SpecError::TooDeep { arg: arg.to_owned() });
        }

        let reader: Box<dyn BufRead> = if name.is_empty() {
            match self.default_input.take() {
                Some(input) => input,
                None => Box::new(io::BufReader::new(io::stdin())),
            }
        } else {
            self.dirs
                .open_list(name)
                .map_err(|source| SpecError::OpenList {
                    path: PathBuf::from(name),
                    source,
                })?
        };
        debug!(list = name, level, "reading indirect file");

        let mut nested = scope.clone();
        let mut tokens = ListTokens::new(reader, scope.dir_listing);
        let mut total = 0;
        let mut failure = None;
        while let Some(item) = tokens.next() {
            let token = match item {
                Ok(token) => token,
                Err(source) => {
                    failure = Some(SpecError::ReadList {
                        path: PathBuf::from(if name.is_empty() { "<stdin>" } else { name }),
                        line: tokens.line_number(),
                        source,
                    });
                    break;
                }
            };
            match self.expand(&token.text, level + 1, pass, &mut nested, visitor) {
                Ok(count) => total += count,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        if name.is_empty() {
            self.default_input = Some(tokens.into_inner());
        }
        failure.map_or(Ok(total), Err)
    }

    fn expand_path<V>(
        &mut self,
        arg: &str,
        level: usize,
        scope: &EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        if visitor.on_progress(Progress::RecurseInto(arg), level).is_break() {
            return Err(SpecError::Aborted { arg: arg.to_owned() });
        }

        let result = self.resolve(arg, level, scope, visitor);
        let _ = visitor.on_progress(Progress::RecurseOut, level);
        result
    }

    fn resolve<V>(&mut self, arg: &str, level: usize, scope: &EnumerationOptions, visitor: &mut V) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        let mut parts = PathParts::split(arg);
        let mut spec = arg.to_owned();
        if parts.drive.is_empty() && parts.dir.is_empty() {
            if let Some(default_path) = scope.default_path.as_deref() {
                spec = join("", default_path, &parts.base, &parts.ext);
                parts = PathParts::split(&spec);
            }
        }

        if parts.drive_is_wild() {
            self.expand_drives(&parts, level, scope, visitor)
        } else if parts.dir_is_wild() {
            self.expand_dirs(&parts, level, scope, visitor)
        } else {
            self.expand_files(spec, parts, level, scope, visitor)
        }
    }

    fn expand_drives<V>(
        &mut self,
        parts: &PathParts,
        level: usize,
        scope: &EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        let mut total = 0;
        for letter in self.dirs.drives() {
            let path = PathParts {
                drive: format!("{letter}:"),
                ..parts.clone()
            }
            .join();
            debug!(path, level, "trying drive");
            total += self.expand_path(&path, level + 1, scope, visitor)?;
        }
        Ok(total)
    }

    fn expand_dirs<V>(
        &mut self,
        parts: &PathParts,
        level: usize,
        scope: &EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        let dir = parts.dir.as_str();
        let Some(wild_at) = dir.find(WILDCARDS) else {
            return Ok(0);
        };
        let start = dir[..wild_at].rfind(is_separator).map_or(0, |i| i + 1);
        let end = dir[wild_at..].find(is_separator).map_or(dir.len(), |i| wild_at + i);
        let (prefix, rest) = (&dir[..start], &dir[end..]);

        let search = format!("{}{}", parts.drive, &dir[..end]);
        debug!(search, level, "resolving wildcard directory");

        let mut total = 0;
        for entry in self.find(&search, scope.subdir_mask()) {
            if !entry.is_dir() || entry.is_dot_entry() {
                continue;
            }
            let path = format!(
                "{}{prefix}{}{rest}{}{}",
                parts.drive, entry.name, parts.base, parts.ext
            );
            total += self.expand_path(&path, level + 1, scope, visitor)?;
        }
        Ok(total)
    }

    fn expand_files<V>(
        &mut self,
        mut spec: String,
        mut parts: PathParts,
        level: usize,
        scope: &EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        let requested = spec.clone();

        // no name at all, as in `dir\`; `.env` keeps its empty base
        if parts.base.is_empty() && parts.ext.is_empty() {
            parts.base = String::from("*");
        }

        // a literal directory name means everything in it
        if !has_wildcard(&spec)
            && self
                .find(&spec, Attributes::DIRECTORY | Attributes::READ_ONLY)
                .first()
                .is_some_and(DirEntry::is_dir)
        {
            spec = join("", &spec, "*", "*");
            parts = PathParts::split(&spec);
            debug!(spec, "descending into directory");
        }

        let mask = scope.file_mask();
        if parts.ext.is_empty() && !has_wildcard(&parts.base) && self.find(&spec, mask).is_empty() {
            parts.ext = String::from(".*");
        }

        let wild = parts.name_is_wild();
        let (found, pattern) = if wild {
            let search = join(&parts.drive, &parts.dir, "*", "*");
            (self.find(&search, mask), parts.name())
        } else {
            (self.find(&spec, mask), String::new())
        };
        let dot = pattern.contains('.');

        let mut total = 0;
        if !found.is_empty() {
            if !wild || visitor.on_progress(Progress::WildStart(&requested), level).is_continue() {
                for entry in &found {
                    if wild && !string_match(&dotted(&entry.name, dot), &pattern, false) {
                        continue;
                    }
                    let path = join(&parts.drive, &parts.dir, &entry.name, "");
                    trace!(path, "visiting");
                    match self.visit(&path, entry, scope, visitor) {
                        Ok(count) => total += count,
                        Err(err) => {
                            if wild {
                                let _ = visitor.on_progress(Progress::WildFinish, level);
                            }
                            return Err(err);
                        }
                    }
                }
            }
            if wild {
                let _ = visitor.on_progress(Progress::WildFinish, level);
            }
        } else if scope.process_nonwild_missing && !wild {
            let entry = DirEntry::missing(file_name_part(&spec));
            total += self.visit(&spec, &entry, scope, visitor)?;
        } else if !scope.quiet {
            self.warn_not_found(&spec);
        }

        if scope.recurse_subdirs {
            total += self.recurse_subdirs(&parts, level, scope, visitor)?;
        }
        Ok(total)
    }

    fn recurse_subdirs<V>(
        &mut self,
        parts: &PathParts,
        level: usize,
        scope: &EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        if level > MAX_LEVEL {
            return Err(SpecError::TooDeep { arg: parts.join() });
        }

        let search = join(&parts.drive, &parts.dir, "*", "*");
        let mut total = 0;
        for entry in self.find(&search, scope.subdir_mask()) {
            if !entry.is_dir() || entry.is_dot_entry() {
                continue;
            }
            let dir = format!("{}{}{MAIN_SEPARATOR}", parts.dir, entry.name);
            let path = join(&parts.drive, &dir, &parts.base, &parts.ext);
            total += self.expand_path(&path, level + 1, scope, visitor)?;
        }
        Ok(total)
    }

    fn visit<V>(
        &mut self,
        path: &str,
        entry: &DirEntry,
        scope: &EnumerationOptions,
        visitor: &mut V,
    ) -> Result<usize, SpecError>
    where
        V: Visitor + ?Sized,
    {
        match visitor.on_entry(path, entry) {
            Ok(count) => Ok(count),
            Err(source) if scope.ignore_errors => {
                self.warnings += 1;
                warn!(path, error = format!("{source:#}"), "ignoring failure");
                eprintln!("{}: {source:#}", self.program);
                Ok(0)
            }
            Err(source) => Err(SpecError::Visitor {
                path: path.to_owned(),
                source,
            }),
        }
    }

    fn warn_not_found(&mut self, spec: &str) {
        self.warnings += 1;
        warn!(spec, "nothing matched");
        eprintln!("{}: Cannot find \"{spec}\".", self.program);
    }
}

/// Applies one switch to `options`, giving the tool the first look.
fn apply_switch<V>(arg: &str, pass: PassFlags, options: &mut EnumerationOptions, visitor: &mut V) -> Result<usize, SpecError>
where
    V: Visitor + ?Sized,
{
    let body = arg.get(1..).unwrap_or_default();
    match visitor.on_option(body, pass) {
        OptionOutcome::Handled => return Ok(1),
        OptionOutcome::Invalid => return Err(SpecError::InvalidSwitch { arg: arg.to_owned() }),
        OptionOutcome::NotHandled => {}
    }

    match StandardSwitch::parse(body) {
        Some(StandardSwitch::Usage) => Err(SpecError::UsageRequested),
        Some(switch) => Ok(switch.apply(options, pass)),
        None => Err(SpecError::UnknownSwitch { arg: arg.to_owned() }),
    }
}

/// `name` with a trailing dot added when the pattern expects one and the
/// name has none, so `*.*` also matches `README`.
fn dotted(name: &str, dot: bool) -> Cow<'_, str> {
    if dot && !name.contains('.') {
        Cow::Owned(format!("{name}."))
    } else {
        Cow::Borrowed(name)
    }
}
