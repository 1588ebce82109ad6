// src/tools/delete.rs
use crate::models::{Attributes, DirEntry, EnumerationOptions, PassFlags, Progress};
use crate::tools::FileTool;
use crate::utils::format_count;
use crate::visitor::{OptionOutcome, Visitor};
use anyhow::{Context as _, Result, bail};
use std::fs;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// Deletes every matched file, and with `-r` the matched directories too.
///
/// Before each wildcard batch the user is asked to confirm unless `-p` is
/// given. Directories are only removed once the whole command line has
/// been processed, deepest first, so they are empty by then if their
/// contents were matched as well.
pub struct DeleteTool<W, R> {
    out: W,
    input: R,
    prompt: bool,
    quietly: bool,
    delete_readonly: bool,
    remove_dirs: bool,
    saved_dirs: Vec<String>,
    files_processed: u64,
    files_deleted: u64,
    dirs_processed: u64,
    dirs_removed: u64,
}

impl<W: Write, R: BufRead> DeleteTool<W, R> {
    /// Creates the tool; prompts are written to `out` and answered from
    /// `input`.
    #[must_use]
    pub const fn new(out: W, input: R) -> Self {
        Self {
            out,
            input,
            prompt: true,
            quietly: false,
            delete_readonly: false,
            remove_dirs: false,
            saved_dirs: Vec::new(),
            files_processed: 0,
            files_deleted: 0,
            dirs_processed: 0,
            dirs_removed: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    #[must_use]
    pub const fn files_deleted(&self) -> u64 {
        self.files_deleted
    }

    #[must_use]
    pub const fn dirs_removed(&self) -> u64 {
        self.dirs_removed
    }

    fn confirm(&mut self, spec: &str) -> io::Result<bool> {
        write!(self.out, "OK to delete \"{spec}\"?")?;
        self.out.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        let yes = matches!(answer.trim_start().chars().next(), Some('y' | 'Y'));
        writeln!(self.out, "{}", if yes { "Yes" } else { "No" })?;
        Ok(yes)
    }

    fn remove_saved_dirs(&mut self) -> Result<()> {
        let saved = std::mem::take(&mut self.saved_dirs);
        for dir in saved.iter().rev() {
            self.dirs_processed += 1;
            match fs::remove_dir(dir) {
                Ok(()) => {
                    self.dirs_removed += 1;
                    if !self.quietly {
                        writeln!(self.out, "{dir} removed.")?;
                    }
                }
                Err(err) => {
                    warn!(dir, error = %err, "directory not removed");
                    writeln!(self.out, "{dir}{}", status(&err, false, "removed"))?;
                }
            }
        }
        Ok(())
    }
}

/// The tail of the line printed for a failed removal.
fn status(err: &io::Error, read_only: bool, verb: &str) -> String {
    match err.kind() {
        io::ErrorKind::PermissionDenied if read_only => String::from(" is READ-ONLY."),
        io::ErrorKind::PermissionDenied => String::from(" is in use."),
        io::ErrorKind::NotFound => String::from(" not found."),
        _ => format!(" NOT {verb}."),
    }
}

/// One totals line: `3 files deleted.` or
/// `3 files processed, but only 2 deleted.`
fn report(processed: u64, done: u64, one: &str, many: &str, verb: &str) -> String {
    let noun = if processed == 1 { one } else { many };
    if done == processed {
        return format!("{} {noun} {verb}.", format_count(processed));
    }
    let only = if done == 0 { "" } else { "only " };
    format!(
        "{} {noun} processed, but {only}{} {verb}.",
        format_count(processed),
        format_count(done)
    )
}

#[cfg(unix)]
fn make_writable(path: &str) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt as _;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o200);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn make_writable(path: &str) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}

/// Removes a file, clearing its read-only state and retrying once when
/// that is what stood in the way.
fn remove_file(path: &str, clear_readonly: bool) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if clear_readonly && err.kind() == io::ErrorKind::PermissionDenied => {
            make_writable(path)?;
            fs::remove_file(path)
        }
        other => other,
    }
}

impl<W: Write, R: BufRead> Visitor for DeleteTool<W, R> {
    fn on_entry(&mut self, path: &str, entry: &DirEntry) -> Result<usize> {
        if entry.is_dir() {
            if !self.remove_dirs {
                return Ok(0);
            }
            debug!(path, "saving directory for removal");
            self.saved_dirs.push(path.to_owned());
            return Ok(1);
        }

        self.files_processed += 1;
        let read_only = entry.attributes.contains(Attributes::READ_ONLY);
        if read_only && !self.delete_readonly {
            writeln!(self.out, "{path} is READ-ONLY.")?;
            bail!("\"{path}\" is read-only (use -a).");
        }

        if let Err(err) = remove_file(path, read_only) {
            writeln!(self.out, "{path}{}", status(&err, read_only, "deleted"))?;
            return Err(err).with_context(|| format!("Cannot delete \"{path}\""));
        }

        self.files_deleted += 1;
        if !self.quietly {
            let was = if read_only { " was READ-ONLY but now" } else { "" };
            writeln!(self.out, "{path}{was} deleted.")?;
        }
        Ok(1)
    }

    fn on_progress(&mut self, event: Progress<'_>, _level: usize) -> ControlFlow<()> {
        let Progress::WildStart(spec) = event else {
            return ControlFlow::Continue(());
        };
        if !self.prompt {
            return ControlFlow::Continue(());
        }
        match self.confirm(spec) {
            Ok(true) => ControlFlow::Continue(()),
            Ok(false) => ControlFlow::Break(()),
            Err(err) => {
                warn!(spec, error = %err, "cannot ask for confirmation");
                ControlFlow::Break(())
            }
        }
    }

    fn on_option(&mut self, switch: &str, _pass: PassFlags) -> OptionOutcome {
        let Some(key) = switch.chars().next() else {
            return OptionOutcome::NotHandled;
        };
        match key.to_ascii_lowercase() {
            'p' => self.prompt = false,
            'q' => self.quietly = true,
            'r' => self.remove_dirs = true,
            'a' => self.delete_readonly = true,
            // directories are selected with -r here
            'd' => return OptionOutcome::Invalid,
            _ => return OptionOutcome::NotHandled,
        }
        OptionOutcome::Handled
    }
}

impl<W: Write, R: BufRead> FileTool for DeleteTool<W, R> {
    fn write_usage(&mut self, program: &str) -> io::Result<()> {
        writeln!(self.out, "eXtended DELete utility")?;
        writeln!(self.out, "-----------------------")?;
        writeln!(
            self.out,
            "Usage: {program} delete [-i] [-h] [-y] [-a] [-e<path>] [-s] [-r] [-q] [-p] [-?] <Name(s)>"
        )?;
        writeln!(self.out, "\tuse -i to ignore any errors encountered and keep going.")?;
        writeln!(self.out, "\tuse -h to delete hidden files as well.")?;
        writeln!(self.out, "\tuse -y to delete system files as well.")?;
        writeln!(self.out, "\tuse -a to delete read-only files also.")?;
        writeln!(self.out, "\tuse -e<path> to specify default path for remaining files.")?;
        writeln!(self.out, "\tuse -s to process files in subdirectories also.")?;
        writeln!(self.out, "\tuse -r to remove directory entries also.")?;
        writeln!(self.out, "\tuse -q to quietly do the work.")?;
        writeln!(self.out, "\tuse -p to not prompt on wild card deletes.")?;
        writeln!(self.out, "\t  Name(s) can be '@<Indirect file>'.")
    }

    #[inline]
    fn files_pass(&self) -> PassFlags {
        PassFlags::FILES | PassFlags::OPTIONS
    }

    fn prepare(&mut self, options: &mut EnumerationOptions) -> Result<()> {
        if self.remove_dirs {
            options.include_dirs = true;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.remove_saved_dirs()?;
        if !self.quietly {
            if self.files_processed == 0 {
                writeln!(self.out, "NO files processed!")?;
            } else {
                let line = report(self.files_processed, self.files_deleted, "file", "files", "deleted");
                writeln!(self.out, "{line}")?;
            }
            if self.dirs_processed != 0 {
                let line = report(
                    self.dirs_processed,
                    self.dirs_removed,
                    "directory",
                    "directories",
                    "removed",
                );
                writeln!(self.out, "{line}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
