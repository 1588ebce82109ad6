// src/tools/touch.rs
use crate::models::{Attributes, DirEntry, EnumerationOptions, PassFlags};
use crate::tools::FileTool;
use crate::visitor::{OptionOutcome, Visitor};
use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use std::fs::File;
use std::io::{self, Write};
use std::time::SystemTime;
use tracing::debug;

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Sets the modification time of every matched file.
///
/// The time defaults to now. `-d` picks a date (at midnight unless `-t`
/// is also given) and `-t` a time of day (today unless `-d` is given).
pub struct TouchTool<W> {
    out: W,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    touch_readonly: bool,
    quiet: bool,
    stamp: Option<SystemTime>,
}

impl<W: Write> TouchTool<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            date: None,
            time: None,
            touch_readonly: false,
            quiet: false,
            stamp: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// The local time files will be given.
    fn target(&self) -> Result<DateTime<Local>> {
        let now = Local::now();
        if self.date.is_none() && self.time.is_none() {
            return Ok(now);
        }
        let date = self.date.unwrap_or_else(|| now.date_naive());
        let time = match self.time {
            Some(time) => time,
            None if self.date.is_some() => NaiveTime::MIN,
            None => now.time(),
        };
        date.and_time(time)
            .and_local_timezone(Local)
            .earliest()
            .with_context(|| format!("{date} {time} does not exist in the local time zone"))
    }
}

/// Parses the value of `-t`, with or without seconds.
fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

#[cfg(windows)]
fn open_for_times(path: &str) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt as _;

    const FILE_WRITE_ATTRIBUTES: u32 = 0x100;
    std::fs::OpenOptions::new()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(path)
}

#[cfg(not(windows))]
fn open_for_times(path: &str) -> io::Result<File> {
    File::open(path)
}

impl<W: Write> Visitor for TouchTool<W> {
    fn on_entry(&mut self, path: &str, entry: &DirEntry) -> Result<usize> {
        if entry.is_dir() {
            return Ok(0);
        }
        if entry.attributes.contains(Attributes::READ_ONLY) && !self.touch_readonly {
            bail!("Cannot set date/time for \"{path}\": file is read-only (use -r).");
        }

        let stamp = match self.stamp {
            Some(stamp) => stamp,
            None => self.target()?.into(),
        };
        open_for_times(path)
            .and_then(|file| file.set_modified(stamp))
            .with_context(|| format!("Cannot set date/time for \"{path}\"."))?;

        if !self.quiet {
            writeln!(self.out, "\t{path}")?;
        }
        Ok(1)
    }

    fn on_option(&mut self, switch: &str, _pass: PassFlags) -> OptionOutcome {
        let mut chars = switch.chars();
        let (Some(key), value) = (chars.next(), chars.as_str()) else {
            return OptionOutcome::NotHandled;
        };
        match key.to_ascii_lowercase() {
            'd' => match NaiveDate::parse_from_str(value, DATE_FORMAT) {
                Ok(date) => {
                    self.date = Some(date);
                    OptionOutcome::Handled
                }
                Err(_) => OptionOutcome::Invalid,
            },
            't' => match parse_time(value) {
                Some(time) => {
                    self.time = Some(time);
                    OptionOutcome::Handled
                }
                None => OptionOutcome::Invalid,
            },
            'r' => {
                self.touch_readonly = true;
                OptionOutcome::Handled
            }
            _ => OptionOutcome::NotHandled,
        }
    }
}

impl<W: Write> FileTool for TouchTool<W> {
    fn write_usage(&mut self, program: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "Usage: {program} touch [-dmm/dd/yyyy] [-thh:mm[:ss]] [-q] [-i] [-h] [-s] [-y] [-r] [-?] <Name(s)>"
        )?;
        writeln!(self.out, "\tuse -d and/or -t to set specific date/time for file(s).")?;
        writeln!(self.out, "\t\tNote: using date only sets time to midnight.")?;
        writeln!(self.out, "\tuse -q (quiet) not to report file name(s) touched.")?;
        writeln!(self.out, "\tuse -r to touch read-only files also.")?;
        writeln!(self.out, "\tuse -s to process files in subdirectories also.")?;
        writeln!(self.out, "\t  Name(s) can be '@<Indirect file>'.")
    }

    fn prepare(&mut self, options: &mut EnumerationOptions) -> Result<()> {
        let target = self.target()?;
        debug!(%target, "touching files");
        self.stamp = Some(target.into());
        self.quiet = options.quiet;
        if !self.quiet {
            writeln!(self.out, "Setting date and time of {} for:", target.format("%c"))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
