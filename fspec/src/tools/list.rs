// src/tools/list.rs
use crate::models::{DirEntry, PassFlags};
use crate::tools::FileTool;
use crate::utils::format_count;
use crate::visitor::{OptionOutcome, Visitor};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::io::{self, Write};

/// Prints every match: size, modification time and path, or just the path
/// with `-b`.
pub struct ListTool<W> {
    out: W,
    bare: bool,
    files: u64,
    dirs: u64,
    bytes: u64,
}

impl<W: Write> ListTool<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            bare: false,
            files: 0,
            dirs: 0,
            bytes: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for ListTool<W> {
    fn on_entry(&mut self, path: &str, entry: &DirEntry) -> Result<usize> {
        if entry.is_dir() {
            self.dirs += 1;
        } else {
            self.files += 1;
            self.bytes += entry.size;
        }

        if self.bare {
            writeln!(self.out, "{path}")?;
            return Ok(1);
        }

        let size = if entry.is_dir() {
            String::from("<DIR>")
        } else {
            format_count(entry.size)
        };
        let modified = DateTime::<Local>::from(entry.modified);
        writeln!(self.out, "{size:>14}  {}  {path}", modified.format("%Y-%m-%d %H:%M"))?;
        Ok(1)
    }

    fn on_option(&mut self, switch: &str, _pass: PassFlags) -> OptionOutcome {
        if switch.eq_ignore_ascii_case("b") {
            self.bare = true;
            OptionOutcome::Handled
        } else {
            OptionOutcome::NotHandled
        }
    }
}

impl<W: Write> FileTool for ListTool<W> {
    fn write_usage(&mut self, program: &str) -> io::Result<()> {
        writeln!(self.out, "Usage: {program} list [-b] [-d] [-h] [-y] [-s] [-i] [-q] [-e<path>] [-?] <Name(s)>")?;
        writeln!(self.out, "\tuse -b for bare output, one path per line.")?;
        writeln!(self.out, "\tuse -d to list directories as well.")?;
        writeln!(self.out, "\tuse -h and -y to include hidden and system files.")?;
        writeln!(self.out, "\tuse -s to process files in subdirectories also.")?;
        writeln!(self.out, "\t  Name(s) can be '@<Indirect file>'.")
    }

    #[inline]
    fn files_pass(&self) -> PassFlags {
        PassFlags::FILES | PassFlags::OPTIONS
    }

    fn finish(&mut self) -> Result<()> {
        if !self.bare {
            writeln!(
                self.out,
                "{} file(s), {} dir(s), {} bytes",
                format_count(self.files),
                format_count(self.dirs),
                format_count(self.bytes)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}
