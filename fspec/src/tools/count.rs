// src/tools/count.rs
use crate::models::DirEntry;
use crate::tools::FileTool;
use crate::utils::format_count;
use crate::visitor::Visitor;
use anyhow::{Context as _, Result};
use std::fs::File;
use std::io::{self, Read, Write};

/// Line, word and byte totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub lines: u64,
    pub words: u64,
    pub bytes: u64,
}

impl Totals {
    /// Adds everything `reader` yields. Files are counted as raw bytes, so
    /// a CR LF pair counts two bytes and one line.
    ///
    /// # Errors
    ///
    /// Fails when the reader does.
    pub fn add(&mut self, mut reader: impl Read) -> io::Result<()> {
        let mut buf = [0_u8; 8192];
        let mut in_word = false;
        loop {
            let read = match reader.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(read) => read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            for &byte in &buf[..read] {
                self.bytes += 1;
                if byte == b'\n' {
                    self.lines += 1;
                }
                if matches!(byte, b' ' | b'\r' | b'\n' | b'\t') {
                    in_word = false;
                } else if !in_word {
                    in_word = true;
                    self.words += 1;
                }
            }
        }
    }
}

/// Counts lines, words and bytes over every matched file, or over the
/// input stream when no file is named, and prints the totals.
pub struct CountTool<W, R> {
    out: W,
    input: R,
    totals: Totals,
}

impl<W: Write, R: Read> CountTool<W, R> {
    #[must_use]
    pub fn new(out: W, input: R) -> Self {
        Self {
            out,
            input,
            totals: Totals::default(),
        }
    }

    #[must_use]
    pub const fn totals(&self) -> Totals {
        self.totals
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write, R: Read> Visitor for CountTool<W, R> {
    fn on_entry(&mut self, path: &str, entry: &DirEntry) -> Result<usize> {
        if entry.is_dir() {
            return Ok(0);
        }
        let file = File::open(path).with_context(|| format!("Cannot open \"{path}\""))?;
        self.totals
            .add(file)
            .with_context(|| format!("Cannot read \"{path}\""))?;
        Ok(1)
    }
}

impl<W: Write, R: Read> FileTool for CountTool<W, R> {
    fn write_usage(&mut self, program: &str) -> io::Result<()> {
        writeln!(self.out, "Usage: {program} count [-h] [-y] [-s] [-i] [-e<path>] [-?] [Name(s)]")?;
        writeln!(self.out, "\tprints lines, words and bytes; reads standard input without Name(s).")?;
        writeln!(self.out, "\t  Name(s) can be '@<Indirect file>'.")
    }

    fn without_specs(&mut self) -> Result<bool> {
        self.totals
            .add(&mut self.input)
            .context("Cannot read standard input")?;
        Ok(true)
    }

    fn finish(&mut self) -> Result<()> {
        let Totals { lines, words, bytes } = self.totals;
        writeln!(
            self.out,
            "{}\t{}\t{}",
            format_count(lines),
            format_count(words),
            format_count(bytes)
        )?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dirs::MemoryDirs;
    use crate::core::enumerator::Enumerator;
    use crate::tools::run_tool;

    #[test]
    fn test_blanks_split_words() -> Result<()> {
        let mut totals = Totals::default();
        totals.add("one two\tthree\r\n  four\n".as_bytes())?;
        assert_eq!(
            totals,
            Totals {
                lines: 2,
                words: 4,
                bytes: 22
            }
        );
        Ok(())
    }

    #[test]
    fn test_words_do_not_span_inputs() -> Result<()> {
        let mut totals = Totals::default();
        totals.add("abc".as_bytes())?;
        totals.add("def".as_bytes())?;
        assert_eq!(totals.words, 2);
        assert_eq!(totals.lines, 0, "no newline, no line");
        Ok(())
    }

    #[test]
    fn test_reads_input_without_specs() -> Result<()> {
        let mut enumerator = Enumerator::new(MemoryDirs::new());
        let mut tool = CountTool::new(Vec::new(), "a b c\nd\n".as_bytes());

        run_tool(&mut enumerator, &mut tool, &[String::from("-q")])?;
        assert_eq!(String::from_utf8(tool.into_inner())?, "2\t4\t8\n");
        Ok(())
    }
}
