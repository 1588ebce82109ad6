// src/core/indirect.rs
use crate::core::codepage::decode_line;
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Column where the extension starts in a fixed-width directory listing.
const LISTING_EXT_COLUMN: usize = 9;

/// One word read from an indirect list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// 1-based line the token came from.
    pub line: u64,
}

#[inline]
const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Lazily reads tokens from an indirect list, one line at a time.
///
/// Lines may end in LF or CR LF and may be UTF-8 or code page 437. A read
/// failure is yielded once as an error, after which the iterator is done;
/// [`ListTokens::line_number`] then names the line that failed.
pub struct ListTokens<R> {
    reader: R,
    dir_listing: bool,
    line: u64,
    pending: VecDeque<String>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> ListTokens<R> {
    /// Starts reading `reader`. With `dir_listing` set each line is read as
    /// one entry of a DOS `DIR` listing instead of a list of words.
    pub fn new(reader: R, dir_listing: bool) -> Self {
        Self {
            reader,
            dir_listing,
            line: 0,
            pending: VecDeque::new(),
            buf: Vec::new(),
            done: false,
        }
    }

    /// The line most recently read (1-based, 0 before the first read).
    #[must_use]
    pub const fn line_number(&self) -> u64 {
        self.line
    }

    /// Gives back the reader, positioned after the last line read.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        self.line += 1;
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let end = self
            .buf
            .iter()
            .rposition(|&b| b != b'\n' && b != b'\r')
            .map_or(0, |i| i + 1);
        Ok(Some(decode_line(&self.buf[..end])))
    }
}

impl<R: BufRead> Iterator for ListTokens<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(text) = self.pending.pop_front() {
                return Some(Ok(Token {
                    text,
                    line: self.line,
                }));
            }
            if self.done {
                return None;
            }
            match self.read_line() {
                Ok(Some(line)) => self.pending.extend(tokenize_line(&line, self.dir_listing)),
                Ok(None) => self.done = true,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Splits one line of an indirect list into argument tokens.
///
/// Words are separated by blanks. A word that starts with `"` runs to the
/// next lone `"`, and `""` inside it stands for one quote character. Empty
/// tokens (such as a bare `""`) are dropped.
///
/// In directory-listing mode lines starting with a blank are headers or
/// footers and yield nothing. Only the first word of any other line is
/// used, and a word without a `.` that is followed by more text is glued
/// to the extension found at column 9, so `REPORT   TXT  1234 ...`
/// becomes `REPORT.TXT`.
///
/// ```
/// use fspec::core::indirect::tokenize_line;
///
/// assert_eq!(tokenize_line(r#""a""b" c"#, false), ["a\"b", "c"]);
/// assert_eq!(tokenize_line("REPORT   TXT      1234", true), ["REPORT.TXT"]);
/// ```
#[must_use]
pub fn tokenize_line(line: &str, dir_listing: bool) -> Vec<String> {
    if dir_listing {
        return listing_entry(line).into_iter().collect();
    }

    let mut tokens = Vec::new();
    let mut rest = line.trim_start_matches(is_blank);
    while !rest.is_empty() {
        let (token, after) = next_word(rest);
        if !token.is_empty() {
            tokens.push(token);
        }
        rest = after.trim_start_matches(is_blank);
    }
    tokens
}

fn listing_entry(line: &str) -> Option<String> {
    if line.is_empty() || line.starts_with(' ') {
        return None;
    }

    let (mut token, after) = next_word(line);
    if !after.is_empty() && !token.contains('.') {
        token.push('.');
        token.extend(
            line.chars()
                .skip(LISTING_EXT_COLUMN)
                .take_while(|&c| !is_blank(c)),
        );
    }
    (!token.is_empty()).then_some(token)
}

/// Takes one quoted or plain word off the front of `text`, returning it
/// with whatever follows.
fn next_word(text: &str) -> (String, &str) {
    let Some(quoted) = text.strip_prefix('"') else {
        let end = text.find(is_blank).unwrap_or(text.len());
        return (text[..end].to_owned(), &text[end..]);
    };

    let mut token = String::new();
    let mut chars = quoted.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            token.push(c);
            continue;
        }
        if chars.next_if(|&(_, next)| next == '"').is_some() {
            token.push('"');
        } else {
            return (token, &quoted[i + 1..]);
        }
    }
    (token, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::{BufReader, Cursor, Read};

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize_line("  one\ttwo   three ", false), ["one", "two", "three"]);
        assert!(tokenize_line("   ", false).is_empty());
    }

    #[test]
    fn test_quoted_tokens() {
        assert_eq!(tokenize_line(r#""a""b" c"#, false), ["a\"b", "c"]);
        assert_eq!(
            tokenize_line(r#""my file.txt" other"#, false),
            ["my file.txt", "other"]
        );
        // unterminated quote runs to the end of the line
        assert_eq!(tokenize_line(r#""open ended"#, false), ["open ended"]);
        // an empty quoted token is dropped
        assert_eq!(tokenize_line(r#""" x"#, false), ["x"]);
    }

    #[test]
    fn test_directory_listing_lines() {
        assert!(tokenize_line(" Volume in drive C is DOS", true).is_empty());
        assert!(tokenize_line("", true).is_empty());
        assert_eq!(
            tokenize_line("REPORT   TXT      1234 01-02-94  10:15a", true),
            ["REPORT.TXT"]
        );
        assert_eq!(
            tokenize_line("MAKEFILE          512 01-02-94  10:15a", true),
            ["MAKEFILE."]
        );
        assert_eq!(tokenize_line("notes.md", true), ["notes.md"]);
        assert_eq!(tokenize_line("notes.md   and more", true), ["notes.md"]);
        assert_eq!(tokenize_line("README", true), ["README"]);
    }

    #[test]
    fn test_iterator_tracks_lines() -> Result<()> {
        let input = Cursor::new("a b\r\n\n  \"c d\"\n");
        let tokens = ListTokens::new(input, false).collect::<io::Result<Vec<_>>>()?;

        let seen: Vec<(&str, u64)> = tokens.iter().map(|t| (t.text.as_str(), t.line)).collect();
        assert_eq!(seen, [("a", 1), ("b", 1), ("c d", 3)]);
        Ok(())
    }

    #[test]
    fn test_code_page_fallback() -> Result<()> {
        let input = Cursor::new(b"caf\x82.txt\n".to_vec());
        let tokens = ListTokens::new(input, false).collect::<io::Result<Vec<_>>>()?;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "café.txt");
        Ok(())
    }

    struct FailAfterFirstLine {
        served: bool,
    }

    impl Read for FailAfterFirstLine {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("disk gone"));
            }
            self.served = true;
            let line = b"first\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_read_error_is_reported_once() {
        let reader = BufReader::new(FailAfterFirstLine { served: false });
        let mut tokens = ListTokens::new(reader, false);

        assert!(matches!(tokens.next(), Some(Ok(ref t)) if t.text == "first"));
        assert!(matches!(tokens.next(), Some(Err(_))), "second line should fail");
        assert_eq!(tokens.line_number(), 2);
        assert!(tokens.next().is_none());
    }
}
