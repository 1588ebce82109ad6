// src/core/switches.rs
use crate::core::codepage::string_upper;
use crate::core::path::PathParts;
use crate::models::{EnumerationOptions, PassFlags};

/// The switches every tool understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandardSwitch {
    Quiet,
    IgnoreErrors,
    Hidden,
    Subdirs,
    System,
    Dirs,
    /// `-e<path>`; an empty value clears the default path.
    DefaultPath(String),
    /// `-?`
    Usage,
}

impl StandardSwitch {
    /// Looks up a switch by its body, the text after the `-` or `/`.
    ///
    /// The key letter is case-insensitive. Only `-e` takes a value; any
    /// text after the other letters is ignored.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let mut chars = body.chars();
        let key = chars.next()?;
        let switch = match key.to_ascii_lowercase() {
            'q' => Self::Quiet,
            'i' => Self::IgnoreErrors,
            'h' => Self::Hidden,
            's' => Self::Subdirs,
            'y' => Self::System,
            'd' => Self::Dirs,
            'e' => Self::DefaultPath(chars.as_str().to_owned()),
            '?' => Self::Usage,
            _ => return None,
        };
        Some(switch)
    }

    /// Applies the switch to `options`, returning how many switches to
    /// count for the pass.
    ///
    /// The default path is only taken while file specs are being
    /// processed, so it stays positional, and it never counts.
    pub fn apply(self, options: &mut EnumerationOptions, pass: PassFlags) -> usize {
        match self {
            Self::Quiet => options.quiet = true,
            Self::IgnoreErrors => options.ignore_errors = true,
            Self::Hidden => options.include_hidden = true,
            Self::Subdirs => options.recurse_subdirs = true,
            Self::System => options.include_system = true,
            Self::Dirs => options.include_dirs = true,
            Self::DefaultPath(path) => {
                if pass.contains(PassFlags::FILES) {
                    options.default_path = (!path.is_empty()).then_some(path);
                }
                return 0;
            }
            Self::Usage => return 0,
        }
        1
    }
}

/// Message prefix derived from `argv[0]`: the upper-cased file stem.
///
/// ```
/// use fspec::core::switches::program_name;
///
/// assert_eq!(program_name("/usr/local/bin/fspec"), "FSPEC");
/// assert_eq!(program_name("C:\\TOOLS\\xdel.exe"), "XDEL");
/// ```
#[must_use]
pub fn program_name(argv0: &str) -> String {
    string_upper(&PathParts::split(argv0).base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(StandardSwitch::parse("s"), Some(StandardSwitch::Subdirs));
        assert_eq!(StandardSwitch::parse("S"), Some(StandardSwitch::Subdirs));
        assert_eq!(StandardSwitch::parse("Y"), Some(StandardSwitch::System));
        assert_eq!(StandardSwitch::parse("z"), None);
        assert_eq!(StandardSwitch::parse(""), None);
    }

    #[test]
    fn test_default_path_value() {
        assert_eq!(
            StandardSwitch::parse("Esrc/lib"),
            Some(StandardSwitch::DefaultPath(String::from("src/lib")))
        );

        let mut options = EnumerationOptions::default();
        let counted = StandardSwitch::DefaultPath(String::from("src")).apply(&mut options, PassFlags::OPTIONS);
        assert_eq!(counted, 0);
        assert_eq!(options.default_path, None, "options-only pass ignores -e");

        StandardSwitch::DefaultPath(String::from("src")).apply(&mut options, PassFlags::all());
        assert_eq!(options.default_path.as_deref(), Some("src"));

        StandardSwitch::DefaultPath(String::new()).apply(&mut options, PassFlags::FILES);
        assert_eq!(options.default_path, None, "empty -e clears it");
    }

    #[test]
    fn test_flags_count_once() {
        let mut options = EnumerationOptions::default();
        assert_eq!(StandardSwitch::Hidden.apply(&mut options, PassFlags::OPTIONS), 1);
        assert!(options.include_hidden);
        assert!(!options.include_system);
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name("fspec"), "FSPEC");
        assert_eq!(program_name("./target/debug/fspec"), "FSPEC");
    }
}
