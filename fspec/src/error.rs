// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures raised while expanding a command line.
///
/// Every variant aborts the branch that produced it and travels up through
/// each recursion frame. The only failure that can be absorbed is
/// [`SpecError::Visitor`], and only at the call site that invoked the
/// visitor when permissive mode (`-i`) is on.
#[derive(Error, Debug)]
pub enum SpecError {
    /// A `-x` argument that neither the tool nor the standard table knows.
    #[error("Unknown or invalid option \"{arg}\".")]
    UnknownSwitch { arg: String },

    /// The tool claimed the switch but rejected its value.
    #[error("Invalid value for option \"{arg}\".")]
    InvalidSwitch { arg: String },

    /// `-?` was given; callers show their usage text.
    #[error("usage requested")]
    UsageRequested,

    /// Indirect files or subdirectories nested deeper than the fixed limit.
    #[error("Too many levels of subdirectories or indirect files to process \"{arg}\".")]
    TooDeep { arg: String },

    #[error("Cannot open indirect file \"{}\".", path.display())]
    OpenList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading indirect file \"{}\" at line {line}.", path.display())]
    ReadList {
        path: PathBuf,
        line: u64,
        #[source]
        source: io::Error,
    },

    /// The progress hook declined to enter `arg`.
    #[error("Processing of \"{arg}\" was cancelled.")]
    Aborted { arg: String },

    /// The per-entry callback failed for `path`.
    #[error("Cannot process \"{path}\": {source:#}")]
    Visitor {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SpecError {
    /// Whether the legacy tools printed a message for this failure.
    ///
    /// `-?` stops argument processing silently so the caller can print
    /// its own usage text instead.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        !matches!(self, Self::UsageRequested)
    }

    /// The argument text the error refers to, if any.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::UnknownSwitch { arg }
            | Self::InvalidSwitch { arg }
            | Self::TooDeep { arg }
            | Self::Aborted { arg } => Some(arg),
            Self::Visitor { path, .. } => Some(path),
            Self::OpenList { .. } | Self::ReadList { .. } | Self::UsageRequested => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_argument() {
        let err = SpecError::UnknownSwitch {
            arg: String::from("-z"),
        };
        assert_eq!(err.to_string(), "Unknown or invalid option \"-z\".");
        assert_eq!(err.argument(), Some("-z"));

        let err = SpecError::TooDeep {
            arg: String::from("@self.txt"),
        };
        assert!(err.to_string().contains("@self.txt"));
    }

    #[test]
    fn test_usage_request_is_silent() {
        assert!(!SpecError::UsageRequested.is_reported());
        assert!(
            SpecError::Aborted {
                arg: String::from("x")
            }
            .is_reported()
        );
    }
}
