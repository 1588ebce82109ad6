// src/models/progress.rs

/// Subtree boundaries reported to [`Visitor::on_progress`](crate::Visitor::on_progress).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// About to resolve a path argument; declining aborts it with an error.
    RecurseInto(&'a str),
    /// Finished the argument announced by the matching `RecurseInto`.
    RecurseOut,
    /// About to visit the matches of a wildcard spec; declining skips them.
    WildStart(&'a str),
    /// Finished a wildcard batch.
    WildFinish,
}

impl Progress<'_> {
    /// The argument text carried by the event.
    #[must_use]
    pub const fn argument(&self) -> Option<&str> {
        match *self {
            Self::RecurseInto(arg) | Self::WildStart(arg) => Some(arg),
            Self::RecurseOut | Self::WildFinish => None,
        }
    }
}
