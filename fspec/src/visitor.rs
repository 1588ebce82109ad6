// src/visitor.rs
use crate::models::{DirEntry, PassFlags, Progress};
use std::ops::ControlFlow;

/// What a tool made of a switch offered to [`Visitor::on_option`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOutcome {
    /// Not a tool switch; fall back to the standard table.
    NotHandled,
    /// Consumed by the tool.
    Handled,
    /// The tool owns this switch but the value is bad.
    Invalid,
}

/// The callbacks a tool supplies to the [`Enumerator`](crate::Enumerator).
///
/// Only `on_entry` is required. The defaults let every subtree proceed and
/// leave all switches to the standard table.
pub trait Visitor {
    /// Acts on one resolved entry. `path` is the full path as built from
    /// the spec; `entry.name` is the bare name.
    ///
    /// # Returns
    ///
    /// * `Ok(n)` - the number of entries to count as processed, usually 1
    ///
    /// # Errors
    ///
    /// Any error is reported as a visit failure. It stops the current
    /// branch unless permissive mode is on.
    fn on_entry(&mut self, path: &str, entry: &DirEntry) -> anyhow::Result<usize>;

    /// Called at subtree boundaries; returning `Break` declines the subtree.
    #[inline]
    fn on_progress(&mut self, _event: Progress<'_>, _level: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Offered every switch before the standard table sees it. `switch` is
    /// the text after the leading `-` or `/`.
    #[inline]
    fn on_option(&mut self, _switch: &str, _pass: PassFlags) -> OptionOutcome {
        OptionOutcome::NotHandled
    }
}

impl<F> Visitor for F
where
    F: FnMut(&str, &DirEntry) -> anyhow::Result<usize>,
{
    #[inline]
    fn on_entry(&mut self, path: &str, entry: &DirEntry) -> anyhow::Result<usize> {
        self(path, entry)
    }
}
