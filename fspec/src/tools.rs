// src/tools.rs
//! The file tools built on the enumerator.
//!
//! Each tool is a [`Visitor`] plus the few hooks [`run_tool`] needs to
//! drive the usual two passes: switches first, then file specs.

pub mod count;
pub mod delete;
pub mod list;
pub mod touch;

pub use count::CountTool;
pub use delete::DeleteTool;
pub use list::ListTool;
pub use touch::TouchTool;

use crate::cli::Tool;
use crate::core::dirs::DirSource;
use crate::core::enumerator::Enumerator;
use crate::error::SpecError;
use crate::models::{EnumerationOptions, PassFlags};
use crate::visitor::Visitor;
use anyhow::Result;
use std::io;
use tracing::debug;

/// A [`Visitor`] that can be run from the command line.
pub trait FileTool: Visitor {
    /// Writes the tool's usage text.
    ///
    /// # Errors
    ///
    /// Fails when the output cannot be written.
    fn write_usage(&mut self, program: &str) -> io::Result<()>;

    /// Pass flags for the file pass. Tools whose switches act only on the
    /// specs after them include [`PassFlags::OPTIONS`].
    #[inline]
    fn files_pass(&self) -> PassFlags {
        PassFlags::FILES
    }

    /// Called after the switch pass, before any file is visited.
    ///
    /// # Errors
    ///
    /// A failure here stops the run before the file pass.
    #[inline]
    fn prepare(&mut self, _options: &mut EnumerationOptions) -> Result<()> {
        Ok(())
    }

    /// Runs the tool when the command line holds nothing but switches.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - the tool did its work without file specs
    /// * `Ok(false)` - usage should be shown instead
    ///
    /// # Errors
    ///
    /// Any failure of the work itself.
    #[inline]
    fn without_specs(&mut self) -> Result<bool> {
        Ok(false)
    }

    /// Called once after the file pass, whether or not it succeeded.
    ///
    /// # Errors
    ///
    /// Any failure writing totals or completing deferred work.
    #[inline]
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Tool {
    /// Enumeration options a tool starts from, before configuration and
    /// switches are applied.
    #[must_use]
    pub fn default_options(self) -> EnumerationOptions {
        EnumerationOptions {
            quiet: matches!(self, Self::Delete | Self::Count),
            ..EnumerationOptions::default()
        }
    }
}

/// Runs `tool` over `specs`.
///
/// Switches are applied first across the whole command line. Usage is
/// shown for `-?`, for a bad switch, and when there is nothing to work on.
/// Otherwise every spec is expanded and the tool gets its
/// [`finish`](FileTool::finish) call even if the pass failed.
///
/// # Returns
///
/// * `Ok(n)` - the number of entries the tool processed
///
/// # Errors
///
/// Returns the first hard enumeration error, or a tool failure.
pub fn run_tool<D, T>(enumerator: &mut Enumerator<D>, tool: &mut T, specs: &[String]) -> Result<usize>
where
    D: DirSource,
    T: FileTool + ?Sized,
{
    let program = enumerator.program().to_owned();
    match enumerator.process_cmdline(specs, PassFlags::OPTIONS, tool) {
        Ok(switches) => debug!(switches, "switch pass done"),
        Err(SpecError::UsageRequested) => {
            tool.write_usage(&program)?;
            return Ok(0);
        }
        Err(err) => {
            tool.write_usage(&program)?;
            return Err(err.into());
        }
    }

    let has_specs = specs.iter().any(|spec| !enumerator.options().is_switch(spec));
    if !has_specs {
        if tool.without_specs()? {
            tool.finish()?;
        } else {
            tool.write_usage(&program)?;
        }
        return Ok(0);
    }

    tool.prepare(enumerator.options_mut())?;
    let pass = tool.files_pass();
    let result = enumerator.process_cmdline(specs, pass, tool);
    tool.finish()?;
    Ok(result?)
}
