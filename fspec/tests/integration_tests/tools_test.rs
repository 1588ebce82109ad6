// tests/integration_tests/tools_test.rs
use crate::common::{root, setup_test_directory};
use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use fspec::core::dirs::LocalDirs;
use fspec::tools::{CountTool, ListTool, TouchTool, run_tool};
use fspec::{Enumerator, Tool};
use std::fs;
use std::io;
use std::time::SystemTime;

fn enumerator(tool: Tool) -> Enumerator<LocalDirs> {
    Enumerator::new(LocalDirs::new()).with_options(tool.default_options())
}

#[test]
fn test_touch_sets_requested_time() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let args = [
        String::from("-d01/02/2020"),
        String::from("-t03:04:05"),
        format!("{base}*.txt"),
    ];
    let mut tool = TouchTool::new(Vec::new());
    let touched = run_tool(&mut enumerator(Tool::Touch), &mut tool, &args)?;
    assert_eq!(touched, 1);

    let expected: SystemTime = NaiveDate::from_ymd_opt(2020, 1, 2)
        .and_then(|date| date.and_hms_opt(3, 4, 5))
        .and_then(|stamp| stamp.and_local_timezone(Local).earliest())
        .context("valid local time")?
        .into();
    let modified = fs::metadata(temp_dir.path().join("report.txt"))?.modified()?;
    assert_eq!(modified, expected);

    let output = String::from_utf8(tool.into_inner())?;
    assert!(output.starts_with("Setting date and time of "));
    assert!(output.ends_with(&format!("\t{base}report.txt\n")));
    Ok(())
}

#[test]
fn test_touch_quiet_prints_nothing() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let args = [String::from("-q"), format!("{base}notes.md")];
    let mut tool = TouchTool::new(Vec::new());
    run_tool(&mut enumerator(Tool::Touch), &mut tool, &args)?;
    assert!(tool.into_inner().is_empty());
    Ok(())
}

#[test]
fn test_count_totals_over_files() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let args = [format!("{base}*.txt"), format!("{base}notes.md")];
    let mut tool = CountTool::new(Vec::new(), io::empty());
    let counted = run_tool(&mut enumerator(Tool::Count), &mut tool, &args)?;
    assert_eq!(counted, 2);
    assert_eq!(String::from_utf8(tool.into_inner())?, "3\t7\t41\n");
    Ok(())
}

#[test]
fn test_list_bare_recursive() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let args = [String::from("-b"), String::from("-s"), format!("{base}*.rs")];
    let mut tool = ListTool::new(Vec::new());
    run_tool(&mut enumerator(Tool::List), &mut tool, &args)?;

    let output = String::from_utf8(tool.into_inner())?;
    let expected = temp_dir.path().join("src").join("main.rs");
    assert_eq!(output, format!("{}\n", expected.display()));
    Ok(())
}
