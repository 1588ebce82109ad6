// tests/integration_tests/delete_test.rs
use crate::common::{root, setup_test_directory, specs};
use anyhow::Result;
use fspec::core::dirs::LocalDirs;
use fspec::tools::{DeleteTool, run_tool};
use fspec::{Enumerator, Tool};
use std::io::Cursor;

fn delete(args: &[String], answers: &str) -> (Result<usize>, String) {
    let mut enumerator = Enumerator::new(LocalDirs::new()).with_options(Tool::Delete.default_options());
    let mut tool = DeleteTool::new(Vec::new(), Cursor::new(answers.as_bytes().to_vec()));
    let result = run_tool(&mut enumerator, &mut tool, args);
    let output = String::from_utf8_lossy(&tool.into_inner()).into_owned();
    (result, output)
}

#[test]
fn test_delete_without_prompt() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let (result, output) = delete(&[String::from("-p"), format!("{base}*.bak")], "");
    assert_eq!(result?, 1);
    assert!(!temp_dir.path().join("report.bak").exists());
    assert!(temp_dir.path().join("report.txt").exists());
    assert_eq!(output, format!("{base}report.bak deleted.\n1 file deleted.\n"));
    Ok(())
}

#[test]
fn test_declined_prompt_keeps_files() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let (result, output) = delete(&[format!("{base}*.txt")], "n\n");
    assert_eq!(result?, 0);
    assert!(temp_dir.path().join("report.txt").exists());
    assert_eq!(
        output,
        format!("OK to delete \"{base}*.txt\"?No\nNO files processed!\n")
    );
    Ok(())
}

#[test]
fn test_confirmed_prompt_deletes() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let (result, _) = delete(&[String::from("-q"), format!("{base}report.*")], "y\n");
    assert_eq!(result?, 2);
    assert!(!temp_dir.path().join("report.txt").exists());
    assert!(!temp_dir.path().join("report.bak").exists());
    Ok(())
}

#[test]
fn test_remove_directories_deepest_first() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let mut args = specs(&["-p", "-r", "-s"]);
    args.push(format!("{base}src"));
    let (result, output) = delete(&args, "");
    result?;
    assert!(temp_dir.path().join("src").exists(), "the named directory itself stays");
    assert!(!temp_dir.path().join("src/deep").exists());
    assert!(output.ends_with("3 files deleted.\n1 directory removed.\n"), "got {output:?}");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_read_only_files_need_switch() -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt as _;

    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());
    let locked = temp_dir.path().join("notes.md");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o444))?;

    let (result, output) = delete(&[String::from("-p"), format!("{base}notes.md")], "");
    assert!(result.is_err(), "read-only file stops the run");
    assert!(locked.exists());
    assert!(output.contains("is READ-ONLY."));

    let (result, output) = delete(&[String::from("-a"), format!("{base}notes.md")], "");
    assert_eq!(result?, 1);
    assert!(!locked.exists());
    assert!(output.contains("was READ-ONLY but now deleted."));
    Ok(())
}
