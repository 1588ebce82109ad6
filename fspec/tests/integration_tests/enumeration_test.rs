// tests/integration_tests/enumeration_test.rs
use crate::common::{create_test_file, root, setup_test_directory, visited};
use anyhow::Result;
use fspec::core::dirs::LocalDirs;
use fspec::{DirEntry, Enumerator, PassFlags};

#[test]
fn test_extension_wildcard() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[format!("{base}*.txt")])?;
    assert_eq!(seen, ["report.txt"]);

    let seen = visited(temp_dir.path(), &[format!("{base}*.TXT")])?;
    assert_eq!(seen, ["report.txt"], "names match without regard to case");
    Ok(())
}

#[test]
fn test_star_dot_star_takes_names_without_extension() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[format!("{base}*.*")])?;
    assert_eq!(seen, ["README", "notes.md", "report.bak", "report.txt"]);
    Ok(())
}

#[test]
fn test_bare_name_takes_any_extension() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[format!("{base}report")])?;
    assert_eq!(seen, ["report.bak", "report.txt"]);
    Ok(())
}

#[test]
fn test_subdirectory_recursion() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[String::from("-s"), format!("{base}*.txt")])?;
    assert_eq!(
        seen,
        ["docs/guide.txt", "report.txt", "src/deep/inner.txt", "src/lib.txt"]
    );
    Ok(())
}

#[test]
fn test_wildcard_directory() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[format!("{base}*/*.txt")])?;
    assert_eq!(seen, ["docs/guide.txt", "src/lib.txt"]);

    let seen = visited(temp_dir.path(), &[format!("{base}s?c/*/inner.*")])?;
    assert_eq!(seen, ["src/deep/inner.txt"]);
    Ok(())
}

#[test]
fn test_directory_argument_and_dirs_switch() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[format!("{base}src")])?;
    assert_eq!(seen, ["src/lib.txt", "src/main.rs"]);

    let seen = visited(temp_dir.path(), &[String::from("-d"), format!("{base}src")])?;
    assert_eq!(seen, ["src/deep", "src/lib.txt", "src/main.rs"]);
    Ok(())
}

#[test]
fn test_default_path_switch() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let src = temp_dir.path().join("src");

    let args = [format!("-e{}", src.display()), String::from("main.rs")];
    let seen = visited(temp_dir.path(), &args)?;
    assert_eq!(seen, ["src/main.rs"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_dot_files_need_hidden_switch() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), ".secret.txt", "shh\n")?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[format!("{base}*.txt")])?;
    assert_eq!(seen, ["report.txt"]);

    let seen = visited(temp_dir.path(), &[String::from("-h"), format!("{base}*.txt")])?;
    assert_eq!(seen, [".secret.txt", "report.txt"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_dot_name_matches_only_itself() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), ".env", "KEY=1\n")?;
    create_test_file(temp_dir.path(), "prod.env", "KEY=2\n")?;
    let base = root(temp_dir.path());

    let seen = visited(temp_dir.path(), &[String::from("-h"), format!("{base}.env")])?;
    assert_eq!(seen, [".env"], "a literal dot name is not a wildcard");

    let seen = visited(temp_dir.path(), &[format!("{base}.env")])?;
    assert!(seen.is_empty(), "hidden without -h, and prod.env is not .env");

    let seen = visited(temp_dir.path(), &[String::from("-h"), format!("{base}*.env")])?;
    assert_eq!(seen, [".env", "prod.env"]);
    Ok(())
}

#[test]
fn test_missing_file_is_a_warning() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let mut visit = |_: &str, _: &DirEntry| -> Result<usize> { Ok(1) };
    let mut enumerator = Enumerator::new(LocalDirs::new());
    let count = enumerator.process_cmdline(
        &[format!("{base}ghost.txt"), format!("{base}notes.md")],
        PassFlags::all(),
        &mut visit,
    )?;

    assert_eq!(count, 1, "later specs still run");
    assert_eq!(enumerator.warnings(), 1);
    Ok(())
}
