// tests/integration_tests/indirect_test.rs
use crate::common::{create_test_file, root, setup_test_directory, visited};
use anyhow::Result;
use fspec::core::dirs::LocalDirs;
use fspec::{DirEntry, EnumerationOptions, Enumerator, PassFlags, SpecError};

#[test]
fn test_list_file_with_quotes_and_default_path() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), "with space.txt", "spaced\n")?;
    let base = root(temp_dir.path());
    let src = temp_dir.path().join("src");

    let list = format!(
        "\"{base}with space.txt\"\n-e{} main.rs lib.txt\n",
        src.display()
    );
    create_test_file(temp_dir.path(), "files.lst", &list)?;

    let args = [format!("@{base}files.lst"), format!("{base}notes.md")];
    let seen = visited(temp_dir.path(), &args)?;
    assert_eq!(seen, ["notes.md", "src/lib.txt", "src/main.rs", "with space.txt"]);
    Ok(())
}

#[test]
fn test_nested_lists() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    create_test_file(temp_dir.path(), "inner.lst", &format!("{base}README\n"))?;
    create_test_file(
        temp_dir.path(),
        "outer.lst",
        &format!("{base}notes.md\n@{base}inner.lst\n"),
    )?;

    let seen = visited(temp_dir.path(), &[format!("@{base}outer.lst")])?;
    assert_eq!(seen, ["README", "notes.md"]);
    Ok(())
}

#[test]
fn test_self_reference_stops_at_depth_limit() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());
    create_test_file(temp_dir.path(), "loop.lst", &format!("@{base}loop.lst\n"))?;

    let result = visited(temp_dir.path(), &[format!("@{base}loop.lst")]);
    let too_deep = result
        .err()
        .is_some_and(|err| matches!(err.downcast_ref::<SpecError>(), Some(SpecError::TooDeep { .. })));
    assert!(too_deep, "self-referencing list should hit the nesting limit");
    Ok(())
}

#[test]
fn test_missing_list_is_an_error() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let base = root(temp_dir.path());

    let result = visited(temp_dir.path(), &[format!("@{base}absent.lst")]);
    let message = result.err().map(|err| err.to_string()).unwrap_or_default();
    assert!(message.starts_with("Cannot open indirect file"), "got {message:?}");
    Ok(())
}

#[test]
fn test_directory_listing_mode() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let src = temp_dir.path().join("src");
    create_test_file(
        temp_dir.path(),
        "dir.lst",
        " Volume in drive C has no label\n\nmain     rs          13 01-02-94  10:15a\n 2 file(s)\n",
    )?;

    let options = EnumerationOptions {
        dir_listing: true,
        default_path: Some(src.display().to_string()),
        ..EnumerationOptions::default()
    };
    let mut seen = Vec::new();
    let mut visit = |_: &str, entry: &DirEntry| -> Result<usize> {
        seen.push(entry.name.clone());
        Ok(1)
    };
    let mut enumerator = Enumerator::new(LocalDirs::new()).with_options(options);
    let list = temp_dir.path().join("dir.lst");
    enumerator.process_cmdline(&[format!("@{}", list.display())], PassFlags::all(), &mut visit)?;

    assert_eq!(seen, ["main.rs"]);
    Ok(())
}
