// tests/integration_tests/common.rs
use anyhow::Result;
use fspec::DirEntry;
use fspec::core::dirs::LocalDirs;
use fspec::{Enumerator, PassFlags};
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::TempDir;

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// A temporary directory whose own name is not dot-prefixed, so it is not
/// taken for a hidden entry.
pub fn temp_dir() -> Result<TempDir> {
    Ok(tempfile::Builder::new().prefix("fspec").tempdir()?)
}

pub fn setup_test_directory() -> Result<TempDir> {
    let temp_dir = temp_dir()?;

    create_test_file(temp_dir.path(), "report.txt", "quarterly report\n")?;
    create_test_file(temp_dir.path(), "report.bak", "old report\n")?;
    create_test_file(temp_dir.path(), "notes.md", "# Notes\nsome words here\n")?;
    create_test_file(temp_dir.path(), "README", "read me\n")?;
    create_test_file(temp_dir.path(), "src/main.rs", "fn main() {}\n")?;
    create_test_file(temp_dir.path(), "src/lib.txt", "library notes\n")?;
    create_test_file(temp_dir.path(), "src/deep/inner.txt", "inner\n")?;
    create_test_file(temp_dir.path(), "docs/guide.txt", "guide\n")?;

    Ok(temp_dir)
}

/// `dir` as a spec prefix with a trailing separator.
pub fn root(dir: &Path) -> String {
    format!("{}{}", dir.display(), std::path::MAIN_SEPARATOR)
}

pub fn specs(args: &[&str]) -> Vec<String> {
    args.iter().map(|&arg| arg.to_owned()).collect()
}

/// Runs a full command line over the real file system and returns the
/// visited paths relative to `dir`, sorted, with `/` separators.
pub fn visited(dir: &Path, args: &[String]) -> Result<Vec<String>> {
    let prefix = root(dir);
    let mut seen = Vec::new();
    let mut visit = |path: &str, _: &DirEntry| -> Result<usize> {
        let relative = path.strip_prefix(&prefix).unwrap_or(path);
        seen.push(relative.replace('\\', "/"));
        Ok(1)
    };

    let mut enumerator = Enumerator::new(LocalDirs::new());
    enumerator.process_cmdline(args, PassFlags::all(), &mut visit)?;
    seen.sort();
    Ok(seen)
}
