//! I/O utility functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling of `path` that output is staged in before being renamed into place.
///
/// `img/Four distributions.svg` stages as `img/.Four distributions.partial.svg`,
/// keeping the extension so backends that infer the encoding from it still work.
pub fn staging_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!(".{stem}.partial.{}", ext.to_string_lossy()),
        None => format!(".{stem}.partial"),
    };
    path.with_file_name(name)
}

/// Rename a fully written staging file onto its destination.
pub fn promote_staged(staged: &Path, path: &Path) -> io::Result<()> {
    fs::rename(staged, path)
}

/// Remove a staging file left behind by a failed write.
pub fn discard_staged(staged: &Path) {
    match fs::remove_file(staged) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            tracing::warn!(path = %staged.display(), "failed to remove staging file: {err}");
        }
    }
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("img/summary.json"), &json)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let staged = staging_path(path);
    if let Err(err) = fs::write(&staged, content) {
        discard_staged(&staged);
        return Err(err);
    }
    promote_staged(&staged, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_staging_path_keeps_extension() {
        let staged = staging_path(Path::new("img/Four distributions.svg"));
        assert_eq!(staged, Path::new("img/.Four distributions.partial.svg"));

        let staged = staging_path(Path::new("out/summary"));
        assert_eq!(staged, Path::new("out/.summary.partial"));
    }

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");

        atomic_write(&path, "{}\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_atomic_write_into_missing_dir_leaves_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.json");

        assert!(atomic_write(&path, "x").is_err());
        assert!(!path.exists());
    }
}
