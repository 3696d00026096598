use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// `<path>.old`, the single backup generation kept for a log file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".old");
    PathBuf::from(backup)
}

/// Moves an existing log file at `path` to its backup, replacing any older backup.
///
/// Returns the backup path when a file was moved, `None` when there was nothing to rotate.
/// The rename replaces the destination in one step, but nothing stops another process
/// from writing to `path` at the same moment; callers rotating a shared path must
/// serialize themselves.
///
/// # Errors
/// * If the existing file cannot be renamed
pub fn rotate(path: &Path) -> Result<Option<PathBuf>> {
    let backup = backup_path(path);
    match fs::rename(path, &backup) {
        Ok(()) => Ok(Some(backup)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).wrap_err_with(|| {
            format!(
                "failed to rotate {} to {}",
                path.display(),
                backup.display()
            )
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A fresh path under the temp dir, unique per test and per process.
    pub(crate) fn scratch_path(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snafu-log-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{test}.log"));
        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(backup_path(&path));
        path
    }

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("/var/log/fly.log")),
            PathBuf::from("/var/log/fly.log.old")
        );
    }

    #[test]
    fn test_rotate_missing_file() {
        let path = scratch_path("rotate_missing");
        assert_eq!(rotate(&path).unwrap(), None);
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_rotate_moves_content() {
        let path = scratch_path("rotate_moves");
        fs::write(&path, "X").unwrap();

        let backup = rotate(&path).unwrap().unwrap();

        assert!(!path.exists());
        assert_eq!(fs::read_to_string(backup).unwrap(), "X");
    }

    #[test]
    fn test_rotate_keeps_one_generation() {
        let path = scratch_path("rotate_one_generation");
        fs::write(&path, "first").unwrap();
        rotate(&path).unwrap();
        fs::write(&path, "second").unwrap();
        rotate(&path).unwrap();

        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "second");
    }

    #[test]
    fn test_rotate_missing_directory_is_not_an_error() {
        let path = scratch_path("rotate_missing_dir")
            .with_file_name("no-such-dir")
            .join("app.log");
        assert_eq!(rotate(&path).unwrap(), None);
    }
}
