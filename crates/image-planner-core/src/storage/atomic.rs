use crate::error::Result;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Write through `write` into a sibling temporary file, then rename it over `path`.
///
/// On any failure the temporary file is removed and `path` is left as it was.
pub fn write_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let tmp_path = temporary_path(path);
    let result = write_and_rename(path, &tmp_path, write);
    if result.is_err() && tmp_path.exists() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            warn!("Could not remove {}: {}", tmp_path.display(), e);
        }
    }
    result
}

fn write_and_rename<T, F>(path: &Path, tmp_path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let mut writer = BufWriter::new(File::create(tmp_path)?);
    let value = write(&mut writer)?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    fs::rename(tmp_path, path)?;
    Ok(value)
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_temporary_path_is_sibling() {
        let tmp = temporary_path(Path::new("/data/plan.csv"));
        assert_eq!(tmp, PathBuf::from("/data/plan.csv.tmp"));
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.html");
        fs::write(&path, "old").unwrap();

        let written = write_atomically(&path, |w| {
            w.write_all(b"new")?;
            Ok(3)
        })
        .unwrap();

        assert_eq!(written, 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!temporary_path(&path).exists());
    }

    #[test]
    fn test_failed_write_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.html");
        fs::write(&path, "old report").unwrap();

        let result: Result<()> = write_atomically(&path, |w| {
            w.write_all(b"<html>half")?;
            w.flush()?;
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "No space left on device",
            )))
        });

        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old report");
        assert!(!temporary_path(&path).exists());
    }

    #[test]
    fn test_failed_rename_removes_temporary_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file
        let path = dir.path().join("plan.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "").unwrap();

        let result = write_atomically(&path, |w| {
            w.write_all(b"rows")?;
            Ok(())
        });

        assert!(result.is_err());
        assert!(path.join("keep").exists());
        assert!(!temporary_path(&path).exists());
    }
}
