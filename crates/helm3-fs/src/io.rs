//! File writes that never leave a half-written file behind

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Replace `path` with `content` in one step.
///
/// The bytes go to a locked sibling temp file that is synced and then
/// renamed over the target. Parent directories are created as needed. On
/// failure the temp file is removed and the target is left untouched.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let staging = staging_path(&target);
    let written = write_locked(&staging, &target, content)
        .and_then(|()| fs::rename(&staging, &target).map_err(|e| Error::io(&target, e)));

    if written.is_err() {
        // Best effort; the original error is what the caller needs
        let _ = fs::remove_file(&staging);
    }
    written?;

    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Read a whole file as UTF-8.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(&native, e))
}

/// [`write_atomic`] for text.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// `.<name>.<pid>.tmp` next to `target`, so the rename stays on one filesystem.
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

fn write_locked(staging: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(staging).map_err(|e| Error::io(staging, e))?;
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };

    file.lock_exclusive().map_err(|_| lock_failed())?;
    file.write_all(content).map_err(|e| Error::io(staging, e))?;
    file.sync_all().map_err(|e| Error::io(staging, e))?;
    FileExt::unlock(&file).map_err(|_| lock_failed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn staging_file_is_a_hidden_sibling() {
        let staging = staging_path(Path::new("/porter/mixins/helm3/config.yaml"));
        assert_eq!(staging.parent(), Some(Path::new("/porter/mixins/helm3")));
        let name = staging.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".config.yaml."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn write_replaces_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("out.txt"));

        write_text(&path, "first").unwrap();
        write_text(&path, "second").unwrap();

        assert_eq!(read_text(&path).unwrap(), "second");
    }

    #[test]
    fn failed_rename_leaves_no_staging_file() {
        let temp = TempDir::new().unwrap();
        // A directory at the target path makes the rename fail
        let target = temp.path().join("taken");
        fs::create_dir_all(target.join("child")).unwrap();

        let result = write_text(&NormalizedPath::new(&target), "value");

        assert!(result.is_err());
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
