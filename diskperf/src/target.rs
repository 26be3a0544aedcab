use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

// Target is the file that receives the written bytes.
// temporary target is removed when it is closed or dropped, named target is left in place.
#[derive(Debug)]
pub(crate) enum Target {
    Temporary(NamedTempFile),
    Named { path: PathBuf, file: File },
}

impl Target {
    pub(crate) fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            None => {
                let file = NamedTempFile::new().context("creating temporary file")?;
                debug!("created temporary file {}", file.path().display());
                Ok(Target::Temporary(file))
            }
            Some(path) => {
                let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
                debug!("created {}", path.display());
                Ok(Target::Named {
                    path: path.to_path_buf(),
                    file,
                })
            }
        }
    }

    pub(crate) fn path(&self) -> &Path {
        match self {
            Target::Temporary(file) => file.path(),
            Target::Named { path, .. } => path,
        }
    }

    pub(crate) fn file_mut(&mut self) -> &mut File {
        match self {
            Target::Temporary(file) => file.as_file_mut(),
            Target::Named { file, .. } => file,
        }
    }

    // close releases the handle and removes temporary file.
    // failure to remove is logged, the measurement is already complete at this point.
    pub(crate) fn close(self) {
        match self {
            Target::Temporary(file) => {
                let path = file.path().to_path_buf();
                if let Err(err) = file.close() {
                    warn!("failed to remove temporary file {}: {}", path.display(), err);
                }
            }
            Target::Named { file, .. } => drop(file),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_temporary_is_removed_on_close() {
        let mut target = Target::open(None).unwrap();
        let path = target.path().to_path_buf();
        assert!(path.exists());
        target.file_mut().write_all(b"data").unwrap();
        target.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_temporary_is_removed_on_drop() {
        let target = Target::open(None).unwrap();
        let path = target.path().to_path_buf();
        assert!(path.exists());
        drop(target);
        assert!(!path.exists());
    }

    #[test]
    fn test_named_is_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out");
        let mut target = Target::open(Some(&path)).unwrap();
        assert_eq!(target.path(), path);
        target.file_mut().write_all(b"data").unwrap();
        target.close();
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn test_named_is_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out");
        std::fs::write(&path, vec![1u8; 8192]).unwrap();
        let target = Target::open(Some(&path)).unwrap();
        target.close();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out");
        let err = Target::open(Some(&path)).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains(&path.display().to_string()), "{}", msg);
        assert!(!path.exists());
    }
}
