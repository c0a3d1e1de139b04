use super::backend::RecordBackend;
use crate::error::{Result, SnipitError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use uuid::Uuid;

/// Collection directories on the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RecordBackend for FsBackend {
    fn list_names(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let entries = fs::read_dir(dir).map_err(SnipitError::Io)?;

        for entry in entries {
            let entry = entry.map_err(SnipitError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, dir: &Path, name: &str) -> Result<Option<String>> {
        match fs::read_to_string(dir.join(name)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnipitError::Io(e)),
        }
    }

    fn write(&self, dir: &Path, name: &str, content: &str) -> Result<()> {
        if !dir.is_dir() {
            return Err(SnipitError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("collection directory {} does not exist", dir.display()),
            )));
        }

        // Atomic Write
        let tmp_path = dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(SnipitError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, dir.join(name)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SnipitError::Io(e));
        }
        Ok(())
    }

    fn remove(&self, dir: &Path, name: &str) -> Result<bool> {
        match fs::remove_file(dir.join(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SnipitError::Io(e)),
        }
    }

    fn exists(&self, dir: &Path, name: &str) -> bool {
        dir.join(name).is_file()
    }
}
