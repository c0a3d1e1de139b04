use crate::error::{Result, SnipitError};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Raw access to the single settings document.
///
/// Implementations deal only with bytes on some medium. Defaults, merging and
/// failure policy live in [`super::SettingsStore`].
pub trait DocumentBackend {
    /// Read the document text. Returns Ok(None) when it does not exist yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the document text.
    fn write(&self, content: &str) -> Result<()>;
}

/// Settings document stored as a JSON file on disk.
pub struct FsDocument {
    path: PathBuf,
}

impl FsDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentBackend for FsDocument {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnipitError::Io(e)),
        }
    }

    fn write(&self, content: &str) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(SnipitError::Io)?;
        }

        // Atomic write
        let tmp = dir.join(format!(".settings-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(SnipitError::Io)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(SnipitError::Io(e));
        }
        Ok(())
    }
}

/// In-memory settings document for tests.
#[derive(Default)]
pub struct MemDocument {
    content: RefCell<Option<String>>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl MemDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing document text (which need not be valid JSON).
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            ..Self::default()
        }
    }

    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl DocumentBackend for MemDocument {
    fn read(&self) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(SnipitError::Store("Simulated read error".to_string()));
        }
        Ok(self.content.borrow().clone())
    }

    fn write(&self, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SnipitError::Store("Simulated write error".to_string()));
        }
        *self.content.borrow_mut() = Some(content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fs_document_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let doc = FsDocument::new(dir.path().join("settings.json"));
        assert_eq!(doc.read().unwrap(), None);
    }

    #[test]
    fn fs_document_creates_parent_dirs_and_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let doc = FsDocument::new(&path);

        doc.write("{\"theme\":\"dark\"}").unwrap();
        assert_eq!(doc.read().unwrap().as_deref(), Some("{\"theme\":\"dark\"}"));

        for entry in fs::read_dir(path.parent().unwrap()).unwrap() {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn mem_document_simulated_errors() {
        let doc = MemDocument::with_content("{}");
        doc.set_simulate_read_error(true);
        assert!(doc.read().is_err());
        doc.set_simulate_read_error(false);

        doc.set_simulate_write_error(true);
        assert!(doc.write("x").is_err());
        assert_eq!(doc.content().as_deref(), Some("{}"));
    }
}
