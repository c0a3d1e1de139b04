use super::backend::RecordBackend;
use crate::error::{Result, SnipitError};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since snipit is single-threaded.
/// Directories spring into existence on first write, or explicitly via
/// [`MemBackend::create_dir`].
#[derive(Default)]
pub struct MemBackend {
    dirs: RefCell<HashMap<PathBuf, BTreeMap<String, String>>>,
    simulate_write_error: RefCell<bool>,
    simulate_remove_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_dir(&self, dir: &Path) {
        self.dirs.borrow_mut().entry(dir.to_path_buf()).or_default();
    }

    /// Place raw file content, bypassing any record format (e.g. corrupt files).
    pub fn insert_raw(&self, dir: &Path, name: &str, content: &str) {
        self.dirs
            .borrow_mut()
            .entry(dir.to_path_buf())
            .or_default()
            .insert(name.to_string(), content.to_string());
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn set_simulate_remove_error(&self, simulate: bool) {
        *self.simulate_remove_error.borrow_mut() = simulate;
    }
}

impl RecordBackend for MemBackend {
    fn list_names(&self, dir: &Path) -> Result<Vec<String>> {
        let dirs = self.dirs.borrow();
        let files = dirs.get(dir).ok_or_else(|| {
            SnipitError::Store(format!("No such directory: {}", dir.display()))
        })?;
        Ok(files.keys().cloned().collect())
    }

    fn read(&self, dir: &Path, name: &str) -> Result<Option<String>> {
        let dirs = self.dirs.borrow();
        Ok(dirs.get(dir).and_then(|files| files.get(name)).cloned())
    }

    fn write(&self, dir: &Path, name: &str, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SnipitError::Store("Simulated write error".to_string()));
        }
        self.insert_raw(dir, name, content);
        Ok(())
    }

    fn remove(&self, dir: &Path, name: &str) -> Result<bool> {
        if *self.simulate_remove_error.borrow() {
            return Err(SnipitError::Store("Simulated remove error".to_string()));
        }
        let mut dirs = self.dirs.borrow_mut();
        Ok(dirs
            .get_mut(dir)
            .map(|files| files.remove(name).is_some())
            .unwrap_or(false))
    }

    fn exists(&self, dir: &Path, name: &str) -> bool {
        self.dirs
            .borrow()
            .get(dir)
            .is_some_and(|files| files.contains_key(name))
    }
}
