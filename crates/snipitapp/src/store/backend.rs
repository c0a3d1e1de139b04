use crate::error::Result;
use std::path::{Path, PathBuf};

/// Abstract interface for raw record I/O inside a collection directory.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while SnippetStore handles the "what" (record format, failure policy).
pub trait RecordBackend {
    /// File names (not paths) of every regular file in `dir`, sorted.
    /// Returns Err when the directory cannot be read.
    fn list_names(&self, dir: &Path) -> Result<Vec<String>>;

    /// Read a file. Returns Ok(None) if it does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, dir: &Path, name: &str) -> Result<Option<String>>;

    /// Write (create or replace) a file. The directory must already exist.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, dir: &Path, name: &str, content: &str) -> Result<()>;

    /// Remove a file. Returns Ok(false) if it was already absent.
    fn remove(&self, dir: &Path, name: &str) -> Result<bool>;

    /// Whether a file exists.
    fn exists(&self, dir: &Path, name: &str) -> bool;

    /// The "file path" of a record. For FsBackend this is the real path.
    fn path_of(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(name)
    }
}
