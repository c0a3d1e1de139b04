use super::backend::RecordBackend;
use super::DataStore;
use crate::error::{Result, SnipitError};
use crate::model::{record_file_name, Snippet, RECORD_EXT};
use std::path::{Path, PathBuf};

pub struct SnippetStore<B: RecordBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: RecordBackend> SnippetStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads every record in `dir`, skipping (and logging) the ones that fail.
    pub fn try_list(&self, dir: &Path) -> Result<Vec<Snippet>> {
        let mut snippets = Vec::new();
        for name in self.backend.list_names(dir)? {
            if !name.ends_with(RECORD_EXT) {
                continue;
            }
            match self.read_record(dir, &name) {
                Ok(Some(snippet)) => snippets.push(snippet),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping unreadable snippet file {}: {}", name, e),
            }
        }
        Ok(snippets)
    }

    pub fn try_get(&self, id: &str, dir: &Path) -> Result<Option<Snippet>> {
        check_id(id)?;
        self.read_record(dir, &record_file_name(id))
    }

    pub fn try_save(&self, snippet: &Snippet, dir: &Path) -> Result<()> {
        check_id(&snippet.id)?;
        check_dir(dir)?;
        let content = serde_json::to_string_pretty(snippet)?;
        self.backend.write(dir, &snippet.file_name(), &content)
    }

    pub fn try_delete(&self, id: &str, dir: &Path) -> Result<bool> {
        check_id(id)?;
        check_dir(dir)?;
        self.backend.remove(dir, &record_file_name(id))
    }

    /// Flips `starred` and returns the new value.
    pub fn try_toggle_star(&self, id: &str, dir: &Path) -> Result<bool> {
        let mut snippet = self
            .try_get(id, dir)?
            .ok_or_else(|| SnipitError::SnippetNotFound(id.to_string()))?;
        snippet.starred = !snippet.starred;
        self.try_save(&snippet, dir)?;
        Ok(snippet.starred)
    }

    fn read_record(&self, dir: &Path, name: &str) -> Result<Option<Snippet>> {
        match self.backend.read(dir, name)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }
}

impl<B: RecordBackend> DataStore for SnippetStore<B> {
    fn list(&self, dir: &Path) -> Vec<Snippet> {
        match self.try_list(dir) {
            Ok(snippets) => {
                tracing::debug!("Loaded {} snippets from {}", snippets.len(), dir.display());
                snippets
            }
            Err(e) => {
                tracing::error!("Error loading snippets from {}: {}", dir.display(), e);
                Vec::new()
            }
        }
    }

    fn get(&self, id: &str, dir: &Path) -> Option<Snippet> {
        match self.try_get(id, dir) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("Error loading snippet {}: {}", id, e);
                None
            }
        }
    }

    fn save(&mut self, snippet: &Snippet, dir: &Path) -> bool {
        match self.try_save(snippet, dir) {
            Ok(()) => {
                tracing::debug!("Saved snippet {} to {}", snippet.id, dir.display());
                true
            }
            Err(e) => {
                tracing::error!("Error saving snippet {}: {}", snippet.id, e);
                false
            }
        }
    }

    fn delete(&mut self, id: &str, dir: &Path) -> bool {
        match self.try_delete(id, dir) {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!("Snippet {} already absent from {}", id, dir.display());
                true
            }
            Err(e) => {
                tracing::error!("Error deleting snippet {}: {}", id, e);
                false
            }
        }
    }

    fn toggle_star(&mut self, id: &str, dir: &Path) -> bool {
        match self.try_toggle_star(id, dir) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Error toggling star for snippet {}: {}", id, e);
                false
            }
        }
    }

    fn contains(&self, id: &str, dir: &Path) -> bool {
        check_id(id).is_ok() && self.backend.exists(dir, &record_file_name(id))
    }

    fn snippet_path(&self, id: &str, dir: &Path) -> PathBuf {
        self.backend.path_of(dir, &record_file_name(id))
    }
}

/// Ids become file names, so they must be non-empty and stay inside the directory.
fn check_id(id: &str) -> Result<()> {
    let bad = id.trim().is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\']);
    if bad {
        return Err(SnipitError::Store(format!("Invalid snippet id: {:?}", id)));
    }
    Ok(())
}

fn check_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Err(SnipitError::NoCollection);
    }
    Ok(())
}
