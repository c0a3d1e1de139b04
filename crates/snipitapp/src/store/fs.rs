use super::fs_backend::FsBackend;
use super::snippet_store::SnippetStore;

pub type FileStore = SnippetStore<FsBackend>;

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore {
    pub fn new() -> Self {
        SnippetStore::with_backend(FsBackend::new())
    }
}
