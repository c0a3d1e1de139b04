use super::mem_backend::MemBackend;
use super::snippet_store::SnippetStore;

pub type InMemoryStore = SnippetStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        SnippetStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Snippet;
    use crate::store::DataStore;
    use std::path::{Path, PathBuf};

    pub const FIXTURE_DIR: &str = "/fixtures/snippets";

    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub dir: PathBuf,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            let store = InMemoryStore::new();
            let dir = PathBuf::from(FIXTURE_DIR);
            store.backend().create_dir(&dir);
            Self { store, dir }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        pub fn with_snippet(mut self, snippet: Snippet) -> Self {
            assert!(self.store.save(&snippet, &self.dir));
            self
        }

        /// A snippet with the given id, title, language and tags, dated `date`.
        pub fn with(self, id: &str, title: &str, language: &str, tags: &[&str], date: &str) -> Self {
            let snippet = sample(id, title, language, tags, date);
            self.with_snippet(snippet)
        }

        pub fn with_starred(self, id: &str, title: &str, date: &str) -> Self {
            let mut snippet = sample(id, title, "", &["favorite"], date);
            snippet.starred = true;
            self.with_snippet(snippet)
        }

        pub fn snippets(&self) -> Vec<Snippet> {
            self.store.list(&self.dir)
        }
    }

    /// Builds a snippet without tag normalization, so fixtures can hold empty tag lists.
    pub fn sample(id: &str, title: &str, language: &str, tags: &[&str], date: &str) -> Snippet {
        let mut snippet = Snippet::new(
            id.to_string(),
            title.to_string(),
            format!("// {}", title),
            language.to_string(),
            vec![],
        );
        snippet.tags = tags.iter().map(|t| t.to_string()).collect();
        snippet.date = date.to_string();
        snippet
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;

    #[test]
    fn test_fixtures_coverage() {
        let fixture = StoreFixture::default()
            .with("1", "Alpha", "Rust", &[], "2024-01-01")
            .with("2", "Beta", "Go", &["cli"], "2024-01-02")
            .with_starred("3", "Gamma", "2024-01-03");

        let snippets = fixture.snippets();
        assert_eq!(snippets.len(), 3);

        let alpha = snippets.iter().find(|s| s.title == "Alpha").unwrap();
        assert!(alpha.tags.is_empty());
        assert_eq!(alpha.date, "2024-01-01");

        let gamma = snippets.iter().find(|s| s.title == "Gamma").unwrap();
        assert!(gamma.starred);
    }

    #[test]
    fn empty_fixture_lists_nothing() {
        let fixture = StoreFixture::new();
        assert!(fixture.snippets().is_empty());
    }
}
