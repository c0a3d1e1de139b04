//! # API Facade
//!
//! [`SnipitApi`] is the single entry point for clients. It owns the settings
//! capability and the snippet store and dispatches to the command, query and
//! pipeline modules.
//!
//! ## Collection Resolution
//!
//! Snippet operations take an optional directory. When it is `None` the directory
//! is resolved in this order:
//!
//! 1. the selected collection (falling back to the first registered one),
//! 2. the legacy `collectionPath` setting.
//!
//! With nothing to resolve, listing returns `[]`, lookups return `None` and the
//! boolean operations return `false`. The validating operations
//! (`create_snippet`, `update_snippet`) report [`SnipitError::NoCollection`].
//!
//! ## Generic Over Its Ports
//!
//! `SnipitApi<P: SettingsPort, S: DataStore>`:
//! - Production: `SnipitApi<FileSettings, FileStore>`
//! - Testing: `SnipitApi<InMemorySettings, InMemoryStore>`

use crate::commands::{self, SnippetDraft};
use crate::error::{Result, SnipitError};
use crate::filter;
use crate::metadata::MetadataCompleter;
use crate::model::{Collection, Snippet};
use crate::query;
use crate::settings::{Settings, SettingsPatch, SettingsPort};
use crate::sort::{self, SortOption};
use crate::store::DataStore;
use crate::view::{self, ViewOptions};
use std::path::{Path, PathBuf};

pub struct SnipitApi<P: SettingsPort, S: DataStore> {
    settings: P,
    store: S,
}

impl<P: SettingsPort, S: DataStore> SnipitApi<P, S> {
    pub fn new(settings: P, store: S) -> Self {
        Self { settings, store }
    }

    pub fn settings(&self) -> &P {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The directory snippet operations act on, see the module docs.
    pub fn resolve_dir(&self, dir: Option<&Path>) -> Option<PathBuf> {
        if let Some(dir) = dir {
            return Some(dir.to_path_buf());
        }
        if let Some(collection) = commands::collections::selected(&self.settings) {
            return Some(collection.path);
        }
        self.settings.load().collection_path
    }

    fn require_dir(&self, dir: Option<&Path>) -> Result<PathBuf> {
        self.resolve_dir(dir).ok_or(SnipitError::NoCollection)
    }

    // --- Snippets ---

    pub fn list_snippets(&self, dir: Option<&Path>) -> Vec<Snippet> {
        match self.resolve_dir(dir) {
            Some(dir) => self.store.list(&dir),
            None => Vec::new(),
        }
    }

    pub fn get_snippet(&self, id: &str, dir: Option<&Path>) -> Option<Snippet> {
        let dir = self.resolve_dir(dir)?;
        self.store.get(id, &dir)
    }

    pub fn save_snippet(&mut self, snippet: &Snippet, dir: Option<&Path>) -> bool {
        match self.resolve_dir(dir) {
            Some(dir) => self.store.save(snippet, &dir),
            None => false,
        }
    }

    pub fn delete_snippet(&mut self, id: &str, dir: Option<&Path>) -> bool {
        match self.resolve_dir(dir) {
            Some(dir) => self.store.delete(id, &dir),
            None => false,
        }
    }

    pub fn toggle_star(&mut self, id: &str, dir: Option<&Path>) -> bool {
        match self.resolve_dir(dir) {
            Some(dir) => self.store.toggle_star(id, &dir),
            None => false,
        }
    }

    pub fn create_snippet(&mut self, draft: SnippetDraft, dir: Option<&Path>) -> Result<Snippet> {
        let dir = self.require_dir(dir)?;
        commands::create::run(&mut self.store, draft, &dir)
    }

    pub fn update_snippet(
        &mut self,
        id: &str,
        draft: SnippetDraft,
        dir: Option<&Path>,
    ) -> Result<Snippet> {
        let dir = self.require_dir(dir)?;
        commands::update::run(&mut self.store, id, draft, &dir)
    }

    pub fn snippet_path(&self, id: &str, dir: Option<&Path>) -> Option<PathBuf> {
        let dir = self.resolve_dir(dir)?;
        Some(self.store.snippet_path(id, &dir))
    }

    /// Lists the collection and runs it through the filter/search/sort pipeline.
    pub fn view(&self, options: &ViewOptions, dir: Option<&Path>) -> Vec<Snippet> {
        view::apply(self.list_snippets(dir), options)
    }

    pub fn languages(&self, dir: Option<&Path>) -> Vec<String> {
        filter::available_languages(&self.list_snippets(dir))
    }

    // --- Pipeline ---

    pub fn filter_by_side<F: AsRef<str>>(
        &self,
        snippets: Vec<Snippet>,
        filters: &[F],
        available_languages: &[String],
    ) -> Vec<Snippet> {
        filter::filter_by_side(snippets, filters, available_languages)
    }

    pub fn filter_by_search(&self, snippets: Vec<Snippet>, query: &str) -> Vec<Snippet> {
        query::filter_by_search(snippets, query)
    }

    pub fn sort_snippets(
        &self,
        mut snippets: Vec<Snippet>,
        option: SortOption,
        starred_first: bool,
    ) -> Vec<Snippet> {
        sort::sort_snippets(&mut snippets, option, starred_first);
        snippets
    }

    /// Asks `completer` for metadata and fills the empty fields of `draft`.
    ///
    /// The model hint comes from the `model` setting.
    pub fn complete_metadata<C: MetadataCompleter>(
        &self,
        completer: &C,
        draft: &mut SnippetDraft,
    ) -> Result<bool> {
        let model = self.settings.load().model;
        let suggestion = completer.complete(&draft.code, model.as_deref())?;
        Ok(suggestion.apply(draft))
    }

    // --- Collections ---

    pub fn list_collections(&self) -> Vec<Collection> {
        commands::collections::list(&self.settings)
    }

    pub fn add_collection(&self, collection: Collection) -> bool {
        commands::collections::add(&self.settings, collection)
    }

    pub fn remove_collection(&self, id: &str) -> bool {
        commands::collections::remove(&self.settings, id)
    }

    pub fn select_collection(&self, id: &str) -> bool {
        commands::collections::select(&self.settings, id)
    }

    pub fn selected_collection(&self) -> Option<Collection> {
        commands::collections::selected(&self.settings)
    }

    pub fn rename_collection(&self, id: &str, name: &str) -> bool {
        commands::collections::rename(&self.settings, id, name)
    }

    /// A registered collection by id or name.
    pub fn find_collection(&self, key: &str) -> Result<Collection> {
        commands::collections::find(&self.settings, key)
            .ok_or_else(|| SnipitError::CollectionNotFound(key.to_string()))
    }

    pub fn verify_collections(&self) -> bool {
        commands::collections::verify_exists(&self.settings)
    }

    // --- Settings ---

    pub fn load_settings(&self) -> Settings {
        self.settings.load()
    }

    pub fn save_settings(&self, patch: &SettingsPatch) -> bool {
        self.settings.save(patch)
    }
}
