//! # Storage Layer
//!
//! This module defines the storage abstraction for snipit. The [`DataStore`] trait
//! is the snippet repository: per-collection CRUD over one file per snippet.
//!
//! ## Layout
//!
//! A collection is a flat directory. Every snippet is a JSON file named after its id:
//!
//! ```text
//! ~/snippets/
//! ├── 483920117.json
//! ├── 120984456.json
//! └── notes.txt          # ignored: not a record
//! ```
//!
//! The directory is treated as a simple key-value store keyed by snippet id. There
//! are no transactions across files and no locking: two saves of the same id race
//! and the last writer wins.
//!
//! ## Failure Values
//!
//! Repository operations never return errors to the caller. Absence is a normal
//! outcome and every failure has a defined result:
//!
//! | Operation     | Absent           | Corrupt record     | I/O failure |
//! |---------------|------------------|--------------------|-------------|
//! | `list`        | `[]` (no dir)    | skipped and logged | `[]`        |
//! | `get`         | `None`           | `None`             | `None`      |
//! | `save`        | n/a              | n/a                | `false`     |
//! | `delete`      | `true`           | n/a                | `false`     |
//! | `toggle_star` | `false`          | `false`            | `false`     |
//!
//! The `try_*` methods on [`snippet_store::SnippetStore`] expose the underlying
//! `Result`s for callers that want the reason.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store over the local filesystem.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! Both are a [`snippet_store::SnippetStore`] over a [`backend::RecordBackend`],
//! which only knows how to list, read, write and remove files.

use crate::model::Snippet;
use std::path::{Path, PathBuf};

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod snippet_store;

/// Abstract interface for snippet storage, scoped by collection directory.
pub trait DataStore {
    /// All parseable snippets in `dir`.
    fn list(&self, dir: &Path) -> Vec<Snippet>;

    /// The snippet stored as `dir/{id}.json`, if present and parseable.
    fn get(&self, id: &str, dir: &Path) -> Option<Snippet>;

    /// Write the full record, overwriting any previous version.
    fn save(&mut self, snippet: &Snippet, dir: &Path) -> bool;

    /// Remove the record. An already absent record counts as success.
    fn delete(&mut self, id: &str, dir: &Path) -> bool;

    /// Flip the `starred` flag. Not atomic with respect to concurrent toggles.
    fn toggle_star(&mut self, id: &str, dir: &Path) -> bool;

    /// Whether a record with this id exists in `dir`.
    fn contains(&self, id: &str, dir: &Path) -> bool;

    /// Get the file path for a snippet (for file-based stores)
    fn snippet_path(&self, id: &str, dir: &Path) -> PathBuf;
}
