//! # Settings Store
//!
//! Global configuration lives in a single JSON document (`settings.json` in the
//! application directory). It holds the collection registry, the selected
//! collection and a handful of UI preferences.
//!
//! ## Document Shape
//!
//! ```json
//! {
//!   "collectionPath": null,
//!   "os": "Linux",
//!   "firstStartup": "2024-01-01T09:00:00.000Z",
//!   "collections": [{ "id": "default", "name": "Default Collection", "path": "/…/snippets" }],
//!   "selectedCollectionId": "default",
//!   "theme": "dark",
//!   "model": "deepseek-r1:1.5b"
//! }
//! ```
//!
//! ## Merge-On-Save
//!
//! [`SettingsPort::save`] never replaces the document. It reads what is on disk,
//! overlays the keys present in the [`SettingsPatch`] and writes the result back,
//! so keys written by other clients (or newer versions) are preserved.
//!
//! The merge is read-then-write with no locking: two overlapping saves computed
//! from the same snapshot race, the later one winning. Callers serialise.
//!
//! ## Failure Policy
//!
//! Settings must never stop the application from starting:
//! - `load` logs and falls back to [`Settings::minimal`] on any failure.
//! - `save` logs and reports `false`.
//!
//! Known keys are read leniently: a value of the wrong type reads as absent. A
//! `collections` value that is not an array reads as absent and malformed entries
//! inside the array are skipped.
//!
//! ## Injection
//!
//! Components receive a [`SettingsPort`] at construction instead of reaching for
//! a global. Production uses [`FileSettings`], tests use [`InMemorySettings`].

use crate::error::Result;
use crate::model::{now_timestamp, Collection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

pub mod backend;

use backend::{DocumentBackend, FsDocument, MemDocument};

pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Legacy single-collection pointer. Always written, `null` when unset.
    #[serde(default, deserialize_with = "lenient")]
    pub collection_path: Option<PathBuf>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub os: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_startup: Option<String>,
    /// `None` when missing or malformed in the document.
    #[serde(
        default,
        deserialize_with = "lenient_collections",
        skip_serializing_if = "Option::is_none"
    )]
    pub collections: Option<Vec<Collection>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_collection_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// The document written on first run.
    pub fn defaults(os: impl Into<String>) -> Self {
        Self {
            os: Some(os.into()),
            first_startup: Some(now_timestamp()),
            collections: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Fallback returned when the document cannot be read at all.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn collections(&self) -> Vec<Collection> {
        self.collections.clone().unwrap_or_default()
    }
}

/// A partial settings update. Only fields that are `Some` are written.
///
/// The double options (`collection_path`, `selected_collection_id`) distinguish
/// "leave alone" (`None`) from "write null" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_path: Option<Option<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_startup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<Collection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_collection_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collections(mut self, collections: Vec<Collection>) -> Self {
        self.collections = Some(collections);
        self
    }

    pub fn selected_collection(mut self, id: Option<String>) -> Self {
        self.selected_collection_id = Some(id);
        self
    }

    pub fn collection_path(mut self, path: Option<PathBuf>) -> Self {
        self.collection_path = Some(path);
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set an arbitrary key, for preferences this crate does not model.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

/// The settings capability handed to the registry, the API and the CLI.
pub trait SettingsPort {
    /// Read the settings. Never fails: falls back to defaults after logging.
    fn load(&self) -> Settings;

    /// Shallow-merge `patch` onto the persisted document. Returns `false` on failure.
    fn save(&self, patch: &SettingsPatch) -> bool;
}

pub struct SettingsStore<B: DocumentBackend> {
    backend: B,
    os: String,
}

pub type FileSettings = SettingsStore<FsDocument>;
pub type InMemorySettings = SettingsStore<MemDocument>;

impl FileSettings {
    /// Settings stored as `settings.json` inside `app_dir`.
    pub fn in_dir(app_dir: impl Into<PathBuf>) -> Self {
        let path = app_dir.into().join(SETTINGS_FILENAME);
        SettingsStore::with_backend(FsDocument::new(path))
    }
}

impl Default for InMemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySettings {
    pub fn new() -> Self {
        SettingsStore::with_backend(MemDocument::new())
    }

    /// Start from a raw document, e.g. a hand-written or corrupted one.
    pub fn from_document(content: &str) -> Self {
        SettingsStore::with_backend(MemDocument::with_content(content))
    }
}

impl<B: DocumentBackend> SettingsStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            os: os_description(),
        }
    }

    /// Override the OS string recorded in a freshly created document.
    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = os.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn try_load(&self) -> Result<Settings> {
        match self.backend.read()? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => {
                let defaults = Settings::defaults(self.os.clone());
                let content = serde_json::to_string_pretty(&defaults)?;
                match self.backend.write(&content) {
                    Ok(()) => tracing::info!("Created settings document with defaults"),
                    Err(e) => tracing::error!("Failed to write default settings: {}", e),
                }
                Ok(defaults)
            }
        }
    }

    pub fn try_save(&self, patch: &SettingsPatch) -> Result<()> {
        let mut document = self.read_document()?;
        for (key, value) in patch.to_map()? {
            document.insert(key, value);
        }
        let content = serde_json::to_string_pretty(&Value::Object(document))?;
        self.backend.write(&content)
    }

    /// The persisted document as a raw JSON object. Missing → empty; a corrupt or
    /// non-object document is replaced by an empty object on the next save.
    fn read_document(&self) -> Result<Map<String, Value>> {
        let Some(text) = self.backend.read()? else {
            return Ok(Map::new());
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                tracing::warn!("Settings document is not a JSON object; starting from empty");
                Ok(Map::new())
            }
            Err(e) => {
                tracing::warn!("Settings document is corrupt ({}); starting from empty", e);
                Ok(Map::new())
            }
        }
    }
}

impl<B: DocumentBackend> SettingsPort for SettingsStore<B> {
    fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Error loading settings: {}", e);
                Settings::minimal()
            }
        }
    }

    fn save(&self, patch: &SettingsPatch) -> bool {
        match self.try_save(patch) {
            Ok(()) => {
                tracing::debug!("Settings saved");
                true
            }
            Err(e) => {
                tracing::error!("Error saving settings: {}", e);
                false
            }
        }
    }
}

/// Human readable platform name recorded in new documents.
pub fn os_description() -> String {
    match std::env::consts::OS {
        "macos" => "macOS".to_string(),
        "windows" => "Windows".to_string(),
        "linux" => "Linux".to_string(),
        other => format!("Unknown OS: {}", other),
    }
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_collections<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<Collection>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| match serde_json::from_value(item) {
                    Ok(collection) => Some(collection),
                    Err(e) => {
                        tracing::warn!("Skipping malformed collection entry: {}", e);
                        None
                    }
                })
                .collect(),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_creates_defaults() {
        let store = InMemorySettings::new().with_os("TestOS");
        let settings = store.load();

        assert_eq!(settings.os.as_deref(), Some("TestOS"));
        assert!(settings.first_startup.is_some());
        assert_eq!(settings.collections, Some(vec![]));
        assert_eq!(settings.collection_path, None);

        let written = store.backend().content().unwrap();
        let doc: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(doc["collectionPath"], Value::Null);
        assert_eq!(doc["collections"], Value::Array(vec![]));
    }

    #[test]
    fn second_load_reads_persisted_document() {
        let store = InMemorySettings::new();
        let first = store.load();
        let second = store.load();
        assert_eq!(first.first_startup, second.first_startup);
    }

    #[test]
    fn read_failure_returns_minimal_settings() {
        let store = InMemorySettings::from_document("{}");
        store.backend().set_simulate_read_error(true);
        assert_eq!(store.load(), Settings::minimal());
    }

    #[test]
    fn corrupt_document_returns_minimal_settings() {
        let store = InMemorySettings::from_document("{ not json");
        assert_eq!(store.load(), Settings::minimal());
    }

    #[test]
    fn non_array_collections_read_as_absent() {
        let store = InMemorySettings::from_document(r#"{"collections": "oops"}"#);
        let settings = store.load();
        assert_eq!(settings.collections, None);
        assert!(settings.collections().is_empty());
    }

    #[test]
    fn malformed_collection_entries_are_skipped() {
        let store = InMemorySettings::from_document(
            r#"{"collections": [{"id": "a", "name": "A", "path": "/a"}, {"id": 3}, "x"]}"#,
        );
        let collections = store.load().collections();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].id, "a");
    }

    #[test]
    fn wrongly_typed_known_keys_read_as_absent() {
        let store = InMemorySettings::from_document(r#"{"theme": 42, "os": "Linux"}"#);
        let settings = store.load();
        assert_eq!(settings.theme, None);
        assert_eq!(settings.os.as_deref(), Some("Linux"));
    }

    #[test]
    fn save_merges_and_preserves_unknown_keys() {
        let store =
            InMemorySettings::from_document(r#"{"collectionPath": null, "futureFlag": {"x": 1}}"#);
        assert!(store.save(&SettingsPatch::new().theme("dark")));

        let settings = store.load();
        assert_eq!(settings.theme.as_deref(), Some("dark"));
        assert_eq!(
            settings.extra.get("futureFlag"),
            Some(&serde_json::json!({"x": 1}))
        );
    }

    #[test]
    fn save_leaves_unpatched_keys_alone() {
        let store = InMemorySettings::new();
        store.load();
        store.save(&SettingsPatch::new().theme("dark"));
        store.save(&SettingsPatch::new().model("deepseek-r1:7b"));

        let settings = store.load();
        assert_eq!(settings.theme.as_deref(), Some("dark"));
        assert_eq!(settings.model.as_deref(), Some("deepseek-r1:7b"));
        assert_eq!(settings.collections, Some(vec![]));
    }

    #[test]
    fn patch_can_write_explicit_null() {
        let store = InMemorySettings::from_document(r#"{"selectedCollectionId": "abc"}"#);
        store.save(&SettingsPatch::new().selected_collection(None));

        let doc: Value = serde_json::from_str(&store.backend().content().unwrap()).unwrap();
        assert_eq!(doc["selectedCollectionId"], Value::Null);
        assert_eq!(store.load().selected_collection_id, None);
    }

    #[test]
    fn save_onto_missing_document_creates_it() {
        let store = InMemorySettings::new();
        assert!(store.save(&SettingsPatch::new().set("telemetry", false)));
        let doc: Value = serde_json::from_str(&store.backend().content().unwrap()).unwrap();
        assert_eq!(doc["telemetry"], Value::Bool(false));
    }

    #[test]
    fn save_onto_corrupt_document_heals_it() {
        let store = InMemorySettings::from_document("[1, 2, 3]");
        assert!(store.save(&SettingsPatch::new().theme("light")));
        assert_eq!(store.load().theme.as_deref(), Some("light"));
    }

    #[test]
    fn save_failure_reports_false() {
        let store = InMemorySettings::from_document("{}");
        store.backend().set_simulate_write_error(true);
        assert!(!store.save(&SettingsPatch::new().theme("dark")));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(SettingsPatch::new().is_empty());
        assert!(!SettingsPatch::new().theme("x").is_empty());
    }
}
