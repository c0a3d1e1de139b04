//! The collection registry: the `collections` list stored in the settings document.
//!
//! Every operation reads the current document through the [`SettingsPort`] and
//! writes back only the keys it changes, so unrelated settings are preserved.
//! Removing a collection forgets it; its snippet files stay on disk.

use crate::model::Collection;
use crate::settings::{SettingsPatch, SettingsPort};

pub fn list<P: SettingsPort>(settings: &P) -> Vec<Collection> {
    settings.load().collections()
}

/// Registers `collection` unless one with the same path already exists.
///
/// A duplicate path returns `false` without writing anything.
pub fn add<P: SettingsPort>(settings: &P, collection: Collection) -> bool {
    let mut collections = list(settings);
    if let Some(existing) = collections.iter().find(|c| c.path == collection.path) {
        tracing::warn!(
            "Collection path {} is already registered as '{}'",
            collection.path.display(),
            existing.name
        );
        return false;
    }
    tracing::debug!("Adding collection '{}' at {}", collection.name, collection.path.display());
    collections.push(collection);
    settings.save(&SettingsPatch::new().collections(collections))
}

/// Forgets the collection with `id`. Returns `false` when no collection matched.
///
/// If the removed collection was the selected one the selection is cleared.
pub fn remove<P: SettingsPort>(settings: &P, id: &str) -> bool {
    let current = settings.load();
    let mut collections = current.collections();
    let before = collections.len();
    collections.retain(|c| c.id != id);
    if collections.len() == before {
        tracing::debug!("No collection with id {}", id);
        return false;
    }

    let mut patch = SettingsPatch::new().collections(collections);
    if current.selected_collection_id.as_deref() == Some(id) {
        patch = patch.selected_collection(None);
    }
    settings.save(&patch)
}

/// Makes sure the document holds a `collections` list, writing `[]` when it is
/// missing or malformed. Returns `false` only if that write fails.
pub fn verify_exists<P: SettingsPort>(settings: &P) -> bool {
    if settings.load().collections.is_some() {
        return true;
    }
    tracing::info!("Settings have no collection list; initialising an empty one");
    settings.save(&SettingsPatch::new().collections(Vec::new()))
}

/// Stores `id` as the selected collection. Unknown ids are refused.
pub fn select<P: SettingsPort>(settings: &P, id: &str) -> bool {
    if !list(settings).iter().any(|c| c.id == id) {
        tracing::warn!("Cannot select unknown collection {}", id);
        return false;
    }
    settings.save(&SettingsPatch::new().selected_collection(Some(id.to_string())))
}

/// The selected collection, or the first registered one when the stored id is
/// missing or no longer registered.
pub fn selected<P: SettingsPort>(settings: &P) -> Option<Collection> {
    let current = settings.load();
    let collections = current.collections();
    current
        .selected_collection_id
        .as_deref()
        .and_then(|id| collections.iter().find(|c| c.id == id).cloned())
        .or_else(|| collections.into_iter().next())
}

pub fn rename<P: SettingsPort>(settings: &P, id: &str, name: &str) -> bool {
    let mut collections = list(settings);
    let Some(collection) = collections.iter_mut().find(|c| c.id == id) else {
        return false;
    };
    collection.name = name.to_string();
    settings.save(&SettingsPatch::new().collections(collections))
}

/// Looks a collection up by id, then by exact name.
pub fn find<P: SettingsPort>(settings: &P, key: &str) -> Option<Collection> {
    let collections = list(settings);
    collections
        .iter()
        .find(|c| c.id == key)
        .or_else(|| collections.iter().find(|c| c.name == key))
        .cloned()
}
