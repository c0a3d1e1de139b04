//! # Startup
//!
//! [`initialize`] prepares everything a client needs before its first command:
//!
//! 1. Resolve the application directory: an explicit override, else the
//!    `SNIPIT_HOME` environment variable, else the OS data directory (via the
//!    `directories` crate). Create it if missing.
//! 2. Load the settings, which writes the default document on first run.
//! 3. Make sure the settings hold a `collections` list.
//! 4. Make sure the `"default"` collection is registered, pointing at
//!    `<app_dir>/snippets/`, and that its directory exists.
//!
//! Steps 3 and 4 are idempotent, so running startup on every launch is safe. A
//! user who removes the default collection gets it back on the next start.

use crate::api::SnipitApi;
use crate::error::{Result, SnipitError};
use crate::model::Collection;
use crate::settings::{FileSettings, SettingsPort};
use crate::store::fs::FileStore;
use crate::store::DataStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the application directory. Primarily used to isolate tests.
pub const HOME_ENV: &str = "SNIPIT_HOME";

pub const DEFAULT_COLLECTION_ID: &str = "default";
pub const DEFAULT_COLLECTION_NAME: &str = "Default Collection";
pub const DEFAULT_SNIPPETS_DIR: &str = "snippets";

pub struct SnipitContext {
    pub api: SnipitApi<FileSettings, FileStore>,
    pub app_dir: PathBuf,
}

pub fn app_dir(home_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = home_override {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("dev", "snipit", "snipit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SnipitError::Store("Could not determine the application data directory".into()))
}

pub fn initialize(home_override: Option<PathBuf>) -> Result<SnipitContext> {
    let app_dir = app_dir(home_override)?;
    std::fs::create_dir_all(&app_dir)?;
    tracing::debug!("Using application directory {}", app_dir.display());

    let api = SnipitApi::new(FileSettings::in_dir(&app_dir), FileStore::new());
    bootstrap(&api, &app_dir)?;
    Ok(SnipitContext { api, app_dir })
}

/// Runs the settings side of startup against any settings port.
pub fn bootstrap<P: SettingsPort, S: DataStore>(api: &SnipitApi<P, S>, app_dir: &Path) -> Result<()> {
    api.load_settings();
    if !api.verify_collections() {
        tracing::warn!("Could not initialise the collection list");
    }

    let registered = api
        .list_collections()
        .iter()
        .any(|c| c.id == DEFAULT_COLLECTION_ID);
    if registered {
        return Ok(());
    }

    let path = app_dir.join(DEFAULT_SNIPPETS_DIR);
    std::fs::create_dir_all(&path)?;
    let default = Collection::with_id(DEFAULT_COLLECTION_ID, DEFAULT_COLLECTION_NAME, &path);
    if api.add_collection(default) {
        tracing::info!("Registered default collection at {}", path.display());
    } else {
        tracing::warn!("Default collection was not registered; {} is already in use", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SnippetDraft;
    use crate::settings::SETTINGS_FILENAME;
    use tempfile::TempDir;

    #[test]
    fn first_start_creates_settings_and_default_collection() {
        let home = TempDir::new().unwrap();
        let ctx = initialize(Some(home.path().to_path_buf())).unwrap();

        assert!(home.path().join(SETTINGS_FILENAME).is_file());
        assert!(home.path().join(DEFAULT_SNIPPETS_DIR).is_dir());

        let collections = ctx.api.list_collections();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].id, DEFAULT_COLLECTION_ID);
        assert_eq!(collections[0].path, home.path().join(DEFAULT_SNIPPETS_DIR));

        let settings = ctx.api.load_settings();
        assert!(settings.os.is_some());
        assert!(settings.first_startup.is_some());
    }

    #[test]
    fn restart_is_idempotent() {
        let home = TempDir::new().unwrap();
        let first = initialize(Some(home.path().to_path_buf())).unwrap();
        let first_startup = first.api.load_settings().first_startup;

        let second = initialize(Some(home.path().to_path_buf())).unwrap();
        assert_eq!(second.api.list_collections().len(), 1);
        assert_eq!(second.api.load_settings().first_startup, first_startup);
    }

    #[test]
    fn new_snippets_land_in_default_collection() {
        let home = TempDir::new().unwrap();
        let mut ctx = initialize(Some(home.path().to_path_buf())).unwrap();

        let created = ctx
            .api
            .create_snippet(SnippetDraft::new("hello", "echo hi"), None)
            .unwrap();
        let file = home
            .path()
            .join(DEFAULT_SNIPPETS_DIR)
            .join(format!("{}.json", created.id));
        assert!(file.is_file());
    }

    #[test]
    fn removed_default_collection_comes_back() {
        let home = TempDir::new().unwrap();
        let ctx = initialize(Some(home.path().to_path_buf())).unwrap();
        assert!(ctx.api.remove_collection(DEFAULT_COLLECTION_ID));

        let ctx = initialize(Some(home.path().to_path_buf())).unwrap();
        assert_eq!(ctx.api.list_collections()[0].id, DEFAULT_COLLECTION_ID);
    }

    #[test]
    fn explicit_override_wins() {
        let home = TempDir::new().unwrap();
        assert_eq!(app_dir(Some(home.path().to_path_buf())).unwrap(), home.path());
    }
}
