use super::create::SnippetDraft;
use crate::error::{Result, SnipitError};
use crate::model::{normalize_tags, now_timestamp, Snippet};
use crate::store::DataStore;
use std::path::Path;

/// Replaces the editable fields of `existing` with the draft's.
///
/// `id`, `date`, `starred` and unknown keys are kept; `lastEdited` is set to now.
/// The draft's own `id` is ignored.
pub fn apply(existing: &Snippet, draft: SnippetDraft) -> Result<Snippet> {
    draft.validate()?;
    let description = draft.clean_description();

    let mut updated = existing.clone();
    updated.title = draft.title.trim().to_string();
    updated.description = description;
    updated.code = draft.code;
    updated.language = draft.language.trim().to_string();
    updated.tags = normalize_tags(draft.tags);
    updated.last_edited = Some(now_timestamp());
    Ok(updated)
}

pub fn run<S: DataStore>(
    store: &mut S,
    id: &str,
    draft: SnippetDraft,
    dir: &Path,
) -> Result<Snippet> {
    let existing = store
        .get(id, dir)
        .ok_or_else(|| SnipitError::SnippetNotFound(id.to_string()))?;
    let updated = apply(&existing, draft)?;

    if !store.save(&updated, dir) {
        return Err(SnipitError::Store(format!("Failed to save snippet {}", id)));
    }
    tracing::info!("Updated snippet {}", id);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new().with_starred("1", "old title", "2024-01-01T00:00:00.000Z")
    }

    #[test]
    fn updates_fields_and_keeps_identity() {
        let mut fixture = fixture();
        let dir = fixture.dir.clone();
        let draft = SnippetDraft::new("new title", "new code")
            .language("Go")
            .id("ignored");

        let updated = run(&mut fixture.store, "1", draft, &dir).unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.code, "new code");
        assert_eq!(updated.date, "2024-01-01T00:00:00.000Z");
        assert!(updated.starred);
        assert!(updated.last_edited.is_some());
        assert_eq!(fixture.store.get("1", &dir), Some(updated));
        assert!(!fixture.store.contains("ignored", &dir));
    }

    #[test]
    fn unknown_keys_survive_update() {
        let mut fixture = fixture();
        let dir = fixture.dir.clone();
        let mut existing = fixture.store.get("1", &dir).unwrap();
        existing.extra.insert("folder".into(), serde_json::json!("work"));
        fixture.store.save(&existing, &dir);

        let updated = run(&mut fixture.store, "1", SnippetDraft::new("t", "c"), &dir).unwrap();
        assert_eq!(updated.extra.get("folder"), Some(&serde_json::json!("work")));
    }

    #[test]
    fn missing_snippet_is_not_found() {
        let mut fixture = fixture();
        let dir = fixture.dir.clone();
        let err = run(&mut fixture.store, "2", SnippetDraft::new("t", "c"), &dir).unwrap_err();
        assert!(matches!(err, SnipitError::SnippetNotFound(id) if id == "2"));
    }

    #[test]
    fn invalid_draft_leaves_record_untouched() {
        let mut fixture = fixture();
        let dir = fixture.dir.clone();
        let before = fixture.store.get("1", &dir);

        let err = run(&mut fixture.store, "1", SnippetDraft::new("t", ""), &dir).unwrap_err();
        assert!(matches!(err, SnipitError::Validation(ValidationError::MissingCode)));
        assert_eq!(fixture.store.get("1", &dir), before);
    }
}
