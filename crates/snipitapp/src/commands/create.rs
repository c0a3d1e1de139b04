use crate::error::{Result, SnipitError, ValidationError};
use crate::model::{new_snippet_id, Snippet};
use crate::store::DataStore;
use std::path::Path;

/// Attempts at drawing an unused id before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// User-supplied snippet fields, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    /// Fixed id; a fresh one is generated when `None`.
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub language: String,
    pub tags: Vec<String>,
}

impl SnippetDraft {
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    /// A draft holding the editable fields of `snippet`.
    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self {
            id: Some(snippet.id.clone()),
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            code: snippet.code.clone(),
            language: snippet.language.clone(),
            tags: snippet.tags.clone(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Title and code must contain something other than whitespace.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.code.trim().is_empty() {
            return Err(ValidationError::MissingCode);
        }
        Ok(())
    }

    pub(crate) fn clean_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

/// Validates `draft` and turns it into a new, unsaved snippet for `dir`.
pub fn build<S: DataStore>(store: &S, draft: SnippetDraft, dir: &Path) -> Result<Snippet> {
    build_with(store, draft, dir, new_snippet_id)
}

/// [`build`] with ids drawn from `next_id` instead of [`new_snippet_id`].
pub fn build_with<S, F>(store: &S, draft: SnippetDraft, dir: &Path, next_id: F) -> Result<Snippet>
where
    S: DataStore,
    F: FnMut() -> String,
{
    draft.validate()?;
    let id = match &draft.id {
        Some(id) => id.clone(),
        None => unused_id(store, dir, next_id)?,
    };
    let description = draft.clean_description();

    let mut snippet = Snippet::new(
        id,
        draft.title.trim().to_string(),
        draft.code,
        draft.language.trim().to_string(),
        draft.tags,
    );
    snippet.description = description;
    Ok(snippet)
}

pub fn run<S: DataStore>(store: &mut S, draft: SnippetDraft, dir: &Path) -> Result<Snippet> {
    let snippet = build(store, draft, dir)?;
    if !store.save(&snippet, dir) {
        return Err(SnipitError::Store(format!(
            "Failed to save snippet {} to {}",
            snippet.id,
            dir.display()
        )));
    }
    tracing::info!("Created snippet {} ({})", snippet.id, snippet.title);
    Ok(snippet)
}

fn unused_id<S, F>(store: &S, dir: &Path, mut next_id: F) -> Result<String>
where
    S: DataStore,
    F: FnMut() -> String,
{
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = next_id();
        if !store.contains(&id, dir) {
            return Ok(id);
        }
        tracing::warn!("Generated snippet id {} already exists; retrying", id);
    }
    Err(SnipitError::Store(format!(
        "Could not find an unused snippet id in {}",
        dir.display()
    )))
}
