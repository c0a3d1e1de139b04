//! Metadata completion: suggesting a title, description, language and tags for a
//! piece of code.
//!
//! The core only defines the contract. A completer (a local LLM, a heuristic, a
//! remote service) is supplied by the client. Suggestions fill the fields the user
//! left empty and never overwrite typed input.

use crate::commands::SnippetDraft;
use crate::error::CompletionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSuggestion {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code_language: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MetadataSuggestion {
    /// Parses a completion service reply.
    ///
    /// The reply must be a JSON object with the suggestion keys. A non-empty
    /// `error` key is reported as [`CompletionError::Service`].
    pub fn from_json(text: &str) -> Result<Self, CompletionError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| CompletionError::Malformed(e.to_string()))?;
        let Value::Object(map) = &value else {
            return Err(CompletionError::Malformed("expected a JSON object".into()));
        };
        if let Some(error) = map.get("error").and_then(Value::as_str) {
            if !error.trim().is_empty() {
                return Err(CompletionError::Service(error.to_string()));
            }
        }
        serde_json::from_value(value).map_err(|e| CompletionError::Malformed(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.description.trim().is_empty()
            && self.code_language.trim().is_empty()
            && self.tags.iter().all(|t| t.trim().is_empty())
    }

    /// Fills empty draft fields from the suggestion. Returns whether anything changed.
    pub fn apply(&self, draft: &mut SnippetDraft) -> bool {
        let mut changed = false;

        if draft.title.trim().is_empty() && !self.title.trim().is_empty() {
            draft.title = self.title.trim().to_string();
            changed = true;
        }
        let has_description = draft
            .description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty());
        if !has_description && !self.description.trim().is_empty() {
            draft.description = Some(self.description.trim().to_string());
            changed = true;
        }
        if draft.language.trim().is_empty() && !self.code_language.trim().is_empty() {
            draft.language = self.code_language.trim().to_string();
            changed = true;
        }
        let suggested: Vec<String> = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if draft.tags.is_empty() && !suggested.is_empty() {
            draft.tags = suggested;
            changed = true;
        }
        changed
    }
}

pub trait MetadataCompleter {
    /// Suggest metadata for `code`. `model` is the user's preferred model, if any.
    fn complete(&self, code: &str, model: Option<&str>)
        -> Result<MetadataSuggestion, CompletionError>;
}
