//! # Data Model
//!
//! A [`Snippet`] is one stored code sample. Each snippet lives in its own JSON file
//! inside a collection directory, named after its id (`{id}.json`).
//!
//! ## On-Disk Record
//!
//! ```json
//! {
//!   "id": "483920117",
//!   "title": "Debounce helper",
//!   "description": "Delay a callback until input settles",
//!   "code": "function debounce(fn, ms) { ... }",
//!   "language": "JavaScript",
//!   "tags": ["timing", "events"],
//!   "starred": false,
//!   "date": "2024-03-01T10:15:00.000Z",
//!   "lastEdited": "2024-03-02T08:00:00.000Z"
//! }
//! ```
//!
//! Keys this crate does not know about are kept in [`Snippet::extra`] and written
//! back untouched, so records produced by newer clients survive a round-trip.
//!
//! ## Timestamps
//!
//! `date` and `lastEdited` are kept as the strings found on disk. They are only
//! parsed (via [`parse_timestamp`]) when something needs to compare them, which keeps
//! reads lossless even for records with unusual formatting.
//!
//! ## Tags
//!
//! Tags are an ordered list with exact-match uniqueness. A snippet created without
//! tags receives the [`UNLABELED_TAG`] placeholder, see [`normalize_tags`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use uuid::Uuid;

/// Extension of snippet record files inside a collection directory.
pub const RECORD_EXT: &str = ".json";

/// Placeholder tag given to snippets created without any tag.
pub const UNLABELED_TAG: &str = "unlabeled";

const ID_MIN: u128 = 100_000_000;
const ID_SPAN: u128 = 900_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub code: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<String>,
    /// Unknown keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snippet {
    /// Builds a fresh, unstarred snippet dated now. Tags are normalized.
    pub fn new(
        id: String,
        title: String,
        code: String,
        language: String,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            title,
            description: None,
            code,
            language,
            tags: normalize_tags(tags),
            starred: false,
            date: now_timestamp(),
            last_edited: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when the snippet carries no real tag: either none at all or only the
    /// placeholder assigned at creation.
    pub fn is_unlabeled(&self) -> bool {
        match self.tags.as_slice() {
            [] => true,
            [only] => only == UNLABELED_TAG,
            _ => false,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    pub fn file_name(&self) -> String {
        record_file_name(&self.id)
    }
}

/// A named directory holding one file per snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
}

impl Collection {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

pub fn record_file_name(id: &str) -> String {
    format!("{}{}", id, RECORD_EXT)
}

/// Generates a 9-digit decimal snippet id (`100000000..=999999999`).
///
/// Uniqueness is not guaranteed here; callers that create snippets check for an
/// existing record with the same id.
pub fn new_snippet_id() -> String {
    let n = Uuid::new_v4().as_u128() % ID_SPAN;
    (ID_MIN + n).to_string()
}

/// Trims tags, drops empty entries and exact duplicates (first one wins), and
/// substitutes the [`UNLABELED_TAG`] placeholder for an empty result.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || normalized.iter().any(|t| t == tag) {
            continue;
        }
        normalized.push(tag.to_string());
    }
    if normalized.is_empty() {
        normalized.push(UNLABELED_TAG.to_string());
    }
    normalized
}

/// Current time in the millisecond ISO-8601 form other SnipIt clients write.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses the timestamp forms found in snippet records.
///
/// Accepts RFC 3339 (`2024-03-01T10:15:00.000Z`), a naive date-time
/// (`2024-03-01T10:15:00`, taken as UTC) and a bare date (`2024-03-01`).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
