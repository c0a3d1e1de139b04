//! Ordering of the snippet list.
//!
//! With `starred_first`, starred snippets lead regardless of the option. Within
//! equal starred status the [`SortOption`] applies. Remaining ties keep their input
//! order (the sort is stable).

use crate::error::SnipitError;
use crate::model::Snippet;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOption {
    pub fn all() -> &'static [SortOption] {
        &[
            SortOption::DateDesc,
            SortOption::DateAsc,
            SortOption::TitleAsc,
            SortOption::TitleDesc,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::DateDesc => "date-desc",
            SortOption::DateAsc => "date-asc",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = SnipitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::all()
            .iter()
            .copied()
            .find(|opt| opt.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                SnipitError::Api(format!(
                    "Unknown sort option '{}' (expected one of: date-desc, date-asc, title-asc, title-desc)",
                    s
                ))
            })
    }
}

pub fn compare(a: &Snippet, b: &Snippet, option: SortOption, starred_first: bool) -> Ordering {
    if starred_first {
        // starred = true sorts first
        match b.starred.cmp(&a.starred) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }

    match option {
        SortOption::DateAsc => a.created_at().cmp(&b.created_at()),
        SortOption::DateDesc => b.created_at().cmp(&a.created_at()),
        SortOption::TitleAsc => compare_titles(&a.title, &b.title),
        SortOption::TitleDesc => compare_titles(&b.title, &a.title),
    }
}

pub fn sort_snippets(snippets: &mut [Snippet], option: SortOption, starred_first: bool) {
    snippets.sort_by(|a, b| compare(a, b, option, starred_first));
}

/// Dictionary order: base letters first, then accents (`e` before `é`), then case
/// (lower case first).
fn compare_titles(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| b.cmp(a))
}

/// Lower-cased with diacritics removed.
fn base_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(title: &str) -> String {
    title.nfd().flat_map(char::to_lowercase).collect()
}
