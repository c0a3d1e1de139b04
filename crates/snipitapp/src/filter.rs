//! Side-panel filters: `starred`, `unlabeled` and language toggles.
//!
//! Filter tokens are lower-cased strings as the panel produces them. The two
//! keywords restrict by flag; any token naming a known language restricts by
//! language (OR among language tokens); kinds combine with AND. Tokens that are
//! neither keywords nor known languages have no effect.

use crate::model::Snippet;

pub const STARRED_FILTER: &str = "starred";
pub const UNLABELED_FILTER: &str = "unlabeled";

/// Distinct, non-empty languages in first-seen order.
pub fn available_languages(snippets: &[Snippet]) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for snippet in snippets {
        let lang = snippet.language.as_str();
        if !lang.is_empty() && !languages.iter().any(|l| l == lang) {
            languages.push(lang.to_string());
        }
    }
    languages
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideFilters {
    pub starred: bool,
    pub unlabeled: bool,
    /// Lower-cased language names.
    pub languages: Vec<String>,
    /// Tokens that matched nothing; kept so a UI can still render them.
    pub inert: Vec<String>,
}

impl SideFilters {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], known_languages: &[String]) -> Self {
        let known: Vec<String> = known_languages.iter().map(|l| l.to_lowercase()).collect();
        let mut filters = SideFilters::default();

        for token in tokens {
            let token = token.as_ref().trim().to_lowercase();
            match token.as_str() {
                "" => {}
                STARRED_FILTER => filters.starred = true,
                UNLABELED_FILTER => filters.unlabeled = true,
                _ if known.contains(&token) => {
                    if !filters.languages.contains(&token) {
                        filters.languages.push(token);
                    }
                }
                _ => filters.inert.push(token),
            }
        }
        filters
    }

    pub fn is_empty(&self) -> bool {
        !self.starred && !self.unlabeled && self.languages.is_empty()
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        if self.starred && !snippet.starred {
            return false;
        }
        if self.unlabeled && !snippet.tags.is_empty() {
            return false;
        }
        if !self.languages.is_empty() && !self.languages.contains(&snippet.language.to_lowercase())
        {
            return false;
        }
        true
    }
}

/// Keeps the snippets passing every active side filter, in their original order.
pub fn filter_by_side<S: AsRef<str>>(
    snippets: Vec<Snippet>,
    filters: &[S],
    available_languages: &[String],
) -> Vec<Snippet> {
    let filters = SideFilters::from_tokens(filters, available_languages);
    if filters.is_empty() {
        return snippets;
    }
    snippets.into_iter().filter(|s| filters.matches(s)).collect()
}
