//! The list view pipeline: side filters, then the search query, then sorting.

use crate::filter::{available_languages, filter_by_side};
use crate::model::Snippet;
use crate::query::filter_by_search;
use crate::sort::{sort_snippets, SortOption};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Side-panel tokens (`starred`, `unlabeled`, language names).
    pub filters: Vec<String>,
    pub query: String,
    pub sort: SortOption,
    pub starred_first: bool,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, token: impl Into<String>) -> Self {
        self.filters.push(token.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn starred_first(mut self, starred_first: bool) -> Self {
        self.starred_first = starred_first;
        self
    }
}

/// The known-language set is taken from the whole input, before any filtering.
pub fn apply(snippets: Vec<Snippet>, options: &ViewOptions) -> Vec<Snippet> {
    let languages = available_languages(&snippets);
    let side = filter_by_side(snippets, &options.filters, &languages);
    let mut found = filter_by_search(side, &options.query);
    sort_snippets(&mut found, options.sort, options.starred_first);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn titles(snippets: &[Snippet]) -> Vec<&str> {
        snippets.iter().map(|s| s.title.as_str()).collect()
    }

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with("1", "parse args", "Rust", &["cli"], "2024-01-01")
            .with("2", "read file", "Rust", &["io"], "2024-02-01")
            .with("3", "fetch json", "Python", &["http"], "2024-03-01")
            .with_starred("4", "debounce", "2023-12-01")
    }

    #[test]
    fn default_view_is_newest_first() {
        let result = apply(fixture().snippets(), &ViewOptions::new());
        assert_eq!(
            titles(&result),
            vec!["fetch json", "read file", "parse args", "debounce"]
        );
    }

    #[test]
    fn filters_then_query_then_sort() {
        let options = ViewOptions::new()
            .filter("rust")
            .query("file")
            .sort(SortOption::TitleAsc);
        let result = apply(fixture().snippets(), &options);
        assert_eq!(titles(&result), vec!["read file"]);
    }

    #[test]
    fn starred_first_lifts_old_starred_snippet() {
        let options = ViewOptions::new().starred_first(true);
        let result = apply(fixture().snippets(), &options);
        assert_eq!(result[0].title, "debounce");
    }

    #[test]
    fn language_filter_uses_languages_of_whole_list() {
        // "python" must stay a language filter even though the query removes it
        let options = ViewOptions::new().filter("python").query("rust");
        assert!(apply(fixture().snippets(), &options).is_empty());
    }

    #[test]
    fn title_sort_with_starred_filter() {
        let options = ViewOptions::new()
            .filter("starred")
            .sort(SortOption::TitleDesc);
        let result = apply(fixture().snippets(), &options);
        assert_eq!(titles(&result), vec!["debounce"]);
    }
}
