//! # Structured Search
//!
//! The search box accepts a small query language:
//!
//! ```text
//! title:react content:"useState(" tag:hooks debounce
//! ```
//!
//! ## Grammar
//!
//! A query is a whitespace separated list of terms:
//!
//! - `field:"quoted value"`: the value may contain spaces. Without a closing quote
//!   the token ends at the next whitespace like any `field:value`.
//! - `field:value`: the value runs to the next whitespace.
//! - `value`: a bare word, searched in every field ([`FieldTag::All`]).
//!
//! Field names are case-insensitive: `title`, `description`, `content` (the code
//! body), `language`, `tag`/`tags` and `all`. A token whose prefix is not a known
//! field name (`http://example.com`) is treated as a bare word, colon included, and
//! its value is searched literally (`foo:"a b"` looks for `foo:"a b"`).
//!
//! Exactly one leading and one trailing `"` are stripped from other values. Quotes inside a
//! quoted value are not escapes: `title:"a "b""` ends at the second quote and the
//! remainder becomes its own term.
//!
//! ## Matching
//!
//! Every term must match (AND). A term matches when its value is a case-insensitive
//! substring of the field; `tag` matches if any tag contains it and `all` matches if
//! any field does. An empty query has no terms and matches everything.

use crate::model::Snippet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    Title,
    Description,
    Content,
    Language,
    Tag,
    All,
}

impl FieldTag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "title" => Some(FieldTag::Title),
            "description" => Some(FieldTag::Description),
            "content" => Some(FieldTag::Content),
            "language" => Some(FieldTag::Language),
            "tag" | "tags" => Some(FieldTag::Tag),
            "all" => Some(FieldTag::All),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldTag::Title => "title",
            FieldTag::Description => "description",
            FieldTag::Content => "content",
            FieldTag::Language => "language",
            FieldTag::Tag => "tag",
            FieldTag::All => "all",
        }
    }

    /// `needle` must already be lower-cased.
    fn matches(self, snippet: &Snippet, needle: &str) -> bool {
        let contains = |text: &str| text.to_lowercase().contains(needle);
        match self {
            FieldTag::Title => contains(&snippet.title),
            FieldTag::Description => contains(snippet.description.as_deref().unwrap_or("")),
            FieldTag::Content => contains(&snippet.code),
            FieldTag::Language => contains(&snippet.language),
            FieldTag::Tag => snippet.tags.iter().any(|tag| contains(tag)),
            FieldTag::All => [
                FieldTag::Title,
                FieldTag::Description,
                FieldTag::Content,
                FieldTag::Language,
                FieldTag::Tag,
            ]
            .into_iter()
            .any(|field| field.matches(snippet, needle)),
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `field:value` unit of a query. The value is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub field: FieldTag,
    pub value: String,
}

impl Term {
    pub fn new(field: FieldTag, value: &str) -> Self {
        Self {
            field,
            value: value.to_lowercase(),
        }
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        self.field.matches(snippet, &self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
}

impl Query {
    pub fn parse(input: &str) -> Self {
        let terms = tokenize(input).into_iter().map(parse_term).collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        self.terms.iter().all(|term| term.matches(snippet))
    }
}

impl FromStr for Query {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Query::parse(s))
    }
}

/// Keeps the snippets matching every term of `query`, in their original order.
pub fn filter_by_search(snippets: Vec<Snippet>, query: &str) -> Vec<Snippet> {
    let query = Query::parse(query);
    if query.is_empty() {
        return snippets;
    }
    snippets.into_iter().filter(|s| query.matches(s)).collect()
}

fn tokenize(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let end = token_end(rest);
        tokens.push(&rest[..end]);
        rest = &rest[end..];
    }
    tokens
}

/// Byte length of the token at the start of `s` (which has no leading whitespace).
fn token_end(s: &str) -> usize {
    let bare_end = s.find(char::is_whitespace).unwrap_or(s.len());

    if let Some(colon) = field_prefix_len(s) {
        if let Some(quoted) = s[colon + 1..].strip_prefix('"') {
            let value_start = colon + 2;
            return match quoted.find('"') {
                Some(0) => bare_end,
                Some(close) => value_start + close + 1,
                None => bare_end,
            };
        }
    }
    bare_end
}

/// Position of the `:` when `s` starts with a word-character field name.
fn field_prefix_len(s: &str) -> Option<usize> {
    let colon = s.find(':')?;
    let name = &s[..colon];
    let is_word = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_word.then_some(colon)
}

fn parse_term(token: &str) -> Term {
    match token.split_once(':') {
        Some((name, value)) => match FieldTag::from_name(name) {
            Some(field) => Term::new(field, strip_quotes(value)),
            None => Term::new(FieldTag::All, token),
        },
        None => Term::new(FieldTag::All, strip_quotes(token)),
    }
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::sample;

    fn titles(snippets: &[Snippet]) -> Vec<&str> {
        snippets.iter().map(|s| s.title.as_str()).collect()
    }

    fn snippet(title: &str, code: &str) -> Snippet {
        let mut s = sample("1", title, "", &[], "2024-01-01");
        s.code = code.to_string();
        s
    }

    #[test]
    fn parses_fields_and_bare_words() {
        let query = Query::parse("title:Foo content:bar baz");
        assert_eq!(
            query.terms(),
            &[
                Term::new(FieldTag::Title, "foo"),
                Term::new(FieldTag::Content, "bar"),
                Term::new(FieldTag::All, "baz"),
            ]
        );
    }

    #[test]
    fn quoted_values_keep_spaces() {
        let query = Query::parse(r#"content:"use state" tag:react"#);
        assert_eq!(
            query.terms(),
            &[
                Term::new(FieldTag::Content, "use state"),
                Term::new(FieldTag::Tag, "react"),
            ]
        );
    }

    #[test]
    fn unclosed_quote_ends_at_whitespace() {
        let query = Query::parse(r#"title:"hello world"#);
        assert_eq!(
            query.terms(),
            &[
                Term::new(FieldTag::Title, "hello"),
                Term::new(FieldTag::All, "world"),
            ]
        );

        let matching = snippet("hello there", "world");
        let other = snippet("hello world", "");
        let result = filter_by_search(vec![matching, other], r#"title:"hello world"#);
        assert_eq!(titles(&result), vec!["hello there", "hello world"]);
        let result = filter_by_search(vec![snippet("hello there", "")], r#"title:"hello world"#);
        assert!(result.is_empty());
    }

    #[test]
    fn embedded_quote_ends_the_value() {
        let query = Query::parse(r#"title:"say "hi"""#);
        assert_eq!(
            query.terms(),
            &[
                Term::new(FieldTag::Title, "say "),
                Term::new(FieldTag::All, "hi\""),
            ]
        );
    }

    #[test]
    fn one_quote_is_stripped_from_each_end() {
        assert_eq!(Query::parse(r#""word""#).terms(), &[Term::new(FieldTag::All, "word")]);
        assert_eq!(Query::parse("title:foo\"").terms(), &[Term::new(FieldTag::Title, "foo")]);
        assert_eq!(Query::parse(r#"title:"""#).terms(), &[Term::new(FieldTag::Title, "")]);
    }

    #[test]
    fn field_names_are_case_insensitive_and_tags_alias() {
        let query = Query::parse("TITLE:x Tags:y tag:z Language:Go");
        let fields: Vec<_> = query.terms().iter().map(|t| t.field).collect();
        assert_eq!(
            fields,
            vec![FieldTag::Title, FieldTag::Tag, FieldTag::Tag, FieldTag::Language]
        );
    }

    #[test]
    fn unknown_field_is_a_bare_word() {
        let query = Query::parse("http://example.com");
        assert_eq!(query.terms(), &[Term::new(FieldTag::All, "http://example.com")]);
    }

    #[test]
    fn unknown_field_keeps_quotes_literally() {
        let query = Query::parse(r#"foo:"a b" next"#);
        assert_eq!(
            query.terms(),
            &[
                Term::new(FieldTag::All, r#"foo:"a b""#),
                Term::new(FieldTag::All, "next"),
            ]
        );
        let literal = snippet("x", r#"let foo:"a b" next"#);
        let loose = snippet("y", "a b next");
        let result = filter_by_search(vec![literal, loose], r#"foo:"a b" next"#);
        assert_eq!(titles(&result), vec!["x"]);
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(Query::parse("   \t ").is_empty());
        let all = vec![snippet("a", ""), snippet("b", "")];
        assert_eq!(filter_by_search(all.clone(), "  "), all);
    }

    #[test]
    fn terms_combine_with_and() {
        let snippets = vec![
            snippet("foo service", "let bar = 1;"),
            snippet("foo only", "nothing here"),
            snippet("other", "bar"),
        ];
        let result = filter_by_search(snippets, "title:foo content:bar");
        assert_eq!(titles(&result), vec!["foo service"]);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let snippets = vec![snippet("ReactHooks", "")];
        assert_eq!(filter_by_search(snippets.clone(), "title:hook").len(), 1);
        assert_eq!(filter_by_search(snippets, "title:HOOKS").len(), 1);
    }

    #[test]
    fn description_field_handles_missing_description() {
        let plain = snippet("a", "");
        let described = snippet("b", "").with_description("Parses CSV rows");
        let result = filter_by_search(vec![plain, described], "description:csv");
        assert_eq!(titles(&result), vec!["b"]);
    }

    #[test]
    fn tag_matches_any_tag_substring() {
        let mut tagged = snippet("tagged", "");
        tagged.tags = vec!["database".into(), "sqlite".into()];
        let untagged = snippet("untagged", "");
        let result = filter_by_search(vec![tagged, untagged], "tag:lite");
        assert_eq!(titles(&result), vec!["tagged"]);
    }

    #[test]
    fn language_field_matches_substring() {
        let mut ts = snippet("ts", "");
        ts.language = "TypeScript".into();
        let mut js = snippet("js", "");
        js.language = "JavaScript".into();
        let result = filter_by_search(vec![ts, js], "language:script");
        assert_eq!(result.len(), 2);
        let result = filter_by_search(result, "language:type");
        assert_eq!(titles(&result), vec!["ts"]);
    }

    #[test]
    fn bare_word_searches_every_field() {
        let mut by_lang = snippet("one", "");
        by_lang.language = "Elixir".into();
        let mut by_tag = snippet("two", "");
        by_tag.tags = vec!["elixir-phoenix".into()];
        let by_code = snippet("three", "defmodule Elixir.Foo");
        let by_desc = snippet("four", "").with_description("an elixir helper");
        let none = snippet("five", "nothing");

        let result = filter_by_search(vec![by_lang, by_tag, by_code, by_desc, none], "ELIXIR");
        assert_eq!(titles(&result), vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn query_from_str() {
        let query: Query = "title:x".parse().unwrap();
        assert_eq!(query.terms().len(), 1);
    }
}
