#![forbid(unsafe_code)]

//! Filter patterns and per-column filter/compare strategies.
//!
//! User filter text is taken literally except for `*`, which matches any
//! run of characters. Matching is case-insensitive and unanchored, so
//! `"jo*n"` finds both "Johnson" and "Jordan" and `"a.b"` does not match
//! "axb".
//!
//! Columns may supply a [`CellFilter`] or [`CellComparator`] to work on the
//! bound domain element instead of the rendered text. Plain closures
//! implement both traits.

use std::cmp::Ordering;
use std::fmt;

use regex::{Regex, RegexBuilder};

/// A compiled filter term.
#[derive(Clone)]
pub struct FilterPattern {
    text: String,
    regex: Regex,
}

impl FilterPattern {
    /// Compile `text`. Empty text means "no filter" and yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let wildcard = regex::escape(text).replace(r"\*", ".*");
        let regex = RegexBuilder::new(&wildcard)
            .case_insensitive(true)
            .build()
            .ok()?;
        Some(Self {
            text: text.to_owned(),
            regex,
        })
    }

    /// The filter text as typed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for FilterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterPattern").field(&self.text).finish()
    }
}

impl PartialEq for FilterPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

/// Decides whether a cell matches a filter term.
pub trait CellFilter<T> {
    /// `element` is the row's bound element, `text` the cell's rendered text.
    fn matches(&self, element: Option<&T>, text: &str, pattern: &FilterPattern) -> bool;
}

impl<T, F> CellFilter<T> for F
where
    F: Fn(Option<&T>, &str, &FilterPattern) -> bool,
{
    fn matches(&self, element: Option<&T>, text: &str, pattern: &FilterPattern) -> bool {
        self(element, text, pattern)
    }
}

/// Orders two cells of the same column.
pub trait CellComparator<T> {
    fn compare(&self, a: Option<&T>, b: Option<&T>, text_a: &str, text_b: &str) -> Ordering;
}

impl<T, F> CellComparator<T> for F
where
    F: Fn(Option<&T>, Option<&T>, &str, &str) -> Ordering,
{
    fn compare(&self, a: Option<&T>, b: Option<&T>, text_a: &str, text_b: &str) -> Ordering {
        self(a, b, text_a, text_b)
    }
}

/// Default filter: matches the pattern against the rendered text.
/// Empty text never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFilter;

impl<T> CellFilter<T> for TextFilter {
    fn matches(&self, _element: Option<&T>, text: &str, pattern: &FilterPattern) -> bool {
        !text.is_empty() && pattern.is_match(text)
    }
}

/// Default comparator: case-insensitive text order, raw text as tie-break.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextComparator;

impl<T> CellComparator<T> for TextComparator {
    fn compare(&self, _a: Option<&T>, _b: Option<&T>, text_a: &str, text_b: &str) -> Ordering {
        let folded = text_a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(text_b.chars().flat_map(char::to_lowercase));
        folded.then_with(|| text_a.cmp(text_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(text: &str) -> FilterPattern {
        FilterPattern::parse(text).unwrap()
    }

    #[test]
    fn empty_text_is_no_filter() {
        assert!(FilterPattern::parse("").is_none());
    }

    #[test]
    fn wildcard_spans_characters() {
        let p = pattern("Jo*n");
        assert!(p.is_match("Johnson"));
        assert!(p.is_match("Jordan"));
        assert!(p.is_match("Jon"));
        assert!(!p.is_match("Jackson"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = pattern("a.b");
        assert!(p.is_match("a.b"));
        assert!(!p.is_match("axb"));

        let p = pattern("(1+1)");
        assert!(p.is_match("sum (1+1) = 2"));
        assert!(!p.is_match("11"));
    }

    #[test]
    fn matching_ignores_case_and_position() {
        let p = pattern("LOVE");
        assert!(p.is_match("Ada Lovelace"));
    }

    #[test]
    fn text_filter_rejects_empty_cells() {
        let p = pattern("*");
        assert!(CellFilter::<()>::matches(&TextFilter, None, "x", &p));
        assert!(!CellFilter::<()>::matches(&TextFilter, None, "", &p));
    }

    #[test]
    fn text_comparator_folds_case() {
        let cmp = |a: &str, b: &str| CellComparator::<()>::compare(&TextComparator, None, None, a, b);
        assert_eq!(cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(cmp("Banana", "apple"), Ordering::Greater);
        assert_eq!(cmp("same", "same"), Ordering::Equal);
        assert_ne!(cmp("Same", "same"), Ordering::Equal);
    }

    #[test]
    fn closures_are_strategies() {
        let by_len = |a: Option<&String>, b: Option<&String>, _: &str, _: &str| {
            a.map(String::len).cmp(&b.map(String::len))
        };
        let a = "xx".to_string();
        let b = "y".to_string();
        assert_eq!(by_len.compare(Some(&a), Some(&b), "", ""), Ordering::Greater);
    }
}
