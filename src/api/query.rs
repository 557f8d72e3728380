use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::models::{FilterSelections, QuizAnswers};

/// Path of the public product search endpoint
pub const PRODUCTS_PATH: &str = "/api/products/public/";

// Characters left as-is in query keys and values (RFC 3986 unreserved)
const QUERY_ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Ordered query parameters for the product search.
///
/// Keys may repeat; the backend reads repeated facet keys as a list of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    params: Vec<(String, String)>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter; blank values are skipped
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.params.push((key.into(), value));
        }
    }

    /// Query built from quiz answers (recognized keys only, canonical order)
    pub fn from_answers(answers: &QuizAnswers) -> Self {
        let mut query = Self::new();
        for (key, value) in answers.iter() {
            query.push(key.as_str(), value);
        }
        query
    }

    /// Append every selected value of every field
    pub fn extend_selections(&mut self, selections: &FilterSelections) {
        for (field, values) in selections {
            for value in values {
                self.push(field.as_str(), value.as_str());
            }
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Percent-encoded `key=value&...` string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_ENCODE_SET),
                    utf8_percent_encode(value, QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Endpoint path plus query string; no `?` when there are no parameters
    pub fn path_and_query(&self) -> String {
        if self.params.is_empty() {
            PRODUCTS_PATH.to_string()
        } else {
            format!("{}?{}", PRODUCTS_PATH, self.to_query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::QuizKey;

    #[test]
    fn test_from_answers_canonical_order() {
        let mut answers = QuizAnswers::new();
        answers.set(QuizKey::Age, "adult");
        answers.set(QuizKey::Species, "dog");

        let query = ProductQuery::from_answers(&answers);
        assert_eq!(query.path_and_query(), "/api/products/public/?species=dog&age=adult");
    }

    #[test]
    fn test_empty_query_has_no_question_mark() {
        assert_eq!(ProductQuery::new().path_and_query(), "/api/products/public/");
    }

    #[test]
    fn test_push_skips_blank_values() {
        let mut query = ProductQuery::new();
        query.push("search_name", "   ");
        query.push("sort", "");
        assert!(query.is_empty());
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let mut query = ProductQuery::new();
        query.push("search_name", "корм для собак & co");
        let encoded = query.to_query_string();

        assert!(encoded.starts_with("search_name="));
        assert!(!encoded.contains(' '));
        assert!(encoded.contains("%26"));
        assert!(!encoded[12..].contains('&'));
    }

    #[test]
    fn test_extend_selections_repeats_keys() {
        let mut selections = FilterSelections::new();
        selections.insert("brand".to_string(), BTreeSet::from(["1".to_string(), "3".to_string()]));

        let mut query = ProductQuery::new();
        query.extend_selections(&selections);
        assert_eq!(query.to_query_string(), "brand=1&brand=3");
        assert_eq!(query.get("brand"), Some("1"));
    }
}
