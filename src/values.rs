//! Multi-valued query parameters and query-string decoding.

use axum::http::{Request, Uri};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::collections::HashMap;

use crate::errors::QueryError;

/// Decoded query parameters.
///
/// The same key may appear several times; values under one key keep the order
/// in which they were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    inner: HashMap<String, Vec<String>>,
}

impl QueryValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query-string literal (without the leading `?`).
    ///
    /// Pairs are separated by `&`, `+` decodes to a space and a pair without `=`
    /// gets an empty value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Decode`] if a pair contains a `;` separator, a `%`
    /// that is not followed by two hex digits, or escapes that do not decode to
    /// valid UTF-8.
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let mut values = Self::new();

        for segment in query.split('&') {
            if segment.is_empty() {
                continue;
            }
            if segment.contains(';') {
                tracing::trace!(segment, "Semicolon separator in query string");
                return Err(QueryError::decode("invalid semicolon separator in query"));
            }
            check_escapes(segment)?;

            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            values.append(decode_component(key)?, decode_component(value)?);
        }

        Ok(values)
    }

    /// Decode the query component of a URI. A URI without a query yields no values.
    ///
    /// # Errors
    ///
    /// See [`QueryValues::parse`].
    pub fn from_uri(uri: &Uri) -> Result<Self, QueryError> {
        Self::parse(uri.query().unwrap_or_default())
    }

    /// Decode the query component of a request's URI.
    ///
    /// # Errors
    ///
    /// See [`QueryValues::parse`].
    pub fn from_request<B>(req: &Request<B>) -> Result<Self, QueryError> {
        Self::from_uri(req.uri())
    }

    /// Add a value under `key`, after any values already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Whether `key` was supplied at all, even with an empty value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// First value supplied under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values supplied under `key`, in input order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.append(key, value);
        }
        values
    }
}

/// Reject `%` sequences that are not followed by two hex digits.
fn check_escapes(segment: &str) -> Result<(), QueryError> {
    let bytes = segment.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                let escape = String::from_utf8_lossy(&bytes[i..end]);
                tracing::trace!(segment, %escape, "Invalid escape in query string");
                return Err(QueryError::decode(format!("invalid URL escape '{escape}'")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(())
}

/// Decode one key or value: `+` is a space, then percent escapes must form UTF-8.
fn decode_component(raw: &str) -> Result<String, QueryError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| {
            tracing::trace!(raw, "Invalid UTF-8 in query string");
            QueryError::decode("invalid UTF-8 in query string")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys_keep_order() {
        let values = QueryValues::parse("sort=b asc&limit=5&sort=a desc").unwrap();
        assert_eq!(values.get_all("sort"), ["b asc", "a desc"]);
        assert_eq!(values.get("limit"), Some("5"));
    }

    #[test]
    fn test_parse_decodes_plus_and_percent() {
        let values = QueryValues::parse("filter=title+eq+Spaghetti%20Bolognese").unwrap();
        assert_eq!(values.get("filter"), Some("title eq Spaghetti Bolognese"));
    }

    #[test]
    fn test_parse_key_without_value() {
        let values = QueryValues::parse("join").unwrap();
        assert!(values.has("join"));
        assert_eq!(values.get("join"), Some(""));
    }

    #[test]
    fn test_parse_empty_string() {
        let values = QueryValues::parse("").unwrap();
        assert!(values.is_empty());
        assert!(!values.has("limit"));
        assert!(values.get_all("limit").is_empty());
    }

    #[test]
    fn test_parse_skips_empty_pairs() {
        let values = QueryValues::parse("&&limit=1&").unwrap();
        assert_eq!(values.get("limit"), Some("1"));
    }

    #[test]
    fn test_parse_rejects_bad_escape() {
        let err = QueryValues::parse("filter=title eq %zz").unwrap_err();
        assert!(matches!(err, QueryError::Decode { .. }));

        let err = QueryValues::parse("limit=%4").unwrap_err();
        assert!(matches!(err, QueryError::Decode { .. }));
    }

    #[test]
    fn test_parse_rejects_semicolon() {
        let err = QueryValues::parse("limit=1;offset=2").unwrap_err();
        assert_eq!(err, QueryError::decode("invalid semicolon separator in query"));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let err = QueryValues::parse("filter=name+eq+%FF").unwrap_err();
        assert_eq!(err, QueryError::decode("invalid UTF-8 in query string"));

        let err = QueryValues::parse("%C3%28=x").unwrap_err();
        assert!(matches!(err, QueryError::Decode { .. }));
    }

    #[test]
    fn test_parse_decodes_multibyte_utf8() {
        let values = QueryValues::parse("filter=title+eq+cr%C3%A8me+br%C3%BBl%C3%A9e").unwrap();
        assert_eq!(values.get("filter"), Some("title eq crème brûlée"));
    }

    #[test]
    fn test_parse_value_keeps_later_equals() {
        let values = QueryValues::parse("filter=title+eq+a%3Db=c").unwrap();
        assert_eq!(values.get("filter"), Some("title eq a=b=c"));
    }

    #[test]
    fn test_from_uri_without_query() {
        let uri: Uri = "/recipes".parse().unwrap();
        assert!(QueryValues::from_uri(&uri).unwrap().is_empty());
    }

    #[test]
    fn test_from_request() {
        let req = Request::builder()
            .uri("/recipes?join=author&join=ingredient")
            .body(())
            .unwrap();
        let values = QueryValues::from_request(&req).unwrap();
        assert_eq!(values.get_all("join"), ["author", "ingredient"]);
    }

    #[test]
    fn test_from_iterator() {
        let values: QueryValues = [("sort", "title asc"), ("sort", "serves desc")]
            .into_iter()
            .collect();
        assert_eq!(values.get_all("sort"), ["title asc", "serves desc"]);
    }
}
