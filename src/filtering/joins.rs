//! Join instructions.
//!
//! A join is a simplified instruction that should generally be read as "include
//! the related entity Y with entity X". Relation names are lowercase
//! alphanumeric and collected into a set.

use axum::http::Request;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::errors::QueryError;
use crate::options::JoinOptions;
use crate::values::QueryValues;

static JOIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").expect("valid regex literal"));

/// Set of relation names to include. Inserting a name twice has no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Joins(BTreeSet<String>);

impl Joins {
    #[must_use]
    pub fn contains(&self, relation: &str) -> bool {
        self.0.contains(relation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Relation names in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Joins {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for Joins {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Parse query values into [`Joins`].
///
/// Returns `Ok(None)` when the join key is absent or no relation was collected.
///
/// # Errors
///
/// - [`QueryError::TooManyJoins`] if more values than `max_joins` were supplied,
///   counting duplicates
/// - [`QueryError::InvalidJoin`] for the first value that is not a lowercase
///   alphanumeric name
pub fn read_joins(
    values: &QueryValues,
    options: &JoinOptions,
) -> Result<Option<Joins>, QueryError> {
    let key = options.key();
    if !values.has(key) {
        return Ok(None);
    }

    let raw = values.get_all(key);
    if options.max_joins > 0 && raw.len() > options.max_joins {
        return Err(QueryError::TooManyJoins {
            count: raw.len(),
            max: options.max_joins,
        });
    }

    let mut joins = BTreeSet::new();
    for relation in raw {
        if !JOIN_PATTERN.is_match(relation) {
            return Err(QueryError::InvalidJoin {
                value: relation.clone(),
            });
        }
        joins.insert(relation.clone());
    }

    if joins.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Joins(joins)))
    }
}

/// Parse a request's query string into [`Joins`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_joins`].
pub fn read_request_joins<B>(
    req: &Request<B>,
    options: &JoinOptions,
) -> Result<Option<Joins>, QueryError> {
    read_joins(&QueryValues::from_request(req)?, options)
}

/// Parse a query string literal into [`Joins`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_joins`].
pub fn read_string_joins(query: &str, options: &JoinOptions) -> Result<Option<Joins>, QueryError> {
    read_joins(&QueryValues::parse(query)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(query: &str) -> Result<Option<Joins>, QueryError> {
        read_string_joins(query, &JoinOptions::default())
    }

    #[test]
    fn test_absent_key_is_none() {
        assert_eq!(read("").unwrap(), None);
        assert_eq!(read("limit=10").unwrap(), None);
    }

    #[test]
    fn test_joins_are_a_set() {
        let joins = read("join=author&join=ingredient").unwrap().unwrap();
        let expected: Joins = ["ingredient", "author"].into_iter().collect();
        assert_eq!(joins, expected);
        assert!(joins.contains("author"));
        assert!(joins.contains("ingredient"));
        assert!(!joins.contains("review"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let joins = read("join=author&join=author").unwrap().unwrap();
        assert_eq!(joins.len(), 1);
        assert_eq!(joins.iter().collect::<Vec<_>>(), vec!["author"]);
    }

    #[test]
    fn test_invalid_joins() {
        for raw in ["Author", "author name", "author_id", "author-x"] {
            let err = read(&format!("join={}", raw.replace(' ', "+"))).unwrap_err();
            assert_eq!(err, QueryError::InvalidJoin { value: raw.to_string() });
        }
    }

    #[test]
    fn test_empty_join_value_is_invalid() {
        assert_eq!(
            read("join=").unwrap_err(),
            QueryError::InvalidJoin { value: String::new() }
        );
    }

    #[test]
    fn test_too_many_joins_counts_duplicates() {
        let options = JoinOptions {
            max_joins: 1,
            ..Default::default()
        };
        let err = read_string_joins("join=author&join=author", &options).unwrap_err();
        assert_eq!(err, QueryError::TooManyJoins { count: 2, max: 1 });
    }

    #[test]
    fn test_custom_key() {
        let options = JoinOptions {
            key: "include".to_string(),
            max_joins: 3,
        };
        let joins = read_string_joins("include=author&join=ignored", &options)
            .unwrap()
            .unwrap();
        assert_eq!(joins.into_iter().collect::<Vec<_>>(), vec!["author".to_string()]);
    }

    #[test]
    fn test_request_entry_point() {
        let req = Request::builder()
            .uri("/recipes?join=ingredient&join=author&join=ingredient")
            .body(())
            .unwrap();
        let joins = read_request_joins(&req, &JoinOptions::default()).unwrap();
        assert_eq!(joins, read("join=author&join=ingredient").unwrap());
    }

    #[test]
    fn test_request_invalid_join() {
        let req = Request::builder()
            .uri("/recipes?join=Author")
            .body(())
            .unwrap();
        let err = read_request_joins(&req, &JoinOptions::default()).unwrap_err();
        assert_eq!(err, QueryError::InvalidJoin { value: "Author".to_string() });
    }
}
