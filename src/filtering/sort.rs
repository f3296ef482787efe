use axum::http::Request;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::errors::QueryError;
use crate::options::SortOptions;
use crate::values::QueryValues;

static SORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9]+) (asc|desc)$").expect("valid regex literal"));

/// Direction in which to sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Asc)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::invalid_value(s, "sort direction")),
        }
    }
}

/// Sort order on one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct Sort {
    /// Field by which to sort
    pub field: String,
    /// Direction in which to sort
    pub direction: SortDirection,
}

/// Ordered list of sorts, most significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Sorts(Vec<Sort>);

impl Sorts {
    /// Sorts for `field` only, preserving their original order.
    #[must_use]
    pub fn field(&self, field: &str) -> Self {
        self.iter().filter(|s| s.field == field).cloned().collect()
    }

    /// Sorts for any of `fields`, preserving their original order.
    #[must_use]
    pub fn fields(&self, fields: &[&str]) -> Self {
        self.iter()
            .filter(|s| fields.contains(&s.field.as_str()))
            .cloned()
            .collect()
    }

    /// Whether any sort targets `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.iter().any(|s| s.field == field)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Sort> {
        self.0
    }
}

impl Deref for Sorts {
    type Target = [Sort];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Sort> for Sorts {
    fn from_iter<I: IntoIterator<Item = Sort>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Sorts {
    type Item = Sort;
    type IntoIter = std::vec::IntoIter<Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sorts {
    type Item = &'a Sort;
    type IntoIter = std::slice::Iter<'a, Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn parse_sort(raw: &str) -> Result<Sort, QueryError> {
    let captures = SORT_PATTERN
        .captures(raw)
        .ok_or_else(|| QueryError::InvalidSort {
            value: raw.to_string(),
        })?;

    Ok(Sort {
        field: captures[1].to_string(),
        direction: captures[2].parse()?,
    })
}

/// Parse query values into [`Sorts`].
///
/// Returns `Ok(None)` when the sort key is not present at all.
///
/// # Errors
///
/// - [`QueryError::TooManySorts`] if more values than `max_sorts` were supplied
/// - [`QueryError::InvalidSort`] for the first value not matching `<field> asc|desc`
pub fn read_sorts(
    values: &QueryValues,
    options: &SortOptions,
) -> Result<Option<Sorts>, QueryError> {
    let key = options.key();
    if !values.has(key) {
        return Ok(None);
    }

    let raw = values.get_all(key);
    if options.max_sorts > 0 && raw.len() > options.max_sorts {
        return Err(QueryError::TooManySorts {
            count: raw.len(),
            max: options.max_sorts,
        });
    }

    raw.iter()
        .map(|value| parse_sort(value))
        .collect::<Result<Sorts, _>>()
        .map(Some)
}

/// Parse a request's query string into [`Sorts`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_sorts`].
pub fn read_request_sorts<B>(
    req: &Request<B>,
    options: &SortOptions,
) -> Result<Option<Sorts>, QueryError> {
    read_sorts(&QueryValues::from_request(req)?, options)
}

/// Parse a query string literal into [`Sorts`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_sorts`].
pub fn read_string_sorts(query: &str, options: &SortOptions) -> Result<Option<Sorts>, QueryError> {
    read_sorts(&QueryValues::parse(query)?, options)
}
