use axum::http::Request;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::QueryError;
use crate::options::FilterOptions;
use crate::values::QueryValues;

/// `<field> <operator> <value>`. Multi-word operators are listed before the
/// operators they end with so the alternation never splits them.
static FILTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]+) (not like|not in|like|in|gte|gt|lte|lt|neq|eq) (.+)$")
        .expect("valid regex literal")
});

const SLICE_SEPARATOR: char = ',';

/// Comparison operators accepted in a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum FilterOperator {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "neq")]
    Neq,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "gte")]
    Gte,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "lte")]
    Lte,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "not like")]
    NotLike,
}

impl FilterOperator {
    /// The operator as written in the query string
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Like => "like",
            Self::NotLike => "not like",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "neq" => Ok(Self::Neq),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "in" => Ok(Self::In),
            "not in" => Ok(Self::NotIn),
            "like" => Ok(Self::Like),
            "not like" => Ok(Self::NotLike),
            _ => Err(QueryError::invalid_value(s, "operator")),
        }
    }
}

/// A single flat filter condition.
///
/// The value is kept as the raw text from the query string. Use the typed
/// accessors to convert it when building the actual query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct Filter {
    /// Field to filter on
    pub field: String,
    /// Comparison operator
    pub operator: FilterOperator,
    /// Value to filter by
    pub value: String,
}

fn parse_bool(value: &str) -> Result<bool, QueryError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(QueryError::invalid_value(value, "boolean")),
    }
}

fn parse_int(value: &str) -> Result<i64, QueryError> {
    value
        .parse()
        .map_err(|_| QueryError::invalid_value(value, "integer"))
}

fn parse_f32(value: &str) -> Result<f32, QueryError> {
    value
        .parse()
        .map_err(|_| QueryError::invalid_value(value, "float"))
}

fn parse_f64(value: &str) -> Result<f64, QueryError> {
    value
        .parse()
        .map_err(|_| QueryError::invalid_value(value, "float"))
}

fn parse_uuid(value: &str) -> Result<Uuid, QueryError> {
    Uuid::parse_str(value).map_err(|_| QueryError::invalid_value(value, "uuid"))
}

impl Filter {
    /// Split the value on commas and convert each part.
    fn slice<T>(&self, parse: fn(&str) -> Result<T, QueryError>) -> Result<Vec<T>, QueryError> {
        self.value.split(SLICE_SEPARATOR).map(parse).collect()
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] if the value is not a boolean literal.
    pub fn bool_value(&self) -> Result<bool, QueryError> {
        parse_bool(&self.value)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] on the first element that is not a boolean literal.
    pub fn bool_slice(&self) -> Result<Vec<bool>, QueryError> {
        self.slice(parse_bool)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] if the value is not an integer.
    pub fn int_value(&self) -> Result<i64, QueryError> {
        parse_int(&self.value)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] on the first element that is not an integer.
    pub fn int_slice(&self) -> Result<Vec<i64>, QueryError> {
        self.slice(parse_int)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] if the value is not a number.
    pub fn f32_value(&self) -> Result<f32, QueryError> {
        parse_f32(&self.value)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] on the first element that is not a number.
    pub fn f32_slice(&self) -> Result<Vec<f32>, QueryError> {
        self.slice(parse_f32)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] if the value is not a number.
    pub fn f64_value(&self) -> Result<f64, QueryError> {
        parse_f64(&self.value)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] on the first element that is not a number.
    pub fn f64_slice(&self) -> Result<Vec<f64>, QueryError> {
        self.slice(parse_f64)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] if the value is not a UUID.
    pub fn uuid_value(&self) -> Result<Uuid, QueryError> {
        parse_uuid(&self.value)
    }

    /// # Errors
    ///
    /// [`QueryError::InvalidValue`] on the first element that is not a UUID.
    pub fn uuid_slice(&self) -> Result<Vec<Uuid>, QueryError> {
        self.slice(parse_uuid)
    }

    /// The value split on commas. Never fails.
    #[must_use]
    pub fn string_slice(&self) -> Vec<&str> {
        self.value.split(SLICE_SEPARATOR).collect()
    }
}

/// Ordered list of filters, in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Filters(Vec<Filter>);

impl Filters {
    /// Filters for `field` only, preserving their original order.
    #[must_use]
    pub fn field(&self, field: &str) -> Self {
        self.iter().filter(|f| f.field == field).cloned().collect()
    }

    /// Filters for any of `fields`, preserving their original order.
    #[must_use]
    pub fn fields(&self, fields: &[&str]) -> Self {
        self.iter()
            .filter(|f| fields.contains(&f.field.as_str()))
            .cloned()
            .collect()
    }

    /// Whether any filter targets `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.iter().any(|f| f.field == field)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Filter> {
        self.0
    }
}

impl Deref for Filters {
    type Target = [Filter];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Filter> for Filters {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Filters {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn parse_filter(raw: &str) -> Result<Filter, QueryError> {
    let captures = FILTER_PATTERN
        .captures(raw)
        .ok_or_else(|| QueryError::InvalidFilter {
            value: raw.to_string(),
        })?;

    Ok(Filter {
        field: captures[1].to_string(),
        operator: captures[2].parse()?,
        value: captures[3].to_string(),
    })
}

/// Parse query values into [`Filters`].
///
/// Returns `Ok(None)` when the filter key is not present at all, so callers can
/// tell "no filter parameter" apart from an empty result.
///
/// # Errors
///
/// - [`QueryError::TooManyFilters`] if more values than `max_filters` were
///   supplied, checked before any value is validated
/// - [`QueryError::InvalidFilter`] for the first value not matching
///   `<field> <operator> <value>`
pub fn read_filters(
    values: &QueryValues,
    options: &FilterOptions,
) -> Result<Option<Filters>, QueryError> {
    let key = options.key();
    if !values.has(key) {
        return Ok(None);
    }

    let raw = values.get_all(key);
    if options.max_filters > 0 && raw.len() > options.max_filters {
        return Err(QueryError::TooManyFilters {
            count: raw.len(),
            max: options.max_filters,
        });
    }

    raw.iter()
        .map(|value| parse_filter(value))
        .collect::<Result<Filters, _>>()
        .map(Some)
}

/// Parse a request's query string into [`Filters`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_filters`].
pub fn read_request_filters<B>(
    req: &Request<B>,
    options: &FilterOptions,
) -> Result<Option<Filters>, QueryError> {
    read_filters(&QueryValues::from_request(req)?, options)
}

/// Parse a query string literal into [`Filters`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_filters`].
pub fn read_string_filters(
    query: &str,
    options: &FilterOptions,
) -> Result<Option<Filters>, QueryError> {
    read_filters(&QueryValues::parse(query)?, options)
}
