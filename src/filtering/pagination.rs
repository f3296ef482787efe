use axum::http::Request;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::QueryError;
use crate::options::PaginationOptions;
use crate::values::QueryValues;

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Page size and offset for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    /// Maximum number of results in the page
    pub limit: i64,
    /// Results offset
    pub offset: i64,
    /// Page number. This is 0 if the query specified the offset directly.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: i64,
}

fn parse_non_negative(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().filter(|n| *n >= 0)
}

/// Parse query values into a [`Pagination`].
///
/// Both page and offset are supported. If both are provided the offset always
/// wins and `page` stays 0. If only a page is provided the offset is
/// `(page - 1) * limit`; zero and negative pages are passed through as-is.
///
/// # Errors
///
/// - [`QueryError::InvalidLimit`] / [`QueryError::InvalidOffset`] if the value is
///   not a non-negative integer
/// - [`QueryError::InvalidPage`] if the page is not an integer or the offset
///   computation overflows
pub fn read_pagination(
    values: &QueryValues,
    options: &PaginationOptions,
) -> Result<Pagination, QueryError> {
    let limit = match values.get(options.limit_key()) {
        Some(raw) => parse_non_negative(raw).ok_or_else(|| QueryError::InvalidLimit {
            value: raw.to_string(),
        })?,
        None => 0,
    };
    let limit = options.clamp_limit(limit);

    if let Some(raw) = values.get(options.offset_key()) {
        let offset = parse_non_negative(raw).ok_or_else(|| QueryError::InvalidOffset {
            value: raw.to_string(),
        })?;
        return Ok(Pagination {
            limit,
            offset,
            page: 0,
        });
    }

    if let Some(raw) = values.get(options.page_key()) {
        let invalid = || QueryError::InvalidPage {
            value: raw.to_string(),
        };
        let page = raw.parse::<i64>().map_err(|_| invalid())?;
        let offset = page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(limit))
            .ok_or_else(invalid)?;
        return Ok(Pagination {
            limit,
            offset,
            page,
        });
    }

    Ok(Pagination {
        limit,
        offset: 0,
        page: 0,
    })
}

/// Parse a request's query string into a [`Pagination`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_pagination`].
pub fn read_request_pagination<B>(
    req: &Request<B>,
    options: &PaginationOptions,
) -> Result<Pagination, QueryError> {
    read_pagination(&QueryValues::from_request(req)?, options)
}

/// Parse a query string literal into a [`Pagination`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_pagination`].
pub fn read_string_pagination(
    query: &str,
    options: &PaginationOptions,
) -> Result<Pagination, QueryError> {
    read_pagination(&QueryValues::parse(query)?, options)
}
