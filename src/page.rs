use axum::{
    extract::FromRequestParts,
    http::{Request, request::Parts},
};
use serde::Serialize;
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::errors::QueryError;
use crate::filtering::{
    Filters, Joins, Pagination, Sorts, read_filters, read_joins, read_pagination, read_sorts,
};
use crate::options::PageOptions;
use crate::values::QueryValues;

/// Pagination, filter, sort and join directives read from one query string.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Page {
    pub pagination: Pagination,
    pub filters: Option<Filters>,
    pub sorts: Option<Sorts>,
    pub joins: Option<Joins>,
}

/// Parse query values into a [`Page`].
///
/// The parsers run in a fixed order (pagination, filters, sorts, joins) and the
/// first error is returned. Pagination is always present on success; the other
/// parts are `None` when their key was not supplied.
///
/// # Errors
///
/// The first error returned by any of the four parsers.
pub fn read_page(values: &QueryValues, options: &PageOptions) -> Result<Page, QueryError> {
    Ok(Page {
        pagination: read_pagination(values, &options.pagination)?,
        filters: read_filters(values, &options.filter)?,
        sorts: read_sorts(values, &options.sort)?,
        joins: read_joins(values, &options.join)?,
    })
}

/// Parse a request's query string into a [`Page`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_page`].
pub fn read_request_page<B>(req: &Request<B>, options: &PageOptions) -> Result<Page, QueryError> {
    read_page(&QueryValues::from_request(req)?, options)
}

/// Parse a query string literal into a [`Page`].
///
/// # Errors
///
/// Decode errors, then the errors of [`read_page`].
pub fn read_string_page(query: &str, options: &PageOptions) -> Result<Page, QueryError> {
    read_page(&QueryValues::parse(query)?, options)
}

/// Extracts a [`Page`] from the request's query string.
///
/// Options are taken from a [`PageOptions`] request extension when one is
/// installed (for example with `axum::Extension`), otherwise the defaults apply.
///
/// ```rust,ignore
/// async fn list_recipes(page: Page) -> Json<Vec<Recipe>> { ... }
///
/// let app = Router::new()
///     .route("/recipes", get(list_recipes))
///     .layer(Extension(PageOptions::default()));
/// ```
impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = QueryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let values = QueryValues::from_uri(&parts.uri)?;
        match parts.extensions.get::<PageOptions>() {
            Some(options) => read_page(&values, options),
            None => read_page(&values, &PageOptions::default()),
        }
    }
}
