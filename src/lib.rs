//! Parse query-string parameters into filter, sort, pagination and join
//! directives for building a database query.
//!
//! ```rust,ignore
//! use querypage::{PageOptions, read_string_page};
//!
//! let query = "limit=10&page=3&filter=serves gte 4&sort=title asc";
//! let page = read_string_page(query, &PageOptions::default())?;
//! assert_eq!(page.pagination.offset, 20);
//! ```
//!
//! In an axum handler, take [`Page`] as an extractor:
//!
//! ```rust,ignore
//! async fn list_recipes(page: querypage::Page) -> impl IntoResponse { ... }
//! ```

pub mod errors;
pub mod filtering;
pub mod options;
pub mod page;
pub mod values;

pub use errors::QueryError;
pub use filtering::{Filter, FilterOperator, Filters, Joins, Pagination, Sort, SortDirection, Sorts};
pub use filtering::{
    read_filters, read_joins, read_pagination, read_request_filters, read_request_joins,
    read_request_pagination, read_request_sorts, read_sorts, read_string_filters,
    read_string_joins, read_string_pagination, read_string_sorts,
};
pub use options::{FilterOptions, JoinOptions, PageOptions, PaginationOptions, SortOptions};
pub use page::{Page, read_page, read_request_page, read_string_page};
pub use values::QueryValues;
