//! # Query Directives
//!
//! Parsers that turn repeated query-string parameters into typed directives for
//! building a database query. Each parser is independent and has three entry
//! points: from decoded [`QueryValues`](crate::values::QueryValues), from a full
//! request, and from a raw query-string literal.
//!
//! ## Query Parameter Examples
//!
//! ### Filtering
//! ```text
//! GET /recipes?filter=title eq Spaghetti
//! GET /recipes?filter=serves gte 4&filter=title not like %25soup%25
//! GET /recipes?filter=id in 3,5,8
//! ```
//!
//! A filter is `<field> <operator> <value>`. The operator is one of `eq`, `neq`,
//! `gt`, `gte`, `lt`, `lte`, `in`, `not in`, `like`, `not like`. The value is
//! everything after the operator and may contain spaces and commas.
//!
//! ### Sorting
//! ```text
//! GET /recipes?sort=serves desc&sort=title asc
//! ```
//!
//! ### Pagination
//! ```text
//! GET /recipes?limit=10&offset=20
//! GET /recipes?limit=10&page=3
//! ```
//!
//! When both `offset` and `page` are given, `offset` wins.
//!
//! ### Joins
//! ```text
//! GET /recipes?join=author&join=ingredient
//! ```

pub mod conditions;
pub mod joins;
pub mod pagination;
pub mod sort;

pub use conditions::{
    Filter, FilterOperator, Filters, read_filters, read_request_filters, read_string_filters,
};
pub use joins::{Joins, read_joins, read_request_joins, read_string_joins};
pub use pagination::{Pagination, read_pagination, read_request_pagination, read_string_pagination};
pub use sort::{Sort, SortDirection, Sorts, read_request_sorts, read_sorts, read_string_sorts};
