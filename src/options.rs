//! Parser configuration.
//!
//! Every option struct has public fields, a [`Default`] matching the standard
//! parameter names, and implements [`serde::Deserialize`] with missing fields
//! defaulted, so it can be loaded from the host application's own config:
//!
//! ```rust,ignore
//! let options: PageOptions = serde_json::from_str(r#"{"filter": {"max_filters": 5}}"#)?;
//! ```
//!
//! An empty key falls back to the default key, and a limit of zero or less
//! disables that limit.

use serde::Deserialize;

pub const DEFAULT_LIMIT_KEY: &str = "limit";
pub const DEFAULT_OFFSET_KEY: &str = "offset";
pub const DEFAULT_PAGE_KEY: &str = "page";
pub const DEFAULT_FILTER_KEY: &str = "filter";
pub const DEFAULT_SORT_KEY: &str = "sort";
pub const DEFAULT_JOIN_KEY: &str = "join";

fn key_or<'a>(key: &'a str, default: &'a str) -> &'a str {
    if key.is_empty() { default } else { key }
}

/// Configures [`read_pagination`](crate::filtering::pagination::read_pagination).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    /// Query string key for limit
    pub limit_key: String,
    /// Query string key for offset
    pub offset_key: String,
    /// Query string key for page
    pub page_key: String,
    /// If this is > 0, the limit is clamped to this maximum
    pub max_limit: i64,
    /// The limit is raised to at least this value
    pub min_limit: i64,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            limit_key: DEFAULT_LIMIT_KEY.to_string(),
            offset_key: DEFAULT_OFFSET_KEY.to_string(),
            page_key: DEFAULT_PAGE_KEY.to_string(),
            max_limit: 0,
            min_limit: 0,
        }
    }
}

impl PaginationOptions {
    #[must_use]
    pub fn limit_key(&self) -> &str {
        key_or(&self.limit_key, DEFAULT_LIMIT_KEY)
    }

    #[must_use]
    pub fn offset_key(&self) -> &str {
        key_or(&self.offset_key, DEFAULT_OFFSET_KEY)
    }

    #[must_use]
    pub fn page_key(&self) -> &str {
        key_or(&self.page_key, DEFAULT_PAGE_KEY)
    }

    /// Apply the configured bounds to a limit.
    ///
    /// The maximum is checked first and only one bound is applied per call.
    #[must_use]
    pub fn clamp_limit(&self, limit: i64) -> i64 {
        let max = self.max_limit.max(0);
        let min = self.min_limit.max(0);

        if max > 0 && limit > max {
            max
        } else if limit < min {
            min
        } else {
            limit
        }
    }
}

/// Configures [`read_filters`](crate::filtering::conditions::read_filters).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Query string key
    pub key: String,
    /// If this is > 0, a maximum number of filters is imposed
    pub max_filters: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_FILTER_KEY.to_string(),
            max_filters: 0,
        }
    }
}

impl FilterOptions {
    #[must_use]
    pub fn key(&self) -> &str {
        key_or(&self.key, DEFAULT_FILTER_KEY)
    }
}

/// Configures [`read_sorts`](crate::filtering::sort::read_sorts).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// Query string key
    pub key: String,
    /// If this is > 0, a maximum number of sorts is imposed
    pub max_sorts: usize,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_SORT_KEY.to_string(),
            max_sorts: 0,
        }
    }
}

impl SortOptions {
    #[must_use]
    pub fn key(&self) -> &str {
        key_or(&self.key, DEFAULT_SORT_KEY)
    }
}

/// Configures [`read_joins`](crate::filtering::joins::read_joins).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    /// Query string key
    pub key: String,
    /// If this is > 0, a maximum number of joins is imposed
    pub max_joins: usize,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_JOIN_KEY.to_string(),
            max_joins: 0,
        }
    }
}

impl JoinOptions {
    #[must_use]
    pub fn key(&self) -> &str {
        key_or(&self.key, DEFAULT_JOIN_KEY)
    }
}

/// Configures [`read_page`](crate::page::read_page). Each part defaults independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    pub pagination: PaginationOptions,
    pub filter: FilterOptions,
    pub sort: SortOptions,
    pub join: JoinOptions,
}
