//! Collaborators consulted while paginating.

use std::collections::BTreeMap;

use axum::http::Uri;

use common::{RepositoryConfig, DEFAULT_PAGE_NUMBER, PAGE_QUERY_PARAMETER};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of the page size used when a caller passes no limit.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PageSizeSource: Send + Sync {
    fn default_page_size(&self) -> u64;
}

impl PageSizeSource for RepositoryConfig {
    fn default_page_size(&self) -> u64 {
        self.pagination.limit
    }
}

/// Read access to the request a repository is serving.
///
/// Paginators copy these parameters into their page links so filters
/// survive navigation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait QueryParameters: Send + Sync {
    /// Decoded query-string parameters.
    fn query_parameters(&self) -> BTreeMap<String, String>;

    /// Path that page links point at.
    fn path(&self) -> String;
}

impl QueryParameters for Uri {
    fn query_parameters(&self) -> BTreeMap<String, String> {
        self.query()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn path(&self) -> String {
        Uri::path(self).to_string()
    }
}

/// Fixed parameters, for callers without an HTTP request. Links are relative.
impl QueryParameters for BTreeMap<String, String> {
    fn query_parameters(&self) -> BTreeMap<String, String> {
        self.clone()
    }

    fn path(&self) -> String {
        String::new()
    }
}

/// Page requested through the `page` parameter, falling back to the first page.
pub fn current_page(parameters: &BTreeMap<String, String>) -> u64 {
    parameters
        .get(PAGE_QUERY_PARAMETER)
        .and_then(|page| page.trim().parse::<u64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(DEFAULT_PAGE_NUMBER)
}
