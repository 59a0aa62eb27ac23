//! Paginated results and page-link generation.

use std::collections::BTreeMap;

use serde::Serialize;

use common::PAGE_QUERY_PARAMETER;

/// Which paginator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMethod {
    /// Counts all matching rows so the last page is known.
    #[default]
    LengthAware,
    /// Fetches one extra row instead of counting; no totals.
    Simple,
}

/// Largest row offset or limit a query may carry.
const MAX_ROWS: u64 = i64::MAX as u64;

/// Clamp a requested `(page, per_page)` so that the row offset
/// `(page - 1) * per_page` and the look-ahead limit `per_page + 1` both fit
/// in a signed 64-bit SQL parameter.
///
/// Pages past the clamp are far beyond any table, so they stay empty.
pub fn page_window(page: u64, per_page: u64) -> (u64, u64) {
    let per_page = per_page.clamp(1, MAX_ROWS - 1);
    let page = page.clamp(1, (MAX_ROWS / per_page).max(1));
    (page, per_page)
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
    pub links: PaginationLinks,
    /// Query parameters carried into every page link
    #[serde(skip)]
    appends: BTreeMap<String, String>,
    #[serde(skip)]
    path: String,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub per_page: u64,
    /// Unknown for simple pagination
    pub total: Option<u64>,
    pub last_page: Option<u64>,
    pub has_more_pages: bool,
}

/// Links to neighbouring pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    pub first: String,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl<T> Paginated<T> {
    /// Page of a paginator that knows the total row count.
    pub fn new(data: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        let last_page = if per_page > 0 {
            total.div_ceil(per_page).max(1)
        } else {
            1
        };

        Self::build(
            data,
            PaginationMeta {
                current_page,
                per_page,
                total: Some(total),
                last_page: Some(last_page),
                has_more_pages: current_page < last_page,
            },
        )
    }

    /// Page of a simple paginator.
    pub fn simple(data: Vec<T>, current_page: u64, per_page: u64, has_more_pages: bool) -> Self {
        Self::build(
            data,
            PaginationMeta {
                current_page,
                per_page,
                total: None,
                last_page: None,
                has_more_pages,
            },
        )
    }

    fn build(data: Vec<T>, meta: PaginationMeta) -> Self {
        let mut page = Self {
            data,
            meta,
            links: PaginationLinks::default(),
            appends: BTreeMap::new(),
            path: String::new(),
        };
        page.refresh_links();
        page
    }

    /// Base path of generated links.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self.refresh_links();
        self
    }

    /// Carry query parameters into every generated link.
    ///
    /// The page parameter itself is always replaced by the link's page.
    pub fn appends(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.appends.extend(parameters);
        self.appends.remove(PAGE_QUERY_PARAMETER);
        self.refresh_links();
        self
    }

    /// Parameters carried into links.
    pub fn appended(&self) -> &BTreeMap<String, String> {
        &self.appends
    }

    /// Link to an arbitrary page.
    pub fn url(&self, page: u64) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.appends {
            query.append_pair(key, value);
        }
        query.append_pair(PAGE_QUERY_PARAMETER, &page.max(1).to_string());

        format!("{}?{}", self.path, query.finish())
    }

    fn refresh_links(&mut self) {
        let current = self.meta.current_page;
        self.links = PaginationLinks {
            first: self.url(1),
            last: self.meta.last_page.map(|last| self.url(last)),
            prev: (current > 1).then(|| self.url(current - 1)),
            next: self.meta.has_more_pages.then(|| self.url(current + 1)),
        };
    }

    /// Map page items, keeping metadata and links.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
            links: self.links,
            appends: self.appends,
            path: self.path,
        }
    }
}
