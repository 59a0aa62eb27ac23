//! Repository-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page (`repository.pagination.limit`)
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Query-string parameter holding the requested page
pub const PAGE_QUERY_PARAMETER: &str = "page";

// =============================================================================
// Environment
// =============================================================================

/// Overrides the default page size
pub const ENV_PAGINATION_LIMIT: &str = "REPOSITORY_PAGINATION_LIMIT";

// =============================================================================
// Well-known columns
// =============================================================================

/// Boolean column toggled by the active-status helpers
pub const ACTIVE_COLUMN: &str = "is_active";

/// Timestamp column used for soft deletes
pub const DELETED_AT_COLUMN: &str = "deleted_at";
