//! Repository configuration structures.

use std::env;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, ENV_PAGINATION_LIMIT};

/// Pagination configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Page size used when a caller does not ask for one
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Configuration shared by every repository instance.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl RepositoryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let limit = match env::var(ENV_PAGINATION_LIMIT) {
            Ok(raw) => Self::parse_limit(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    value = %raw,
                    "{} is not a positive integer, using default page size",
                    ENV_PAGINATION_LIMIT
                );
                DEFAULT_PAGE_SIZE
            }),
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Self {
            pagination: PaginationConfig { limit },
        }
    }

    /// Create a configuration with an explicit default page size.
    pub fn with_page_size(limit: u64) -> Self {
        Self {
            pagination: PaginationConfig { limit },
        }
    }

    fn parse_limit(raw: &str) -> Option<u64> {
        raw.trim().parse::<u64>().ok().filter(|limit| *limit > 0)
    }
}
