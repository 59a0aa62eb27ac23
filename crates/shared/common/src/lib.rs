//! Common utilities shared by the repository crates.
//!
//! This crate provides:
//! - Unified error handling (with HTTP conversion)
//! - Configuration structures
//! - Repository-wide constants

pub mod config;
pub mod constants;
pub mod error;

pub use config::*;
pub use constants::*;
pub use error::{OptionExt, RepositoryError, RepositoryResult};
