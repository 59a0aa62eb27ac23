//! Generic data-access layer over sea-orm entities.
//!
//! A [`Repository`] wraps one entity type and layers reusable
//! [`Criterion`]s, a one-shot scope and request-aware pagination on top of
//! sea-orm's query builder.
//!
//! ```ignore
//! let mut members = Repository::<member::Entity>::new(db)
//!     .with_page_size_source(RepositoryConfig::from_env())
//!     .with_request(uri);
//!
//! members.push_criteria(ActiveOnly);
//! let page = members.paginate(None, PaginationMethod::LengthAware).await?;
//! ```

pub mod attributes;
pub mod conditions;
pub mod criteria;
pub mod factory;
pub mod macros;
pub mod pagination;
pub mod repository;
pub mod request;
pub mod visibility;

#[cfg(test)]
mod testing;

pub use attributes::Attributes;
pub use conditions::{Clause, Conditions, Operator};
pub use criteria::{CriteriaList, Criterion, CriterionEntry};
pub use factory::{primary_column, resolve_column, EntityFactory, ModelFactory, SoftDeleteFactory};
pub use macros::{MacroArgs, MacroHandler};
pub use pagination::{Paginated, PaginationLinks, PaginationMeta, PaginationMethod};
pub use repository::{PrimaryKeyValue, Repository, Scope};
pub use request::{current_page, PageSizeSource, QueryParameters};
pub use visibility::FieldVisibility;

pub use common::{RepositoryConfig, RepositoryError, RepositoryResult};

#[cfg(any(test, feature = "test-utils"))]
pub use request::{MockPageSizeSource, MockQueryParameters};
