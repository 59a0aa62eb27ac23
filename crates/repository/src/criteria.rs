//! Criteria: reusable query filters applied in push order.
//!
//! A criterion is any type implementing [`Criterion`]. The registry keeps
//! the concrete type of every entry so that popping works by type: popping
//! with one instance removes every entry of that instance's type.

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

use sea_orm::{EntityTrait, Select};

use crate::repository::Repository;

/// A query transformation that can be pushed onto a repository.
///
/// `apply` receives the query as left by the previous criterion together
/// with the repository, and returns the query for the next one.
pub trait Criterion<E: EntityTrait>: Send + Sync + 'static {
    fn apply(&self, query: Select<E>, repository: &Repository<E>) -> Select<E>;
}

/// One registered criterion together with its type tag.
pub struct CriterionEntry<E: EntityTrait> {
    type_id: TypeId,
    type_name: &'static str,
    criterion: Arc<dyn Criterion<E>>,
}

impl<E: EntityTrait> CriterionEntry<E> {
    fn new<C: Criterion<E>>(criterion: C) -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: type_name::<C>(),
            criterion: Arc::new(criterion),
        }
    }

    /// Type tag used for pop-by-type matching.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name of the criterion, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True when the entry was pushed as a `C`.
    pub fn is<C: Criterion<E>>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }

    pub fn apply(&self, query: Select<E>, repository: &Repository<E>) -> Select<E> {
        self.criterion.apply(query, repository)
    }
}

impl<E: EntityTrait> Clone for CriterionEntry<E> {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            type_name: self.type_name,
            criterion: Arc::clone(&self.criterion),
        }
    }
}

impl<E: EntityTrait> fmt::Debug for CriterionEntry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriterionEntry")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Ordered list of active criteria. Duplicates are allowed.
pub struct CriteriaList<E: EntityTrait> {
    entries: Vec<CriterionEntry<E>>,
}

impl<E: EntityTrait> CriteriaList<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a criterion; it runs after everything already registered.
    pub fn push<C: Criterion<E>>(&mut self, criterion: C) {
        self.entries.push(CriterionEntry::new(criterion));
    }

    /// Remove every entry whose concrete type is `C`.
    ///
    /// Returns the number of entries removed.
    pub fn pop_type<C: Criterion<E>>(&mut self) -> usize {
        self.pop_type_id(TypeId::of::<C>())
    }

    fn pop_type_id(&mut self, type_id: TypeId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.type_id != type_id);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read-only view in application order.
    pub fn as_slice(&self) -> &[CriterionEntry<E>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CriterionEntry<E>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: EntityTrait> Default for CriteriaList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> fmt::Debug for CriteriaList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
