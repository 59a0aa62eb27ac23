//! Named extension operations registered per entity type.
//!
//! Registration is process-wide and keyed by the entity type, so every
//! `Repository<E>` sees the same table. The table starts empty and lives
//! for the whole process.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use sea_orm::{EntityName, EntityTrait};
use serde_json::Value as JsonValue;

use common::{RepositoryError, RepositoryResult};

use crate::repository::Repository;

/// Handler bound to a macro name.
pub type MacroHandler<E> =
    Arc<dyn Fn(&mut Repository<E>, MacroArgs<'_>) -> RepositoryResult<()> + Send + Sync>;

type MacroTable = HashMap<TypeId, HashMap<String, Box<dyn Any + Send + Sync>>>;

static MACROS: Lazy<RwLock<MacroTable>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Arguments of a macro call with typed accessors.
///
/// Accessors fail with a configuration error naming the macro, so a
/// handler can use `?` on malformed calls.
#[derive(Debug, Clone, Copy)]
pub struct MacroArgs<'a> {
    name: &'a str,
    values: &'a [JsonValue],
}

impl<'a> MacroArgs<'a> {
    pub fn new(name: &'a str, values: &'a [JsonValue]) -> Self {
        Self { name, values }
    }

    /// Name the macro was called with.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn as_slice(&self) -> &'a [JsonValue] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> RepositoryResult<&'a JsonValue> {
        self.values.get(index).ok_or_else(|| {
            RepositoryError::configuration(format!(
                "macro {} expects an argument at position {}",
                self.name, index
            ))
        })
    }

    pub fn str(&self, index: usize) -> RepositoryResult<&'a str> {
        self.get(index)?
            .as_str()
            .ok_or_else(|| self.mistyped(index, "a string"))
    }

    pub fn bool(&self, index: usize) -> RepositoryResult<bool> {
        self.get(index)?
            .as_bool()
            .ok_or_else(|| self.mistyped(index, "a boolean"))
    }

    pub fn i64(&self, index: usize) -> RepositoryResult<i64> {
        self.get(index)?
            .as_i64()
            .ok_or_else(|| self.mistyped(index, "an integer"))
    }

    fn mistyped(&self, index: usize, expected: &str) -> RepositoryError {
        RepositoryError::configuration(format!(
            "macro {} expects {} at position {}",
            self.name, expected, index
        ))
    }
}

impl<E: EntityTrait> Repository<E> {
    /// Register `name` for every repository of `E`, replacing any previous binding.
    pub fn register_macro<F>(name: impl Into<String>, handler: F)
    where
        F: Fn(&mut Repository<E>, MacroArgs<'_>) -> RepositoryResult<()> + Send + Sync + 'static,
    {
        let name = name.into();
        let handler: MacroHandler<E> = Arc::new(handler);

        let entity = E::default();
        tracing::debug!(
            table = entity.table_name(),
            name = %name,
            "Repository macro registered"
        );

        MACROS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .insert(name, Box::new(handler));
    }

    /// Whether `name` is registered for `E`.
    pub fn has_macro(name: &str) -> bool {
        Self::lookup_macro(name).is_some()
    }

    /// Remove every macro registered for `E`.
    pub fn flush_macros() {
        MACROS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&TypeId::of::<E>());
    }

    /// Invoke a registered macro on this repository.
    pub fn call(&mut self, name: &str, args: &[JsonValue]) -> RepositoryResult<&mut Self> {
        let handler = Self::lookup_macro(name)
            .ok_or_else(|| RepositoryError::unknown_operation(name))?;

        handler(&mut *self, MacroArgs::new(name, args))?;
        Ok(self)
    }

    fn lookup_macro(name: &str) -> Option<MacroHandler<E>> {
        // Clone the handler out so the lock is released before it runs.
        MACROS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())?
            .get(name)?
            .downcast_ref::<MacroHandler<E>>()
            .cloned()
    }
}
