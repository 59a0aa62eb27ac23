//! Model factories: the source of fresh queries and blank entities.
//!
//! A repository never builds queries on its own. Every reset asks the
//! factory for a new [`Select`], so anything the factory bakes into that
//! query (for example "not soft-deleted") applies to every operation.

use std::marker::PhantomData;
use std::str::FromStr;

use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ColumnDef, ColumnTrait, ColumnType, EntityName, EntityTrait, IdenStatic,
    Iterable, PrimaryKeyToColumn, QueryFilter, Select, Value,
};

use common::{RepositoryError, RepositoryResult, DELETED_AT_COLUMN};

/// Produces fresh queries and new entity instances for one entity type.
pub trait ModelFactory<E: EntityTrait>: Send + Sync {
    /// A new, unfiltered query over the entity.
    fn new_query(&self) -> Select<E>;

    /// A new, empty entity ready for mass assignment.
    fn new_entity(&self) -> E::ActiveModel {
        <E::ActiveModel as ActiveModelBehavior>::new()
    }

    /// Column stamped by soft deletes, `None` when deletes are permanent.
    fn soft_delete_column(&self) -> Option<E::Column> {
        None
    }
}

/// Plain factory: `E::find()` and hard deletes.
pub struct EntityFactory<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> EntityFactory<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for EntityFactory<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> ModelFactory<E> for EntityFactory<E> {
    fn new_query(&self) -> Select<E> {
        E::find()
    }
}

/// Factory for entities with a nullable `deleted_at` timestamp.
///
/// Fresh queries exclude trashed rows and deletes stamp the column
/// instead of removing the row. The column may be a zoned or naive
/// timestamp, or a date.
pub struct SoftDeleteFactory<E: EntityTrait> {
    column: E::Column,
}

impl<E: EntityTrait> SoftDeleteFactory<E> {
    /// Use the conventional `deleted_at` column.
    pub fn new() -> RepositoryResult<Self> {
        Self::with_column(DELETED_AT_COLUMN)
    }

    /// Use a custom timestamp column.
    pub fn with_column(name: &str) -> RepositoryResult<Self> {
        let column = resolve_column::<E>(name)?;
        if deletion_stamp(&column.def()).is_none() {
            return Err(RepositoryError::configuration(format!(
                "soft delete column {}.{} is not a timestamp",
                E::default().table_name(),
                column.as_str()
            )));
        }

        Ok(Self { column })
    }
}

impl<E: EntityTrait> ModelFactory<E> for SoftDeleteFactory<E> {
    fn new_query(&self) -> Select<E> {
        E::find().filter(self.column.is_null())
    }

    fn soft_delete_column(&self) -> Option<E::Column> {
        Some(self.column)
    }
}

/// The current time in the representation `def` stores.
///
/// `None` for columns that cannot hold a deletion time.
pub fn deletion_stamp(def: &ColumnDef) -> Option<Value> {
    let now = Utc::now();
    match def.get_column_type() {
        ColumnType::TimestampWithTimeZone => Some(now.into()),
        ColumnType::DateTime | ColumnType::Timestamp => Some(now.naive_utc().into()),
        ColumnType::Date => Some(now.date_naive().into()),
        _ => None,
    }
}

/// Resolve a column by name, accepting `table.column` for the entity's own table.
pub fn resolve_column<E: EntityTrait>(name: &str) -> RepositoryResult<E::Column> {
    let table = E::default().table_name().to_string();
    let column = match name.split_once('.') {
        Some((prefix, column)) if prefix == table => column,
        Some(_) => return Err(RepositoryError::unknown_column(&table, name)),
        None => name,
    };

    E::Column::from_str(column).map_err(|_| RepositoryError::unknown_column(&table, name))
}

/// The entity's single primary-key column.
pub fn primary_column<E: EntityTrait>() -> RepositoryResult<E::Column> {
    let mut keys = E::PrimaryKey::iter();
    match (keys.next(), keys.next()) {
        (Some(key), None) => Ok(key.into_column()),
        (Some(_), Some(_)) => Err(RepositoryError::configuration(format!(
            "{} has a composite primary key",
            E::default().table_name()
        ))),
        (None, _) => Err(RepositoryError::configuration(format!(
            "{} has no primary key",
            E::default().table_name()
        ))),
    }
}
