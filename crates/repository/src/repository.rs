//! Generic repository over a sea-orm entity.
//!
//! A [`Repository`] owns a query in progress, an ordered list of criteria
//! and an optional one-shot scope. Shaping methods (`order_by`, `has`,
//! `visible`, ...) change the pending query; terminal methods (`all`,
//! `find`, `paginate`, `update`, `delete`, ...) run it and then start over
//! from a fresh query supplied by the [`ModelFactory`].
//!
//! Every terminal operation follows the same steps:
//!
//! 1. apply registered criteria in push order (unless skipped)
//! 2. apply the scope closure, if any
//! 3. clear the scope and replace the pending query with a fresh one
//! 4. execute the verb against the prepared query
//!
//! The prepared query is moved out before the verb runs, so a failing
//! operation never leaks its filters into the next call. Criteria and the
//! skip flag persist across calls; scope and query do not.
//!
//! Some operations deliberately use a reduced pipeline:
//!
//! | operation                                | criteria | scope            |
//! |------------------------------------------|----------|------------------|
//! | `find_where_in`, `find_where_not_in`     | applied  | ignored, kept    |
//! | `delete_where`, `force_delete_where`     | ignored  | applied, kept    |
//! | `get_by_criteria`                        | ignored  | ignored, kept    |
//! | `create`                                 | n/a      | n/a              |
//!
//! A repository is meant to live for one request and is not shared
//! between tasks; `&mut self` on every operation enforces one operation in
//! flight at a time.

use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::sea_query::{Expr, IntoCondition, IntoValueTuple, SimpleExpr, ValueTuple};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityName, EntityTrait, IdenStatic,
    IntoActiveModel, ModelTrait, Order, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Related, Select, Value,
};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use common::{OptionExt, RepositoryConfig, RepositoryError, RepositoryResult, ACTIVE_COLUMN};

use crate::attributes::{attribute_map, is_null, is_primary_key, typed_values, Attributes};
use crate::conditions::Conditions;
use crate::criteria::{CriteriaList, Criterion, CriterionEntry};
use crate::factory::{deletion_stamp, primary_column, resolve_column, EntityFactory, ModelFactory};
use crate::pagination::{page_window, Paginated, PaginationMethod};
use crate::request::{current_page, PageSizeSource, QueryParameters};
use crate::visibility::FieldVisibility;

/// One-shot query transformation consumed by the next terminal operation.
pub type Scope<E> = Arc<dyn Fn(Select<E>) -> Select<E> + Send + Sync>;

/// Primary-key value type of an entity.
pub type PrimaryKeyValue<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pipeline {
    /// Criteria, then scope; the scope is consumed.
    Full,
    /// Criteria only; the scope is neither read nor cleared.
    CriteriaOnly,
    /// Scope only; the scope is left in place.
    ScopeOnly,
}

/// Repository bound to one entity type.
pub struct Repository<E: EntityTrait> {
    db: DatabaseConnection,
    factory: Arc<dyn ModelFactory<E>>,
    page_size: Arc<dyn PageSizeSource>,
    request: Option<Arc<dyn QueryParameters>>,
    query: Select<E>,
    visibility: FieldVisibility,
    criteria: CriteriaList<E>,
    skip_criteria: bool,
    scope: Option<Scope<E>>,
}

// =============================================================================
// Construction and accessors
// =============================================================================

impl<E: EntityTrait> Repository<E> {
    /// Repository using `E::find()` for fresh queries and the default page size.
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_factory(db, EntityFactory::<E>::new())
    }

    /// Repository drawing fresh queries and entities from `factory`.
    pub fn with_factory(db: DatabaseConnection, factory: impl ModelFactory<E> + 'static) -> Self {
        let factory: Arc<dyn ModelFactory<E>> = Arc::new(factory);
        let query = factory.new_query();

        Self {
            db,
            factory,
            page_size: Arc::new(RepositoryConfig::default()),
            request: None,
            query,
            visibility: FieldVisibility::default(),
            criteria: CriteriaList::new(),
            skip_criteria: false,
            scope: None,
        }
    }

    /// Where `paginate` looks up the page size when none is given.
    pub fn with_page_size_source(mut self, source: impl PageSizeSource + 'static) -> Self {
        self.page_size = Arc::new(source);
        self
    }

    /// Request whose query string is carried into pagination links.
    pub fn with_request(mut self, request: impl QueryParameters + 'static) -> Self {
        self.request = Some(Arc::new(request));
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// An instance of the bound entity.
    pub fn model(&self) -> E {
        E::default()
    }

    pub fn table_name(&self) -> String {
        E::default().table_name().to_string()
    }

    /// The pending query as it would run right now, before criteria and scope.
    pub fn query(&self) -> &Select<E> {
        &self.query
    }

    pub fn has_scope(&self) -> bool {
        self.scope.is_some()
    }

    pub fn is_skipping_criteria(&self) -> bool {
        self.skip_criteria
    }

    // =========================================================================
    // Query lifecycle
    // =========================================================================

    /// Discard the pending query and start from a fresh one.
    pub fn reset_query(&mut self) -> &mut Self {
        self.take_query();
        self
    }

    /// Set the one-shot scope applied by the next terminal operation.
    pub fn scope_query<F>(&mut self, scope: F) -> &mut Self
    where
        F: Fn(Select<E>) -> Select<E> + Send + Sync + 'static,
    {
        self.scope = Some(Arc::new(scope));
        self
    }

    pub fn reset_scope(&mut self) -> &mut Self {
        self.scope = None;
        self
    }

    /// Scope the next operation to rows whose `is_active` equals `is_active`.
    pub fn apply_active_condition(&mut self, is_active: bool) -> RepositoryResult<&mut Self> {
        let column = resolve_column::<E>(ACTIVE_COLUMN)?;
        Ok(self.scope_query(move |query| query.filter(column.eq(is_active))))
    }

    /// Run every registered criterion over the pending query, in push order.
    pub fn apply_criteria(&mut self) -> &mut Self {
        if self.skip_criteria {
            return self;
        }

        let mut query = self.replace_query();
        for entry in self.criteria.iter() {
            tracing::trace!(criterion = entry.type_name(), "Applying criterion");
            query = entry.apply(query, self);
        }
        self.query = query;
        self
    }

    /// Run the scope closure over the pending query without clearing it.
    pub fn apply_scope(&mut self) -> &mut Self {
        if let Some(scope) = self.scope.clone() {
            self.map_query(|query| scope(query));
        }
        self
    }

    /// AND every condition onto the pending query.
    pub fn apply_conditions(&mut self, conditions: &Conditions) -> RepositoryResult<&mut Self> {
        self.query = conditions.apply(self.query.clone())?;
        Ok(self)
    }

    fn replace_query(&mut self) -> Select<E> {
        std::mem::replace(&mut self.query, self.factory.new_query())
    }

    fn map_query(&mut self, f: impl FnOnce(Select<E>) -> Select<E>) {
        let query = self.replace_query();
        self.query = f(query);
    }

    /// Move the pending query out, leaving a fresh one (and default visibility) behind.
    fn take_query(&mut self) -> Select<E> {
        self.visibility = FieldVisibility::default();
        self.replace_query()
    }

    fn prepare(&mut self, operation: &'static str, pipeline: Pipeline) -> Select<E> {
        if matches!(pipeline, Pipeline::Full | Pipeline::CriteriaOnly) {
            self.apply_criteria();
        }
        if matches!(pipeline, Pipeline::Full | Pipeline::ScopeOnly) {
            self.apply_scope();
        }
        if pipeline == Pipeline::Full {
            self.reset_scope();
        }

        tracing::debug!(
            table = %self.table_name(),
            operation,
            criteria = self.criteria.len(),
            skip_criteria = self.skip_criteria,
            "Running repository operation"
        );

        self.take_query()
    }

    // =========================================================================
    // Query shaping
    // =========================================================================

    /// Order by `column` (`table.column` accepted).
    pub fn order_by(&mut self, column: &str, order: Order) -> RepositoryResult<&mut Self> {
        let column = resolve_column::<E>(column)?;
        self.map_query(|query| query.order_by(column, order));
        Ok(self)
    }

    /// Keep only rows that have at least one related `R`.
    pub fn has<R>(&mut self) -> &mut Self
    where
        R: EntityTrait,
        E: Related<R>,
    {
        self.map_query(|query| query.inner_join(R::default()).distinct());
        self
    }

    /// Keep only rows with a related `R` matching `condition`.
    pub fn where_has<R, C>(&mut self, condition: C) -> &mut Self
    where
        R: EntityTrait,
        E: Related<R>,
        C: IntoCondition,
    {
        self.map_query(|query| {
            query
                .inner_join(R::default())
                .filter(condition)
                .distinct()
        });
        self
    }

    /// Restrict JSON reads to these fields.
    pub fn visible<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visibility.set_visible(fields);
        self
    }

    /// Drop these fields from JSON reads.
    pub fn hidden<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visibility.set_hidden(fields);
        self
    }

    // =========================================================================
    // Criteria registry
    // =========================================================================

    /// Append a criterion; criteria run in push order.
    pub fn push_criteria<C: Criterion<E>>(&mut self, criterion: C) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    /// Append a default-constructed criterion of type `C`.
    pub fn push_criteria_type<C: Criterion<E> + Default>(&mut self) -> &mut Self {
        self.push_criteria(C::default())
    }

    /// Remove every criterion of the same type as `criterion`.
    ///
    /// Matching is by type: other instances of `C` are removed too.
    pub fn pop_criteria<C: Criterion<E>>(&mut self, _criterion: &C) -> &mut Self {
        self.pop_criteria_type::<C>()
    }

    /// Remove every criterion of type `C`.
    pub fn pop_criteria_type<C: Criterion<E>>(&mut self) -> &mut Self {
        self.criteria.pop_type::<C>();
        self
    }

    /// Registered criteria in application order.
    pub fn get_criteria(&self) -> &[CriterionEntry<E>] {
        self.criteria.as_slice()
    }

    /// Stop (or resume) applying registered criteria. The list is kept.
    pub fn skip_criteria(&mut self, skip: bool) -> &mut Self {
        self.skip_criteria = skip;
        self
    }

    /// Remove all criteria. Scope and skip flag are untouched.
    pub fn reset_criteria(&mut self) -> &mut Self {
        self.criteria.clear();
        self
    }
}

// =============================================================================
// Reads and deletes
// =============================================================================

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    /// Paginate the matching rows.
    ///
    /// `limit = None` uses the configured page size. The page number is read
    /// from the request's `page` parameter and every request parameter is
    /// carried into the generated links.
    pub async fn paginate(
        &mut self,
        limit: Option<u64>,
        method: PaginationMethod,
    ) -> RepositoryResult<Paginated<E::Model>> {
        let per_page = limit.unwrap_or_else(|| self.page_size.default_page_size());
        let (parameters, path) = match &self.request {
            Some(request) => (request.query_parameters(), request.path()),
            None => (BTreeMap::new(), String::new()),
        };
        let page = current_page(&parameters);
        let query = self.prepare("paginate", Pipeline::Full);

        if per_page == 0 {
            return Err(RepositoryError::configuration(
                "page size must be greater than zero",
            ));
        }

        let (page, per_page) = page_window(page, per_page);

        let result = match method {
            PaginationMethod::LengthAware => {
                let paginator = query.paginate(&self.db, per_page);
                let total = paginator.num_items().await?;
                let data = paginator.fetch_page(page - 1).await?;
                Paginated::new(data, page, per_page, total)
            }
            PaginationMethod::Simple => {
                let mut data = query
                    .offset((page - 1) * per_page)
                    .limit(per_page + 1)
                    .all(&self.db)
                    .await?;
                let has_more_pages = data.len() as u64 > per_page;
                data.truncate(per_page as usize);
                Paginated::simple(data, page, per_page, has_more_pages)
            }
        };

        Ok(result.with_path(path).appends(parameters))
    }

    /// Paginate without counting the total.
    pub async fn simple_paginate(
        &mut self,
        limit: Option<u64>,
    ) -> RepositoryResult<Paginated<E::Model>> {
        self.paginate(limit, PaginationMethod::Simple).await
    }

    /// All matching rows.
    pub async fn all(&mut self) -> RepositoryResult<Vec<E::Model>> {
        let query = self.prepare("all", Pipeline::Full);
        Ok(query.all(&self.db).await?)
    }

    /// All matching rows as JSON, projected to `columns` (empty = every
    /// column) and filtered through `visible` / `hidden`.
    pub async fn all_json(&mut self, columns: &[&str]) -> RepositoryResult<Vec<JsonValue>> {
        let visibility = self.visibility.clone();
        let query = self.prepare("all_json", Pipeline::Full);

        let query = if columns.is_empty() {
            query
        } else {
            let columns = columns
                .iter()
                .map(|column| resolve_column::<E>(column))
                .collect::<RepositoryResult<Vec<_>>>()?;
            query.select_only().columns(columns)
        };

        let rows = query.into_json().all(&self.db).await?;
        Ok(rows.into_iter().map(|row| visibility.apply(row)).collect())
    }

    /// Matching rows with their related `R` rows eagerly loaded.
    pub async fn all_with<R>(&mut self) -> RepositoryResult<Vec<(E::Model, Vec<R::Model>)>>
    where
        R: EntityTrait,
        R::Model: Send + Sync,
        E: Related<R>,
    {
        let query = self.prepare("all_with", Pipeline::Full);
        Ok(query.find_with_related(R::default()).all(&self.db).await?)
    }

    /// Values of one column.
    pub async fn pluck(&mut self, column: &str) -> RepositoryResult<Vec<JsonValue>> {
        let query = self.prepare("pluck", Pipeline::Full);
        let column = resolve_column::<E>(column)?;

        let rows = query
            .select_only()
            .column(column)
            .into_json()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| field(&row, column.as_str()))
            .collect())
    }

    /// `(key, value)` pairs of two columns, in row order.
    pub async fn pluck_keyed(
        &mut self,
        column: &str,
        key: &str,
    ) -> RepositoryResult<Vec<(JsonValue, JsonValue)>> {
        let query = self.prepare("pluck", Pipeline::Full);
        let value_column = resolve_column::<E>(column)?;
        let key_column = resolve_column::<E>(key)?;

        let rows = query
            .select_only()
            .column(key_column)
            .column(value_column)
            .into_json()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    field(&row, key_column.as_str()),
                    field(&row, value_column.as_str()),
                )
            })
            .collect())
    }

    /// The row with primary key `id`.
    ///
    /// Fails with `NotFound` when no row matches after criteria and scope.
    pub async fn find(&mut self, id: PrimaryKeyValue<E>) -> RepositoryResult<E::Model> {
        let query = self.prepare("find", Pipeline::Full);
        let key = primary_column::<E>()?;
        let id = key_value::<E>(id)?;

        query
            .filter(key.eq(id))
            .one(&self.db)
            .await?
            .ok_or_not_found(&self.table_name())
    }

    /// The first matching row; `NotFound` when there is none.
    pub async fn first(&mut self) -> RepositoryResult<E::Model> {
        let query = self.prepare("first", Pipeline::Full);

        query
            .one(&self.db)
            .await?
            .ok_or_not_found(&self.table_name())
    }

    /// Rows whose `field` equals `value`.
    pub async fn find_by_attribute(
        &mut self,
        field: &str,
        value: impl Into<Value>,
    ) -> RepositoryResult<Vec<E::Model>> {
        let query = self.prepare("find_by_attribute", Pipeline::Full);
        let column = resolve_column::<E>(field)?;

        Ok(query.filter(column.eq(value)).all(&self.db).await?)
    }

    /// Rows matching every condition.
    pub async fn find_where(&mut self, conditions: &Conditions) -> RepositoryResult<Vec<E::Model>> {
        let query = self.prepare("find_where", Pipeline::Full);
        let query = conditions.apply(query)?;

        Ok(query.all(&self.db).await?)
    }

    /// Rows whose `field` is one of `values`. Skips the scope.
    ///
    /// An empty `values` matches nothing.
    pub async fn find_where_in<I, V>(&mut self, field: &str, values: I) -> RepositoryResult<Vec<E::Model>>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let query = self.prepare("find_where_in", Pipeline::CriteriaOnly);
        let column = resolve_column::<E>(field)?;
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if values.is_empty() {
            return Ok(Vec::new());
        }

        Ok(query.filter(column.is_in(values)).all(&self.db).await?)
    }

    /// Rows whose `field` is none of `values`. Skips the scope.
    pub async fn find_where_not_in<I, V>(
        &mut self,
        field: &str,
        values: I,
    ) -> RepositoryResult<Vec<E::Model>>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let query = self.prepare("find_where_not_in", Pipeline::CriteriaOnly);
        let column = resolve_column::<E>(field)?;
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        let query = if values.is_empty() {
            query
        } else {
            query.filter(column.is_not_in(values))
        };

        Ok(query.all(&self.db).await?)
    }

    /// Number of matching rows.
    pub async fn count(&mut self) -> RepositoryResult<u64> {
        let query = self.prepare("count", Pipeline::Full);
        Ok(query.count(&self.db).await?)
    }

    /// Whether any row matches.
    pub async fn exists(&mut self) -> RepositoryResult<bool> {
        let query = self.prepare("exists", Pipeline::Full);
        Ok(query.one(&self.db).await?.is_some())
    }

    /// Delete the row with primary key `id`.
    ///
    /// Soft-deleting factories stamp the row instead of removing it.
    /// Returns the number of affected rows.
    pub async fn delete(&mut self, id: PrimaryKeyValue<E>) -> RepositoryResult<u64> {
        let model = self.find(id).await?;
        let key = primary_column::<E>()?;

        self.remove(key.eq(model.get(key)), false).await
    }

    /// Permanently delete the row with primary key `id`.
    pub async fn force_delete(&mut self, id: PrimaryKeyValue<E>) -> RepositoryResult<u64> {
        let model = self.find(id).await?;
        let key = primary_column::<E>()?;

        self.remove(key.eq(model.get(key)), true).await
    }

    /// Delete every row matching `conditions`.
    ///
    /// Registered criteria are ignored; the scope is applied but stays set.
    pub async fn delete_where(&mut self, conditions: &Conditions) -> RepositoryResult<u64> {
        let filter = self.matching_keys("delete_where", conditions)?;
        self.remove(filter, false).await
    }

    /// Permanently delete every row matching `conditions`.
    ///
    /// Registered criteria are ignored; the scope is applied but stays set.
    pub async fn force_delete_where(&mut self, conditions: &Conditions) -> RepositoryResult<u64> {
        let filter = self.matching_keys("force_delete_where", conditions)?;
        self.remove(filter, true).await
    }

    /// Fetch all rows through a single ad-hoc criterion.
    ///
    /// Bypasses the registry and the scope; only the pending query is reset.
    pub async fn get_by_criteria<C: Criterion<E>>(
        &mut self,
        criterion: C,
    ) -> RepositoryResult<Vec<E::Model>> {
        let query = self.take_query();
        let query = criterion.apply(query, self);

        Ok(query.all(&self.db).await?)
    }

    /// `pk IN (SELECT pk ...)` over the scoped, conditioned query.
    fn matching_keys(
        &mut self,
        operation: &'static str,
        conditions: &Conditions,
    ) -> RepositoryResult<SimpleExpr> {
        let query = self.prepare(operation, Pipeline::ScopeOnly);
        let query = conditions.apply(query)?;
        let key = primary_column::<E>()?;

        Ok(key.in_subquery(query.select_only().column(key).into_query()))
    }

    async fn remove(&self, filter: SimpleExpr, force: bool) -> RepositoryResult<u64> {
        let soft_delete = self.factory.soft_delete_column().filter(|_| !force);

        let rows_affected = match soft_delete {
            Some(column) => {
                let stamp = deletion_stamp(&column.def()).ok_or_else(|| {
                    RepositoryError::configuration(format!(
                        "soft delete column {} is not a timestamp",
                        column.as_str()
                    ))
                })?;

                E::update_many()
                    .col_expr(column, Expr::value(stamp))
                    .filter(filter)
                    .exec(&self.db)
                    .await?
                    .rows_affected
            }
            None => {
                E::delete_many()
                    .filter(filter)
                    .exec(&self.db)
                    .await?
                    .rows_affected
            }
        };

        Ok(rows_affected)
    }
}

// =============================================================================
// Writes (mass assignment)
// =============================================================================

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + for<'de> Deserialize<'de> + Send + Sync,
    E::ActiveModel: Send,
{
    /// Fill a new entity from a JSON object and insert it.
    ///
    /// Only the named columns are assigned; primary-key fields in
    /// `attributes` are ignored. No validation is performed here.
    pub async fn create(&mut self, attributes: JsonValue) -> RepositoryResult<E::Model> {
        let attributes = attribute_map(attributes)?;
        let entity = self.assign(self.factory.new_entity(), &attributes)?;

        Ok(entity.insert(&self.db).await?)
    }

    /// Fill the row with primary key `id` from a JSON object and save it.
    pub async fn update(
        &mut self,
        attributes: JsonValue,
        id: PrimaryKeyValue<E>,
    ) -> RepositoryResult<E::Model> {
        let model = self.find(id).await?;
        let attributes = attribute_map(attributes)?;

        self.save(model, attributes).await
    }

    /// Update the first row matching `attributes` with `values`, or create a
    /// row from both when none matches.
    ///
    /// A null in `attributes` matches rows where that column is NULL.
    pub async fn update_or_create(
        &mut self,
        attributes: JsonValue,
        values: JsonValue,
    ) -> RepositoryResult<E::Model> {
        let mut query = self.prepare("update_or_create", Pipeline::Full);
        let attributes = attribute_map(attributes)?;
        let values = attribute_map(values)?;

        for (column, value) in typed_values::<E>(&attributes)? {
            query = if is_null(&value) {
                query.filter(column.is_null())
            } else {
                query.filter(column.eq(value))
            };
        }

        match query.one(&self.db).await? {
            Some(model) => self.save(model, values).await,
            None => {
                let mut merged = attributes;
                merged.extend(values);

                let entity = self.assign(self.factory.new_entity(), &merged)?;
                Ok(entity.insert(&self.db).await?)
            }
        }
    }

    /// Set `is_active` on the row with primary key `id`.
    pub async fn update_active_status(
        &mut self,
        status: bool,
        id: PrimaryKeyValue<E>,
    ) -> RepositoryResult<E::Model> {
        let model = self.find(id).await?;
        resolve_column::<E>(ACTIVE_COLUMN)?;

        let mut attributes = Map::new();
        attributes.insert(ACTIVE_COLUMN.to_string(), JsonValue::Bool(status));
        self.save(model, attributes).await
    }

    async fn save(&self, model: E::Model, attributes: Attributes) -> RepositoryResult<E::Model> {
        if attributes.is_empty() {
            return Ok(model);
        }

        let entity = self.assign(model.into_active_model(), &attributes)?;
        Ok(entity.update(&self.db).await?)
    }

    fn assign(
        &self,
        mut entity: E::ActiveModel,
        attributes: &Attributes,
    ) -> RepositoryResult<E::ActiveModel> {
        for (column, value) in typed_values::<E>(attributes)? {
            if is_primary_key::<E>(column) {
                tracing::trace!(column = column.as_str(), "Ignoring primary key attribute");
                continue;
            }
            entity.try_set(column, value)?;
        }

        Ok(entity)
    }
}

fn key_value<E: EntityTrait>(id: PrimaryKeyValue<E>) -> RepositoryResult<Value> {
    match id.into_value_tuple() {
        ValueTuple::One(value) => Ok(value),
        _ => Err(RepositoryError::configuration(format!(
            "{} has a composite primary key",
            E::default().table_name()
        ))),
    }
}

fn field(row: &JsonValue, name: &str) -> JsonValue {
    row.get(name).cloned().unwrap_or(JsonValue::Null)
}
