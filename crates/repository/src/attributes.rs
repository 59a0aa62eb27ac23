//! Mass assignment: JSON attribute payloads to typed column values.
//!
//! A payload only names the columns it assigns. To get values of exactly
//! the model's field types, the payload is laid over a placeholder row
//! (one neutral value per column) and deserialized into `E::Model`; the
//! assigned columns are then read back from that model. Placeholders exist
//! for text, numeric, boolean, date/time, uuid, binary and json columns.
//! Other non-nullable columns (e.g. active enums) must be present in the
//! payload.

use sea_orm::{
    ColumnDef, ColumnTrait, ColumnType, EntityName, EntityTrait, IdenStatic, Iterable,
    ModelTrait, PrimaryKeyToColumn, Value,
};
use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};

use common::{RepositoryError, RepositoryResult};

use crate::factory::resolve_column;

/// Attribute payload as a JSON object.
pub type Attributes = Map<String, JsonValue>;

/// Unwrap a JSON object payload.
pub fn attribute_map(attributes: JsonValue) -> RepositoryResult<Attributes> {
    match attributes {
        JsonValue::Object(map) => Ok(map),
        other => Err(RepositoryError::configuration(format!(
            "attributes must be a JSON object, got {}",
            other
        ))),
    }
}

/// Typed values for every column named in `attributes`, in payload order.
///
/// Unknown columns and values that do not fit the column's type are
/// configuration errors.
pub fn typed_values<E>(attributes: &Attributes) -> RepositoryResult<Vec<(E::Column, Value)>>
where
    E: EntityTrait,
    E::Model: for<'de> Deserialize<'de>,
{
    let mut row: Attributes = E::Column::iter()
        .map(|column| (column.as_str().to_string(), placeholder(&column.def())))
        .collect();

    let mut columns = Vec::with_capacity(attributes.len());
    for (name, value) in attributes {
        let column = resolve_column::<E>(name)?;
        row.insert(column.as_str().to_string(), value.clone());
        columns.push(column);
    }

    let model: E::Model = serde_json::from_value(JsonValue::Object(row)).map_err(|err| {
        RepositoryError::configuration(format!(
            "attributes do not fit {}: {}",
            E::default().table_name(),
            err
        ))
    })?;

    Ok(columns
        .into_iter()
        .map(|column| (column, model.get(column)))
        .collect())
}

pub fn is_primary_key<E: EntityTrait>(column: E::Column) -> bool {
    E::PrimaryKey::from_column(column).is_some()
}

/// Whether `value` is SQL NULL of any type.
pub fn is_null(value: &Value) -> bool {
    *value == value.as_null()
}

fn placeholder(def: &ColumnDef) -> JsonValue {
    if def.is_null() {
        return JsonValue::Null;
    }

    match def.get_column_type() {
        ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Text => json!(""),
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger
        | ColumnType::TinyUnsigned
        | ColumnType::SmallUnsigned
        | ColumnType::Unsigned
        | ColumnType::BigUnsigned
        | ColumnType::Year
        | ColumnType::Decimal(_)
        | ColumnType::Money(_) => json!(0),
        ColumnType::Float | ColumnType::Double => json!(0.0),
        ColumnType::Boolean => json!(false),
        ColumnType::DateTime | ColumnType::Timestamp => json!("1970-01-01T00:00:00"),
        ColumnType::TimestampWithTimeZone => json!("1970-01-01T00:00:00Z"),
        ColumnType::Date => json!("1970-01-01"),
        ColumnType::Time => json!("00:00:00"),
        ColumnType::Uuid => json!("00000000-0000-0000-0000-000000000000"),
        ColumnType::Blob
        | ColumnType::Binary(_)
        | ColumnType::VarBinary(_)
        | ColumnType::Array(_) => json!([]),
        _ => JsonValue::Null,
    }
}
