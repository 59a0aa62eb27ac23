//! Declarative `where` maps.
//!
//! Each entry is either a plain value (equality on the keyed column) or an
//! explicit `(field, operator, value)` comparison. Entries are joined with
//! AND in insertion order; there are no OR groups or nested trees.

use std::fmt;
use std::str::FromStr;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select, Value};

use common::{RepositoryError, RepositoryResult};

use crate::attributes::is_null;
use crate::factory::resolve_column;

/// Comparison operator of an explicit condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
}

impl FromStr for Operator {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" => Ok(Operator::Eq),
            "!=" | "<>" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            "like" => Ok(Operator::Like),
            "not like" => Ok(Operator::NotLike),
            other => Err(RepositoryError::configuration(format!(
                "unsupported operator {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "like",
            Operator::NotLike => "not like",
        };
        f.write_str(symbol)
    }
}

/// Right-hand side of a `where` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `key = value`
    Equals(Value),
    /// `field <operator> value`; the entry key is ignored.
    Compare {
        field: String,
        operator: Operator,
        value: Value,
    },
}

/// Ordered set of conjunctive conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    entries: Vec<(String, Clause)>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `field = value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .push((field.into(), Clause::Equals(value.into())));
        self
    }

    /// `field <operator> value`
    pub fn compare(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        let field = field.into();
        self.entries.push((
            field.clone(),
            Clause::Compare {
                field,
                operator,
                value: value.into(),
            },
        ));
        self
    }

    /// Add a raw `(key, clause)` entry.
    pub fn push(&mut self, key: impl Into<String>, clause: Clause) {
        self.entries.push((key.into(), clause));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Clause)> {
        self.entries.iter().map(|(key, clause)| (key.as_str(), clause))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add every entry to `query` as an AND predicate.
    pub fn apply<E: EntityTrait>(&self, mut query: Select<E>) -> RepositoryResult<Select<E>> {
        for (key, clause) in &self.entries {
            query = match clause {
                Clause::Equals(value) => {
                    query.filter(compare(resolve_column::<E>(key)?, Operator::Eq, value)?)
                }
                Clause::Compare {
                    field,
                    operator,
                    value,
                } => query.filter(compare(resolve_column::<E>(field)?, *operator, value)?),
            };
        }
        Ok(query)
    }
}

impl<K: Into<String>> FromIterator<(K, Clause)> for Conditions {
    fn from_iter<I: IntoIterator<Item = (K, Clause)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, clause)| (key.into(), clause))
                .collect(),
        }
    }
}

/// Build the predicate; `=` and `<>` against NULL become `IS [NOT] NULL`.
fn compare<C: ColumnTrait>(
    column: C,
    operator: Operator,
    value: &Value,
) -> RepositoryResult<sea_orm::sea_query::SimpleExpr> {
    let value = value.clone();
    let expr = match operator {
        Operator::Eq if is_null(&value) => column.is_null(),
        Operator::Ne if is_null(&value) => column.is_not_null(),
        Operator::Eq => column.eq(value),
        Operator::Ne => column.ne(value),
        Operator::Gt => column.gt(value),
        Operator::Gte => column.gte(value),
        Operator::Lt => column.lt(value),
        Operator::Lte => column.lte(value),
        Operator::Like | Operator::NotLike => {
            let pattern = match value {
                Value::String(Some(pattern)) => *pattern,
                other => {
                    return Err(RepositoryError::configuration(format!(
                        "{} needs a string pattern, got {:?}",
                        operator, other
                    )))
                }
            };
            if operator == Operator::Like {
                column.like(pattern)
            } else {
                column.not_like(pattern)
            }
        }
    };
    Ok(expr)
}
