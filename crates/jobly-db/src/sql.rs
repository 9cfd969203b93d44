//! SQL-injection-safe partial UPDATE statements.
//!
//! Every PATCH endpoint funnels its sparse field map through
//! [`partial_update`], which turns it into a `SET` clause of positional
//! placeholders plus the matching value list. Values never appear in SQL
//! text. Column names and alias tables are caller-owned constants and must
//! not be derived from request data, since they are spliced into the clause.

use rust_decimal::Decimal;
use tokio_postgres::types::ToSql;

use crate::error::{DbError, DbResult};

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    Bool(bool),
    Numeric(Decimal),
}

impl SqlValue {
    /// Borrow as a tokio-postgres query parameter.
    fn as_param(&self) -> &(dyn ToSql + Sync) {
        match self {
            SqlValue::Text(v) => v,
            SqlValue::Int(v) => v,
            SqlValue::Bool(v) => v,
            SqlValue::Numeric(v) => v,
        }
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        Self::Numeric(v)
    }
}

/// An ordered field-update map. Insertion order determines placeholder
/// numbering, so it is preserved end to end.
#[derive(Debug, Default)]
pub struct UpdateFields {
    entries: Vec<(String, SqlValue)>,
}

impl UpdateFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field to update.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        self.entries.push((field.into(), value.into()));
    }

    /// Record a field only when a value was supplied.
    pub fn set_opt(&mut self, field: &str, value: Option<impl Into<SqlValue>>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The generated `SET` clause and its values, in placeholder order.
#[derive(Debug)]
pub struct PartialUpdate {
    set_clause: String,
    values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Comma-joined assignments, e.g. `"first_name"=$1, "age"=$2`.
    pub fn set_clause(&self) -> &str {
        &self.set_clause
    }

    /// Values in the same order as the placeholders they bind to.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// The index the caller should use for its own trailing parameter,
    /// typically the row key in the `WHERE` clause.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Borrow the values as a tokio-postgres parameter list. Callers append
    /// their key parameters after these.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(SqlValue::as_param).collect()
    }
}

/// Build a partial UPDATE fragment from a sparse field map.
///
/// Each field resolves its physical column through `aliases` (falling back
/// to the field name itself) and is assigned the next 1-based placeholder:
///
/// `{firstName: "Aliya", age: 32}` with `firstName -> first_name` becomes
/// `"first_name"=$1, "age"=$2` and values `["Aliya", 32]`.
///
/// An empty field map is an error; callers must not issue a no-op UPDATE.
pub fn partial_update(fields: UpdateFields, aliases: &[(&str, &str)]) -> DbResult<PartialUpdate> {
    if fields.is_empty() {
        return Err(DbError::invalid_input("no data to update"));
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for (idx, (field, value)) in fields.entries.into_iter().enumerate() {
        let column = aliases
            .iter()
            .find(|(logical, _)| *logical == field)
            .map(|(_, physical)| *physical)
            .unwrap_or(field.as_str());
        assignments.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value);
    }

    Ok(PartialUpdate {
        set_clause: assignments.join(", "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIASES: &[(&str, &str)] = &[("firstName", "first_name"), ("age", "age")];

    #[test]
    fn builds_aliased_set_clause_in_insertion_order() {
        let mut fields = UpdateFields::new();
        fields.set("firstName", "Aliya");
        fields.set("age", 32);

        let update = partial_update(fields, ALIASES).unwrap();
        assert_eq!(update.set_clause(), r#""first_name"=$1, "age"=$2"#);
        assert_eq!(
            update.values(),
            &[SqlValue::Text("Aliya".to_string()), SqlValue::Int(32)]
        );
        assert_eq!(update.next_placeholder(), 3);
        assert_eq!(update.params().len(), 2);
    }

    #[test]
    fn unaliased_fields_keep_their_name() {
        let mut fields = UpdateFields::new();
        fields.set("description", "hires anyone");
        fields.set("firstName", "Aliya");

        let update = partial_update(fields, ALIASES).unwrap();
        assert_eq!(update.set_clause(), r#""description"=$1, "first_name"=$2"#);
    }

    #[test]
    fn placeholder_numbering_follows_insertion_order() {
        let mut fields = UpdateFields::new();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            fields.set(*name, i as i32);
        }

        let update = partial_update(fields, &[]).unwrap();
        for (i, fragment) in update.set_clause().split(", ").enumerate() {
            assert!(fragment.ends_with(&format!("=${}", i + 1)));
            assert_eq!(update.values()[i], SqlValue::Int(i as i32));
        }
    }

    #[test]
    fn empty_fields_error_regardless_of_aliases() {
        let err = partial_update(UpdateFields::new(), ALIASES).unwrap_err();
        assert!(matches!(err, DbError::InvalidInput(_)));

        let err = partial_update(UpdateFields::new(), &[]).unwrap_err();
        assert!(matches!(err, DbError::InvalidInput(_)));
    }

    #[test]
    fn set_opt_skips_absent_values() {
        let mut fields = UpdateFields::new();
        fields.set_opt("name", Some("Acme"));
        fields.set_opt("logoUrl", None::<String>);
        assert_eq!(fields.len(), 1);
    }
}
