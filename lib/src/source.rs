//! Defines the core data structures for the tabular side of the conversion:
//! cell values, column type tags, tables and rows, and the `TableSource`
//! contract that database readers implement.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value read from the source database.
///
/// A cell may also be absent entirely; absence is modeled as `Option<Value>`
/// on the row, never as a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
    DateTime(DateTime<Utc>),
}

impl Value {
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Decimal rendering for floating-point-typed columns; integers pass
    /// through unchanged.
    pub fn decimal_lexical(&self) -> Option<String> {
        match self {
            Value::Integer(n) => Some(n.to_string()),
            Value::Double(x) => Some(x.to_string()),
            _ => None,
        }
    }

    /// Integer rendering with no fractional part; doubles are rounded.
    pub fn integral_lexical(&self) -> Option<String> {
        match self {
            Value::Integer(n) => Some(n.to_string()),
            Value::Double(x) => Some(format!("{:.0}", x)),
            _ => None,
        }
    }
}

/// The default textual form of a value, used by the coercion fallback.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Double(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&BASE64.encode(b)),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

/// Column type tags as declared by the source database schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    BigInt,
    Binary,
    Boolean,
    Byte,
    Complex,
    Currency,
    DateTime,
    DateTimeExtended,
    Double,
    Float,
    Integer,
    Long,
    Memo,
    Numeric,
    Ole,
    RepId,
    Text,
}

/// A named, typed column declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            column_type,
        }
    }
}

/// One row of a table: an ordered mapping from column name to an optional
/// cell value. The order of cells is the order the reader supplied them in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Option<Value>)>,
}

impl Row {
    pub fn new(cells: Vec<(String, Option<Value>)>) -> Self {
        Row { cells }
    }

    /// Iterate cells in row order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, Option<Value>)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Option<Value>)>>(iter: I) -> Self {
        Row {
            cells: iter.into_iter().collect(),
        }
    }
}

/// A read-only snapshot of one table: its name, ordered column declarations
/// and ordered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The declared type of a column, or None if the column is undeclared.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.column_type)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// Contract with the external database reader. Implementations must be
/// idempotent: repeated calls for the same table name yield the same table,
/// with rows in the same order.
pub trait TableSource {
    /// Table names in source order.
    fn table_names(&self) -> Vec<String>;

    /// Look up one table by name.
    fn table(&self, name: &str) -> Option<&Table>;
}

/// An in-memory `TableSource` holding fully materialized tables. Used as the
/// backing store for snapshot files and for constructing sources by hand.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: Vec<Table>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }
}

impl TableSource for MemorySource {
    fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name().to_string()).collect()
    }

    fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Boolean(true).as_boolean(), Some(true));
        assert_eq!(Value::Integer(7).as_integer(), Some(7));
        assert_eq!(Value::Text("x".to_string()).as_text(), Some("x"));
        assert_eq!(Value::Integer(7).as_text(), None);
        assert_eq!(Value::Boolean(false).as_integer(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Double(1.5).to_string(), "1.5");
        assert_eq!(Value::Text("hi".to_string()).to_string(), "hi");
        assert_eq!(Value::Bytes(vec![1, 2, 3]).to_string(), "AQID");
        let dt = Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
        assert_eq!(
            Value::DateTime(dt).to_string(),
            "2023-04-05T06:07:08.000Z"
        );
    }

    #[test]
    fn test_integral_lexical_rounds() {
        assert_eq!(Value::Double(3.7).integral_lexical().unwrap(), "4");
        assert_eq!(Value::Integer(42).integral_lexical().unwrap(), "42");
        assert_eq!(Value::Text("x".to_string()).integral_lexical(), None);
    }

    #[test]
    fn test_memory_source_lookup() {
        let mut source = MemorySource::new();
        let mut table = Table::new("People", vec![Column::new("name", ColumnType::Text)]);
        table.push_row(Row::new(vec![(
            "name".to_string(),
            Some(Value::Text("Ada".to_string())),
        )]));
        source.add_table(table);

        assert_eq!(source.table_names(), vec!["People".to_string()]);
        let table = source.table("People").unwrap();
        assert_eq!(table.column_type("name"), Some(ColumnType::Text));
        assert_eq!(table.column_type("missing"), None);
        assert_eq!(table.rows().len(), 1);
        assert!(source.table("Nobody").is_none());
    }
}
