//! Reads a JSON database snapshot into an in-memory `TableSource`. The
//! snapshot is a full materialization of the source database:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "Orders",
//!       "columns": [{"name": "id", "type": "long"}],
//!       "rows": [{"id": 1}]
//!     }
//!   ]
//! }
//! ```
//!
//! Cell values are decoded against the declared column type: date-time cells
//! arrive as RFC 3339 strings, binary cells as base64. A string that fails
//! that decoding is kept as raw text so the coercer can degrade it; a
//! document that fails the snapshot grammar itself is a fatal error.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::Path;

use crate::errors::SnapshotError;
use crate::source::{Column, ColumnType, MemorySource, Row, Table, Value};

#[derive(Deserialize)]
struct SnapshotDoc {
    tables: Vec<TableDoc>,
}

#[derive(Deserialize)]
struct TableDoc {
    name: String,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    rows: Vec<serde_json::Map<String, JsonValue>>,
}

/// Read a snapshot file into a `MemorySource`.
pub fn read_snapshot(path: &Path) -> Result<MemorySource> {
    debug!("Reading snapshot: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_snapshot(&content, path)
}

/// Parse snapshot text; `origin` names the document in error messages.
pub fn parse_snapshot(content: &str, origin: &Path) -> Result<MemorySource> {
    let doc: SnapshotDoc = serde_json::from_str(content).map_err(|e| SnapshotError {
        path: origin.into(),
        reason: e.to_string(),
    })?;

    let mut source = MemorySource::new();
    for table_doc in doc.tables {
        let declared = table_doc.columns;
        let mut table = Table::new(table_doc.name.as_str(), declared.clone());
        for cells_doc in &table_doc.rows {
            let mut cells: Vec<(String, Option<Value>)> = Vec::with_capacity(cells_doc.len());
            // declared columns first, in declaration order
            for column in &declared {
                if let Some(json) = cells_doc.get(&column.name) {
                    let value = decode_cell(
                        json,
                        Some(column.column_type),
                        &table_doc.name,
                        &column.name,
                        origin,
                    )?;
                    cells.push((column.name.clone(), value));
                }
            }
            // then any undeclared cells the row carries
            for (name, json) in cells_doc {
                if declared.iter().any(|c| &c.name == name) {
                    continue;
                }
                let value = decode_cell(json, None, &table_doc.name, name, origin)?;
                cells.push((name.clone(), value));
            }
            table.push_row(Row::new(cells));
        }
        source.add_table(table);
    }
    Ok(source)
}

fn decode_cell(
    json: &JsonValue,
    column_type: Option<ColumnType>,
    table: &str,
    column: &str,
    origin: &Path,
) -> Result<Option<Value>> {
    let value = match json {
        JsonValue::Null => None,
        JsonValue::Bool(b) => Some(Value::Boolean(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Some(Value::Double(f))
            } else {
                return Err(SnapshotError {
                    path: origin.into(),
                    reason: format!("unrepresentable number in {}.{}", table, column),
                }
                .into());
            }
        }
        JsonValue::String(s) => Some(decode_string(s, column_type)),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            return Err(SnapshotError {
                path: origin.into(),
                reason: format!("unsupported cell value in {}.{}", table, column),
            }
            .into());
        }
    };
    Ok(value)
}

fn decode_string(s: &str, column_type: Option<ColumnType>) -> Value {
    match column_type {
        Some(ColumnType::DateTime) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Value::DateTime(dt.with_timezone(&Utc)),
            // left as raw text; the coercer degrades it to a plain literal
            Err(_) => Value::Text(s.to_string()),
        },
        Some(ColumnType::Binary) | Some(ColumnType::Ole) => match BASE64.decode(s) {
            Ok(bytes) => Value::Bytes(bytes),
            Err(_) => Value::Text(s.to_string()),
        },
        _ => Value::Text(s.to_string()),
    }
}
