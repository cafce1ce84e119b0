//! Maps a typed cell value to an RDF literal. Each column type tag carries a
//! lexicalization rule and a datatype IRI; a rule that rejects its value
//! degrades to an untyped literal of the value's default textual form.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::SecondsFormat;
use oxigraph::model::vocab::xsd;
use oxigraph::model::Literal;

use crate::consts::XSD_NUMBER;
use crate::source::{ColumnType, Value};

/// Convert a cell value to a literal according to its column's declared type.
///
/// Never fails: a value the lexicalization rule cannot handle (a type
/// mismatch or malformed data) comes back as a plain literal instead.
pub fn coerce(value: &Value, column_type: ColumnType) -> Literal {
    typed_literal(value, column_type).unwrap_or_else(|| plain_literal(value))
}

/// The untyped degradation form: the value's default text, no datatype, no
/// language tag.
pub fn plain_literal(value: &Value) -> Literal {
    Literal::new_simple_literal(value.to_string())
}

fn typed_literal(value: &Value, column_type: ColumnType) -> Option<Literal> {
    let literal = match column_type {
        ColumnType::BigInt => Literal::new_typed_literal(value.as_integer()?.to_string(), xsd::INTEGER),
        ColumnType::Binary | ColumnType::Ole => {
            Literal::new_typed_literal(BASE64.encode(value.as_bytes()?), xsd::BASE_64_BINARY)
        }
        ColumnType::Boolean => {
            Literal::new_typed_literal(value.as_boolean()?.to_string(), xsd::BOOLEAN)
        }
        ColumnType::Byte => Literal::new_typed_literal(value.as_integer()?.to_string(), xsd::BYTE),
        ColumnType::Complex => Literal::new_typed_literal(value.decimal_lexical()?, XSD_NUMBER),
        ColumnType::DateTime => Literal::new_typed_literal(
            value
                .as_date_time()?
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            xsd::DATE_TIME,
        ),
        ColumnType::Double => Literal::new_typed_literal(value.decimal_lexical()?, xsd::DOUBLE),
        ColumnType::Float => Literal::new_typed_literal(value.decimal_lexical()?, xsd::FLOAT),
        ColumnType::Integer => Literal::new_typed_literal(value.integral_lexical()?, xsd::INT),
        ColumnType::Long => Literal::new_typed_literal(value.integral_lexical()?, xsd::LONG),
        ColumnType::Currency
        | ColumnType::DateTimeExtended
        | ColumnType::Memo
        | ColumnType::Numeric
        | ColumnType::RepId
        | ColumnType::Text => Literal::new_typed_literal(value.as_text()?, xsd::STRING),
    };
    Some(literal)
}
