//! Typed cell values and the codec between their textual and in-memory forms.

use std::fmt;

/// The declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Text,
    Bool,
}

impl ColumnType {
    /// Maximum content length, in bytes, for a `Text` value.
    pub const MAX_TEXT_BYTES: usize = 255;

    /// Resolves a type name token (case-insensitive, with the usual SQL aliases).
    ///
    /// Returns `None` for anything not in the supported set; the caller turns
    /// that into an `Unknown type 'X'` error.
    #[must_use]
    pub fn parse_name(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "INT" | "INTEGER" => Some(Self::Int),
            "FLOAT" | "DOUBLE" | "REAL" => Some(Self::Float),
            "TEXT" | "VARCHAR" | "STRING" => Some(Self::Text),
            "BOOL" | "BOOLEAN" => Some(Self::Bool),
            _ => None,
        }
    }

    /// The canonical name used by `DESCRIBE` and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Text => "TEXT",
            Self::Bool => "BOOL",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell: either `NULL`, or a payload matching its column's type (I2).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    /// Returns the column type this value would occupy, or `None` for `Null`
    /// (a null slot carries no runtime type of its own).
    #[must_use]
    pub const fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Null => None,
            Self::Int(_) => Some(ColumnType::Int),
            Self::Float(_) => Some(ColumnType::Float),
            Self::Text(_) => Some(ColumnType::Text),
            Self::Bool(_) => Some(ColumnType::Bool),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Parses a literal (already quote-stripped if it was quoted) into a value
    /// of the given column type, per the §4.1 codec: ill-formed numeric
    /// literals yield the type's zero value rather than an error.
    #[must_use]
    pub fn parse(literal: &str, ty: ColumnType) -> Self {
        match ty {
            ColumnType::Int => Self::Int(literal.trim().parse::<i64>().unwrap_or(0)),
            ColumnType::Float => Self::Float(literal.trim().parse::<f64>().unwrap_or(0.0)),
            ColumnType::Text => {
                let mut truncated = literal.to_string();
                while truncated.len() > ColumnType::MAX_TEXT_BYTES {
                    truncated.pop();
                }
                Self::Text(truncated)
            }
            ColumnType::Bool => {
                let t = literal.trim();
                Self::Bool(t.eq_ignore_ascii_case("true") || t == "1")
            }
        }
    }

    /// Formats the value in its canonical textual form (§4.1).
    #[must_use]
    pub fn format(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format_float_significant(*f),
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Formats a float with six significant digits, trimming trailing zeros the
/// way a human-facing cell should (e.g. `30` not `30.0000`, `3.14159`).
fn format_float_significant(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let rendered = format!("{f:.decimals$}");
    if rendered.contains('.') {
        let trimmed = rendered.trim_end_matches('0');
        let trimmed = trimmed.trim_end_matches('.');
        trimmed.to_string()
    } else {
        rendered
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_names_case_insensitively_with_aliases() {
        assert_eq!(ColumnType::parse_name("int"), Some(ColumnType::Int));
        assert_eq!(ColumnType::parse_name("INTEGER"), Some(ColumnType::Int));
        assert_eq!(ColumnType::parse_name("Double"), Some(ColumnType::Float));
        assert_eq!(ColumnType::parse_name("varchar"), Some(ColumnType::Text));
        assert_eq!(ColumnType::parse_name("Boolean"), Some(ColumnType::Bool));
        assert_eq!(ColumnType::parse_name("enum"), None);
    }

    #[test]
    fn ill_formed_numeric_literals_coerce_to_zero() {
        assert_eq!(Value::parse("not-a-number", ColumnType::Int), Value::Int(0));
        assert_eq!(Value::parse("", ColumnType::Float), Value::Float(0.0));
    }

    #[test]
    fn bool_literal_accepts_true_and_one_only() {
        assert_eq!(Value::parse("TRUE", ColumnType::Bool), Value::Bool(true));
        assert_eq!(Value::parse("1", ColumnType::Bool), Value::Bool(true));
        assert_eq!(Value::parse("0", ColumnType::Bool), Value::Bool(false));
        assert_eq!(Value::parse("yes", ColumnType::Bool), Value::Bool(false));
    }

    #[test]
    fn text_truncates_at_255_bytes() {
        let long = "x".repeat(300);
        let Value::Text(stored) = Value::parse(&long, ColumnType::Text) else {
            panic!("expected text");
        };
        assert_eq!(stored.len(), ColumnType::MAX_TEXT_BYTES);
    }

    #[test]
    fn null_formats_as_null_literal() {
        assert_eq!(Value::Null.format(), "NULL");
    }

    #[test]
    fn formats_integers_without_padding() {
        assert_eq!(Value::Int(30).format(), "30");
        assert_eq!(Value::Int(-7).format(), "-7");
    }

    #[test]
    fn formats_booleans_as_true_false() {
        assert_eq!(Value::Bool(true).format(), "true");
        assert_eq!(Value::Bool(false).format(), "false");
    }
}
