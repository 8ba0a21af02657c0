//! The WHERE predicate model: a single comparison or IS-(NOT-)NULL clause
//! (§4.13). There is deliberately no AND/OR — see the design note in §9.

use crate::lexer::strip_quotes;
use crate::row::Row;
use crate::schema::Column;
use crate::value::Value;

/// A comparison operator. `NotEq` covers both `!=` and `<>` (P7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// A parsed WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    IsNull { column: String },
    IsNotNull { column: String },
    Compare { column: String, op: CompareOp, literal: String },
}

impl Predicate {
    /// Parses a WHERE clause body (the text after the `WHERE` keyword).
    ///
    /// Tries the null forms first (`IS NOT NULL` before `IS NULL`, since the
    /// shorter form is a prefix-free match once `NOT` is excluded), then the
    /// operator set in the order `<= >= != <> = < >` so the two-character
    /// operators are never shadowed by their single-character prefix (§4.13).
    #[must_use]
    pub fn parse(clause: &str) -> Option<Self> {
        let clause = clause.trim();

        if let Some(col) = strip_suffix_ci(clause, "IS NOT NULL") {
            return Some(Self::IsNotNull { column: col.trim().to_string() });
        }
        if let Some(col) = strip_suffix_ci(clause, "IS NULL") {
            return Some(Self::IsNull { column: col.trim().to_string() });
        }

        const OPERATORS: &[(&str, CompareOp)] = &[
            ("<=", CompareOp::LtEq),
            (">=", CompareOp::GtEq),
            ("!=", CompareOp::NotEq),
            ("<>", CompareOp::NotEq),
            ("=", CompareOp::Eq),
            ("<", CompareOp::Lt),
            (">", CompareOp::Gt),
        ];

        for (token, op) in OPERATORS {
            if let Some(pos) = clause.find(token) {
                let column = clause[..pos].trim();
                let literal = clause[pos + token.len()..].trim();
                if column.is_empty() {
                    continue;
                }
                return Some(Self::Compare {
                    column: column.to_string(),
                    op: *op,
                    literal: strip_quotes(literal).to_string(),
                });
            }
        }

        None
    }

    /// Evaluates the predicate against one row. A column that doesn't exist
    /// in the schema makes the predicate false for every row (§4.13).
    #[must_use]
    pub fn eval(&self, columns: &[Column], row: &Row) -> bool {
        match self {
            Self::IsNull { column } => {
                find_value(columns, row, column).is_some_and(Value::is_null)
            }
            Self::IsNotNull { column } => {
                find_value(columns, row, column).is_some_and(|v| !v.is_null())
            }
            Self::Compare { column, op, literal } => {
                let Some((col, value)) = find_col_and_value(columns, row, column) else {
                    return false;
                };
                if value.is_null() {
                    return false;
                }
                let literal_value = Value::parse(literal, col.ty);
                compare(value, &literal_value).is_some_and(|ord| op.matches(ord))
            }
        }
    }
}

impl CompareOp {
    fn matches(self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};
        match self {
            Self::Eq => ordering == Equal,
            Self::NotEq => ordering != Equal,
            Self::Lt => ordering == Less,
            Self::LtEq => ordering != Greater,
            Self::Gt => ordering == Greater,
            Self::GtEq => ordering != Less,
        }
    }
}

fn find_col_and_value<'a>(
    columns: &'a [Column],
    row: &'a Row,
    name: &str,
) -> Option<(&'a Column, &'a Value)> {
    let idx = columns.iter().position(|c| c.name_matches(name))?;
    Some((&columns[idx], &row.values[idx]))
}

fn find_value<'a>(columns: &[Column], row: &'a Row, name: &str) -> Option<&'a Value> {
    find_col_and_value(columns, row, name).map(|(_, v)| v)
}

/// Type-aware ordering (§4.13): numeric for INT/FLOAT, case-insensitive
/// lexicographic for TEXT, `false < true` for BOOL.
fn compare(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Text(x), Value::Text(y)) => Some(x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase())),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Case-insensitive suffix match, returning the (trimmed) prefix before the
/// suffix when it matches.
fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    if s.len() < suffix.len() {
        return None;
    }
    let (head, tail) = s.split_at(s.len() - suffix.len());
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ColumnType;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", ColumnType::Int),
            Column::new("name", ColumnType::Text),
            Column::new("age", ColumnType::Int),
            Column::new("active", ColumnType::Bool),
        ]
    }

    fn row(id: i64, name: &str, age: Option<i64>, active: Option<bool>) -> Row {
        Row::new(vec![
            Value::Int(id),
            Value::Text(name.to_string()),
            age.map_or(Value::Null, Value::Int),
            active.map_or(Value::Null, Value::Bool),
        ])
    }

    #[test]
    fn parses_is_null_before_is_not_null_suffix_collision() {
        assert_eq!(
            Predicate::parse("age IS NULL"),
            Some(Predicate::IsNull { column: "age".into() })
        );
        assert_eq!(
            Predicate::parse("age IS NOT NULL"),
            Some(Predicate::IsNotNull { column: "age".into() })
        );
    }

    #[test]
    fn two_character_operators_take_priority_over_prefix() {
        let p = Predicate::parse("age <= 5").unwrap();
        assert_eq!(p, Predicate::Compare { column: "age".into(), op: CompareOp::LtEq, literal: "5".into() });

        let p = Predicate::parse("age != 5").unwrap();
        assert_eq!(p, Predicate::Compare { column: "age".into(), op: CompareOp::NotEq, literal: "5".into() });
    }

    #[test]
    fn neq_and_diamond_are_equivalent_p7() {
        let cols = columns();
        let r = row(1, "Alice", Some(30), Some(true));
        let neq = Predicate::parse("age != 25").unwrap();
        let diamond = Predicate::parse("age <> 25").unwrap();
        assert_eq!(neq.eval(&cols, &r), diamond.eval(&cols, &r));
    }

    #[test]
    fn quoted_literal_strips_symmetric_quotes() {
        let p = Predicate::parse("name = 'Alice'").unwrap();
        assert_eq!(p, Predicate::Compare { column: "name".into(), op: CompareOp::Eq, literal: "Alice".into() });
    }

    #[test]
    fn text_comparison_is_case_insensitive_p6() {
        let cols = columns();
        let r = row(1, "Alice", Some(30), Some(true));
        let p = Predicate::parse("name = 'alice'").unwrap();
        assert!(p.eval(&cols, &r));
    }

    #[test]
    fn null_value_never_matches_comparison() {
        let cols = columns();
        let r = row(2, "Bob", None, None);
        let p = Predicate::parse("age > 0").unwrap();
        assert!(!p.eval(&cols, &r));
    }

    #[test]
    fn unknown_column_is_always_false() {
        let cols = columns();
        let r = row(1, "Alice", Some(30), Some(true));
        let p = Predicate::parse("nope = 1").unwrap();
        assert!(!p.eval(&cols, &r));
        let p2 = Predicate::parse("nope IS NULL").unwrap();
        assert!(!p2.eval(&cols, &r));
    }

    #[test]
    fn bool_ordering_false_lt_true() {
        let cols = columns();
        let r = row(1, "Alice", Some(30), Some(false));
        let p = Predicate::parse("active < true").unwrap();
        assert!(p.eval(&cols, &r));
    }
}
