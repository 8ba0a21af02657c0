//! `INSERT INTO <table> [( <col_list> )] VALUES ( <value_list> )` (§4.6).

use crate::database::Database;
use crate::lexer::{extract_parens, split_first_token, split_top_level_commas, strip_prefix_ci, strip_quotes};
use crate::resultset::ResultSet;
use crate::row::Row;
use crate::value::Value;

pub fn insert(db: &mut Database, rest: &str) -> ResultSet {
    let (table_name, after_name) = split_first_token(rest);
    if table_name.is_empty() {
        return ResultSet::err("Expected table name");
    }

    let Some(idx) = db.table_index(table_name) else {
        return ResultSet::err(format!("Table '{table_name}' not found"));
    };

    let (explicit_cols, after_cols) = if after_name.trim_start().starts_with('(') {
        let Some((inside, rest)) = extract_parens(after_name) else {
            return ResultSet::err("Malformed column list");
        };
        (Some(split_top_level_commas(inside)), rest)
    } else {
        (None, after_name)
    };

    let Some(after_values_kw) = strip_prefix_ci(after_cols, "VALUES") else {
        return ResultSet::err("Expected VALUES");
    };
    let Some((inside, _)) = extract_parens(after_values_kw) else {
        return ResultSet::err("Expected '(' after VALUES");
    };
    let literals = split_top_level_commas(inside);

    let ncols = db.tables[idx].columns.len();
    let target_columns: Vec<usize> = match &explicit_cols {
        Some(names) => {
            let mut indices = Vec::with_capacity(names.len());
            for name in names {
                match db.tables[idx].column_index(name) {
                    Some(i) => indices.push(i),
                    None => return ResultSet::err(format!("Unknown column '{name}'")),
                }
            }
            indices
        }
        None => (0..ncols).collect(),
    };

    if literals.len() != target_columns.len() {
        return ResultSet::err(format!(
            "Expected {} value(s), got {}",
            target_columns.len(),
            literals.len()
        ));
    }

    let mut values = vec![Value::Null; ncols];
    for (literal, &col_idx) in literals.iter().zip(&target_columns) {
        let literal = literal.trim();
        values[col_idx] = if literal.eq_ignore_ascii_case("NULL") {
            Value::Null
        } else {
            let ty = db.tables[idx].columns[col_idx].ty;
            Value::parse(strip_quotes(literal), ty)
        };
    }

    let table = &mut db.tables[idx];
    table.rows.push(Row::new(values));
    table.next_id += 1;

    ResultSet::ok("1 row(s) inserted", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::create_table::create_table;

    fn users_db() -> Database {
        let mut d = Database::fresh("t.dbm").unwrap();
        create_table(&mut d, "users (id INT PRIMARY KEY, name TEXT NOT NULL, age INT, active BOOL)");
        d
    }

    #[test]
    fn positional_insert_fills_all_columns() {
        let mut d = users_db();
        let r = insert(&mut d, "users VALUES (1, 'Alice', 30, true)");
        assert!(r.ok);
        let row = &d.tables[0].rows[0];
        assert_eq!(row.values[0], Value::Int(1));
        assert_eq!(row.values[1], Value::Text("Alice".into()));
        assert_eq!(row.values[2], Value::Int(30));
        assert_eq!(row.values[3], Value::Bool(true));
        assert_eq!(d.tables[0].next_id, 1);
    }

    #[test]
    fn partial_column_list_nulls_unlisted_columns() {
        let mut d = users_db();
        insert(&mut d, "users (id, name) VALUES (2, 'Bob')");
        let row = &d.tables[0].rows[0];
        assert_eq!(row.values[0], Value::Int(2));
        assert_eq!(row.values[1], Value::Text("Bob".into()));
        assert_eq!(row.values[2], Value::Null);
        assert_eq!(row.values[3], Value::Null);
    }

    #[test]
    fn unquoted_null_literal_inserts_null() {
        let mut d = users_db();
        insert(&mut d, "users VALUES (1, 'Alice', NULL, true)");
        assert_eq!(d.tables[0].rows[0].values[2], Value::Null);
    }

    #[test]
    fn string_into_int_column_coerces_per_codec_p5() {
        let mut d = users_db();
        insert(&mut d, "users VALUES ('not-an-int', 'Alice', 30, true)");
        assert_eq!(d.tables[0].rows[0].values[0], Value::Int(0));
    }

    #[test]
    fn unknown_table_is_an_error() {
        let mut d = Database::fresh("t.dbm").unwrap();
        let r = insert(&mut d, "missing VALUES (1)");
        assert!(!r.ok);
    }

    #[test]
    fn unknown_column_in_list_is_an_error() {
        let mut d = users_db();
        let r = insert(&mut d, "users (nope) VALUES (1)");
        assert!(!r.ok);
    }
}
