//! `CREATE TABLE <name> ( <col_def> [, <col_def>]* )` (§4.4).

use crate::database::Database;
use crate::lexer::{contains_ci, extract_parens, split_first_token, split_top_level_commas};
use crate::resultset::ResultSet;
use crate::row::Table;
use crate::schema::{Column, MAX_COLUMNS, MAX_NAME_BYTES, MAX_TABLES};
use crate::value::ColumnType;

pub fn create_table(db: &mut Database, rest: &str) -> ResultSet {
    let (name, after_name) = split_first_token(rest);
    if name.is_empty() {
        return ResultSet::err("Expected table name");
    }
    if name.len() > MAX_NAME_BYTES {
        return ResultSet::err(format!("Table name '{name}' exceeds {MAX_NAME_BYTES} bytes"));
    }

    let Some((inside, _after_parens)) = extract_parens(after_name) else {
        return ResultSet::err("Expected '(' after table name");
    };

    if db.table_index(name).is_some() {
        return ResultSet::err(format!("Table '{name}' exists"));
    }
    if db.tables.len() >= MAX_TABLES {
        return ResultSet::err("Too many tables");
    }

    let mut columns = Vec::new();
    for fragment in split_top_level_commas(inside) {
        if fragment.is_empty() {
            continue;
        }
        match parse_column_def(&fragment) {
            Ok(col) => columns.push(col),
            Err(e) => return ResultSet::err(e),
        }
    }

    if columns.is_empty() {
        return ResultSet::err("Table must have at least one column");
    }
    if columns.len() > MAX_COLUMNS {
        return ResultSet::err("Too many columns");
    }

    let ncols = columns.len();
    db.tables.push(Table::new(name, columns));
    ResultSet::ok(format!("Table '{name}' created ({ncols} cols)"), 0)
}

/// Parses one `<col_name> <TYPE> [PRIMARY KEY] [NOT NULL]` fragment. The two
/// modifiers may appear in either order; presence is a case-insensitive
/// substring check on the whole fragment, per §4.4.
fn parse_column_def(fragment: &str) -> Result<Column, String> {
    let (col_name, after_name) = split_first_token(fragment);
    if col_name.is_empty() {
        return Err("Expected column name".to_string());
    }
    if col_name.len() > MAX_NAME_BYTES {
        return Err(format!("Column name '{col_name}' exceeds {MAX_NAME_BYTES} bytes"));
    }
    let (type_name, _) = split_first_token(after_name);
    if type_name.is_empty() {
        return Err(format!("Expected type for column '{col_name}'"));
    }

    let Some(ty) = ColumnType::parse_name(type_name) else {
        return Err(format!("Unknown type '{type_name}'"));
    };

    let primary_key = contains_ci(fragment, "PRIMARY KEY");
    let not_null = contains_ci(fragment, "NOT NULL");

    Ok(Column {
        name: col_name.to_string(),
        ty,
        nullable: !not_null,
        primary_key,
    })
}
