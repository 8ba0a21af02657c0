//! `DESCRIBE <table>` / `DESC <table>` (§4.11).

use crate::database::Database;
use crate::lexer::split_first_token;
use crate::resultset::{ColumnHeader, ResultSet, Table as ResultTable};
use crate::value::ColumnType;

pub fn describe(db: &Database, rest: &str) -> ResultSet {
    let (table_name, _) = split_first_token(rest);
    if table_name.is_empty() {
        return ResultSet::err("Expected table name");
    }

    let Some(idx) = db.table_index(table_name) else {
        return ResultSet::err(format!("Table '{table_name}' not found"));
    };
    let table = &db.tables[idx];

    let header = vec![
        ColumnHeader { name: "Column".to_string(), ty: ColumnType::Text },
        ColumnHeader { name: "Type".to_string(), ty: ColumnType::Text },
        ColumnHeader { name: "Nullable".to_string(), ty: ColumnType::Text },
        ColumnHeader { name: "PK".to_string(), ty: ColumnType::Text },
    ];

    let rows = table
        .columns
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.ty.name().to_string(),
                yes_no(c.nullable),
                yes_no(c.primary_key),
            ]
        })
        .collect();

    let n = table.columns.len();
    ResultSet::ok_with_table(format!("{n} column(s)"), ResultTable { header, rows })
}

fn yes_no(b: bool) -> String {
    if b { "YES".to_string() } else { "NO".to_string() }
}
