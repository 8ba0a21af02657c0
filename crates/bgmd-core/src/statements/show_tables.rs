//! `SHOW TABLES` (§4.10).

use crate::database::Database;
use crate::resultset::{ColumnHeader, ResultSet, Table as ResultTable};
use crate::value::ColumnType;

pub fn show_tables(db: &Database) -> ResultSet {
    let header = vec![
        ColumnHeader { name: "Table".to_string(), ty: ColumnType::Text },
        ColumnHeader { name: "Columns".to_string(), ty: ColumnType::Int },
        ColumnHeader { name: "Rows".to_string(), ty: ColumnType::Int },
    ];

    let rows = db
        .tables
        .iter()
        .map(|t| vec![t.name.clone(), t.columns.len().to_string(), t.live_row_count().to_string()])
        .collect();

    let n = db.tables.len();
    ResultSet::ok_with_table(format!("{n} row(s) returned"), ResultTable { header, rows })
}
