//! `DELETE FROM <table> [WHERE <predicate>]` (§4.9).

use crate::database::Database;
use crate::lexer::{split_first_token, split_on_keyword};
use crate::predicate::Predicate;
use crate::resultset::ResultSet;

pub fn delete(db: &mut Database, rest: &str) -> ResultSet {
    let (table_name, where_clause) = match split_on_keyword(rest, "WHERE") {
        Some((before, clause)) => (split_first_token(before).0, Some(clause.trim())),
        None => (split_first_token(rest).0, None),
    };

    let Some(idx) = db.table_index(table_name) else {
        return ResultSet::err(format!("Table '{table_name}' not found"));
    };

    let predicate = match where_clause {
        Some(clause) => match Predicate::parse(clause) {
            Some(p) => Some(p),
            None => return ResultSet::err("Malformed WHERE clause"),
        },
        None => None,
    };

    let table = &mut db.tables[idx];
    let mut deleted = 0usize;
    for row in &mut table.rows {
        if row.deleted {
            continue;
        }
        if let Some(p) = &predicate {
            if !p.eval(&table.columns, row) {
                continue;
            }
        }
        row.deleted = true;
        deleted += 1;
    }

    ResultSet::ok(format!("{deleted} row(s) deleted"), deleted)
}
