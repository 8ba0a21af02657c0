//! `SELECT <col_list|*> FROM <table> [WHERE <predicate>]` (§4.7).

use crate::database::Database;
use crate::lexer::{split_on_keyword, split_top_level_commas};
use crate::predicate::Predicate;
use crate::resultset::{ColumnHeader, ResultSet, Table as ResultTable};

pub fn select(db: &Database, rest: &str) -> ResultSet {
    let Some((col_list, after_cols)) = split_on_keyword(rest, "FROM") else {
        return ResultSet::err("Expected FROM");
    };
    let col_list = col_list.trim();
    let after_cols = after_cols.trim_start();

    let (table_name, where_clause) = match split_on_keyword(after_cols, "WHERE") {
        Some((before, clause)) => (before.trim(), Some(clause.trim())),
        None => (after_cols.trim(), None),
    };
    let table_name = first_word(table_name);

    let Some(idx) = db.table_index(table_name) else {
        return ResultSet::err(format!("Table '{table_name}' not found"));
    };
    let table = &db.tables[idx];

    let projected: Vec<usize> = if col_list.trim() == "*" {
        (0..table.columns.len()).collect()
    } else {
        let mut indices = Vec::new();
        for name in split_top_level_commas(col_list) {
            match table.column_index(&name) {
                Some(i) => indices.push(i),
                None => return ResultSet::err(format!("Unknown column '{name}'")),
            }
        }
        indices
    };

    let predicate = match where_clause {
        Some(clause) => match Predicate::parse(clause) {
            Some(p) => Some(p),
            None => return ResultSet::err("Malformed WHERE clause"),
        },
        None => None,
    };

    let header = projected
        .iter()
        .map(|&i| ColumnHeader { name: table.columns[i].name.clone(), ty: table.columns[i].ty })
        .collect();

    let mut rows = Vec::new();
    for row in &table.rows {
        if row.deleted {
            continue;
        }
        if let Some(p) = &predicate {
            if !p.eval(&table.columns, row) {
                continue;
            }
        }
        rows.push(projected.iter().map(|&i| row.values[i].format()).collect());
    }

    let n = rows.len();
    ResultSet::ok_with_table(format!("{n} row(s) returned"), ResultTable { header, rows })
}

fn first_word(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::create_table::create_table;
    use crate::statements::insert::insert;

    fn seeded() -> Database {
        let mut d = Database::fresh("t.dbm").unwrap();
        create_table(&mut d, "users (id INT PRIMARY KEY, name TEXT NOT NULL, age INT, active BOOL)");
        insert(&mut d, "users VALUES (1, 'Alice', 30, true)");
        insert(&mut d, "users (id, name) VALUES (2, 'Bob')");
        d
    }

    #[test]
    fn projects_listed_columns_with_where() {
        let d = seeded();
        let r = select(&d, "name, age FROM users WHERE age > 25");
        assert!(r.ok);
        let t = r.table.unwrap();
        assert_eq!(t.rows, vec![vec!["Alice".to_string(), "30".to_string()]]);
        assert_eq!(r.message, "1 row(s) returned");
    }

    #[test]
    fn star_expands_to_all_columns_in_order() {
        let d = seeded();
        let r = select(&d, "* FROM users WHERE id = 2");
        let t = r.table.unwrap();
        assert_eq!(t.rows[0], vec!["2", "Bob", "NULL", "NULL"]);
    }

    #[test]
    fn is_null_predicate_matches_unset_columns() {
        let d = seeded();
        let r = select(&d, "* FROM users WHERE age IS NULL");
        let t = r.table.unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0][1], "Bob");
    }

    #[test]
    fn unknown_table_is_an_error_s7() {
        let d = Database::fresh("t.dbm").unwrap();
        let r = select(&d, "* FROM missing");
        assert!(!r.ok);
        assert_eq!(r.message, "Table 'missing' not found");
    }

    #[test]
    fn select_never_touches_tombstoned_rows() {
        let mut d = seeded();
        crate::statements::delete::delete(&mut d, "users WHERE id = 1");
        let r = select(&d, "* FROM users");
        let t = r.table.unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0][0], "2");
    }
}
