//! `UPDATE <table> SET <col>=<value>[, ...] [WHERE <predicate>]` (§4.8).

use crate::database::Database;
use crate::lexer::{split_first_token, split_on_keyword, split_top_level_commas, strip_prefix_ci, strip_quotes};
use crate::predicate::Predicate;
use crate::resultset::ResultSet;
use crate::value::Value;

pub fn update(db: &mut Database, rest: &str) -> ResultSet {
    let (table_name, after_name) = split_first_token(rest);
    if table_name.is_empty() {
        return ResultSet::err("Expected table name");
    }

    let Some(after_set) = strip_prefix_ci(after_name, "SET") else {
        return ResultSet::err("Expected SET");
    };

    let (assignments_str, where_clause) = match split_on_keyword(after_set, "WHERE") {
        Some((before, clause)) => (before.trim(), Some(clause.trim())),
        None => (after_set.trim(), None),
    };

    let Some(idx) = db.table_index(table_name) else {
        return ResultSet::err(format!("Table '{table_name}' not found"));
    };

    let mut assignments = Vec::new();
    for fragment in split_top_level_commas(assignments_str) {
        let Some((col, literal)) = fragment.split_once('=') else {
            return ResultSet::err(format!("Malformed SET assignment '{fragment}'"));
        };
        assignments.push((col.trim().to_string(), literal.trim().to_string()));
    }

    let predicate = match where_clause {
        Some(clause) => match Predicate::parse(clause) {
            Some(p) => Some(p),
            None => return ResultSet::err("Malformed WHERE clause"),
        },
        None => None,
    };

    let table = &mut db.tables[idx];
    let mut updated = 0usize;

    for row in &mut table.rows {
        if row.deleted {
            continue;
        }
        if let Some(p) = &predicate {
            if !p.eval(&table.columns, row) {
                continue;
            }
        }

        for (col, literal) in &assignments {
            // Unknown target column: silently ignored per §9 (open question,
            // retained as-is rather than surfaced as an error).
            let Some(col_idx) = table.columns.iter().position(|c| c.name_matches(col)) else {
                continue;
            };
            row.values[col_idx] = if literal.eq_ignore_ascii_case("NULL") {
                Value::Null
            } else {
                Value::parse(strip_quotes(literal), table.columns[col_idx].ty)
            };
        }
        updated += 1;
    }

    ResultSet::ok(format!("{updated} row(s) updated"), updated)
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
        d
    }

    #[test]
    fn updates_matching_rows_and_reports_count() {
        let mut d = seeded();
        let r = update(&mut d, "users SET active=false WHERE name='Alice'");
        assert!(r.ok);
        assert_eq!(r.message, "1 row(s) updated");
        assert_eq!(d.tables[0].rows[0].values[3], Value::Bool(false));
    }

    #[test]
    fn unknown_set_target_is_silently_skipped() {
        let mut d = seeded();
        let r = update(&mut d, "users SET ghost=1, age=99 WHERE id=1");
        assert!(r.ok);
        assert_eq!(d.tables[0].rows[0].values[2], Value::Int(99));
    }

    #[test]
    fn update_with_no_where_touches_all_live_rows() {
        let mut d = seeded();
        insert(&mut d, "users VALUES (2, 'Bob', 20, false)");
        let r = update(&mut d, "users SET active=true");
        assert_eq!(r.affected, 2);
    }

    #[test]
    fn unknown_table_is_an_error() {
        let mut d = Database::fresh("t.dbm").unwrap();
        let r = update(&mut d, "missing SET a=1");
        assert!(!r.ok);
    }
}
