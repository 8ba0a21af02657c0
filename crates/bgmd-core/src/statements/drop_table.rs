//! `DROP TABLE <name>` (§4.5).

use crate::database::Database;
use crate::lexer::split_first_token;
use crate::resultset::ResultSet;

pub fn drop_table(db: &mut Database, rest: &str) -> ResultSet {
    let (name, _) = split_first_token(rest);
    if name.is_empty() {
        return ResultSet::err("Expected table name");
    }

    match db.table_index(name) {
        Some(idx) => {
            db.tables.remove(idx);
            ResultSet::ok(format!("Table '{name}' dropped"), 0)
        }
        None => ResultSet::err(format!("Table '{name}' not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::create_table::create_table;

    #[test]
    fn drops_existing_table_and_keeps_others_contiguous() {
        let mut d = Database::fresh("t.dbm").unwrap();
        create_table(&mut d, "a (x INT)");
        create_table(&mut d, "b (x INT)");
        create_table(&mut d, "c (x INT)");

        let r = drop_table(&mut d, "b");
        assert!(r.ok);
        assert_eq!(d.tables.len(), 2);
        assert_eq!(d.tables[0].name, "a");
        assert_eq!(d.tables[1].name, "c");
    }

    #[test]
    fn unknown_table_is_an_error() {
        let mut d = Database::fresh("t.dbm").unwrap();
        let r = drop_table(&mut d, "missing");
        assert!(!r.ok);
        assert_eq!(r.message, "Table 'missing' not found");
    }
}
