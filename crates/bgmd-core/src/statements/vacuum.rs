//! `VACUUM` (§4.12).

use crate::database::Database;
use crate::resultset::ResultSet;

pub fn vacuum(db: &mut Database) -> ResultSet {
    let purged: usize = db.tables.iter_mut().map(crate::row::Table::vacuum).sum();
    ResultSet::ok(format!("VACUUM: purged {purged} row(s)"), purged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::create_table::create_table;
    use crate::statements::delete::delete;
    use crate::statements::insert::insert;

    #[test]
    fn purges_tombstones_across_every_table() {
        let mut d = Database::fresh("t.dbm").unwrap();
        create_table(&mut d, "a (id INT PRIMARY KEY)");
        create_table(&mut d, "b (id INT PRIMARY KEY)");
        insert(&mut d, "a VALUES (1)");
        insert(&mut d, "a VALUES (2)");
        insert(&mut d, "b VALUES (1)");
        delete(&mut d, "a WHERE id = 1");
        delete(&mut d, "b WHERE id = 1");

        let r = vacuum(&mut d);
        assert!(r.ok);
        assert_eq!(r.message, "VACUUM: purged 2 row(s)");
        assert_eq!(d.tables[0].rows.len(), 1);
        assert_eq!(d.tables[1].rows.len(), 0);
    }

    #[test]
    fn vacuum_is_idempotent_p3() {
        let mut d = Database::fresh("t.dbm").unwrap();
        create_table(&mut d, "a (id INT PRIMARY KEY)");
        insert(&mut d, "a VALUES (1)");
        delete(&mut d, "a WHERE id = 1");

        vacuum(&mut d);
        let r = vacuum(&mut d);
        assert_eq!(r.message, "VACUUM: purged 0 row(s)");
    }
}
