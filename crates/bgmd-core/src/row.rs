//! In-memory row and table store.

use crate::schema::Column;
use crate::value::Value;

/// A row of a table: one value per column, plus a tombstone flag.
///
/// Rows never move between tables (§3) and a tombstoned row keeps its slot
/// until `VACUUM` drops it (I4).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
    pub deleted: bool,
}

impl Row {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            deleted: false,
        }
    }
}

/// An in-memory table: its schema and its row sequence.
///
/// `next_id` is incremented on every successful `INSERT` and otherwise
/// opaque to the engine (§9): nothing reads it back to auto-assign an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub next_id: i64,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::with_capacity(16),
            next_id: 0,
        }
    }

    /// Finds a column's index by case-insensitive name (I3).
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name_matches(name))
    }

    /// Number of non-tombstoned rows (I4) — what `SHOW TABLES` reports.
    #[must_use]
    pub fn live_row_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.deleted).count()
    }

    /// Drops tombstoned rows, compacting the row list in place (§4.12).
    /// Returns the number of rows purged. `next_id` is untouched (I6, §9).
    pub fn vacuum(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !r.deleted);
        before - self.rows.len()
    }
}
