//! # bgmd-core
//!
//! A single-file relational database engine: typed tables, a minimal SQL
//! dialect, and a length-prefixed binary persistence format.
//!
//! This crate provides:
//! - A typed [`value::Value`] model (NULL, INT, FLOAT, TEXT, BOOL)
//! - A dispatcher for nine statements (`CREATE TABLE`, `DROP TABLE`,
//!   `INSERT INTO`, `SELECT`, `UPDATE`, `DELETE FROM`, `SHOW TABLES`,
//!   `DESCRIBE`, `VACUUM`) built from `&str` slicing rather than a token
//!   stream — the grammar is deliberately small (§4, §9)
//! - Tombstone-based row deletion, reclaimed by an explicit `VACUUM`
//! - A binary on-disk format loaded and saved as a whole on every mutation
//!
//! ## Example
//!
//! ```rust,no_run
//! use bgmd_core::Database;
//!
//! let mut db = Database::fresh("demo.dbm").unwrap();
//! db.exec("CREATE TABLE users (id INT PRIMARY KEY, name TEXT NOT NULL)");
//! db.exec("INSERT INTO users VALUES (1, 'Alice')");
//! let result = db.exec("SELECT * FROM users");
//! assert!(result.ok);
//! ```
//!
//! `exec` never panics and never returns an `Err` — every failure, from a
//! malformed statement to a disk write error, is carried inside the
//! returned [`resultset::ResultSet`] (§7).

pub mod database;
pub mod error;
pub mod lexer;
pub mod predicate;
pub mod resultset;
pub mod row;
pub mod schema;
mod statements;
pub mod storage;
pub mod value;

pub use database::Database;
pub use error::{DbError, Result};
pub use resultset::ResultSet;
pub use value::{ColumnType, Value};
