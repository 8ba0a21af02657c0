//! The database handle and the SQL dispatcher (§4.3).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{DbError, Result};
use crate::lexer::split_first_token;
use crate::resultset::ResultSet;
use crate::row::Table;
use crate::statements;
use crate::storage;

/// Longest input `exec` will dispatch; longer input is rejected up front (§6).
pub const MAX_COMMAND_BYTES: usize = 4096;

/// An open database: its header plus its tables (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub path: PathBuf,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub tables: Vec<Table>,
}

impl Database {
    /// Opens `path`, loading it if present or starting fresh if not (§6).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        storage::load(path.as_ref())
    }

    /// A brand-new, empty database named after `path`'s filename stem, with
    /// the current time as its creation timestamp (§6).
    pub fn fresh(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_str().map(str::to_owned))
            .unwrap_or(Some(String::new()))
            .ok_or_else(|| DbError::PathEncoding(path.to_path_buf()))?;
        Ok(Self {
            path: path.to_path_buf(),
            name,
            created_at: Utc::now(),
            tables: Vec::new(),
        })
    }

    /// Persists the full database to disk, overwriting whatever was there
    /// (§4.2, §5).
    pub fn save(&self) -> Result<()> {
        storage::save(self)
    }

    /// Saves one final time and consumes the handle (§3, Lifecycle).
    pub fn close(self) -> Result<()> {
        let path = self.path.clone();
        self.save()?;
        info!(path = %path.display(), "database closed");
        Ok(())
    }

    /// Case-insensitive table lookup by name (I3).
    #[must_use]
    pub fn table_index(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Executes one SQL statement, mutating the database and returning its
    /// result (§4.3). Never panics or propagates an error out of this call
    /// (§7) — every failure is carried inside the returned [`ResultSet`].
    pub fn exec(&mut self, input: &str) -> ResultSet {
        if input.len() > MAX_COMMAND_BYTES {
            return ResultSet::err("Command too long");
        }

        let command = input.trim();
        let command = command.strip_suffix(';').unwrap_or(command).trim();
        if command.is_empty() {
            return ResultSet::ok("", 0);
        }

        let (leading, _) = split_first_token(command);
        debug!(keyword = %leading.to_ascii_uppercase(), "dispatching statement");

        let result = self.dispatch(command);

        if result.ok && statements::is_mutating(command) {
            if let Err(e) = self.save() {
                return ResultSet::err(format!("failed to persist database: {e}"));
            }
        }

        result
    }

    fn dispatch(&mut self, command: &str) -> ResultSet {
        if let Some(rest) = crate::lexer::strip_prefix_ci(command, "CREATE TABLE") {
            return statements::create_table(self, rest);
        }
        if let Some(rest) = crate::lexer::strip_prefix_ci(command, "DROP TABLE") {
            return statements::drop_table(self, rest);
        }
        if let Some(rest) = crate::lexer::strip_prefix_ci(command, "INSERT INTO") {
            return statements::insert(self, rest);
        }
        if let Some(rest) = crate::lexer::strip_prefix_ci(command, "SELECT") {
            return statements::select(self, rest);
        }
        if let Some(rest) = crate::lexer::strip_prefix_ci(command, "UPDATE") {
            return statements::update(self, rest);
        }
        if let Some(rest) = crate::lexer::strip_prefix_ci(command, "DELETE FROM") {
            return statements::delete(self, rest);
        }
        if crate::lexer::strip_prefix_ci(command, "SHOW TABLES").is_some() {
            return statements::show_tables(self);
        }
        if let Some(rest) = crate::lexer::strip_prefix_ci(command, "DESCRIBE")
            .or_else(|| crate::lexer::strip_prefix_ci(command, "DESC"))
        {
            return statements::describe(self, rest);
        }
        if crate::lexer::strip_prefix_ci(command, "VACUUM").is_some() {
            return statements::vacuum(self);
        }

        ResultSet::err("Unknown command")
    }
}
