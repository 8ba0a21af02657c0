//! Errors that cross the `open`/`close`/persistence boundary.
//!
//! Statement-level failures (unknown table, bad syntax, …) are never
//! represented here — they are carried as data inside [`crate::resultset::ResultSet`]
//! so that `Database::exec` never unwinds (§7).

/// Errors from opening, saving, or loading a database file.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Any failure reading or writing the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file's magic number or version didn't match (§4.2).
    #[error("bad file format: {reason}")]
    Format { reason: String },

    /// The path's filename stem is not valid UTF-8, so it cannot become the
    /// database name (§3, Database header).
    #[error("path is not valid UTF-8: {0}")]
    PathEncoding(std::path::PathBuf),
}

/// Result type for operations that cross the file I/O boundary.
pub type Result<T> = std::result::Result<T, DbError>;
