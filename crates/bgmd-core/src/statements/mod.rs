//! One handler per supported statement (§4.4-§4.12).

mod create_table;
mod delete;
mod describe;
mod drop_table;
mod insert;
mod select;
mod show_tables;
mod update;
mod vacuum;

pub use create_table::create_table;
pub use delete::delete;
pub use describe::describe;
pub use drop_table::drop_table;
pub use insert::insert;
pub use select::select;
pub use show_tables::show_tables;
pub use update::update;
pub use vacuum::vacuum;

use crate::lexer::split_first_token;

/// True for every statement except SELECT, SHOW, and DESCRIBE/DESC — the
/// handlers that trigger a save on success (§4.3).
#[must_use]
pub fn is_mutating(command: &str) -> bool {
    let (leading, _) = split_first_token(command);
    !matches!(
        leading.to_ascii_uppercase().as_str(),
        "SELECT" | "SHOW" | "DESCRIBE" | "DESC"
    )
}
