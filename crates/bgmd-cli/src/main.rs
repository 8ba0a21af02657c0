//! bgmd CLI
//!
//! Interactive shell for the bgmd single-file database engine.

mod printer;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use bgmd_core::Database;

/// Interactive shell for a bgmd database file.
#[derive(Parser)]
#[command(name = "bgmd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the database file. A `.dbm` extension is appended if missing.
    path: PathBuf,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let path = with_dbm_extension(cli.path);
    let mut db = Database::open(&path)?;
    info!(path = %path.display(), "database ready");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut buffer = String::new();

    print_prompt(&buffer);
    while let Some(line) = lines.next() {
        let line = line?;
        let trimmed = line.trim();

        if buffer.is_empty() && QUIT_WORDS.contains(&trimmed.to_ascii_lowercase().as_str()) {
            break;
        }

        if buffer.is_empty() && is_single_line_command(trimmed) {
            run_statement(&mut db, trimmed);
            print_prompt(&buffer);
            continue;
        }

        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(trimmed);

        if buffer.trim_end().ends_with(';') {
            let statement = std::mem::take(&mut buffer);
            run_statement(&mut db, &statement);
        }

        print_prompt(&buffer);
    }

    db.close()?;
    Ok(())
}

fn with_dbm_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("dbm")
    }
}

/// `SHOW TABLES`, `DESCRIBE`/`DESC`, and `VACUUM` read naturally as one-liners
/// without a trailing semicolon (§6).
fn is_single_line_command(line: &str) -> bool {
    let upper = line.trim_start().to_ascii_uppercase();
    upper.starts_with("SHOW TABLES")
        || upper.starts_with("DESCRIBE")
        || upper.starts_with("DESC ")
        || upper == "VACUUM"
}

fn run_statement(db: &mut Database, statement: &str) {
    if statement.trim().is_empty() {
        return;
    }
    let result = db.exec(statement);
    if let Some(table) = &result.table {
        print!("{}", printer::render_table(table));
    }
    println!("{}", result.message);
}

fn print_prompt(buffer: &str) {
    let prompt = if buffer.is_empty() { "db> " } else { "... " };
    print!("{prompt}");
    let _ = io::stdout().flush();
}
