//! Binary file format: a single flat, length-prefixed, little-endian, fully
//! self-describing layout (§4.2). Every mutating statement rewrites the
//! whole file; there is no journal and no delta append.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::row::{Row, Table};
use crate::schema::Column;
use crate::value::{ColumnType, Value};

/// Four bytes "BGMD", written little-endian: on disk the byte sequence is
/// `42 47 4D 44` ('B' 'G' 'M' 'D'), which read back as a little-endian u32
/// is `0x444D4742` (§6).
pub const MAGIC: u32 = 0x444D_4742;
pub const FORMAT_VERSION: u32 = 1;

/// Loads a database from `path`. A missing file is not an error: it yields a
/// freshly-initialized, empty database named after the path's stem (§4.2).
pub fn load(path: &Path) -> Result<Database> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "database file absent, starting fresh");
            return Ok(Database::fresh(path)?);
        }
        Err(e) => return Err(e.into()),
    };

    let mut cursor = Cursor::new(&bytes);

    let magic = cursor.read_u32()?;
    if magic != MAGIC {
        return Err(DbError::Format {
            reason: format!("bad magic number: {magic:#x}"),
        });
    }
    let version = cursor.read_u32()?;
    if version != FORMAT_VERSION {
        warn!(version, "unexpected format version, attempting to read anyway");
    }

    let name = cursor.read_string()?;
    let created_at_secs = cursor.read_i64()?;
    let created_at = DateTime::<Utc>::from_timestamp(created_at_secs, 0).unwrap_or_else(Utc::now);
    let ntables = cursor.read_u32()? as usize;

    let mut tables = Vec::with_capacity(ntables);
    for _ in 0..ntables {
        match read_table(&mut cursor) {
            Ok((table, truncated)) => {
                tables.push(table);
                if truncated {
                    warn!("short read while loading table rows, stopping load here");
                    break;
                }
            }
            Err(_) => {
                warn!("short read while loading a table's header, stopping load here");
                break;
            }
        }
    }

    info!(path = %path.display(), tables = tables.len(), "database loaded");
    Ok(Database { path: path.to_path_buf(), name, created_at, tables })
}

/// Rewrites the entire file from the in-memory database (§4.2, §5: atomic at
/// the granularity of one successful `exec` call).
pub fn save(db: &Database) -> Result<()> {
    let mut buf = Vec::new();
    buf.write_u32(MAGIC);
    buf.write_u32(FORMAT_VERSION);
    buf.write_string(&db.name);
    buf.write_i64(db.created_at.timestamp());
    buf.write_u32(db.tables.len() as u32);

    for table in &db.tables {
        write_table(&mut buf, table);
    }

    match fs::File::create(&db.path).and_then(|mut f| f.write_all(&buf).and_then(|()| f.flush())) {
        Ok(()) => {
            info!(path = %db.path.display(), bytes = buf.len(), "database saved");
            Ok(())
        }
        Err(e) => {
            error!(path = %db.path.display(), error = %e, "failed to save database");
            Err(e.into())
        }
    }
}

/// Reads one table. A short read inside the header (name, columns, row
/// count, `next_id`) is unrecoverable and propagates as `Err`, discarding
/// this table entirely — there's no schema to hang partial rows off of. A
/// short read inside the row list, however, truncates `rows` at the last
/// fully-read row rather than discarding the table (§4.2); the returned
/// `bool` tells the caller whether that happened, so it knows to stop
/// loading any further tables rather than trust a misaligned cursor.
fn read_table(cursor: &mut Cursor<'_>) -> io::Result<(Table, bool)> {
    let name = cursor.read_string()?;
    let ncols = cursor.read_u16()? as usize;
    let mut columns = Vec::with_capacity(ncols);
    for _ in 0..ncols {
        columns.push(read_column(cursor)?);
    }
    let nrows = cursor.read_u32()? as usize;
    let next_id = i64::from(cursor.read_i32()?);

    let mut rows = Vec::with_capacity(nrows);
    let mut truncated = false;
    for _ in 0..nrows {
        match read_row(cursor, &columns) {
            Ok(row) => rows.push(row),
            Err(_) => {
                truncated = true;
                break;
            }
        }
    }

    Ok((Table { name, columns, rows, next_id }, truncated))
}

fn write_table(buf: &mut Vec<u8>, table: &Table) {
    buf.write_string(&table.name);
    buf.write_u16(table.columns.len() as u16);
    for col in &table.columns {
        write_column(buf, col);
    }
    buf.write_u32(table.rows.len() as u32);
    debug_assert!(i32::try_from(table.next_id).is_ok(), "next_id exceeds the on-disk i32 field");
    buf.write_i32(table.next_id as i32);
    for row in &table.rows {
        write_row(buf, row);
    }
}

fn read_column(cursor: &mut Cursor<'_>) -> io::Result<Column> {
    let name = cursor.read_string()?;
    let ty = match cursor.read_u8()? {
        0 => ColumnType::Int,
        1 => ColumnType::Float,
        2 => ColumnType::Text,
        3 => ColumnType::Bool,
        other => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown column type tag {other}"),
            ));
        }
    };
    let nullable = cursor.read_u8()? != 0;
    let primary_key = cursor.read_u8()? != 0;
    Ok(Column { name, ty, nullable, primary_key })
}

fn write_column(buf: &mut Vec<u8>, col: &Column) {
    buf.write_string(&col.name);
    buf.write_u8(type_tag(col.ty));
    buf.write_u8(u8::from(col.nullable));
    buf.write_u8(u8::from(col.primary_key));
}

const fn type_tag(ty: ColumnType) -> u8 {
    match ty {
        ColumnType::Int => 0,
        ColumnType::Float => 1,
        ColumnType::Text => 2,
        ColumnType::Bool => 3,
    }
}

fn read_row(cursor: &mut Cursor<'_>, columns: &[Column]) -> io::Result<Row> {
    let deleted = cursor.read_u8()? != 0;
    let mut values = Vec::with_capacity(columns.len());
    for col in columns {
        values.push(read_value(cursor, col.ty)?);
    }
    Ok(Row { values, deleted })
}

fn write_row(buf: &mut Vec<u8>, row: &Row) {
    buf.write_u8(u8::from(row.deleted));
    for value in &row.values {
        write_value(buf, value);
    }
}

fn read_value(cursor: &mut Cursor<'_>, ty: ColumnType) -> io::Result<Value> {
    let tag = cursor.read_u8()?;
    let value = match tag {
        0 => Value::Null,
        1 => Value::Int(cursor.read_i64()?),
        2 => Value::Float(f64::from_bits(cursor.read_u64()?)),
        3 => Value::Text(cursor.read_string()?),
        4 => Value::Bool(cursor.read_u8()? != 0),
        other => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown value tag {other}"),
            ));
        }
    };
    debug_assert!(value.is_null() || value.column_type() == Some(ty));
    Ok(value)
}

fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.write_u8(0),
        Value::Int(i) => {
            buf.write_u8(1);
            buf.write_i64(*i);
        }
        Value::Float(f) => {
            buf.write_u8(2);
            buf.write_u64(f.to_bits());
        }
        Value::Text(s) => {
            buf.write_u8(3);
            buf.write_string(s);
        }
        Value::Bool(b) => {
            buf.write_u8(4);
            buf.write_u8(u8::from(*b));
        }
    }
}

/// A tiny read cursor over an in-memory byte slice, mirroring the
/// fixed-offset `from_le_bytes`/`try_into` pattern used for other on-disk
/// database headers, but over a growing cursor instead of a fixed struct.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> io::Result<&'a [u8]> {
        if self.pos + n > self.bytes.len() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "short read"));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> io::Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> io::Result<u16> {
        Ok(u16::from_le_bytes(self.take(2)?.try_into().unwrap()))
    }

    fn read_u32(&mut self) -> io::Result<u32> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn read_u64(&mut self) -> io::Result<u64> {
        Ok(u64::from_le_bytes(self.take(8)?.try_into().unwrap()))
    }

    fn read_i32(&mut self) -> io::Result<i32> {
        Ok(i32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn read_i64(&mut self) -> io::Result<i64> {
        Ok(i64::from_le_bytes(self.take(8)?.try_into().unwrap()))
    }

    fn read_string(&mut self) -> io::Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Write-side helpers, implemented directly on `Vec<u8>` (mirrors the
/// read-side `Cursor` but append-only; no separate type needed).
trait WriteBytes {
    fn write_u8(&mut self, v: u8);
    fn write_u16(&mut self, v: u16);
    fn write_u32(&mut self, v: u32);
    fn write_u64(&mut self, v: u64);
    fn write_i32(&mut self, v: i32);
    fn write_i64(&mut self, v: i64);
    fn write_string(&mut self, s: &str);
}

impl WriteBytes for Vec<u8> {
    fn write_u8(&mut self, v: u8) {
        self.push(v);
    }
    fn write_u16(&mut self, v: u16) {
        self.extend_from_slice(&v.to_le_bytes());
    }
    fn write_u32(&mut self, v: u32) {
        self.extend_from_slice(&v.to_le_bytes());
    }
    fn write_u64(&mut self, v: u64) {
        self.extend_from_slice(&v.to_le_bytes());
    }
    fn write_i32(&mut self, v: i32) {
        self.extend_from_slice(&v.to_le_bytes());
    }
    fn write_i64(&mut self, v: i64) {
        self.extend_from_slice(&v.to_le_bytes());
    }
    fn write_string(&mut self, s: &str) {
        let bytes = s.as_bytes();
        debug_assert!(bytes.len() <= u16::MAX as usize);
        self.write_u16(bytes.len() as u16);
        self.extend_from_slice(bytes);
    }
}
