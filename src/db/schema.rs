//! SQL DDL and layout checks for the `karma` table.
//!
//! One row per nickname. Scores are kept as TEXT in the `karma` column and
//! parsed on read, matching the layout older bot databases already use.

use rusqlite::{Connection, OptionalExtension};

/// Name of the table holding karma records.
pub const KARMA_TABLE: &str = "karma";

/// Columns the table must carry, primary key first.
pub const KARMA_COLUMNS: [&str; 3] = ["who", "karma", "reason"];

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS karma (
    who TEXT PRIMARY KEY,
    karma TEXT NOT NULL,
    reason TEXT NOT NULL
);
"#;

/// Create the karma table. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Whether the karma table has been provisioned.
pub fn table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [KARMA_TABLE],
        |_| Ok(()),
    )
    .optional()
    .map(|row| row.is_some())
}

/// Column names of the karma table, in declaration order.
pub fn table_columns(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([KARMA_TABLE], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(columns)
}

/// Name of the primary key column, if the table has exactly one.
pub fn primary_key(conn: &Connection) -> rusqlite::Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) WHERE pk > 0")?;
    let mut keys = stmt
        .query_map([KARMA_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(if keys.len() == 1 { keys.pop() } else { None })
}
