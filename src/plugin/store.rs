//! Record store adapter over the `karma` table.
//!
//! [`KarmaStore`] is the seam the engine talks through. [`SqliteStore`] is the
//! production implementation; [`provision`] is the startup check that makes
//! sure the table is there with the expected layout.

use rusqlite::{params, Connection, OptionalExtension};

use super::error::StoreError;
use super::types::KarmaRecord;
use crate::db::schema;

/// Keyed access to karma records.
///
/// Every method is a single statement against one key. Errors are returned,
/// never swallowed; the engine decides how to degrade.
pub trait KarmaStore {
    /// Whether the backing table has been provisioned.
    fn exists(&self) -> bool;

    /// Fetch the record for `who`. `Ok(None)` when there is none.
    fn get(&self, who: &str) -> Result<Option<KarmaRecord>, StoreError>;

    /// Create or replace the record for `who`.
    fn upsert(&self, who: &str, score: i64, reason: &str) -> Result<(), StoreError>;

    /// Remove the record for `who`. Absent records are not an error.
    fn delete(&self, who: &str) -> Result<(), StoreError>;
}

/// [`KarmaStore`] backed by a SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// All records, highest score first.
    pub fn all(&self) -> Result<Vec<KarmaRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT who, karma, reason FROM karma")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = rows
            .into_iter()
            .map(|(who, karma, reason)| -> Result<KarmaRecord, StoreError> {
                let score = parse_score(&who, &karma)?;
                Ok(KarmaRecord { who, score, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.who.cmp(&b.who)));
        Ok(records)
    }
}

impl KarmaStore for SqliteStore {
    fn exists(&self) -> bool {
        schema::table_exists(&self.conn).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "karma table check failed");
            false
        })
    }

    fn get(&self, who: &str) -> Result<Option<KarmaRecord>, StoreError> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT karma, reason FROM karma WHERE who = ?1",
                params![who],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(karma, reason)| -> Result<KarmaRecord, StoreError> {
            Ok(KarmaRecord {
                who: who.to_string(),
                score: parse_score(who, &karma)?,
                reason,
            })
        })
        .transpose()
    }

    fn upsert(&self, who: &str, score: i64, reason: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO karma (who, karma, reason) VALUES (?1, ?2, ?3) \
             ON CONFLICT(who) DO UPDATE SET karma = excluded.karma, reason = excluded.reason",
            params![who, score.to_string(), reason],
        )?;
        Ok(())
    }

    fn delete(&self, who: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM karma WHERE who = ?1", params![who])?;
        Ok(())
    }
}

fn parse_score(who: &str, karma: &str) -> Result<i64, StoreError> {
    karma
        .trim()
        .parse()
        .map_err(|_| StoreError::CorruptScore {
            who: who.to_string(),
            value: karma.to_string(),
        })
}

/// Make sure the karma table exists with the `(who, karma, reason)` layout,
/// creating it when missing. Any other problem is returned to the caller.
pub fn provision(conn: &Connection) -> Result<(), StoreError> {
    if !schema::table_exists(conn)? {
        tracing::info!(table = schema::KARMA_TABLE, "creating karma table");
        schema::init_schema(conn)?;
        return Ok(());
    }

    let found = schema::table_columns(conn)?;
    let primary_key = schema::primary_key(conn)?;
    let layout_ok = schema::KARMA_COLUMNS
        .iter()
        .all(|col| found.iter().any(|f| f == col))
        && primary_key.as_deref() == Some(schema::KARMA_COLUMNS[0]);

    if !layout_ok {
        return Err(StoreError::Layout { found, primary_key });
    }

    tracing::debug!(table = schema::KARMA_TABLE, "karma table present");
    Ok(())
}
