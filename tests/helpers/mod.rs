#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use karma::plugin::store::provision;
use karma::plugin::error::StoreError;
use karma::plugin::{KarmaEngine, KarmaOptions, KarmaRecord, KarmaStore, SqliteStore};
use rusqlite::Connection;

/// Open a fresh in-memory database with the karma table provisioned.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    provision(&conn).unwrap();
    conn
}

/// Store wrapper that records every keyed call and can be told to fail.
pub struct RecordingStore {
    inner: SqliteStore,
    pub calls: RefCell<Vec<String>>,
    pub provisioned: Cell<bool>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: SqliteStore::new(test_db()),
            calls: RefCell::new(Vec::new()),
            provisioned: Cell::new(true),
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls that changed the table.
    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("get "))
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Read straight from the table, bypassing the call log.
    pub fn peek(&self, who: &str) -> Option<KarmaRecord> {
        self.inner.get(who).unwrap()
    }

    pub fn seed(&self, who: &str, score: i64, reason: &str) {
        self.inner.upsert(who, score, reason).unwrap();
    }

    /// Write a non-numeric score directly into the table.
    pub fn corrupt(&self, who: &str, value: &str) {
        self.inner
            .connection()
            .execute(
                "INSERT OR REPLACE INTO karma (who, karma, reason) VALUES (?1, ?2, 'x')",
                [who, value],
            )
            .unwrap();
    }

    fn injected() -> StoreError {
        StoreError::Sqlite(rusqlite::Error::InvalidQuery)
    }
}

impl KarmaStore for RecordingStore {
    fn exists(&self) -> bool {
        self.provisioned.get()
    }

    fn get(&self, who: &str) -> Result<Option<KarmaRecord>, StoreError> {
        self.calls.borrow_mut().push(format!("get {who}"));
        if self.fail_reads.get() {
            return Err(Self::injected());
        }
        self.inner.get(who)
    }

    fn upsert(&self, who: &str, score: i64, reason: &str) -> Result<(), StoreError> {
        self.calls
            .borrow_mut()
            .push(format!("upsert {who} {score} {reason}"));
        if self.fail_writes.get() {
            return Err(Self::injected());
        }
        self.inner.upsert(who, score, reason)
    }

    fn delete(&self, who: &str) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(format!("delete {who}"));
        if self.fail_writes.get() {
            return Err(Self::injected());
        }
        self.inner.delete(who)
    }
}

/// Engine over a [`RecordingStore`] with the given switches.
pub fn engine(feedback: bool, byself: bool, penalty: bool) -> KarmaEngine<RecordingStore> {
    KarmaEngine::new(
        RecordingStore::new(),
        KarmaOptions {
            feedback,
            byself,
            penalty,
        },
    )
}

/// Engine with default options.
pub fn default_engine() -> KarmaEngine<RecordingStore> {
    KarmaEngine::new(RecordingStore::new(), KarmaOptions::default())
}
