use thiserror::Error;

/// Failure talking to the karma table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored karma for {who} is not an integer: {value:?}")]
    CorruptScore { who: String, value: String },

    #[error("karma table has unexpected layout: columns {found:?}, primary key {primary_key:?}")]
    Layout {
        found: Vec<String>,
        primary_key: Option<String>,
    },
}

/// Fatal plugin setup failure. The host must not load the plugin.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("DB init fail, setup the DB first!")]
    NoDatabase,

    #[error("karma table init failed: {0}")]
    Table(#[from] StoreError),
}
