pub mod engine;
pub mod error;
pub mod store;
pub mod trigger;
pub mod types;

pub use engine::{KarmaEngine, Messenger};
pub use error::SetupError;
pub use store::{KarmaStore, SqliteStore};
pub use types::{KarmaOptions, KarmaRecord};

use rusqlite::Connection;

/// Plugin setup hook, run once per bot connection.
///
/// `db` is the host's database handle, `None` when the host has none. The
/// karma table is created when missing; every other failure aborts setup.
pub fn setup(
    db: Option<Connection>,
    options: KarmaOptions,
) -> Result<KarmaEngine<SqliteStore>, SetupError> {
    let Some(conn) = db else {
        tracing::debug!("{}", SetupError::NoDatabase);
        return Err(SetupError::NoDatabase);
    };

    store::provision(&conn).map_err(|e| {
        tracing::debug!(error = %e, "table init failed");
        SetupError::Table(e)
    })?;

    tracing::info!(
        feedback = options.feedback,
        byself = options.byself,
        penalty = options.penalty,
        "karma plugin ready"
    );
    Ok(KarmaEngine::new(SqliteStore::new(conn), options))
}

/// Plugin configure hook.
///
/// `ask(question, default)` is the host's yes/no prompt. Returns `None` when
/// the operator declines to configure karma; otherwise one answer per
/// declared option, starting from the defaults.
pub fn configure(mut ask: impl FnMut(&str, bool) -> bool) -> Option<KarmaOptions> {
    if !ask("Configure karma", false) {
        return None;
    }

    let mut options = KarmaOptions::default();
    for spec in KarmaOptions::SPECS {
        options.set(spec.name, ask(spec.description, spec.default));
    }
    Some(options)
}
