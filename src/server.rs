//! Console event loop: reads chat lines from stdin and writes bot replies to stdout.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use karma::bot::{self, ConsoleMessenger};
use karma::config::KarmaConfig;
use karma::db;
use karma::plugin::{self, KarmaEngine, SqliteStore};

/// Open the database and run the plugin's setup hook.
pub fn setup_engine(config: &KarmaConfig) -> Result<KarmaEngine<SqliteStore>> {
    let db_path = config.resolved_db_path();
    let conn = match db::connect(&db_path) {
        Ok(conn) => Some(conn),
        Err(e) => {
            tracing::warn!(db = %db_path.display(), error = %e, "database unavailable");
            None
        }
    };

    let engine = plugin::setup(conn, config.karma).context("karma plugin setup failed")?;
    Ok(engine.with_prefix(config.bot.prefix.clone()))
}

/// Serve chat lines from stdin until EOF or Ctrl-C.
pub async fn serve_stdio(config: KarmaConfig) -> Result<()> {
    tracing::info!(nick = %config.bot.nick, "starting karma bot on stdio");

    let engine = setup_engine(&config)?;
    let mut out = ConsoleMessenger::new(config.bot.nick.clone(), std::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read stdin")? {
                    Some(line) => bot::dispatch(&engine, &config.bot.prefix, &line, &mut out),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    tracing::info!("karma bot shut down");
    Ok(())
}
