//! CLI `show` command: one-shot karma query against the configured database.

use anyhow::Result;

use karma::config::KarmaConfig;

/// Print the karma status of `nick`, exactly as the bot would report it.
pub fn show(config: &KarmaConfig, nick: &str) -> Result<()> {
    let engine = crate::server::setup_engine(config)?;
    let mut replies: Vec<String> = Vec::new();
    engine.on_command(Some(nick), &mut replies);

    for reply in replies {
        println!("{reply}");
    }
    Ok(())
}
