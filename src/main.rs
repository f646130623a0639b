mod cli;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use karma::config;

#[derive(Parser)]
#[command(name = "karma", version, about = "Karma tracking chat bot plugin")]
struct Cli {
    /// Config file (defaults to ~/.karma/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the bot on stdin/stdout, one `<nick>: <text>` line per message
    Serve,
    /// Report the karma of a nickname
    Show {
        /// Nickname to look up
        nick: String,
    },
    /// Dump all karma records as JSON
    Export,
    /// Interactively set the [karma] options
    Configure,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = config::KarmaConfig::load_from(&config_path)?;

    // Log to stderr so stdout carries only bot output.
    let filter = EnvFilter::try_new(&config.bot.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => {
            server::serve_stdio(config).await?;
        }
        Command::Show { nick } => {
            cli::show::show(&config, &nick)?;
        }
        Command::Export => {
            cli::export::export(&config)?;
        }
        Command::Configure => {
            cli::configure::configure(config, &config_path)?;
        }
    }

    Ok(())
}
