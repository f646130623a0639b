//! CLI `configure` command: interactive `[karma]` setup written to the config file.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use karma::config::KarmaConfig;

/// Walk the operator through the plugin's options and save the answers.
pub fn configure(mut config: KarmaConfig, path: &Path) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stdout = std::io::stdout();

    let answers = karma::plugin::configure(|question, default| {
        ask(&mut input, &mut stdout, question, default).unwrap_or(default)
    });

    let Some(options) = answers else {
        println!("Karma options unchanged.");
        return Ok(());
    };
    config.karma = options;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, config.to_toml()?)
        .with_context(|| format!("failed to write config to {}", path.display()))?;

    println!("Saved karma options to {}", path.display());
    Ok(())
}

/// Ask a yes/no question. An empty answer takes the default.
fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        write!(output, "{question} {hint} ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(default);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" | "true" => return Ok(true),
            "n" | "no" | "false" => return Ok(false),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}
