use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::plugin::KarmaOptions;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct KarmaConfig {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    /// Loaded leniently: see [`KarmaConfig::from_toml`].
    #[serde(skip)]
    pub karma: KarmaOptions,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BotConfig {
    pub nick: String,
    pub prefix: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            nick: "karmabot".into(),
            prefix: ".".into(),
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_karma_dir()
            .join("karma.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

/// Returns `~/.karma/`
pub fn default_karma_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".karma")
}

/// Returns the default config file path: `~/.karma/config.toml`
pub fn default_config_path() -> PathBuf {
    default_karma_dir().join("config.toml")
}

impl KarmaConfig {
    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            Self::from_toml(&contents)?
        } else {
            info!("no config file at {}, using defaults", path.display());
            KarmaConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a config document.
    ///
    /// `[bot]` and `[storage]` must be well formed. The `[karma]` options never
    /// fail the load: a malformed section falls back to [`KarmaOptions::default`].
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut table: toml::Table =
            toml::from_str(contents).context("failed to parse config TOML")?;
        let karma_section = table.remove("karma");

        let mut config: KarmaConfig = toml::Value::Table(table)
            .try_into()
            .context("invalid config")?;

        config.karma = match karma_section {
            Some(section) => section.try_into().unwrap_or_else(|e| {
                debug!(error = %e, "unreadable [karma] options, using defaults");
                KarmaOptions::default()
            }),
            None => KarmaOptions::default(),
        };

        Ok(config)
    }

    /// Apply environment variable overrides (KARMA_DB, KARMA_NICK, KARMA_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("KARMA_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("KARMA_NICK") {
            self.bot.nick = val;
        }
        if let Ok(val) = std::env::var("KARMA_LOG_LEVEL") {
            self.bot.log_level = val;
        }
    }

    /// Serialize back to TOML, including the `[karma]` section.
    pub fn to_toml(&self) -> Result<String> {
        let mut table = match toml::Value::try_from(self).context("failed to serialize config")? {
            toml::Value::Table(table) => table,
            other => anyhow::bail!("config serialized to {}, expected a table", other.type_str()),
        };
        table.insert(
            "karma".into(),
            toml::Value::try_from(&self.karma).context("failed to serialize karma options")?,
        );
        toml::to_string(&table).context("failed to render config TOML")
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = KarmaConfig::default();
        assert_eq!(config.bot.prefix, ".");
        assert_eq!(config.bot.log_level, "info");
        assert!(config.storage.db_path.ends_with("karma.db"));
        assert!(config.karma.feedback);
        assert!(!config.karma.byself);
        assert!(!config.karma.penalty);
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[bot]
nick = "willie"
log_level = "debug"

[storage]
db_path = "/tmp/karma-test.db"

[karma]
byself = true
"#;
        let config = KarmaConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.bot.nick, "willie");
        assert_eq!(config.bot.log_level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/karma-test.db");
        assert!(config.karma.byself);
        // defaults still apply for unset fields
        assert_eq!(config.bot.prefix, ".");
        assert!(config.karma.feedback);
        assert!(!config.karma.penalty);
    }

    #[test]
    fn malformed_karma_section_falls_back_to_defaults() {
        let toml_str = r#"
[karma]
feedback = "loud"
penalty = true
"#;
        let config = KarmaConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.karma, KarmaOptions::default());
    }

    #[test]
    fn malformed_storage_section_is_an_error() {
        let toml_str = r#"
[storage]
db_path = 42
"#;
        assert!(KarmaConfig::from_toml(toml_str).is_err());
    }

    #[test]
    fn to_toml_keeps_karma_section() {
        let mut config = KarmaConfig::default();
        config.karma.penalty = true;
        let rendered = config.to_toml().unwrap();
        let reparsed = KarmaConfig::from_toml(&rendered).unwrap();
        assert!(reparsed.karma.penalty);
        assert_eq!(reparsed.bot.nick, config.bot.nick);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = KarmaConfig::default();
        std::env::set_var("KARMA_DB", "/tmp/override.db");
        std::env::set_var("KARMA_NICK", "envbot");
        std::env::set_var("KARMA_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.bot.nick, "envbot");
        assert_eq!(config.bot.log_level, "trace");

        // Clean up
        std::env::remove_var("KARMA_DB");
        std::env::remove_var("KARMA_NICK");
        std::env::remove_var("KARMA_LOG_LEVEL");
    }
}
