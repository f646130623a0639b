//! Karma tracking for chat bots.
//!
//! Users adjust each other's reputation by typing `nick++` or `nick--` in a
//! channel, optionally followed by a reason, and read it back with
//! `.karma <nick>`. Scores live in a single SQLite table keyed by nickname:
//!
//! | Column | Contents |
//! |--------|----------|
//! | `who` | Nickname, trailing underscores stripped |
//! | `karma` | Score as text; a row never holds `0` |
//! | `reason` | Reason given with the latest adjustment |
//!
//! Three switches in the `[karma]` config section shape the policy:
//! `feedback` (announce every change), `byself` (allow self-votes), and
//! `penalty` (take a point from anyone who votes for themselves).
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite connection setup and the `karma` table schema
//! - [`plugin`]: Trigger parsing, self-vote policy, the record store, and the setup/configure hooks
//! - [`bot`]: Console host that routes `<nick>: <text>` lines to the plugin

pub mod bot;
pub mod config;
pub mod db;
pub mod plugin;
