//! Karma record and option types.
//!
//! Defines [`KarmaRecord`] (one row of the karma table), [`KarmaOptions`]
//! (the three policy switches) and [`OptionSpec`] (how those switches are
//! presented during interactive setup).

use serde::{Deserialize, Serialize};

/// Reason reported for nicknames with no stored record.
pub const NO_REASON: &str = "None";

/// Reason stored when a self-vote is penalized.
pub const PENALTY_REASON: &str = "Penalized for self-promotion";

/// A karma record, matching the `karma` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarmaRecord {
    /// Normalized nickname, primary key.
    pub who: String,
    /// Current score. Never zero for a stored record.
    pub score: i64,
    /// Text attached to the most recent adjustment.
    pub reason: String,
}

impl KarmaRecord {
    /// The record reported for a nickname nobody has voted on.
    pub fn empty(who: &str) -> Self {
        Self {
            who: who.to_string(),
            score: 0,
            reason: NO_REASON.to_string(),
        }
    }
}

impl std::fmt::Display for KarmaRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}, reason: {}", self.who, self.score, self.reason)
    }
}

/// Policy switches read from the `[karma]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KarmaOptions {
    /// Announce every adjustment in the channel.
    pub feedback: bool,
    /// Let users adjust their own karma.
    pub byself: bool,
    /// Take one point from anyone who tries to adjust their own karma.
    pub penalty: bool,
}

impl Default for KarmaOptions {
    fn default() -> Self {
        Self {
            feedback: true,
            byself: false,
            penalty: false,
        }
    }
}

/// An option declared to the host's interactive configuration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub default: bool,
}

impl KarmaOptions {
    /// The options the plugin declares for interactive setup.
    pub const SPECS: [OptionSpec; 3] = [
        OptionSpec {
            name: "feedback",
            description: "Notify by bot",
            default: true,
        },
        OptionSpec {
            name: "byself",
            description: "Self (pro|de)mote",
            default: false,
        },
        OptionSpec {
            name: "penalty",
            description: "Penalize self (pro|de)mote",
            default: false,
        },
    ];

    /// Set an option by its declared name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: bool) -> bool {
        match name {
            "feedback" => self.feedback = value,
            "byself" => self.byself = value,
            "penalty" => self.penalty = value,
            _ => return false,
        }
        true
    }

    /// Current value of an option by its declared name.
    pub fn get(&self, name: &str) -> Option<bool> {
        match name {
            "feedback" => Some(self.feedback),
            "byself" => Some(self.byself),
            "penalty" => Some(self.penalty),
            _ => None,
        }
    }
}
