//! Recognition of `nick++` / `nick--` utterances.

use regex::Regex;
use std::sync::LazyLock;

/// Nickname, operator run, then optional free text.
static TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_]+)((?:\+\+|--)+)\s*(.*)").expect("trigger pattern is valid")
});

/// A parsed karma adjustment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Nickname with trailing underscores stripped.
    pub who: String,
    /// Net adjustment: one point per `++`, minus one per `--`.
    pub delta: i64,
    /// Everything after the operator run, trimmed.
    pub reason: String,
}

impl Trigger {
    /// Parse a chat line. Returns `None` for ordinary chat.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = TRIGGER_RE.captures(line)?;
        let nick = caps.get(1)?.as_str();
        let ops = caps.get(2)?;

        // `foo+++` leaves a dangling operator character; not a vote.
        if matches!(line[ops.end()..].chars().next(), Some('+' | '-')) {
            return None;
        }

        let who = normalize_nick(nick);
        if who.is_empty() {
            return None;
        }

        Some(Self {
            who: who.to_string(),
            delta: delta(ops.as_str()),
            reason: caps.get(3).map_or("", |m| m.as_str()).trim_end().to_string(),
        })
    }
}

/// Strip trailing underscores some clients append to a nickname (away markers,
/// collision suffixes).
pub fn normalize_nick(nick: &str) -> &str {
    nick.trim_end_matches('_')
}

/// Net delta of an operator run made of `++` and `--` pairs.
pub fn delta(ops: &str) -> i64 {
    let ups = ops.matches("++").count() as i64;
    let downs = ops.matches("--").count() as i64;
    ups - downs
}
