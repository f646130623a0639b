//! Karma rule engine: self-vote policy, score arithmetic, and replies.
//!
//! [`KarmaEngine::on_line`] handles every inbound chat line and
//! [`KarmaEngine::on_command`] handles the explicit `karma <nick>` query. Both
//! talk to the table only through [`KarmaStore`] and to the channel only
//! through [`Messenger`].

use tracing::debug;

use super::store::KarmaStore;
use super::trigger::{normalize_nick, Trigger};
use super::types::{KarmaOptions, KarmaRecord, PENALTY_REASON};

/// Reply to the query command when the table has not been provisioned.
pub const SETUP_MESSAGE: &str = "Setup the database first, contact your bot admin.";

/// Where replies go: the channel the triggering line came from.
pub trait Messenger {
    fn say(&mut self, text: &str);
}

impl Messenger for Vec<String> {
    fn say(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// The karma plugin's event handlers, bound to a store and a set of options.
pub struct KarmaEngine<S> {
    store: S,
    options: KarmaOptions,
    prefix: String,
}

impl<S: KarmaStore> KarmaEngine<S> {
    pub fn new(store: S, options: KarmaOptions) -> Self {
        Self {
            store,
            options,
            prefix: ".".into(),
        }
    }

    /// Command prefix used when printing usage help.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Passive handler for every chat line. Lines that are not `nick++` /
    /// `nick--` are ignored.
    pub fn on_line(&self, sender: &str, line: &str, out: &mut dyn Messenger) {
        if let Some(trigger) = Trigger::parse(line) {
            self.on_trigger(sender, &trigger, out);
        }
    }

    /// Apply a parsed trigger sent by `sender`.
    pub fn on_trigger(&self, sender: &str, trigger: &Trigger, out: &mut dyn Messenger) {
        if !self.store.exists() {
            debug!(who = %trigger.who, "karma table missing, ignoring trigger");
            return;
        }

        // Nicknames compare case-insensitively on IRC.
        let self_vote = trigger.who.eq_ignore_ascii_case(sender);

        // The penalty fires even when self-votes are otherwise ignored.
        if self_vote && self.options.penalty {
            self.adjust(&trigger.who, -1, PENALTY_REASON, out);
        }

        if self_vote && !self.options.byself {
            debug!(who = %trigger.who, delta = trigger.delta, "self vote suppressed");
            return;
        }

        self.adjust(&trigger.who, trigger.delta, &trigger.reason, out);
    }

    /// Explicit `karma [nick]` command. `args` is the text after the command name.
    pub fn on_command(&self, args: Option<&str>, out: &mut dyn Messenger) {
        if !self.store.exists() {
            out.say(SETUP_MESSAGE);
            return;
        }

        match args.and_then(|a| a.split_whitespace().next()) {
            Some(nick) => {
                // Stored keys never carry trailing underscores.
                let who = match normalize_nick(nick) {
                    "" => nick,
                    who => who,
                };
                out.say(&self.lookup(who).to_string());
            }
            None => out.say(&self.usage()),
        }
    }

    pub fn usage(&self) -> String {
        format!("{}karma <nick> - Reports karma status for <nick>.", self.prefix)
    }

    /// Current record for `who`, or the empty record when there is none or the
    /// lookup fails.
    pub fn lookup(&self, who: &str) -> KarmaRecord {
        match self.store.get(who) {
            Ok(Some(record)) => record,
            Ok(None) => KarmaRecord::empty(who),
            Err(e) => {
                debug!(who, error = %e, "get karma failed");
                KarmaRecord::empty(who)
            }
        }
    }

    /// Add `delta` to `who`'s score, storing `reason` with it. Deletes the
    /// record when the score lands on zero. Write failures are logged and
    /// dropped.
    fn adjust(&self, who: &str, delta: i64, reason: &str, out: &mut dyn Messenger) {
        let score = self.lookup(who).score.saturating_add(delta);

        if score == 0 {
            if let Err(e) = self.store.delete(who) {
                debug!(who, error = %e, "delete karma failed");
                return;
            }
            debug!(who, "karma record removed");
            if self.options.feedback {
                out.say(&format!("{who} garbage collected"));
            }
            return;
        }

        if let Err(e) = self.store.upsert(who, score, reason) {
            debug!(who, score, error = %e, "update karma failed");
            return;
        }
        debug!(who, score, delta, "karma updated");
        if self.options.feedback {
            let record = KarmaRecord {
                who: who.to_string(),
                score,
                reason: reason.to_string(),
            };
            out.say(&record.to_string());
        }
    }
}
