//! Minimal console host: turns `<nick>: <text>` lines into plugin events.
//!
//! Lines beginning with `<prefix>karma` are routed to the query command;
//! everything else goes to the passive trigger handler.

use std::io::Write;

use crate::plugin::{KarmaEngine, KarmaStore, Messenger};

/// Name of the explicit query command.
pub const COMMAND: &str = "karma";

/// One inbound chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine<'a> {
    pub nick: &'a str,
    pub text: &'a str,
}

impl<'a> ChatLine<'a> {
    /// Parse `<nick>: <text>`. Returns `None` for lines without a sender.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (nick, text) = line.split_once(':')?;
        let nick = nick.trim();
        if nick.is_empty() || nick.contains(char::is_whitespace) {
            return None;
        }
        Some(Self {
            nick,
            text: text.strip_prefix(' ').unwrap_or(text),
        })
    }
}

/// Routed form of a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    /// `<prefix>karma [args]`; `args` is `None` when nothing follows.
    Command { args: Option<&'a str> },
    /// Any other line, offered to the trigger handler.
    Message { sender: &'a str, text: &'a str },
}

/// Route a chat line to the command or the passive handler.
pub fn route<'a>(line: &ChatLine<'a>, prefix: &str) -> Event<'a> {
    let command = line
        .text
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(COMMAND))
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));

    match command {
        Some(rest) => {
            let args = rest.trim();
            Event::Command {
                args: (!args.is_empty()).then_some(args),
            }
        }
        None => Event::Message {
            sender: line.nick,
            text: line.text,
        },
    }
}

/// Deliver one raw input line to the engine.
pub fn dispatch<S: KarmaStore>(
    engine: &KarmaEngine<S>,
    prefix: &str,
    raw: &str,
    out: &mut dyn Messenger,
) {
    let Some(line) = ChatLine::parse(raw) else {
        tracing::debug!(line = raw, "skipping line without a sender");
        return;
    };

    match route(&line, prefix) {
        Event::Command { args } => engine.on_command(args, out),
        Event::Message { sender, text } => engine.on_line(sender, text, out),
    }
}

/// [`Messenger`] that writes each reply as `<bot nick>: <text>`.
pub struct ConsoleMessenger<W: Write> {
    nick: String,
    writer: W,
}

impl<W: Write> ConsoleMessenger<W> {
    pub fn new(nick: impl Into<String>, writer: W) -> Self {
        Self {
            nick: nick.into(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Messenger for ConsoleMessenger<W> {
    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{}: {}", self.nick, text) {
            tracing::warn!(error = %e, "failed to write reply");
        }
    }
}
