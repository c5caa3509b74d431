//! src/core/types.rs
//!
//! Core type definitions for the trigger binding language
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Token`: A single lexical unit of the trigger grammar
//! - `Position`: Line/column location of a token for error reporting
//! - `TriggerMode`: Repetition policy of a trigger (ALWAYS, NORMAL, REPEAT)
//! - `TriggerKind`: Whether a trigger runs a command or emits a signal
//! - `Trigger`: The complete parsed descriptor
//!
//! `Trigger` implements serialization for reporting and `Display` for
//! writing a descriptor back into the grammar it was parsed from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lexical unit of the trigger grammar
///
/// Punctuation tokens carry no text. `Input` carries the literal run
/// with escapes already resolved. `End` marks the end of the stream and
/// is returned for every `advance()` past it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `|`
    Pipe,
    /// `->`
    Arrow,
    /// Literal text between structural characters
    Input(String),
    /// End of input
    End,
}

impl Token {
    /// Maps a structural character to its punctuation token
    pub fn from_punctuation(c: char) -> Option<Self> {
        match c {
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '{' => Some(Token::LeftBrace),
            '}' => Some(Token::RightBrace),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            '|' => Some(Token::Pipe),
            _ => None,
        }
    }

    /// Literal text of an `Input` token, empty for everything else
    pub fn text(&self) -> &str {
        match self {
            Token::Input(text) => text,
            _ => "",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Pipe => write!(f, "|"),
            Token::Arrow => write!(f, "->"),
            Token::Input(_) => write!(f, "INPUT"),
            Token::End => write!(f, "END"),
        }
    }
}

/// Location of a token in the source string (1-based)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Repetition policy of a trigger
///
/// - `Always`: Fire regardless of the current compositor state
/// - `Normal`: Fire once per activation
/// - `Repeat`: Fire continuously while the activator is held
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriggerMode {
    Always,
    #[default]
    Normal,
    Repeat,
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerMode::Always => write!(f, "ALWAYS"),
            TriggerMode::Normal => write!(f, "NORMAL"),
            TriggerMode::Repeat => write!(f, "REPEAT"),
        }
    }
}

impl FromStr for TriggerMode {
    type Err = String;

    /// Exact, case-sensitive match on the three mode names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALWAYS" => Ok(TriggerMode::Always),
            "NORMAL" => Ok(TriggerMode::Normal),
            "REPEAT" => Ok(TriggerMode::Repeat),
            other => Err(other.to_string()),
        }
    }
}

/// What a trigger does when its activator fires
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Run the payload as a shell command
    Command,
    /// Emit a named signal carrying the payload
    Signal,
}

impl TriggerKind {
    /// Infers the kind from a config option key (`command_*` / `signal_*`)
    ///
    /// This is the older naming convention; the grammar itself is the
    /// canonical way to tell the two apart.
    pub fn from_option_name(name: &str) -> Option<Self> {
        if name.starts_with("command_") {
            Some(TriggerKind::Command)
        } else if name.starts_with("signal_") {
            Some(TriggerKind::Signal)
        } else {
            None
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Command => write!(f, "command"),
            TriggerKind::Signal => write!(f, "signal"),
        }
    }
}

/// A parsed trigger descriptor
///
/// Fully populated by a single parse call and never mutated afterwards.
/// A trigger with `signal` set emits that signal; otherwise the payload
/// is a command line.
///
/// # Example
/// ```ignore
/// let trigger = Trigger {
///     binding: "super+KEY_a".to_string(),
///     payload: "firefox".to_string(),
///     mode: TriggerMode::Repeat,
///     signal: None,
/// };
/// // Represents: (super+KEY_a)->{firefox}->[REPEAT]
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Trigger {
    /// Activator binding spec, opaque to this crate (e.g. "super+KEY_a")
    pub binding: String,

    /// Command line, or the signal argument body for signal triggers
    pub payload: String,

    /// Repetition policy, `Normal` when the mode section is omitted
    pub mode: TriggerMode,

    /// Signal name, present only for signal triggers
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signal: Option<String>,
}

impl Trigger {
    pub fn kind(&self) -> TriggerKind {
        if self.signal.is_some() {
            TriggerKind::Signal
        } else {
            TriggerKind::Command
        }
    }

    pub fn is_signal(&self) -> bool {
        self.signal.is_some()
    }

    /// Message body handed to signal consumers
    ///
    /// The payload is written without its outer braces in the grammar
    /// (`{"recipient":"me"}` parses to `"recipient":"me"`), so they are
    /// put back here. Returns `None` for command triggers.
    pub fn signal_message(&self) -> Option<String> {
        self.signal.as_ref().map(|_| format!("{{{}}}", self.payload))
    }
}

/// Writes a literal run with every character the lexer treats specially
/// escaped, so the run reads back unchanged
fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let chars: Vec<char> = text.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        let arrow = c == '-' && chars.get(i + 1) == Some(&'>');
        // Unescaped whitespace at either edge of a run is dropped by the lexer
        let edge = i == 0 || i + 1 == chars.len();

        if matches!(c, '\\' | '(' | ')' | '{' | '}' | '[' | ']' | '|')
            || arrow
            || (edge && c.is_whitespace())
        {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }

    Ok(())
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_escaped(f, &self.binding)?;
        write!(f, ")->")?;

        if let Some(signal) = &self.signal {
            write!(f, "|")?;
            write_escaped(f, signal)?;
            write!(f, "|->")?;
        }

        write!(f, "{{")?;
        write_escaped(f, &self.payload)?;
        write!(f, "}}->[{}]", self.mode)
    }
}
