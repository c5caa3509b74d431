// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/parser.rs
//!
//! Recursive-descent parser for trigger strings
//!
//! This module turns one config option value into a `Trigger`. It handles:
//! - Command triggers: `(super+KEY_a)->{firefox}`
//! - Signal triggers: `(super+KEY_b)->|hello|->{"recipient":"me"}`
//!   and the prefix form `|hello|->(super+KEY_b)->{...}`
//! - Optional mode: `->[REPEAT]` or `[REPEAT]`, NORMAL when absent
//!
//! # Grammar
//! ```text
//! trigger         := signal? binding signal? command_trigger END
//! signal          := '|' INPUT '|' '->'
//! binding         := '(' INPUT ')' '->'
//! command_trigger := payload mode
//! payload         := '{' INPUT '}'
//! mode            := '->'? '[' INPUT ']' | ε
//! ```
//! At most one signal section is accepted. Whether the trigger emits a
//! signal is decided by peeking for a `|`, the only branch in the grammar.
//!
//! # Errors
//! There is no recovery: the first lexical error or token mismatch ends
//! the parse and no partial trigger is returned.

use thiserror::Error;
use tracing::trace;

use crate::core::lexer::{Lexer, LexicalError};
use crate::core::types::{Position, Token, Trigger, TriggerKind, TriggerMode};

/// The token stream did not match the grammar
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Expected `{expected}` but received `{found}` at {position}")]
pub struct SyntaxError {
    /// Token or alternatives the grammar allowed here
    pub expected: String,
    /// What was actually there
    pub found: String,
    pub position: Position,
}

/// Any reason a trigger string failed to parse
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexicalError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// The caller named the kind up front and the grammar disagreed
    #[error("Expected a {expected} trigger but parsed a {found} trigger")]
    KindMismatch {
        expected: TriggerKind,
        found: TriggerKind,
    },
}

/// Parses a trigger string, telling command and signal triggers apart by
/// the presence of a `|signal|` section
///
/// # Example
/// ```ignore
/// let trigger = parse_trigger("(super+KEY_a)->{firefox}->[REPEAT]")?;
/// assert_eq!(trigger.payload, "firefox");
/// ```
pub fn parse_trigger(input: &str) -> Result<Trigger, ParseError> {
    Parser::new(input).parse()
}

/// Parses a trigger string whose kind is already known from elsewhere
/// (the `command_*` / `signal_*` option naming convention)
pub fn parse_trigger_as(input: &str, kind: TriggerKind) -> Result<Trigger, ParseError> {
    let trigger = parse_trigger(input)?;

    if trigger.kind() != kind {
        return Err(ParseError::KindMismatch {
            expected: kind,
            found: trigger.kind(),
        });
    }

    Ok(trigger)
}

/// Parser over a single input string
///
/// `parse` consumes the parser, so an instance never sees two inputs.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
        }
    }

    pub fn parse(mut self) -> Result<Trigger, ParseError> {
        self.lexer.advance()?;
        self.trigger()
    }

    fn trigger(&mut self) -> Result<Trigger, ParseError> {
        trace!("trigger");

        let mut signal = self.signal()?;
        let binding = self.binding()?;
        if signal.is_none() {
            signal = self.signal()?;
        }
        let (payload, mode) = self.command()?;
        self.end()?;

        Ok(Trigger {
            binding,
            payload,
            mode,
            signal,
        })
    }

    fn binding(&mut self) -> Result<String, ParseError> {
        trace!("binding");

        let binding = self.extract_section(Token::LeftParen, Token::RightParen)?;
        self.arrow()?;
        Ok(binding)
    }

    /// Signal section, only entered when the current token is a pipe
    fn signal(&mut self) -> Result<Option<String>, ParseError> {
        if self.lexer.current_token() != &Token::Pipe {
            return Ok(None);
        }
        trace!("signal");

        let signal = self.extract_section(Token::Pipe, Token::Pipe)?;
        self.arrow()?;
        Ok(Some(signal))
    }

    fn command(&mut self) -> Result<(String, TriggerMode), ParseError> {
        trace!("command");

        let payload = self.payload()?;
        let mode = self.mode()?;
        Ok((payload, mode))
    }

    fn payload(&mut self) -> Result<String, ParseError> {
        self.extract_section(Token::LeftBrace, Token::RightBrace)
    }

    fn mode(&mut self) -> Result<TriggerMode, ParseError> {
        match self.lexer.current_token() {
            Token::Arrow => {
                self.arrow()?;
                self.mode_section()
            }
            Token::LeftBracket => self.mode_section(),
            _ => Ok(TriggerMode::Normal),
        }
    }

    fn mode_section(&mut self) -> Result<TriggerMode, ParseError> {
        trace!("mode");

        self.expect(Token::LeftBracket)?;
        let position = self.lexer.position();
        let mode = self.input()?.parse::<TriggerMode>().map_err(|found| SyntaxError {
            expected: "ALWAYS` or `NORMAL` or `REPEAT".to_string(),
            found,
            position,
        })?;
        self.expect(Token::RightBracket)?;
        Ok(mode)
    }

    fn arrow(&mut self) -> Result<(), ParseError> {
        self.expect(Token::Arrow)
    }

    fn end(&mut self) -> Result<(), ParseError> {
        if self.lexer.current_token() != &Token::End {
            return Err(self.unexpected(&Token::End));
        }
        Ok(())
    }

    /// `start INPUT end`, returning the literal text
    fn extract_section(&mut self, start: Token, end: Token) -> Result<String, ParseError> {
        self.expect(start)?;
        let text = self.input()?;
        self.expect(end)?;
        Ok(text)
    }

    fn input(&mut self) -> Result<String, ParseError> {
        let text = match self.lexer.current_token() {
            Token::Input(text) => text.clone(),
            _ => return Err(self.unexpected(&Token::Input(String::new()))),
        };
        self.lexer.advance()?;
        Ok(text)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.lexer.current_token() != &expected {
            return Err(self.unexpected(&expected));
        }
        self.lexer.advance()?;
        Ok(())
    }

    fn unexpected(&self, expected: &Token) -> ParseError {
        ParseError::Syntax(SyntaxError {
            expected: expected.to_string(),
            found: self.lexer.current_token().to_string(),
            position: self.lexer.position(),
        })
    }
}
