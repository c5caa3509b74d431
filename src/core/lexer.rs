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

//! src/core/lexer.rs
//!
//! Pull-based lexer for the trigger grammar
//!
//! The lexer hands out one token at a time. It greedily collects literal
//! text (bindings, payloads, signal names, modes) and stops the moment a
//! structural character or the `->` arrow shows up, leaving that character
//! unread for the next call.
//!
//! # Rules
//! - `( ) { } [ ] |` are punctuation tokens
//! - `->` is the arrow token, unless it interrupts a literal run, in which
//!   case the run is returned first and the arrow is scanned next time
//! - `\` makes the following character literal, whatever it is,
//!   and opens a literal run even as its first character, so `{\{}`
//!   reads as one `{` run. Earlier scanners only honoured escapes inside
//!   a run that was already open and rejected `{\{}` with a syntax error.
//! - Whitespace around a literal run is dropped, whitespace inside it kept
//! - Running out of input inside a literal run is a lexical error
//!
//! The lexer owns a cursor into an immutable `&str`, so "pushing back" a
//! character is simply not consuming it.

use thiserror::Error;

use crate::core::types::{Position, Token};

/// The character stream could not be split into tokens
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LexicalError {
    /// Input ended inside a literal run that no delimiter closed
    #[error("Undefined token at {position}: literal text runs to the end of input")]
    UndefinedToken { position: Position },

    /// Input ended right after a backslash
    #[error("Undefined token at {position}: nothing left to escape")]
    DanglingEscape { position: Position },
}

pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character
    offset: usize,
    /// Location of the next unread character
    cursor: Position,
    current: Token,
    /// Location of the first character of `current`
    position: Position,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`. Call `advance()` once to load the
    /// first token.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            cursor: Position::default(),
            current: Token::End,
            position: Position::default(),
        }
    }

    /// Scans the next token and makes it current
    ///
    /// Once the input is exhausted the current token stays `End`.
    pub fn advance(&mut self) -> Result<(), LexicalError> {
        self.current = self.scan()?;
        Ok(())
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Literal text of the current token (empty unless it is `Input`)
    pub fn current_token_text(&self) -> &str {
        self.current.text()
    }

    /// Location of the current token
    pub fn position(&self) -> Position {
        self.position
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.offset..].chars().nth(1)
    }

    /// Consumes one character, keeping the cursor position in step
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();

        if c == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }

        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn scan(&mut self) -> Result<Token, LexicalError> {
        self.skip_whitespace();
        self.position = self.cursor;

        let mut buffer = String::new();
        // Unescaped whitespace seen inside a run; only kept if more text follows
        let mut pending = String::new();
        let mut is_input = false;
        let mut escape = false;

        while let Some(c) = self.peek() {
            if escape {
                self.bump();
                buffer.push_str(&pending);
                pending.clear();
                buffer.push(c);
                // An escape opens the run even when it comes first
                is_input = true;
                escape = false;
                continue;
            }

            if let Some(token) = Token::from_punctuation(c) {
                if is_input {
                    return Ok(Token::Input(buffer));
                }
                self.bump();
                return Ok(token);
            }

            match c {
                '\\' => {
                    self.bump();
                    escape = true;
                }
                '-' if self.peek_second() == Some('>') => {
                    if is_input {
                        return Ok(Token::Input(buffer));
                    }
                    self.bump();
                    self.bump();
                    return Ok(Token::Arrow);
                }
                c if c.is_whitespace() => {
                    self.bump();
                    pending.push(c);
                }
                c => {
                    self.bump();
                    buffer.push_str(&pending);
                    pending.clear();
                    buffer.push(c);
                    is_input = true;
                }
            }
        }

        if escape {
            Err(LexicalError::DanglingEscape {
                position: self.cursor,
            })
        } else if is_input {
            Err(LexicalError::UndefinedToken {
                position: self.position,
            })
        } else {
            Ok(Token::End)
        }
    }
}
