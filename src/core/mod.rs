// Copyright 2025 bakri (tidynest@proton.me)
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

//! src/core/mod.rs
//!
//! Core trigger language module
//!
//! This module contains the trigger binding language front end and the
//! checks run on its output:
//! - Type definitions for tokens, modes and trigger descriptors
//! - The pull-based lexer
//! - The recursive-descent parser
//! - Post-parse validation
//! - Conflict detection between triggers sharing a binding
//!
//! Nothing here touches files or the compositor, so all of it is unit
//! testable on plain strings.

pub mod conflict;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod validator;

pub use conflict::{Conflict, ConflictDetector};
pub use lexer::{Lexer, LexicalError};
pub use parser::{parse_trigger, parse_trigger_as, ParseError, Parser, SyntaxError};
pub use types::*;
pub use validator::{validate_trigger, ValidationError};

#[cfg(test)]
mod tests;
