//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Lexer tests (tokens, escapes, arrow splitting, lexical errors)
//! - Parser tests (grammar, modes, signals, syntax errors)
//! - Type tests (Display round trips, mode and kind helpers)
//! - Conflict detection tests
//! - Validation tests

#[cfg(test)]
mod conflict_tests;
#[cfg(test)]
mod parser_tests;
