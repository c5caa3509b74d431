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

//! Post-parse trigger validation
//!
//! The grammar only guarantees that every section is present. This module
//! checks what the sections contain before a trigger is handed to the
//! compositor:
//! - Signal names are plain identifiers the compositor can register
//! - Bindings and payloads carry no control characters and stay bounded
//!
//! `check_signal_payload` is kept apart from `validate_trigger`: a
//! signal payload is only decoded when the signal is emitted, so a payload
//! that is not JSON is worth a warning but must not stop the trigger from
//! loading.
//!
//! Signal names use WHITELIST validation (allow known-good characters)
//! rather than rejecting a list of known-bad ones.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::core::types::Trigger;

/// Longest binding or payload accepted
pub const MAX_SECTION_LEN: usize = 1000;

static SIGNAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("signal name pattern should be valid regex")
});

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Signal name contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid signal name '{0}'")]
    InvalidSignalName(String),

    /// A section holds a control character (newline, tab, escape, ...)
    #[error("Control character in {section}: {text:?}")]
    ControlCharacter { section: &'static str, text: String },

    #[error("{section} too long: {len} characters (max {MAX_SECTION_LEN})")]
    TooLong { section: &'static str, len: usize },

    /// Signal payload is not a JSON object body
    #[error("Signal payload is not a JSON object: {0}")]
    InvalidSignalPayload(String),
}

/// Validates a signal name against the identifier whitelist
pub fn validate_signal_name(name: &str) -> Result<(), ValidationError> {
    if SIGNAL_NAME.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSignalName(name.to_string()))
    }
}

/// Checks length and control characters of one section
pub fn validate_section(section: &'static str, text: &str) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len > MAX_SECTION_LEN {
        return Err(ValidationError::TooLong { section, len });
    }

    if text.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter {
            section,
            text: text.to_string(),
        });
    }

    Ok(())
}

/// Checks that a signal trigger's message decodes as a JSON object
pub fn validate_signal_message(message: &str) -> Result<(), ValidationError> {
    match serde_json::from_str::<serde_json::Value>(message) {
        Ok(serde_json::Value::Object(_)) => Ok(()),
        Ok(_) => Err(ValidationError::InvalidSignalPayload(message.to_string())),
        Err(e) => Err(ValidationError::InvalidSignalPayload(e.to_string())),
    }
}

/// Validates a complete trigger
///
/// Performs the checks a trigger has to pass before it is registered:
/// - Binding and payload length and control characters
/// - Signal name whitelist (signal triggers only)
pub fn validate_trigger(trigger: &Trigger) -> Result<(), ValidationError> {
    validate_section("binding", &trigger.binding)?;
    validate_section("payload", &trigger.payload)?;

    if let Some(signal) = &trigger.signal {
        validate_signal_name(signal)?;
    }

    Ok(())
}

/// Checks the JSON shape of a signal trigger's message
///
/// Command triggers always pass.
pub fn check_signal_payload(trigger: &Trigger) -> Result<(), ValidationError> {
    match trigger.signal_message() {
        Some(message) => validate_signal_message(&message),
        None => Ok(()),
    }
}
