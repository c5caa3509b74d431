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

//! Ichise Trigger
//!
//! The binding language of the ichise Wayfire plugins: each config option
//! binds an activator to either a shell command or a signal emission.
//!
//! # Syntax
//!
//! ```text
//! (super+KEY_a)->{notify-send hi}                  command, NORMAL mode
//! (super+KEY_b)->{firefox}->[REPEAT]               command, REPEAT mode
//! (super+KEY_c)->|hello|->{"recipient":"me"}       signal `hello`
//! |hello|->(super+KEY_c)->{"recipient":"me"}[ALWAYS]
//! ```
//!
//! A backslash makes the next character literal, so structural characters
//! can appear inside bindings and payloads: `(super+KEY_x)->{echo \(hi\)}`.
//!
//! # Architecture
//!
//! - **`core`:** Lexer, parser, trigger types, validation, conflict detection
//! - **`config`:** Reading the trigger section and loading every option
//!
//! Running commands and emitting signals is left to the compositor plugin;
//! this crate only produces the descriptors it acts on.
//!
//! # Examples
//!
//! ## Parsing a trigger
//!
//! ```no_run
//! use ichise_trigger::core::{parse_trigger, TriggerMode};
//!
//! let trigger = parse_trigger("(super+KEY_b)->{firefox}->[REPEAT]")?;
//! assert_eq!(trigger.binding, "super+KEY_b");
//! assert_eq!(trigger.mode, TriggerMode::Repeat);
//! assert!(!trigger.is_signal());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Loading a config section
//!
//! ```no_run
//! use ichise_trigger::config::{TriggerLoader, TriggerSection, DEFAULT_SECTION};
//!
//! let section = TriggerSection::from_file("/tmp/wayfire.ini", DEFAULT_SECTION)?;
//! let report = TriggerLoader::new().load(&section);
//! println!("Loaded {} triggers", report.entries.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;

// Re-export commonly used types for convenience
pub use self::core::{parse_trigger, ParseError, Trigger, TriggerKind, TriggerMode};
