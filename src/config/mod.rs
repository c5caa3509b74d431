//! Trigger configuration loading.
//!
//! Triggers live in one section of the compositor's INI-style config:
//!
//! ```ini
//! [ichise-trigger]
//! browser = (super+KEY_b)->{firefox}
//! volume_up = (KEY_VOLUMEUP)->{pactl set-sink-volume @DEFAULT_SINK@ +5%}->[REPEAT]
//! greet = (super+KEY_g)->|hello|->{"greeting":"hi","recipient":"me"}
//! ```
//!
//! Every option is parsed on its own. A malformed option is logged and
//! recorded in the [`LoadReport`], and loading carries on with the rest:
//! one bad binding never stops the others from loading.
//!
//! # Example
//!
//! ```no_run
//! use ichise_trigger::config::{TriggerLoader, TriggerSection, DEFAULT_SECTION};
//!
//! let section = TriggerSection::from_file("/home/user/.config/wayfire.ini", DEFAULT_SECTION)?;
//! let report = TriggerLoader::new().load(&section);
//!
//! for entry in &report.entries {
//!     println!("{} = {}", entry.name, entry.trigger);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;

pub use error::{ConfigError, LoadError};

use nom::{
    bytes::complete::{take_till1, take_until},
    character::complete::{char, space0},
    combinator::all_consuming,
    sequence::delimited,
    IResult, Parser,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::core::{parse_trigger, parse_trigger_as, validate_trigger, Trigger, TriggerKind};

/// Section the triggers are read from unless told otherwise.
pub const DEFAULT_SECTION: &str = "ichise-trigger";

/// One `name = value` line of the trigger section.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigOption {
    pub name: String,
    /// Raw trigger string, handed to the parser untouched apart from trimming
    pub value: String,
    /// 1-based line number in the config file
    pub line: usize,
}

/// A line inside the section that is neither an option, a comment nor blank.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MalformedLine {
    pub line: usize,
    pub content: String,
}

/// The options of a single config section, in file order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TriggerSection {
    pub name: String,
    pub options: Vec<ConfigOption>,
    /// Lines skipped while reading; the loader reports them as failures
    pub malformed: Vec<MalformedLine>,
}

/// Parse `[name]`
fn parse_section_header(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(char('['), take_until("]"), char(']')))
        .parse(input)
        .map(|(remaining, name)| (remaining, name.trim()))
}

/// Parse `name = value`
fn parse_option_line(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = take_till1(|c: char| c == '=').parse(input)?;
    let (value, _) = (char('='), space0).parse(input)?;

    Ok(("", (name.trim(), value.trim())))
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';')
}

impl TriggerSection {
    /// Extracts the named section from INI text.
    ///
    /// Lines outside the section are ignored, even malformed ones. A
    /// section header that appears more than once is merged. A malformed
    /// line inside the section is logged and kept in `malformed`; reading
    /// carries on with the next line.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SectionNotFound` if no `[section_name]` header
    /// exists.
    pub fn from_ini(content: &str, section_name: &str) -> Result<Self, ConfigError> {
        let mut options = Vec::new();
        let mut malformed = Vec::new();
        let mut found = false;
        let mut in_section = false;

        for (line_num, line) in content.lines().enumerate() {
            let line_num = line_num + 1;
            let line_trimmed = line.trim();

            if line_trimmed.is_empty() || is_comment(line_trimmed) {
                continue;
            }

            if let Ok((_, header)) = parse_section_header(line_trimmed) {
                in_section = header == section_name;
                found |= in_section;
                continue;
            }

            if !in_section {
                continue;
            }

            match parse_option_line(line_trimmed) {
                Ok((_, (name, value))) if !name.is_empty() => options.push(ConfigOption {
                    name: name.to_string(),
                    value: value.to_string(),
                    line: line_num,
                }),
                _ => {
                    warn!(line = line_num, "Skipping malformed config line: {}", line_trimmed);
                    malformed.push(MalformedLine {
                        line: line_num,
                        content: line_trimmed.to_string(),
                    });
                }
            }
        }

        if !found {
            return Err(ConfigError::SectionNotFound(section_name.to_string()));
        }

        debug!(
            "Read {} options from section [{}]",
            options.len(),
            section_name
        );

        Ok(Self {
            name: section_name.to_string(),
            options,
            malformed,
        })
    }

    /// Reads a config file and extracts the named section.
    pub fn from_file(path: impl AsRef<Path>, section_name: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_ini(&content, section_name)
    }
}

/// How command and signal triggers are told apart.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DiscriminationRule {
    /// A `|signal|` section in the trigger string makes it a signal trigger.
    #[default]
    Grammar,
    /// Older configs: the option name starts with `command_` or `signal_`,
    /// and the trigger string has to agree with it.
    OptionName,
}

/// A successfully loaded trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerEntry {
    /// Option name the trigger was read from
    pub name: String,
    pub trigger: Arc<Trigger>,
}

/// A skipped option and the reason it was skipped.
#[derive(Debug, PartialEq)]
pub struct LoadFailure {
    pub name: String,
    pub line: usize,
    pub error: LoadError,
}

/// Outcome of loading a section: what loaded and what didn't.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub entries: Vec<TriggerEntry>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Returns true if every option loaded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Looks up a loaded trigger by option name.
    pub fn get(&self, name: &str) -> Option<&Arc<Trigger>> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.trigger)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &Arc<Trigger>> {
        self.entries.iter().map(|entry| &entry.trigger)
    }
}

/// Parses and validates every option of a trigger section.
#[derive(Clone, Debug, Default)]
pub struct TriggerLoader {
    rule: DiscriminationRule,
}

impl TriggerLoader {
    /// Creates a loader using the grammar to tell trigger kinds apart.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(rule: DiscriminationRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> DiscriminationRule {
        self.rule
    }

    /// Loads every option, isolating failures per option.
    pub fn load(&self, section: &TriggerSection) -> LoadReport {
        let mut report = LoadReport::default();

        for bad in &section.malformed {
            report.failures.push(LoadFailure {
                name: bad.content.clone(),
                line: bad.line,
                error: LoadError::MalformedLine(bad.content.clone()),
            });
        }

        for option in &section.options {
            debug!("Parsing trigger: {}", option.name);

            match self.load_option(option) {
                Ok(trigger) => report.entries.push(TriggerEntry {
                    name: option.name.clone(),
                    trigger: Arc::new(trigger),
                }),
                Err(e) => {
                    error!(option = %option.name, line = option.line, "{}", e);
                    report.failures.push(LoadFailure {
                        name: option.name.clone(),
                        line: option.line,
                        error: e,
                    });
                }
            }
        }

        report.failures.sort_by_key(|failure| failure.line);

        info!(
            "Loaded {} triggers from [{}] ({} skipped)",
            report.entries.len(),
            section.name,
            report.failures.len()
        );

        report
    }

    /// Parses and validates a single option.
    pub fn load_option(&self, option: &ConfigOption) -> Result<Trigger, LoadError> {
        let trigger = match self.rule {
            DiscriminationRule::Grammar => parse_trigger(&option.value)?,
            DiscriminationRule::OptionName => {
                let kind = TriggerKind::from_option_name(&option.name)
                    .ok_or_else(|| LoadError::UnknownKind(option.name.clone()))?;
                parse_trigger_as(&option.value, kind)?
            }
        };

        validate_trigger(&trigger)?;
        Ok(trigger)
    }
}

#[cfg(test)]
mod tests;
