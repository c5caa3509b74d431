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

//! Parser module tests
//!
//! Tests for parsing trigger strings:
//! - Command triggers with and without a mode
//! - Signal triggers in infix and prefix position
//! - Escapes resolved into trigger fields
//! - Syntax errors naming expected and found tokens
//! - Lexical errors passing through unchanged
//! - Kind checks for the option naming convention

use crate::core::{
    lexer::LexicalError,
    parser::*,
    types::{Position, TriggerKind, TriggerMode},
};

fn syntax_error(input: &str) -> SyntaxError {
    match parse_trigger(input) {
        Err(ParseError::Syntax(e)) => e,
        other => panic!("expected a syntax error for {input:?}, got {other:?}"),
    }
}

#[test]
fn test_parse_command_trigger() {
    let trigger = parse_trigger("(super+KEY_a)->{firefox}").unwrap();

    assert_eq!(trigger.binding, "super+KEY_a");
    assert_eq!(trigger.payload, "firefox");
    assert_eq!(trigger.mode, TriggerMode::Normal);
    assert_eq!(trigger.signal, None);
    assert_eq!(trigger.kind(), TriggerKind::Command);
}

#[test]
fn test_parse_modes() {
    let cases = [
        ("(a)->{b}->[ALWAYS]", TriggerMode::Always),
        ("(a)->{b}->[NORMAL]", TriggerMode::Normal),
        ("(a)->{b}->[REPEAT]", TriggerMode::Repeat),
        ("(a)->{b}[REPEAT]", TriggerMode::Repeat),
        ("(a)->{b}", TriggerMode::Normal),
    ];

    for (input, mode) in cases {
        assert_eq!(parse_trigger(input).unwrap().mode, mode, "{input}");
    }
}

#[test]
fn test_parse_payload_with_spaces_and_dashes() {
    let trigger = parse_trigger("(super+KEY_a)->{notify-send -u low hi}").unwrap();
    assert_eq!(trigger.payload, "notify-send -u low hi");
}

#[test]
fn test_parse_signal_trigger_infix() {
    let trigger =
        parse_trigger(r#"(super+KEY_b)->|hello|->{"recipient":"me"}->[ALWAYS]"#).unwrap();

    assert_eq!(trigger.binding, "super+KEY_b");
    assert_eq!(trigger.signal.as_deref(), Some("hello"));
    assert_eq!(trigger.payload, r#""recipient":"me""#);
    assert_eq!(trigger.mode, TriggerMode::Always);
    assert_eq!(trigger.kind(), TriggerKind::Signal);
}

#[test]
fn test_parse_signal_trigger_prefix() {
    let trigger = parse_trigger(r#"|greet|->(super+KEY_c)->{recipient":"me"}[ALWAYS]"#).unwrap();

    assert_eq!(trigger.signal.as_deref(), Some("greet"));
    assert_eq!(trigger.binding, "super+KEY_c");
    assert_eq!(trigger.payload, r#"recipient":"me""#);
    assert_eq!(trigger.mode, TriggerMode::Always);
}

#[test]
fn test_prefix_and_infix_forms_agree() {
    let prefix = parse_trigger("|hello|->(super+KEY_b)->{x}").unwrap();
    let infix = parse_trigger("(super+KEY_b)->|hello|->{x}").unwrap();
    assert_eq!(prefix, infix);
}

#[test]
fn test_second_signal_section_rejected() {
    let err = syntax_error("|a|->(b)->|c|->{d}");
    assert_eq!(err.expected, "{");
    assert_eq!(err.found, "|");
}

#[test]
fn test_escaped_delimiters_in_fields() {
    let trigger = parse_trigger(r"(super+\))->{echo \{\}}").unwrap();
    assert_eq!(trigger.binding, "super+)");
    assert_eq!(trigger.payload, "echo {}");
}

#[test]
fn test_unescaped_closing_brace_ends_payload() {
    // `{\{}` is a complete payload `{`; the extra `}` is left over
    let err = syntax_error(r"(super+\))->{\{}}");
    assert_eq!(err.expected, "END");
    assert_eq!(err.found, "}");
}

#[test]
fn test_missing_opening_paren() {
    let err = syntax_error("super+KEY_a)->{firefox}");
    assert_eq!(err.expected, "(");
    assert_eq!(err.found, "INPUT");
    assert_eq!(err.position, Position { line: 1, column: 1 });
}

#[test]
fn test_invalid_mode() {
    let err = syntax_error("(super+KEY_a)->{firefox}[SOMETIMES]");
    assert_eq!(err.expected, "ALWAYS` or `NORMAL` or `REPEAT");
    assert_eq!(err.found, "SOMETIMES");
    assert_eq!(err.position, Position { line: 1, column: 26 });
    assert_eq!(
        err.to_string(),
        "Expected `ALWAYS` or `NORMAL` or `REPEAT` but received `SOMETIMES` at 1:26"
    );
}

#[test]
fn test_mode_is_case_sensitive() {
    let err = syntax_error("(a)->{b}->[repeat]");
    assert_eq!(err.found, "repeat");
}

#[test]
fn test_unterminated_binding_is_lexical_error() {
    assert!(matches!(
        parse_trigger("(super+KEY_a"),
        Err(ParseError::Lexical(LexicalError::UndefinedToken { .. }))
    ));
}

#[test]
fn test_unterminated_mode_is_lexical_error() {
    assert!(matches!(
        parse_trigger("(super+KEY_a)->{firefox}[REPEAT"),
        Err(ParseError::Lexical(LexicalError::UndefinedToken { .. }))
    ));
}

#[test]
fn test_missing_closing_bracket() {
    let err = syntax_error("(super+KEY_a)->{firefox}[REPEAT)");
    assert_eq!(err.expected, "]");
    assert_eq!(err.found, ")");
}

#[test]
fn test_input_ending_after_arrow() {
    let err = syntax_error("(super+KEY_a)->{firefox}->");
    assert_eq!(err.expected, "[");
    assert_eq!(err.found, "END");
}

#[test]
fn test_input_ending_before_payload() {
    let err = syntax_error("(super+KEY_a)->");
    assert_eq!(err.expected, "{");
    assert_eq!(err.found, "END");
}

#[test]
fn test_missing_arrow_after_binding() {
    let err = syntax_error("(super+KEY_a){firefox}");
    assert_eq!(err.expected, "->");
    assert_eq!(err.found, "{");
}

#[test]
fn test_empty_section_rejected() {
    let err = syntax_error("()->{firefox}");
    assert_eq!(err.expected, "INPUT");
    assert_eq!(err.found, ")");

    let err = syntax_error("(a)->||->{b}");
    assert_eq!(err.expected, "INPUT");
    assert_eq!(err.found, "|");
}

#[test]
fn test_empty_input() {
    let err = syntax_error("");
    assert_eq!(err.expected, "(");
    assert_eq!(err.found, "END");
}

#[test]
fn test_parsing_is_independent_per_call() {
    let first = parse_trigger("(a)->|s|->{b}->[REPEAT]").unwrap();
    let second = parse_trigger("(c)->{d}").unwrap();

    assert_eq!(second.signal, None);
    assert_eq!(second.mode, TriggerMode::Normal);
    assert_eq!(parse_trigger("(a)->|s|->{b}->[REPEAT]").unwrap(), first);
}

#[test]
fn test_parser_struct() {
    let trigger = Parser::new("(a)->{b}").parse().unwrap();
    assert_eq!(trigger.binding, "a");
}

#[test]
fn test_parse_as_matching_kind() {
    assert!(parse_trigger_as("(a)->{b}", TriggerKind::Command).is_ok());
    assert!(parse_trigger_as("(a)->|s|->{b}", TriggerKind::Signal).is_ok());
}

#[test]
fn test_parse_as_kind_mismatch() {
    assert_eq!(
        parse_trigger_as("(a)->{b}", TriggerKind::Signal),
        Err(ParseError::KindMismatch {
            expected: TriggerKind::Signal,
            found: TriggerKind::Command,
        })
    );
}

#[test]
fn test_error_messages() {
    let err = parse_trigger("super+KEY_a)->{firefox}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error: Expected `(` but received `INPUT` at 1:1"
    );

    let err = parse_trigger("(a").unwrap_err();
    assert!(err.to_string().starts_with("Lexical error: Undefined token"));
}
