//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "`".to_string(),
        },
        Position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(error.is_lexical());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        Position(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_syntax_errors_are_not_lexical() {
    let error = Error::new(
        ErrorImpl::ExpectedToken {
            expected: ")".to_string(),
            found: "{".to_string(),
        },
        Position(0),
    );

    assert_eq!(error.get_error_name(), "ExpectedToken");
    assert!(!error.is_lexical());
}

#[test]
fn test_here_string_mismatch_tip() {
    let error = Error::new(
        ErrorImpl::HereStringDelimiterMismatch {
            expected: "A".to_string(),
            found: "B".to_string(),
        },
        Position(0),
    );

    assert!(error.is_lexical());
    assert_eq!(
        error.get_tip().to_string(),
        "Here-string opened with `A` but closed with `B`"
    );
}

#[test]
fn test_unrecognised_token_has_no_tip() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "?".to_string(),
        },
        Position(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_unexpected_token_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Position(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(msg) => assert!(msg.contains("}")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_display_includes_position() {
    let error = Error::new(ErrorImpl::UnterminatedString, Position(7));

    assert_eq!(error.to_string(), "unterminated string literal at byte 7");
}

#[test]
fn test_error_clone() {
    let error = Error::new(
        ErrorImpl::UnknownDirective {
            directive: "#nope".to_string(),
        },
        Position(3),
    );

    assert_eq!(error.clone(), error);
}

#[test]
fn test_nesting_too_deep() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 128 }, Position(7));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(!error.is_lexical());
    assert_eq!(error.to_string(), "nesting deeper than 128 levels at byte 7");
}
