//! Utility macros for the front-end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed tokens
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance with no attached trivia.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's exact source text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), Span::new(0, 2));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
            leading: Vec::new(),
            error: None,
        }
    };
}

/// Creates a default lexer handler for a fixed-spelling token.
///
/// Generates a handler function that pushes a token with the given kind
/// and advances the lexer position by the token's length.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal spelling (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^<<=").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals, "<<="),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer, _regex: &::regex::Regex| {
            let start = lexer.pos();
            lexer.push($crate::MK_TOKEN!(
                $kind,
                String::from($value),
                $crate::Span::new(start, start + $value.len())
            ));
            lexer.advance_n($value.len());
        }
    };
}
