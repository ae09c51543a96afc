//! Lexical analysis.
//!
//! Converts source text into tokens with a regex pattern table. The lexer
//! never fails: malformed input becomes `TokenKind::Error` tokens carrying
//! their diagnostic. It handles:
//!
//! - Identifiers (keywords are contextual and resolved by the parser)
//! - Numbers, quoted strings with escapes and placeholders, here-strings
//! - The closed directive set, including `,suffix` forms
//! - Raw `#asm` bodies
//! - Comments and whitespace, later folded into token trivia by [`trivia`]

pub mod directives;
pub mod lexer;
pub mod tokens;
pub mod trivia;

#[cfg(test)]
mod tests;
