use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Lexical errors come from the tokenizer, everything else from the parser.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnterminatedString
                | ErrorImpl::UnterminatedBlockComment
                | ErrorImpl::UnterminatedHereString { .. }
                | ErrorImpl::HereStringDelimiterMismatch { .. }
                | ErrorImpl::UnterminatedAsmBlock
                | ErrorImpl::UnknownDirective { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedBlockComment => "UnterminatedBlockComment",
            ErrorImpl::UnterminatedHereString { .. } => "UnterminatedHereString",
            ErrorImpl::HereStringDelimiterMismatch { .. } => "HereStringDelimiterMismatch",
            ErrorImpl::UnterminatedAsmBlock => "UnterminatedAsmBlock",
            ErrorImpl::UnknownDirective { .. } => "UnknownDirective",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::MisplacedDirective { .. } => "MisplacedDirective",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::UnresolvedConflict { .. } => "UnresolvedConflict",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnterminatedBlockComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*/`"))
            }
            ErrorImpl::UnterminatedHereString { delimiter } => ErrorTip::Suggestion(format!(
                "Here-string is never closed, expected `{}` to end it",
                delimiter
            )),
            ErrorImpl::HereStringDelimiterMismatch { expected, found } => {
                ErrorTip::Suggestion(format!(
                    "Here-string opened with `{}` but closed with `{}`",
                    expected, found
                ))
            }
            ErrorImpl::UnterminatedAsmBlock => {
                ErrorTip::Suggestion(String::from("#asm block is missing its closing `}`"))
            }
            ErrorImpl::UnknownDirective { directive } => {
                ErrorTip::Suggestion(format!("`{}` is not a known directive", directive))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
            }
            ErrorImpl::ExpectedExpression { found } => {
                ErrorTip::Suggestion(format!("Expected an expression, found `{}`", found))
            }
            ErrorImpl::ExpectedType { found } => {
                ErrorTip::Suggestion(format!("Expected a type, found `{}`", found))
            }
            ErrorImpl::MisplacedDirective { directive } => ErrorTip::Suggestion(format!(
                "`{}` can only be used as a statement",
                directive
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nesting goes deeper than {} levels, split the expression up",
                limit
            )),
            ErrorImpl::UnresolvedConflict { rules } => ErrorTip::Suggestion(format!(
                "Parser could not choose between {}, this is a parser bug",
                rules
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at byte {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("unterminated here-string, expected closing {delimiter:?}")]
    UnterminatedHereString { delimiter: String },
    #[error("here-string delimiter mismatch: expected {expected:?}, found {found:?}")]
    HereStringDelimiterMismatch { expected: String, found: String },
    #[error("unterminated #asm block")]
    UnterminatedAsmBlock,
    #[error("unknown directive: {directive:?}")]
    UnknownDirective { directive: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected:?}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("expected expression, found {found:?}")]
    ExpectedExpression { found: String },
    #[error("expected type, found {found:?}")]
    ExpectedType { found: String },
    #[error("directive {directive:?} is not valid in expression position")]
    MisplacedDirective { directive: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("unresolved grammar conflict between {rules}")]
    UnresolvedConflict { rules: String },
}
