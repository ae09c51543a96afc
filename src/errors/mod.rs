//! Error types and error handling for the front-end.
//!
//! This module defines the diagnostics produced while lexing and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - Lexical and syntax error variants
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions
//!
//! Errors never abort a parse. They are attached to error nodes in the tree.

pub mod errors;

#[cfg(test)]
mod tests;
