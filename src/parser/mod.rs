//! Parser that turns significant tokens into a concrete syntax tree.
//!
//! Expressions use a Pratt parser: NUD (null denotation) handlers start an
//! expression, LED (left denotation) handlers extend it while the next
//! operator binds tighter. Statements dispatch on keyword or on the shape the
//! [`resolver`] classifies from bounded lookahead. Every ambiguity the grammar
//! declares is decided by an entry of the resolver's conflict table.
//!
//! - `parser`: token cursor and the top-level loop
//! - `lookups`: handler and binding power tables
//! - `expr`, `types`, `stmt`: the grammar itself
//! - `recovery`: `ERROR` nodes for statements that fail to parse

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod recovery;
pub mod resolver;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
