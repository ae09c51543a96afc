//! Concrete syntax tree.
//!
//! Nodes own their children exclusively. Every token of the input,
//! whitespace and comments included, is a leaf of exactly one node, so the
//! leaves read in order reproduce the source.

pub mod cst;
pub mod kinds;
pub mod tree;
