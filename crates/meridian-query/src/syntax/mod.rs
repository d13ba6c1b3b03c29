//! Script syntax parsing.
//!
//! One statement grammar: the restricted Python-like subset described in
//! the crate docs. `common` holds the shared chumsky primitives,
//! `script` the statement and expression grammar.

mod common;
mod script;

pub use script::parse_program;
