//! Error types for the compile pipeline.

use thiserror::Error;

/// Errors produced while parsing script source.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Source did not match the supported statement subset
    #[error("failed to parse script:\n{errors}")]
    Script { errors: String },
}

/// Errors produced while rendering a program to query text.
///
/// Rendering is all-or-nothing: the first error aborts the whole
/// compilation and no partial query is returned.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A node kind appeared in a position that has no translation rule
    #[error("a {kind} cannot name a call target")]
    UnsupportedNode { kind: &'static str },

    /// A call resolved to a name that matches no recognized query form
    #[error("'{name}' is not the name of a known Overpass query form")]
    UnknownCallTarget { name: String },

    /// Element locators select by at most one id or area reference
    #[error("locator '{target}' takes at most one positional argument, got {count}")]
    TooManyPositionalArguments { target: String, count: usize },

    /// `.filter` chains exactly one clause per call
    #[error("'{target}' expects exactly one positional argument, got {count}")]
    FilterArity { target: String, count: usize },
}

/// Umbrella error for the full source-to-query pipeline.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
