//! Source position tracking.
//!
//! The builder that constructs the AST stamps every node with a `Position`;
//! the checker never computes these itself, only forwards them into
//! diagnostics.

/// A single point in a source file, as produced by the (external) lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// A placeholder used for synthesized nodes that have no source origin.
    #[must_use]
    pub fn synthetic() -> Self {
        Self { line: 0, column: 0 }
    }
}
