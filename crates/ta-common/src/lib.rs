//! Shared foundations for the timed-automata type checker: diagnostics and
//! source positions. Kept dependency-free so both the AST model and the
//! checker crate can build on it without creating cycles.

pub mod diagnostics;
pub mod position;

pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSink};
pub use position::Position;
