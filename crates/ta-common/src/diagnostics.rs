//! Diagnostic sink shared by every component of the checker.
//!
//! Diagnostics are opaque strings plus a stable, verbatim message identifier.
//! Downstream localisation and golden tests match on the identifier, so the
//! identifiers in [`messages`] must never be renamed once published.

pub mod messages;

use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Error,
    Warning,
}

/// All diagnostics are tagged with this category per the system-visitor
/// contract; there is only one category in this core.
pub const TYPECHECKING: &str = "(typechecking)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: Position,
    /// Stable identifier, e.g. `Prefix_urgent_only_allowed_for_locations_and_channels`.
    pub id: &'static str,
    /// Human readable message, already formatted with any arguments.
    pub message: String,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    #[must_use]
    pub fn error(position: Position, id: &'static str, message: impl Into<String>) -> Self {
        Self {
            position,
            id,
            message: message.into(),
            category: DiagnosticCategory::Error,
        }
    }

    #[must_use]
    pub fn warning(position: Position, id: &'static str, message: impl Into<String>) -> Self {
        Self {
            position,
            id,
            message: message.into(),
            category: DiagnosticCategory::Warning,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Accumulates diagnostics in traversal order. The checker never throws;
/// every failure is appended here and checking continues with neighbouring
/// declarations.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, position: Position, id: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(position, id, message));
    }

    pub fn add_warning(&mut self, position: Position, id: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(position, id, message));
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Substitutes `{0}`, `{1}`, ... placeholders in a message template.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
