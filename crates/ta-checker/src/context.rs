//! `Checker` bundles a mutable handle to the [`System`] together with a
//! handful of options. Every other module in this crate adds an `impl`
//! block onto it; this mirrors the source's single `CheckerState` that
//! every concern (expressions, statements, declarations, properties)
//! extends through its own file.

use ta_model::{System, TypeId};

/// Options that steer checking without changing the language itself.
#[derive(Debug, Clone, Copy)]
pub struct CheckerOptions {
    /// When false, CSP-style (bare) synchronisations are rejected outright
    /// instead of merely being tracked for the exclusivity rule. Most UPPAAL
    /// dialects only ever use IO (`!`/`?`) synchronisation.
    pub allow_csp_sync: bool,
    /// When true, `SMC_requires_input_edges_to_be_deterministic` is checked
    /// for statistical-model-checking queries.
    pub smc_determinism_warning: bool,
    /// When true, edges are checked against refinement-checking's
    /// controllability discipline: outputs should be uncontrollable,
    /// inputs should be controllable.
    pub refinement_mode: bool,
    /// When false, an edge's `probability` field (SMC branching weight) is
    /// left unchecked -- some dialects of the language don't have it.
    pub check_edge_probabilities: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            allow_csp_sync: true,
            smc_determinism_warning: true,
            refinement_mode: false,
            check_edge_probabilities: true,
        }
    }
}

/// The checker itself. Stateless beyond the options: all working state
/// (node types, diagnostics, recorders) lives on `System` so that checking
/// one declaration can never leak into another's context by accident.
pub struct Checker<'a> {
    pub sys: &'a mut System,
    pub options: CheckerOptions,
    /// Set by `DeclarationChecker` while walking a template declared
    /// `dynamic`; governs whether `exit` is accepted.
    pub in_dynamic_template: bool,
    /// Set by `DeclarationChecker` before walking a function body; governs
    /// `return` statement checking.
    pub current_return_type: TypeId,
}

impl<'a> Checker<'a> {
    #[must_use]
    pub fn new(sys: &'a mut System) -> Self {
        Self { sys, options: CheckerOptions::default(), in_dynamic_template: false, current_return_type: TypeId::VOID }
    }

    #[must_use]
    pub fn with_options(sys: &'a mut System, options: CheckerOptions) -> Self {
        Self { sys, options, in_dynamic_template: false, current_return_type: TypeId::VOID }
    }
}
