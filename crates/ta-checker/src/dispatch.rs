//! Top-level entry point. Mirrors the source's `check_source_file`: a single
//! function that drives every pass over a fully-parsed [`System`] in the
//! order later passes depend on, and returns whether checking succeeded
//! (diagnostics of severity `Error` accumulate on `system.diagnostics`
//! regardless of the return value -- callers that want partial results on
//! failure can still read them).

use tracing::{span, Level};

use ta_model::System;

use crate::compile_time::collect_compile_time_symbols;
use crate::context::{Checker, CheckerOptions};

/// Checks `system` with default options. See [`check_system_with_options`].
pub fn check_system(system: &mut System) -> bool {
    check_system_with_options(system, CheckerOptions::default())
}

/// Runs the full checking pipeline over `system`:
///
/// 1. The compile-time-computability pre-pass (§4.3), so later passes can
///    query [`crate::compile_time::is_compile_time_computable`] without
///    re-deriving it node by node.
/// 2. Declaration checking (§4.8): every variable, template, instance and
///    function, which in turn drives expression/statement/initialiser/type
///    checking and rate decomposition as it walks.
/// 3. Property checking (§4.9): every query against the now fully-annotated
///    system.
pub fn check_system_with_options(system: &mut System, options: CheckerOptions) -> bool {
    let _span = span!(Level::INFO, "check_system").entered();

    collect_compile_time_symbols(system);

    let mut checker = Checker::with_options(system, options);
    let declarations_ok = checker.check_declarations();
    let properties_ok = checker.check_properties();

    declarations_ok && properties_ok
}
