//! `CompileTimeComputability` (§4.3): a pre-pass collects every symbol
//! whose value is fixed at compile time, then `is_compile_time_computable`
//! answers whether a given expression only reads such symbols.

use rustc_hash::FxHashSet;

use ta_model::types::has_prefix;
use ta_model::{ExprId, ExprKind, System, TypeKind, UserData};

/// Populates `system.compile_time_symbols` with every top-level constant
/// variable and every non-ref, non-double, constant-typed instance
/// parameter. Must run before any `is_compile_time_computable` query.
pub fn collect_compile_time_symbols(system: &mut System) {
    let mut set = FxHashSet::default();

    for variable in &system.variables {
        let sym = variable.symbol;
        if has_prefix(&system.types, system.symbols.get(sym).ty, TypeKind::Const) {
            set.insert(sym);
        }
    }

    for template in &system.templates {
        for &param in &system.frames.get(template.parameters_frame).symbols {
            let ty = system.symbols.get(param).ty;
            let is_const = has_prefix(&system.types, ty, TypeKind::Const);
            let is_ref = has_prefix(&system.types, ty, TypeKind::Ref);
            let is_double = matches!(system.types.get(ta_model::types::unwrap_prefixes(&system.types, ty)).kind, TypeKind::Double);
            if is_const && !is_ref && !is_double {
                set.insert(param);
            }
        }
    }

    system.compile_time_symbols = set;
}

/// Collects every symbol `expr` might read, transitively following calls
/// (but never descending into a callee's own locals -- those are the
/// callee's business, not the caller's read set).
pub fn collect_reads(system: &System, expr: ExprId, out: &mut FxHashSet<ta_model::SymbolId>, seen_fns: &mut FxHashSet<ta_model::FunctionId>) {
    let node = system.exprs.get(expr);
    if let Some(sym) = node.symbol
        && node.kind == ExprKind::Identifier
    {
        out.insert(sym);
    }
    if node.kind == ExprKind::Call
        && let Some(sym) = node.symbol
        && let Some(UserData::Function(fid)) = system.symbols.get(sym).user_data
        && seen_fns.insert(fid)
    {
        let func = &system.functions[fid.0 as usize];
        out.extend(func.depends.iter().copied());
    }
    for &child in &node.children {
        collect_reads(system, child, out, seen_fns);
    }
}

/// `e` is compile-time computable iff every symbol it (transitively) reads
/// is either a function symbol or a member of `compile_time_symbols`.
#[must_use]
pub fn is_compile_time_computable(system: &System, expr: ExprId) -> bool {
    let mut reads = FxHashSet::default();
    let mut seen_fns = FxHashSet::default();
    collect_reads(system, expr, &mut reads, &mut seen_fns);

    reads.iter().all(|sym| {
        let is_function = matches!(system.symbols.get(*sym).user_data, Some(UserData::Function(_)));
        is_function || system.compile_time_symbols.contains(sym)
    })
}
