//! `CompatibilityOracle` (§4.2): structural equivalence, assignment and
//! equality compatibility, and the lvalue family of analyses.

use ta_model::types::{TypeArena, TypeId, TypeKind, unwrap_prefixes};
use ta_model::{ExprArena, ExprId, ExprKind, System};

use crate::compile_time::is_compile_time_computable;
use crate::type_predicates::{is_clock, is_double_value, is_integral, is_number};

/// 0 for urgent, 1 for broadcast, 2 for plain. A channel argument is
/// compatible with a channel parameter iff its capability is `>=` the
/// parameter's (urgent can satisfy anything, broadcast can satisfy
/// broadcast-or-plain, plain only satisfies plain).
#[must_use]
pub fn channel_capability(arena: &TypeArena, ty: TypeId) -> u8 {
    if ta_model::types::has_prefix(arena, ty, TypeKind::Urgent) {
        0
    } else if ta_model::types::has_prefix(arena, ty, TypeKind::Broadcast) {
        1
    } else {
        2
    }
}

/// Structural equivalence, ignoring `const`/`system-meta`/`ref` prefixes.
/// Reflexive and symmetric (P7).
#[must_use]
pub fn are_equivalent(arena: &TypeArena, exprs: &ExprArena, a: TypeId, b: TypeId) -> bool {
    let a = strip_transparent(arena, a);
    let b = strip_transparent(arena, b);
    let ta = arena.get(a);
    let tb = arena.get(b);

    match (ta.kind, tb.kind) {
        (TypeKind::Int, TypeKind::Int) => match (ta.range, tb.range) {
            (None, None) => true,
            (Some((al, au)), Some((bl, bu))) => expr_equal(exprs, al, bl) && expr_equal(exprs, au, bu),
            _ => false,
        },
        (TypeKind::Channel, TypeKind::Channel) => channel_capability(arena, a) == channel_capability(arena, b),
        (TypeKind::Record, TypeKind::Record) => {
            ta.labels == tb.labels
                && ta.subs.len() == tb.subs.len()
                && ta.subs.iter().zip(tb.subs.iter()).all(|(&sa, &sb)| are_equivalent(arena, exprs, sa, sb))
        }
        (TypeKind::Array, TypeKind::Array) => {
            are_array_sizes_equivalent(arena, exprs, ta.subs[0], tb.subs[0]) && are_equivalent(arena, exprs, ta.subs[1], tb.subs[1])
        }
        (TypeKind::Scalar, TypeKind::Scalar) => ta.labels == tb.labels,
        (TypeKind::Bool, TypeKind::Bool)
        | (TypeKind::Clock, TypeKind::Clock)
        | (TypeKind::Double, TypeKind::Double)
        | (TypeKind::Cost, TypeKind::Cost)
        | (TypeKind::Diff, TypeKind::Diff)
        | (TypeKind::Void, TypeKind::Void)
        | (TypeKind::Process, TypeKind::Process)
        | (TypeKind::ProcessVar, TypeKind::ProcessVar)
        | (TypeKind::TioGraph, TypeKind::TioGraph)
        | (TypeKind::Fraction, TypeKind::Fraction)
        | (TypeKind::Rate, TypeKind::Rate) => true,
        _ => false,
    }
}

fn are_array_sizes_equivalent(arena: &TypeArena, exprs: &ExprArena, a: TypeId, b: TypeId) -> bool {
    let (ta, tb) = (arena.get(a), arena.get(b));
    match (ta.range, tb.range) {
        (Some((al, au)), Some((bl, bu))) => expr_equal(exprs, al, bl) && expr_equal(exprs, au, bu),
        (None, None) => ta.labels == tb.labels, // scalar-indexed arrays: name equivalence
        _ => false,
    }
}

/// Peels `const`, `system-meta` and `ref` only -- the prefixes equivalence
/// deliberately ignores. Other prefixes (urgent/broadcast/committed/hybrid)
/// are part of the declared shape and are left alone here; callers that
/// want the fully bare shape use `unwrap_prefixes`.
fn strip_transparent(arena: &TypeArena, mut id: TypeId) -> TypeId {
    loop {
        let t = arena.get(id);
        match t.kind {
            TypeKind::Const | TypeKind::SystemMeta | TypeKind::Ref | TypeKind::Hybrid => id = t.subs[0],
            TypeKind::Label => id = t.subs[0],
            _ => return id,
        }
    }
}

/// Expression-equal, not value-equal: range endpoints are compared
/// structurally (same kind, same children, recursively), matching the
/// source's refusal to constant-fold during equivalence checks.
#[must_use]
pub fn expr_equal(exprs: &ExprArena, a: ExprId, b: ExprId) -> bool {
    if a == b {
        return true;
    }
    let (na, nb) = (exprs.get(a), exprs.get(b));
    if na.kind != nb.kind || na.children.len() != nb.children.len() {
        return false;
    }
    if na.value != nb.value || na.symbol != nb.symbol {
        return false;
    }
    na.children.iter().zip(nb.children.iter()).all(|(&ca, &cb)| expr_equal(exprs, ca, cb))
}

/// `lvalue <- rvalue`. `init` relaxes the clock/double rule: a clock may be
/// initialised from a double (but never assigned one at runtime).
#[must_use]
pub fn are_assignment_compatible(arena: &TypeArena, exprs: &ExprArena, lvalue: TypeId, rvalue: TypeId, init: bool) -> bool {
    if is_integral(arena, lvalue) && is_integral(arena, rvalue) {
        return true;
    }
    if (is_clock(arena, lvalue) || is_double_value(arena, lvalue)) && is_number(arena, rvalue) && !init {
        return true;
    }
    if is_clock(arena, lvalue) && is_double_value(arena, rvalue) && init {
        return true;
    }
    are_equivalent(arena, exprs, lvalue, rvalue)
}

/// Used by `==`/`!=`. Clocks are deliberately excluded -- comparing clocks
/// produces a guard, handled by the operator algebra, not a plain boolean.
#[must_use]
pub fn are_eq_compatible(arena: &TypeArena, exprs: &ExprArena, a: TypeId, b: TypeId) -> bool {
    if is_clock(arena, a) || is_clock(arena, b) {
        return false;
    }
    if is_integral(arena, a) && is_integral(arena, b) {
        return true;
    }
    if matches!(arena.get(unwrap_prefixes(arena, a)).kind, TypeKind::ProcessVar)
        && matches!(arena.get(unwrap_prefixes(arena, b)).kind, TypeKind::ProcessVar)
    {
        return true;
    }
    are_equivalent(arena, exprs, a, b)
}

/// `isParameterCompatible`.
#[must_use]
pub fn is_parameter_compatible(system: &System, param_type: TypeId, arg: ExprId) -> bool {
    let arg_type = system.exprs.get(arg).get_type();
    let param_is_ref = ta_model::types::has_prefix(&system.types, param_type, TypeKind::Ref);
    let param_is_const = ta_model::types::has_prefix(&system.types, param_type, TypeKind::Const);

    if param_is_ref && !param_is_const && !is_modifiable_lvalue(system, arg) {
        return false;
    }
    if matches!(system.types.get(unwrap_prefixes(&system.types, param_type)).kind, TypeKind::Channel)
        && matches!(system.types.get(unwrap_prefixes(&system.types, arg_type)).kind, TypeKind::Channel)
    {
        return channel_capability(&system.types, arg_type) >= channel_capability(&system.types, param_type);
    }
    if param_is_ref && is_lvalue(system, arg) {
        return are_equivalent(&system.types, &system.exprs, param_type, arg_type);
    }
    are_assignment_compatible(&system.types, &system.exprs, param_type, arg_type, false)
}

/// An identifier is an lvalue iff its declared type is not `const`. Dot and
/// array-index preserve the lvalue-ness of their base. Assignment-like
/// expressions are themselves lvalues (they denote the assigned storage,
/// enabling chained assignment `a = b = c`). An inline-if is an lvalue iff
/// both branches are, with equivalent types.
#[must_use]
pub fn is_lvalue(system: &System, expr: ExprId) -> bool {
    let node = system.exprs.get(expr);
    match node.kind {
        ExprKind::Identifier => {
            if let Some(sym) = node.symbol {
                !ta_model::types::has_prefix(&system.types, system.symbols.get(sym).ty, TypeKind::Const)
            } else {
                false
            }
        }
        ExprKind::Dot | ExprKind::ArrayIndex => is_lvalue(system, node.children[0]),
        ExprKind::Assign
        | ExprKind::PlusAssign
        | ExprKind::MinusAssign
        | ExprKind::MulAssign
        | ExprKind::DivAssign
        | ExprKind::ModAssign
        | ExprKind::AndAssign
        | ExprKind::OrAssign
        | ExprKind::XorAssign
        | ExprKind::ShlAssign
        | ExprKind::ShrAssign => true,
        ExprKind::InlineIf => {
            let (a, b) = (node.children[1], node.children[2]);
            is_lvalue(system, a) && is_lvalue(system, b) && are_equivalent(&system.types, &system.exprs, system.exprs.get(a).get_type(), system.exprs.get(b).get_type())
        }
        _ => false,
    }
}

/// A modifiable lvalue additionally requires the type not be `const`
/// anywhere along a dot/array-index path (checked transitively through
/// `is_lvalue`'s const check at the identifier root) -- and, unlike
/// `is_lvalue`, assignment expressions and the post/pre increment results
/// are not modifiable (they're rvalues of the assigned value).
#[must_use]
pub fn is_modifiable_lvalue(system: &System, expr: ExprId) -> bool {
    let node = system.exprs.get(expr);
    match node.kind {
        ExprKind::Identifier => {
            if let Some(sym) = node.symbol {
                !ta_model::types::has_prefix(&system.types, system.symbols.get(sym).ty, TypeKind::Const)
            } else {
                false
            }
        }
        ExprKind::Dot | ExprKind::ArrayIndex => is_modifiable_lvalue(system, node.children[0]),
        ExprKind::InlineIf => {
            let (a, b) = (node.children[1], node.children[2]);
            is_modifiable_lvalue(system, a)
                && is_modifiable_lvalue(system, b)
                && are_equivalent(&system.types, &system.exprs, system.exprs.get(a).get_type(), system.exprs.get(b).get_type())
        }
        _ => false,
    }
}

/// A unique reference is an lvalue whose identity is fixed at compile
/// time: every array index along the access path must itself be
/// compile-time computable.
#[must_use]
pub fn is_unique_reference(system: &System, expr: ExprId) -> bool {
    if !is_lvalue(system, expr) {
        return false;
    }
    let node = system.exprs.get(expr);
    match node.kind {
        ExprKind::Identifier => true,
        ExprKind::Dot => is_unique_reference(system, node.children[0]),
        ExprKind::ArrayIndex => {
            is_unique_reference(system, node.children[0]) && is_compile_time_computable(system, node.children[1])
        }
        _ => false,
    }
}
