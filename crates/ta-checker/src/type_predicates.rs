//! Pure predicates over an expression's attached type (§4.1).
//!
//! Semantic families are disjoint *except*: clock is a number; integer is
//! integral; bool is integral; cost is assignable; diff is neither clock
//! nor integer but participates in bound comparisons.

use ta_model::types::{TypeArena, TypeId, TypeKind, has_prefix, unwrap_all, unwrap_prefixes};
use ta_model::{Expr, ExprArena, ExprId, ExprKind};

#[must_use]
pub fn is_clock(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Clock)
}

#[must_use]
pub fn is_cost(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Cost)
}

#[must_use]
pub fn is_diff(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Diff)
}

#[must_use]
pub fn is_integral(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Int | TypeKind::Bool)
}

#[must_use]
pub fn is_bool(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Bool)
}

#[must_use]
pub fn is_double_value(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Double)
}

/// "Numeric" spans int, double, clock and cost -- everything the `+`/`-`
/// row of the operator table accepts on at least one side.
#[must_use]
pub fn is_number(arena: &TypeArena, ty: TypeId) -> bool {
    let base = unwrap_prefixes(arena, ty);
    matches!(arena.get(base).kind, TypeKind::Int | TypeKind::Double | TypeKind::Clock | TypeKind::Cost)
}

#[must_use]
pub fn is_channel(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Channel)
}

#[must_use]
pub fn is_scalar(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Scalar)
}

#[must_use]
pub fn is_record(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Record)
}

#[must_use]
pub fn is_array(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Array)
}

#[must_use]
pub fn is_void(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Void)
}

#[must_use]
pub fn is_process(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Process | TypeKind::ProcessVar)
}

#[must_use]
pub fn is_process_var(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::ProcessVar)
}

#[must_use]
pub fn is_tio_graph(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::TioGraph)
}

#[must_use]
pub fn is_guard(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Guard)
}

#[must_use]
pub fn is_invariant(arena: &TypeArena, ty: TypeId) -> bool {
    let base = unwrap_prefixes(arena, ty);
    matches!(arena.get(base).kind, TypeKind::Invariant) || is_bool(arena, ty) || is_integral(arena, ty)
}

#[must_use]
pub fn is_invariant_with_rate(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::InvariantWithRate)
}

#[must_use]
pub fn is_constraint(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Constraint)
}

#[must_use]
pub fn is_formula(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Formula)
}

#[must_use]
pub fn is_probability(arena: &TypeArena, ty: TypeId) -> bool {
    matches!(arena.get(unwrap_prefixes(arena, ty)).kind, TypeKind::Probability)
}

#[must_use]
pub fn is_list_of_formulas(arena: &TypeArena, ty: TypeId) -> bool {
    let base = unwrap_prefixes(arena, ty);
    let t = arena.get(base);
    t.kind == TypeKind::List && t.subs.iter().all(|&s| is_formula(arena, s))
}

/// A "game" property -- see §4.9 -- is a formula built from a game-shaped
/// constructor (controller synthesis, simulation/refinement, consistency).
#[must_use]
pub fn is_game_property(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Control
            | ExprKind::ControlTopt
            | ExprKind::PoControl
            | ExprKind::TioRefinement
            | ExprKind::TioConsistency
            | ExprKind::TioSpecification
            | ExprKind::TioImplementation
    )
}

#[must_use]
pub fn is_assignable(arena: &TypeArena, ty: TypeId) -> bool {
    let base = unwrap_prefixes(arena, ty);
    matches!(
        arena.get(base).kind,
        TypeKind::Int | TypeKind::Bool | TypeKind::Double | TypeKind::Clock | TypeKind::Cost | TypeKind::Scalar | TypeKind::Record | TypeKind::Array
    )
}

/// A "valid return type": records, integral types, scalars or doubles --
/// never clocks, channels or processes.
#[must_use]
pub fn valid_return_type(arena: &TypeArena, ty: TypeId) -> bool {
    let base = unwrap_prefixes(arena, ty);
    matches!(arena.get(base).kind, TypeKind::Void | TypeKind::Int | TypeKind::Bool | TypeKind::Double | TypeKind::Scalar | TypeKind::Record)
}

#[must_use]
pub fn is_same_scalar_type(arena: &TypeArena, a: TypeId, b: TypeId) -> bool {
    let (ra, rb) = (unwrap_prefixes(arena, a), unwrap_prefixes(arena, b));
    let (ta, tb) = (arena.get(ra), arena.get(rb));
    ta.kind == TypeKind::Scalar && tb.kind == TypeKind::Scalar && ta.labels == tb.labels
}

#[must_use]
pub fn is_urgent(arena: &TypeArena, ty: TypeId) -> bool {
    has_prefix(arena, ty, TypeKind::Urgent)
}

#[must_use]
pub fn is_broadcast(arena: &TypeArena, ty: TypeId) -> bool {
    has_prefix(arena, ty, TypeKind::Broadcast)
}

#[must_use]
pub fn is_const(arena: &TypeArena, ty: TypeId) -> bool {
    has_prefix(arena, ty, TypeKind::Const)
}

#[must_use]
pub fn is_ref(arena: &TypeArena, ty: TypeId) -> bool {
    has_prefix(arena, ty, TypeKind::Ref)
}

/// `has-strict-lower-bound` / `has-strict-upper-bound`: recursively scan an
/// expression tree and return true iff any `<`/`>` comparison pairs an
/// integer with a clock (or vice versa) in the strict direction.
///
/// `x < 5` (clock lhs, strict, int rhs) is an upper bound on `x`;
/// `5 < x` (int lhs, strict, clock rhs) is a lower bound on `x`.
#[must_use]
pub fn has_strict_lower_bound(arena: &TypeArena, exprs: &ExprArena, expr: ExprId) -> bool {
    scan_strict_bound(arena, exprs, expr, true)
}

#[must_use]
pub fn has_strict_upper_bound(arena: &TypeArena, exprs: &ExprArena, expr: ExprId) -> bool {
    scan_strict_bound(arena, exprs, expr, false)
}

fn scan_strict_bound(arena: &TypeArena, exprs: &ExprArena, expr: ExprId, lower: bool) -> bool {
    let node = exprs.get(expr);
    let is_strict_cmp = matches!(node.kind, ExprKind::Lt | ExprKind::Gt);
    if is_strict_cmp && node.children.len() == 2 {
        let lhs_ty = exprs.get(node.children[0]).get_type();
        let rhs_ty = exprs.get(node.children[1]).get_type();
        let lhs_clock = is_clock(arena, lhs_ty);
        let rhs_clock = is_clock(arena, rhs_ty);
        let lhs_int = is_integral(arena, lhs_ty) || is_diff(arena, lhs_ty);
        let rhs_int = is_integral(arena, rhs_ty) || is_diff(arena, rhs_ty);
        if lhs_clock && rhs_int {
            // `x < c`: upper bound when `<`, lower bound when `>`.
            let is_upper = node.kind == ExprKind::Lt;
            if is_upper && !lower {
                return true;
            }
            if !is_upper && lower {
                return true;
            }
        }
        if lhs_int && rhs_clock {
            // `c < x`: lower bound when `<`, upper bound when `>`.
            let is_lower = node.kind == ExprKind::Lt;
            if is_lower && lower {
                return true;
            }
            if !is_lower && !lower {
                return true;
            }
        }
    }
    node.children.iter().any(|&c| scan_strict_bound(arena, exprs, c, lower))
}

/// Peels every prefix and semantic-category wrapper; exposed for callers
/// that need the raw primitive shape underneath (used heavily by the
/// operator algebra).
#[must_use]
pub fn base_kind(arena: &TypeArena, ty: TypeId) -> TypeKind {
    arena.get(unwrap_all(arena, ty)).kind
}
