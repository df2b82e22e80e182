//! `RateDecomposer` (§4.4): splits an `invariant-with-rate` expression into
//! a residual invariant plus the extracted cost rate.

use ta_common::diagnostics::messages;
use ta_model::{Expr, ExprId, ExprKind, StateId};

use crate::context::Checker;
use crate::type_predicates::{has_strict_upper_bound, is_clock, is_cost};

/// Parts accumulated while walking an `invariant-with-rate` tree.
#[derive(Default)]
struct Decomposition {
    /// Conjuncts that belong in the residual invariant, in visitation order.
    residual: Vec<ExprId>,
    cost_rate: Option<ExprId>,
    cost_rate_count: u32,
    saw_clock_rate: bool,
    saw_strict: bool,
}

impl<'a> Checker<'a> {
    /// Decomposes `state`'s invariant (which must already be type-checked
    /// as `invariant-with-rate`) in place: `state.invariant` becomes the
    /// residual, `state.cost_rate` the extracted rate.
    pub fn decompose_state_invariant(&mut self, state: StateId) {
        let Some(invariant) = self.sys.states[state.0 as usize].invariant else { return };

        let mut d = Decomposition::default();
        self.decompose(invariant, false, &mut d);

        if d.cost_rate_count > 1 {
            let position = self.sys.exprs.get(invariant).position;
            self.error(position, messages::ONLY_ONE_COST_RATE_IS_ALLOWED);
        }
        if d.saw_clock_rate {
            self.sys.record_stop_watch();
        }
        if d.saw_strict {
            self.sys.record_strict_invariant(state);
            let position = self.sys.exprs.get(invariant).position;
            self.warning(position, messages::STRICT_INVARIANT);
        }

        let residual = conjoin(&mut self.sys.exprs, d.residual);
        let st = &mut self.sys.states[state.0 as usize];
        st.invariant = residual;
        st.cost_rate = d.cost_rate;
    }

    fn decompose(&mut self, expr: ExprId, in_forall: bool, d: &mut Decomposition) {
        let node_kind = self.sys.exprs.get(expr).kind;
        let children: Vec<ExprId> = self.sys.exprs.get(expr).children.clone();

        match node_kind {
            ExprKind::And => {
                for child in children {
                    self.decompose(child, in_forall, d);
                }
            }
            ExprKind::Forall => {
                // Recurse into the body to detect clock rates, but keep the
                // whole quantifier intact in the residual.
                let body = children[0];
                self.decompose(body, true, d);
                d.residual.push(expr);
            }
            ExprKind::Eq => {
                if let Some((var, rhs)) = rate_equation(&self.sys.exprs, expr) {
                    if is_cost(&self.sys.types, self.sys.exprs.get(var).get_type()) {
                        d.cost_rate = Some(rhs);
                        d.cost_rate_count += 1;
                    } else if is_clock(&self.sys.types, self.sys.exprs.get(var).get_type()) {
                        d.saw_clock_rate = true;
                        if !in_forall {
                            d.residual.push(expr);
                        }
                    } else if !in_forall {
                        d.residual.push(expr);
                    }
                } else if !in_forall {
                    d.residual.push(expr);
                }
            }
            _ => {
                if !in_forall {
                    if has_strict_upper_bound(&self.sys.types, &self.sys.exprs, expr) {
                        d.saw_strict = true;
                    }
                    d.residual.push(expr);
                }
            }
        }
    }
}

/// Recognises `EQ(rate(x), rhs)` or `EQ(rhs, rate(x))`, returning `(x, rhs)`.
fn rate_equation(exprs: &ta_model::ExprArena, expr: ExprId) -> Option<(ExprId, ExprId)> {
    let node = exprs.get(expr);
    if node.kind != ExprKind::Eq || node.children.len() != 2 {
        return None;
    }
    let (lhs, rhs) = (node.children[0], node.children[1]);
    if exprs.get(lhs).kind == ExprKind::Rate {
        let var = exprs.get(lhs).children[0];
        return Some((var, rhs));
    }
    if exprs.get(rhs).kind == ExprKind::Rate {
        let var = exprs.get(rhs).children[0];
        return Some((var, lhs));
    }
    None
}

/// Builds a right-leaning `AND` chain over `parts`, or `None` if empty
/// (an invariant that decomposed to nothing, e.g. `forall` bodies that
/// were entirely clock-rate equations).
fn conjoin(exprs: &mut ta_model::ExprArena, mut parts: Vec<ExprId>) -> Option<ExprId> {
    let last = parts.pop()?;
    let mut acc = last;
    while let Some(part) = parts.pop() {
        let position = exprs.get(part).position;
        acc = exprs.alloc(Expr::new(ExprKind::And, vec![part, acc], position));
    }
    Some(acc)
}
