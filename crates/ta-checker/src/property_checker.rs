//! `PropertyChecker` (§4.9): validates a top-level query expression once
//! `ExpressionChecker` has already type-annotated it. Adds the checks that
//! only make sense at the property level: formula shape, path-quantifier
//! nesting, `PO_CONTROL`'s observation constraints, MITL placement inside
//! quantified sub-formulas, and the fixed operand shape of statistical
//! (SMC) queries.

use ta_common::diagnostics::messages;
use ta_common::Position;
use ta_model::{ExprId, ExprKind, Value};

use crate::compile_time::is_compile_time_computable;
use crate::context::Checker;
use crate::type_predicates::{
    is_clock, is_constraint, is_double_value, is_formula, is_game_property, is_integral,
    is_tio_graph,
};

impl<'a> Checker<'a> {
    pub fn check_properties(&mut self) -> bool {
        let mut ok = true;
        for i in 0..self.sys.queries.len() {
            ok &= self.check_property(i);
        }
        ok
    }

    fn check_property(&mut self, idx: usize) -> bool {
        let (expr, pos) = {
            let q = &self.sys.queries[idx];
            (q.expression, q.position)
        };
        if !self.check_expression(expr) {
            return false;
        }
        if !self.require_side_effect_free(expr, "Property") {
            return false;
        }

        let mut ok = self.check_property_shape(expr, pos);
        ok &= self.check_mitl_placement(expr, pos);
        ok &= self.check_statistical_queries(expr, pos);
        ok
    }

    /// Top-level shape: must be a formula (or a `tio-consistency` over a
    /// tio-graph). Game properties are exempt from the path-quantifier
    /// nesting rule; `PO_CONTROL` additionally runs the observation-
    /// constraint pass regardless of being a game property.
    fn check_property_shape(&mut self, expr: ExprId, pos: Position) -> bool {
        let node_kind = self.sys.exprs.get(expr).kind;
        let ty = self.sys.exprs.get(expr).get_type();

        let consistency_of_tio_graph = node_kind == ExprKind::TioConsistency
            && self
                .sys
                .exprs
                .get(expr)
                .children
                .iter()
                .any(|&c| is_tio_graph(&self.sys.types, self.sys.exprs.get(c).get_type()));

        if !is_formula(&self.sys.types, ty) && !consistency_of_tio_graph {
            self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
            return false;
        }

        let mut ok = true;
        if node_kind == ExprKind::PoControl {
            ok &= self.check_observation_constraints(expr, pos);
        }

        if is_game_property(self.sys.exprs.get(expr)) {
            return ok;
        }

        let children = self.sys.exprs.get(expr).children.clone();
        for &c in &children {
            let cty = self.sys.exprs.get(c).get_type();
            if is_formula(&self.sys.types, cty) {
                self.error(pos, messages::NESTING_OF_PATH_QUANTIFIERS_IS_NOT_ALLOWED);
                ok = false;
            }
        }
        ok
    }

    fn check_observation_constraints(&mut self, expr: ExprId, pos: Position) -> bool {
        let children = self.sys.exprs.get(expr).children.clone();
        children.iter().fold(true, |ok, &c| self.scan_observation_constraints(c, pos) && ok)
    }

    /// `PO_CONTROL`'s observation discipline: a clock compared against a
    /// bound may only act as a *weak* lower bound (`<=`, or `>` with the
    /// clock on the left) or a *strict* upper bound (`<` with the clock on
    /// the left, or `>=` with the clock on the right); clock-vs-clock
    /// comparisons are rejected outright.
    fn scan_observation_constraints(&mut self, expr: ExprId, outer_pos: Position) -> bool {
        let node_kind = self.sys.exprs.get(expr).kind;
        let children = self.sys.exprs.get(expr).children.clone();
        let mut ok = true;

        if matches!(node_kind, ExprKind::Lt | ExprKind::Le | ExprKind::Gt | ExprKind::Ge) && children.len() == 2 {
            let (lhs, rhs) = (children[0], children[1]);
            let (lt, rt) = (self.sys.exprs.get(lhs).get_type(), self.sys.exprs.get(rhs).get_type());
            let lhs_clock = is_clock(&self.sys.types, lt);
            let rhs_clock = is_clock(&self.sys.types, rt);

            if lhs_clock && rhs_clock {
                self.error(outer_pos, messages::CLOCK_DIFFERENCES_ARE_NOT_SUPPORTED);
                ok = false;
            } else if lhs_clock || rhs_clock {
                let is_lower = (lhs_clock && matches!(node_kind, ExprKind::Gt | ExprKind::Ge))
                    || (rhs_clock && matches!(node_kind, ExprKind::Lt | ExprKind::Le));
                let is_strict = matches!(node_kind, ExprKind::Lt | ExprKind::Gt);
                if (is_lower && is_strict) || (!is_lower && !is_strict) {
                    self.error(outer_pos, messages::CLOCK_LOWER_BOUND_MUST_BE_WEAK_AND_UPPER_BOUND_STRICT);
                    ok = false;
                }
            }
        }

        for &c in &children {
            ok &= self.scan_observation_constraints(c, outer_pos);
        }
        ok
    }

    /// Walks every plain (non-MITL) CTL path quantifier (`af`/`ag`/`ef`/`eg`)
    /// in the property and rejects an MITL operator (`leadsto`, `scenario`,
    /// the `a-until` family, `a-buchi`) occurring underneath it -- those
    /// timed modalities carry their own bounded-path semantics and aren't
    /// meaningful nested inside an untimed path quantifier.
    fn check_mitl_placement(&mut self, expr: ExprId, pos: Position) -> bool {
        let mut ok = true;
        self.walk_for_quantifiers(expr, pos, &mut ok);
        ok
    }

    fn walk_for_quantifiers(&mut self, expr: ExprId, pos: Position, ok: &mut bool) {
        let node_kind = self.sys.exprs.get(expr).kind;
        let children = self.sys.exprs.get(expr).children.clone();

        if matches!(node_kind, ExprKind::Af | ExprKind::Ag | ExprKind::Ef | ExprKind::Eg)
            && children.iter().any(|&c| self.contains_mitl_operator(c))
        {
            self.error(pos, messages::MITL_NOT_ALLOWED_HERE);
            *ok = false;
        }

        for &c in &children {
            self.walk_for_quantifiers(c, pos, ok);
        }
    }

    fn contains_mitl_operator(&self, expr: ExprId) -> bool {
        let node = self.sys.exprs.get(expr);
        if matches!(
            node.kind,
            ExprKind::Leadsto | ExprKind::Scenario | ExprKind::AUntil | ExprKind::AWeakUntil | ExprKind::ABuchi
        ) {
            return true;
        }
        node.children.iter().any(|&c| self.contains_mitl_operator(c))
    }

    /// Finds every statistical-query node in the property (wherever it
    /// occurs, not just at the root) and checks its fixed operand shape:
    /// `[runs, bound, predicate, probability-bound?, until?]` for the
    /// boolean-predicate queries, or `[runs, bound, aggregation_op, expr]`
    /// (doubled for `PROBACMP`) for `PROBAEXP`/`PROBACMP`.
    fn check_statistical_queries(&mut self, expr: ExprId, pos: Position) -> bool {
        let mut ok = true;
        let mut found_any = false;
        self.walk_statistical(expr, &mut ok, &mut found_any);
        if found_any && self.options.smc_determinism_warning {
            self.warning(pos, messages::SMC_REQUIRES_DETERMINISTIC_INPUT_EDGES);
        }
        ok
    }

    fn walk_statistical(&mut self, expr: ExprId, ok: &mut bool, found_any: &mut bool) {
        let node_kind = self.sys.exprs.get(expr).kind;
        if matches!(
            node_kind,
            ExprKind::SmcControl
                | ExprKind::Probabox
                | ExprKind::Probadiamond
                | ExprKind::Probaminbox
                | ExprKind::Probamindiamond
                | ExprKind::Probacmp
                | ExprKind::Probaexp
                | ExprKind::Simulate
                | ExprKind::SimulateReach
        ) {
            *found_any = true;
            let shape_ok = if matches!(node_kind, ExprKind::Probaexp | ExprKind::Probacmp) {
                self.check_estimation_shape(expr, node_kind)
            } else {
                self.check_statistical_shape(expr, node_kind)
            };
            if !shape_ok {
                *ok = false;
            }
        }

        let children = self.sys.exprs.get(expr).children.clone();
        for c in children {
            self.walk_statistical(c, ok, found_any);
        }
    }

    /// Validates the leading `runs, bound` pair shared by every
    /// statistical query shape, whatever comes after it.
    fn check_runs_and_bound(&mut self, pos: Position, runs: ExprId, bound: ExprId) -> bool {
        let mut ok = true;

        if !self.require_side_effect_free(runs, "Property") {
            ok = false;
        }
        let runs_ty = self.sys.exprs.get(runs).get_type();
        if !is_integral(&self.sys.types, runs_ty) || !is_compile_time_computable(self.sys, runs) {
            self.error(pos, messages::INVALID_RUN_COUNT);
            ok = false;
        } else if let Some(Value::Int(n)) = self.sys.exprs.get(runs).value {
            if n <= 0 {
                self.error(pos, messages::INVALID_RUN_COUNT);
                ok = false;
            }
        }

        let bound_ty = self.sys.exprs.get(bound).get_type();
        if !is_integral(&self.sys.types, bound_ty) && !is_clock(&self.sys.types, bound_ty) {
            self.error(pos, messages::INVALID_RUN_COUNT);
            ok = false;
        }

        ok
    }

    /// `PROBAEXP`/`PROBACMP` estimate (or compare) the min/max of a numeric
    /// expression over `runs` simulations up to `bound`, not a boolean
    /// predicate -- they carry an aggregation-direction operand (0 = min,
    /// 1 = max) in place of the other statistical queries' predicate.
    /// `PROBACMP` compares two such estimations, so its children are the
    /// two `[runs, bound, aggregation_op, expr]` groups back to back.
    fn check_estimation_shape(&mut self, expr: ExprId, kind: ExprKind) -> bool {
        let pos = self.sys.exprs.get(expr).position;
        let children = self.sys.exprs.get(expr).children.clone();
        let expected = if kind == ExprKind::Probacmp { 8 } else { 4 };
        if children.len() != expected {
            self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
            return false;
        }

        let mut ok = true;
        for group in children.chunks(4) {
            let (runs, bound, aggregation_op, value_expr) = (group[0], group[1], group[2], group[3]);
            ok &= self.check_runs_and_bound(pos, runs, bound);

            if !is_compile_time_computable(self.sys, aggregation_op) {
                self.error(pos, messages::TYPE_ERROR);
                ok = false;
            } else {
                match self.sys.exprs.get(aggregation_op).value {
                    Some(Value::Int(0 | 1)) => {}
                    _ => {
                        self.error(pos, messages::TYPE_ERROR);
                        ok = false;
                    }
                }
            }

            if !self.require_side_effect_free(value_expr, "Property") {
                ok = false;
            }
            let value_ty = self.sys.exprs.get(value_expr).get_type();
            if !is_integral(&self.sys.types, value_ty) && !is_double_value(&self.sys.types, value_ty) {
                self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
                ok = false;
            }
        }
        ok
    }

    fn check_statistical_shape(&mut self, expr: ExprId, kind: ExprKind) -> bool {
        let pos = self.sys.exprs.get(expr).position;
        let children = self.sys.exprs.get(expr).children.clone();
        if children.len() < 3 {
            self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
            return false;
        }
        let (runs, bound, predicate) = (children[0], children[1], children[2]);
        let mut ok = self.check_runs_and_bound(pos, runs, bound);

        if !self.require_side_effect_free(predicate, "Property") {
            ok = false;
        }
        let pred_ty = self.sys.exprs.get(predicate).get_type();
        if !is_integral(&self.sys.types, pred_ty) && !is_constraint(&self.sys.types, pred_ty) {
            self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
            ok = false;
        }

        if let Some(&prob_bound) = children.get(3) {
            let prob_ty = self.sys.exprs.get(prob_bound).get_type();
            if !is_compile_time_computable(self.sys, prob_bound) || !is_double_value(&self.sys.types, prob_ty) {
                self.error(pos, messages::TYPE_ERROR);
                ok = false;
            }
        }

        if let Some(&until) = children.get(4) {
            if !self.require_side_effect_free(until, "Property") {
                ok = false;
            }
            let until_ty = self.sys.exprs.get(until).get_type();
            if !is_integral(&self.sys.types, until_ty) && !is_constraint(&self.sys.types, until_ty) {
                self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
                ok = false;
            }
            if kind == ExprKind::Probabox && !matches!(self.sys.exprs.get(until).value, Some(Value::Bool(false))) {
                self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
                ok = false;
            }
        }

        ok
    }
}
