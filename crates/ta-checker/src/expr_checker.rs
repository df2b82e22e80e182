//! `ExpressionChecker` -- the central `checkExpression` routine (§4.5).
//!
//! Checks children first (post-order), short-circuits on a failed child,
//! then dispatches on `e.kind` against the operator algebra. Every
//! reachable arm either attaches a type or reports a diagnostic and leaves
//! the type `UNKNOWN`.

use ta_common::diagnostics::messages;
use ta_model::types::{TypeKind, unwrap_prefixes};
use ta_model::{ExprId, ExprKind, MathFunction, TypeId, UserData};

use crate::compatibility::{
    are_assignment_compatible, are_eq_compatible, are_equivalent, is_modifiable_lvalue,
    is_parameter_compatible,
};
use crate::context::Checker;
use crate::type_predicates::{
    is_array, is_bool, is_clock, is_constraint, is_cost, is_diff, is_formula, is_guard,
    is_integral, is_invariant, is_invariant_with_rate, is_number, is_process, is_tio_graph, is_void,
};

impl<'a> Checker<'a> {
    /// Type-checks `expr` and every descendant, attaching types as it goes.
    /// Returns `false` (and marks the node failed) on any error in `expr`
    /// itself or a descendant.
    pub fn check_expression(&mut self, expr: ExprId) -> bool {
        let children = self.sys.exprs.get(expr).children.clone();
        let mut all_children_ok = true;
        for child in &children {
            if !self.check_expression(*child) {
                all_children_ok = false;
            }
        }
        if !all_children_ok {
            self.sys.exprs.get(expr).mark_failed();
            return false;
        }

        match self.dispatch(expr, &children) {
            Some(ty) => {
                self.sys.exprs.get(expr).set_type(ty);
                true
            }
            None => {
                self.sys.exprs.get(expr).mark_failed();
                false
            }
        }
    }

    fn ty_of(&self, id: ExprId) -> TypeId {
        self.sys.exprs.get(id).get_type()
    }

    fn position(&self, id: ExprId) -> ta_common::Position {
        self.sys.exprs.get(id).position
    }

    #[allow(clippy::too_many_lines)]
    fn dispatch(&mut self, expr: ExprId, children: &[ExprId]) -> Option<TypeId> {
        let kind = self.sys.exprs.get(expr).kind;
        let pos = self.position(expr);

        match kind {
            ExprKind::IntLiteral | ExprKind::DoubleLiteral | ExprKind::BoolLiteral => {
                Some(self.ty_of(expr))
            }

            ExprKind::Identifier => {
                let sym = self.sys.exprs.get(expr).symbol?;
                Some(self.sys.symbols.get(sym).ty)
            }

            ExprKind::Add => self.check_additive(pos, children[0], children[1], true),
            ExprKind::Sub => self.check_additive(pos, children[0], children[1], false),
            ExprKind::Mul | ExprKind::Div | ExprKind::Min | ExprKind::Max => {
                self.check_int_or_number(pos, children[0], children[1])
            }
            ExprKind::Mod | ExprKind::BitAnd | ExprKind::BitOr | ExprKind::BitXor | ExprKind::Shl | ExprKind::Shr => {
                self.check_both_integral(pos, children[0], children[1], TypeId::INT)
            }

            ExprKind::And => self.check_and(pos, children[0], children[1]),
            ExprKind::Or => self.check_or(pos, children[0], children[1]),
            ExprKind::Not => self.check_not(pos, children[0]),

            ExprKind::Lt | ExprKind::Le | ExprKind::Gt | ExprKind::Ge => {
                self.check_comparison(pos, children[0], children[1])
            }
            ExprKind::Eq | ExprKind::Ne => self.check_eq(pos, kind, children[0], children[1]),

            ExprKind::Neg | ExprKind::UnaryPlus => self.check_unary_minus(pos, children[0]),

            ExprKind::Rate => self.check_rate(pos, children[0]),
            ExprKind::Fraction => self.check_both_integral(pos, children[0], children[1], TypeId::FRACTION),

            ExprKind::Assign => self.check_assign(pos, children[0], children[1]),
            ExprKind::PlusAssign => self.check_plus_assign(pos, children[0], children[1]),
            ExprKind::MinusAssign
            | ExprKind::MulAssign
            | ExprKind::DivAssign
            | ExprKind::ModAssign
            | ExprKind::AndAssign
            | ExprKind::OrAssign
            | ExprKind::XorAssign
            | ExprKind::ShlAssign
            | ExprKind::ShrAssign => self.check_compound_int_assign(pos, children[0], children[1]),

            ExprKind::PreIncrement | ExprKind::PreDecrement | ExprKind::PostIncrement | ExprKind::PostDecrement => {
                self.check_incr_decr(pos, children[0])
            }

            ExprKind::InlineIf => self.check_inline_if(pos, children[0], children[1], children[2]),
            ExprKind::Comma => self.check_comma(pos, children[0], children[1]),

            ExprKind::Call => self.check_call(expr, pos),
            ExprKind::ArrayIndex => self.check_array_index(pos, children[0], children[1]),
            ExprKind::Dot => self.check_dot(pos, expr, children[0]),

            ExprKind::MathCall(f) => self.check_math_call(pos, f, children),

            ExprKind::Forall => self.check_forall(pos, expr, children[0]),
            ExprKind::Exists => self.check_exists(pos, children[0]),
            ExprKind::Sum => self.check_sum(pos, children[0]),

            ExprKind::Spawn => self.check_spawn(expr, pos, children),
            ExprKind::Numof => self.check_numof(expr, pos),
            ExprKind::Exit => self.check_exit(pos),
            ExprKind::Deadlock => Some(TypeId::BOOL),

            ExprKind::Af
            | ExprKind::Ag
            | ExprKind::Ef
            | ExprKind::Eg
            | ExprKind::Leadsto
            | ExprKind::Scenario
            | ExprKind::AUntil
            | ExprKind::AWeakUntil
            | ExprKind::ABuchi
            | ExprKind::Pmax => self.check_formula_combinator(pos, children),

            ExprKind::Control | ExprKind::ControlTopt | ExprKind::PoControl => {
                self.check_formula_combinator(pos, children)
            }

            ExprKind::SupVar | ExprKind::InfVar => self.check_both_integral_or_constraint(pos, children),

            ExprKind::SmcControl
            | ExprKind::Probabox
            | ExprKind::Probadiamond
            | ExprKind::Probaminbox
            | ExprKind::Probamindiamond
            | ExprKind::Probacmp
            | ExprKind::Probaexp
            | ExprKind::Simulate
            | ExprKind::SimulateReach => {
                // Detailed operand-shape checks live in PropertyChecker
                // (§4.9); here we just attach the result type once children
                // have already been validated there.
                Some(TypeId::FORMULA)
            }

            ExprKind::TioComposition
            | ExprKind::TioConjunction
            | ExprKind::TioQuotient => self.check_tio_composition(pos, children),
            ExprKind::TioRefinement
            | ExprKind::TioConsistency
            | ExprKind::TioSpecification
            | ExprKind::TioImplementation => self.check_tio_relation(pos, children),

            // Initialiser-literal nodes never reach the operator algebra:
            // `InitialiserChecker` walks them directly against the declared
            // type, checking each leaf expression itself. Reaching here
            // means one slipped into an ordinary expression position.
            ExprKind::ArrayLiteral | ExprKind::RecordLiteral | ExprKind::FieldInit => {
                self.error(pos, messages::TYPE_ERROR);
                None
            }
        }
    }

    fn check_additive(&mut self, pos: ta_common::Position, l: ExprId, r: ExprId, commutative_number: bool) -> Option<TypeId> {
        let (lt, rt) = (self.ty_of(l), self.ty_of(r));
        if is_integral(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            return Some(TypeId::INT);
        }
        if is_integral(&self.sys.types, lt) && is_clock(&self.sys.types, rt) && commutative_number {
            return Some(TypeId::CLOCK);
        }
        if is_clock(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            return Some(TypeId::CLOCK);
        }
        if !commutative_number && is_clock(&self.sys.types, lt) && is_clock(&self.sys.types, rt) {
            return Some(TypeId::DIFF);
        }
        if is_integral(&self.sys.types, lt) && is_diff(&self.sys.types, rt) {
            return Some(TypeId::DIFF);
        }
        if commutative_number && is_diff(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            return Some(TypeId::DIFF);
        }
        if is_number(&self.sys.types, lt) && is_number(&self.sys.types, rt) {
            return Some(TypeId::DOUBLE);
        }
        self.error(pos, messages::NUMBER_EXPECTED);
        None
    }

    fn check_int_or_number(&mut self, pos: ta_common::Position, l: ExprId, r: ExprId) -> Option<TypeId> {
        let (lt, rt) = (self.ty_of(l), self.ty_of(r));
        if is_integral(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            return Some(TypeId::INT);
        }
        if is_number(&self.sys.types, lt) && is_number(&self.sys.types, rt) {
            return Some(TypeId::DOUBLE);
        }
        self.error(pos, messages::NUMBER_EXPECTED);
        None
    }

    fn check_both_integral(&mut self, pos: ta_common::Position, l: ExprId, r: ExprId, result: TypeId) -> Option<TypeId> {
        let (lt, rt) = (self.ty_of(l), self.ty_of(r));
        if is_integral(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            Some(result)
        } else {
            self.error(pos, messages::INTEGER_EXPECTED);
            None
        }
    }

    fn check_and(&mut self, pos: ta_common::Position, l: ExprId, r: ExprId) -> Option<TypeId> {
        let (lt, rt) = (self.ty_of(l), self.ty_of(r));
        if is_integral(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            return Some(TypeId::BOOL);
        }
        for &(kind_pred, wrap) in CATEGORY_ROWS {
            if kind_pred(&self.sys.types, lt) && kind_pred(&self.sys.types, rt) {
                return Some(wrap(self, lt));
            }
        }
        self.error(pos, messages::INCOMPATIBLE_TYPE);
        None
    }

    fn check_or(&mut self, pos: ta_common::Position, l: ExprId, r: ExprId) -> Option<TypeId> {
        let (lt, rt) = (self.ty_of(l), self.ty_of(r));
        if is_integral(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            return Some(TypeId::BOOL);
        }
        if is_constraint(&self.sys.types, lt) && is_constraint(&self.sys.types, rt) {
            return Some(self.wrap_category(TypeKind::Constraint, lt));
        }
        // int `or` invariant/invariant-wr/guard, either side.
        for (is_int_side, other) in [(lt, rt), (rt, lt)] {
            if is_integral(&self.sys.types, is_int_side) {
                if is_invariant_with_rate(&self.sys.types, other) {
                    return Some(self.wrap_category(TypeKind::InvariantWithRate, other));
                }
                if is_guard(&self.sys.types, other) {
                    return Some(self.wrap_category(TypeKind::Guard, other));
                }
                if is_invariant(&self.sys.types, other) {
                    return Some(self.wrap_category(TypeKind::Invariant, other));
                }
            }
        }
        self.error(pos, messages::INCOMPATIBLE_TYPE);
        None
    }

    fn wrap_category(&mut self, kind: TypeKind, base: TypeId) -> TypeId {
        self.sys.types.create_wrapper(kind, base)
    }

    fn check_not(&mut self, pos: ta_common::Position, operand: ExprId) -> Option<TypeId> {
        let t = self.ty_of(operand);
        if is_integral(&self.sys.types, t) {
            return Some(TypeId::BOOL);
        }
        if is_constraint(&self.sys.types, t) {
            return Some(self.wrap_category(TypeKind::Constraint, t));
        }
        self.error(pos, messages::BOOLEAN_EXPECTED);
        None
    }

    fn check_comparison(&mut self, pos: ta_common::Position, l: ExprId, r: ExprId) -> Option<TypeId> {
        let (lt, rt) = (self.ty_of(l), self.ty_of(r));
        if is_integral(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            return Some(TypeId::BOOL);
        }
        let clock_l = is_clock(&self.sys.types, lt);
        let clock_r = is_clock(&self.sys.types, rt);
        if clock_l && clock_r {
            return Some(self.wrap_category(TypeKind::Invariant, TypeId::BOOL));
        }
        if (clock_l && is_integral(&self.sys.types, rt)) || (is_integral(&self.sys.types, lt) && clock_r) {
            return Some(self.wrap_category(TypeKind::Guard, TypeId::BOOL));
        }
        if is_diff(&self.sys.types, lt) || is_diff(&self.sys.types, rt) {
            return Some(self.wrap_category(TypeKind::Invariant, TypeId::BOOL));
        }
        if is_number(&self.sys.types, lt) && is_number(&self.sys.types, rt) {
            return Some(TypeId::BOOL);
        }
        self.error(pos, messages::NUMBER_EXPECTED);
        None
    }

    fn check_eq(&mut self, pos: ta_common::Position, kind: ExprKind, l: ExprId, r: ExprId) -> Option<TypeId> {
        let (lt, rt) = (self.ty_of(l), self.ty_of(r));

        // `rate(x) == number`: a rate operand forces invariant-wr outright,
        // whatever the other side's type.
        if lt == TypeId::RATE || rt == TypeId::RATE {
            return Some(self.wrap_category(TypeKind::InvariantWithRate, TypeId::BOOL));
        }

        if are_eq_compatible(&self.sys.types, &self.sys.exprs, lt, rt) {
            return Some(TypeId::BOOL);
        }

        let clock_l = is_clock(&self.sys.types, lt);
        let clock_r = is_clock(&self.sys.types, rt);
        let diff_l = is_diff(&self.sys.types, lt);
        let diff_r = is_diff(&self.sys.types, rt);
        let int_l = is_integral(&self.sys.types, lt);
        let int_r = is_integral(&self.sys.types, rt);
        if (clock_l || diff_l || int_l) && (clock_r || diff_r || int_r) && (clock_l || clock_r || diff_l || diff_r) {
            let category = if kind == ExprKind::Ne { TypeKind::Constraint } else { TypeKind::Guard };
            return Some(self.wrap_category(category, TypeId::BOOL));
        }

        self.error(pos, messages::INCOMPATIBLE_TYPE);
        None
    }

    fn check_unary_minus(&mut self, pos: ta_common::Position, operand: ExprId) -> Option<TypeId> {
        let t = self.ty_of(operand);
        if is_integral(&self.sys.types, t) {
            return Some(TypeId::INT);
        }
        if is_number(&self.sys.types, t) {
            return Some(TypeId::DOUBLE);
        }
        self.error(pos, messages::NUMBER_EXPECTED);
        None
    }

    fn check_rate(&mut self, pos: ta_common::Position, operand: ExprId) -> Option<TypeId> {
        let t = self.ty_of(operand);
        if is_cost(&self.sys.types, t) || is_clock(&self.sys.types, t) {
            Some(TypeId::RATE)
        } else {
            self.error(pos, messages::CLOCK_EXPECTED);
            None
        }
    }

    fn check_assign(&mut self, pos: ta_common::Position, lhs: ExprId, rhs: ExprId) -> Option<TypeId> {
        if !is_modifiable_lvalue(self.sys, lhs) {
            self.error(pos, messages::LEFT_HAND_SIDE_VALUE_EXPECTED);
            return None;
        }
        let (lt, rt) = (self.ty_of(lhs), self.ty_of(rhs));
        if are_assignment_compatible(&self.sys.types, &self.sys.exprs, lt, rt, false) {
            Some(lt)
        } else {
            self.error(pos, messages::INVALID_ASSIGNMENT_EXPRESSION);
            None
        }
    }

    fn check_plus_assign(&mut self, pos: ta_common::Position, lhs: ExprId, rhs: ExprId) -> Option<TypeId> {
        if !is_modifiable_lvalue(self.sys, lhs) {
            self.error(pos, messages::LEFT_HAND_SIDE_VALUE_EXPECTED);
            return None;
        }
        let (lt, rt) = (self.ty_of(lhs), self.ty_of(rhs));
        let lhs_ok = is_integral(&self.sys.types, lt) || is_cost(&self.sys.types, lt);
        if lhs_ok && is_integral(&self.sys.types, rt) {
            Some(lt)
        } else {
            self.error(pos, messages::INVALID_ASSIGNMENT_EXPRESSION);
            None
        }
    }

    fn check_compound_int_assign(&mut self, pos: ta_common::Position, lhs: ExprId, rhs: ExprId) -> Option<TypeId> {
        if !is_modifiable_lvalue(self.sys, lhs) {
            self.error(pos, messages::LEFT_HAND_SIDE_VALUE_EXPECTED);
            return None;
        }
        let (lt, rt) = (self.ty_of(lhs), self.ty_of(rhs));
        if is_integral(&self.sys.types, lt) && is_integral(&self.sys.types, rt) {
            Some(lt)
        } else {
            self.error(pos, messages::INTEGER_EXPECTED);
            None
        }
    }

    fn check_incr_decr(&mut self, pos: ta_common::Position, operand: ExprId) -> Option<TypeId> {
        let t = self.ty_of(operand);
        if is_integral(&self.sys.types, t) && is_modifiable_lvalue(self.sys, operand) {
            Some(TypeId::INT)
        } else if !is_modifiable_lvalue(self.sys, operand) {
            self.error(pos, messages::LEFT_HAND_SIDE_VALUE_EXPECTED);
            None
        } else {
            self.error(pos, messages::INTEGER_EXPECTED);
            None
        }
    }

    fn check_inline_if(&mut self, pos: ta_common::Position, c: ExprId, a: ExprId, b: ExprId) -> Option<TypeId> {
        let ct = self.ty_of(c);
        if !is_integral(&self.sys.types, ct) {
            self.error(pos, messages::BOOLEAN_EXPECTED);
            return None;
        }
        let (at, bt) = (self.ty_of(a), self.ty_of(b));
        if is_integral(&self.sys.types, at) && is_integral(&self.sys.types, bt) {
            return Some(at);
        }
        if are_equivalent(&self.sys.types, &self.sys.exprs, at, bt) {
            return Some(at);
        }
        self.error(pos, messages::INCOMPATIBLE_ARGUMENTS_TO_INLINE_IF);
        None
    }

    fn check_comma(&mut self, pos: ta_common::Position, lhs: ExprId, rhs: ExprId) -> Option<TypeId> {
        let lt = self.ty_of(lhs);
        if !is_void(&self.sys.types, lt) && !self.has_side_effect(lhs) {
            self.warning(pos, messages::EXPRESSION_DOES_NOT_HAVE_ANY_EFFECT);
        }
        Some(self.ty_of(rhs))
    }

    fn check_call(&mut self, expr: ExprId, pos: ta_common::Position) -> Option<TypeId> {
        let sym = self.sys.exprs.get(expr).symbol?;
        let Some(UserData::Function(fid)) = self.sys.symbols.get(sym).user_data else {
            self.error(pos, messages::TYPE_ERROR);
            return None;
        };
        let (params_frame, return_type) = {
            let func = &self.sys.functions[fid.0 as usize];
            (func.params_frame, func.return_type)
        };
        let params = self.sys.frames.get(params_frame).symbols.clone();
        let args = self.sys.exprs.get(expr).children.clone();

        if args.len() != params.len() {
            self.error(pos, messages::INCOMPATIBLE_ARGUMENT);
            return None;
        }
        for (&param, &arg) in params.iter().zip(args.iter()) {
            let param_type = self.sys.symbols.get(param).ty;
            if !is_parameter_compatible(self.sys, param_type, arg) {
                let arg_pos = self.position(arg);
                self.error(arg_pos, messages::INCOMPATIBLE_ARGUMENT);
                return None;
            }
        }
        Some(return_type)
    }

    fn check_array_index(&mut self, pos: ta_common::Position, base: ExprId, index: ExprId) -> Option<TypeId> {
        let base_ty = self.ty_of(base);
        if !is_array(&self.sys.types, base_ty) {
            self.error(pos, messages::TYPE_ERROR);
            return None;
        }
        let base_ty = unwrap_prefixes(&self.sys.types, base_ty);
        let t = self.sys.types.get(base_ty);
        let (size_ty, elem_ty) = (t.subs[0], t.subs[1]);
        let index_ty = self.ty_of(index);

        let size_is_scalar = self.sys.types.get(size_ty).labels.first().is_some()
            && self.sys.types.get(size_ty).range.is_none();
        if size_is_scalar {
            if crate::type_predicates::is_same_scalar_type(&self.sys.types, size_ty, index_ty) {
                return Some(elem_ty);
            }
            self.error(pos, messages::INCOMPATIBLE_TYPE);
            return None;
        }
        if is_integral(&self.sys.types, index_ty) {
            return Some(elem_ty);
        }
        self.error(pos, messages::INTEGER_EXPECTED);
        None
    }

    fn check_dot(&mut self, pos: ta_common::Position, expr: ExprId, base: ExprId) -> Option<TypeId> {
        let base_ty = unwrap_prefixes(&self.sys.types, self.ty_of(base));
        let (kind, labels, subs) = {
            let t = self.sys.types.get(base_ty);
            (t.kind, t.labels.clone(), t.subs.clone())
        };
        if kind != TypeKind::Record {
            self.error(pos, messages::TYPE_ERROR);
            return None;
        }
        let field_name = match &self.sys.exprs.get(expr).value {
            Some(ta_model::Value::Str(name)) => name.clone(),
            _ => {
                self.error(pos, messages::UNKNOWN_FIELD);
                return None;
            }
        };
        match labels.iter().position(|l| *l == field_name) {
            Some(idx) => Some(subs[idx]),
            None => {
                self.error(pos, messages::UNKNOWN_FIELD);
                None
            }
        }
    }

    fn check_math_call(&mut self, pos: ta_common::Position, f: MathFunction, args: &[ExprId]) -> Option<TypeId> {
        if args.len() != f.arity() {
            self.error(pos, messages::INCOMPATIBLE_ARGUMENT);
            return None;
        }
        for &arg in args {
            let t = self.ty_of(arg);
            let ok = if f.accepts_integer_argument() {
                is_integral(&self.sys.types, t) || is_number(&self.sys.types, t)
            } else {
                is_number(&self.sys.types, t)
            };
            if !ok {
                self.error(pos, messages::NUMBER_EXPECTED);
                return None;
            }
        }
        if f.is_boolean_result() {
            Some(TypeId::BOOL)
        } else if f.is_integral_result() {
            Some(TypeId::INT)
        } else {
            Some(TypeId::DOUBLE)
        }
    }

    fn check_forall(&mut self, pos: ta_common::Position, expr: ExprId, body: ExprId) -> Option<TypeId> {
        let sym = self.sys.exprs.get(expr).symbol;
        if sym.is_none() {
            self.error(pos, messages::TYPE_ERROR);
            return None;
        }
        if !self.require_side_effect_free(body, "Invariant") {
            return None;
        }
        let bt = self.ty_of(body);
        for (pred, kind) in [
            (is_bool as fn(&ta_model::types::TypeArena, TypeId) -> bool, None),
            (is_invariant_with_rate, Some(TypeKind::InvariantWithRate)),
            (is_guard, Some(TypeKind::Guard)),
            (is_constraint, Some(TypeKind::Constraint)),
            (is_invariant, Some(TypeKind::Invariant)),
        ] {
            if pred(&self.sys.types, bt) {
                return Some(match kind {
                    Some(k) => self.wrap_category(k, bt),
                    None => bt,
                });
            }
        }
        self.error(pos, messages::BOOLEAN_EXPECTED);
        None
    }

    fn check_exists(&mut self, pos: ta_common::Position, body: ExprId) -> Option<TypeId> {
        if !self.require_side_effect_free(body, "Invariant") {
            return None;
        }
        let bt = self.ty_of(body);
        if is_bool(&self.sys.types, bt) || is_integral(&self.sys.types, bt) {
            return Some(TypeId::BOOL);
        }
        if is_constraint(&self.sys.types, bt) {
            return Some(self.wrap_category(TypeKind::Constraint, bt));
        }
        self.error(pos, messages::BOOLEAN_EXPECTED);
        None
    }

    fn check_sum(&mut self, pos: ta_common::Position, body: ExprId) -> Option<TypeId> {
        if !self.require_side_effect_free(body, "Invariant") {
            return None;
        }
        let bt = self.ty_of(body);
        if is_integral(&self.sys.types, bt) {
            return Some(TypeId::INT);
        }
        if is_number(&self.sys.types, bt) {
            return Some(TypeId::DOUBLE);
        }
        self.error(pos, messages::NUMBER_EXPECTED);
        None
    }

    fn check_spawn(&mut self, expr: ExprId, pos: ta_common::Position, args: &[ExprId]) -> Option<TypeId> {
        let sym = self.sys.exprs.get(expr).symbol?;
        let Some(UserData::Template(tid)) = self.sys.symbols.get(sym).user_data else {
            self.error(pos, messages::ATTEMPT_TO_SPAWN_NON_DYNAMIC_TEMPLATE);
            return None;
        };
        let (is_dynamic, is_defined, parameters_frame) = {
            let template = self.sys.template(tid);
            (template.is_dynamic, template.is_defined, template.parameters_frame)
        };
        if !is_dynamic {
            self.error(pos, messages::ATTEMPT_TO_SPAWN_NON_DYNAMIC_TEMPLATE);
            return None;
        }
        if !is_defined {
            self.error(pos, messages::TEMPLATE_IS_ONLY_DECLARED_NOT_DEFINED);
            return None;
        }
        let params = self.sys.frames.get(parameters_frame).symbols.clone();
        if params.len() != args.len() {
            self.error(pos, messages::INCOMPATIBLE_ARGUMENT);
            return None;
        }
        for (&param, &arg) in params.iter().zip(args.iter()) {
            let param_type = self.sys.symbols.get(param).ty;
            if !is_parameter_compatible(self.sys, param_type, arg) {
                let arg_pos = self.position(arg);
                self.error(arg_pos, messages::INCOMPATIBLE_ARGUMENT);
                return None;
            }
        }
        Some(TypeId::INT)
    }

    fn check_numof(&mut self, expr: ExprId, pos: ta_common::Position) -> Option<TypeId> {
        let sym = self.sys.exprs.get(expr).symbol?;
        let Some(UserData::Template(tid)) = self.sys.symbols.get(sym).user_data else {
            self.error(pos, messages::NOT_A_DYNAMIC_TEMPLATE);
            return None;
        };
        if self.sys.template(tid).is_dynamic {
            Some(TypeId::INT)
        } else {
            self.error(pos, messages::NOT_A_DYNAMIC_TEMPLATE);
            None
        }
    }

    /// `exit` is only valid inside a dynamic template; validity is
    /// established by `DeclarationChecker` setting up the checking context
    /// before walking a template's edges, so here we simply trust the
    /// context flag.
    fn check_exit(&mut self, pos: ta_common::Position) -> Option<TypeId> {
        if self.in_dynamic_template {
            Some(TypeId::INT)
        } else {
            self.error(pos, messages::EXIT_ONLY_IN_DYNAMIC_TEMPLATES);
            None
        }
    }

    fn check_formula_combinator(&mut self, pos: ta_common::Position, children: &[ExprId]) -> Option<TypeId> {
        for &c in children {
            let t = self.ty_of(c);
            if !is_formula(&self.sys.types, t) && !is_bool(&self.sys.types, t) && !is_integral(&self.sys.types, t) {
                self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
                return None;
            }
        }
        Some(TypeId::FORMULA)
    }

    fn check_both_integral_or_constraint(&mut self, pos: ta_common::Position, children: &[ExprId]) -> Option<TypeId> {
        for &c in children {
            let t = self.ty_of(c);
            if !is_integral(&self.sys.types, t) && !is_constraint(&self.sys.types, t) {
                self.error(pos, messages::PROPERTY_MUST_BE_A_VALID_FORMULA);
                return None;
            }
        }
        Some(TypeId::FORMULA)
    }

    fn check_tio_composition(&mut self, pos: ta_common::Position, children: &[ExprId]) -> Option<TypeId> {
        for &c in children {
            let t = self.ty_of(c);
            if !is_tio_graph(&self.sys.types, t) && !is_process(&self.sys.types, t) {
                self.error(pos, messages::COMPOSITION_OF_PROCESSES_EXPECTED);
                return None;
            }
        }
        Some(TypeId::TIOGRAPH)
    }

    fn check_tio_relation(&mut self, pos: ta_common::Position, children: &[ExprId]) -> Option<TypeId> {
        for &c in children {
            let t = self.ty_of(c);
            if !is_tio_graph(&self.sys.types, t) && !is_process(&self.sys.types, t) {
                self.error(pos, messages::COMPOSITION_OF_PROCESSES_EXPECTED);
                return None;
            }
        }
        Some(TypeId::FORMULA)
    }
}

type Pred = fn(&ta_model::types::TypeArena, TypeId) -> bool;
type Wrap = fn(&mut Checker<'_>, TypeId) -> TypeId;

const CATEGORY_ROWS: &[(Pred, Wrap)] = &[
    (is_invariant_with_rate, |c, t| c.wrap_category(TypeKind::InvariantWithRate, t)),
    (is_guard, |c, t| c.wrap_category(TypeKind::Guard, t)),
    (is_constraint, |c, t| c.wrap_category(TypeKind::Constraint, t)),
    (is_formula, |c, t| c.wrap_category(TypeKind::Formula, t)),
    (is_invariant, |c, t| c.wrap_category(TypeKind::Invariant, t)),
];
