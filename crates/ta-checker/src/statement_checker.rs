//! `StatementChecker` (§4.7): type-checks statements inside a function body.
//! Assignment expressions used as statements are checked through the same
//! `check_expression` dispatch as any other expression; this module only
//! adds the control-flow shape (conditions must be integral, `return`
//! matches the enclosing function's declared type).

use ta_common::diagnostics::messages;
use ta_model::types::unwrap_prefixes;
use ta_model::{Stmt, StmtId, TypeKind};

use crate::context::Checker;
use crate::type_predicates::{is_integral, valid_return_type};

impl<'a> Checker<'a> {
    /// Checks `stmt` and every nested statement/expression. Returns `false`
    /// on the first error in `stmt` or any descendant (checking still
    /// continues into siblings at the `Block` level, matching
    /// `checkExpression`'s per-declaration recovery).
    pub fn check_statement(&mut self, stmt: StmtId) -> bool {
        let node = self.sys.stmts.get(stmt).clone();
        let pos = self.sys.stmts.position(stmt);

        match node {
            Stmt::Empty => true,

            Stmt::Expression(e) => {
                let ok = self.check_expression(e);
                if ok && !self.has_side_effect(e) {
                    self.warning(pos, messages::EXPRESSION_DOES_NOT_HAVE_ANY_EFFECT);
                }
                ok
            }

            Stmt::Assert(e) => {
                let ok = self.check_expression(e);
                if !ok {
                    return false;
                }
                if !self.require_side_effect_free(e, "Assertion") {
                    return false;
                }
                let ty = self.sys.exprs.get(e).get_type();
                if is_integral(&self.sys.types, ty) {
                    true
                } else {
                    self.error(pos, messages::BOOLEAN_EXPECTED);
                    false
                }
            }

            Stmt::For { init, cond, step, body } => {
                let mut ok = true;
                if let Some(e) = init {
                    ok &= self.check_expression(e);
                }
                if let Some(e) = cond {
                    ok &= self.check_expression(e);
                    if ok {
                        let ty = self.sys.exprs.get(e).get_type();
                        if !is_integral(&self.sys.types, ty) {
                            self.error(pos, messages::BOOLEAN_EXPECTED);
                            ok = false;
                        }
                    }
                }
                if let Some(e) = step {
                    ok &= self.check_expression(e);
                }
                ok &= self.check_statement(body);
                ok
            }

            Stmt::ForEach { var: _, body } => self.check_statement(body),

            Stmt::While { cond, body } => {
                let mut ok = self.check_expression(cond);
                if ok {
                    let ty = self.sys.exprs.get(cond).get_type();
                    if !is_integral(&self.sys.types, ty) {
                        self.error(pos, messages::BOOLEAN_EXPECTED);
                        ok = false;
                    }
                }
                self.check_statement(body) && ok
            }

            Stmt::DoWhile { cond, body } => {
                let mut ok = self.check_expression(cond);
                if ok {
                    let ty = self.sys.exprs.get(cond).get_type();
                    if !is_integral(&self.sys.types, ty) {
                        self.error(pos, messages::BOOLEAN_EXPECTED);
                        ok = false;
                    }
                }
                self.check_statement(body) && ok
            }

            Stmt::Block { frame, statements } => {
                let locals_ok = self.check_block_locals(frame);
                statements.iter().fold(locals_ok, |ok, &s| self.check_statement(s) && ok)
            }

            Stmt::If { cond, then_branch, else_branch } => {
                let mut ok = self.check_expression(cond);
                if ok {
                    let ty = self.sys.exprs.get(cond).get_type();
                    if !is_integral(&self.sys.types, ty) {
                        self.error(pos, messages::BOOLEAN_EXPECTED);
                        ok = false;
                    }
                }
                ok &= self.check_statement(then_branch);
                if let Some(e) = else_branch {
                    ok &= self.check_statement(e);
                }
                ok
            }

            Stmt::Return(value) => self.check_return(pos, value),
        }
    }

    fn check_return(&mut self, pos: ta_common::Position, value: Option<ta_model::ExprId>) -> bool {
        let expected = self.current_return_type;
        let is_void = matches!(self.sys.types.get(unwrap_prefixes(&self.sys.types, expected)).kind, TypeKind::Void);

        match value {
            None => {
                if is_void {
                    true
                } else {
                    self.error(pos, messages::INCOMPATIBLE_TYPE);
                    false
                }
            }
            Some(e) => {
                if !self.check_expression(e) {
                    return false;
                }
                if is_void {
                    self.error(pos, messages::INCOMPATIBLE_TYPE);
                    return false;
                }
                let ty = self.sys.exprs.get(e).get_type();
                if !valid_return_type(&self.sys.types, ty) {
                    self.error(pos, messages::TYPE_ERROR);
                    return false;
                }
                if crate::compatibility::are_assignment_compatible(&self.sys.types, &self.sys.exprs, expected, ty, false) {
                    true
                } else {
                    self.error(pos, messages::INCOMPATIBLE_TYPE);
                    false
                }
            }
        }
    }
}

/// Conservative "always returns" analysis for §4.8's missing-return check
/// on non-void functions. An `if` with no `else` is treated as never
/// returning regardless of its `then` branch -- the open question the
/// source leaves implicit, resolved here in the safe direction: a
/// statement only counts as returning if every path through it does.
#[must_use]
pub fn always_returns(stmts: &ta_model::StmtArena, stmt: StmtId) -> bool {
    match stmts.get(stmt) {
        Stmt::Return(_) => true,
        Stmt::Block { statements, .. } => statements.iter().any(|&s| always_returns(stmts, s)),
        Stmt::If { then_branch, else_branch: Some(else_branch), .. } => {
            always_returns(stmts, *then_branch) && always_returns(stmts, *else_branch)
        }
        Stmt::If { else_branch: None, .. } => false,
        Stmt::DoWhile { body, .. } => always_returns(stmts, *body),
        _ => false,
    }
}
