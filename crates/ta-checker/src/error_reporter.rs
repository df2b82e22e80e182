//! Thin wrappers around the diagnostic sink so call sites read as prose
//! instead of repeating `self.sys.diagnostics.add_error(pos, ID, msg)`
//! everywhere. Message identifiers are re-exported from `ta_common` and
//! must be emitted verbatim -- see the catalogue's doc comment.

use ta_common::Position;
use ta_common::diagnostics::messages::DiagnosticMessage;
use ta_common::diagnostics::{format_message, messages};
use ta_model::ExprId;

use crate::context::Checker;

impl<'a> Checker<'a> {
    pub fn error(&mut self, position: Position, msg: DiagnosticMessage) {
        self.sys.diagnostics.add_error(position, msg.id, msg.template);
    }

    pub fn error_args(&mut self, position: Position, msg: DiagnosticMessage, args: &[&str]) {
        let text = format_message(msg.template, args);
        self.sys.diagnostics.add_error(position, msg.id, text);
    }

    pub fn warning(&mut self, position: Position, msg: DiagnosticMessage) {
        self.sys.diagnostics.add_warning(position, msg.id, msg.template);
    }

    /// Emits `"{entity} must be side-effect free"` at `position`. `entity`
    /// is one of Invariant/Guard/Synchronisation/Assertion/Property/
    /// Initialiser/Argument/Probability/Condition/Message/Index, per §7.
    pub fn error_must_be_side_effect_free(&mut self, position: Position, entity: &str) {
        self.error_args(position, messages::MUST_BE_SIDE_EFFECT_FREE, &[entity]);
    }

    /// Checks `expr` for side effects and, if present, reports
    /// `error_must_be_side_effect_free` tagged with `entity`. Returns
    /// `true` iff the expression was side-effect free.
    pub fn require_side_effect_free(&mut self, expr: ExprId, entity: &str) -> bool {
        if self.has_side_effect(expr) {
            let position = self.sys.exprs.get(expr).position;
            self.error_must_be_side_effect_free(position, entity);
            false
        } else {
            true
        }
    }

    /// Recursively scans an expression tree for mutating operators, calls
    /// to functions with a non-empty `changes` set, or dynamic-process
    /// constructs (`spawn`/`exit`), any of which constitute a side effect.
    #[must_use]
    pub fn has_side_effect(&self, expr: ExprId) -> bool {
        use ta_model::{ExprKind, UserData};

        let node = self.sys.exprs.get(expr);
        let mutating = matches!(
            node.kind,
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
                | ExprKind::ShrAssign
                | ExprKind::PreIncrement
                | ExprKind::PreDecrement
                | ExprKind::PostIncrement
                | ExprKind::PostDecrement
                | ExprKind::Spawn
                | ExprKind::Exit
        );
        if mutating {
            return true;
        }

        if node.kind == ExprKind::Call
            && let Some(sym) = node.symbol
            && let Some(UserData::Function(fid)) = self.sys.symbols.get(sym).user_data
        {
            let func = &self.sys.functions[fid.0 as usize];
            if !func.changes.is_empty() {
                return true;
            }
        }

        node.children.iter().any(|&c| self.has_side_effect(c))
    }
}
