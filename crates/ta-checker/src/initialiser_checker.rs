//! `checkInitialiser`: matches a literal initialiser against a declared
//! type. Called by `DeclarationChecker` once a variable's initialiser has
//! already passed the side-effect-free and compile-time-computable gates
//! (§4.8); this module only concerns itself with *shape*.
//!
//! Record literals are reordered in place so the i-th child always
//! corresponds to the i-th declared field (Open Question (c): safe because
//! initialisers are already required to be side-effect free, so evaluation
//! order can't be observed).

use ta_common::diagnostics::messages;
use ta_common::Position;
use ta_model::types::{unwrap_prefixes, TypeId, TypeKind};
use ta_model::{ExprId, ExprKind, Value};

use crate::compatibility::are_assignment_compatible;
use crate::context::Checker;

impl<'a> Checker<'a> {
    /// Returns `false` (having reported at least one diagnostic) if `expr`
    /// does not match the shape of `declared_type`.
    pub fn check_initialiser(&mut self, pos: Position, declared_type: TypeId, expr: ExprId) -> bool {
        let base = unwrap_prefixes(&self.sys.types, declared_type);
        match self.sys.types.get(base).kind {
            TypeKind::Array => self.check_array_initialiser(pos, base, expr),
            TypeKind::Record => self.check_record_initialiser(pos, base, expr),
            _ => self.check_scalar_initialiser(pos, declared_type, expr),
        }
    }

    fn check_scalar_initialiser(&mut self, pos: Position, declared_type: TypeId, expr: ExprId) -> bool {
        let kind = self.sys.exprs.get(expr).kind;
        if matches!(kind, ExprKind::ArrayLiteral | ExprKind::RecordLiteral | ExprKind::FieldInit) {
            self.error(pos, messages::INVALID_INITIALISER);
            return false;
        }
        if !self.check_expression(expr) {
            return false;
        }
        let rt = self.sys.exprs.get(expr).get_type();
        if are_assignment_compatible(&self.sys.types, &self.sys.exprs, declared_type, rt, true) {
            true
        } else {
            self.error(pos, messages::INVALID_INITIALISER);
            false
        }
    }

    fn check_array_initialiser(&mut self, pos: Position, array_ty: TypeId, expr: ExprId) -> bool {
        if self.sys.exprs.get(expr).kind != ExprKind::ArrayLiteral {
            return self.check_scalar_initialiser(pos, array_ty, expr);
        }
        let (size_ty, elem_ty) = {
            let t = self.sys.types.get(array_ty);
            (t.subs[0], t.subs[1])
        };
        let declared_len = self.literal_array_len(size_ty);
        let children = self.sys.exprs.get(expr).children.clone();

        let mut ok = true;
        for (i, &child) in children.iter().enumerate() {
            if let Some(len) = declared_len
                && i >= len
            {
                self.error(pos, messages::TOO_MANY_ELEMENTS_IN_INITIALISER);
                ok = false;
                continue;
            }
            if self.sys.exprs.get(child).kind == ExprKind::FieldInit {
                self.error(pos, messages::FIELD_NAME_NOT_ALLOWED_IN_ARRAY_INITIALISER);
                ok = false;
                continue;
            }
            ok &= self.check_initialiser(pos, elem_ty, child);
        }
        if let Some(len) = declared_len
            && children.len() < len
        {
            self.error(pos, messages::INCOMPLETE_INITIALISER);
            ok = false;
        }
        ok
    }

    fn check_record_initialiser(&mut self, pos: Position, record_ty: TypeId, expr: ExprId) -> bool {
        if self.sys.exprs.get(expr).kind != ExprKind::RecordLiteral {
            return self.check_scalar_initialiser(pos, record_ty, expr);
        }
        let (labels, field_types) = {
            let t = self.sys.types.get(record_ty);
            (t.labels.clone(), t.subs.clone())
        };
        let children = self.sys.exprs.get(expr).children.clone();

        let mut slots: Vec<Option<ExprId>> = vec![None; labels.len()];
        let mut positional_index = 0usize;
        let mut ok = true;

        for &child in &children {
            let node = self.sys.exprs.get(child);
            if node.kind == ExprKind::FieldInit {
                let name = match &node.value {
                    Some(Value::Str(name)) => name.clone(),
                    _ => {
                        self.error(pos, messages::UNKNOWN_FIELD);
                        ok = false;
                        continue;
                    }
                };
                let value = node.children[0];
                match labels.iter().position(|l| *l == name) {
                    Some(idx) => {
                        if slots[idx].is_some() {
                            self.error(pos, messages::MULTIPLE_INITIALISERS_FOR_FIELD);
                            ok = false;
                        } else {
                            slots[idx] = Some(value);
                        }
                    }
                    None => {
                        self.error(pos, messages::UNKNOWN_FIELD);
                        ok = false;
                    }
                }
            } else if positional_index >= labels.len() {
                self.error(pos, messages::TOO_MANY_ELEMENTS_IN_INITIALISER);
                ok = false;
            } else {
                if slots[positional_index].is_some() {
                    self.error(pos, messages::MULTIPLE_INITIALISERS_FOR_FIELD);
                    ok = false;
                } else {
                    slots[positional_index] = Some(child);
                }
                positional_index += 1;
            }
        }

        if slots.iter().any(Option::is_none) {
            self.error(pos, messages::INCOMPLETE_INITIALISER);
            ok = false;
        }

        if ok {
            for (&field_ty, &slot) in field_types.iter().zip(slots.iter()) {
                let value = slot.expect("completeness checked above");
                ok &= self.check_initialiser(pos, field_ty, value);
            }
            let reordered: Vec<ExprId> = slots.into_iter().map(|s| s.expect("completeness checked above")).collect();
            self.sys.exprs.set_children(expr, reordered);
        }
        ok
    }

    /// Reads a declared array length straight off a literal range bound;
    /// `None` when either bound isn't a literal (e.g. a named constant),
    /// in which case length-mismatch checks are skipped rather than
    /// guessed at.
    fn literal_array_len(&self, size_ty: TypeId) -> Option<usize> {
        let t = self.sys.types.get(size_ty);
        let (lower, upper) = t.range?;
        let lo = match self.sys.exprs.get(lower).value {
            Some(Value::Int(n)) => n,
            _ => return None,
        };
        let hi = match self.sys.exprs.get(upper).value {
            Some(Value::Int(n)) => n,
            _ => return None,
        };
        usize::try_from(hi - lo + 1).ok()
    }
}
