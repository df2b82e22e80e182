//! `TypeChecker::check_type` (§4.6): well-formedness of a declared type,
//! independent of any expression it might annotate. Ranges and array sizes
//! are checked for compile-time computability here; the operator algebra
//! (§4.5) never revisits a declared type once this pass accepts it.

use ta_common::diagnostics::messages;
use ta_common::Position;
use ta_model::types::{TypeId, TypeKind, unwrap_prefixes};

use crate::compile_time::is_compile_time_computable;
use crate::context::Checker;
use crate::type_predicates::is_integral;

impl<'a> Checker<'a> {
    /// Walks `ty` top-down, validating prefix placement and range bounds.
    /// Returns `false` (having reported at least one diagnostic) on the
    /// first violation found along the outermost-to-innermost chain.
    pub fn check_type(&mut self, pos: Position, ty: TypeId) -> bool {
        let kind = self.sys.types.get(ty).kind;
        match kind {
            TypeKind::Urgent => {
                let inner = self.sys.types.get(ty).subs[0];
                let inner_kind = self.sys.types.get(unwrap_prefixes(&self.sys.types, inner)).kind;
                if !matches!(inner_kind, TypeKind::Channel) {
                    self.error(pos, messages::PREFIX_URGENT_ONLY_ALLOWED_FOR_LOCATIONS_AND_CHANNELS);
                    return false;
                }
                self.check_type(pos, inner)
            }
            TypeKind::Broadcast => {
                let inner = self.sys.types.get(ty).subs[0];
                let inner_kind = self.sys.types.get(unwrap_prefixes(&self.sys.types, inner)).kind;
                if !matches!(inner_kind, TypeKind::Channel) {
                    self.error(pos, messages::PREFIX_BROADCAST_ONLY_ALLOWED_FOR_CHANNELS);
                    return false;
                }
                self.check_type(pos, inner)
            }
            TypeKind::Hybrid => {
                let inner = self.sys.types.get(ty).subs[0];
                let inner_kind = self.sys.types.get(unwrap_prefixes(&self.sys.types, inner)).kind;
                if !matches!(inner_kind, TypeKind::Clock) {
                    self.error(pos, messages::PREFIX_HYBRID_ONLY_ALLOWED_FOR_CLOCKS);
                    return false;
                }
                self.check_type(pos, inner)
            }
            TypeKind::Const | TypeKind::SystemMeta => {
                let inner = self.sys.types.get(ty).subs[0];
                let inner_kind = self.sys.types.get(unwrap_prefixes(&self.sys.types, inner)).kind;
                if matches!(inner_kind, TypeKind::Clock) {
                    let msg = if kind == TypeKind::Const {
                        messages::PREFIX_CONST_NOT_ALLOWED_FOR_CLOCKS
                    } else {
                        messages::PREFIX_META_NOT_ALLOWED_FOR_CLOCKS
                    };
                    self.error(pos, msg);
                    return false;
                }
                self.check_type(pos, inner)
            }
            TypeKind::Ref => {
                let inner = self.sys.types.get(ty).subs[0];
                self.check_type(pos, inner)
            }
            TypeKind::Array => {
                let (size, elem) = {
                    let t = self.sys.types.get(ty);
                    (t.subs[0], t.subs[1])
                };
                let size_ok = self.check_array_size(pos, size);
                size_ok & self.check_type(pos, elem)
            }
            TypeKind::Range => {
                let (lower, upper) = self.sys.types.get(ty).range.expect("Range always carries bounds");
                self.check_bound_computable(pos, lower) & self.check_bound_computable(pos, upper)
            }
            TypeKind::Int => {
                if let Some((lower, upper)) = self.sys.types.get(ty).range {
                    self.check_bound_computable(pos, lower) & self.check_bound_computable(pos, upper)
                } else {
                    true
                }
            }
            TypeKind::Record => {
                let fields = self.sys.types.get(ty).subs.clone();
                fields.iter().fold(true, |ok, &f| self.check_type(pos, f) && ok)
            }
            TypeKind::Label => {
                let inner = self.sys.types.get(ty).subs[0];
                self.check_type(pos, inner)
            }
            TypeKind::Guard
            | TypeKind::Invariant
            | TypeKind::InvariantWithRate
            | TypeKind::Constraint
            | TypeKind::Formula
            | TypeKind::Probability => {
                self.error(pos, messages::TYPE_CANNOT_BE_DECLARED_INSIDE_A_STRUCT);
                false
            }
            TypeKind::Committed => {
                self.error(pos, messages::PREFIX_COMMITTED_ONLY_ALLOWED_FOR_LOCATIONS);
                false
            }
            _ => true,
        }
    }

    fn check_array_size(&mut self, pos: Position, size: TypeId) -> bool {
        let kind = self.sys.types.get(size).kind;
        match kind {
            TypeKind::Range => {
                let (lower, upper) = self.sys.types.get(size).range.expect("array size range");
                self.check_bound_computable(pos, lower) & self.check_bound_computable(pos, upper)
            }
            TypeKind::Scalar => true,
            _ => {
                self.error(pos, messages::INVALID_ARRAY_SIZE);
                false
            }
        }
    }

    fn check_bound_computable(&mut self, pos: Position, bound: ta_model::ExprId) -> bool {
        let ty = self.sys.exprs.get(bound).get_type();
        if !is_integral(&self.sys.types, ty) {
            self.error(pos, messages::INTEGER_EXPECTED);
            return false;
        }
        if !is_compile_time_computable(self.sys, bound) {
            self.error(pos, messages::MUST_BE_COMPUTABLE_AT_COMPILE_TIME);
            return false;
        }
        true
    }
}
