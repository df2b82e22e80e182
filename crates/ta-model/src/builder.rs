//! Small programmatic constructors for the data model.
//!
//! A real build stands between the lexer/parser and this checker; that
//! builder protocol is out of scope for this core. Tests (ours, and anyone
//! embedding this crate without a parser front-end) use this module to
//! assemble small fixtures directly.

use ta_common::Position;

use crate::expr::{Expr, ExprId, ExprKind, MathFunction, Value};
use crate::stmt::{Stmt, StmtId};
use crate::symbol::{Frame, FrameId, Symbol, SymbolId, UserData};
use crate::system::System;
use crate::types::TypeId;

pub struct Builder<'a> {
    pub system: &'a mut System,
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new(system: &'a mut System) -> Self {
        Self { system }
    }

    fn alloc(&mut self, kind: ExprKind, children: Vec<ExprId>) -> ExprId {
        self.system.exprs.alloc(Expr::new(kind, children, Position::synthetic()))
    }

    pub fn int_lit(&mut self, value: i64) -> ExprId {
        let id = self
            .system
            .exprs
            .alloc(Expr::new(ExprKind::IntLiteral, vec![], Position::synthetic()).with_value(Value::Int(value)));
        self.system.exprs.get(id).set_type(TypeId::INT);
        id
    }

    pub fn double_lit(&mut self, value: f64) -> ExprId {
        let id = self
            .system
            .exprs
            .alloc(Expr::new(ExprKind::DoubleLiteral, vec![], Position::synthetic()).with_value(Value::Double(value)));
        self.system.exprs.get(id).set_type(TypeId::DOUBLE);
        id
    }

    pub fn bool_lit(&mut self, value: bool) -> ExprId {
        let id = self
            .system
            .exprs
            .alloc(Expr::new(ExprKind::BoolLiteral, vec![], Position::synthetic()).with_value(Value::Bool(value)));
        self.system.exprs.get(id).set_type(TypeId::BOOL);
        id
    }

    pub fn ident(&mut self, symbol: SymbolId) -> ExprId {
        self.system
            .exprs
            .alloc(Expr::new(ExprKind::Identifier, vec![], Position::synthetic()).with_symbol(symbol))
    }

    pub fn bin(&mut self, kind: ExprKind, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc(kind, vec![lhs, rhs])
    }

    pub fn un(&mut self, kind: ExprKind, operand: ExprId) -> ExprId {
        self.alloc(kind, vec![operand])
    }

    pub fn call(&mut self, target: SymbolId, args: Vec<ExprId>) -> ExprId {
        self.system
            .exprs
            .alloc(Expr::new(ExprKind::Call, args, Position::synthetic()).with_symbol(target))
    }

    pub fn array_index(&mut self, base: ExprId, index: ExprId) -> ExprId {
        self.alloc(ExprKind::ArrayIndex, vec![base, index])
    }

    pub fn math_call(&mut self, f: MathFunction, args: Vec<ExprId>) -> ExprId {
        self.alloc(ExprKind::MathCall(f), args)
    }

    pub fn quantifier(&mut self, kind: ExprKind, bound_var: SymbolId, body: ExprId) -> ExprId {
        self.system.exprs.alloc(Expr::new(kind, vec![body], Position::synthetic()).with_symbol(bound_var))
    }

    pub fn array_literal(&mut self, elements: Vec<ExprId>) -> ExprId {
        self.alloc(ExprKind::ArrayLiteral, elements)
    }

    pub fn record_literal(&mut self, elements: Vec<ExprId>) -> ExprId {
        self.alloc(ExprKind::RecordLiteral, elements)
    }

    pub fn field_init(&mut self, name: impl Into<String>, value: ExprId) -> ExprId {
        self.system
            .exprs
            .alloc(Expr::new(ExprKind::FieldInit, vec![value], Position::synthetic()).with_value(Value::Str(name.into())))
    }

    pub fn new_frame(&mut self, parent: Option<FrameId>) -> FrameId {
        self.system.frames.alloc(Frame { symbols: Vec::new(), parent })
    }

    pub fn declare(&mut self, frame: FrameId, name: impl Into<String>, ty: TypeId) -> SymbolId {
        let sym = self.system.symbols.alloc(Symbol {
            name: name.into(),
            ty,
            user_data: None,
            position: Position::synthetic(),
        });
        self.system.frames.push_symbol(frame, sym);
        sym
    }

    pub fn declare_with(
        &mut self,
        frame: FrameId,
        name: impl Into<String>,
        ty: TypeId,
        user_data: UserData,
    ) -> SymbolId {
        let sym = self.system.symbols.alloc(Symbol {
            name: name.into(),
            ty,
            user_data: Some(user_data),
            position: Position::synthetic(),
        });
        self.system.frames.push_symbol(frame, sym);
        sym
    }

    pub fn block(&mut self, frame: FrameId, statements: Vec<StmtId>) -> StmtId {
        self.system.stmts.alloc(Stmt::Block { frame, statements }, Position::synthetic())
    }

    pub fn stmt(&mut self, stmt: Stmt) -> StmtId {
        self.system.stmts.alloc(stmt, Position::synthetic())
    }
}
