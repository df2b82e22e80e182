//! Statements inside function bodies.

use ta_common::Position;

use crate::expr::ExprId;
use crate::symbol::{FrameId, SymbolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtId(pub u32);

#[derive(Debug, Clone)]
pub enum Stmt {
    Empty,
    Expression(ExprId),
    Assert(ExprId),
    For {
        init: Option<ExprId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
    },
    /// `for (x : T) body` -- iterates a scalar set or an integer range.
    ForEach {
        var: SymbolId,
        body: StmtId,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    DoWhile {
        cond: ExprId,
        body: StmtId,
    },
    Block {
        frame: FrameId,
        statements: Vec<StmtId>,
    },
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    Return(Option<ExprId>),
}

#[derive(Debug, Default)]
pub struct StmtArena {
    nodes: Vec<(Stmt, Position)>,
}

impl StmtArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, stmt: Stmt, position: Position) -> StmtId {
        let id = StmtId(u32::try_from(self.nodes.len()).expect("stmt arena overflow"));
        self.nodes.push((stmt, position));
        id
    }

    #[must_use]
    pub fn get(&self, id: StmtId) -> &Stmt {
        &self.nodes[id.0 as usize].0
    }

    #[must_use]
    pub fn position(&self, id: StmtId) -> Position {
        self.nodes[id.0 as usize].1
    }
}
