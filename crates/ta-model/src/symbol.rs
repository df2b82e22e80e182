//! Symbols and frames (lexical scopes). Construction is the builder's job;
//! the checker only reads names/types and resolves identifiers through the
//! frame chain.

use ta_common::Position;

use crate::declarations::{FunctionId, InstanceId, TemplateId, VariableId};
use crate::types::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u32);

/// Points back at the domain record a symbol was declared for, when there
/// is one (plain locals and quantifier-bound variables have none).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserData {
    Variable(VariableId),
    Function(FunctionId),
    Template(TemplateId),
    Instance(InstanceId),
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub ty: TypeId,
    pub user_data: Option<UserData>,
    pub position: Position,
}

#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).expect("symbol arena overflow"));
        self.symbols.push(symbol);
        id
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn set_type(&mut self, id: SymbolId, ty: TypeId) {
        self.symbols[id.0 as usize].ty = ty;
    }
}

/// An ordered set of symbols; nested frames form the lexical scope chain.
/// Lookup walks outward from the innermost frame, matching the language's
/// usual shadowing rules.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    pub symbols: Vec<SymbolId>,
    pub parent: Option<FrameId>,
}

#[derive(Debug, Default)]
pub struct FrameArena {
    frames: Vec<Frame>,
}

impl FrameArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, frame: Frame) -> FrameId {
        let id = FrameId(u32::try_from(self.frames.len()).expect("frame arena overflow"));
        self.frames.push(frame);
        id
    }

    #[must_use]
    pub fn get(&self, id: FrameId) -> &Frame {
        &self.frames[id.0 as usize]
    }

    pub fn push_symbol(&mut self, id: FrameId, symbol: SymbolId) {
        self.frames[id.0 as usize].symbols.push(symbol);
    }

    /// Looks a name up through the frame chain, innermost first.
    #[must_use]
    pub fn resolve(&self, symbols: &SymbolArena, start: FrameId, name: &str) -> Option<SymbolId> {
        let mut cur = Some(start);
        while let Some(fid) = cur {
            let frame = self.get(fid);
            if let Some(&sym) = frame.symbols.iter().find(|&&s| symbols.get(s).name == name) {
                return Some(sym);
            }
            cur = frame.parent;
        }
        None
    }
}
