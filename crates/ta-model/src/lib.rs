//! The data model consumed by the type checker: types, expressions, frames,
//! statements and the domain declarations (variables, states, edges,
//! functions, templates, instances, queries).
//!
//! Construction of this tree is the job of the lexer/parser/builder, which
//! is out of scope for this core -- see [`builder`] for the small set of
//! helper constructors this workspace uses in its own tests in lieu of a
//! real parser.

pub mod builder;
pub mod declarations;
pub mod expr;
pub mod stmt;
pub mod symbol;
pub mod system;
pub mod types;

pub use declarations::*;
pub use expr::{Expr, ExprArena, ExprId, ExprKind, MathFunction, Value};
pub use stmt::{Stmt, StmtArena, StmtId};
pub use symbol::{Frame, FrameArena, FrameId, Symbol, SymbolArena, SymbolId, UserData};
pub use system::{Recorders, System, SyncUsage};
pub use types::{Type, TypeArena, TypeId, TypeKind};
