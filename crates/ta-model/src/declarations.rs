//! Domain records: variables, states, edges, functions, templates,
//! instances, queries and the lighter-weight sequence-chart declarations.
//! These are read-mostly inputs to the checker; the fields the checker is
//! allowed to write are called out on each record.

use rustc_hash::FxHashSet;

use ta_common::Position;

use crate::expr::ExprId;
use crate::symbol::{FrameId, SymbolId};
use crate::types::TypeId;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);
    };
}

id_type!(VariableId);
id_type!(FunctionId);
id_type!(TemplateId);
id_type!(InstanceId);
id_type!(StateId);
id_type!(EdgeId);
id_type!(QueryId);
id_type!(InstanceLineId);
id_type!(MessageId);
id_type!(ConditionId);
id_type!(UpdateId);
id_type!(ProgressMeasureId);
id_type!(GanttChartId);
id_type!(IoDeclId);

#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: SymbolId,
    pub declared_type: TypeId,
    /// Present when the declaration has an `= expr` initialiser.
    pub initialiser: Option<ExprId>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirection {
    /// `chan!`
    Send,
    /// `chan?`
    Receive,
    /// plain CSP-style rendezvous (no `!`/`?` suffix)
    Csp,
}

#[derive(Debug, Clone)]
pub struct Sync {
    pub channel: ExprId,
    pub direction: SyncDirection,
}

#[derive(Debug, Clone, Default)]
pub struct Edge {
    pub select_frame: Option<FrameId>,
    pub guard: Option<ExprId>,
    pub sync: Option<Sync>,
    pub assignment: Option<ExprId>,
    pub probability: Option<ExprId>,
    pub source: Option<StateId>,
    pub target: Option<StateId>,
    /// Edge is attached to an urgent location or channel.
    pub is_urgent: bool,
    /// Set by `visitEdge` when the broadcast-receiver note applies.
    pub receives_broadcast: bool,
    /// Refinement controllability, used by §4.8's refinement-mode warnings.
    pub controllable: Option<bool>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct State {
    pub symbol: SymbolId,
    /// Raw invariant expression as declared; after checking this is
    /// rewritten in place by `RateDecomposer` to the residual invariant.
    pub invariant: Option<ExprId>,
    /// Extracted by `RateDecomposer`; `None` when the invariant carries no
    /// cost rate.
    pub cost_rate: Option<ExprId>,
    pub exponential_rate: Option<ExprId>,
    pub is_committed: bool,
    pub is_urgent: bool,
    pub position: Position,
}

impl State {
    #[must_use]
    pub fn new(symbol: SymbolId, position: Position) -> Self {
        Self {
            symbol,
            invariant: None,
            cost_rate: None,
            exponential_rate: None,
            is_committed: false,
            is_urgent: false,
            position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    pub symbol: SymbolId,
    pub params_frame: FrameId,
    pub locals_frame: FrameId,
    pub return_type: TypeId,
    pub body: crate::stmt::StmtId,
    /// Populated by `DeclarationChecker`: symbols external to this
    /// function's parameters and locals that its body writes to / reads.
    pub changes: FxHashSet<SymbolId>,
    pub depends: FxHashSet<SymbolId>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Template {
    pub symbol: SymbolId,
    pub parameters_frame: FrameId,
    pub states: Vec<StateId>,
    pub edges: Vec<EdgeId>,
    pub is_dynamic: bool,
    /// A template is "defined" once it has at least an initial location;
    /// `spawn` on a declared-but-undefined template is an error.
    pub is_defined: bool,
}

impl Template {
    #[must_use]
    pub fn new(symbol: SymbolId, parameters_frame: FrameId) -> Self {
        Self { symbol, parameters_frame, states: Vec::new(), edges: Vec::new(), is_dynamic: false, is_defined: false }
    }
}

#[derive(Debug, Clone)]
pub struct Instance {
    pub symbol: SymbolId,
    pub template: TemplateId,
    pub args: Vec<ExprId>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Query {
    pub expression: ExprId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct InstanceLine {
    pub symbol: SymbolId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub expression: ExprId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Condition {
    pub expression: ExprId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Update {
    pub expression: ExprId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct ProgressMeasure {
    pub busy: ExprId,
    pub progress: ExprId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct GanttChart {
    pub predicate: ExprId,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct IoDecl {
    pub channels: Vec<ExprId>,
    pub position: Position,
}
