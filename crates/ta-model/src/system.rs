//! The system object: owns every arena and declaration vector, the
//! diagnostic sink, and the handful of side-effect recorders the checker
//! reports into (§6.4 of the design: `recordStopWatch`, `setSyncUsed`, ...).

use rustc_hash::FxHashSet;

use ta_common::diagnostics::DiagnosticSink;

use crate::declarations::{
    Condition, ConditionId, Edge, EdgeId, Function, FunctionId, GanttChart, GanttChartId, IoDecl,
    IoDeclId, Instance, InstanceId, InstanceLine, InstanceLineId, Message, MessageId,
    ProgressMeasure, ProgressMeasureId, Query, QueryId, State, StateId, SyncDirection, Template,
    TemplateId, Update, UpdateId, Variable, VariableId,
};
use crate::expr::ExprArena;
use crate::stmt::StmtArena;
use crate::symbol::{FrameArena, SymbolArena, SymbolId};
use crate::types::TypeArena;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncUsage {
    Unused,
    Io,
    Csp,
}

/// Side-effect recorders the declaration/property checkers report into.
/// In the original system these live on the surrounding compiler object;
/// here they live on `System` since this core is the whole compiler we're
/// given.
#[derive(Debug, Default)]
pub struct Recorders {
    pub stopwatch_present: bool,
    pub strict_invariants: FxHashSet<StateId>,
    pub strict_lower_bound_controllable_edges: FxHashSet<EdgeId>,
    pub urgent_transitions: FxHashSet<EdgeId>,
    pub broadcast_recv_clock_guards: FxHashSet<EdgeId>,
    pub sync_usage: SyncUsage,
}

#[derive(Debug, Default)]
pub struct System {
    pub types: TypeArena,
    pub exprs: ExprArena,
    pub stmts: StmtArena,
    pub symbols: SymbolArena,
    pub frames: FrameArena,

    pub variables: Vec<Variable>,
    pub functions: Vec<Function>,
    pub templates: Vec<Template>,
    pub instances: Vec<Instance>,
    pub states: Vec<State>,
    pub edges: Vec<Edge>,
    pub queries: Vec<Query>,

    pub instance_lines: Vec<InstanceLine>,
    pub messages: Vec<Message>,
    pub conditions: Vec<Condition>,
    pub updates: Vec<Update>,
    pub progress_measures: Vec<ProgressMeasure>,
    pub gantt_charts: Vec<GanttChart>,
    pub io_decls: Vec<IoDecl>,

    pub diagnostics: DiagnosticSink,
    pub recorders: Recorders,

    /// Populated by the `CompileTimeComputability` pre-pass: top-level
    /// constants and constant-typed instance parameters.
    pub compile_time_symbols: FxHashSet<SymbolId>,
}

impl System {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_variable(&mut self, v: Variable) -> VariableId {
        let id = VariableId(u32::try_from(self.variables.len()).unwrap());
        self.variables.push(v);
        id
    }
    pub fn push_function(&mut self, f: Function) -> FunctionId {
        let id = FunctionId(u32::try_from(self.functions.len()).unwrap());
        self.functions.push(f);
        id
    }
    pub fn push_template(&mut self, t: Template) -> TemplateId {
        let id = TemplateId(u32::try_from(self.templates.len()).unwrap());
        self.templates.push(t);
        id
    }
    pub fn push_instance(&mut self, i: Instance) -> InstanceId {
        let id = InstanceId(u32::try_from(self.instances.len()).unwrap());
        self.instances.push(i);
        id
    }
    pub fn push_state(&mut self, s: State) -> StateId {
        let id = StateId(u32::try_from(self.states.len()).unwrap());
        self.states.push(s);
        id
    }
    pub fn push_edge(&mut self, e: Edge) -> EdgeId {
        let id = EdgeId(u32::try_from(self.edges.len()).unwrap());
        self.edges.push(e);
        id
    }
    pub fn push_query(&mut self, q: Query) -> QueryId {
        let id = QueryId(u32::try_from(self.queries.len()).unwrap());
        self.queries.push(q);
        id
    }
    pub fn push_instance_line(&mut self, v: InstanceLine) -> InstanceLineId {
        let id = InstanceLineId(u32::try_from(self.instance_lines.len()).unwrap());
        self.instance_lines.push(v);
        id
    }
    pub fn push_message(&mut self, v: Message) -> MessageId {
        let id = MessageId(u32::try_from(self.messages.len()).unwrap());
        self.messages.push(v);
        id
    }
    pub fn push_condition(&mut self, v: Condition) -> ConditionId {
        let id = ConditionId(u32::try_from(self.conditions.len()).unwrap());
        self.conditions.push(v);
        id
    }
    pub fn push_update(&mut self, v: Update) -> UpdateId {
        let id = UpdateId(u32::try_from(self.updates.len()).unwrap());
        self.updates.push(v);
        id
    }
    pub fn push_progress_measure(&mut self, v: ProgressMeasure) -> ProgressMeasureId {
        let id = ProgressMeasureId(u32::try_from(self.progress_measures.len()).unwrap());
        self.progress_measures.push(v);
        id
    }
    pub fn push_gantt_chart(&mut self, v: GanttChart) -> GanttChartId {
        let id = GanttChartId(u32::try_from(self.gantt_charts.len()).unwrap());
        self.gantt_charts.push(v);
        id
    }
    pub fn push_io_decl(&mut self, v: IoDecl) -> IoDeclId {
        let id = IoDeclId(u32::try_from(self.io_decls.len()).unwrap());
        self.io_decls.push(v);
        id
    }

    // --- §6.4 side-effect recorders ---

    pub fn record_stop_watch(&mut self) {
        self.recorders.stopwatch_present = true;
    }

    pub fn record_strict_invariant(&mut self, state: StateId) {
        self.recorders.strict_invariants.insert(state);
    }

    pub fn record_strict_lower_bound_on_controllable_edge(&mut self, edge: EdgeId) {
        self.recorders.strict_lower_bound_controllable_edges.insert(edge);
    }

    pub fn set_urgent_transition(&mut self, edge: EdgeId) {
        self.recorders.urgent_transitions.insert(edge);
    }

    pub fn clock_guard_recv_broadcast(&mut self, edge: EdgeId) {
        self.recorders.broadcast_recv_clock_guards.insert(edge);
    }

    /// Returns `false` and leaves `sync_usage` unchanged when `direction`
    /// would mix IO and CSP; `true` otherwise. Mirrors P3/invariant 5.
    pub fn set_sync_used(&mut self, direction: SyncDirection) -> bool {
        let observed = match direction {
            SyncDirection::Send | SyncDirection::Receive => SyncUsage::Io,
            SyncDirection::Csp => SyncUsage::Csp,
        };
        match self.recorders.sync_usage {
            SyncUsage::Unused => {
                self.recorders.sync_usage = observed;
                true
            }
            current => current == observed,
        }
    }

    #[must_use]
    pub fn get_dynamic_template(&self, name: &str) -> Option<TemplateId> {
        self.templates
            .iter()
            .position(|t| self.symbols.get(t.symbol).name == name && t.is_dynamic)
            .map(|i| TemplateId(u32::try_from(i).unwrap()))
    }

    #[must_use]
    pub fn template(&self, id: TemplateId) -> &Template {
        &self.templates[id.0 as usize]
    }
}

impl Default for SyncUsage {
    fn default() -> Self {
        SyncUsage::Unused
    }
}
