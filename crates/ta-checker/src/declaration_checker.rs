//! `DeclarationChecker` (§4.8): the system traversal. Walks every variable,
//! template (states, edges), instance and function, delegating expression
//! and statement shape-checking to `ExpressionChecker`/`StatementChecker`
//! and adding the declaration-level rules that sit above them: initialiser
//! discipline, sync-usage tracking, instance argument discipline, and a
//! function's `changes`/`depends` summary.

use rustc_hash::FxHashSet;

use ta_common::diagnostics::messages;
use ta_model::types::{has_prefix, TypeKind};
use ta_model::{
    EdgeId, ExprId, ExprKind, FrameId, FunctionId, InstanceId, Stmt, StateId, StmtId, StmtArena,
    SymbolId, SyncDirection, SyncUsage, TemplateId, UserData, VariableId,
};

use crate::compatibility::is_unique_reference;
use crate::compile_time::{collect_reads, is_compile_time_computable};
use crate::context::Checker;
use crate::statement_checker::always_returns;
use crate::type_predicates::{
    is_channel, is_guard, is_integral, is_invariant, is_number, is_void, valid_return_type,
};

impl<'a> Checker<'a> {
    /// Runs every declaration-level check over the whole system. Must run
    /// after `collect_compile_time_symbols` has populated
    /// `system.compile_time_symbols`. Settles every function's
    /// `changes`/`depends` up front, before checking the first variable,
    /// so a forward call to a not-yet-declaration-order-reached function
    /// is never read as side-effect-free.
    pub fn check_declarations(&mut self) -> bool {
        compute_function_summaries(self.sys);

        let mut ok = true;

        let variable_ids: Vec<VariableId> =
            (0..self.sys.variables.len()).map(|i| VariableId(u32::try_from(i).unwrap())).collect();
        for id in variable_ids {
            ok &= self.check_variable(id);
        }

        let template_ids: Vec<TemplateId> =
            (0..self.sys.templates.len()).map(|i| TemplateId(u32::try_from(i).unwrap())).collect();
        for id in template_ids {
            ok &= self.check_template(id);
        }

        let instance_ids: Vec<InstanceId> =
            (0..self.sys.instances.len()).map(|i| InstanceId(u32::try_from(i).unwrap())).collect();
        for id in instance_ids {
            ok &= self.check_instance(id);
        }

        let function_ids: Vec<FunctionId> =
            (0..self.sys.functions.len()).map(|i| FunctionId(u32::try_from(i).unwrap())).collect();
        for id in function_ids {
            ok &= self.check_function(id);
        }

        for i in 0..self.sys.instance_lines.len() {
            ok &= self.check_instance_line(i);
        }
        for i in 0..self.sys.messages.len() {
            ok &= self.check_message(i);
        }
        for i in 0..self.sys.conditions.len() {
            ok &= self.check_condition(i);
        }
        for i in 0..self.sys.updates.len() {
            ok &= self.check_update(i);
        }
        for i in 0..self.sys.progress_measures.len() {
            ok &= self.check_progress_measure(i);
        }
        for i in 0..self.sys.gantt_charts.len() {
            ok &= self.check_gantt_chart(i);
        }
        for i in 0..self.sys.io_decls.len() {
            ok &= self.check_io_decl(i);
        }

        ok
    }

    // --- variables ---

    fn check_variable(&mut self, id: VariableId) -> bool {
        let (declared_type, initialiser, pos) = {
            let v = &self.sys.variables[id.0 as usize];
            (v.declared_type, v.initialiser, v.position)
        };

        let mut ok = self.check_type(pos, declared_type);

        if let Some(init) = initialiser {
            if !self.require_side_effect_free(init, "Initialiser") {
                ok = false;
            } else if !is_compile_time_computable(self.sys, init) {
                self.error(pos, messages::MUST_BE_COMPUTABLE_AT_COMPILE_TIME);
                ok = false;
            } else {
                ok &= self.check_initialiser(pos, declared_type, init);
            }
        }
        ok
    }

    /// A block-local declaration is a `Variable` like any other, just one
    /// whose `symbol` lives in a statement's `Block` frame rather than at
    /// system scope. §4.7's Block rule checks these directly: no
    /// compile-time-computability requirement, only shape and side effects.
    pub(crate) fn check_block_locals(&mut self, frame: FrameId) -> bool {
        let symbols = self.sys.frames.get(frame).symbols.clone();
        let mut ok = true;
        for sym in symbols {
            let Some(var_id) = self.variable_for_symbol(sym) else { continue };
            let (declared_type, initialiser, pos) = {
                let v = &self.sys.variables[var_id.0 as usize];
                (v.declared_type, v.initialiser, v.position)
            };
            ok &= self.check_type(pos, declared_type);
            if let Some(init) = initialiser {
                if !self.require_side_effect_free(init, "Initialiser") {
                    ok = false;
                } else {
                    ok &= self.check_initialiser(pos, declared_type, init);
                }
            }
        }
        ok
    }

    fn variable_for_symbol(&self, sym: SymbolId) -> Option<VariableId> {
        self.sys
            .variables
            .iter()
            .position(|v| v.symbol == sym)
            .map(|i| VariableId(u32::try_from(i).unwrap()))
    }

    // --- templates / states / edges ---

    fn check_template(&mut self, id: TemplateId) -> bool {
        let (parameters_frame, is_dynamic, states, edges) = {
            let t = &self.sys.templates[id.0 as usize];
            (t.parameters_frame, t.is_dynamic, t.states.clone(), t.edges.clone())
        };

        let mut ok = true;
        let params = self.sys.frames.get(parameters_frame).symbols.clone();
        for param in params {
            let (ty, pos) = {
                let s = self.sys.symbols.get(param);
                (s.ty, s.position)
            };
            ok &= self.check_type(pos, ty);
        }

        let saved = self.in_dynamic_template;
        self.in_dynamic_template = is_dynamic;
        for state in states {
            ok &= self.check_state(state);
        }
        for edge in edges {
            ok &= self.check_edge(edge);
        }
        self.in_dynamic_template = saved;

        ok
    }

    fn check_state(&mut self, id: StateId) -> bool {
        let (invariant, exponential_rate, pos) = {
            let s = &self.sys.states[id.0 as usize];
            (s.invariant, s.exponential_rate, s.position)
        };
        let mut ok = true;

        if let Some(inv) = invariant {
            if !self.check_expression(inv) {
                ok = false;
            } else if !self.require_side_effect_free(inv, "Invariant") {
                ok = false;
            } else {
                let ty = self.sys.exprs.get(inv).get_type();
                if crate::type_predicates::is_invariant_with_rate(&self.sys.types, ty) {
                    self.decompose_state_invariant(id);
                } else if !is_invariant(&self.sys.types, ty) {
                    self.error(pos, messages::INCOMPATIBLE_TYPE);
                    ok = false;
                }
            }
        }

        if let Some(rate) = exponential_rate {
            if !self.check_expression(rate) {
                ok = false;
            } else {
                let ty = self.sys.exprs.get(rate).get_type();
                if !is_number(&self.sys.types, ty) {
                    self.error(pos, messages::NUMBER_EXPECTED);
                    ok = false;
                }
            }
        }

        ok
    }

    fn check_select_frame(&mut self, frame: FrameId) -> bool {
        let symbols = self.sys.frames.get(frame).symbols.clone();
        symbols.iter().fold(true, |ok, &sym| {
            let (ty, pos) = {
                let s = self.sys.symbols.get(sym);
                (s.ty, s.position)
            };
            self.check_type(pos, ty) && ok
        })
    }

    fn check_edge(&mut self, id: EdgeId) -> bool {
        let (select_frame, guard, sync, assignment, probability, is_urgent, receives_broadcast, controllable, pos) = {
            let e = &self.sys.edges[id.0 as usize];
            (
                e.select_frame,
                e.guard,
                e.sync.clone(),
                e.assignment,
                e.probability,
                e.is_urgent,
                e.receives_broadcast,
                e.controllable,
                e.position,
            )
        };
        let mut ok = true;

        if let Some(frame) = select_frame {
            ok &= self.check_select_frame(frame);
        }

        if let Some(guard_expr) = guard {
            if !self.check_expression(guard_expr) {
                ok = false;
            } else if !self.require_side_effect_free(guard_expr, "Guard") {
                ok = false;
            } else {
                let ty = self.sys.exprs.get(guard_expr).get_type();
                let is_clock_guard = is_guard(&self.sys.types, ty);
                if !is_clock_guard && !is_invariant(&self.sys.types, ty) {
                    self.error(pos, messages::BOOLEAN_EXPECTED);
                    ok = false;
                } else {
                    if is_urgent && is_clock_guard {
                        self.warning(pos, messages::CLOCK_GUARDS_NOT_ALLOWED_ON_URGENT_EDGES);
                    }
                    let strict = crate::type_predicates::has_strict_lower_bound(&self.sys.types, &self.sys.exprs, guard_expr)
                        || crate::type_predicates::has_strict_upper_bound(&self.sys.types, &self.sys.exprs, guard_expr);
                    if strict && is_urgent {
                        self.warning(pos, messages::STRICT_BOUNDS_ON_URGENT_EDGES);
                    }
                    if strict && controllable == Some(true) {
                        self.sys.record_strict_lower_bound_on_controllable_edge(id);
                    }
                    if receives_broadcast && is_clock_guard {
                        self.sys.clock_guard_recv_broadcast(id);
                    }
                }
            }
        }

        if is_urgent {
            self.sys.set_urgent_transition(id);
        }

        if let Some(sync) = sync {
            if !self.check_expression(sync.channel) {
                ok = false;
            } else if !self.require_side_effect_free(sync.channel, "Synchronisation") {
                ok = false;
            } else {
                let ty = self.sys.exprs.get(sync.channel).get_type();
                if !is_channel(&self.sys.types, ty) {
                    self.error(pos, messages::CHANNEL_EXPECTED);
                    ok = false;
                }
            }

            let before = self.sys.recorders.sync_usage;
            if !self.sys.set_sync_used(sync.direction) {
                let msg = match before {
                    SyncUsage::Io => messages::ASSUMED_IO_BUT_FOUND_CSP,
                    SyncUsage::Csp => messages::ASSUMED_CSP_BUT_FOUND_IO,
                    SyncUsage::Unused => messages::CSP_AND_IO_CANNOT_BE_MIXED,
                };
                self.error(pos, msg);
                ok = false;
            } else if sync.direction == SyncDirection::Csp && !self.options.allow_csp_sync {
                self.error(pos, messages::CSP_AND_IO_CANNOT_BE_MIXED);
                ok = false;
            }

            if self.options.refinement_mode {
                match (sync.direction, controllable) {
                    (SyncDirection::Send, Some(true)) => self.warning(pos, messages::OUTPUTS_SHOULD_BE_UNCONTROLLABLE),
                    (SyncDirection::Receive, Some(false)) => self.warning(pos, messages::INPUTS_SHOULD_BE_CONTROLLABLE),
                    _ => {}
                }
            }
        }

        if let Some(assign) = assignment {
            if self.check_expression(assign) {
                if !self.has_side_effect(assign) {
                    self.warning(pos, messages::EXPRESSION_DOES_NOT_HAVE_ANY_EFFECT);
                }
            } else {
                ok = false;
            }
        }

        if self.options.check_edge_probabilities
            && let Some(prob) = probability
        {
            if !self.check_expression(prob) {
                ok = false;
            } else if !self.require_side_effect_free(prob, "Probability") {
                ok = false;
            } else {
                let ty = self.sys.exprs.get(prob).get_type();
                if !is_number(&self.sys.types, ty) {
                    self.error(pos, messages::NUMBER_EXPECTED);
                    ok = false;
                }
            }
        }

        ok
    }

    // --- instances ---

    fn check_instance(&mut self, id: InstanceId) -> bool {
        let (template_id, args, pos) = {
            let i = &self.sys.instances[id.0 as usize];
            (i.template, i.args.clone(), i.position)
        };
        let params_frame = self.sys.template(template_id).parameters_frame;
        let params = self.sys.frames.get(params_frame).symbols.clone();

        if params.len() != args.len() {
            self.error(pos, messages::INCOMPATIBLE_ARGUMENT);
            return false;
        }

        let mut ok = true;
        for (&param, &arg) in params.iter().zip(args.iter()) {
            if !self.check_expression(arg) {
                ok = false;
                continue;
            }
            let arg_pos = self.sys.exprs.get(arg).position;
            let param_type = self.sys.symbols.get(param).ty;
            if !crate::compatibility::is_parameter_compatible(self.sys, param_type, arg) {
                self.error(arg_pos, messages::INCOMPATIBLE_ARGUMENT);
                ok = false;
                continue;
            }
            let param_is_ref = has_prefix(&self.sys.types, param_type, TypeKind::Ref);
            let param_is_const = has_prefix(&self.sys.types, param_type, TypeKind::Const);
            let disciplined = if param_is_ref && !param_is_const {
                is_compile_time_computable(self.sys, arg) || is_unique_reference(self.sys, arg)
            } else {
                is_compile_time_computable(self.sys, arg)
            };
            if !disciplined {
                self.error(arg_pos, messages::INCOMPATIBLE_ARGUMENT);
                ok = false;
            }
        }
        ok
    }

    // --- functions ---

    /// `changes`/`depends` are not computed here -- they're a call-graph
    /// property and are settled for every function up front by
    /// `compute_function_summaries` before any declaration is checked.
    fn check_function(&mut self, id: FunctionId) -> bool {
        let (return_type, body, pos) = {
            let f = &self.sys.functions[id.0 as usize];
            (f.return_type, f.body, f.position)
        };

        let mut ok = self.check_type(pos, return_type);
        if !valid_return_type(&self.sys.types, return_type) {
            self.error(pos, messages::TYPE_ERROR);
            ok = false;
        }

        self.current_return_type = return_type;
        let body_ok = self.check_statement(body);
        ok &= body_ok;

        let mut exprs = Vec::new();
        collect_stmt_exprs(&self.sys.stmts, body, &mut exprs);

        for &e in &exprs {
            if self.expr_contains_dynamic_construct(e) {
                self.error(self.sys.exprs.get(e).position, messages::DYNAMIC_CONSTRUCTS_ONLY_ALLOWED_ON_EDGES);
                ok = false;
            }
        }

        if body_ok && !is_void(&self.sys.types, return_type) && !always_returns(&self.sys.stmts, body) {
            self.error(pos, messages::MISSING_RETURN_STATEMENT);
            ok = false;
        }

        ok
    }

    fn expr_contains_dynamic_construct(&self, expr: ExprId) -> bool {
        let node = self.sys.exprs.get(expr);
        if matches!(node.kind, ExprKind::Spawn | ExprKind::Exit | ExprKind::Numof) {
            return true;
        }
        node.children.iter().any(|&c| self.expr_contains_dynamic_construct(c))
    }

    // --- sequence charts / progress / gantt / IO ---

    fn check_instance_line(&mut self, _idx: usize) -> bool {
        true
    }

    fn check_message(&mut self, idx: usize) -> bool {
        let expr = self.sys.messages[idx].expression;
        if !self.check_expression(expr) {
            return false;
        }
        self.require_side_effect_free(expr, "Message")
    }

    fn check_condition(&mut self, idx: usize) -> bool {
        let (expr, pos) = {
            let c = &self.sys.conditions[idx];
            (c.expression, c.position)
        };
        if !self.check_expression(expr) {
            return false;
        }
        if !self.require_side_effect_free(expr, "Condition") {
            return false;
        }
        let ty = self.sys.exprs.get(expr).get_type();
        if is_integral(&self.sys.types, ty) {
            true
        } else {
            self.error(pos, messages::BOOLEAN_EXPECTED);
            false
        }
    }

    fn check_update(&mut self, idx: usize) -> bool {
        let expr = self.sys.updates[idx].expression;
        if !self.check_expression(expr) {
            return false;
        }
        if !self.has_side_effect(expr) {
            let pos = self.sys.exprs.get(expr).position;
            self.warning(pos, messages::EXPRESSION_DOES_NOT_HAVE_ANY_EFFECT);
        }
        true
    }

    fn check_progress_measure(&mut self, idx: usize) -> bool {
        let (busy, progress, pos) = {
            let p = &self.sys.progress_measures[idx];
            (p.busy, p.progress, p.position)
        };
        let mut ok = self.check_expression(busy);
        if ok && !is_integral(&self.sys.types, self.sys.exprs.get(busy).get_type()) {
            self.error(pos, messages::BOOLEAN_EXPECTED);
            ok = false;
        }
        let progress_ok = self.check_expression(progress);
        ok &= progress_ok;
        if progress_ok {
            let ty = self.sys.exprs.get(progress).get_type();
            if !is_integral(&self.sys.types, ty) && !is_number(&self.sys.types, ty) {
                self.error(pos, messages::NUMBER_EXPECTED);
                ok = false;
            }
        }
        ok
    }

    fn check_gantt_chart(&mut self, idx: usize) -> bool {
        let (predicate, pos) = {
            let g = &self.sys.gantt_charts[idx];
            (g.predicate, g.position)
        };
        if !self.check_expression(predicate) {
            return false;
        }
        let ty = self.sys.exprs.get(predicate).get_type();
        if is_integral(&self.sys.types, ty) {
            true
        } else {
            self.error(pos, messages::BOOLEAN_EXPECTED);
            false
        }
    }

    fn check_io_decl(&mut self, idx: usize) -> bool {
        let (channels, pos) = {
            let d = &self.sys.io_decls[idx];
            (d.channels.clone(), d.position)
        };
        let mut ok = true;
        for channel in channels {
            if !self.check_expression(channel) {
                ok = false;
                continue;
            }
            let ty = self.sys.exprs.get(channel).get_type();
            if !is_channel(&self.sys.types, ty) {
                self.error(pos, messages::LIST_OF_CHANNELS_EXPECTED);
                ok = false;
            }
        }
        ok
    }
}

/// Collects every top-level expression referenced directly by a statement
/// tree (condition/init/step/assert/return/expression-statement exprs),
/// recursing into nested statements but not into nested expression
/// subtrees -- callers that need the full expression tree walk each
/// collected root's children themselves.
fn collect_stmt_exprs(stmts: &StmtArena, stmt: StmtId, out: &mut Vec<ExprId>) {
    match stmts.get(stmt) {
        Stmt::Empty => {}
        Stmt::Expression(e) | Stmt::Assert(e) => out.push(*e),
        Stmt::For { init, cond, step, body } => {
            if let Some(e) = init {
                out.push(*e);
            }
            if let Some(e) = cond {
                out.push(*e);
            }
            if let Some(e) = step {
                out.push(*e);
            }
            collect_stmt_exprs(stmts, *body, out);
        }
        Stmt::ForEach { body, .. } => collect_stmt_exprs(stmts, *body, out),
        Stmt::While { cond, body } | Stmt::DoWhile { cond, body } => {
            out.push(*cond);
            collect_stmt_exprs(stmts, *body, out);
        }
        Stmt::Block { statements, .. } => {
            for &s in statements {
                collect_stmt_exprs(stmts, s, out);
            }
        }
        Stmt::If { cond, then_branch, else_branch } => {
            out.push(*cond);
            collect_stmt_exprs(stmts, *then_branch, out);
            if let Some(e) = else_branch {
                collect_stmt_exprs(stmts, *e, out);
            }
        }
        Stmt::Return(Some(e)) => out.push(*e),
        Stmt::Return(None) => {}
    }
}

/// Settles every function's `changes`/`depends` before any declaration is
/// checked. Functions are declared in source order but may call forward
/// (mutual recursion, or simply calling a function declared later in the
/// file); a single pass in declaration order would read a not-yet-computed
/// (default-empty) summary off a forward callee and silently under-
/// approximate both sets. Each round recomputes every function's sets from
/// its current snapshot of every other function's sets and keeps going
/// until a full round leaves nothing changed -- a standard call-graph
/// fixed point, guaranteed to terminate since both sets only ever grow and
/// are bounded by the total symbol count.
pub(crate) fn compute_function_summaries(system: &mut ta_model::System) {
    let function_ids: Vec<FunctionId> = (0..system.functions.len()).map(|i| FunctionId(u32::try_from(i).unwrap())).collect();

    let mut bodies = Vec::with_capacity(function_ids.len());
    for &id in &function_ids {
        let f = &system.functions[id.0 as usize];
        let mut exprs = Vec::new();
        collect_stmt_exprs(&system.stmts, f.body, &mut exprs);
        let mut locals: FxHashSet<SymbolId> = FxHashSet::default();
        locals.extend(system.frames.get(f.params_frame).symbols.iter().copied());
        locals.extend(system.frames.get(f.locals_frame).symbols.iter().copied());
        bodies.push((exprs, locals));
    }

    loop {
        let mut changed = false;
        for (i, &id) in function_ids.iter().enumerate() {
            let (exprs, locals) = &bodies[i];

            let mut changes = FxHashSet::default();
            let mut depends = FxHashSet::default();
            let mut seen_writes = FxHashSet::default();
            let mut seen_reads = FxHashSet::default();
            for &e in exprs {
                collect_writes(system, e, &mut changes, &mut seen_writes);
                collect_reads(system, e, &mut depends, &mut seen_reads);
            }
            changes.retain(|s| !locals.contains(s));
            depends.retain(|s| !locals.contains(s));

            let f = &mut system.functions[id.0 as usize];
            if changes != f.changes || depends != f.depends {
                f.changes = changes;
                f.depends = depends;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Symmetric to `compile_time::collect_reads`: gathers every symbol that is
/// the target of a mutating operator, transitively through calls to
/// functions whose own `changes` set is already known.
fn collect_writes(system: &ta_model::System, expr: ExprId, out: &mut FxHashSet<SymbolId>, seen_fns: &mut FxHashSet<FunctionId>) {
    let node = system.exprs.get(expr);
    let is_mutating = matches!(
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
    );
    if is_mutating
        && let Some(sym) = lvalue_root_symbol(system, node.children[0])
    {
        out.insert(sym);
    }
    if node.kind == ExprKind::Call
        && let Some(sym) = node.symbol
        && let Some(UserData::Function(fid)) = system.symbols.get(sym).user_data
        && seen_fns.insert(fid)
    {
        let func = &system.functions[fid.0 as usize];
        out.extend(func.changes.iter().copied());
    }
    for &child in &node.children {
        collect_writes(system, child, out, seen_fns);
    }
}

fn lvalue_root_symbol(system: &ta_model::System, expr: ExprId) -> Option<SymbolId> {
    let node = system.exprs.get(expr);
    match node.kind {
        ExprKind::Identifier => node.symbol,
        ExprKind::Dot | ExprKind::ArrayIndex => lvalue_root_symbol(system, node.children[0]),
        _ => None,
    }
}
