//! Integration tests for §4.4's invariant-with-rate decomposition, driven
//! through `check_system` against a one-state template so the rewritten
//! `State::invariant`/`cost_rate` fields and the stopwatch/strict-invariant
//! recorders can all be observed post-check.

use ta_common::diagnostics::messages;
use ta_model::builder::Builder;
use ta_model::{Frame, State, System, Template, TypeId};

fn has_diagnostic(system: &System, id: &str) -> bool {
    system.diagnostics.diagnostics().iter().any(|d| d.id == id)
}

#[test]
fn cost_rate_equation_is_extracted_and_invariant_becomes_empty() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let cost = b.declare(scope, "c", TypeId::COST);
    let cost_ident = b.ident(cost);
    let rate_expr = b.un(ta_model::ExprKind::Rate, cost_ident);
    let two = b.int_lit(2);
    let invariant = b.bin(ta_model::ExprKind::Eq, rate_expr, two);
    let state_symbol = b.declare(scope, "s0", TypeId::VOID);
    let template_symbol = b.declare(scope, "T", TypeId::PROCESS);

    let mut state = State::new(state_symbol, ta_common::Position::synthetic());
    state.invariant = Some(invariant);
    let state_id = system.push_state(state);

    let params_frame = system.frames.alloc(Frame { symbols: vec![], parent: None });
    let mut template = Template::new(template_symbol, params_frame);
    template.states.push(state_id);
    system.push_template(template);

    assert!(ta_checker::check_system(&mut system));
    assert!(!has_diagnostic(&system, messages::ONLY_ONE_COST_RATE_IS_ALLOWED.id));

    let st = &system.states[state_id.0 as usize];
    assert!(st.invariant.is_none());
    assert_eq!(st.cost_rate, Some(two));
    assert!(!system.recorders.stopwatch_present);
}

#[test]
fn clock_rate_sets_stopwatch_and_keeps_equation_in_residual() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let clock = b.declare(scope, "x", TypeId::CLOCK);
    let cost = b.declare(scope, "c", TypeId::COST);

    let clock_ident = b.ident(clock);
    let clock_rate = b.un(ta_model::ExprKind::Rate, clock_ident);
    let two = b.int_lit(2);
    let clock_eq = b.bin(ta_model::ExprKind::Eq, clock_rate, two);

    let cost_ident = b.ident(cost);
    let cost_rate_expr = b.un(ta_model::ExprKind::Rate, cost_ident);
    let five = b.int_lit(5);
    let cost_eq = b.bin(ta_model::ExprKind::Eq, cost_rate_expr, five);

    let invariant = b.bin(ta_model::ExprKind::And, clock_eq, cost_eq);
    let state_symbol = b.declare(scope, "s0", TypeId::VOID);
    let template_symbol = b.declare(scope, "T", TypeId::PROCESS);

    let mut state = State::new(state_symbol, ta_common::Position::synthetic());
    state.invariant = Some(invariant);
    let state_id = system.push_state(state);

    let params_frame = system.frames.alloc(Frame { symbols: vec![], parent: None });
    let mut template = Template::new(template_symbol, params_frame);
    template.states.push(state_id);
    system.push_template(template);

    assert!(ta_checker::check_system(&mut system));

    let st = &system.states[state_id.0 as usize];
    assert_eq!(st.invariant, Some(clock_eq));
    assert_eq!(st.cost_rate, Some(five));
    assert!(system.recorders.stopwatch_present);
}

#[test]
fn two_cost_rate_equations_are_rejected() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let cost = b.declare(scope, "c", TypeId::COST);

    let first = {
        let ident = b.ident(cost);
        let rate = b.un(ta_model::ExprKind::Rate, ident);
        let two = b.int_lit(2);
        b.bin(ta_model::ExprKind::Eq, rate, two)
    };
    let second = {
        let ident = b.ident(cost);
        let rate = b.un(ta_model::ExprKind::Rate, ident);
        let three = b.int_lit(3);
        b.bin(ta_model::ExprKind::Eq, rate, three)
    };
    let invariant = b.bin(ta_model::ExprKind::And, first, second);
    let state_symbol = b.declare(scope, "s0", TypeId::VOID);
    let template_symbol = b.declare(scope, "T", TypeId::PROCESS);

    let mut state = State::new(state_symbol, ta_common::Position::synthetic());
    state.invariant = Some(invariant);
    let state_id = system.push_state(state);

    let params_frame = system.frames.alloc(Frame { symbols: vec![], parent: None });
    let mut template = Template::new(template_symbol, params_frame);
    template.states.push(state_id);
    system.push_template(template);

    assert!(!ta_checker::check_system(&mut system));
    assert!(has_diagnostic(&system, messages::ONLY_ONE_COST_RATE_IS_ALLOWED.id));
}
