//! Integration tests for §4.8's system traversal, built directly against
//! `ta_model::builder::Builder` since this core has no parser front-end.

use rustc_hash::FxHashSet;

use ta_common::diagnostics::messages;
use ta_model::builder::Builder;
use ta_model::{Instance, Stmt, System, Template, TypeId};

fn has_diagnostic(system: &System, id: &str) -> bool {
    system.diagnostics.diagnostics().iter().any(|d| d.id == id)
}

#[test]
fn function_missing_return_statement_is_reported() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let locals = b.new_frame(None);
    let body = b.block(locals, vec![]);
    let symbol = {
        let f = b.new_frame(None);
        b.declare(f, "f", TypeId::VOID)
    };

    let params_frame = b.new_frame(None);
    system.push_function(ta_model::Function {
        symbol,
        params_frame,
        locals_frame: locals,
        return_type: TypeId::INT,
        body,
        changes: FxHashSet::default(),
        depends: FxHashSet::default(),
        position: ta_common::Position::synthetic(),
    });

    assert!(!ta_checker::check_system(&mut system));
    assert!(has_diagnostic(&system, messages::MISSING_RETURN_STATEMENT.id));
}

#[test]
fn function_with_unconditional_return_is_accepted() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let locals = b.new_frame(None);
    let value = b.int_lit(0);
    let ret = b.stmt(Stmt::Return(Some(value)));
    let body = b.block(locals, vec![ret]);
    let symbol = {
        let f = b.new_frame(None);
        b.declare(f, "f", TypeId::VOID)
    };

    let params_frame = b.new_frame(None);
    system.push_function(ta_model::Function {
        symbol,
        params_frame,
        locals_frame: locals,
        return_type: TypeId::INT,
        body,
        changes: FxHashSet::default(),
        depends: FxHashSet::default(),
        position: ta_common::Position::synthetic(),
    });

    assert!(ta_checker::check_system(&mut system));
    assert!(!has_diagnostic(&system, messages::MISSING_RETURN_STATEMENT.id));
}

#[test]
fn instance_argument_count_mismatch_is_reported() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let params_frame = b.new_frame(None);
    b.declare(params_frame, "p", TypeId::INT);

    let scope = b.new_frame(None);
    let template_symbol = b.declare(scope, "Tmpl", TypeId::PROCESS);
    let template_id = system.push_template(Template::new(template_symbol, params_frame));

    let instance_symbol = b.declare(scope, "inst", TypeId::PROCESS);
    system.push_instance(Instance {
        symbol: instance_symbol,
        template: template_id,
        args: vec![],
        position: ta_common::Position::synthetic(),
    });

    assert!(!ta_checker::check_system(&mut system));
    assert!(has_diagnostic(&system, messages::INCOMPATIBLE_ARGUMENT.id));
}
