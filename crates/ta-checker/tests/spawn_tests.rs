//! Integration test for `spawn` against a dynamic template that has been
//! declared but never given a defining location -- scenario 7.

use ta_common::diagnostics::messages;
use ta_model::builder::Builder;
use ta_model::{Expr, ExprKind, Query, System, Template, TypeId, UserData};

fn has_diagnostic(system: &System, id: &str) -> bool {
    system.diagnostics.diagnostics().iter().any(|d| d.id == id)
}

#[test]
fn spawning_a_declared_but_undefined_template_is_rejected() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let params_frame = b.new_frame(None);
    let template_symbol = b.declare_with(scope, "T", TypeId::PROCESS, UserData::Template(ta_model::TemplateId(0)));

    let one = b.int_lit(1);
    let two = b.int_lit(2);

    let mut template = Template::new(template_symbol, params_frame);
    template.is_dynamic = true;
    template.is_defined = false;
    system.push_template(template);

    let spawn = system
        .exprs
        .alloc(Expr::new(ExprKind::Spawn, vec![one, two], ta_common::Position::synthetic()).with_symbol(template_symbol));

    system.push_query(Query { expression: spawn, position: ta_common::Position::synthetic() });

    assert!(!ta_checker::check_system(&mut system));
    assert!(has_diagnostic(&system, messages::TEMPLATE_IS_ONLY_DECLARED_NOT_DEFINED.id));
}
