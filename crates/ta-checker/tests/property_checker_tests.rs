//! Integration tests for §4.9's property checking: formula shape, the
//! path-quantifier nesting rule, MITL placement, and statistical-query
//! operand shape.

use ta_common::diagnostics::messages;
use ta_model::builder::Builder;
use ta_model::{Expr, ExprKind, Query, System, TypeId};

fn has_diagnostic(system: &System, id: &str) -> bool {
    system.diagnostics.diagnostics().iter().any(|d| d.id == id)
}

#[test]
fn plain_path_quantifier_over_a_comparison_is_accepted() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let x = b.declare(scope, "x", TypeId::INT);
    let ident = b.ident(x);
    let five = b.int_lit(5);
    let cmp = b.bin(ExprKind::Lt, ident, five);
    let query = b.un(ExprKind::Ag, cmp);

    system.push_query(Query { expression: query, position: ta_common::Position::synthetic() });

    assert!(ta_checker::check_system(&mut system));
    assert!(system.diagnostics.diagnostics().is_empty());
}

#[test]
fn nested_path_quantifiers_are_rejected() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let x = b.declare(scope, "x", TypeId::INT);
    let five = b.int_lit(5);
    let ident = b.ident(x);
    let cmp = b.bin(ExprKind::Lt, ident, five);
    let inner = b.un(ExprKind::Ef, cmp);
    let outer = b.un(ExprKind::Ag, inner);

    system.push_query(Query { expression: outer, position: ta_common::Position::synthetic() });

    assert!(!ta_checker::check_system(&mut system));
    assert!(has_diagnostic(&system, messages::NESTING_OF_PATH_QUANTIFIERS_IS_NOT_ALLOWED.id));
}

#[test]
fn mitl_operator_nested_under_a_plain_quantifier_is_rejected() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let x = b.declare(scope, "x", TypeId::INT);
    let five = b.int_lit(5);
    let two = b.int_lit(2);
    let lhs = {
        let ident = b.ident(x);
        b.bin(ExprKind::Lt, ident, five)
    };
    let rhs = {
        let ident = b.ident(x);
        b.bin(ExprKind::Gt, ident, two)
    };
    let leadsto = b.bin(ExprKind::Leadsto, lhs, rhs);
    let outer = b.un(ExprKind::Ag, leadsto);

    system.push_query(Query { expression: outer, position: ta_common::Position::synthetic() });

    assert!(!ta_checker::check_system(&mut system));
    assert!(has_diagnostic(&system, messages::MITL_NOT_ALLOWED_HERE.id));
}

#[test]
fn statistical_query_with_nonpositive_run_count_is_rejected() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);

    let scope = b.new_frame(None);
    let x = b.declare(scope, "x", TypeId::INT);
    let runs = b.int_lit(0);
    let bound = b.int_lit(10);
    let predicate = {
        let ident = b.ident(x);
        let five = b.int_lit(5);
        b.bin(ExprKind::Lt, ident, five)
    };

    let query = system.exprs.alloc(Expr::new(
        ExprKind::Probabox,
        vec![runs, bound, predicate],
        ta_common::Position::synthetic(),
    ));
    system.push_query(Query { expression: query, position: ta_common::Position::synthetic() });

    assert!(!ta_checker::check_system(&mut system));
    assert!(has_diagnostic(&system, messages::INVALID_RUN_COUNT.id));
}
