//! Integration test for the record-initialiser reordering mandated by
//! invariant 2 / Open Question (c): fields are matched by name and the
//! accepted form always has exactly `|T.fields|` children in declared
//! field order (P5).

use ta_model::builder::Builder;
use ta_model::{System, TypeId, Variable};

#[test]
fn record_initialiser_with_out_of_order_named_fields_is_reordered() {
    let mut system = System::new();

    let record_ty = system.types.create_record(vec!["x".into(), "y".into()], vec![TypeId::INT, TypeId::INT]);

    let mut b = Builder::new(&mut system);
    let scope = b.new_frame(None);
    let one = b.int_lit(1);
    let two = b.int_lit(2);
    let y_init = b.field_init("y", one);
    let x_init = b.field_init("x", two);
    let record_lit = b.record_literal(vec![y_init, x_init]);
    let symbol = b.declare(scope, "v", record_ty);

    system.push_variable(Variable {
        symbol,
        declared_type: record_ty,
        initialiser: Some(record_lit),
        position: ta_common::Position::synthetic(),
    });

    assert!(ta_checker::check_system(&mut system));
    assert!(system.diagnostics.diagnostics().iter().all(|d| !d.is_error()));

    let reordered = system.exprs.get(record_lit).children.clone();
    assert_eq!(reordered, vec![two, one]);
}
