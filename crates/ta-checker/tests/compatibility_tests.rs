//! Unit tests for §4.2's `CompatibilityOracle` functions, called directly
//! rather than through `check_system` so each rule can be pinned down in
//! isolation.

use ta_model::builder::Builder;
use ta_model::types::TypeKind;
use ta_model::{System, TypeId};

#[test]
fn clock_initialiser_accepts_double_and_rejects_int_and_cost() {
    let system = System::new();

    assert!(ta_checker::compatibility::are_assignment_compatible(
        &system.types,
        &system.exprs,
        TypeId::CLOCK,
        TypeId::DOUBLE,
        true,
    ));
    assert!(!ta_checker::compatibility::are_assignment_compatible(
        &system.types,
        &system.exprs,
        TypeId::CLOCK,
        TypeId::INT,
        true,
    ));
    assert!(!ta_checker::compatibility::are_assignment_compatible(
        &system.types,
        &system.exprs,
        TypeId::CLOCK,
        TypeId::COST,
        true,
    ));
}

#[test]
fn clock_assignment_outside_init_accepts_any_number() {
    let system = System::new();

    assert!(ta_checker::compatibility::are_assignment_compatible(
        &system.types,
        &system.exprs,
        TypeId::CLOCK,
        TypeId::INT,
        false,
    ));
    assert!(ta_checker::compatibility::are_assignment_compatible(
        &system.types,
        &system.exprs,
        TypeId::CLOCK,
        TypeId::DOUBLE,
        false,
    ));
    assert!(ta_checker::compatibility::are_assignment_compatible(
        &system.types,
        &system.exprs,
        TypeId::CLOCK,
        TypeId::COST,
        false,
    ));
}

#[test]
fn channel_capability_orders_urgent_below_broadcast_below_plain() {
    let mut system = System::new();
    let plain = system.types.create_primitive(TypeKind::Channel);
    let broadcast = system.types.create_wrapper(TypeKind::Broadcast, plain);
    let urgent = system.types.create_wrapper(TypeKind::Urgent, plain);

    let cap_plain = ta_checker::compatibility::channel_capability(&system.types, plain);
    let cap_broadcast = ta_checker::compatibility::channel_capability(&system.types, broadcast);
    let cap_urgent = ta_checker::compatibility::channel_capability(&system.types, urgent);

    assert!(cap_urgent < cap_broadcast);
    assert!(cap_broadcast < cap_plain);
}

#[test]
fn parameter_compatible_requires_modifiable_lvalue_for_non_const_ref_param() {
    let mut system = System::new();
    let mut b = Builder::new(&mut system);
    let scope = b.new_frame(None);

    let var_sym = b.declare(scope, "v", TypeId::INT);
    let var_ref = b.ident(var_sym);
    system.exprs.get(var_ref).set_type(TypeId::INT);

    let five = b.int_lit(5);

    let int_ty = TypeId::INT;
    let ref_int_ty = system.types.create_wrapper(TypeKind::Ref, int_ty);

    assert!(ta_checker::compatibility::is_parameter_compatible(&system, ref_int_ty, var_ref));
    assert!(!ta_checker::compatibility::is_parameter_compatible(&system, ref_int_ty, five));
    assert!(ta_checker::compatibility::is_parameter_compatible(&system, int_ty, five));
}

#[test]
fn unique_reference_requires_compile_time_computable_array_indices() {
    let mut system = System::new();
    let const_int = system.types.create_wrapper(TypeKind::Const, TypeId::INT);
    let array_ty = system.types.create_array(const_int, TypeId::INT);

    let mut b = Builder::new(&mut system);
    let scope = b.new_frame(None);
    let const_sym = b.declare(scope, "n", const_int);
    let runtime_sym = b.declare(scope, "m", TypeId::INT);
    let array_sym = b.declare(scope, "a", array_ty);

    let array_ref_for_const = b.ident(array_sym);
    let const_ref = b.ident(const_sym);
    system.exprs.get(const_ref).set_type(const_int);

    let array_ref_for_runtime = b.ident(array_sym);
    let runtime_ref = b.ident(runtime_sym);
    system.exprs.get(runtime_ref).set_type(TypeId::INT);

    system.compile_time_symbols.insert(const_sym);

    let index_by_const = b.array_index(array_ref_for_const, const_ref);
    let index_by_runtime = b.array_index(array_ref_for_runtime, runtime_ref);

    assert!(ta_checker::compatibility::is_unique_reference(&system, index_by_const));
    assert!(!ta_checker::compatibility::is_unique_reference(&system, index_by_runtime));
}
