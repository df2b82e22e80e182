//! The verbatim diagnostic identifier/message catalogue.
//!
//! These identifiers are a public contract (see the external-interfaces
//! section of the design docs): downstream localisation and golden tests
//! match on `id`, never on `template`, so `id` must never be renamed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub id: &'static str,
    pub template: &'static str,
}

macro_rules! messages {
    ($( $name:ident => ($id:literal, $template:literal) ),* $(,)?) => {
        $(
            pub const $name: DiagnosticMessage = DiagnosticMessage { id: $id, template: $template };
        )*
    };
}

messages! {
    // Type-shape
    INTEGER_EXPECTED => ("Integer_expected", "Integer expected"),
    BOOLEAN_EXPECTED => ("Boolean_expected", "Boolean expected"),
    NUMBER_EXPECTED => ("Number_expected", "Number expected"),
    CHANNEL_EXPECTED => ("Channel_expected", "Channel expected"),
    CLOCK_EXPECTED => ("Clock_expected", "Clock expected"),
    INCOMPATIBLE_TYPE => ("Incompatible_type", "Incompatible type"),
    TYPE_ERROR => ("Type_error", "Type error"),

    // Prefix / declaration well-formedness
    PREFIX_URGENT_ONLY_ALLOWED_FOR_LOCATIONS_AND_CHANNELS =>
        ("Prefix_urgent_only_allowed_for_locations_and_channels",
         "Prefix urgent only allowed for locations and channels"),
    PREFIX_BROADCAST_ONLY_ALLOWED_FOR_CHANNELS =>
        ("Prefix_broadcast_only_allowed_for_channels",
         "Prefix broadcast only allowed for channels"),
    PREFIX_COMMITTED_ONLY_ALLOWED_FOR_LOCATIONS =>
        ("Prefix_committed_only_allowed_for_locations",
         "Prefix committed only allowed for locations"),
    PREFIX_HYBRID_ONLY_ALLOWED_FOR_CLOCKS =>
        ("Prefix_hybrid_only_allowed_for_clocks", "Prefix hybrid only allowed for clocks"),
    PREFIX_CONST_NOT_ALLOWED_FOR_CLOCKS =>
        ("Prefix_const_not_allowed_for_clocks", "Prefix const not allowed for clocks"),
    PREFIX_META_NOT_ALLOWED_FOR_CLOCKS =>
        ("Prefix_meta_not_allowed_for_clocks", "Prefix meta not allowed for clocks"),
    REFERENCE_TO_THIS_TYPE_NOT_ALLOWED =>
        ("Reference_to_this_type_not_allowed", "Reference to this type not allowed"),
    INVALID_ARRAY_SIZE => ("Invalid_array_size", "Invalid array size"),
    TYPE_CANNOT_BE_DECLARED_INSIDE_A_STRUCT =>
        ("This_type_cannot_be_declared_inside_a_struct",
         "This type cannot be declared inside a struct"),
    CANNOT_BE_DECLARED_CONST_OR_META =>
        ("Cannot_be_declared_const_or_meta", "Cannot be declared const or meta"),

    // Side effects -- {0} is the entity name, e.g. "Guard", "Invariant"
    MUST_BE_SIDE_EFFECT_FREE => ("_0_must_be_side_effect_free", "{0} must be side-effect free"),

    // Compile-time
    MUST_BE_COMPUTABLE_AT_COMPILE_TIME =>
        ("Must_be_computable_at_compile_time", "Must be computable at compile time"),

    // Assignment / lvalue
    LEFT_HAND_SIDE_VALUE_EXPECTED =>
        ("Left_hand_side_value_expected", "Left hand side value expected"),
    INVALID_ASSIGNMENT_EXPRESSION =>
        ("Invalid_assignment_expression", "Invalid assignment expression"),
    INCOMPATIBLE_ARGUMENT => ("Incompatible_argument", "Incompatible argument"),
    INCOMPATIBLE_ARGUMENTS_TO_INLINE_IF =>
        ("Incompatible_arguments_to_inline_if", "Incompatible arguments to inline if"),
    MISSING_RETURN_STATEMENT =>
        ("Missing_return_statement", "Missing return statement"),

    // Initializers
    FIELD_NAME_NOT_ALLOWED_IN_ARRAY_INITIALISER =>
        ("Field_name_not_allowed_in_array_initialiser",
         "Field name not allowed in array initialiser"),
    UNKNOWN_FIELD => ("Unknown_field", "Unknown field"),
    TOO_MANY_ELEMENTS_IN_INITIALISER =>
        ("Too_many_elements_in_initialiser", "Too many elements in initialiser"),
    MULTIPLE_INITIALISERS_FOR_FIELD =>
        ("Multiple_initialisers_for_field", "Multiple initialisers for field"),
    INCOMPLETE_INITIALISER => ("Incomplete_initialiser", "Incomplete initialiser"),
    INVALID_INITIALISER => ("Invalid_initialiser", "Invalid initialiser"),

    // Property / game
    PROPERTY_MUST_BE_A_VALID_FORMULA =>
        ("Property_must_be_a_valid_formula", "Property must be a valid formula"),
    NESTING_OF_PATH_QUANTIFIERS_IS_NOT_ALLOWED =>
        ("Nesting_of_path_quantifiers_is_not_allowed",
         "Nesting of path quantifiers is not allowed"),
    CLOCK_LOWER_BOUND_MUST_BE_WEAK_AND_UPPER_BOUND_STRICT =>
        ("Clock_lower_bound_must_be_weak_and_upper_bound_strict",
         "Clock lower bound must be weak and upper bound strict"),
    CLOCK_DIFFERENCES_ARE_NOT_SUPPORTED =>
        ("Clock_differences_are_not_supported", "Clock differences are not supported"),
    COMPOSITION_OF_PROCESSES_EXPECTED =>
        ("Composition_of_processes_expected", "Composition of processes expected"),
    LIST_OF_CHANNELS_EXPECTED => ("List_of_channels_expected", "List of channels expected"),
    INVALID_RUN_COUNT => ("Invalid_run_count", "Invalid run count"),
    MITL_NOT_ALLOWED_HERE =>
        ("MITL_operators_are_not_allowed_inside_this_formula",
         "MITL operators are not allowed inside this formula"),

    // Dynamic templates
    ATTEMPT_TO_SPAWN_NON_DYNAMIC_TEMPLATE =>
        ("Appears_as_an_attempt_to_spawn_a_non_dynamic_template",
         "Appears as an attempt to spawn a non-dynamic template"),
    TEMPLATE_IS_ONLY_DECLARED_NOT_DEFINED =>
        ("Template_is_only_declared_not_defined", "Template is only declared - not defined"),
    NOT_A_DYNAMIC_TEMPLATE => ("Not_a_dynamic_template", "Not a dynamic template"),
    EXIT_ONLY_IN_DYNAMIC_TEMPLATES =>
        ("Exit_can_only_be_used_in_templates_declared_as_dynamic",
         "Exit can only be used in templates declared as dynamic"),
    DYNAMIC_CONSTRUCTS_ONLY_ALLOWED_ON_EDGES =>
        ("Dynamic_constructs_are_only_allowed_on_edges",
         "Dynamic constructs are only allowed on edges"),

    // Sync usage
    ASSUMED_IO_BUT_FOUND_CSP =>
        ("Assumed_IO_but_found_CSP_synchronization", "Assumed IO but found CSP synchronization"),
    ASSUMED_CSP_BUT_FOUND_IO =>
        ("Assumed_CSP_but_found_IO_synchronization", "Assumed CSP but found IO synchronization"),
    CSP_AND_IO_CANNOT_BE_MIXED =>
        ("CSP_and_IO_synchronisations_cannot_be_mixed",
         "CSP and IO synchronisations cannot be mixed"),

    // Warnings
    EXPRESSION_DOES_NOT_HAVE_ANY_EFFECT =>
        ("Expression_does_not_have_any_effect", "Expression does not have any effect"),
    CLOCK_GUARDS_NOT_ALLOWED_ON_URGENT_EDGES =>
        ("Clock_guards_are_not_allowed_on_urgent_edges",
         "Clock guards are not allowed on urgent edges"),
    STRICT_BOUNDS_ON_URGENT_EDGES =>
        ("Strict_bounds_on_urgent_edges_may_not_make_sense",
         "Strict bounds on urgent edges may not make sense"),
    OUTPUTS_SHOULD_BE_UNCONTROLLABLE =>
        ("Outputs_should_be_uncontrollable_for_refinement_checking",
         "Outputs should be uncontrollable for refinement checking"),
    INPUTS_SHOULD_BE_CONTROLLABLE =>
        ("Inputs_should_be_controllable_for_refinement_checking",
         "Inputs should be controllable for refinement checking"),
    STRICT_INVARIANT => ("Strict_invariant", "Strict invariant"),
    SMC_REQUIRES_DETERMINISTIC_INPUT_EDGES =>
        ("SMC_requires_input_edges_to_be_deterministic",
         "SMC requires input edges to be deterministic"),

    // Clock guard vs broadcast receiver (accepted, but noted)
    CLOCK_GUARD_ON_BROADCAST_RECEIVER =>
        ("Clock_guard_on_broadcast_receiver", "Clock guard on broadcast receiver edge"),

    // Rate decomposition
    ONLY_ONE_COST_RATE_IS_ALLOWED =>
        ("Only_one_cost_rate_is_allowed", "Only one cost rate is allowed"),
    STOPWATCH_PRESENT => ("Stopwatch_present", "Model has a stopwatch"),
}
