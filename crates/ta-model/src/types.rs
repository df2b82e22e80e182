//! The `Type` algebra: a tree with a root kind drawn from a closed set and
//! zero or more subtypes, interned in a [`TypeArena`].
//!
//! Kinds fall into four families (see the system overview): primitives,
//! constructors, prefixes and semantic categories. Prefixes are transparent
//! to most predicates -- `unwrap_prefixes` is the one place that peels them.

use crate::expr::ExprId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const UNKNOWN: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const DOUBLE: TypeId = TypeId(3);
    pub const CLOCK: TypeId = TypeId(4);
    pub const COST: TypeId = TypeId(5);
    pub const VOID: TypeId = TypeId(6);
    pub const DIFF: TypeId = TypeId(7);
    pub const FRACTION: TypeId = TypeId(8);
    pub const RATE: TypeId = TypeId(9);
    pub const PROCESS: TypeId = TypeId(10);
    pub const PROCESSVAR: TypeId = TypeId(11);
    pub const TIOGRAPH: TypeId = TypeId(12);
    pub const DOUBLE_INV_GUARD: TypeId = TypeId(13);
    pub const CHANNEL: TypeId = TypeId(14);
    pub const FORMULA: TypeId = TypeId(15);
    pub const PROBABILITY: TypeId = TypeId(16);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    // --- primitives ---
    Int,
    Bool,
    Double,
    Clock,
    Cost,
    Scalar,
    Void,
    Channel,
    Fraction,
    Rate,
    Diff,
    Process,
    ProcessVar,
    TioGraph,
    DoubleInvGuard,
    Unknown,

    // --- constructors ---
    Array,
    Record,
    Range,
    Label,
    List,

    // --- prefixes (wrap exactly one subtype) ---
    Urgent,
    Broadcast,
    Committed,
    Hybrid,
    Const,
    SystemMeta,
    Ref,

    // --- semantic categories (wrap exactly one subtype: the boolean base) ---
    Guard,
    Invariant,
    InvariantWithRate,
    Constraint,
    Formula,
    Probability,
}

/// A node in the type tree. Cheap to clone; interned by [`TypeArena`] so
/// structurally-equal types should share storage where the builder permits,
/// though the checker never assumes physical identity -- see
/// `CompatibilityOracle::are_equivalent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    /// Prefixes and semantic categories: exactly one entry (the wrapped type).
    /// Array: `[size_type, element_type]`. Record: one entry per field.
    /// List: one entry per element.
    pub subs: Vec<TypeId>,
    /// Record: field count. Otherwise unused (kept for parity with the
    /// source data model, which also uses `size` for function arity).
    pub size: u32,
    /// Record field names, in declaration order. Scalar type: the scalar
    /// set's name (single entry).
    pub labels: Vec<String>,
    /// Range bound expressions, present only on `Range` types.
    pub range: Option<(ExprId, ExprId)>,
}

impl Type {
    fn leaf(kind: TypeKind) -> Self {
        Self { kind, subs: Vec::new(), size: 0, labels: Vec::new(), range: None }
    }
}

/// Owns every `Type` ever constructed for one system. The builder (out of
/// scope for this core) and the checker's own rewrite rules (rate
/// decomposition) both allocate through this arena.
pub struct TypeArena {
    types: Vec<Type>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    #[must_use]
    pub fn new() -> Self {
        let mut types = Vec::with_capacity(32);
        types.push(Type::leaf(TypeKind::Unknown)); // TypeId::UNKNOWN
        types.push(Type::leaf(TypeKind::Int)); // INT
        types.push(Type::leaf(TypeKind::Bool)); // BOOL
        types.push(Type::leaf(TypeKind::Double)); // DOUBLE
        types.push(Type::leaf(TypeKind::Clock)); // CLOCK
        types.push(Type::leaf(TypeKind::Cost)); // COST
        types.push(Type::leaf(TypeKind::Void)); // VOID
        types.push(Type::leaf(TypeKind::Diff)); // DIFF
        types.push(Type::leaf(TypeKind::Fraction)); // FRACTION
        types.push(Type::leaf(TypeKind::Rate)); // RATE
        types.push(Type::leaf(TypeKind::Process)); // PROCESS
        types.push(Type::leaf(TypeKind::ProcessVar)); // PROCESSVAR
        types.push(Type::leaf(TypeKind::TioGraph)); // TIOGRAPH
        types.push(Type::leaf(TypeKind::DoubleInvGuard)); // DOUBLE_INV_GUARD
        types.push(Type::leaf(TypeKind::Channel)); // CHANNEL (plain, capability 2)
        types.push(Type::leaf(TypeKind::Formula)); // FORMULA (for opaque formula results)
        types.push(Type::leaf(TypeKind::Probability)); // PROBABILITY
        Self { types }
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(u32::try_from(self.types.len()).expect("type arena overflow"));
        self.types.push(ty);
        id
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0 as usize]
    }

    pub fn create_primitive(&mut self, kind: TypeKind) -> TypeId {
        self.push(Type::leaf(kind))
    }

    pub fn create_scalar(&mut self, name: impl Into<String>) -> TypeId {
        self.push(Type { kind: TypeKind::Scalar, labels: vec![name.into()], ..Type::leaf(TypeKind::Scalar) })
    }

    /// Wraps `sub` in a single-child node: a prefix or a semantic category.
    pub fn create_wrapper(&mut self, kind: TypeKind, sub: TypeId) -> TypeId {
        self.push(Type { kind, subs: vec![sub], ..Type::leaf(kind) })
    }

    pub fn create_range(&mut self, lower: ExprId, upper: ExprId) -> TypeId {
        self.push(Type { kind: TypeKind::Range, range: Some((lower, upper)), ..Type::leaf(TypeKind::Range) })
    }

    /// A bounded integer, e.g. `int[0,10]`. Unlike `create_range` (which
    /// produces the array-dimension pseudo-type), this is a full `Int`
    /// type that `TypePredicates::is_integral` and friends recognise
    /// directly; only `areEquivalent` inspects the attached range.
    pub fn create_ranged_int(&mut self, lower: ExprId, upper: ExprId) -> TypeId {
        self.push(Type { kind: TypeKind::Int, range: Some((lower, upper)), ..Type::leaf(TypeKind::Int) })
    }

    pub fn create_array(&mut self, size: TypeId, elem: TypeId) -> TypeId {
        self.push(Type { kind: TypeKind::Array, subs: vec![size, elem], ..Type::leaf(TypeKind::Array) })
    }

    pub fn create_record(&mut self, labels: Vec<String>, fields: Vec<TypeId>) -> TypeId {
        let size = u32::try_from(fields.len()).unwrap_or(u32::MAX);
        self.push(Type { kind: TypeKind::Record, size, labels, subs: fields, range: None })
    }

    pub fn create_label(&mut self, name: impl Into<String>, sub: TypeId) -> TypeId {
        self.push(Type { kind: TypeKind::Label, labels: vec![name.into()], subs: vec![sub], ..Type::leaf(TypeKind::Label) })
    }

    pub fn create_list(&mut self, elems: Vec<TypeId>) -> TypeId {
        self.push(Type { kind: TypeKind::List, subs: elems, ..Type::leaf(TypeKind::List) })
    }
}

/// Strips `Label`, prefix and (optionally, via a caller loop) semantic-category
/// wrappers to reach the underlying shape. Most shape predicates want this;
/// `is_guard`/`is_invariant`/etc. instead look for the category directly.
#[must_use]
pub fn unwrap_prefixes(arena: &TypeArena, mut id: TypeId) -> TypeId {
    loop {
        let t = arena.get(id);
        match t.kind {
            TypeKind::Urgent
            | TypeKind::Broadcast
            | TypeKind::Committed
            | TypeKind::Hybrid
            | TypeKind::Const
            | TypeKind::SystemMeta
            | TypeKind::Ref
            | TypeKind::Label => id = t.subs[0],
            _ => return id,
        }
    }
}

/// Like [`unwrap_prefixes`] but also peels the semantic-category wrappers
/// (guard/invariant/invariant-with-rate/constraint/formula/probability) to
/// reach the base boolean/numeric shape underneath.
#[must_use]
pub fn unwrap_all(arena: &TypeArena, mut id: TypeId) -> TypeId {
    loop {
        let t = arena.get(id);
        match t.kind {
            TypeKind::Urgent
            | TypeKind::Broadcast
            | TypeKind::Committed
            | TypeKind::Hybrid
            | TypeKind::Const
            | TypeKind::SystemMeta
            | TypeKind::Ref
            | TypeKind::Label
            | TypeKind::Guard
            | TypeKind::Invariant
            | TypeKind::InvariantWithRate
            | TypeKind::Constraint
            | TypeKind::Formula
            | TypeKind::Probability => id = t.subs[0],
            _ => return id,
        }
    }
}

#[must_use]
pub fn has_prefix(arena: &TypeArena, mut id: TypeId, kind: TypeKind) -> bool {
    loop {
        let t = arena.get(id);
        if t.kind == kind {
            return true;
        }
        match t.kind {
            TypeKind::Urgent
            | TypeKind::Broadcast
            | TypeKind::Committed
            | TypeKind::Hybrid
            | TypeKind::Const
            | TypeKind::SystemMeta
            | TypeKind::Ref => id = t.subs[0],
            _ => return false,
        }
    }
}
