//! Expression nodes: a closed `kind` tag, an ordered list of children, and
//! the single mutable field the checker is allowed to touch -- the attached
//! type.

use std::cell::Cell;

use ta_common::Position;

use crate::symbol::SymbolId;
use crate::types::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Pow,
    Fabs,
    Abs,
    Fint,
    Ilogb,
    Fpclassify,
    IsNan,
    IsInf,
    IsFinite,
    Random,
}

impl MathFunction {
    /// Number of arguments the builder is expected to have attached.
    #[must_use]
    pub fn arity(self) -> usize {
        matches!(self, MathFunction::Atan2 | MathFunction::Pow).then_some(2).unwrap_or(1)
    }

    /// True for the handful of math functions that take/return integers
    /// rather than doubles (`abs`, `fpclassify`, `ilogb`, `fint`).
    #[must_use]
    pub fn is_integral_result(self) -> bool {
        matches!(self, MathFunction::Fint | MathFunction::Ilogb | MathFunction::Fpclassify)
    }

    #[must_use]
    pub fn is_boolean_result(self) -> bool {
        matches!(self, MathFunction::IsNan | MathFunction::IsInf | MathFunction::IsFinite)
    }

    /// `abs` alone accepts (and preserves) an integer argument; every other
    /// math function demands a `number` argument.
    #[must_use]
    pub fn accepts_integer_argument(self) -> bool {
        matches!(self, MathFunction::Abs | MathFunction::Fpclassify)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    IntLiteral,
    DoubleLiteral,
    BoolLiteral,
    Identifier,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Min,
    Max,

    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Not,
    Neg,
    UnaryPlus,

    Assign,
    PlusAssign,
    MinusAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,

    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,

    InlineIf,
    Comma,

    Call,
    ArrayIndex,
    Dot,

    Rate,
    Fraction,
    MathCall(MathFunction),

    /// `{ e0, e1, ... }` as an array or record initialiser. Children are
    /// `FieldInit` nodes (named) or plain expressions (positional); never
    /// type-checked through the operator algebra -- `checkInitialiser`
    /// walks these directly against the declared type.
    ArrayLiteral,
    RecordLiteral,
    /// One element of an `ArrayLiteral`/`RecordLiteral`. `value` holds the
    /// field name (`Value::Str`) for a named entry, `None` for positional.
    /// The single child is the initialising expression.
    FieldInit,

    /// Bound variable lives in `Expr::symbol`; the single child is the body.
    Forall,
    Exists,
    Sum,

    Spawn,
    Numof,
    Exit,
    Deadlock,

    // --- temporal / statistical property constructors ---
    Af,
    Ag,
    Ef,
    Eg,
    Leadsto,
    Scenario,
    AUntil,
    AWeakUntil,
    ABuchi,
    Control,
    ControlTopt,
    PoControl,
    Pmax,
    SupVar,
    InfVar,
    SmcControl,
    Probabox,
    Probadiamond,
    Probaminbox,
    Probamindiamond,
    Probacmp,
    Probaexp,
    Simulate,
    SimulateReach,
    TioComposition,
    TioConjunction,
    TioRefinement,
    TioQuotient,
    TioConsistency,
    TioSpecification,
    TioImplementation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Double(f64),
    Bool(bool),
    Str(String),
}

/// An AST node. Structurally immutable except for `ty` (set by
/// `checkExpression`) and, for record literals, the reordering performed by
/// `checkInitialiser` (which rewrites `children` in place).
#[derive(Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub children: Vec<ExprId>,
    /// Resolved symbol for identifiers, call targets and quantifier bound
    /// variables.
    pub symbol: Option<SymbolId>,
    pub value: Option<Value>,
    pub position: Position,
    ty: Cell<TypeId>,
    /// Set once `checkExpression` has visited this node; used to
    /// short-circuit parents of a failed child without re-walking it.
    failed: Cell<bool>,
}

impl Expr {
    #[must_use]
    pub fn new(kind: ExprKind, children: Vec<ExprId>, position: Position) -> Self {
        Self {
            kind,
            children,
            symbol: None,
            value: None,
            position,
            ty: Cell::new(TypeId::UNKNOWN),
            failed: Cell::new(false),
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn get_type(&self) -> TypeId {
        self.ty.get()
    }

    pub fn set_type(&self, ty: TypeId) {
        self.ty.set(ty);
    }

    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failed.get()
    }

    pub fn mark_failed(&self) {
        self.failed.set(true);
    }
}

/// Owns every expression node for one system.
#[derive(Debug, Default)]
pub struct ExprArena {
    nodes: Vec<Expr>,
}

impl ExprArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(u32::try_from(self.nodes.len()).expect("expr arena overflow"));
        self.nodes.push(expr);
        id
    }

    #[must_use]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id.0 as usize]
    }

    /// Overwrites the children list in declared-field order. Used only by
    /// `checkInitialiser` when reordering a record literal.
    pub fn set_children(&mut self, id: ExprId, children: Vec<ExprId>) {
        self.nodes[id.0 as usize].children = children;
    }

    #[must_use]
    pub fn children(&self, id: ExprId) -> &[ExprId] {
        &self.nodes[id.0 as usize].children
    }
}
