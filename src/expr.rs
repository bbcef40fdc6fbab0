use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Unsignedbv(usize),
    Signedbv(usize),
    Bitvector(usize),
    // No fixed bit encoding
    Integer,
    Natural,
    Empty,
    /// Reference to a type declared in a [`crate::namespace::Namespace`].
    Named(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Symbol(String),
    NextSymbol(String),
    Constant(i128),
    True,
    False,
    Nil,

    // Boolean connectives
    Not,
    And,
    Or,
    Xor,
    Implies,
    Equal,
    NotEqual,
    IfThenElse,

    // Bitwise/arith
    BitNot,
    BitAnd,
    BitOr,
    BitXor,
    Plus,
    Minus,
    UnaryMinus,
    Mult,

    // Relations (width 1 result)
    Lt,
    Le,
    Gt,
    Ge,

    // Structural
    Extractbit,
    Extractbits,
    Concatenation,
    Typecast,

    // Temporal (SVA)
    OverlappedImplication,
    NonOverlappedImplication,
    SvaCycleDelay,
    SvaSequenceConcatenation,
}

impl ExprKind {
    pub fn id(&self) -> &'static str {
        match self {
            ExprKind::Symbol(_) => "symbol",
            ExprKind::NextSymbol(_) => "next_symbol",
            ExprKind::Constant(_) => "constant",
            ExprKind::True => "true",
            ExprKind::False => "false",
            ExprKind::Nil => "nil",
            ExprKind::Not => "not",
            ExprKind::And => "and",
            ExprKind::Or => "or",
            ExprKind::Xor => "xor",
            ExprKind::Implies => "=>",
            ExprKind::Equal => "=",
            ExprKind::NotEqual => "notequal",
            ExprKind::IfThenElse => "if",
            ExprKind::BitNot => "bitnot",
            ExprKind::BitAnd => "bitand",
            ExprKind::BitOr => "bitor",
            ExprKind::BitXor => "bitxor",
            ExprKind::Plus => "+",
            ExprKind::Minus => "-",
            ExprKind::UnaryMinus => "unary-",
            ExprKind::Mult => "*",
            ExprKind::Lt => "<",
            ExprKind::Le => "<=",
            ExprKind::Gt => ">",
            ExprKind::Ge => ">=",
            ExprKind::Extractbit => "extractbit",
            ExprKind::Extractbits => "extractbits",
            ExprKind::Concatenation => "concatenation",
            ExprKind::Typecast => "typecast",
            ExprKind::OverlappedImplication => "overlapped_implication",
            ExprKind::NonOverlappedImplication => "non_overlapped_implication",
            ExprKind::SvaCycleDelay => "sva_cycle_delay",
            ExprKind::SvaSequenceConcatenation => "sva_sequence_concatenation",
        }
    }
}

/// Expression tree node.
///
/// The operand count is not tied to the kind; consumers check arity
/// themselves and treat unexpected shapes as opaque.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
    pub operands: Vec<Expr>,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type, operands: Vec<Expr>) -> Self {
        Self { kind, ty, operands }
    }

    pub fn symbol(identifier: impl Into<String>, ty: Type) -> Self {
        Self::new(ExprKind::Symbol(identifier.into()), ty, Vec::new())
    }

    pub fn next_symbol(identifier: impl Into<String>, ty: Type) -> Self {
        Self::new(ExprKind::NextSymbol(identifier.into()), ty, Vec::new())
    }

    pub fn constant(value: i128, ty: Type) -> Self {
        Self::new(ExprKind::Constant(value), ty, Vec::new())
    }

    pub fn integer(value: i128) -> Self {
        Self::constant(value, Type::Integer)
    }

    pub fn bool_const(value: bool) -> Self {
        let kind = if value { ExprKind::True } else { ExprKind::False };
        Self::new(kind, Type::Bool, Vec::new())
    }

    pub fn nil() -> Self {
        Self::new(ExprKind::Nil, Type::Empty, Vec::new())
    }

    pub fn not(op: Expr) -> Self {
        Self::new(ExprKind::Not, Type::Bool, vec![op])
    }

    pub fn and(operands: Vec<Expr>) -> Self {
        Self::new(ExprKind::And, Type::Bool, operands)
    }

    pub fn or(operands: Vec<Expr>) -> Self {
        Self::new(ExprKind::Or, Type::Bool, operands)
    }

    pub fn implies(lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::Implies, Type::Bool, vec![lhs, rhs])
    }

    pub fn equal(lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::Equal, Type::Bool, vec![lhs, rhs])
    }

    /// Binary operator whose result has the type of its first operand.
    pub fn binary(kind: ExprKind, lhs: Expr, rhs: Expr) -> Self {
        let ty = lhs.ty.clone();
        Self::new(kind, ty, vec![lhs, rhs])
    }

    pub fn overlapped_implication(lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::OverlappedImplication, Type::Bool, vec![lhs, rhs])
    }

    pub fn non_overlapped_implication(lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::NonOverlappedImplication, Type::Bool, vec![lhs, rhs])
    }

    /// `##from body` when `to` is `None`, `##[from:to) body` otherwise.
    pub fn cycle_delay(from: Expr, to: Option<Expr>, body: Expr) -> Self {
        let to = to.unwrap_or_else(Expr::nil);
        Self::new(ExprKind::SvaCycleDelay, Type::Bool, vec![from, to, body])
    }

    pub fn sequence_concatenation(lhs: Expr, rhs: Expr) -> Self {
        Self::new(
            ExprKind::SvaSequenceConcatenation,
            Type::Bool,
            vec![lhs, rhs],
        )
    }

    pub fn is_nil(&self) -> bool {
        self.kind == ExprKind::Nil
    }

    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Symbol(id) | ExprKind::NextSymbol(id) => Some(id),
            _ => None,
        }
    }

    /// Integer value of a constant expression.
    pub fn to_integer(&self) -> Option<i128> {
        match self.kind {
            ExprKind::Constant(v) => Some(v),
            ExprKind::True => Some(1),
            ExprKind::False => Some(0),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Symbol(id) => write!(f, "{}", id),
            ExprKind::NextSymbol(id) => write!(f, "next({})", id),
            ExprKind::Constant(v) => write!(f, "{}", v),
            kind if self.operands.is_empty() => write!(f, "{}", kind.id()),
            kind => {
                write!(f, "({}", kind.id())?;
                for op in &self.operands {
                    write!(f, " {}", op)?;
                }
                write!(f, ")")
            }
        }
    }
}
