use std::fmt::Write as _;
use std::ops::Not;

/// Propositional literal.
/// The first field is the zero-based variable index, the second is the polarity (true = positive).
/// Variable 0 is reserved for the constant true.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(pub usize, pub bool);

impl Literal {
    pub const TRUE: Literal = Literal(0, true);
    pub const FALSE: Literal = Literal(0, false);

    pub fn var(self) -> usize {
        self.0
    }

    pub fn sign(self) -> bool {
        self.1
    }

    pub fn is_true(self) -> bool {
        self == Self::TRUE
    }

    pub fn is_false(self) -> bool {
        self == Self::FALSE
    }

    pub fn is_constant(self) -> bool {
        self.0 == 0
    }

    /// DIMACS form: variables are 1-based, negative for negated literals.
    pub fn to_dimacs(self) -> i64 {
        let v = self.0 as i64 + 1;
        if self.1 {
            v
        } else {
            -v
        }
    }

    /// Value of the literal under a model indexed by variable.
    pub fn eval(self, model: &[bool]) -> bool {
        let v = model.get(self.0).copied().unwrap_or(false);
        v == self.1
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal(self.0, !self.1)
    }
}

/// Bits of one bitvector, least significant first.
pub type Bv = Vec<Literal>;

/// A simple CNF container holding clauses and the number of allocated variables.
#[derive(Clone, Debug, Default)]
pub struct Cnf {
    pub clauses: Vec<Vec<Literal>>,
    pub num_vars: usize,
}

impl Cnf {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            num_vars: 0,
        }
    }

    pub fn add_clause<I>(&mut self, clause: I)
    where
        I: IntoIterator<Item = Literal>,
    {
        self.clauses.push(clause.into_iter().collect());
    }

    pub fn new_var(&mut self) -> usize {
        let idx = self.num_vars;
        self.num_vars += 1;
        idx
    }

    pub fn to_dimacs(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "p cnf {} {}", self.num_vars, self.clauses.len());
        for clause in &self.clauses {
            for lit in clause {
                let _ = write!(out, "{} ", lit.to_dimacs());
            }
            out.push_str("0\n");
        }
        out
    }
}
