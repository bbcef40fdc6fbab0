pub mod cnf;
pub mod prop;
pub mod sat;

pub use cnf::{Bv, Cnf, Literal};
pub use prop::CnfProp;

/// Propositional gate construction.
///
/// Implementations must keep variable 0 pinned to true so that
/// [`Literal::TRUE`] and [`Literal::FALSE`] are usable as constants.
pub trait Prop {
    fn new_variable(&mut self) -> Literal;
    fn land(&mut self, a: Literal, b: Literal) -> Literal;
    fn lor(&mut self, a: Literal, b: Literal) -> Literal;
    fn lxor(&mut self, a: Literal, b: Literal) -> Literal;
    fn set_to_true(&mut self, a: Literal);

    fn const_lit(&self, value: bool) -> Literal {
        if value {
            Literal::TRUE
        } else {
            Literal::FALSE
        }
    }

    fn lnot(&self, a: Literal) -> Literal {
        !a
    }

    fn limplies(&mut self, a: Literal, b: Literal) -> Literal {
        // a -> b is (!a | b)
        self.lor(!a, b)
    }

    fn lequal(&mut self, a: Literal, b: Literal) -> Literal {
        !self.lxor(a, b)
    }

    fn lselect(&mut self, cond: Literal, then_lit: Literal, else_lit: Literal) -> Literal {
        let t = self.land(cond, then_lit);
        let e = self.land(!cond, else_lit);
        self.lor(t, e)
    }

    fn land_all(&mut self, lits: &[Literal]) -> Literal {
        match lits.split_first() {
            None => Literal::TRUE,
            Some((first, rest)) => rest.iter().fold(*first, |acc, l| self.land(acc, *l)),
        }
    }

    fn lor_all(&mut self, lits: &[Literal]) -> Literal {
        match lits.split_first() {
            None => Literal::FALSE,
            Some((first, rest)) => rest.iter().fold(*first, |acc, l| self.lor(acc, *l)),
        }
    }

    fn set_equal(&mut self, a: Literal, b: Literal) {
        let eq = self.lequal(a, b);
        self.set_to_true(eq);
    }
}
