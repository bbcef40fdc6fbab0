use std::collections::HashMap;
use tracing::trace;

use super::cnf::{Cnf, Literal};
use super::Prop;
use crate::config::EncoderConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Gate {
    And,
    Xor,
}

/// Tseitin encoder: every gate gets a fresh variable plus defining clauses.
pub struct CnfProp {
    cnf: Cnf,
    gates: HashMap<(Gate, Literal, Literal), Literal>,
    config: EncoderConfig,
}

impl CnfProp {
    pub fn new() -> Self {
        Self::new_with_config(EncoderConfig::default())
    }

    pub fn new_with_config(config: EncoderConfig) -> Self {
        let mut cnf = Cnf::new();
        let t = cnf.new_var();
        debug_assert_eq!(t, Literal::TRUE.var());
        cnf.add_clause([Literal::TRUE]);
        Self {
            cnf,
            gates: HashMap::new(),
            config,
        }
    }

    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    pub fn into_cnf(self) -> Cnf {
        self.cnf
    }

    pub fn num_vars(&self) -> usize {
        self.cnf.num_vars
    }

    fn lookup(&self, gate: Gate, a: Literal, b: Literal) -> Option<Literal> {
        if !self.config.enable_gate_sharing {
            return None;
        }
        self.gates.get(&(gate, a, b)).copied()
    }

    fn remember(&mut self, gate: Gate, a: Literal, b: Literal, out: Literal) {
        if self.config.enable_gate_sharing {
            self.gates.insert((gate, a, b), out);
        }
    }
}

impl Default for CnfProp {
    fn default() -> Self {
        Self::new()
    }
}

impl Prop for CnfProp {
    fn new_variable(&mut self) -> Literal {
        Literal(self.cnf.new_var(), true)
    }

    fn land(&mut self, a: Literal, b: Literal) -> Literal {
        if self.config.enable_const_prop {
            if a.is_false() || b.is_false() || a == !b {
                return Literal::FALSE;
            }
            if a.is_true() || a == b {
                return b;
            }
            if b.is_true() {
                return a;
            }
        }

        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        if let Some(out) = self.lookup(Gate::And, a, b) {
            return out;
        }

        let out = self.new_variable();
        trace!(?out, ?a, ?b, "and gate");
        // out <-> a & b
        self.cnf.add_clause([!out, a]);
        self.cnf.add_clause([!out, b]);
        self.cnf.add_clause([!a, !b, out]);
        self.remember(Gate::And, a, b, out);
        out
    }

    fn lor(&mut self, a: Literal, b: Literal) -> Literal {
        // De Morgan: a | b = !(!a & !b)
        !self.land(!a, !b)
    }

    fn lxor(&mut self, a: Literal, b: Literal) -> Literal {
        if self.config.enable_const_prop {
            if a.is_false() {
                return b;
            }
            if b.is_false() {
                return a;
            }
            if a.is_true() {
                return !b;
            }
            if b.is_true() {
                return !a;
            }
            if a == b {
                return Literal::FALSE;
            }
            if a == !b {
                return Literal::TRUE;
            }
        }

        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        if let Some(out) = self.lookup(Gate::Xor, a, b) {
            return out;
        }

        let out = self.new_variable();
        trace!(?out, ?a, ?b, "xor gate");
        // out <-> a ^ b
        self.cnf.add_clause([!out, a, b]);
        self.cnf.add_clause([!out, !a, !b]);
        self.cnf.add_clause([out, !a, b]);
        self.cnf.add_clause([out, a, !b]);
        self.remember(Gate::Xor, a, b, out);
        out
    }

    fn set_to_true(&mut self, a: Literal) {
        if self.config.enable_const_prop && a.is_true() {
            return;
        }
        self.cnf.add_clause([a]);
    }
}
