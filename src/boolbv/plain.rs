use std::collections::HashMap;
use tracing::{debug, trace};

use super::Converter;
use crate::error::DecodeResult;
use crate::expr::{Expr, ExprKind};
use crate::frame::Frame;
use crate::namespace::Namespace;
use crate::solver::{Bv, Literal, Prop};

/// Lowering without a pre-built symbol map: every symbol bit gets a fresh
/// literal on first use. Next-state symbols live under `name'`.
///
/// Asserted equalities `sym = rhs` with a not yet allocated `sym` bind the
/// symbol directly to the bits of `rhs` instead of adding clauses.
pub struct PlainConverter<'a, P: Prop> {
    prop: &'a mut P,
    ns: &'a Namespace,
    var_bits: HashMap<(String, usize), Literal>,
}

impl<'a, P: Prop> PlainConverter<'a, P> {
    pub fn new(prop: &'a mut P, ns: &'a Namespace) -> Self {
        Self {
            prop,
            ns,
            var_bits: HashMap::new(),
        }
    }

    pub fn lookup(&self, symbol: &str, bit: usize) -> Option<Literal> {
        self.var_bits.get(&(symbol.to_string(), bit)).copied()
    }

    fn allocated(&self, symbol: &str, width: usize) -> bool {
        (0..width).any(|i| self.lookup(symbol, i).is_some())
    }

    fn var_bit(&mut self, symbol: String, bit: usize) -> Literal {
        if let Some(l) = self.var_bits.get(&(symbol.clone(), bit)) {
            return *l;
        }
        let l = self.prop.new_variable();
        trace!(%symbol, bit, ?l, "allocate symbol bit");
        self.var_bits.insert((symbol, bit), l);
        l
    }

    pub fn set_to_true(&mut self, expr: &Expr) -> DecodeResult<()> {
        super::set_to_true(self, expr, Frame::phases())
    }

    pub fn convert(&mut self, expr: &Expr) -> DecodeResult<Literal> {
        self.convert_bool(expr, Frame::phases())
    }

    pub fn convert_bv(&mut self, expr: &Expr) -> DecodeResult<Bv> {
        self.convert_bitvector(expr, Frame::phases())
    }
}

impl<'a, P: Prop> Converter for PlainConverter<'a, P> {
    type Prop = P;

    fn prop(&mut self) -> &mut P {
        &mut *self.prop
    }

    fn ns(&self) -> &Namespace {
        self.ns
    }

    fn convert_bool(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<Literal> {
        super::convert_bool(self, expr, frame)
    }

    fn convert_bitvector(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<Bv> {
        match &expr.kind {
            ExprKind::NextSymbol(id) => {
                let width = self.boolbv_width(expr);
                if width == 0 {
                    return super::convert_bitvector(self, expr, frame);
                }
                let primed = format!("{}'", id);
                Ok((0..width).map(|i| self.var_bit(primed.clone(), i)).collect())
            }
            _ => super::convert_bitvector(self, expr, frame),
        }
    }

    fn get_literal(&mut self, symbol: &str, bit: usize, _frame: Frame) -> Literal {
        self.var_bit(symbol.to_string(), bit)
    }

    fn set_equality_to_true(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<bool> {
        let (lhs, rhs) = (&expr.operands[0], &expr.operands[1]);
        let ExprKind::Symbol(id) = &lhs.kind else {
            return Ok(false);
        };
        let width = self.boolbv_width(lhs);
        if width == 0 || self.allocated(id, width) {
            return Ok(false);
        }

        let bits = self.convert_bitvector(rhs, frame)?;
        if bits.len() != width || self.allocated(id, width) {
            // rhs mentions the symbol itself or has the wrong shape
            let lhs_bits = self.convert_bitvector(lhs, frame)?;
            super::same_width(lhs_bits.len(), bits.len())?;
            for (l, r) in lhs_bits.iter().zip(&bits) {
                self.prop.set_equal(*l, *r);
            }
            return Ok(true);
        }

        debug!(symbol = %id, width, "binding symbol to equality rhs");
        for (i, l) in bits.into_iter().enumerate() {
            self.var_bits.insert((id.clone(), i), l);
        }
        Ok(true)
    }
}
