//! Lowering of transition-system expressions against a pre-built symbol map.
//!
//! Symbol leaves resolve through the map at the timeframe carried by the
//! [`Frame`] argument. With a map that supports multiple steps, the SVA
//! operators (overlapped and non-overlapped implication, cycle delay and
//! sequence concatenation) are encoded here by moving the frame; every other
//! expression kind is left to the generic engine in [`crate::boolbv`].
//!
//! The `instantiate_*` entry points are fatal: a decoding error is reported
//! through the message handler and the process exits with status 1. The
//! `try_instantiate_*` variants return the error instead.

use tracing::{debug, trace};

use crate::boolbv::{self, Converter};
use crate::diagnostics::MessageHandler;
use crate::error::{DecodeError, DecodeResult};
use crate::expr::{Expr, ExprKind};
pub use crate::frame::Frame;
use crate::map::{BmcMap, SymbolResolver, VarMap};
use crate::namespace::Namespace;
use crate::solver::{Bv, Literal, Prop};

pub struct InstantiateMap<'a, R: SymbolResolver, P: Prop> {
    prop: &'a mut P,
    map: &'a R,
    ns: &'a Namespace,
}

impl<'a, R: SymbolResolver, P: Prop> InstantiateMap<'a, R, P> {
    pub fn new(prop: &'a mut P, map: &'a R, ns: &'a Namespace) -> Self {
        Self { prop, map, ns }
    }

    pub fn set_to_true(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<()> {
        boolbv::set_to_true(self, expr, frame)
    }

    fn convert_cycle_delay(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<Literal> {
        let (from, to, body) = (&expr.operands[0], &expr.operands[1], &expr.operands[2]);

        if to.is_nil() {
            let offset = delay_offset(from).ok_or(DecodeError::CycleDelayOffset)?;
            trace!(offset, "cycle delay");
            return self.convert_bool(body, frame.shifted(offset)?);
        }

        let (from, to) = match (delay_offset(from), delay_offset(to)) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(DecodeError::CycleDelayOffsets),
        };
        trace!(from, to, "cycle delay range");

        // this is an 'or' over the range
        let disjuncts = (from..to)
            .map(|k| self.convert_bool(body, frame.shifted(k)?))
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(self.prop.lor_all(&disjuncts))
    }
}

pub(crate) fn delay_offset(expr: &Expr) -> Option<usize> {
    expr.to_integer().and_then(|v| usize::try_from(v).ok())
}

impl<'a, R: SymbolResolver, P: Prop> Converter for InstantiateMap<'a, R, P> {
    type Prop = P;

    fn prop(&mut self) -> &mut P {
        &mut *self.prop
    }

    fn ns(&self) -> &Namespace {
        self.ns
    }

    fn convert_bool(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<Literal> {
        let ops = &expr.operands;
        match expr.kind {
            ExprKind::Symbol(_) | ExprKind::NextSymbol(_) => {
                let bv = self.convert_bitvector(expr, frame)?;
                match bv.as_slice() {
                    [bit] => Ok(*bit),
                    _ => Err(DecodeError::ExpectedOneBit),
                }
            }
            ExprKind::OverlappedImplication if R::MULTI_STEP && ops.len() == 2 => {
                let lhs = self.convert_bool(&ops[0], frame)?;
                let rhs = self.convert_bool(&ops[1], frame)?;
                Ok(self.prop.limplies(lhs, rhs))
            }
            ExprKind::NonOverlappedImplication if R::MULTI_STEP && ops.len() == 2 => {
                // the consequent sees the frame the antecedent started with
                let lhs = self.convert_bool(&ops[0], frame)?;
                let rhs = self.convert_bool(&ops[1], frame)?;
                Ok(self.prop.limplies(lhs, rhs))
            }
            ExprKind::SvaCycleDelay if R::MULTI_STEP && ops.len() == 3 => {
                self.convert_cycle_delay(expr, frame)
            }
            ExprKind::SvaSequenceConcatenation if R::MULTI_STEP && ops.len() == 2 => {
                let lhs = self.convert_bool(&ops[0], frame)?;
                let rhs = self.convert_bool(&ops[1], frame)?;
                Ok(self.prop.land(lhs, rhs))
            }
            _ => boolbv::convert_bool(self, expr, frame),
        }
    }

    fn convert_bitvector(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<Bv> {
        let (identifier, timeframe) = match &expr.kind {
            ExprKind::Symbol(id) => (id, frame.current),
            ExprKind::NextSymbol(id) => (id, frame.next),
            _ => return boolbv::convert_bitvector(self, expr, frame),
        };

        let width = self.boolbv_width(expr);
        if width == 0 {
            return boolbv::convert_bitvector(self, expr, frame);
        }

        trace!(%identifier, width, timeframe, "resolve symbol");
        Ok((0..width)
            .map(|bit| self.map.resolve(identifier, bit, timeframe))
            .collect())
    }

    fn get_literal(&mut self, symbol: &str, bit: usize, frame: Frame) -> Literal {
        self.map.resolve(symbol, bit, frame.current)
    }

    fn set_equality_to_true(&mut self, _expr: &Expr, _frame: Frame) -> DecodeResult<bool> {
        // every symbol bit already has a literal in the map
        Ok(false)
    }
}

pub fn try_instantiate_constraint<R: SymbolResolver, P: Prop>(
    prop: &mut P,
    map: &R,
    expr: &Expr,
    frame: Frame,
    ns: &Namespace,
) -> DecodeResult<()> {
    debug!(current = frame.current, next = frame.next, "instantiate constraint");
    InstantiateMap::new(prop, map, ns).set_to_true(expr, frame)
}

pub fn try_instantiate_convert<R: SymbolResolver, P: Prop>(
    prop: &mut P,
    map: &R,
    expr: &Expr,
    frame: Frame,
    ns: &Namespace,
) -> DecodeResult<Literal> {
    InstantiateMap::new(prop, map, ns).convert_bool(expr, frame)
}

pub fn try_instantiate_convert_bv<R: SymbolResolver, P: Prop>(
    prop: &mut P,
    map: &R,
    expr: &Expr,
    frame: Frame,
    ns: &Namespace,
) -> DecodeResult<Bv> {
    InstantiateMap::new(prop, map, ns).convert_bitvector(expr, frame)
}

fn or_exit<T>(result: DecodeResult<T>, messages: &mut dyn MessageHandler) -> T {
    match result {
        Ok(v) => v,
        Err(err) => {
            messages.error(&err.to_string());
            std::process::exit(1);
        }
    }
}

/// Asserts `expr` with plain symbols in timeframe `current` and next-state
/// symbols in `next`.
pub fn instantiate_constraint<P: Prop>(
    prop: &mut P,
    map: &BmcMap,
    expr: &Expr,
    current: usize,
    next: usize,
    ns: &Namespace,
    messages: &mut dyn MessageHandler,
) {
    let result = try_instantiate_constraint(prop, map, expr, Frame::new(current, next), ns);
    or_exit(result, messages)
}

pub fn instantiate_convert<P: Prop>(
    prop: &mut P,
    map: &BmcMap,
    expr: &Expr,
    current: usize,
    next: usize,
    ns: &Namespace,
    messages: &mut dyn MessageHandler,
) -> Literal {
    let result = try_instantiate_convert(prop, map, expr, Frame::new(current, next), ns);
    or_exit(result, messages)
}

pub fn instantiate_convert_bv<P: Prop>(
    prop: &mut P,
    map: &BmcMap,
    expr: &Expr,
    current: usize,
    next: usize,
    ns: &Namespace,
    messages: &mut dyn MessageHandler,
) -> Bv {
    let result = try_instantiate_convert_bv(prop, map, expr, Frame::new(current, next), ns);
    or_exit(result, messages)
}

/// Asserts `expr` over one transition step of a current/next map.
pub fn instantiate_var_constraint<P: Prop>(
    prop: &mut P,
    map: &VarMap,
    expr: &Expr,
    ns: &Namespace,
    messages: &mut dyn MessageHandler,
) {
    let result = try_instantiate_constraint(prop, map, expr, Frame::phases(), ns);
    or_exit(result, messages)
}

pub fn instantiate_var_convert<P: Prop>(
    prop: &mut P,
    map: &VarMap,
    expr: &Expr,
    ns: &Namespace,
    messages: &mut dyn MessageHandler,
) -> Literal {
    let result = try_instantiate_convert(prop, map, expr, Frame::phases(), ns);
    or_exit(result, messages)
}

pub fn instantiate_var_convert_bv<P: Prop>(
    prop: &mut P,
    map: &VarMap,
    expr: &Expr,
    ns: &Namespace,
    messages: &mut dyn MessageHandler,
) -> Bv {
    let result = try_instantiate_convert_bv(prop, map, expr, Frame::phases(), ns);
    or_exit(result, messages)
}
