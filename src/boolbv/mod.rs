//! Generic lowering of expressions to literals.
//!
//! The free functions here know how to encode boolean connectives,
//! arithmetic, comparisons and structural operators. Leaf resolution and
//! a few optimisations are delegated to a [`Converter`], and every operand
//! is converted through the converter again, so an implementation that
//! intercepts some expression kinds sees them at any depth.

pub mod arith;
pub mod plain;

use tracing::trace;

use crate::error::{DecodeError, DecodeResult};
use crate::expr::{Expr, ExprKind};
use crate::frame::Frame;
use crate::namespace::Namespace;
use crate::solver::{Bv, Literal, Prop};

pub use plain::PlainConverter;

pub trait Converter {
    type Prop: Prop;

    fn prop(&mut self) -> &mut Self::Prop;
    fn ns(&self) -> &Namespace;

    fn convert_bool(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<Literal>;
    fn convert_bitvector(&mut self, expr: &Expr, frame: Frame) -> DecodeResult<Bv>;

    /// Literal for one bit of a named symbol.
    fn get_literal(&mut self, symbol: &str, bit: usize, frame: Frame) -> Literal;

    /// Chance to handle an asserted equality without building an equality
    /// literal. Returns whether it was handled.
    fn set_equality_to_true(&mut self, _expr: &Expr, _frame: Frame) -> DecodeResult<bool> {
        Ok(false)
    }

    fn boolbv_width(&self, expr: &Expr) -> usize {
        self.ns().boolbv_width(&expr.ty)
    }
}

fn expect_operands(expr: &Expr, expected: usize) -> DecodeResult<&[Expr]> {
    if expr.operands.len() != expected {
        return Err(DecodeError::Operands {
            kind: expr.kind.id(),
            expected,
            got: expr.operands.len(),
        });
    }
    Ok(&expr.operands)
}

fn unsupported(expr: &Expr, context: &'static str) -> DecodeError {
    DecodeError::Unsupported {
        kind: expr.kind.id(),
        context,
    }
}

fn same_width(expected: usize, got: usize) -> DecodeResult<()> {
    if expected != got {
        return Err(DecodeError::WidthMismatch { expected, got });
    }
    Ok(())
}

fn constant_index(expr: &Expr, kind: &'static str, width: usize) -> DecodeResult<usize> {
    let index = expr.to_integer().ok_or(DecodeError::NonConstant(kind))?;
    if index < 0 || index as u128 >= width as u128 {
        return Err(DecodeError::OutOfRange { index, width });
    }
    Ok(index as usize)
}

/// Converts both operands of a binary bitvector expression and checks that
/// their widths agree.
fn convert_pair<C: Converter>(
    conv: &mut C,
    expr: &Expr,
    frame: Frame,
) -> DecodeResult<(Bv, Bv)> {
    let ops = expect_operands(expr, 2)?;
    let a = conv.convert_bitvector(&ops[0], frame)?;
    let b = conv.convert_bitvector(&ops[1], frame)?;
    same_width(a.len(), b.len())?;
    Ok((a, b))
}

pub fn convert_bool<C: Converter>(conv: &mut C, expr: &Expr, frame: Frame) -> DecodeResult<Literal> {
    trace!(kind = expr.kind.id(), "convert_bool");
    match &expr.kind {
        ExprKind::True => Ok(Literal::TRUE),
        ExprKind::False => Ok(Literal::FALSE),
        ExprKind::Constant(v) if conv.ns().is_bool(&expr.ty) => Ok(conv.prop().const_lit(*v != 0)),
        ExprKind::Not => {
            let ops = expect_operands(expr, 1)?;
            let a = conv.convert_bool(&ops[0], frame)?;
            Ok(conv.prop().lnot(a))
        }
        ExprKind::And | ExprKind::Or | ExprKind::Xor => {
            let lits = expr
                .operands
                .iter()
                .map(|op| conv.convert_bool(op, frame))
                .collect::<DecodeResult<Vec<_>>>()?;
            let prop = conv.prop();
            Ok(match expr.kind {
                ExprKind::And => prop.land_all(&lits),
                ExprKind::Or => prop.lor_all(&lits),
                _ => lits.iter().fold(Literal::FALSE, |acc, l| prop.lxor(acc, *l)),
            })
        }
        ExprKind::Implies => {
            let ops = expect_operands(expr, 2)?;
            let a = conv.convert_bool(&ops[0], frame)?;
            let b = conv.convert_bool(&ops[1], frame)?;
            Ok(conv.prop().limplies(a, b))
        }
        ExprKind::Equal | ExprKind::NotEqual => {
            let ops = expect_operands(expr, 2)?;
            let eq = if conv.ns().is_bool(&ops[0].ty) {
                let a = conv.convert_bool(&ops[0], frame)?;
                let b = conv.convert_bool(&ops[1], frame)?;
                conv.prop().lequal(a, b)
            } else {
                let (a, b) = convert_pair(conv, expr, frame)?;
                arith::equal(conv.prop(), &a, &b)
            };
            Ok(if expr.kind == ExprKind::Equal { eq } else { !eq })
        }
        ExprKind::IfThenElse => {
            let ops = expect_operands(expr, 3)?;
            let c = conv.convert_bool(&ops[0], frame)?;
            let t = conv.convert_bool(&ops[1], frame)?;
            let e = conv.convert_bool(&ops[2], frame)?;
            Ok(conv.prop().lselect(c, t, e))
        }
        ExprKind::Lt | ExprKind::Le | ExprKind::Gt | ExprKind::Ge => {
            let (a, b) = convert_pair(conv, expr, frame)?;
            let signed = conv.ns().is_signed(&expr.operands[0].ty);
            let prop = conv.prop();
            Ok(match expr.kind {
                ExprKind::Lt => arith::less_than(prop, &a, &b, signed),
                ExprKind::Gt => arith::less_than(prop, &b, &a, signed),
                ExprKind::Le => !arith::less_than(prop, &b, &a, signed),
                _ => !arith::less_than(prop, &a, &b, signed),
            })
        }
        ExprKind::Extractbit => {
            let ops = expect_operands(expr, 2)?;
            let width = conv.boolbv_width(&ops[0]);
            let index = constant_index(&ops[1], "extractbit", width)?;
            if let ExprKind::Symbol(id) = &ops[0].kind {
                return Ok(conv.get_literal(id, index, frame));
            }
            let bv = conv.convert_bitvector(&ops[0], frame)?;
            same_width(width, bv.len())?;
            Ok(bv[index])
        }
        ExprKind::Symbol(_)
        | ExprKind::NextSymbol(_)
        | ExprKind::Constant(_)
        | ExprKind::BitNot
        | ExprKind::BitAnd
        | ExprKind::BitOr
        | ExprKind::BitXor
        | ExprKind::Plus
        | ExprKind::Minus
        | ExprKind::UnaryMinus
        | ExprKind::Mult
        | ExprKind::Extractbits
        | ExprKind::Concatenation
        | ExprKind::Typecast
            if conv.boolbv_width(expr) == 1 =>
        {
            let bv = conv.convert_bitvector(expr, frame)?;
            match bv.as_slice() {
                [bit] => Ok(*bit),
                _ => Err(DecodeError::ExpectedOneBit),
            }
        }
        _ => Err(unsupported(expr, "boolean")),
    }
}

pub fn convert_bitvector<C: Converter>(conv: &mut C, expr: &Expr, frame: Frame) -> DecodeResult<Bv> {
    trace!(kind = expr.kind.id(), "convert_bitvector");
    let width = conv.boolbv_width(expr);
    match &expr.kind {
        ExprKind::Symbol(id) => {
            if width == 0 {
                return Err(DecodeError::ZeroWidth(id.clone()));
            }
            Ok((0..width).map(|i| conv.get_literal(id, i, frame)).collect())
        }
        ExprKind::Constant(v) => {
            if width == 0 {
                return Err(DecodeError::ZeroWidth(v.to_string()));
            }
            Ok(arith::constant(*v, width))
        }
        ExprKind::BitNot => {
            let ops = expect_operands(expr, 1)?;
            let a = conv.convert_bitvector(&ops[0], frame)?;
            Ok(a.into_iter().map(|l| !l).collect())
        }
        ExprKind::UnaryMinus => {
            let ops = expect_operands(expr, 1)?;
            let a = conv.convert_bitvector(&ops[0], frame)?;
            Ok(arith::negate(conv.prop(), &a))
        }
        ExprKind::BitAnd
        | ExprKind::BitOr
        | ExprKind::BitXor
        | ExprKind::Plus
        | ExprKind::Minus
        | ExprKind::Mult => {
            let (a, b) = convert_pair(conv, expr, frame)?;
            same_width(width, a.len())?;
            let prop = conv.prop();
            Ok(match expr.kind {
                ExprKind::BitAnd => arith::bitwise(prop, &a, &b, |p, x, y| p.land(x, y)),
                ExprKind::BitOr => arith::bitwise(prop, &a, &b, |p, x, y| p.lor(x, y)),
                ExprKind::BitXor => arith::bitwise(prop, &a, &b, |p, x, y| p.lxor(x, y)),
                ExprKind::Plus => arith::add(prop, &a, &b, Literal::FALSE),
                ExprKind::Minus => arith::sub(prop, &a, &b),
                _ => arith::mul(prop, &a, &b),
            })
        }
        ExprKind::IfThenElse if !conv.ns().is_bool(&expr.ty) => {
            let ops = expect_operands(expr, 3)?;
            let c = conv.convert_bool(&ops[0], frame)?;
            let t = conv.convert_bitvector(&ops[1], frame)?;
            let e = conv.convert_bitvector(&ops[2], frame)?;
            same_width(t.len(), e.len())?;
            Ok(arith::mux(conv.prop(), c, &t, &e))
        }
        ExprKind::Extractbits => {
            // operands: source, upper, lower
            let ops = expect_operands(expr, 3)?;
            let src = conv.convert_bitvector(&ops[0], frame)?;
            let upper = constant_index(&ops[1], "extractbits", src.len())?;
            let lower = constant_index(&ops[2], "extractbits", src.len())?;
            if lower > upper {
                return Err(DecodeError::OutOfRange {
                    index: lower as i128,
                    width: upper + 1,
                });
            }
            same_width(width, upper - lower + 1)?;
            Ok(src[lower..=upper].to_vec())
        }
        ExprKind::Concatenation => {
            // first operand is the most significant part
            let mut out = Bv::with_capacity(width);
            for op in expr.operands.iter().rev() {
                out.extend(conv.convert_bitvector(op, frame)?);
            }
            same_width(width, out.len())?;
            Ok(out)
        }
        ExprKind::Typecast => {
            let ops = expect_operands(expr, 1)?;
            let src = conv.convert_bitvector(&ops[0], frame)?;
            let signed = conv.ns().is_signed(&ops[0].ty);
            if width == 0 {
                return Err(DecodeError::ZeroWidth(expr.to_string()));
            }
            Ok(arith::resize(&src, width, signed))
        }
        // next-state values only exist for converters that know about timeframes
        ExprKind::NextSymbol(_) => Err(unsupported(expr, "bitvector")),
        _ if conv.ns().is_bool(&expr.ty) => Ok(vec![conv.convert_bool(expr, frame)?]),
        _ => Err(unsupported(expr, "bitvector")),
    }
}

/// Asserts `expr`. Conjunctions are split and equalities are offered to
/// [`Converter::set_equality_to_true`] before falling back to a literal.
pub fn set_to_true<C: Converter>(conv: &mut C, expr: &Expr, frame: Frame) -> DecodeResult<()> {
    match expr.kind {
        ExprKind::And => {
            for op in &expr.operands {
                set_to_true(conv, op, frame)?;
            }
            return Ok(());
        }
        ExprKind::Equal if expr.operands.len() == 2 => {
            if conv.set_equality_to_true(expr, frame)? {
                return Ok(());
            }
        }
        _ => {}
    }
    let lit = conv.convert_bool(expr, frame)?;
    conv.prop().set_to_true(lit);
    Ok(())
}
