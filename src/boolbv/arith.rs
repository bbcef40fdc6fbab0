//! Gate-level building blocks over literal vectors (LSB first).

use crate::solver::{Bv, Literal, Prop};

pub fn bitwise<P, F>(prop: &mut P, a: &[Literal], b: &[Literal], mut f: F) -> Bv
where
    P: Prop + ?Sized,
    F: FnMut(&mut P, Literal, Literal) -> Literal,
{
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| f(&mut *prop, *x, *y)).collect()
}

/// Ripple-carry adder; the carry out is dropped.
pub fn add<P: Prop + ?Sized>(prop: &mut P, a: &[Literal], b: &[Literal], carry_in: Literal) -> Bv {
    assert_eq!(a.len(), b.len());
    let mut out = Vec::with_capacity(a.len());
    let mut carry = carry_in;
    for (ai, bi) in a.iter().zip(b) {
        // sum = a ^ b ^ carry, carry_out = (a & b) | (carry & (a ^ b))
        let axb = prop.lxor(*ai, *bi);
        let sum = prop.lxor(axb, carry);
        let c1 = prop.land(*ai, *bi);
        let c2 = prop.land(carry, axb);
        carry = prop.lor(c1, c2);
        out.push(sum);
    }
    out
}

pub fn sub<P: Prop + ?Sized>(prop: &mut P, a: &[Literal], b: &[Literal]) -> Bv {
    // a - b = a + ~b + 1
    let nb: Bv = b.iter().map(|l| !*l).collect();
    add(prop, a, &nb, Literal::TRUE)
}

pub fn negate<P: Prop + ?Sized>(prop: &mut P, a: &[Literal]) -> Bv {
    let zero = vec![Literal::FALSE; a.len()];
    sub(prop, &zero, a)
}

/// Shift-and-add multiplier, truncated to the operand width.
pub fn mul<P: Prop + ?Sized>(prop: &mut P, a: &[Literal], b: &[Literal]) -> Bv {
    assert_eq!(a.len(), b.len());
    let w = a.len();
    let mut acc = vec![Literal::FALSE; w];
    for i in 0..w {
        // partial = b[i] ? (a << i) : 0
        let partial: Bv = (0..w)
            .map(|j| {
                if j >= i {
                    prop.land(b[i], a[j - i])
                } else {
                    Literal::FALSE
                }
            })
            .collect();
        acc = add(prop, &acc, &partial, Literal::FALSE);
    }
    acc
}

pub fn equal<P: Prop + ?Sized>(prop: &mut P, a: &[Literal], b: &[Literal]) -> Literal {
    assert_eq!(a.len(), b.len());
    let eq_bits: Bv = a.iter().zip(b).map(|(x, y)| prop.lequal(*x, *y)).collect();
    prop.land_all(&eq_bits)
}

/// `a < b`, scanning from the most significant bit.
pub fn less_than<P: Prop + ?Sized>(
    prop: &mut P,
    a: &[Literal],
    b: &[Literal],
    signed: bool,
) -> Literal {
    assert_eq!(a.len(), b.len());
    let w = a.len();
    let mut less_terms = Vec::with_capacity(w);
    let mut prefix_eq = Literal::TRUE;

    for k in (0..w).rev() {
        let (mut ak, mut bk) = (a[k], b[k]);
        if signed && k + 1 == w {
            // flipping the sign bits turns signed order into unsigned order
            ak = !ak;
            bk = !bk;
        }
        // ak < bk at bit k is (!ak & bk)
        let lt = prop.land(!ak, bk);
        let term = prop.land(prefix_eq, lt);
        less_terms.push(term);

        let eq = prop.lequal(ak, bk);
        prefix_eq = prop.land(prefix_eq, eq);
    }
    prop.lor_all(&less_terms)
}

pub fn mux<P: Prop + ?Sized>(prop: &mut P, cond: Literal, t: &[Literal], e: &[Literal]) -> Bv {
    assert_eq!(t.len(), e.len());
    t.iter()
        .zip(e)
        .map(|(x, y)| prop.lselect(cond, *x, *y))
        .collect()
}

/// Zero/sign extension or truncation to `width`.
pub fn resize(a: &[Literal], width: usize, signed: bool) -> Bv {
    let fill = if signed {
        a.last().copied().unwrap_or(Literal::FALSE)
    } else {
        Literal::FALSE
    };
    (0..width)
        .map(|i| a.get(i).copied().unwrap_or(fill))
        .collect()
}

/// Two's complement bits of `value`.
pub fn constant(value: i128, width: usize) -> Bv {
    (0..width)
        .map(|i| {
            let bit = if i < 127 { (value >> i) & 1 == 1 } else { value < 0 };
            if bit {
                Literal::TRUE
            } else {
                Literal::FALSE
            }
        })
        .collect()
}
