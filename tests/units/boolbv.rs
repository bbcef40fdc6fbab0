use transblast::boolbv::PlainConverter;
use transblast::solver::sat::solve_cnf;
use transblast::{CnfProp, DecodeError, Expr, ExprKind, Literal, Namespace, Type};

fn u(w: usize) -> Type {
    Type::Unsignedbv(w)
}

fn sym(name: &str, ty: Type) -> Expr {
    Expr::symbol(name, ty)
}

fn value(bits: &[Literal], model: &[bool]) -> u64 {
    bits.iter()
        .enumerate()
        .fold(0, |acc, (i, l)| acc | ((l.eval(model) as u64) << i))
}

/// Asserts `constraints`, solves, and returns the model value of `query`.
fn solve_for(ns: &Namespace, constraints: &[Expr], query: &Expr) -> Option<u64> {
    let mut p = CnfProp::new();
    let bits = {
        let mut conv = PlainConverter::new(&mut p, ns);
        for c in constraints {
            conv.set_to_true(c).unwrap();
        }
        conv.convert_bv(query).unwrap()
    };
    let model = solve_cnf(p.cnf()).unwrap()?;
    Some(value(&bits, &model))
}

fn eq_const(name: &str, w: usize, v: i128) -> Expr {
    Expr::equal(sym(name, u(w)), Expr::constant(v, u(w)))
}

#[test]
fn test_addition_wraps() {
    let ns = Namespace::new();
    let sum = Expr::binary(ExprKind::Plus, sym("a", u(4)), sym("b", u(4)));
    let got = solve_for(&ns, &[eq_const("a", 4, 9), eq_const("b", 4, 12)], &sum);
    assert_eq!(got, Some((9 + 12) % 16));
}

#[test]
fn test_subtraction_and_multiplication() {
    let ns = Namespace::new();
    let constraints = [eq_const("a", 8, 7), eq_const("b", 8, 10)];
    let diff = Expr::binary(ExprKind::Minus, sym("a", u(8)), sym("b", u(8)));
    assert_eq!(solve_for(&ns, &constraints, &diff), Some(253));
    let prod = Expr::binary(ExprKind::Mult, sym("a", u(8)), sym("b", u(8)));
    assert_eq!(solve_for(&ns, &constraints, &prod), Some(70));
}

#[test]
fn test_solving_for_an_operand() {
    let ns = Namespace::new();
    // 3 * x = 15 over 4 bits has the unique solution x = 5
    let prod = Expr::binary(ExprKind::Mult, Expr::constant(3, u(4)), sym("x", u(4)));
    let c = Expr::equal(prod, Expr::constant(15, u(4)));
    assert_eq!(solve_for(&ns, &[c], &sym("x", u(4))), Some(5));
}

#[test]
fn test_signed_and_unsigned_compare() {
    let ns = Namespace::new();
    let lt = |ty: Type| {
        Expr::new(
            ExprKind::Lt,
            Type::Bool,
            vec![Expr::constant(-1, ty.clone()), Expr::constant(1, ty)],
        )
    };
    // 0b1111 < 0b0001 holds signed, fails unsigned
    let got = solve_for(&ns, &[], &lt(Type::Signedbv(4)));
    assert_eq!(got, Some(1));
    let got = solve_for(&ns, &[], &lt(u(4)));
    assert_eq!(got, Some(0));
}

#[test]
fn test_extract_and_concat() {
    let ns = Namespace::new();
    let x = sym("x", u(8));
    let hi = Expr::new(
        ExprKind::Extractbits,
        u(4),
        vec![x.clone(), Expr::integer(7), Expr::integer(4)],
    );
    let swapped = Expr::new(
        ExprKind::Concatenation,
        u(8),
        vec![
            Expr::new(
                ExprKind::Extractbits,
                u(4),
                vec![x.clone(), Expr::integer(3), Expr::integer(0)],
            ),
            hi.clone(),
        ],
    );
    let c = [eq_const("x", 8, 0xA5)];
    assert_eq!(solve_for(&ns, &c, &hi), Some(0xA));
    assert_eq!(solve_for(&ns, &c, &swapped), Some(0x5A));

    let bit = Expr::new(ExprKind::Extractbit, Type::Bool, vec![x, Expr::integer(2)]);
    assert_eq!(solve_for(&ns, &c, &bit), Some(1));
}

#[test]
fn test_ite_selects_branch() {
    let ns = Namespace::new();
    let ite = Expr::new(
        ExprKind::IfThenElse,
        u(3),
        vec![
            sym("c", Type::Bool),
            Expr::constant(6, u(3)),
            Expr::constant(1, u(3)),
        ],
    );
    let c = sym("c", Type::Bool);
    assert_eq!(solve_for(&ns, &[c.clone()], &ite), Some(6));
    assert_eq!(solve_for(&ns, &[Expr::not(c)], &ite), Some(1));
}

#[test]
fn test_named_types_follow_typedefs() {
    let mut ns = Namespace::new();
    ns.add_type("byte", u(8));
    ns.add_type("word", Type::Named("byte".into()));
    let x = sym("x", Type::Named("word".into()));
    let mut p = CnfProp::new();
    let mut conv = PlainConverter::new(&mut p, &ns);
    assert_eq!(conv.convert_bv(&x).unwrap().len(), 8);
}

#[test]
fn test_errors() {
    let ns = Namespace::new();
    let mut p = CnfProp::new();
    let mut conv = PlainConverter::new(&mut p, &ns);

    let n = sym("n", Type::Integer);
    assert_eq!(
        conv.convert_bv(&n).unwrap_err(),
        DecodeError::ZeroWidth("n".into())
    );

    let mismatched = Expr::new(
        ExprKind::Plus,
        u(4),
        vec![sym("a", u(4)), sym("b", u(3))],
    );
    assert_eq!(
        conv.convert_bv(&mismatched).unwrap_err(),
        DecodeError::WidthMismatch {
            expected: 4,
            got: 3
        }
    );

    let oob = Expr::new(
        ExprKind::Extractbit,
        Type::Bool,
        vec![sym("a", u(4)), Expr::integer(4)],
    );
    assert_eq!(
        conv.convert(&oob).unwrap_err(),
        DecodeError::OutOfRange { index: 4, width: 4 }
    );

    let a = sym("a", Type::Bool);
    let delayed = Expr::cycle_delay(Expr::integer(1), None, a.clone());
    assert_eq!(
        conv.convert(&delayed).unwrap_err(),
        DecodeError::Unsupported {
            kind: "sva_cycle_delay",
            context: "boolean"
        }
    );

    let not2 = Expr::new(ExprKind::Not, Type::Bool, vec![a.clone(), a]);
    assert_eq!(
        conv.convert(&not2).unwrap_err(),
        DecodeError::Operands {
            kind: "not",
            expected: 1,
            got: 2
        }
    );
}

#[test]
fn test_typecast_extends_by_source_signedness() {
    let ns = Namespace::new();
    let cast = |e: Expr, ty: Type| Expr::new(ExprKind::Typecast, ty, vec![e]);

    let s = sym("s", Type::Signedbv(4));
    let neg = Expr::equal(s.clone(), Expr::constant(-3, Type::Signedbv(4)));
    // sign extension: -3 stays -3 in eight bits
    assert_eq!(solve_for(&ns, &[neg.clone()], &cast(s.clone(), u(8))), Some(253));
    assert_eq!(
        solve_for(&ns, &[neg], &cast(s, Type::Signedbv(8))),
        Some(0xfd)
    );

    // zero extension for an unsigned source with the top bit set
    let c = eq_const("a", 4, 13);
    assert_eq!(solve_for(&ns, &[c], &cast(sym("a", u(4)), u(8))), Some(13));

    // narrowing keeps the low bits
    let c = eq_const("b", 8, 0xab);
    assert_eq!(solve_for(&ns, &[c], &cast(sym("b", u(8)), u(4))), Some(0xb));
}
