use transblast::solver::sat::solve_cnf;
use transblast::{CnfProp, EncoderConfig, Literal, Prop};

fn solve(p: &CnfProp) -> Option<Vec<bool>> {
    solve_cnf(p.cnf()).expect("varisat")
}

#[test]
fn test_new_prop_pins_constant() {
    let p = CnfProp::new();
    assert_eq!(p.num_vars(), 1);
    assert_eq!(p.cnf().clauses, vec![vec![Literal::TRUE]]);
    let model = solve(&p).unwrap();
    assert!(Literal::TRUE.eval(&model));
    assert!(!Literal::FALSE.eval(&model));
}

#[test]
fn test_new_variable() {
    let mut p = CnfProp::new();
    let a = p.new_variable();
    let b = p.new_variable();
    assert_eq!(a, Literal(1, true));
    assert_eq!(b, Literal(2, true));
    assert_eq!(p.num_vars(), 3);
}

#[test]
fn test_constant_folding() {
    let mut p = CnfProp::new();
    let a = p.new_variable();
    assert_eq!(p.land(a, Literal::TRUE), a);
    assert_eq!(p.land(a, Literal::FALSE), Literal::FALSE);
    assert_eq!(p.lor(a, Literal::TRUE), Literal::TRUE);
    assert_eq!(p.lor(a, Literal::FALSE), a);
    assert_eq!(p.lxor(a, Literal::FALSE), a);
    assert_eq!(p.lxor(a, Literal::TRUE), !a);
    assert_eq!(p.land(a, !a), Literal::FALSE);
    assert_eq!(p.lor(a, !a), Literal::TRUE);
    // no gate was needed
    assert_eq!(p.num_vars(), 2);
}

#[test]
fn test_gate_sharing() {
    let mut p = CnfProp::new();
    let a = p.new_variable();
    let b = p.new_variable();
    let g1 = p.land(a, b);
    let g2 = p.land(b, a);
    assert_eq!(g1, g2);

    let mut q = CnfProp::new_with_config(EncoderConfig::no_opts());
    let a = q.new_variable();
    let b = q.new_variable();
    assert_ne!(q.land(a, b), q.land(a, b));
}

#[test]
fn test_empty_folds() {
    let mut p = CnfProp::new();
    assert_eq!(p.land_all(&[]), Literal::TRUE);
    assert_eq!(p.lor_all(&[]), Literal::FALSE);
    let a = p.new_variable();
    assert_eq!(p.lor_all(&[a]), a);
}

/// Every gate agrees with its truth table in every model.
#[test]
fn test_gate_semantics() {
    for (va, vb) in [(false, false), (false, true), (true, false), (true, true)] {
        let mut p = CnfProp::new_with_config(EncoderConfig::no_opts());
        let a = p.new_variable();
        let b = p.new_variable();
        let and = p.land(a, b);
        let or = p.lor(a, b);
        let xor = p.lxor(a, b);
        let imp = p.limplies(a, b);
        let sel = p.lselect(a, b, !b);
        p.set_to_true(if va { a } else { !a });
        p.set_to_true(if vb { b } else { !b });

        let m = solve(&p).unwrap();
        assert_eq!(and.eval(&m), va && vb);
        assert_eq!(or.eval(&m), va || vb);
        assert_eq!(xor.eval(&m), va ^ vb);
        assert_eq!(imp.eval(&m), !va || vb);
        assert_eq!(sel.eval(&m), if va { vb } else { !vb });
    }
}

#[test]
fn test_set_equal_and_unsat() {
    let mut p = CnfProp::new();
    let a = p.new_variable();
    let b = p.new_variable();
    p.set_equal(a, b);
    p.set_to_true(a);
    p.set_to_true(!b);
    assert!(solve(&p).is_none());
}

#[test]
fn test_dimacs_output() {
    let mut p = CnfProp::new();
    let a = p.new_variable();
    p.set_to_true(!a);
    assert_eq!(p.cnf().to_dimacs(), "p cnf 2 2\n1 0\n-2 0\n");
}
