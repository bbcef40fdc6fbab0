use std::io::Write;
use std::process::{Command, Stdio};

use transblast::driver::{encode, run_script};
use transblast::script::Script;
use transblast::{DecodeError, EncoderConfig};

const COUNTER: &str = "
; two-bit counter starting at zero
(module counter)
(declare-var x (unsigned 2))
(declare-var en bool)
(init (= x 0))
(trans (= (next x) (ite en (+ x 1) x)))
";

fn solve(script: &str, timeframes: usize) -> String {
    let mut config = EncoderConfig::new().with_timeframes(timeframes);
    config.solve = true;
    run_script(script, &config).unwrap()
}

#[test]
fn test_reachability_within_bound() {
    let reach3 = format!("{}(constraint (= x 3) 3 4)", COUNTER);
    assert_eq!(solve(&reach3, 4), "sat\n");

    // three increments need four timeframes
    let reach3_early = format!("{}(constraint (= x 3) 2 3)", COUNTER);
    assert_eq!(solve(&reach3_early, 4), "unsat\n");
}

#[test]
fn test_conversions_report_model_values() {
    let script = format!(
        "{}(constraint (and en (## 1 en) (## 2 en)))
         (convert x2 x 2 3)
         (convert moved (!= x (next x)) 1 2)",
        COUNTER
    );
    assert_eq!(solve(&script, 4), "sat\nx2 #b10\nmoved true\n");
}

#[test]
fn test_sva_property_checked_by_refutation() {
    // an enabled step from 1 lands on 2
    let property = "(|-> (and (= x 1) en) (## 1 (= x 2)))";
    let refute = format!("{}(constraint (not {}) 1 2)", COUNTER, property);
    assert_eq!(solve(&refute, 3), "unsat\n");

    let wrong = "(|-> (= x 1) (## 1 (= x 2)))";
    let refute = format!("{}(constraint (not {}) 1 2)", COUNTER, wrong);
    assert_eq!(solve(&refute, 3), "sat\n");
}

#[test]
fn test_dimacs_output() {
    let out = run_script(
        "(declare-var a bool) (constraint (;; a (next a))) (convert a1 (next a))",
        &EncoderConfig::new(),
    )
    .unwrap();
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("c convert a1 3"));
    // constant unit, three clauses for the and gate, its unit
    assert_eq!(lines.next(), Some("p cnf 4 5"));
    assert_eq!(lines.next(), Some("1 0"));
}

#[test]
fn test_no_opts_grows_the_cnf() {
    let script = format!("{}(constraint (= x 3) 3 4)", COUNTER);
    let script = Script::parse(&script).unwrap();
    let config = EncoderConfig::new().with_timeframes(4);
    let opt = encode(&script, &config).unwrap();
    let plain = encode(&script, &EncoderConfig::no_opts().with_timeframes(4)).unwrap();
    assert!(plain.prop.num_vars() > opt.prop.num_vars());
    assert_eq!(opt.map.timeframes(), 4);
}

#[test]
fn test_encoding_errors_propagate() {
    let script = "(declare-var a bool) (declare-var n (unsigned 2)) (constraint (## n a))";
    let err = run_script(script, &EncoderConfig::new()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<DecodeError>(),
        Some(&DecodeError::CycleDelayOffset)
    );
    assert!(err.to_string().starts_with("failed to encode constraint #1"));
}

#[test]
fn test_module_selection() {
    let script = Script::parse("(declare-var a bool) (module m) (declare-var b (bv 3))").unwrap();
    assert_eq!(script.module, "m");
    let m = script.transition_system().unwrap();
    assert_eq!(m.var_widths(&script.ns), vec![("b", 3)]);
    let main = script.design.get_trans("main").unwrap();
    assert_eq!(main.var_widths(&script.ns), vec![("a", 1)]);

    let err = script.design.get_trans("other").unwrap_err();
    assert_eq!(err.to_string(), "module `other' not found");
}

fn run_binary(args: &[&str], stdin: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_transblast"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_binary_solves_from_stdin() {
    let script = format!("{}(constraint (= x 2) 2 3)", COUNTER);
    let out = run_binary(&["--timeframes", "3", "--solve"], &script);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "sat\n");
}

#[test]
fn test_binary_exits_with_status_one_on_encoding_error() {
    let script = "(declare-var a bool) (declare-var n (unsigned 2)) (constraint (## 1 n a))";
    let out = run_binary(&[], script);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to convert sva_cycle_delay offsets"));
}

#[test]
fn test_frames_beyond_the_bound_are_rejected() {
    let err = run_script(
        "(declare-var a bool) (constraint (next a) 1 2)",
        &EncoderConfig::new(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "constraint #1 reaches timeframe 2, but only 2 timeframe(s) are allocated"
    );

    // the delay is applied on top of every unrolled transition
    let err = run_script("(declare-var a bool) (trans (## 1 (next a)))", &EncoderConfig::new())
        .unwrap_err();
    assert!(err.to_string().starts_with("trans reaches timeframe 2"));

    let err = run_script(
        "(declare-var a bool) (convert late a 5 6)",
        &EncoderConfig::new().with_timeframes(3),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("conversion `late' reaches timeframe 5"));

    // an empty delay range reads no timeframe
    assert!(run_script("(declare-var a bool) (constraint (## 4 4 a))", &EncoderConfig::new()).is_ok());
}

#[test]
fn test_binary_reports_frames_beyond_the_bound() {
    let out = run_binary(&["--solve"], "(declare-var a bool) (trans (## 1 (next a)))");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("trans reaches timeframe 2"));
}
