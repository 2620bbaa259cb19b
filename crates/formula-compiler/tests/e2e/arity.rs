//! Strict and non-strict parameter count reconciliation.

use formula_compiler::{
    compile_formula, CompileOptions, Compiler, FailurePolicy, FormulaError, Stage,
};

#[test]
fn test_strict_exact_match() {
    let fun = compile_formula("X0 + X1", 2, true).unwrap();
    assert_eq!(fun.arity(), 2);
    assert_eq!(fun.call(&[1.0, 2.0]).unwrap(), 3.0);
}

#[test]
fn test_strict_mismatch() {
    let err = compile_formula("1+1", 2, true).unwrap_err();
    assert_eq!(err.stage(), Stage::Arity);
    assert_eq!(
        err,
        FormulaError::Arity {
            declared: 0,
            requested: 2,
            strict: true,
        }
    );
}

#[test]
fn test_non_strict_padding() {
    let fun = compile_formula("X0 * 3", 2, false).unwrap();
    assert_eq!(fun.arity(), 2);

    // The second argument is ignored
    assert_eq!(fun.call(&[2.0, 0.0]).unwrap(), 6.0);
    assert_eq!(fun.call(&[2.0, 1000.0]).unwrap(), 6.0);
    assert!(fun.params()[1].is_placeholder());
}

#[test]
fn test_non_strict_keeps_declared_positions() {
    let fun = compile_formula("X3 / X1", 4, false).unwrap();
    let names: Vec<_> = fun.params().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["x1", "x3", "placeholder_0", "placeholder_1"]);
    assert_eq!(fun.call(&[2.0, 8.0, -1.0, -1.0]).unwrap(), 4.0);
}

#[test]
fn test_non_strict_exact_match_needs_no_padding() {
    let fun = compile_formula("X", 1, false).unwrap();
    assert_eq!(fun.arity(), 1);
    assert!(fun.params().iter().all(|p| !p.is_placeholder()));
}

#[test]
fn test_non_strict_too_many_variables() {
    let err = compile_formula("X0 + X1", 1, false).unwrap_err();
    assert!(matches!(
        err,
        FormulaError::Arity {
            declared: 2,
            requested: 1,
            strict: false,
        }
    ));
}

#[test]
fn test_zero_argument_formula() {
    let fun = compile_formula("PI()", 0, true).unwrap();
    assert_eq!(fun.arity(), 0);
    assert_eq!(fun.call(&[]).unwrap(), std::f64::consts::PI);
}

#[test]
fn test_call_with_wrong_argument_count() {
    let fun = compile_formula("X", 1, true).unwrap();
    assert!(matches!(
        fun.call(&[]),
        Err(FormulaError::ArgumentCount {
            expected: 1,
            actual: 0,
            ..
        })
    ));
}

#[test]
fn test_report_policy_returns_none() {
    let compiler = Compiler::new(CompileOptions::new(2).with_policy(FailurePolicy::Report));
    assert!(compiler.try_compile("X0").unwrap().is_none());
    assert!(compiler.try_compile("X0 + X1").unwrap().is_some());
}
