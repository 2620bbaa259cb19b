//! Built-in math functions and constants.

use crate::eval;

#[test]
fn test_round() {
    assert_eq!(eval("ROUND(4.2)"), 4.0);
    assert_eq!(eval("round(4.7)"), 5.0);
    // Ties go to the even neighbour
    assert_eq!(eval("ROUND(2.5)"), 2.0);
    assert_eq!(eval("ROUND(3.5)"), 4.0);
}

#[test]
fn test_sqrt() {
    assert_eq!(eval("SQRT(2)"), 2f64.sqrt());
    assert_eq!(eval("sqrt+16"), 4.0);
    assert!(eval("SQRT(-1)").is_nan());
}

#[test]
fn test_logarithms() {
    assert_eq!(eval("LN(2)"), 2f64.ln());
    assert_eq!(eval("LOG10(100)"), 2.0);
    assert_eq!(eval("EXP(1)"), 1f64.exp());
}

#[test]
fn test_pi() {
    assert_eq!(eval("PI()"), std::f64::consts::PI);
    assert_eq!(eval("pi()*2"), std::f64::consts::TAU);
}

#[test]
fn test_trigonometric() {
    assert_eq!(eval("SIN(1/2)"), 0.5f64.sin());
    assert_eq!(eval("COS(1/2)"), 0.5f64.cos());
    assert_eq!(eval("TAN(1/2)"), 0.5f64.tan());
    assert_eq!(eval("ASIN(1/2)"), 0.5f64.asin());
    assert_eq!(eval("ACOS(1/2)"), 0.5f64.acos());
    assert_eq!(eval("ATAN(1/2)"), 0.5f64.atan());
}

#[test]
fn test_hyperbolic() {
    assert_eq!(eval("SINH(1/2)"), 0.5f64.sinh());
    assert_eq!(eval("COSH(2)"), 2f64.cosh());
    assert_eq!(eval("TANH(2)"), 2f64.tanh());
    assert_eq!(eval("ASINH(2)"), 2f64.asinh());
    assert_eq!(eval("ACOSH(2)"), 2f64.acosh());
    assert_eq!(eval("ATANH(0.5)"), 0.5f64.atanh());
}

#[test]
fn test_nested_calls() {
    assert_eq!(eval("SQRT(SQRT(16))"), 2.0);
    assert_eq!(eval("ROUND(EXP(LN(7)))"), 7.0);
}
