//! Operators, precedence and literals.

use crate::{create_callable, eval};

#[test]
fn test_x() {
    let fun = create_callable("X", 1);
    assert_eq!(fun.call(&[1.0]).unwrap(), 1.0);
    assert_eq!(fun.call(&[42.0]).unwrap(), 42.0);
}

#[test]
fn test_signs() {
    assert_eq!(eval("-1"), -1.0);
    assert_eq!(eval("+1"), 1.0);
    assert_eq!(eval("--1"), 1.0);
    assert_eq!(eval("3-+2"), 1.0);
}

#[test]
fn test_basic_operators() {
    assert_eq!(eval("1+1"), 2.0);
    assert_eq!(eval("1-1"), 0.0);
    assert_eq!(eval("10*10"), 100.0);
    assert_eq!(eval("1/2"), 0.5);
    assert_eq!(eval("2^2"), 4.0);
}

#[test]
fn test_precedence() {
    assert_eq!(eval("1+2*3"), 7.0);
    assert_eq!(eval("(1+2)*3"), 9.0);
    assert_eq!(eval("2*3^2"), 18.0);
    assert_eq!(eval("10-4-3"), 3.0);
    assert_eq!(eval("8/4/2"), 1.0);
}

#[test]
fn test_power_is_left_associative() {
    // (2^3)^2, not 2^(3^2) = 512
    assert_eq!(eval("2^3^2"), 64.0);
}

#[test]
fn test_sign_applies_before_power() {
    // (-2)^2
    assert_eq!(eval("-2^2"), 4.0);
    assert_eq!(eval("2^-1"), 0.5);
}

#[test]
fn test_literals() {
    assert_eq!(eval("1.5"), 1.5);
    assert_eq!(eval("1,5"), 1.5);
    assert_eq!(eval("2.5e2"), 250.0);
    assert_eq!(eval("1E-3"), 0.001);
}

#[test]
fn test_integer_literal_wider_than_i64() {
    assert_eq!(eval("99999999999999999999 + 1"), 1e20);
    assert_eq!(eval("18446744073709551616 / 2"), 9223372036854775808.0);
}

#[test]
fn test_long_sum_within_limit() {
    let fun = create_callable(&vec!["x"; 200].join("+"), 1);
    assert_eq!(fun.call(&[1.5]).unwrap(), 300.0);
}

#[test]
fn test_case_and_whitespace_insensitive() {
    let fun = create_callable("  x1 *\n X1\t+ 1 ", 1);
    assert_eq!(fun.call(&[3.0]).unwrap(), 10.0);
}

#[test]
fn test_division_by_zero_is_infinite() {
    assert_eq!(eval("1/0"), f64::INFINITY);
    assert!(eval("0/0").is_nan());
}

#[test]
fn test_multiple_variables() {
    // Parameters follow ascending variable index, not order of appearance
    let fun = create_callable("X7 - X2", 2);
    assert_eq!(fun.call(&[1.0, 10.0]).unwrap(), 9.0);

    let names: Vec<_> = fun.params().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["x2", "x7"]);
}

#[test]
fn test_default_formula() {
    let fun = create_callable("ROUND(2^1 + 2^3 + EXP(5*LN(x)))", 1);
    // 2 + 8 + 2^5
    assert_eq!(fun.call(&[2.0]).unwrap(), 42.0);
}

#[test]
fn test_idempotent() {
    let fun = create_callable("SIN(X0) * EXP(X1) / (1 + X0^2)", 2);
    let first = fun.call(&[0.3, 1.7]).unwrap();
    let second = fun.call(&[0.3, 1.7]).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_concurrent_calls() {
    let fun = create_callable("X * X", 1);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let fun = fun.clone();
            std::thread::spawn(move || fun.call(&[i as f64]).unwrap())
        })
        .collect();

    let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![0.0, 1.0, 4.0, 9.0]);
}
