//! Lex and syntax failures.

use formula_compiler::{compile_formula, parse_formula, FormulaError, Stage};

#[test]
fn test_unknown_keyword() {
    let err = parse_formula("asdfjhlk").unwrap_err();
    assert_eq!(err, FormulaError::UnknownKeyword("asdfjhlk".into()));
    assert_eq!(err.stage(), Stage::Lex);
}

#[test]
fn test_unknown_function() {
    let err = parse_formula("SUM(1)").unwrap_err();
    assert_eq!(err, FormulaError::UnknownKeyword("sum".into()));
}

#[test]
fn test_disallowed_symbol() {
    let err = parse_formula("%").unwrap_err();
    assert!(matches!(
        err,
        FormulaError::UnexpectedCharacter { found: '%', .. }
    ));
    assert_eq!(err.stage(), Stage::Lex);
}

#[test]
fn test_unbalanced_parentheses() {
    let err = parse_formula("(1+2").unwrap_err();
    assert_eq!(err, FormulaError::UnexpectedEof);
    assert!(err.to_string().contains("close parentheses"));

    let err = parse_formula("1+2))").unwrap_err();
    assert!(matches!(err, FormulaError::IncompleteFormula(_)));
    assert!(err.to_string().contains("parentheses are matched"));
}

#[test]
fn test_trailing_garbage() {
    let err = parse_formula("1 x").unwrap_err();
    assert!(matches!(err, FormulaError::IncompleteFormula(_)));
    assert_eq!(err.stage(), Stage::Parse);
}

#[test]
fn test_operator_without_operand() {
    assert!(matches!(
        parse_formula("1*/2").unwrap_err(),
        FormulaError::UnexpectedToken { .. }
    ));
    assert_eq!(parse_formula("2^").unwrap_err(), FormulaError::UnexpectedEof);
}

#[test]
fn test_pi_requires_empty_call() {
    assert_eq!(parse_formula("PI").unwrap_err(), FormulaError::UnexpectedEof);
    assert!(matches!(
        parse_formula("PI(1)").unwrap_err(),
        FormulaError::UnexpectedToken { .. }
    ));
}

#[test]
fn test_syntax_errors_never_reach_arity_check() {
    // Strict arity would also fail here, but parsing fails first
    let err = compile_formula("(X0", 5, true).unwrap_err();
    assert!(err.is_syntax());
}

#[test]
fn test_long_operator_chain_is_rejected() {
    let formula = vec!["x"; 10_000].join("+");
    let err = compile_formula(&formula, 1, true).unwrap_err();
    assert!(matches!(err, FormulaError::NestingTooDeep(_)));
    assert_eq!(err.stage(), Stage::Parse);

    let formula = vec!["2"; 10_000].join("^");
    assert!(matches!(
        compile_formula(&formula, 0, true).unwrap_err(),
        FormulaError::NestingTooDeep(_)
    ));
}
