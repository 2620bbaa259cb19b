//! # formula-compiler
//!
//! Compiles spreadsheet-style formulas into callable numeric evaluators.
//!
//! This crate provides:
//! - Tokenization (text → tokens)
//! - Formula parsing (tokens → AST + referenced variables)
//! - Compilation with arity checking (AST → evaluator)
//!
//! Formulas are case- and whitespace-insensitive and reference their inputs
//! as `X0`, `X1`, … (`X` alone is `X0`). Supported operators are
//! `+ - * / ^` and the functions `SQRT, LN, LOG10, EXP, ROUND`, the
//! trigonometric and hyperbolic functions with their inverses, and `PI()`.
//!
//! ## Example
//!
//! ```rust
//! use formula_compiler::compile_formula;
//!
//! let fun = compile_formula("ROUND(2^1 + 2^3 + EXP(5*LN(X)))", 1, true).unwrap();
//! assert_eq!(fun.call(&[2.0]).unwrap(), 42.0);
//! ```

pub mod ast;
pub mod backend;
pub mod compiler;
pub mod error;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod unit;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use backend::{Backend, ClosureBackend, Evaluator};
pub use compiler::{compile_formula, compile_unit, CompileOptions, Compiler, FailurePolicy};
pub use error::{FormulaError, FormulaResult, Stage};
pub use functions::{MathConstant, MathFunction};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse_formula, ParsedFormula};
pub use token::{Number, Token, TokenKind};
pub use unit::CompilationUnit;
