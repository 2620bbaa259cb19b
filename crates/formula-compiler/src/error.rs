//! Formula error types

use std::fmt;

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Pipeline stage a [`FormulaError`] originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Tokenization
    Lex,
    /// Recursive-descent parsing
    Parse,
    /// Locating the function definition inside a compilation unit
    Shape,
    /// Parameter count reconciliation
    Arity,
    /// Turning a unit into a callable
    Backend,
    /// Invoking a compiled evaluator
    Evaluate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Shape => "shape",
            Stage::Arity => "arity",
            Stage::Backend => "backend",
            Stage::Evaluate => "evaluate",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while lexing, parsing, compiling or calling a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    // === Lex ===
    /// Identifier is not a reserved function or constant name
    #[error("Unknown keyword '{0}'")]
    UnknownKeyword(String),

    /// Character that cannot start any token
    #[error("Unhandled character '{found}' at position {position}{}", after_hint(.previous))]
    UnexpectedCharacter {
        found: char,
        position: usize,
        previous: Option<char>,
    },

    /// Numeric literal that does not fit its scanned type
    #[error("Invalid numeric literal '{0}'")]
    InvalidNumber(String),

    // === Parse ===
    /// Token type mismatch, or a token that cannot start a factor
    #[error("Token types do not match: {found} != {expected}")]
    UnexpectedToken { found: String, expected: String },

    /// Input ended while more tokens were required
    #[error("Unexpected end of formula. Did you forget to close parentheses?")]
    UnexpectedEof,

    /// Tokens remain after a complete expression
    #[error("Incomplete formula provided (found {0} after the expression). Did you check if all parentheses are matched?")]
    IncompleteFormula(String),

    /// Parenthesis or sign nesting exceeds the parser limit
    #[error("Formula nests deeper than {0} levels")]
    NestingTooDeep(usize),

    // === Shape ===
    /// The compilation unit has no function definition
    #[error("Provided unit does not contain a function definition")]
    MissingFunction,

    // === Arity ===
    /// Declared parameters conflict with the requested argument count
    #[error("The formula requires {declared} arguments, but the compiler was instructed to expect{} {requested}", arity_qualifier(.strict))]
    Arity {
        declared: usize,
        requested: usize,
        strict: bool,
    },

    // === Backend ===
    /// The backend rejected a structurally invalid unit
    #[error("Compilation failed: {0}")]
    CompileFault(String),

    // === Evaluate ===
    /// Evaluator called with the wrong number of positional arguments
    #[error("{function}() takes {expected} positional arguments but {actual} were given")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },
}

fn after_hint(previous: &Option<char>) -> String {
    previous.map(|c| format!(" (after '{c}')")).unwrap_or_default()
}

fn arity_qualifier(strict: &bool) -> &'static str {
    if *strict {
        " exactly"
    } else {
        " at most"
    }
}

impl FormulaError {
    /// The pipeline stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            FormulaError::UnknownKeyword(_)
            | FormulaError::UnexpectedCharacter { .. }
            | FormulaError::InvalidNumber(_) => Stage::Lex,
            FormulaError::UnexpectedToken { .. }
            | FormulaError::UnexpectedEof
            | FormulaError::IncompleteFormula(_)
            | FormulaError::NestingTooDeep(_) => Stage::Parse,
            FormulaError::MissingFunction => Stage::Shape,
            FormulaError::Arity { .. } => Stage::Arity,
            FormulaError::CompileFault(_) => Stage::Backend,
            FormulaError::ArgumentCount { .. } => Stage::Evaluate,
        }
    }

    /// True for errors raised by the lexer or parser
    pub fn is_syntax(&self) -> bool {
        matches!(self.stage(), Stage::Lex | Stage::Parse)
    }
}
