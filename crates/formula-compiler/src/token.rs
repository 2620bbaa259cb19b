//! Tokens and the reserved keyword table

use std::fmt;

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::functions::{MathConstant, MathFunction};

/// Numeric literal, keeping the integer/float distinction of the source text
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Float(n) => n,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Float(n) => write!(f, "{n:?}"),
        }
    }
}

/// Lexical token
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Token {
    // Literals and references
    Number(Number),
    Variable(usize),

    // Reserved names
    Function(MathFunction),
    Constant(MathConstant),

    // Operators (`+` and `-` double as sign markers)
    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    // Delimiters
    LeftParen,
    RightParen,

    // End of input
    Eof,
}

/// Token tag without payload, used to state what the parser expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Float,
    Variable,
    Function(MathFunction),
    Constant(MathConstant),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(Number::Integer(_)) => TokenKind::Integer,
            Token::Number(Number::Float(_)) => TokenKind::Float,
            Token::Variable(_) => TokenKind::Variable,
            Token::Function(func) => TokenKind::Function(*func),
            Token::Constant(constant) => TokenKind::Constant(*constant),
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::Caret => TokenKind::Caret,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::Eof => TokenKind::Eof,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Variable(index) => write!(f, "x{index}"),
            Token::Function(func) => write!(f, "{func}"),
            Token::Constant(constant) => write!(f, "{constant}"),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer => f.write_str("integer"),
            TokenKind::Float => f.write_str("float"),
            TokenKind::Variable => f.write_str("variable"),
            TokenKind::Function(func) => write!(f, "'{func}'"),
            TokenKind::Constant(constant) => write!(f, "'{constant}'"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Slash => f.write_str("'/'"),
            TokenKind::Caret => f.write_str("'^'"),
            TokenKind::LeftParen => f.write_str("'('"),
            TokenKind::RightParen => f.write_str("')'"),
            TokenKind::Eof => f.write_str("end of formula"),
        }
    }
}

/// Reserved words, built once on first lookup and read-only afterwards
static RESERVED_KEYWORDS: Lazy<AHashMap<&'static str, Token>> = Lazy::new(|| {
    let mut table = AHashMap::with_capacity(MathFunction::ALL.len() + 1);
    table.insert(MathConstant::Pi.name(), Token::Constant(MathConstant::Pi));
    for func in MathFunction::ALL {
        table.insert(func.name(), Token::Function(func));
    }
    table
});

/// Look up a lowercase identifier in the keyword table
pub fn lookup_keyword(ident: &str) -> Option<Token> {
    RESERVED_KEYWORDS.get(ident).copied()
}
