//! Formula Abstract Syntax Tree types

use std::collections::BTreeSet;
use std::fmt;

use crate::functions::{MathConstant, MathFunction};
use crate::token::Number;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FormulaExpr {
    /// Numeric literal
    Number(Number),

    /// Positional variable `x<index>`
    Variable(usize),

    /// Named constant such as `PI()`
    Constant(MathConstant),

    /// Sign applied to an operand
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },

    /// Binary arithmetic
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },

    /// Call of a single-argument math function
    Function {
        function: MathFunction,
        arg: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Power => '^',
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => left / right,
            BinaryOperator::Power => left.powf(right),
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl UnaryOperator {
    pub fn symbol(self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }

    pub fn apply(self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Plus => operand,
            UnaryOperator::Negate => -operand,
        }
    }
}

impl FormulaExpr {
    pub fn binary(op: BinaryOperator, left: FormulaExpr, right: FormulaExpr) -> Self {
        FormulaExpr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: FormulaExpr) -> Self {
        FormulaExpr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(function: MathFunction, arg: FormulaExpr) -> Self {
        FormulaExpr::Function {
            function,
            arg: Box::new(arg),
        }
    }

    /// Distinct variable indices referenced anywhere in the tree
    pub fn variables(&self) -> BTreeSet<usize> {
        let mut found = BTreeSet::new();
        self.visit(&mut |expr: &FormulaExpr| {
            if let FormulaExpr::Variable(index) = expr {
                found.insert(*index);
            }
        });
        found
    }

    /// Whether any node needs the math namespace to be evaluated
    pub fn uses_math_namespace(&self) -> bool {
        let mut uses = false;
        self.visit(&mut |expr: &FormulaExpr| match expr {
            FormulaExpr::Constant(_) => uses = true,
            FormulaExpr::Function { function, .. } if function.needs_math_namespace() => {
                uses = true
            }
            _ => {}
        });
        uses
    }

    /// Depth-first, pre-order walk
    pub fn visit<F: FnMut(&FormulaExpr)>(&self, f: &mut F) {
        f(self);
        match self {
            FormulaExpr::Number(_) | FormulaExpr::Variable(_) | FormulaExpr::Constant(_) => {}
            FormulaExpr::UnaryOp { operand, .. } => operand.visit(f),
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.visit(f);
                right.visit(f);
            }
            FormulaExpr::Function { arg, .. } => arg.visit(f),
        }
    }
}

/// Renders the tree as a fully parenthesized formula
impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{n}"),
            FormulaExpr::Variable(index) => write!(f, "x{index}"),
            FormulaExpr::Constant(constant) => write!(f, "{}()", constant.name().to_uppercase()),
            FormulaExpr::UnaryOp { op, operand } => write!(f, "{}{operand}", op.symbol()),
            FormulaExpr::BinaryOp { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            FormulaExpr::Function { function, arg } => {
                write!(f, "{}({arg})", function.name().to_uppercase())
            }
        }
    }
}
