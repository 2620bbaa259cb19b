//! Built-in math functions and constants
//!
//! Every function a formula can call takes exactly one argument. `pi` is the
//! only constant and is written as a zero-argument call, `PI()`.

use std::fmt;

/// Unary math functions callable from a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MathFunction {
    Sqrt,

    // Logarithm and exponential
    Ln,
    Log10,
    Exp,

    // Rounding
    Round,

    // Trigonometric
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,

    // Hyperbolic
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
}

impl MathFunction {
    /// All functions, in keyword-table order
    pub const ALL: [MathFunction; 17] = [
        MathFunction::Sqrt,
        MathFunction::Ln,
        MathFunction::Log10,
        MathFunction::Exp,
        MathFunction::Round,
        MathFunction::Sin,
        MathFunction::Cos,
        MathFunction::Tan,
        MathFunction::Asin,
        MathFunction::Acos,
        MathFunction::Atan,
        MathFunction::Sinh,
        MathFunction::Cosh,
        MathFunction::Tanh,
        MathFunction::Asinh,
        MathFunction::Acosh,
        MathFunction::Atanh,
    ];

    /// Lowercase keyword used in formulas
    pub fn name(self) -> &'static str {
        match self {
            MathFunction::Sqrt => "sqrt",
            MathFunction::Ln => "ln",
            MathFunction::Log10 => "log10",
            MathFunction::Exp => "exp",
            MathFunction::Round => "round",
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Asin => "asin",
            MathFunction::Acos => "acos",
            MathFunction::Atan => "atan",
            MathFunction::Sinh => "sinh",
            MathFunction::Cosh => "cosh",
            MathFunction::Tanh => "tanh",
            MathFunction::Asinh => "asinh",
            MathFunction::Acosh => "acosh",
            MathFunction::Atanh => "atanh",
        }
    }

    /// Whether the function lives in the math namespace.
    ///
    /// `round` is a builtin and can be used without importing the namespace.
    pub fn needs_math_namespace(self) -> bool {
        !matches!(self, MathFunction::Round)
    }

    /// Apply the function to a single value.
    ///
    /// Out-of-domain inputs follow IEEE semantics (`SQRT(-1)` is NaN,
    /// `LN(0)` is negative infinity).
    pub fn apply(self, x: f64) -> f64 {
        match self {
            MathFunction::Sqrt => x.sqrt(),
            MathFunction::Ln => x.ln(),
            MathFunction::Log10 => x.log10(),
            MathFunction::Exp => x.exp(),
            // Ties go to the even neighbour: ROUND(2.5) == 2
            MathFunction::Round => x.round_ties_even(),
            MathFunction::Sin => x.sin(),
            MathFunction::Cos => x.cos(),
            MathFunction::Tan => x.tan(),
            MathFunction::Asin => x.asin(),
            MathFunction::Acos => x.acos(),
            MathFunction::Atan => x.atan(),
            MathFunction::Sinh => x.sinh(),
            MathFunction::Cosh => x.cosh(),
            MathFunction::Tanh => x.tanh(),
            MathFunction::Asinh => x.asinh(),
            MathFunction::Acosh => x.acosh(),
            MathFunction::Atanh => x.atanh(),
        }
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named constants, written as zero-argument calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MathConstant {
    Pi,
}

impl MathConstant {
    pub fn name(self) -> &'static str {
        match self {
            MathConstant::Pi => "pi",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            MathConstant::Pi => std::f64::consts::PI,
        }
    }
}

impl fmt::Display for MathConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
