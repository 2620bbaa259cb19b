//! Compilation units
//!
//! A unit is what the compiler hands to a [`Backend`](crate::backend::Backend):
//! an import of the math namespace followed by a single function definition
//! whose body is the parsed formula. Callers assembling units by hand can
//! produce malformed ones; the compiler and backend reject those.

use std::fmt;

use crate::ast::FormulaExpr;

/// Name given to the function generated from a formula
pub const FUNCTION_NAME: &str = "fun";

/// Namespaces a unit can import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Math,
}

/// One positional parameter of a generated function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Variable index bound to this slot, `None` for padding
    pub variable: Option<usize>,
}

impl Param {
    /// Parameter bound to formula variable `x<index>`
    pub fn variable(index: usize) -> Self {
        Self {
            name: format!("x{index}"),
            variable: Some(index),
        }
    }

    /// Unused parameter added to reach a requested arity
    pub fn placeholder(n: usize) -> Self {
        Self {
            name: format!("placeholder_{n}"),
            variable: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.variable.is_none()
    }
}

/// Function definition returning the value of `body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: FormulaExpr,
}

/// Top-level item of a unit
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Import(Namespace),
    Function(FunctionDef),
    /// Bare `return`; only valid inside a function body
    Return(FormulaExpr),
}

/// Self-contained unit of code to be turned into a callable
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub items: Vec<Item>,
}

impl CompilationUnit {
    /// Standard unit for a parsed formula: `import math` plus `fun(params)`
    pub fn for_formula(body: FormulaExpr, params: Vec<Param>) -> Self {
        Self {
            items: vec![
                Item::Import(Namespace::Math),
                Item::Function(FunctionDef {
                    name: FUNCTION_NAME.to_string(),
                    params,
                    body,
                }),
            ],
        }
    }

    /// First function definition in the unit
    pub fn function(&self) -> Option<&FunctionDef> {
        self.items.iter().find_map(|item| match item {
            Item::Function(def) => Some(def),
            _ => None,
        })
    }

    pub fn function_mut(&mut self) -> Option<&mut FunctionDef> {
        self.items.iter_mut().find_map(|item| match item {
            Item::Function(def) => Some(def),
            _ => None,
        })
    }

    pub fn imports(&self, namespace: Namespace) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::Import(ns) if *ns == namespace))
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match item {
                Item::Import(Namespace::Math) => writeln!(f, "import math")?,
                Item::Function(def) => {
                    let params: Vec<&str> = def.params.iter().map(|p| p.name.as_str()).collect();
                    writeln!(f, "def {}({}) -> float:", def.name, params.join(", "))?;
                    writeln!(f, "    return {}", def.body)?;
                }
                Item::Return(expr) => writeln!(f, "return {expr}")?,
            }
        }
        Ok(())
    }
}
