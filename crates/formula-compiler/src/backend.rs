//! Backends turn a [`CompilationUnit`] into a callable [`Evaluator`]
//!
//! The compiler only relies on the [`Backend`] contract: given a unit, return
//! a callable bound to its function or fail with
//! [`FormulaError::CompileFault`]. [`ClosureBackend`] implements it by
//! building a tree of closures over the AST.

use std::fmt;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use crate::unit::{CompilationUnit, Item, Namespace, Param};

/// Compiled body of a formula, reading arguments by slot
type Program = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Callable produced by compiling a formula
///
/// Evaluators are immutable; clones share the compiled program and can be
/// called from any number of threads.
#[derive(Clone)]
pub struct Evaluator {
    name: String,
    params: Vec<Param>,
    program: Arc<Program>,
}

impl Evaluator {
    pub fn new<F>(name: impl Into<String>, params: Vec<Param>, program: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            program: Arc::new(program),
        }
    }

    fn from_boxed(name: String, params: Vec<Param>, program: Box<Program>) -> Self {
        Self {
            name,
            params,
            program: Arc::from(program),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Number of positional arguments `call` expects
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Evaluate with positional arguments, one per parameter
    pub fn call(&self, args: &[f64]) -> FormulaResult<f64> {
        if args.len() != self.params.len() {
            return Err(FormulaError::ArgumentCount {
                function: self.name.clone(),
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        Ok((self.program)(args))
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        f.debug_struct("Evaluator")
            .field("name", &self.name)
            .field("params", &params)
            .finish_non_exhaustive()
    }
}

/// Service that loads compilation units
pub trait Backend {
    /// Produce a callable for the unit's function definition
    fn load(&self, unit: &CompilationUnit) -> FormulaResult<Evaluator>;
}

/// Backend that interprets the AST through a tree of closures
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureBackend;

impl Backend for ClosureBackend {
    fn load(&self, unit: &CompilationUnit) -> FormulaResult<Evaluator> {
        if unit.items.iter().any(|item| matches!(item, Item::Return(_))) {
            return Err(FormulaError::CompileFault(
                "'return' outside function".to_string(),
            ));
        }

        let def = unit.function().ok_or(FormulaError::MissingFunction)?;

        let mut names = AHashSet::with_capacity(def.params.len());
        let mut slots = AHashMap::with_capacity(def.params.len());
        for (slot, param) in def.params.iter().enumerate() {
            if !names.insert(param.name.as_str()) {
                return Err(FormulaError::CompileFault(format!(
                    "duplicate argument '{}' in function definition",
                    param.name
                )));
            }
            if let Some(index) = param.variable {
                slots.insert(index, slot);
            }
        }

        if def.body.uses_math_namespace() && !unit.imports(Namespace::Math) {
            return Err(FormulaError::CompileFault(
                "name 'math' is not defined".to_string(),
            ));
        }

        let program = build(&def.body, &slots)?;
        Ok(Evaluator::from_boxed(
            def.name.clone(),
            def.params.clone(),
            program,
        ))
    }
}

fn build(expr: &FormulaExpr, slots: &AHashMap<usize, usize>) -> FormulaResult<Box<Program>> {
    let program: Box<Program> = match expr {
        FormulaExpr::Number(n) => {
            let value = n.as_f64();
            Box::new(move |_: &[f64]| value)
        }
        FormulaExpr::Constant(constant) => {
            let value = constant.value();
            Box::new(move |_: &[f64]| value)
        }
        FormulaExpr::Variable(index) => {
            let slot = *slots.get(index).ok_or_else(|| {
                FormulaError::CompileFault(format!("name 'x{index}' is not defined"))
            })?;
            Box::new(move |args: &[f64]| args[slot])
        }
        FormulaExpr::UnaryOp { op, operand } => {
            let op = *op;
            let operand = build(operand, slots)?;
            Box::new(move |args: &[f64]| op.apply(operand(args)))
        }
        FormulaExpr::BinaryOp { op, left, right } => {
            let op = *op;
            let left = build(left, slots)?;
            let right = build(right, slots)?;
            Box::new(move |args: &[f64]| op.apply(left(args), right(args)))
        }
        FormulaExpr::Function { function, arg } => {
            let function = *function;
            let arg = build(arg, slots)?;
            Box::new(move |args: &[f64]| function.apply(arg(args)))
        }
    };
    Ok(program)
}
