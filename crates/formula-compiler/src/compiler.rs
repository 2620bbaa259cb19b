//! Formula compilation
//!
//! Runs the whole pipeline, `Uncompiled → Lexed → Parsed → ArityChecked →
//! Ready`. Any failure ends the attempt; compiling again starts from the
//! formula text.
//!
//! # Example
//!
//! ```rust
//! use formula_compiler::{CompileOptions, Compiler};
//!
//! let compiler = Compiler::new(CompileOptions::new(2).with_strict(false));
//! let fun = compiler.compile("ROUND(X0 * 10)").unwrap();
//!
//! // The second argument is padding and is ignored
//! assert_eq!(fun.call(&[0.42, 99.0]).unwrap(), 4.0);
//! ```

use crate::backend::{Backend, ClosureBackend, Evaluator};
use crate::error::{FormulaError, FormulaResult};
use crate::parser::{parse_formula, ParsedFormula};
use crate::unit::{CompilationUnit, FunctionDef, Param};

/// What to do when compilation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FailurePolicy {
    /// Return the error to the caller
    #[default]
    Propagate,
    /// Log the error and return no evaluator
    Report,
}

impl FailurePolicy {
    /// Apply the policy to the outcome of a compilation attempt
    pub fn resolve<T>(self, result: FormulaResult<T>) -> FormulaResult<Option<T>> {
        match (self, result) {
            (_, Ok(value)) => Ok(Some(value)),
            (FailurePolicy::Propagate, Err(err)) => Err(err),
            (FailurePolicy::Report, Err(err)) => {
                tracing::warn!(stage = %err.stage(), "{err}");
                Ok(None)
            }
        }
    }
}

/// Options for formula compilation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompileOptions {
    /// Number of positional arguments the evaluator should accept (default: 1)
    pub n_args: usize,
    /// Require the formula to use exactly `n_args` variables (default: true).
    /// When false, formulas using fewer variables are padded with unused
    /// parameters.
    pub strict: bool,
    /// Failure handling for [`Compiler::try_compile`] (default: propagate)
    pub policy: FailurePolicy,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            n_args: 1,
            strict: true,
            policy: FailurePolicy::Propagate,
        }
    }
}

impl CompileOptions {
    pub fn new(n_args: usize) -> Self {
        Self {
            n_args,
            ..Default::default()
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Check a function's parameter count against the requested one, padding
/// the parameter list when `strict` is off
pub fn reconcile_arity(def: &mut FunctionDef, n_args: usize, strict: bool) -> FormulaResult<()> {
    let declared = def.params.len();

    let conflict = if strict {
        declared != n_args
    } else {
        declared > n_args
    };
    if conflict {
        return Err(FormulaError::Arity {
            declared,
            requested: n_args,
            strict,
        });
    }

    if declared < n_args {
        def.params.extend((0..n_args - declared).map(Param::placeholder));
        tracing::debug!(declared, requested = n_args, "padded parameter list");
    }

    Ok(())
}

/// Formula compiler bound to a set of options and a backend
#[derive(Debug, Clone, Default)]
pub struct Compiler<B = ClosureBackend> {
    options: CompileOptions,
    backend: B,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self::with_backend(options, ClosureBackend)
    }
}

impl<B: Backend> Compiler<B> {
    pub fn with_backend(options: CompileOptions, backend: B) -> Self {
        Self { options, backend }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile formula text into an evaluator
    pub fn compile(&self, formula: &str) -> FormulaResult<Evaluator> {
        let parsed = parse_formula(formula)?;
        self.compile_parsed(&parsed)
    }

    /// Compile a formula that has already been parsed
    pub fn compile_parsed(&self, parsed: &ParsedFormula) -> FormulaResult<Evaluator> {
        self.compile_unit(parsed.unit())
    }

    /// Reconcile the unit's arity and hand it to the backend
    pub fn compile_unit(&self, mut unit: CompilationUnit) -> FormulaResult<Evaluator> {
        let def = unit.function_mut().ok_or(FormulaError::MissingFunction)?;
        reconcile_arity(def, self.options.n_args, self.options.strict)?;
        tracing::trace!(
            n_args = self.options.n_args,
            strict = self.options.strict,
            "arity checked"
        );

        let evaluator = self.backend.load(&unit)?;
        tracing::trace!(name = evaluator.name(), arity = evaluator.arity(), "evaluator ready");
        Ok(evaluator)
    }

    /// Compile under the configured [`FailurePolicy`]
    ///
    /// With [`FailurePolicy::Report`] failures are logged and `Ok(None)` is
    /// returned instead.
    pub fn try_compile(&self, formula: &str) -> FormulaResult<Option<Evaluator>> {
        self.options.policy.resolve(self.compile(formula))
    }
}

/// Compile a formula with the given arity settings
///
/// # Example
/// ```rust
/// use formula_compiler::compile_formula;
///
/// let fun = compile_formula("X", 1, true).unwrap();
/// assert_eq!(fun.call(&[42.0]).unwrap(), 42.0);
/// ```
pub fn compile_formula(formula: &str, n_args: usize, strict: bool) -> FormulaResult<Evaluator> {
    Compiler::new(CompileOptions::new(n_args).with_strict(strict)).compile(formula)
}

/// Compile a hand-assembled unit with the default backend
pub fn compile_unit(unit: CompilationUnit, n_args: usize, strict: bool) -> FormulaResult<Evaluator> {
    Compiler::new(CompileOptions::new(n_args).with_strict(strict)).compile_unit(unit)
}
