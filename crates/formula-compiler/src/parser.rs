//! Formula parser
//!
//! A recursive descent parser with one token of lookahead. Binding power,
//! from tightest to loosest:
//!
//! ```text
//! factor := ('+' | '-') factor
//!         | FUNCTION factor
//!         | 'pi' '(' ')'
//!         | INTEGER | FLOAT
//!         | VARIABLE
//!         | '(' expr ')'
//! pow    := factor ('^' factor)*
//! term   := pow (('*' | '/') pow)*
//! expr   := term (('+' | '-') term)*
//! ```
//!
//! `^` associates to the left, so `2^3^2` is `(2^3)^2`.

use std::collections::BTreeSet;

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::unit::{CompilationUnit, Param};

/// Maximum nesting of parentheses, signs and function calls, and the
/// maximum height of the syntax tree. Operator chains count one level per
/// operator, so `x+x+...` is limited to this many terms.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Output of a successful parse
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFormula {
    pub expr: FormulaExpr,
    /// Distinct variable indices, ascending
    pub variables: BTreeSet<usize>,
}

impl ParsedFormula {
    /// Parameters declared by the formula, one per variable in ascending index order
    pub fn params(&self) -> Vec<Param> {
        self.variables.iter().copied().map(Param::variable).collect()
    }

    /// Wrap the formula in a compilation unit
    pub fn unit(&self) -> CompilationUnit {
        CompilationUnit::for_formula(self.expr.clone(), self.params())
    }
}

/// Parse a formula string into an AST and the variables it references
///
/// # Example
/// ```rust
/// use formula_compiler::parse_formula;
///
/// let parsed = parse_formula("ROUND(X0 + 2*X3)").unwrap();
/// assert_eq!(parsed.variables.into_iter().collect::<Vec<_>>(), vec![0, 3]);
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<ParsedFormula> {
    FormulaParser::new(Lexer::new(formula))?.parse()
}

/// Formula parser
pub struct FormulaParser {
    lexer: Lexer,
    current_token: Token,
    depth: usize,
}

impl FormulaParser {
    pub fn new(mut lexer: Lexer) -> FormulaResult<Self> {
        let current_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            current_token,
            depth: 0,
        })
    }

    /// Parse a complete formula; every token must be consumed
    pub fn parse(mut self) -> FormulaResult<ParsedFormula> {
        let mut variables = BTreeSet::new();
        let expr = self.expr(&mut variables)?.expr;

        if self.current_token != Token::Eof {
            return Err(FormulaError::IncompleteFormula(
                self.current_token.to_string(),
            ));
        }

        tracing::trace!(formula = self.lexer.text(), ?variables, "parsed formula");
        Ok(ParsedFormula { expr, variables })
    }

    /// Consume the current token if it has the expected kind
    fn eat(&mut self, expected: TokenKind) -> FormulaResult<()> {
        if self.current_token.kind() == expected {
            self.current_token = self.lexer.next_token()?;
            Ok(())
        } else if self.current_token == Token::Eof {
            Err(FormulaError::UnexpectedEof)
        } else {
            Err(FormulaError::UnexpectedToken {
                found: self.current_token.to_string(),
                expected: expected.to_string(),
            })
        }
    }

    // === Expression parsing with precedence ===

    fn expr(&mut self, variables: &mut BTreeSet<usize>) -> FormulaResult<Subtree> {
        let mut left = self.term(variables)?;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.eat(self.current_token.kind())?;
            let right = self.term(variables)?;
            left = Subtree::binary(op, left, right)?;
        }

        Ok(left)
    }

    fn term(&mut self, variables: &mut BTreeSet<usize>) -> FormulaResult<Subtree> {
        let mut left = self.pow(variables)?;

        loop {
            let op = match self.current_token {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.eat(self.current_token.kind())?;
            let right = self.pow(variables)?;
            left = Subtree::binary(op, left, right)?;
        }

        Ok(left)
    }

    fn pow(&mut self, variables: &mut BTreeSet<usize>) -> FormulaResult<Subtree> {
        let mut left = self.factor(variables)?;

        while self.current_token == Token::Caret {
            self.eat(TokenKind::Caret)?;
            let right = self.factor(variables)?;
            left = Subtree::binary(BinaryOperator::Power, left, right)?;
        }

        Ok(left)
    }

    fn factor(&mut self, variables: &mut BTreeSet<usize>) -> FormulaResult<Subtree> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(FormulaError::NestingTooDeep(MAX_NESTING_DEPTH));
        }

        self.depth += 1;
        let result = self.parse_factor(variables);
        self.depth -= 1;
        result
    }

    fn parse_factor(&mut self, variables: &mut BTreeSet<usize>) -> FormulaResult<Subtree> {
        let token = self.current_token;

        match token {
            Token::Plus => {
                self.eat(TokenKind::Plus)?;
                let operand = self.factor(variables)?;
                operand.wrap(|expr| FormulaExpr::unary(UnaryOperator::Plus, expr))
            }

            Token::Minus => {
                self.eat(TokenKind::Minus)?;
                let operand = self.factor(variables)?;
                operand.wrap(|expr| FormulaExpr::unary(UnaryOperator::Negate, expr))
            }

            Token::Constant(constant) => {
                self.eat(TokenKind::Constant(constant))?;
                self.eat(TokenKind::LeftParen)?;
                self.eat(TokenKind::RightParen)?;
                Ok(Subtree::leaf(FormulaExpr::Constant(constant)))
            }

            Token::Function(function) => {
                self.eat(TokenKind::Function(function))?;
                let arg = self.factor(variables)?;
                arg.wrap(|expr| FormulaExpr::call(function, expr))
            }

            Token::Number(n) => {
                self.eat(token.kind())?;
                Ok(Subtree::leaf(FormulaExpr::Number(n)))
            }

            Token::Variable(index) => {
                self.eat(TokenKind::Variable)?;
                variables.insert(index);
                Ok(Subtree::leaf(FormulaExpr::Variable(index)))
            }

            Token::LeftParen => {
                self.eat(TokenKind::LeftParen)?;
                let inner = self.expr(variables)?;
                self.eat(TokenKind::RightParen)?;
                Ok(inner)
            }

            Token::Eof => Err(FormulaError::UnexpectedEof),

            Token::RightParen | Token::Star | Token::Slash | Token::Caret => {
                Err(FormulaError::UnexpectedToken {
                    found: token.to_string(),
                    expected: "a number, variable, function or '('".to_string(),
                })
            }
        }
    }
}

/// Expression under construction along with the height of its tree
struct Subtree {
    expr: FormulaExpr,
    height: usize,
}

impl Subtree {
    fn leaf(expr: FormulaExpr) -> Self {
        Self { expr, height: 1 }
    }

    fn binary(op: BinaryOperator, left: Subtree, right: Subtree) -> FormulaResult<Self> {
        Ok(Self {
            height: checked_height(left.height.max(right.height))?,
            expr: FormulaExpr::binary(op, left.expr, right.expr),
        })
    }

    fn wrap(self, node: impl FnOnce(FormulaExpr) -> FormulaExpr) -> FormulaResult<Self> {
        Ok(Self {
            height: checked_height(self.height)?,
            expr: node(self.expr),
        })
    }
}

/// Height of a node over a child of the given height
fn checked_height(child: usize) -> FormulaResult<usize> {
    if child >= MAX_NESTING_DEPTH {
        return Err(FormulaError::NestingTooDeep(MAX_NESTING_DEPTH));
    }
    Ok(child + 1)
}
