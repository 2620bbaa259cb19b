//! Formula lexer
//!
//! Turns formula text into [`Token`]s one at a time. The input is lowercased
//! and stripped of spaces, tabs and line breaks up front, so keywords are
//! case-insensitive and whitespace never separates tokens.

use crate::error::{FormulaError, FormulaResult};
use crate::token::{lookup_keyword, Number, Token};

/// Streaming tokenizer over a single formula
#[derive(Debug, Clone)]
pub struct Lexer {
    text: String,
    pos: usize,
    previous_char: Option<char>,
}

impl Lexer {
    pub fn new(formula: &str) -> Self {
        let text = formula
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
            .collect();

        Self {
            text,
            pos: 0,
            previous_char: None,
        }
    }

    /// The normalized text being scanned
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Produce the next token.
    ///
    /// Once the input is exhausted every further call returns [`Token::Eof`].
    pub fn next_token(&mut self) -> FormulaResult<Token> {
        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        if c == 'x' {
            return self.scan_variable();
        }

        if c.is_alphabetic() {
            return self.scan_keyword();
        }

        if c.is_ascii_digit() {
            return self.scan_number();
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => {
                return Err(FormulaError::UnexpectedCharacter {
                    found: c,
                    position: self.text[..self.pos].chars().count(),
                    previous: self.previous_char,
                })
            }
        };
        self.advance();
        Ok(token)
    }

    fn scan_keyword(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        while self.peek_char().map_or(false, char::is_alphanumeric) {
            self.advance();
        }

        let ident = &self.text[start..self.pos];
        lookup_keyword(ident).ok_or_else(|| FormulaError::UnknownKeyword(ident.to_string()))
    }

    fn scan_variable(&mut self) -> FormulaResult<Token> {
        self.advance(); // Skip 'x'

        let start = self.pos;
        self.skip_digits();

        let digits = &self.text[start..self.pos];
        if digits.is_empty() {
            return Ok(Token::Variable(0));
        }

        digits
            .parse()
            .map(Token::Variable)
            .map_err(|_| FormulaError::InvalidNumber(format!("x{digits}")))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let mut literal = String::new();
        let mut is_float = false;

        // Integer part
        literal.push_str(self.skip_digits());

        // Decimal part, '.' and ',' are both accepted as the separator
        if matches!(self.peek_char(), Some('.' | ',')) {
            is_float = true;
            literal.push('.');
            self.advance();
            literal.push_str(self.skip_digits());
        }

        // Exponent part
        if self.peek_char() == Some('e') {
            is_float = true;
            literal.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                literal.push(sign);
                self.advance();
            }
            literal.push_str(self.skip_digits());
        }

        // Integers too large for i64 are kept as floats
        let number = if is_float {
            literal.parse().map(Number::Float).ok()
        } else {
            literal
                .parse()
                .map(Number::Integer)
                .or_else(|_| literal.parse().map(Number::Float))
                .ok()
        };

        number
            .map(Token::Number)
            .ok_or(FormulaError::InvalidNumber(literal))
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
            self.previous_char = Some(c);
        }
    }

    /// Consume a run of ASCII digits and return it
    fn skip_digits(&mut self) -> &str {
        let start = self.pos;
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
        &self.text[start..self.pos]
    }
}

/// Tokenize a whole formula, excluding the trailing [`Token::Eof`]
pub fn tokenize(formula: &str) -> FormulaResult<Vec<Token>> {
    let mut lexer = Lexer::new(formula);
    let mut tokens = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::Eof => break,
            token => tokens.push(token),
        }
    }

    tracing::trace!(formula, count = tokens.len(), "lexed formula");
    Ok(tokens)
}
