//! Restricted arithmetic for custom derived fields.
//!
//! Formulas are templates such as `(field1 + field2) / 2`. Placeholders are
//! replaced with parent values and the result is evaluated by a small
//! recursive-descent parser that understands numbers, `+ - * /`, unary
//! signs and parentheses. Anything else is rejected.

use thiserror::Error;

/// Maximum nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 64;

/// Why a formula could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("unexpected character '{0}' at offset {1}")]
    UnexpectedChar(char, usize),

    #[error("malformed number '{0}'")]
    BadNumber(String),

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),

    #[error("formula nests deeper than {} levels", MAX_DEPTH)]
    TooDeep,

    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Replace `field1`, `field2`, ... with the matching operand.
///
/// Higher indices go first so `field1` never eats the prefix of `field10`.
pub fn substitute_placeholders(formula: &str, operands: &[String]) -> String {
    let mut expr = formula.to_string();
    for (index, operand) in operands.iter().enumerate().rev() {
        let placeholder = format!("field{}", index + 1);
        expr = expr.replace(&placeholder, operand);
    }
    expr
}

/// Evaluate an arithmetic expression.
pub fn evaluate(expr: &str) -> Result<f64, FormulaError> {
    let tokens = lex(expr)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(FormulaError::UnexpectedToken(token));
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::NonFinite)
    }
}

fn lex(src: &str) -> Result<Vec<Token>, FormulaError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                    pos += 1;
                }
                if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
                    pos += 1;
                    if pos < chars.len() && (chars[pos] == '+' || chars[pos] == '-') {
                        pos += 1;
                    }
                    while pos < chars.len() && chars[pos].is_ascii_digit() {
                        pos += 1;
                    }
                }
                let text: String = chars[start..pos].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::BadNumber(text.clone()))?;
                tokens.push(Token::Number(value));
                continue;
            }
            other => return Err(FormulaError::UnexpectedChar(other, pos)),
        };
        tokens.push(token);
        pos += 1;
    }

    Ok(tokens)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::TooDeep);
        }
        Ok(())
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    // unary := ('+' | '-') unary | primary
    fn unary(&mut self) -> Result<f64, FormulaError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            _ => self.primary(),
        }
    }

    // primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<f64, FormulaError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                self.enter()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(token) => Err(FormulaError::UnexpectedToken(token)),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some(token) => Err(FormulaError::UnexpectedToken(token)),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}
