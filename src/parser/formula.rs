//! Custom cost formulas.
//!
//! A formula is a small arithmetic expression over numbers and six named
//! variables, e.g. `$rate * $floor_area / 2`. It is compiled once into an
//! expression tree and evaluated against a [`FormulaVars`] binding.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | NUMBER | VARIABLE | '(' expr ')'
//! ```
//!
//! `×` and `÷` are accepted for `*` and `/`. Variables may carry a leading
//! `$` and are accepted in snake_case or camelCase.
//!
//! Formulas are bounded to [`MAX_TOKENS`] tokens and [`MAX_NESTING`] levels
//! of parentheses or unary signs, so compiling and evaluating never recurse
//! without limit.

use crate::error::FormulaError;

/// Maximum number of tokens in one formula.
pub const MAX_TOKENS: usize = 256;

/// Maximum nesting of parentheses and unary signs.
pub const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    FloorArea,
    WallArea,
    Length,
    Width,
    Height,
    Rate,
}

impl Variable {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "floor_area" | "floorArea" => Some(Variable::FloorArea),
            "wall_area" | "wallArea" => Some(Variable::WallArea),
            "length" => Some(Variable::Length),
            "width" => Some(Variable::Width),
            "height" => Some(Variable::Height),
            "rate" => Some(Variable::Rate),
            _ => None,
        }
    }
}

/// Values bound to the formula variables.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormulaVars {
    pub floor_area: f64,
    pub wall_area: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub rate: f64,
}

impl FormulaVars {
    fn get(&self, var: Variable) -> f64 {
        match var {
            Variable::FloorArea => self.floor_area,
            Variable::WallArea => self.wall_area,
            Variable::Length => self.length,
            Variable::Width => self.width,
            Variable::Height => self.height,
            Variable::Rate => self.rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Var(Variable),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, vars: &FormulaVars) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::Var(v) => vars.get(*v),
            Expr::Neg(inner) => -inner.eval(vars),
            Expr::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(vars), rhs.eval(vars));
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Var(Variable),
    Op(BinaryOp),
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Var(v) => write!(f, "{v:?}"),
            Token::Op(BinaryOp::Add) => write!(f, "+"),
            Token::Op(BinaryOp::Sub) => write!(f, "-"),
            Token::Op(BinaryOp::Mul) => write!(f, "*"),
            Token::Op(BinaryOp::Div) => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// A compiled custom formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Compiles formula text.
    ///
    /// # Errors
    ///
    /// Returns a [`FormulaError`] describing the first syntax problem found.
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.parse_expr()?;
        if let Some((token, position)) = parser.tokens.get(parser.pos) {
            return Err(FormulaError::UnexpectedToken {
                token: token.to_string(),
                position: *position,
            });
        }
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the formula.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::NonFinite`] when the result is infinite or NaN.
    pub fn evaluate(&self, vars: &FormulaVars) -> Result<f64, FormulaError> {
        let value = self.expr.eval(vars);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFinite)
        }
    }
}

impl std::str::FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(position, ch)) = chars.peek() {
        if tokens.len() > MAX_TOKENS {
            return Err(FormulaError::TooLong { limit: MAX_TOKENS });
        }
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' | '×' | '÷' => {
                chars.next();
                let op = match ch {
                    '+' => BinaryOp::Add,
                    '-' => BinaryOp::Sub,
                    '*' | '×' => BinaryOp::Mul,
                    _ => BinaryOp::Div,
                };
                tokens.push((Token::Op(op), position));
            }
            '(' => {
                chars.next();
                tokens.push((Token::LParen, position));
            }
            ')' => {
                chars.next();
                tokens.push((Token::RParen, position));
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut text = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber { text: text.clone() })?;
                tokens.push((Token::Number(value), position));
            }
            c if c == '$' || c.is_ascii_alphabetic() || c == '_' => {
                // Skip the optional '$' sigil
                if c == '$' {
                    chars.next();
                }
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let var = Variable::from_name(&name)
                    .ok_or(FormulaError::UnknownVariable { name })?;
                tokens.push((Token::Var(var), position));
            }
            _ => return Err(FormulaError::UnexpectedChar { ch, position }),
        }
    }

    if tokens.len() > MAX_TOKENS {
        return Err(FormulaError::TooLong { limit: MAX_TOKENS });
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(FormulaError::TooDeep { limit: MAX_NESTING });
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_term()?;
        while let Some(Token::Op(op @ (BinaryOp::Add | BinaryOp::Sub))) = self.peek() {
            let op = *op;
            self.pos += 1;
            let rhs = self.parse_term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.parse_factor()?;
        while let Some(Token::Op(op @ (BinaryOp::Mul | BinaryOp::Div))) = self.peek() {
            let op = *op;
            self.pos += 1;
            let rhs = self.parse_factor()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr, FormulaError> {
        let (token, position) = self.next().ok_or(FormulaError::UnexpectedEnd)?;
        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Var(v) => Ok(Expr::Var(v)),
            Token::Op(BinaryOp::Sub) => {
                self.descend()?;
                let inner = self.parse_factor()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Token::Op(BinaryOp::Add) => {
                self.descend()?;
                let inner = self.parse_factor()?;
                self.depth -= 1;
                Ok(inner)
            }
            Token::LParen => {
                self.descend()?;
                let inner = self.parse_expr()?;
                self.depth -= 1;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(inner),
                    Some((token, position)) => Err(FormulaError::UnexpectedToken {
                        token: token.to_string(),
                        position,
                    }),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            other => Err(FormulaError::UnexpectedToken {
                token: other.to_string(),
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> FormulaVars {
        FormulaVars {
            floor_area: 80.0,
            wall_area: 324.0,
            length: 10.0,
            width: 8.0,
            height: 9.0,
            rate: 100.0,
        }
    }

    fn eval(source: &str) -> Result<f64, FormulaError> {
        Formula::parse(source)?.evaluate(&vars())
    }

    #[test]
    fn evaluates_sigil_variables() {
        assert_eq!(eval("$rate * $floor_area / 2"), Ok(4000.0));
    }

    #[test]
    fn respects_precedence_and_parentheses() {
        assert_eq!(eval("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(eval("10 - 4 - 3"), Ok(3.0));
        assert_eq!(eval("-$length + 12"), Ok(2.0));
        assert_eq!(eval("$rate × ($floor_area + $wall_area) ÷ 4"), Ok(10100.0));
    }

    #[test]
    fn accepts_bare_and_camel_case_names() {
        assert_eq!(eval("floorArea + wall_area"), Ok(404.0));
        assert_eq!(eval("2 * height * (length + width)"), Ok(324.0));
    }

    #[test]
    fn rejects_unknown_variables() {
        assert_eq!(
            Formula::parse("$rate * $ceiling"),
            Err(FormulaError::UnknownVariable {
                name: "ceiling".into()
            })
        );
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(Formula::parse(""), Err(FormulaError::Empty));
        assert_eq!(Formula::parse("$rate *"), Err(FormulaError::UnexpectedEnd));
        assert_eq!(Formula::parse("($rate"), Err(FormulaError::UnexpectedEnd));
        assert!(matches!(
            Formula::parse("$rate $rate"),
            Err(FormulaError::UnexpectedToken { position: 6, .. })
        ));
        assert!(matches!(
            Formula::parse("$rate ^ 2"),
            Err(FormulaError::UnexpectedChar { ch: '^', .. })
        ));
        assert!(matches!(
            Formula::parse("1.2.3"),
            Err(FormulaError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn limits_nesting_depth() {
        let ok = format!("{}$rate{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(eval(&ok), Ok(100.0));

        let deep = format!("{}$rate{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(
            Formula::parse(&deep),
            Err(FormulaError::TooDeep { limit: MAX_NESTING })
        );

        let signs = format!("{}$rate", "-".repeat(MAX_NESTING + 1));
        assert_eq!(
            Formula::parse(&signs),
            Err(FormulaError::TooDeep { limit: MAX_NESTING })
        );
    }

    #[test]
    fn limits_formula_length() {
        let nested = format!("{}$rate{}", "(".repeat(200_000), ")".repeat(200_000));
        assert_eq!(
            Formula::parse(&nested),
            Err(FormulaError::TooLong { limit: MAX_TOKENS })
        );

        let chain = vec!["$rate"; 1000].join(" + ");
        assert_eq!(
            Formula::parse(&chain),
            Err(FormulaError::TooLong { limit: MAX_TOKENS })
        );
    }

    #[test]
    fn division_by_zero_is_non_finite() {
        assert_eq!(eval("$rate / 0"), Err(FormulaError::NonFinite));
        assert_eq!(eval("0 / 0"), Err(FormulaError::NonFinite));
    }
}
