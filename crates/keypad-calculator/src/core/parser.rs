//! Tokenizer and recursive-descent parser for the keypad grammar
//!
//! Input is expected to have passed [`crate::core::sanitize::prepare`], but
//! the tokenizer still rejects any character it does not know.

use crate::core::{CalcError, CalcResult};

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl BinaryOp {
    /// Maps an operator character, accepting the `×` and `÷` glyphs
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Returns the ASCII operator character
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Applies the operator; the caller checks the result for finiteness
    #[must_use]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }
}

/// Returns true for the four binary operator characters
#[must_use]
pub const fn is_binary_operator(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/')
}

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary (or, for `+`/`-`, unary) operator
    Operator(BinaryOp),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: BinaryOp,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: BinaryOp, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            _ => match BinaryOp::from_char(ch) {
                Some(op) => {
                    self.advance();
                    Token::Operator(op)
                }
                None => {
                    return Err(CalcError::syntax(format!("unexpected character '{ch}'")));
                }
            },
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            match ch {
                '0'..='9' => self.advance(),
                '.' if has_dot => {
                    return Err(CalcError::syntax(format!(
                        "invalid number '{}'",
                        &self.input[start..=self.pos]
                    )));
                }
                '.' => {
                    has_dot = true;
                    self.advance();
                }
                _ => break,
            }
        }

        let num_str = &self.input[start..self.pos];
        num_str
            .parse()
            .map(Token::Number)
            .map_err(|_| CalcError::syntax(format!("invalid number '{num_str}'")))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('-' | '+') unary | primary
/// primary    ::= NUMBER | '(' expression ')'
/// ```
///
/// Parentheses and unary signs may nest at most [`Parser::MAX_NESTING`]
/// levels, and the resulting tree is at most [`Parser::MAX_DEPTH`] nodes deep,
/// so evaluating and dropping the AST never recurses without bound.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
}

/// A parsed subtree and its depth
type Parsed = (AstNode, usize);

impl Parser {
    /// Deepest allowed nesting of parentheses and unary signs
    pub const MAX_NESTING: usize = 256;

    /// Deepest allowed AST (a chain of `n` binary operators is `n` deep)
    pub const MAX_DEPTH: usize = 1024;

    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into a single AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::syntax("nothing to evaluate"));
        }

        let (ast, _) = self.parse_expression()?;
        if let Some(token) = self.current() {
            return Err(CalcError::syntax(format!(
                "unexpected {token:?} at position {}",
                self.pos
            )));
        }
        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Runs `parse` one nesting level deeper
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> CalcResult<Parsed>,
    ) -> CalcResult<Parsed> {
        if self.nesting >= Self::MAX_NESTING {
            return Err(CalcError::syntax("nesting too deep"));
        }
        self.nesting += 1;
        let parsed = parse(self);
        self.nesting -= 1;
        parsed
    }

    /// Depth of a node whose deepest child is `child_depth` deep
    fn node_depth(child_depth: usize) -> CalcResult<usize> {
        let depth = child_depth + 1;
        if depth > Self::MAX_DEPTH {
            return Err(CalcError::syntax("expression too long"));
        }
        Ok(depth)
    }

    fn parse_expression(&mut self) -> CalcResult<Parsed> {
        let (mut left, mut depth) = self.parse_term()?;

        while let Some(&Token::Operator(op @ (BinaryOp::Add | BinaryOp::Subtract))) = self.current()
        {
            self.advance();
            let (right, right_depth) = self.parse_term()?;
            depth = Self::node_depth(depth.max(right_depth))?;
            left = AstNode::binary(left, op, right);
        }

        Ok((left, depth))
    }

    fn parse_term(&mut self) -> CalcResult<Parsed> {
        let (mut left, mut depth) = self.parse_unary()?;

        while let Some(&Token::Operator(op @ (BinaryOp::Multiply | BinaryOp::Divide))) =
            self.current()
        {
            self.advance();
            let (right, right_depth) = self.parse_unary()?;
            depth = Self::node_depth(depth.max(right_depth))?;
            left = AstNode::binary(left, op, right);
        }

        Ok((left, depth))
    }

    fn parse_unary(&mut self) -> CalcResult<Parsed> {
        match self.current() {
            Some(Token::Operator(BinaryOp::Subtract)) => {
                self.advance();
                let (inner, depth) = self.nested(Self::parse_unary)?;
                Ok((AstNode::negate(inner), Self::node_depth(depth)?))
            }
            Some(Token::Operator(BinaryOp::Add)) => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> CalcResult<Parsed> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::syntax("unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok((AstNode::Number(*n), 0)),
            Token::LeftParen => {
                let expr = self.nested(Self::parse_expression)?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    Some(t) => Err(CalcError::syntax(format!("expected ')' but found {t:?}"))),
                    None => Err(CalcError::syntax("unclosed parenthesis")),
                }
            }
            _ => Err(CalcError::syntax(format!("unexpected token {token:?}"))),
        }
    }
}
