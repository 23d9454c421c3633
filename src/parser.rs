//! Recursive-descent parser producing the expression AST.
//!
//! Each precedence level is one function; the binary levels loop so that
//! operators of equal precedence associate to the left:
//!
//! ```text
//! expr       = equality
//! equality   = relational ("==" relational | "!=" relational)*
//! relational = add ("<" add | "<=" add | ">" add | ">=" add)*
//! add        = mul ("+" mul | "-" mul)*
//! mul        = unary ("*" unary | "/" unary)*
//! unary      = ("+" | "-")? unary | primary
//! primary    = "(" expr ")" | num
//! ```
//!
//! `>`/`>=` are canonicalised into `<`/`<=` with swapped operands, and unary
//! minus becomes `0 - x`, so the tree only ever holds the eight operators in
//! [`BinaryOp`].

use crate::error::{CompileError, CompileResult};
use crate::tokenizer::{Token, TokenKind, describe_token, token_text};

/// Binary operators that survive into the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Eq,
  Ne,
  Lt,
  Le,
}

/// Expression tree produced by the parser. Operator nodes own both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
  Num {
    value: i64,
  },
  Binary {
    op: BinaryOp,
    lhs: Box<AstNode>,
    rhs: Box<AstNode>,
  },
}

impl AstNode {
  pub fn number(value: i64) -> Self {
    Self::Num { value }
  }

  pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> Self {
    Self::Binary {
      op,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }
}

/// Parse the whole token stream as a single expression.
///
/// Tokens left over once the expression is complete are rejected, so `1 2`
/// is a syntax error rather than silently compiling to `1`.
pub fn parse(tokens: Vec<Token>, source: &str) -> CompileResult<AstNode> {
  let mut stream = TokenStream::new(tokens, source);
  let node = parse_expr(&mut stream)?;

  if !stream.is_eof() {
    let (loc, got) = stream.describe_current();
    return Err(CompileError::syntax_at(
      source,
      loc,
      format!("unexpected token \"{got}\""),
    ));
  }

  Ok(node)
}

fn parse_expr(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_equality(stream)
}

fn parse_equality(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_relational(stream)?;

  loop {
    if stream.equal("==") {
      let rhs = parse_relational(stream)?;
      node = AstNode::binary(BinaryOp::Eq, node, rhs);
    } else if stream.equal("!=") {
      let rhs = parse_relational(stream)?;
      node = AstNode::binary(BinaryOp::Ne, node, rhs);
    } else {
      return Ok(node);
    }
  }
}

fn parse_relational(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_add(stream)?;

  loop {
    if stream.equal("<") {
      let rhs = parse_add(stream)?;
      node = AstNode::binary(BinaryOp::Lt, node, rhs);
    } else if stream.equal("<=") {
      let rhs = parse_add(stream)?;
      node = AstNode::binary(BinaryOp::Le, node, rhs);
    } else if stream.equal(">") {
      let rhs = parse_add(stream)?;
      node = AstNode::binary(BinaryOp::Lt, rhs, node);
    } else if stream.equal(">=") {
      let rhs = parse_add(stream)?;
      node = AstNode::binary(BinaryOp::Le, rhs, node);
    } else {
      return Ok(node);
    }
  }
}

fn parse_add(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_mul(stream)?;

  loop {
    let op = if stream.equal("+") {
      BinaryOp::Add
    } else if stream.equal("-") {
      BinaryOp::Sub
    } else {
      return Ok(node);
    };

    let rhs = parse_mul(stream)?;
    node = AstNode::binary(op, node, rhs);
  }
}

fn parse_mul(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_unary(stream)?;

  loop {
    let op = if stream.equal("*") {
      BinaryOp::Mul
    } else if stream.equal("/") {
      BinaryOp::Div
    } else {
      return Ok(node);
    };

    let rhs = parse_unary(stream)?;
    node = AstNode::binary(op, node, rhs);
  }
}

fn parse_unary(stream: &mut TokenStream) -> CompileResult<AstNode> {
  if stream.equal("+") {
    return parse_unary(stream);
  }

  if stream.equal("-") {
    let operand = parse_unary(stream)?;
    return Ok(AstNode::binary(BinaryOp::Sub, AstNode::number(0), operand));
  }

  parse_primary(stream)
}

fn parse_primary(stream: &mut TokenStream) -> CompileResult<AstNode> {
  if stream.equal("(") {
    let node = parse_expr(stream)?;
    stream.skip(")")?;
    return Ok(node);
  }

  let value = stream.get_number()?;
  Ok(AstNode::number(value))
}

/// Parse cursor over the token vector. Only the consumption primitives move
/// `pos`; it never runs past the trailing `Eof`.
struct TokenStream<'a> {
  tokens: Vec<Token>,
  source: &'a str,
  pos: usize,
}

impl<'a> TokenStream<'a> {
  fn new(tokens: Vec<Token>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
    }
  }

  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.pos)
  }

  /// Consume the current token if it is the given punctuator.
  fn equal(&mut self, op: &str) -> bool {
    if let Some(token) = self.peek()
      && token.kind == TokenKind::Punctuator
      && token.len == op.len()
      && token_text(token, self.source) == op
    {
      self.pos += 1;
      return true;
    }
    false
  }

  fn skip(&mut self, s: &str) -> CompileResult<()> {
    if self.equal(s) {
      return Ok(());
    }
    let (loc, got) = self.describe_current();
    Err(CompileError::syntax_at(
      self.source,
      loc,
      format!("expected \"{s}\", but got \"{got}\""),
    ))
  }

  fn get_number(&mut self) -> CompileResult<i64> {
    if let Some(token) = self.peek()
      && token.kind == TokenKind::Num
    {
      let value = token.value.ok_or_else(|| {
        CompileError::syntax_at(
          self.source,
          token.loc,
          "internal error: numeric token missing value",
        )
      })?;
      self.pos += 1;
      return Ok(value);
    }

    let (loc, got) = self.describe_current();
    Err(CompileError::syntax_at(
      self.source,
      loc,
      format!("expected a number, but got \"{got}\""),
    ))
  }

  fn describe_current(&self) -> (usize, String) {
    match self.peek() {
      Some(token) => (token.loc, describe_token(Some(token), self.source)),
      None => (self.source.len(), "EOF".to_string()),
    }
  }

  fn is_eof(&self) -> bool {
    matches!(self.peek().map(|token| token.kind), Some(TokenKind::Eof))
  }
}
