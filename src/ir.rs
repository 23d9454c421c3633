//! The stack-machine instruction set the generator targets.
//!
//! `Op` pops the right operand, then the left operand, and pushes one
//! result back. Division truncates toward zero; comparisons yield 0 or 1.

use std::fmt;

use crate::parser::BinaryOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
  Push(i64),
  Op(BinaryOp),
}

impl fmt::Display for Inst {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Inst::Push(value) => write!(f, "push {value}"),
      Inst::Op(op) => f.write_str(op.mnemonic()),
    }
  }
}

impl BinaryOp {
  pub fn mnemonic(self) -> &'static str {
    match self {
      BinaryOp::Add => "add",
      BinaryOp::Sub => "sub",
      BinaryOp::Mul => "mul",
      BinaryOp::Div => "div",
      BinaryOp::Eq => "eq",
      BinaryOp::Ne => "ne",
      BinaryOp::Lt => "lt",
      BinaryOp::Le => "le",
    }
  }
}
