//! Reference stack machine for instruction listings.
//!
//! Executes exactly the semantics the assembly backend lowers to, which lets
//! the pipeline be checked end to end without an assembler. Arithmetic wraps
//! at 64 bits; the two cases where `idiv` traps are reported as errors.

use crate::error::{CompileError, CompileResult};
use crate::ir::Inst;
use crate::parser::BinaryOp;

/// Run `insts` and return the single value left on the stack.
pub fn run(insts: &[Inst]) -> CompileResult<i64> {
  let mut stack: Vec<i64> = Vec::new();

  for inst in insts {
    match *inst {
      Inst::Push(value) => stack.push(value),
      Inst::Op(op) => {
        let rhs = pop(&mut stack, *inst)?;
        let lhs = pop(&mut stack, *inst)?;
        stack.push(apply(op, lhs, rhs)?);
      }
    }
  }

  match stack.as_slice() {
    [value] => Ok(*value),
    _ => Err(CompileError::runtime(format!(
      "expected one value on the stack, found {}",
      stack.len()
    ))),
  }
}

fn apply(op: BinaryOp, lhs: i64, rhs: i64) -> CompileResult<i64> {
  let value = match op {
    BinaryOp::Add => lhs.wrapping_add(rhs),
    BinaryOp::Sub => lhs.wrapping_sub(rhs),
    BinaryOp::Mul => lhs.wrapping_mul(rhs),
    BinaryOp::Div => lhs
      .checked_div(rhs)
      .ok_or_else(|| CompileError::runtime(format!("cannot divide {lhs} by {rhs}")))?,
    BinaryOp::Eq => i64::from(lhs == rhs),
    BinaryOp::Ne => i64::from(lhs != rhs),
    BinaryOp::Lt => i64::from(lhs < rhs),
    BinaryOp::Le => i64::from(lhs <= rhs),
  };
  Ok(value)
}

fn pop(stack: &mut Vec<i64>, inst: Inst) -> CompileResult<i64> {
  stack
    .pop()
    .ok_or_else(|| CompileError::runtime(format!("stack underflow at `{inst}`")))
}
