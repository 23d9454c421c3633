//! Render an instruction listing as x86-64 AT&T assembly.
//!
//! The evaluation stack is the machine stack: `Push` goes through `%rax`
//! because `push` only takes a 32-bit immediate, and binary operators pop
//! the right operand into `%rdi` and the left into `%rax`.

use crate::ir::Inst;
use crate::parser::BinaryOp;

/// Emit a complete program whose `main` returns the expression's value.
pub fn render(insts: &[Inst]) -> String {
  let mut asm = String::new();
  asm.push_str(".global main\n");
  asm.push_str("main:\n");

  for inst in insts {
    emit_inst(*inst, &mut asm);
  }

  asm.push_str("    pop %rax\n");
  asm.push_str("    ret\n");
  asm
}

fn emit_inst(inst: Inst, asm: &mut String) {
  match inst {
    Inst::Push(value) => {
      asm.push_str(&format!("    mov ${value}, %rax\n"));
      asm.push_str("    push %rax\n");
    }
    Inst::Op(op) => {
      asm.push_str("    pop %rdi\n");
      asm.push_str("    pop %rax\n");
      emit_op(op, asm);
      asm.push_str("    push %rax\n");
    }
  }
}

fn emit_op(op: BinaryOp, asm: &mut String) {
  match op {
    BinaryOp::Add => asm.push_str("    add %rdi, %rax\n"),
    BinaryOp::Sub => asm.push_str("    sub %rdi, %rax\n"),
    BinaryOp::Mul => asm.push_str("    imul %rdi, %rax\n"),
    BinaryOp::Div => {
      asm.push_str("    cqo\n");
      asm.push_str("    idiv %rdi\n");
    }
    BinaryOp::Eq => emit_compare("sete", asm),
    BinaryOp::Ne => emit_compare("setne", asm),
    BinaryOp::Lt => emit_compare("setl", asm),
    BinaryOp::Le => emit_compare("setle", asm),
  }
}

/// Compare `%rax` against `%rdi` and zero-extend the flag into `%rax`.
fn emit_compare(set: &str, asm: &mut String) {
  asm.push_str("    cmp %rdi, %rax\n");
  asm.push_str(&format!("    {set} %al\n"));
  asm.push_str("    movzb %al, %rax\n");
}
