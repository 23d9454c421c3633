//! Code generation: lower the parsed AST into stack-machine instructions.
//!
//! The walk is strictly post-order. Every subtree leaves exactly one value
//! on the stack, so by the time an operator is emitted the right operand is
//! on top and the left operand sits just below it.

use crate::ir::Inst;
use crate::parser::AstNode;

/// Ordered destination for generated instructions.
pub trait InstSink {
  fn emit(&mut self, inst: Inst);
}

impl InstSink for Vec<Inst> {
  fn emit(&mut self, inst: Inst) {
    self.push(inst);
  }
}

/// Generate the full instruction listing for an expression.
pub fn generate(node: &AstNode) -> Vec<Inst> {
  let mut insts = Vec::new();
  emit_expr(node, &mut insts);
  tracing::debug!(count = insts.len(), "generated instructions");
  insts
}

/// Emit stack-based code for a single expression node into `sink`.
pub fn emit_expr(node: &AstNode, sink: &mut impl InstSink) {
  match node {
    AstNode::Num { value } => sink.emit(Inst::Push(*value)),
    AstNode::Binary { op, lhs, rhs } => {
      emit_expr(lhs, sink);
      emit_expr(rhs, sink);
      sink.emit(Inst::Op(*op));
    }
  }
}
