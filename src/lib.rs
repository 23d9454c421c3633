//! Crate root: wires together the compilation pipeline.
//!
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and returns the expression AST.
//! - `codegen` walks the AST into a stack-machine listing (`ir`).
//! - `asm` renders that listing as x86-64 AT&T assembly.
//! - `vm` executes a listing directly, mirroring what the assembly computes.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod asm;
pub mod codegen;
pub mod config;
pub mod error;
pub mod ir;
pub mod parser;
pub mod tokenizer;
pub mod vm;

use std::io::Write;

use snafu::ResultExt;

pub use config::{Config, Mode};
pub use error::{CompileError, CompileResult};
pub use ir::Inst;

/// Lex, parse and generate the instruction listing for an expression.
///
/// Errors surface before any instruction is generated, so a failed
/// compilation never yields partial output.
pub fn compile(expr: &str) -> CompileResult<Vec<Inst>> {
  let tokens = tokenizer::tokenize(expr)?;
  let node = parser::parse(tokens, expr)?;
  Ok(codegen::generate(&node))
}

/// Compile a source string into AT&T assembly.
pub fn generate_assembly(expr: &str) -> CompileResult<String> {
  let insts = compile(expr)?;
  Ok(asm::render(&insts))
}

/// Compile and execute on the reference stack machine.
pub fn evaluate(expr: &str) -> CompileResult<i64> {
  let insts = compile(expr)?;
  vm::run(&insts)
}

/// Compile `config.expr` and write the result for its mode to `out`.
///
/// Nothing is written unless compilation (and evaluation) succeeded.
pub fn write_output(config: &Config, out: &mut impl Write) -> CompileResult<()> {
  let output = match config.mode {
    Mode::Assembly => generate_assembly(&config.expr)?,
    Mode::Eval => format!("{}\n", evaluate(&config.expr)?),
  };
  out.write_all(output.as_bytes()).context(error::IoSnafu)?;
  out.flush().context(error::IoSnafu)
}
