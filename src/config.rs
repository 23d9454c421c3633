//! Command-line configuration.
//!
//! The command line is exactly one expression. The evaluation aid is
//! switched on through `EXPRCC_EVAL` so it never changes the arity.

use std::env;

use crate::error::{CompileError, CompileResult};

pub const EVAL_ENV_VAR: &str = "EXPRCC_EVAL";

/// What the binary should print for the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Print the assembly listing.
  Assembly,
  /// Print the value computed by the reference stack machine.
  Eval,
}

impl Mode {
  /// Interpret an `EXPRCC_EVAL` value; unset or unrecognised means assembly.
  pub fn from_flag(value: Option<&str>) -> Self {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
      Some("1" | "true" | "yes" | "on") => Mode::Eval,
      _ => Mode::Assembly,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub mode: Mode,
  pub expr: String,
}

impl Config {
  /// Read the process arguments and `EXPRCC_EVAL`.
  pub fn from_env() -> CompileResult<Self> {
    let flag = env::var(EVAL_ENV_VAR).ok();
    Self::from_args(env::args(), Mode::from_flag(flag.as_deref()))
  }

  /// Accepts exactly `<program> <expr>`.
  pub fn from_args<I>(args: I, mode: Mode) -> CompileResult<Self>
  where
    I: IntoIterator<Item = String>,
  {
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "exprcc".to_string());
    let rest: Vec<String> = args.collect();

    match rest.as_slice() {
      [expr] => Ok(Self {
        mode,
        expr: expr.clone(),
      }),
      _ => Err(CompileError::ArgumentCount { program }),
    }
  }
}
