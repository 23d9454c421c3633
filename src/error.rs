//! Shared error utilities used across the compilation pipeline.
//!
//! Diagnostics follow the chibicc convention: the offending source line is
//! echoed back and a caret marks the byte where things went wrong. Every
//! error is fatal; the driver renders it and exits with status 1.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CompileError {
  /// The CLI was not given exactly one expression.
  #[snafu(display("usage: {program} <expr>"))]
  ArgumentCount { program: String },

  /// A character that starts no token.
  #[snafu(display("{expr_line}\n{marker} {message}"))]
  Lex {
    loc: usize,
    expr_line: String,
    marker: String,
    message: String,
  },

  /// The token stream does not match the grammar.
  #[snafu(display("{expr_line}\n{marker} {message}"))]
  Syntax {
    loc: usize,
    expr_line: String,
    marker: String,
    message: String,
  },

  /// Raised by the reference stack machine, never by compilation.
  #[snafu(display("runtime error: {message}"))]
  Runtime { message: String },

  #[snafu(display("failed to write output: {source}"))]
  Io { source: std::io::Error },
}

impl CompileError {
  /// Lexing error anchored at a byte offset in the source.
  pub fn lex_at(expr: &str, loc: usize, message: impl Into<String>) -> Self {
    let (expr_line, marker) = caret(expr, loc);
    Self::Lex {
      loc,
      expr_line,
      marker,
      message: message.into(),
    }
  }

  /// Syntax error anchored at a byte offset in the source.
  pub fn syntax_at(expr: &str, loc: usize, message: impl Into<String>) -> Self {
    let (expr_line, marker) = caret(expr, loc);
    Self::Syntax {
      loc,
      expr_line,
      marker,
      message: message.into(),
    }
  }

  pub fn runtime(message: impl Into<String>) -> Self {
    Self::Runtime {
      message: message.into(),
    }
  }

  /// Source offset for errors that point into the expression.
  pub fn loc(&self) -> Option<usize> {
    match self {
      Self::Lex { loc, .. } | Self::Syntax { loc, .. } => Some(*loc),
      _ => None,
    }
  }

  /// Every failure terminates the process with status 1.
  pub fn exit_code(&self) -> i32 {
    1
  }
}

fn caret(expr: &str, loc: usize) -> (String, String) {
  let safe_loc = loc.min(expr.len());
  let column = expr
    .get(..safe_loc)
    .map_or(safe_loc, |prefix| prefix.chars().count());
  (expr.to_string(), format!("{}^", " ".repeat(column)))
}
