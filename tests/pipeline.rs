use exprcc::parser::BinaryOp;
use std::io::{self, Write};

use exprcc::{CompileError, Config, Inst, Mode, compile, evaluate, generate_assembly, write_output};

fn eval(expr: &str) -> i64 {
  evaluate(expr).unwrap_or_else(|err| panic!("{expr}: {err}"))
}

#[test]
fn concrete_cases() {
  assert_eq!(eval("1+2*3"), 7);
  assert_eq!(eval("(1+2)*3"), 9);
  assert_eq!(eval("10/3"), 3);
  assert_eq!(eval("1==1"), 1);
  assert_eq!(eval("1<2"), 1);
  assert_eq!(eval("2>=3"), 0);
}

#[test]
fn precedence_and_associativity() {
  assert_eq!(eval("5+20-4"), 21);
  assert_eq!(eval(" 12 + 34 - 5 "), 41);
  assert_eq!(eval("5+6*7"), 47);
  assert_eq!(eval("5*(9-6)"), 15);
  assert_eq!(eval("(3+5)/2"), 4);
  assert_eq!(eval("100/10/5"), 2);
  assert_eq!(eval("10-3-2"), 5);
  assert_eq!(eval("1+1<3==1"), 1);
  assert_eq!(eval("3<2==0"), 1);
}

#[test]
fn comparisons_yield_zero_or_one() {
  let cases = [
    ("0==1", 0),
    ("42==42", 1),
    ("0!=1", 1),
    ("42!=42", 0),
    ("0<1", 1),
    ("1<1", 0),
    ("2<1", 0),
    ("0<=1", 1),
    ("1<=1", 1),
    ("2<=1", 0),
    ("1>0", 1),
    ("1>1", 0),
    ("1>2", 0),
    ("1>=0", 1),
    ("1>=1", 1),
    ("1>=2", 0),
  ];
  for (expr, expected) in cases {
    assert_eq!(eval(expr), expected, "{expr}");
  }
}

#[test]
fn division_truncates_toward_zero() {
  assert_eq!(eval("-7/2"), -3);
  assert_eq!(eval("7/-2"), -3);
  assert_eq!(eval("-7/-2"), 3);
}

#[test]
fn unary_operators() {
  assert_eq!(eval("-10+20"), 10);
  assert_eq!(eval("- -10"), 10);
  assert_eq!(eval("- - +10"), 10);
  assert_eq!(eval("--7"), eval("7"));
  assert_eq!(eval("+(3*4)"), eval("3*4"));
  assert_eq!(eval("-3*-4"), 12);
}

#[test]
fn parenthesization_and_mirroring_hold() {
  let exprs = ["1+2*3", "8-4-2", "-5/2", "2*3<7", "(1)"];
  for expr in exprs {
    assert_eq!(eval(&format!("({expr})")), eval(expr), "{expr}");
  }
  for (a, b) in [(1, 2), (2, 2), (3, 2), (-1, 4)] {
    assert_eq!(eval(&format!("{a}>{b}")), eval(&format!("{b}<{a}")));
    assert_eq!(eval(&format!("{a}>={b}")), eval(&format!("{b}<={a}")));
  }
}

#[test]
fn greater_than_compiles_as_swapped_less_than() {
  assert_eq!(compile("1>2").unwrap(), [
    Inst::Push(2),
    Inst::Push(1),
    Inst::Op(BinaryOp::Lt)
  ]);
}

#[test]
fn errors_produce_no_output() {
  for expr in ["1+", "", "(1+2", "1 2", "1 $ 2", "*3"] {
    let err = generate_assembly(expr).unwrap_err();
    assert!(
      matches!(err, CompileError::Lex { .. } | CompileError::Syntax { .. }),
      "{expr}: {err:?}"
    );
    assert_eq!(err.exit_code(), 1);
  }
}

#[test]
fn trailing_operator_points_past_it() {
  let err = generate_assembly("1+").unwrap_err();
  assert_eq!(err.loc(), Some(2));
  let rendered = err.to_string();
  let mut lines = rendered.lines();
  assert_eq!(lines.next(), Some("1+"));
  assert!(lines.next().unwrap().starts_with("  ^ "));
}

#[test]
fn runtime_division_by_zero_only_affects_eval() {
  assert!(generate_assembly("1/0").is_ok());
  assert!(matches!(
    evaluate("1/0").unwrap_err(),
    CompileError::Runtime { .. }
  ));
}

#[test]
fn caret_counts_characters_not_bytes() {
  let err = generate_assembly("1+é").unwrap_err();
  assert!(matches!(err, CompileError::Lex { .. }));
  assert_eq!(err.loc(), Some(2));
  assert_eq!(err.to_string(), "1+é\n  ^ invalid token: 'é'");
}

fn config(mode: Mode, expr: &str) -> Config {
  Config {
    mode,
    expr: expr.to_string(),
  }
}

#[test]
fn write_output_follows_mode() {
  let mut out = Vec::new();
  write_output(&config(Mode::Eval, "2>=3"), &mut out).unwrap();
  assert_eq!(out, b"0\n");

  let mut out = Vec::new();
  write_output(&config(Mode::Assembly, "1"), &mut out).unwrap();
  assert_eq!(String::from_utf8(out).unwrap(), generate_assembly("1").unwrap());
}

#[test]
fn write_output_leaves_sink_empty_on_error() {
  let mut out = Vec::new();
  assert!(write_output(&config(Mode::Assembly, "1+"), &mut out).is_err());
  assert!(out.is_empty());
}

struct BrokenPipe;

impl Write for BrokenPipe {
  fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
    Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

#[test]
fn write_failure_is_an_io_error() {
  let err = write_output(&config(Mode::Assembly, "1+2"), &mut BrokenPipe).unwrap_err();
  assert!(matches!(err, CompileError::Io { .. }));
  assert_eq!(err.to_string(), "failed to write output: closed");
  assert_eq!(err.exit_code(), 1);
  assert_eq!(err.loc(), None);
}
