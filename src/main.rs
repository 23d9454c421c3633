use std::io;
use std::process;

use exprcc::{CompileResult, Config};
use tracing_subscriber::EnvFilter;

fn run() -> CompileResult<()> {
  let config = Config::from_env()?;
  tracing::debug!(expr = %config.expr, mode = ?config.mode, "compiling");
  exprcc::write_output(&config, &mut io::stdout().lock())
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(io::stderr)
    .with_target(false)
    .init();

  if let Err(err) = run() {
    tracing::debug!(error = ?err, "compilation failed");
    eprintln!("{err}");
    process::exit(err.exit_code());
  }
}
