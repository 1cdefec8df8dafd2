use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tvm::error::ABORT_STATUS;
use tvm::listing::{operations_listing, registers_listing};
use tvm::{
  assemble,
  repl,
  source,
  Error,
  Machine,
  MachineConfig,
  Outcome,
  ProgramImage,
  Resolution
};

/// Environment variable holding the log filter, e.g. `TVM_LOG=tvm=trace`.
const LOG_ENV: &str = "TVM_LOG";

#[derive(Parser, Debug)]
#[command(name = "tvm")]
#[command(version)]
#[command(about = "Tiny Virtual Machine", long_about = None)]
struct Args {
  /// Program to run. `.ins` is appended if the name as given does not exist. Without a file,
  /// program lines are read from standard input until an empty line.
  #[arg(value_name = "FILE")]
  file: Option<PathBuf>,

  /// Enter the interactive REPL instead of running a program.
  #[arg(long)]
  repl: bool,

  /// Stack capacity in values. Without a value, print the capacity.
  #[arg(long, value_name = "N", num_args = 0..=1)]
  stack: Option<Option<usize>>,

  /// List all instructions and exit.
  #[arg(long)]
  ops: bool,

  /// List all registers and exit.
  #[arg(long)]
  regs: bool,

  /// Substitute sentinels for unknown names and malformed literals instead of failing.
  #[arg(long)]
  permissive: bool,

  /// Print the assembled program before running it.
  #[arg(long)]
  dump: bool,
}

fn main() {
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  #[cfg(feature = "trace_computation")]
  debug!("Computation Tracing ENABLED");

  let args = Args::parse();

  match run(args) {
    Ok(status) => process::exit(status),
    Err(error) => {
      eprintln!("{}", error);
      process::exit(error.exit_status());
    }
  }
}

/// Prints the closing line for a halted run and gives the process exit status.
fn finish<W: Write>(outcome: Outcome, output: &mut W) -> Result<i32, Error> {
  match outcome {
    Outcome::Halted { status, steps } => {
      writeln!(output, "=> Finished with code {} after {} instructions!", status, steps)
        .and_then(|_| output.flush())
        .map_err(tvm::Fault::from)?;
      Ok(status)
    }
    Outcome::Aborted { steps } => {
      debug!(steps, "aborted");
      output.flush().map_err(tvm::Fault::from)?;
      process::exit(ABORT_STATUS);
    }
  }
}

fn run(args: Args) -> Result<i32, Error> {
  if args.ops {
    print!("{}", operations_listing());
    return Ok(0);
  }
  if args.regs {
    print!("{}", registers_listing());
    return Ok(0);
  }

  let mut config = MachineConfig::default();
  if args.permissive {
    config = config.with_resolution(Resolution::Permissive);
  }
  match args.stack {
    Some(Some(capacity)) => config = config.with_stack_capacity(capacity),
    Some(None) => println!("tvm maximal stack size: {} x 4 bytes", config.stack_capacity),
    None => {}
  }
  debug!(?config, "configured");

  // Program lines, `RDV` values, and REPL lines all come from the same stdin.
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut input = stdin.lock();
  let mut output = stdout.lock();

  if args.repl {
    let mut machine = Machine::new(ProgramImage::from_config(&config), input, output);
    let outcome = repl::run(&mut machine, &mut config)?;
    return finish(outcome, machine.output_mut());
  }

  let lines = match &args.file {
    Some(path) => source::read_program_file(path, config.line_capacity)?,
    None => source::read_program_lines(&mut input, &mut output, config.line_capacity)?
  };

  let program = assemble(&lines[..], &config)?;
  if program.is_empty() {
    return Err(Error::EmptyProgram);
  }
  if args.dump {
    writeln!(output, "{}", program).map_err(tvm::Fault::from)?;
  }

  let mut machine = Machine::new(ProgramImage::from_config(&config), input, output);
  let outcome = machine.run(&program)?;
  finish(outcome, machine.output_mut())
}
