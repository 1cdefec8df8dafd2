/*!
  The interactive loop. Every line is assembled on its own and run against the machine's image,
  which lives for the whole session, so values pushed on one line are there on the next. Lines
  starting with `:` are session commands rather than assembly:

  | Command    | Effect                                                    |
  |:-----------|:----------------------------------------------------------|
  | `:stack N` | Start over with an empty image whose stack holds N cells. |
  | `:stack`   | Print the current stack capacity.                         |
  | `:state`   | Print the registers and the live stack.                   |
  | `:quit`    | Leave, with `ext` as the status.                          |

  Assembly errors and faults are reported and the session goes on. `HLT`, `RET`, and `HCF` end
  it, as does the end of input.
*/

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::bytecode::assemble;
use crate::config::MachineConfig;
use crate::error::Fault;
use crate::image::ProgramImage;
use crate::machine::{Machine, Outcome};

pub const REPL_PROMPT: &str = "<- ";

enum Command<'a> {
  Stack(Option<&'a str>),
  State,
  Quit,
  Unknown(&'a str)
}

impl<'a> Command<'a> {
  /// `text` is the line without its leading colon.
  fn parse(text: &'a str) -> Command<'a> {
    let mut words = text.split_whitespace();
    match words.next() {
      Some("stack") => Command::Stack(words.next()),
      Some("state") => Command::State,
      Some("quit")  => Command::Quit,
      _             => Command::Unknown(text.trim())
    }
  }
}

/// Carries out a session command. `Some` ends the session.
fn command<R, W>(machine: &mut Machine<R, W>, config: &mut MachineConfig, request: Command)
  -> Result<Option<Outcome>, Fault>
  where R: BufRead,
        W: Write
{
  match request {

    Command::Quit => return Ok(Some(machine.halted())),

    Command::State => {
      let state = machine.image().to_string();
      writeln!(machine.output_mut(), "{}", state)?;
    }

    Command::Stack(None) => {
      let capacity = machine.image().stack_capacity();
      writeln!(machine.output_mut(), "tvm maximal stack size: {} x 4 bytes", capacity)?;
    }

    Command::Stack(Some(text)) => {
      match text.parse::<usize>() {
        Ok(capacity) => {
          config.stack_capacity = capacity;
          machine.replace_image(ProgramImage::from_config(config));
          debug!(capacity, "rebuilt program image");
          writeln!(machine.output_mut(), "=> Stack holds {} values", capacity)?;
        }
        Err(_) => {
          writeln!(machine.output_mut(), "!! {:?} is not a stack size!", text)?;
        }
      }
    }

    Command::Unknown(text) => {
      writeln!(machine.output_mut(), "!! Unknown command :{}!", text)?;
    }

  }
  Ok(None)
}

/**
  Runs a session until it is ended by a halting instruction, `:quit`, or the end of input.
  A line runs at most one pass, so `RPT` and backward jumps return to the prompt. Lines
  and `RDV` values are read from the machine's own input, so a program can read the lines that
  follow it. Only an I/O failure ends the session with an error.
*/
pub fn run<R, W>(machine: &mut Machine<R, W>, config: &mut MachineConfig) -> Result<Outcome, Fault>
  where R: BufRead,
        W: Write
{
  debug!(stack_capacity = config.stack_capacity, "starting interactive session");
  loop {
    write!(machine.output_mut(), "{}", REPL_PROMPT)?;
    machine.output_mut().flush()?;

    let line = match machine.read_line()? {
      Some(line) => line,
      None => {
        writeln!(machine.output_mut())?;
        return Ok(machine.halted());
      }
    };
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    if let Some(text) = line.strip_prefix(':') {
      match command(machine, config, Command::parse(text))? {
        Some(outcome) => return Ok(outcome),
        None          => continue
      }
    }

    let program = match assemble(&[line][..], config) {
      Ok(program) => program,
      Err(error) => {
        writeln!(machine.output_mut(), "!! {}", error)?;
        continue;
      }
    };

    match machine.run_line(&program) {
      Ok(None)          => continue,
      Ok(Some(outcome)) => return Ok(outcome),
      Err(Fault::Io(error)) => return Err(Fault::Io(error)),
      Err(fault) => {
        warn!(%fault, "line faulted");
        writeln!(machine.output_mut(), "!! {}", fault)?;
      }
    }
  }
}
