use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::bytecode::{Operation, Word};

/// Exit status when a program is aborted with `HCF`.
pub const ABORT_STATUS: i32 = 2;
/// Exit status when there is nothing to run.
pub const EMPTY_PROGRAM_STATUS: i32 = 1;
pub const FAULT_STATUS: i32 = 3;
pub const ASSEMBLY_STATUS: i32 = 4;
pub const IO_STATUS: i32 = 5;

/// Errors found while assembling source lines. Line numbers count from 1.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum AssemblyError {
  #[error("line {line}: {name} is not an operation")]
  UnknownMnemonic { line: usize, name: String },

  #[error("line {line}: @{name} is not a register")]
  UnknownRegister { line: usize, name: String },

  #[error("line {line}: .{name} is not a defined label")]
  UnknownLabel { line: usize, name: String },

  #[error("line {line}: label .{name} is already defined")]
  DuplicateLabel { line: usize, name: String },

  #[error("line {line}: label definition without a name")]
  EmptyLabel { line: usize },

  #[error("line {line}: {text:?} is not a decimal integer")]
  InvalidLiteral { line: usize, text: String },

  #[error("line {line}: {operation} takes {expected} operand(s) but was given {given}")]
  WrongArity { line: usize, operation: Operation, expected: usize, given: usize },

  #[error("line {line}: program exceeds {capacity} operands")]
  ProgramTooLarge { line: usize, capacity: usize },

  #[error("line {line}: more than {capacity} labels")]
  TooManyLabels { line: usize, capacity: usize },
}

/// Runtime faults. `ip` is the value of the instruction pointer when the fault was raised.
#[derive(Debug, Error)]
pub enum Fault {
  #[error("instruction {ip}: division by zero")]
  DivisionByZero { ip: Word },

  #[error("instruction {ip}: square root of negative value {value}")]
  NegativeRoot { ip: Word, value: Word },

  #[error("instruction {ip}: stack underflow")]
  StackUnderflow { ip: Word },

  #[error("instruction {ip}: stack overflow (capacity {capacity})")]
  StackOverflow { ip: Word, capacity: usize },

  #[error("instruction {ip}: stack pointer {sp} is outside a stack of capacity {capacity}")]
  InvalidStackIndex { ip: Word, sp: Word, capacity: usize },

  #[error("fetch from position {ip} outside a program of {len} operands")]
  FetchOutOfRange { ip: Word, len: usize },

  #[error("instruction {ip}: input exhausted")]
  InputExhausted { ip: Word },

  #[error("instruction {ip}: {text:?} is not a decimal integer")]
  InvalidInput { ip: Word, text: String },

  #[error("i/o error: {0}")]
  Io(#[from] io::Error),
}

/// Errors from reading program text.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error("file '{}' not found", .0.display())]
  NotFound(PathBuf),

  #[error("program exceeds {0} lines")]
  TooManyLines(usize),

  #[error("i/o error: {0}")]
  Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("Cannot parse empty program!")]
  EmptyProgram,

  #[error(transparent)]
  Assembly(#[from] AssemblyError),

  #[error(transparent)]
  Fault(#[from] Fault),

  #[error(transparent)]
  Source(#[from] SourceError),
}

impl Error {
  pub fn exit_status(&self) -> i32 {
    match self {
      Error::EmptyProgram => EMPTY_PROGRAM_STATUS,
      Error::Assembly(_)  => ASSEMBLY_STATUS,
      Error::Fault(_)     => FAULT_STATUS,
      Error::Source(_)    => IO_STATUS,
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
