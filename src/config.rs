//! Machine limits and assembler policy. Everything here is fixed for the lifetime of a
//! `ProgramImage`; changing the stack capacity means building a new image.

pub const DEFAULT_STACK_CAPACITY   : usize = 32;
pub const DEFAULT_PROGRAM_CAPACITY : usize = 256;
pub const DEFAULT_LABEL_CAPACITY   : usize = 64;
pub const DEFAULT_LINE_CAPACITY    : usize = 128;

/// How the assembler treats names and literals it cannot make sense of.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Resolution {
  /// Unknown mnemonics, registers, and labels, malformed literals, and wrong operand counts
  /// are assembly errors.
  Strict,
  /// Substitute sentinels and keep going: unknown names become `-1`, malformed literals `0`.
  Permissive
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MachineConfig {
  /// Number of stack cells.
  pub stack_capacity   : usize,
  /// Maximum number of operands in an assembled program.
  pub program_capacity : usize,
  /// Maximum number of labels in an assembled program.
  pub label_capacity   : usize,
  /// Maximum number of source lines read for one program.
  pub line_capacity    : usize,
  pub resolution       : Resolution
}

impl Default for MachineConfig {
  fn default() -> Self {
    MachineConfig{
      stack_capacity   : DEFAULT_STACK_CAPACITY,
      program_capacity : DEFAULT_PROGRAM_CAPACITY,
      label_capacity   : DEFAULT_LABEL_CAPACITY,
      line_capacity    : DEFAULT_LINE_CAPACITY,
      resolution       : Resolution::Strict
    }
  }
}

impl MachineConfig {
  pub fn with_stack_capacity(mut self, stack_capacity: usize) -> Self {
    self.stack_capacity = stack_capacity;
    self
  }

  pub fn with_resolution(mut self, resolution: Resolution) -> Self {
    self.resolution = resolution;
    self
  }
}
