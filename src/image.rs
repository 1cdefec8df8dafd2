/*!
  A `ProgramImage` owns the mutable state of one run or one REPL session: the register file and
  the stack. The stack has no cursor of its own. Its top is whatever `sp` says, so assembly that
  writes `sp` moves the stack, and every access is checked against the capacity.
*/

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use prettytable::{row, table, Table};

use crate::bytecode::Word;
use crate::config::MachineConfig;
use crate::error::Fault;
use crate::listing::TABLE_DISPLAY_FORMAT;
use crate::registers::{Register, RegisterFile};

#[derive(Clone, Debug)]
pub struct ProgramImage {
  registers : RegisterFile,
  /// Fixed at construction, never grown.
  stack     : Box<[Word]>
}

impl ProgramImage {

  // region Construction

  pub fn new(stack_capacity: usize) -> ProgramImage {
    ProgramImage{
      registers : RegisterFile::new(),
      stack     : vec![0; stack_capacity].into_boxed_slice()
    }
  }

  pub fn from_config(config: &MachineConfig) -> ProgramImage {
    ProgramImage::new(config.stack_capacity)
  }

  // endregion

  // region Registers

  pub fn registers(&self) -> &RegisterFile {
    &self.registers
  }

  pub fn get(&self, register: Register) -> Word {
    self.registers[register]
  }

  pub fn set(&mut self, register: Register, value: Word) {
    self.registers[register] = value;
  }

  pub fn ip(&self) -> Word {
    self.registers[Register::Ip]
  }

  pub fn set_ip(&mut self, ip: Word) {
    self.registers[Register::Ip] = ip;
  }

  /// Exchanges `register` with `swp`.
  pub fn swap(&mut self, register: Register) {
    let swap_value = self.registers[Register::Swp];
    self.registers[Register::Swp] = self.registers[register];
    self.registers[register] = swap_value;
  }

  // endregion

  // region Stack

  pub fn stack_capacity(&self) -> usize {
    self.stack.len()
  }

  /// Index of the top cell, or a fault if `sp` does not point into the stack.
  fn top_index(&self) -> Result<usize, Fault> {
    let sp = self.registers[Register::Sp];
    if sp < 0 {
      return Err(Fault::StackUnderflow { ip: self.ip() });
    }
    match usize::try_from(sp) {
      Ok(index) if index < self.stack.len() => Ok(index),
      _ => Err(Fault::InvalidStackIndex { ip: self.ip(), sp, capacity: self.stack.len() })
    }
  }

  pub fn push(&mut self, value: Word) -> Result<(), Fault> {
    let sp = self.registers[Register::Sp];
    if sp < -1 {
      return Err(Fault::InvalidStackIndex { ip: self.ip(), sp, capacity: self.stack.len() });
    }
    let next = i64::from(sp) + 1;
    if next >= self.stack.len() as i64 {
      return Err(Fault::StackOverflow { ip: self.ip(), capacity: self.stack.len() });
    }
    self.stack[next as usize] = value;
    self.registers[Register::Sp] = sp + 1;
    Ok(())
  }

  pub fn pop(&mut self) -> Result<Word, Fault> {
    let index = self.top_index()?;
    self.registers[Register::Sp] -= 1;
    Ok(self.stack[index])
  }

  pub fn peek(&self) -> Result<Word, Fault> {
    Ok(self.stack[self.top_index()?])
  }

  /// The live part of the stack, bottom to top, or a fault if `sp` is out of range.
  pub fn live_stack(&self) -> Result<&[Word], Fault> {
    match self.registers[Register::Sp] {
      -1 => Ok(&[]),
      _  => Ok(&self.stack[..=self.top_index()?])
    }
  }

  /// The live part of the stack, bottom to top. Empty if `sp` is out of range.
  pub fn stack(&self) -> &[Word] {
    match self.top_index() {
      Ok(index) => &self.stack[..=index],
      Err(_)    => &[]
    }
  }

  // endregion

  fn make_state_table(&self) -> Table {
    let mut registers = Table::new();
    registers.set_format(*TABLE_DISPLAY_FORMAT);
    registers.set_titles(row![ubr->"Register", ubl->"Value"]);
    for (register, value) in self.registers.iter() {
      registers.add_row(row![r->format!("@{} =", register), value]);
    }

    let mut stack = Table::new();
    stack.set_format(*TABLE_DISPLAY_FORMAT);
    stack.set_titles(row![ubr->"Index", ubl->"Value"]);
    let live = self.stack();
    // Top first, marked.
    for (i, value) in live.iter().enumerate().rev() {
      match i + 1 == live.len() {
        true  => stack.add_row(row![r->format!("* --> [{}] =", i), value]),
        false => stack.add_row(row![r->format!("[{}] =", i), value])
      };
    }

    let mut combined = table!([registers, stack]);
    combined.set_titles(row![ub->"Registers", ub->format!("Stack ({})", self.stack.len())]);
    combined.set_format(*TABLE_DISPLAY_FORMAT);
    combined
  }
}

impl Display for ProgramImage {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.make_state_table())
  }
}
