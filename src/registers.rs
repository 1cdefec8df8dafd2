/*!
  The register file. Every register is a plain `Word` and every register is addressable from
  assembly, including the three that drive the machine: `ip` is the fetch cursor, `sp` is the
  index of the top of the stack, and `ext` is the exit status reported on halt.
*/

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use strum_macros::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{EnumCount as _, IntoEnumIterator};

use crate::bytecode::Word;

#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, EnumCount, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum Register {
  // General purpose //
  Eax,
  Ebx,
  Ecx,
  // Swap //
  Swp,
  // Machine //
  Ip,
  Sp,
  Ext,
}

impl Register {
  pub fn id(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn from_id(id: Word) -> Option<Register> {
    u8::try_from(id)
      .ok()
      .and_then(|byte| Register::try_from(byte).ok())
  }

  pub fn from_name(name: &str) -> Option<Register> {
    Register::from_str(name).ok()
  }

  pub fn name(&self) -> &'static str {
    self.into()
  }

  pub fn purpose(&self) -> &'static str {
    match self {
      Register::Eax | Register::Ebx | Register::Ecx => "general purpose",
      Register::Swp => "swap",
      Register::Ip  => "instruction pointer",
      Register::Sp  => "stack pointer",
      Register::Ext => "exit status"
    }
  }
}

pub const REGISTER_COUNT: usize = Register::COUNT;

/// Fixed storage for all registers, indexed by `Register`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterFile {
  slots: [Word; REGISTER_COUNT]
}

impl RegisterFile {
  /// A fresh register file: `sp = -1` (empty stack), `ext = 1`, everything else zero.
  pub fn new() -> RegisterFile {
    let mut registers = RegisterFile{ slots: [0; REGISTER_COUNT] };
    registers[Register::Sp]  = -1;
    registers[Register::Ext] = 1;
    registers
  }

  pub fn iter(&self) -> impl Iterator<Item = (Register, Word)> + '_ {
    Register::iter().map(move |r| (r, self[r]))
  }
}

impl Default for RegisterFile {
  fn default() -> Self {
    RegisterFile::new()
  }
}

impl Index<Register> for RegisterFile {
  type Output = Word;
  fn index(&self, register: Register) -> &Word {
    &self.slots[register.id() as usize]
  }
}

impl IndexMut<Register> for RegisterFile {
  fn index_mut(&mut self, register: Register) -> &mut Word {
    &mut self.slots[register.id() as usize]
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_and_ids() {
    assert_eq!(Register::from_name("eax"), Some(Register::Eax));
    assert_eq!(Register::from_name("EXT"), Some(Register::Ext));
    assert_eq!(Register::from_name("edx"), None);
    assert_eq!(Register::Swp.name(), "swp");
    assert_eq!(Register::from_id(Register::Ip.id() as Word), Some(Register::Ip));
    assert_eq!(Register::from_id(-1), None);
    assert_eq!(Register::from_id(REGISTER_COUNT as Word), None);
  }

  #[test]
  fn fresh_register_file() {
    let registers = RegisterFile::new();
    for (register, value) in registers.iter() {
      let expected = match register {
        Register::Sp  => -1,
        Register::Ext => 1,
        _             => 0
      };
      assert_eq!(value, expected, "{}", register);
    }
  }
}
