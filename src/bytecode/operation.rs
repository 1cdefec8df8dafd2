use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use strum_macros::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::Word;

/**
  Opcodes of the virtual machine.

  The discriminant is the opcode id stored in a `Code` operand, so the order of the variants is
  the numbering of the instruction set. The mnemonic is the `strum` serialization and is matched
  without regard to ASCII case. The listing printed by `--ops` walks this enum in order and
  groups it by `Operation::group()`.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, EnumCount, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Operation {
  // Stack //
  #[strum(to_string = "PSH")] Push,               // PSH value
  #[strum(to_string = "POP")] Pop,

  // Maths //
  #[strum(to_string = "ADD")] Add,
  #[strum(to_string = "SUB")] Subtract,
  #[strum(to_string = "MUL")] Multiply,
  #[strum(to_string = "DIV")] Divide,
  #[strum(to_string = "MOD")] Modulo,
  #[strum(to_string = "MIN")] Minimum,
  #[strum(to_string = "MAX")] Maximum,
  #[strum(to_string = "RUT")] Root,
  #[strum(to_string = "CMP")] Compare,
  #[strum(to_string = "INC")] Increment,
  #[strum(to_string = "DEC")] Decrement,

  // Bitwise //
  #[strum(to_string = "AND")] And,
  #[strum(to_string = "ORR")] Or,
  #[strum(to_string = "XOR")] Xor,
  #[strum(to_string = "NOT")] Not,

  // Stdout //
  #[strum(to_string = "PRT")] PrintTop,
  #[strum(to_string = "PRC")] PrintChar,
  #[strum(to_string = "STK")] PrintStack,
  #[strum(to_string = "RGS")] PrintRegisters,
  #[strum(to_string = "LBS")] PrintLabels,

  // Stdin //
  #[strum(to_string = "RDV")] ReadValue,

  // Registers //
  #[strum(to_string = "SET")] Set,                // SET @reg value
  #[strum(to_string = "GET")] Get,                // GET @reg
  #[strum(to_string = "PUT")] Put,                // PUT @reg
  #[strum(to_string = "CPY")] Copy,               // CPY @reg
  #[strum(to_string = "SWP")] Swap,               // SWP @reg
  #[strum(to_string = "INR")] IncrementRegister,  // INR @reg
  #[strum(to_string = "DCR")] DecrementRegister,  // DCR @reg

  // Control flow //
  #[strum(to_string = "RPT")] Repeat,
  #[strum(to_string = "JMP")] Jump,               // JMP .label
  #[strum(to_string = "JGZ")] JumpIfPositive,     // JGZ .label
  #[strum(to_string = "JEZ")] JumpIfZero,         // JEZ .label
  #[strum(to_string = "JLZ")] JumpIfNegative,     // JLZ .label
  #[strum(to_string = "JNZ")] JumpIfNotZero,      // JNZ .label
  #[strum(to_string = "GTI")] GoTo,               // GTI position

  // Quit //
  #[strum(to_string = "HLT")] Halt,
  #[strum(to_string = "HCF")] CatchFire,
  #[strum(to_string = "RET")] Return,
}

/// What an instruction expects in each of its operand positions.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum OperandKind {
  Value,
  Register,
  Label
}

impl Display for OperandKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      OperandKind::Value    => write!(f, "value"),
      OperandKind::Register => write!(f, "@reg"),
      OperandKind::Label    => write!(f, ".label")
    }
  }
}

/// Instruction families, used only for listings.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Group {
  Stack,
  Maths,
  Bitwise,
  Stdout,
  Stdin,
  Registers,
  #[strum(to_string = "Control Flow")]
  ControlFlow,
  Quit
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Decodes an opcode id. Anything outside the instruction set is `None`.
  pub fn from_id(id: Word) -> Option<Operation> {
    u8::try_from(id)
      .ok()
      .and_then(|byte| Operation::try_from(byte).ok())
  }

  pub fn from_mnemonic(name: &str) -> Option<Operation> {
    Operation::from_str(name).ok()
  }

  pub fn mnemonic(&self) -> &'static str {
    self.into()
  }

  /// The operands the evaluator fetches after the opcode, in order.
  pub fn operands(&self) -> &'static [OperandKind] {
    use Operation::*;
    match self {
      Push | GoTo => &[OperandKind::Value],

      Set => &[OperandKind::Register, OperandKind::Value],

      | Get
      | Put
      | Copy
      | Swap
      | IncrementRegister
      | DecrementRegister => &[OperandKind::Register],

      | Jump
      | JumpIfPositive
      | JumpIfZero
      | JumpIfNegative
      | JumpIfNotZero => &[OperandKind::Label],

      _ => &[]
    }
  }

  pub fn arity(&self) -> usize {
    self.operands().len()
  }

  pub fn group(&self) -> Group {
    use Operation::*;
    match self {
      Push | Pop => Group::Stack,

      | Add
      | Subtract
      | Multiply
      | Divide
      | Modulo
      | Minimum
      | Maximum
      | Root
      | Compare
      | Increment
      | Decrement => Group::Maths,

      And | Or | Xor | Not => Group::Bitwise,

      | PrintTop
      | PrintChar
      | PrintStack
      | PrintRegisters
      | PrintLabels => Group::Stdout,

      ReadValue => Group::Stdin,

      | Set
      | Get
      | Put
      | Copy
      | Swap
      | IncrementRegister
      | DecrementRegister => Group::Registers,

      | Repeat
      | Jump
      | JumpIfPositive
      | JumpIfZero
      | JumpIfNegative
      | JumpIfNotZero
      | GoTo => Group::ControlFlow,

      Halt | CatchFire | Return => Group::Quit
    }
  }

  /// The operand signature as it would be written in source, e.g. `SET @reg value`.
  pub fn signature(&self) -> String {
    let mut text = self.mnemonic().to_string();
    for kind in self.operands() {
      text.push(' ');
      text.push_str(&kind.to_string());
    }
    text
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use strum::{EnumCount, IntoEnumIterator};

  #[test]
  fn mnemonics_round_trip_through_ids() {
    for operation in Operation::iter() {
      assert_eq!(Operation::from_id(operation.code() as Word), Some(operation));
      assert_eq!(Operation::from_mnemonic(operation.mnemonic()), Some(operation));
    }
    assert_eq!(Operation::from_id(Operation::COUNT as Word), None);
    assert_eq!(Operation::from_id(-1), None);
  }

  #[test]
  fn mnemonics_ignore_case() {
    assert_eq!(Operation::from_mnemonic("psh"), Some(Operation::Push));
    assert_eq!(Operation::from_mnemonic("Jez"), Some(Operation::JumpIfZero));
    assert_eq!(Operation::from_mnemonic("PUSH"), None);
  }

  #[test]
  fn arities() {
    assert_eq!(Operation::Push.arity(), 1);
    assert_eq!(Operation::Set.arity(), 2);
    assert_eq!(Operation::Copy.operands(), &[OperandKind::Register]);
    assert_eq!(Operation::JumpIfNotZero.operands(), &[OperandKind::Label]);
    assert_eq!(Operation::Compare.arity(), 0);
    assert_eq!(Operation::Set.signature(), "SET @reg value");
  }
}
