//! An `Operand` is the unit of the instruction stream: a tag and an integer payload. Opcodes and
//! their arguments are interleaved in one flat stream, so every cell of code memory is an operand.

use std::fmt::{Display, Formatter};

use crate::bytecode::Operation;
use crate::registers::Register;

/// The machine integer. Registers, stack cells, and operand payloads are all `Word`s.
pub type Word = i32;

/// Payload substituted for a name the assembler could not resolve in permissive mode.
pub const UNRESOLVED: Word = -1;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operand {
  /// The numeric id of an `Operation`.
  Code(Word),
  /// A literal.
  Value(Word),
  /// The numeric id of a `Register`.
  Register(Word),
  /// A resolved position in the instruction stream.
  Label(Word),
}

impl Operand {
  pub fn code(operation: Operation) -> Operand {
    Operand::Code(operation.code() as Word)
  }

  pub fn value(value: Word) -> Operand {
    Operand::Value(value)
  }

  pub fn register(register: Register) -> Operand {
    Operand::Register(register.id() as Word)
  }

  pub fn label(position: Word) -> Operand {
    Operand::Label(position)
  }

  /// The untagged payload.
  pub fn payload(&self) -> Word {
    match self {
      | Operand::Code(w)
      | Operand::Value(w)
      | Operand::Register(w)
      | Operand::Label(w) => *w
    }
  }

  pub fn is_code(&self) -> bool {
    matches!(self, Operand::Code(_))
  }

  pub fn is_value(&self) -> bool {
    matches!(self, Operand::Value(_))
  }

  pub fn is_register(&self) -> bool {
    matches!(self, Operand::Register(_))
  }

  pub fn is_label(&self) -> bool {
    matches!(self, Operand::Label(_))
  }

  /// Decodes a `Code` operand. Unknown ids, including `UNRESOLVED`, give `None`.
  pub fn operation(&self) -> Option<Operation> {
    match self {
      Operand::Code(id) => Operation::from_id(*id),
      _                 => None
    }
  }

  /// Decodes a `Register` operand. Unknown ids, including `UNRESOLVED`, give `None`.
  pub fn as_register(&self) -> Option<Register> {
    match self {
      Operand::Register(id) => Register::from_id(*id),
      _                     => None
    }
  }
}

impl Display for Operand {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Operand::Code(id) => {
        match Operation::from_id(*id) {
          Some(operation) => write!(f, "{}", operation),
          None            => write!(f, "???({})", id)
        }
      },
      Operand::Value(v) => {
        write!(f, "{}", v)
      },
      Operand::Register(id) => {
        match Register::from_id(*id) {
          Some(register) => write!(f, "@{}", register),
          None           => write!(f, "@?({})", id)
        }
      },
      Operand::Label(position) => {
        write!(f, ".[{}]", position)
      }
    }
  }
}
