/*!

  The Tiny Virtual Machine: a line-oriented assembly, a two-pass assembler that turns it into a
  flat stream of tagged operands, and an evaluator that runs the stream against a fixed set of
  registers and a fixed-capacity stack.

  ```
  use std::io::Cursor;
  use tvm::{assemble, Machine, MachineConfig, Outcome, ProgramImage};

  let config  = MachineConfig::default();
  let program = assemble(&["PSH 2", "PSH 3", "ADD", "PRT", "HLT"], &config).unwrap();
  let mut machine = Machine::new(ProgramImage::from_config(&config), Cursor::new(""), Vec::new());

  assert_eq!(machine.run(&program).unwrap(), Outcome::Halted { status: 1, steps: 5 });
  assert_eq!(machine.output(), b"-> 5\n");
  ```

*/

pub mod bytecode;
pub mod config;
pub mod error;
pub mod image;
pub mod input;
pub mod labels;
pub mod listing;
pub mod machine;
pub mod registers;
pub mod repl;
pub mod source;

pub use crate::bytecode::{assemble, Operand, Operation, Program, Word};
pub use crate::config::{MachineConfig, Resolution};
pub use crate::error::{AssemblyError, Error, Fault, Result, SourceError};
pub use crate::image::ProgramImage;
pub use crate::machine::{Machine, Outcome};
pub use crate::registers::Register;
