//! The fetch-decode-execute loop of the Tiny Virtual Machine.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::bytecode::{Operand, Operation, Program, Word};
use crate::error::Fault;
use crate::image::ProgramImage;
use crate::input::IntegerReader;
use crate::registers::Register;

/// What the driving loop does after a step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
  Continue,
  Halt,
  Abort
}

/// How a run ended, if it ended without a fault.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
  /// `HLT` or `RET`. `status` is the value of `ext` at that moment.
  Halted { status: Word, steps: u64 },
  /// `HCF`. The caller is expected to end the process on the spot.
  Aborted { steps: u64 }
}

/**
  Executes programs against a `ProgramImage`. Printing opcodes and runtime diagnostics write to
  `output` in execution order; `RDV` reads from `input`.

  The machine only ever reads the program, so one machine can run several programs in turn
  against the same image, which is how the REPL works.
*/
pub struct Machine<R: BufRead, W: Write> {
  image  : ProgramImage,
  input  : IntegerReader<R>,
  output : W,
  /// Number of instructions executed. No-op fetches are not counted.
  steps  : u64
}

impl<R: BufRead, W: Write> Machine<R, W> {

  // region Low-level utility methods

  pub fn new(image: ProgramImage, input: R, output: W) -> Machine<R, W> {
    Machine{
      image,
      input  : IntegerReader::new(input),
      output,
      steps  : 0
    }
  }

  pub fn image(&self) -> &ProgramImage {
    &self.image
  }

  /// Swaps in a new image, e.g. after the stack capacity changed, and returns the old one.
  pub fn replace_image(&mut self, image: ProgramImage) -> ProgramImage {
    std::mem::replace(&mut self.image, image)
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  pub fn output_mut(&mut self) -> &mut W {
    &mut self.output
  }

  pub fn steps(&self) -> u64 {
    self.steps
  }

  /// Reads a raw line from the machine's input, for drivers that share it with `RDV`.
  pub fn read_line(&mut self) -> std::io::Result<Option<String>> {
    self.input.read_line()
  }

  /// Reads the operand at `ip` and advances `ip`.
  fn fetch(&mut self, program: &Program) -> Result<Operand, Fault> {
    let ip = self.image.ip();
    let operand =
      match usize::try_from(ip).ok().and_then(|position| program.get(position)) {
        Some(operand) => operand,
        None          => return Err(Fault::FetchOutOfRange { ip, len: program.len() })
      };
    self.image.set_ip(ip + 1);
    Ok(operand)
  }

  /// Reports a malformed instruction that is skipped rather than faulted.
  fn diagnose(&mut self, complaint: &str) -> Result<(), Fault> {
    let ip = self.image.ip();
    debug!(ip, "{}", complaint);
    writeln!(self.output, "!! Instruction {}: {}!", ip, complaint)?;
    Ok(())
  }

  /// Fetches the operand of a register instruction. `None` means the instruction is skipped.
  fn fetch_register(&mut self, program: &Program) -> Result<Option<Register>, Fault> {
    let operand = self.fetch(program)?;
    match operand.as_register() {
      Some(register) => Ok(Some(register)),
      None => {
        self.diagnose("Not a register type")?;
        Ok(None)
      }
    }
  }

  /// Fetches the operand of a jump. `None` means the instruction is skipped.
  fn fetch_label(&mut self, program: &Program) -> Result<Option<Word>, Fault> {
    match self.fetch(program)? {
      Operand::Label(position) => Ok(Some(position)),
      _ => {
        self.diagnose("Not a label type")?;
        Ok(None)
      }
    }
  }

  /// Pops `a` then `b` and pushes `combine(a, b)`.
  fn binary<F>(&mut self, combine: F) -> Result<(), Fault>
    where F: FnOnce(Word, Word) -> Result<Word, Fault>
  {
    let a = self.image.pop()?;
    let b = self.image.pop()?;
    let result = combine(a, b)?;
    self.image.push(result)
  }

  /// Pops one value and pushes `f(value)`.
  fn unary<F>(&mut self, f: F) -> Result<(), Fault>
    where F: FnOnce(Word) -> Result<Word, Fault>
  {
    let a = self.image.pop()?;
    let result = f(a)?;
    self.image.push(result)
  }

  /// Jumps to the label operand if `predicate` holds for the top of the stack, which stays.
  fn jump_if<P>(&mut self, program: &Program, predicate: P) -> Result<(), Fault>
    where P: FnOnce(Word) -> bool
  {
    if let Some(position) = self.fetch_label(program)? {
      if predicate(self.image.peek()?) {
        self.image.set_ip(position);
      }
    }
    Ok(())
  }

  // endregion

  // region Driving loops

  /// Runs from the current `ip` until the program halts, aborts, or faults. Running off the end
  /// of the program is a fault.
  pub fn run(&mut self, program: &Program) -> Result<Outcome, Fault> {
    let result = loop {
      match self.step(program) {
        Ok(Flow::Continue) => continue,
        Ok(Flow::Halt)     => break Ok(self.halted()),
        Ok(Flow::Abort)    => break Ok(Outcome::Aborted { steps: self.steps }),
        Err(fault)         => break Err(fault)
      }
    };
    self.output.flush()?;
    result
  }

  /**
    Runs `program` once from position zero: until it halts, aborts, runs off its end, or moves
    `ip` backwards. This is how a REPL line is executed. The image persists between lines, and
    a line never loops, so `RPT` or a backward jump just ends it. `None` means the line finished
    without halting.
  */
  pub fn run_line(&mut self, program: &Program) -> Result<Option<Outcome>, Fault> {
    self.image.set_ip(0);
    let result = loop {
      let ip = self.image.ip();
      if ip < 0 || ip as usize >= program.len() {
        break Ok(None);
      }
      match self.step(program) {
        Ok(Flow::Continue) if self.image.ip() <= ip => break Ok(None),
        Ok(Flow::Continue) => continue,
        Ok(Flow::Halt)     => break Ok(Some(self.halted())),
        Ok(Flow::Abort)    => break Ok(Some(Outcome::Aborted { steps: self.steps })),
        Err(fault)         => break Err(fault)
      }
    };
    self.output.flush()?;
    result
  }

  pub(crate) fn halted(&self) -> Outcome {
    Outcome::Halted {
      status : self.image.get(Register::Ext),
      steps  : self.steps
    }
  }

  // endregion

  // region Instruction execution

  /// Fetches, decodes, and executes one instruction.
  pub fn step(&mut self, program: &Program) -> Result<Flow, Fault> {
    let operand = self.fetch(program)?;

    // Misaligned fetches and unknown opcodes are no-ops.
    let operation = match operand.operation() {
      Some(operation) => operation,
      None => {
        trace!(ip = self.image.ip() - 1, %operand, "skipping non-code operand");
        return Ok(Flow::Continue);
      }
    };

    self.steps += 1;
    trace!(ip = self.image.ip() - 1, %operation, "execute");

    let flow = self.execute(operation, program)?;

    #[cfg(feature = "trace_computation")]
    trace!("\n{}", self.image);

    Ok(flow)
  }

  fn execute(&mut self, operation: Operation, program: &Program) -> Result<Flow, Fault> {
    use Operation::*;
    let ip = self.image.ip();

    match operation {

      // Stack //

      Push => {
        let operand = self.fetch(program)?;
        self.image.push(operand.payload())?;
      }

      Pop => {
        self.image.pop()?;
      }

      // Maths //

      Add      => self.binary(|a, b| Ok(a.wrapping_add(b)))?,
      Subtract => self.binary(|a, b| Ok(a.wrapping_sub(b)))?,
      Multiply => self.binary(|a, b| Ok(a.wrapping_mul(b)))?,

      Divide => self.binary(|a, b| {
        match b {
          0 => Err(Fault::DivisionByZero { ip }),
          _ => Ok(a.wrapping_div(b))
        }
      })?,

      Modulo => self.binary(|a, b| {
        match b {
          0 => Err(Fault::DivisionByZero { ip }),
          _ => Ok(a.wrapping_rem(b))
        }
      })?,

      Minimum => self.binary(|a, b| Ok(a.min(b)))?,
      Maximum => self.binary(|a, b| Ok(a.max(b)))?,

      Root => self.unary(|a| {
        match a < 0 {
          true  => Err(Fault::NegativeRoot { ip, value: a }),
          false => Ok((a as f64).sqrt() as Word)
        }
      })?,

      Compare => {
        let a = self.image.pop()?;
        let b = self.image.pop()?;
        self.image.push(b)?;
        self.image.push(a)?;
        let result = match a.cmp(&b) {
          Ordering::Greater =>  1,
          Ordering::Less    => -1,
          Ordering::Equal   =>  0
        };
        self.image.push(result)?;
      }

      Increment => self.unary(|a| Ok(a.wrapping_add(1)))?,
      Decrement => self.unary(|a| Ok(a.wrapping_sub(1)))?,

      // Bitwise //

      And => self.binary(|a, b| Ok(a & b))?,
      Or  => self.binary(|a, b| Ok(a | b))?,
      Xor => self.binary(|a, b| Ok(a ^ b))?,
      Not => self.unary(|a| Ok(!a))?,

      // Stdout //

      PrintTop => {
        let value = self.image.peek()?;
        writeln!(self.output, "-> {}", value)?;
      }

      PrintChar => {
        let value = self.image.pop()?;
        let c = std::char::from_u32(value as u32).unwrap_or(std::char::REPLACEMENT_CHARACTER);
        write!(self.output, "{}", c)?;
      }

      PrintStack => {
        let mut text = String::from("[ ");
        for value in self.image.live_stack()? {
          text.push_str(&format!("{} ", value));
        }
        text.push(']');
        writeln!(self.output, "{}", text)?;
      }

      PrintRegisters => {
        for (register, value) in self.image.registers().iter() {
          writeln!(self.output, "@> {}: {}", register, value)?;
        }
      }

      PrintLabels => {
        for (name, position) in program.labels().iter() {
          writeln!(self.output, ".> {}: {}", name, position)?;
        }
      }

      // Stdin //

      ReadValue => {
        write!(self.output, "<- ")?;
        self.output.flush()?;
        let token = match self.input.next_token()? {
          Some(token) => token,
          None        => return Err(Fault::InputExhausted { ip })
        };
        let value = match token.parse::<Word>() {
          Ok(value) => value,
          Err(_)    => return Err(Fault::InvalidInput { ip, text: token })
        };
        self.image.push(value)?;
      }

      // Registers //

      Set => {
        if let Some(register) = self.fetch_register(program)? {
          let operand = self.fetch(program)?;
          self.image.set(register, operand.payload());
        }
      }

      Get => {
        if let Some(register) = self.fetch_register(program)? {
          let value = self.image.get(register);
          self.image.push(value)?;
        }
      }

      Put => {
        if let Some(register) = self.fetch_register(program)? {
          let value = self.image.pop()?;
          self.image.set(register, value);
        }
      }

      Copy => {
        if let Some(register) = self.fetch_register(program)? {
          let value = self.image.peek()?;
          self.image.set(register, value);
        }
      }

      Swap => {
        if let Some(register) = self.fetch_register(program)? {
          self.image.swap(register);
        }
      }

      IncrementRegister | DecrementRegister => {
        if let Some(register) = self.fetch_register(program)? {
          let delta = if operation == IncrementRegister { 1 } else { -1 };
          let value = self.image.get(register).wrapping_add(delta);
          self.image.set(register, value);
        }
      }

      // Control flow //

      Repeat => {
        self.image.set_ip(0);
      }

      Jump => {
        if let Some(position) = self.fetch_label(program)? {
          self.image.set_ip(position);
        }
      }

      JumpIfPositive => self.jump_if(program, |top| top > 0)?,
      JumpIfZero     => self.jump_if(program, |top| top == 0)?,
      JumpIfNegative => self.jump_if(program, |top| top < 0)?,
      JumpIfNotZero  => self.jump_if(program, |top| top != 0)?,

      GoTo => {
        let operand = self.fetch(program)?;
        self.image.set_ip(operand.payload());
      }

      // Quit //

      Halt => return Ok(Flow::Halt),

      CatchFire => return Ok(Flow::Abort),

      Return => {
        let value = self.image.pop()?;
        self.image.set(Register::Ext, value);
        return Ok(Flow::Halt);
      }

    } // end match operation

    Ok(Flow::Continue)
  }

  // endregion

}


#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  use crate::bytecode::assemble;
  use crate::config::{MachineConfig, Resolution};

  type TestMachine = Machine<Cursor<Vec<u8>>, Vec<u8>>;

  fn machine_with(config: &MachineConfig, input: &str) -> TestMachine {
    Machine::new(
      ProgramImage::from_config(config),
      Cursor::new(input.as_bytes().to_vec()),
      Vec::new()
    )
  }

  fn run_with(config: &MachineConfig, source: &[&str], input: &str)
    -> (Result<Outcome, Fault>, TestMachine)
  {
    let program = assemble(source, config).unwrap();
    let mut machine = machine_with(config, input);
    let result = machine.run(&program);
    (result, machine)
  }

  fn run(source: &[&str]) -> (Result<Outcome, Fault>, TestMachine) {
    run_with(&MachineConfig::default(), source, "")
  }

  fn output(machine: &TestMachine) -> String {
    String::from_utf8(machine.output().clone()).unwrap()
  }

  #[test]
  fn add_and_print() {
    let (result, machine) = run(&["PSH 2", "PSH 3", "ADD", "PRT", "HLT"]);
    assert!(result.is_ok());
    assert_eq!(output(&machine), "-> 5\n");
    assert_eq!(machine.image().stack(), &[5]);
  }

  #[test]
  fn compare_restores_operands_and_pushes_result() {
    let (_, machine) = run(&["PSH 5", "PSH 3", "CMP", "HLT"]);
    assert_eq!(machine.image().stack(), &[5, 3, -1]);

    let (_, machine) = run(&["PSH 3", "PSH 5", "CMP", "HLT"]);
    assert_eq!(machine.image().stack(), &[3, 5, 1]);

    let (_, machine) = run(&["PSH 4", "PSH 4", "CMP", "HLT"]);
    assert_eq!(machine.image().stack(), &[4, 4, 0]);
  }

  #[test]
  fn conditional_jump_skips_forward() {
    let (result, machine) = run(&["PSH 0", "JEZ .end", "PSH 99", ".end", "HLT"]);
    assert_eq!(result.unwrap(), Outcome::Halted { status: 1, steps: 3 });
    assert_eq!(machine.image().stack(), &[0]);
  }

  #[test]
  fn halt_reports_ext() {
    let (result, _) = run(&["HLT"]);
    assert_eq!(result.unwrap(), Outcome::Halted { status: 1, steps: 1 });

    let (result, _) = run(&["SET @ext 42", "HLT"]);
    assert_eq!(result.unwrap(), Outcome::Halted { status: 42, steps: 2 });

    let (result, machine) = run(&["PSH 7", "RET"]);
    assert_eq!(result.unwrap(), Outcome::Halted { status: 7, steps: 2 });
    assert!(machine.image().stack().is_empty());
  }

  #[test]
  fn abort() {
    let (result, machine) = run(&["PSH 1", "HCF", "PSH 2"]);
    assert_eq!(result.unwrap(), Outcome::Aborted { steps: 2 });
    assert_eq!(machine.image().stack(), &[1]);
  }

  #[test]
  fn repeat_retains_state_and_reads_in_order() {
    let source = [
      "GET @eax",
      "JNZ .second",
      "POP",
      "RDV",
      "PUT @ebx",
      "PSH 7",
      "INR @eax",
      "RPT",
      ".second",
      "POP",
      "RDV",
      "PUT @ecx",
      "GET @ebx",
      "HLT"
    ];
    let (result, machine) = run_with(&MachineConfig::default(), &source, "10\n20\n");
    assert!(result.is_ok());

    let image = machine.image();
    assert_eq!(image.get(Register::Eax), 1);
    assert_eq!(image.get(Register::Ebx), 10);
    assert_eq!(image.get(Register::Ecx), 20);
    // The 7 pushed before the restart is still there.
    assert_eq!(image.stack(), &[7, 10]);
    assert_eq!(output(&machine), "<- <- ");
  }

  #[test]
  fn non_register_operand_skips_only_that_instruction() {
    let (result, machine) = run(&["SET 5 7", "PSH 1", "HLT"]);
    assert!(result.is_ok());
    assert_eq!(output(&machine), "!! Instruction 2: Not a register type!\n");
    assert_eq!(machine.image().stack(), &[1]);
    assert_eq!(machine.image().get(Register::Eax), 0);
  }

  #[test]
  fn non_label_operand_skips_the_jump() {
    let (result, machine) = run(&["JMP 3", "PSH 1", "HLT"]);
    assert!(result.is_ok());
    assert_eq!(output(&machine), "!! Instruction 2: Not a label type!\n");
    assert_eq!(machine.image().stack(), &[1]);
  }

  #[test]
  fn arithmetic_operand_order() {
    let (_, machine) = run(&[
      "PSH 2", "PSH 3", "SUB",      // 3 - 2
      "PSH 4", "PSH 20", "DIV",     // 20 / 4
      "PSH 3", "PSH 11", "MOD",     // 11 % 3
      "PSH 6", "PSH 7", "MUL",
      "HLT"
    ]);
    assert_eq!(machine.image().stack(), &[1, 5, 2, 42]);

    let (_, machine) = run(&[
      "PSH 2", "PSH 9", "MIN",
      "PSH 2", "PSH 9", "MAX",
      "PSH 17", "RUT",
      "PSH 41", "INC",
      "PSH 0", "DEC",
      "HLT"
    ]);
    assert_eq!(machine.image().stack(), &[2, 9, 4, 42, -1]);
  }

  #[test]
  fn bitwise() {
    let (_, machine) = run(&[
      "PSH 12", "PSH 10", "AND",
      "PSH 12", "PSH 10", "ORR",
      "PSH 12", "PSH 10", "XOR",
      "PSH 0", "NOT",
      "HLT"
    ]);
    assert_eq!(machine.image().stack(), &[8, 14, 6, -1]);
  }

  #[test]
  fn arithmetic_faults() {
    let (result, _) = run(&["PSH 0", "PSH 5", "DIV", "HLT"]);
    assert!(matches!(result, Err(Fault::DivisionByZero { .. })));

    let (result, _) = run(&["PSH 0", "PSH 5", "MOD", "HLT"]);
    assert!(matches!(result, Err(Fault::DivisionByZero { .. })));

    let (result, _) = run(&["PSH -4", "RUT", "HLT"]);
    assert!(matches!(result, Err(Fault::NegativeRoot { value: -4, .. })));
  }

  #[test]
  fn storage_faults() {
    let (result, _) = run(&["POP", "HLT"]);
    assert!(matches!(result, Err(Fault::StackUnderflow { .. })));

    let config = MachineConfig::default().with_stack_capacity(2);
    let (result, machine) = run_with(&config, &["PSH 1", "PSH 2", "PSH 3", "HLT"], "");
    assert!(matches!(result, Err(Fault::StackOverflow { capacity: 2, .. })));
    assert_eq!(machine.image().stack(), &[1, 2]);

    let (result, _) = run(&["PSH 1"]);
    assert!(matches!(result, Err(Fault::FetchOutOfRange { ip: 2, len: 2 })));

    let (result, _) = run(&["GTI -3"]);
    assert!(matches!(result, Err(Fault::FetchOutOfRange { ip: -3, .. })));
  }

  #[test]
  fn input_faults() {
    let (result, _) = run(&["RDV", "HLT"]);
    assert!(matches!(result, Err(Fault::InputExhausted { .. })));

    let (result, _) = run_with(&MachineConfig::default(), &["RDV", "HLT"], "abc\n");
    assert!(matches!(result, Err(Fault::InvalidInput { .. })));
  }

  #[test]
  fn registers() {
    let (_, machine) = run(&[
      "PSH 4", "CPY @eax",          // non-consuming
      "PSH 9", "PUT @ebx",          // consuming
      "SET @ecx 3", "INR @ecx", "INR @ecx", "DCR @ecx",
      "SET @swp 8", "SWP @eax",
      "GET @ecx",
      "HLT"
    ]);
    let image = machine.image();
    assert_eq!(image.get(Register::Eax), 8);
    assert_eq!(image.get(Register::Swp), 4);
    assert_eq!(image.get(Register::Ebx), 9);
    assert_eq!(image.get(Register::Ecx), 4);
    assert_eq!(image.stack(), &[4, 4]);
  }

  #[test]
  fn machine_registers_are_addressable() {
    // SET(0) @ip(1) 5(2) PSH(3) 99(4) HLT(5)
    let (result, machine) = run(&["SET @ip 5", "PSH 99", "HLT"]);
    assert!(result.is_ok());
    assert!(machine.image().stack().is_empty());

    let (_, machine) = run(&["PSH 1", "PSH 2", "SET @sp -1", "PSH 3", "GET @sp", "HLT"]);
    assert_eq!(machine.image().stack(), &[3, 0]);
  }

  #[test]
  fn conditional_jumps_peek() {
    let (_, machine) = run(&[
      "PSH 1", "JGZ .a", "HCF", ".a",
      "PSH -1", "JLZ .b", "HCF", ".b",
      "JNZ .c", "HCF", ".c",
      "PSH 0", "JNZ .d", "JGZ .d", "JLZ .d", "HLT", ".d", "HCF"
    ]);
    assert_eq!(machine.image().stack(), &[1, -1, 0]);
  }

  #[test]
  fn go_to_absolute_position() {
    // GTI(0) 4(1) PSH(2) 1(3) HLT(4)
    let (result, machine) = run(&["GTI 4", "PSH 1", "HLT"]);
    assert!(result.is_ok());
    assert!(machine.image().stack().is_empty());
  }

  #[test]
  fn printing() {
    let (_, machine) = run(&[
      ".top",
      "STK",
      "PSH 1", "PSH 2", "STK",
      "PSH 72", "PRC", "PSH 105", "PRC", "PSH 10", "PRC",
      "SET @ebx -3",
      "RGS",
      ".bottom",
      "LBS",
      "HLT"
    ]);
    let expected = "\
[ ]
[ 1 2 ]
Hi
@> eax: 0
@> ebx: -3
@> ecx: 0
@> swp: 0
@> ip: 19
@> sp: 1
@> ext: 1
.> top: 0
.> bottom: 19
";
    assert_eq!(output(&machine), expected);
  }

  #[test]
  fn permissive_sentinels_at_runtime() {
    let config = MachineConfig::default().with_resolution(Resolution::Permissive);

    let (result, machine) = run_with(&config, &["FOO", "PSH 1", "HLT"], "");
    assert_eq!(result.unwrap(), Outcome::Halted { status: 1, steps: 2 });
    assert_eq!(machine.image().stack(), &[1]);

    let (result, machine) = run_with(&config, &["GET @edx", "HLT"], "");
    assert!(result.is_ok());
    assert_eq!(output(&machine), "!! Instruction 2: Not a register type!\n");

    let (result, _) = run_with(&config, &["JMP .nowhere"], "");
    assert!(matches!(result, Err(Fault::FetchOutOfRange { ip: -1, .. })));
  }

  #[test]
  fn lines_share_one_image() {
    let config = MachineConfig::default();
    let mut machine = machine_with(&config, "");
    for line in &["PSH 2", "PSH 3", "ADD", "PRT"] {
      let program = assemble(&[*line], &config).unwrap();
      assert_eq!(machine.run_line(&program).unwrap(), None);
    }
    assert_eq!(output(&machine), "-> 5\n");

    let program = assemble(&["HLT"], &config).unwrap();
    assert_eq!(
      machine.run_line(&program).unwrap(),
      Some(Outcome::Halted { status: 1, steps: 5 })
    );
  }

  #[test]
  fn a_line_never_loops() {
    let config = MachineConfig::default();
    let mut machine = machine_with(&config, "");
    for line in &["PSH 1", "RPT", "GTI 0", "INC"] {
      let program = assemble(&[*line], &config).unwrap();
      assert_eq!(machine.run_line(&program).unwrap(), None);
    }
    assert_eq!(machine.image().stack(), &[2]);
    assert_eq!(machine.steps(), 4);
  }

  #[test]
  fn print_stack_with_sp_out_of_range() {
    let (result, machine) = run(&["SET @sp 99", "STK", "HLT"]);
    assert!(matches!(result, Err(Fault::InvalidStackIndex { sp: 99, .. })));
    assert_eq!(output(&machine), "");
  }

  #[test]
  fn forward_and_backward_jumps_reach_the_same_instruction() {
    // Both programs print the value pushed just before `.target`, exactly once.
    let backward = [
      "JMP .start",
      ".target", "PRT", "HLT",
      ".start", "PSH 7", "JMP .target"
    ];
    let forward = [
      "PSH 7", "JMP .target",
      "PSH 99",
      ".target", "PRT", "HLT"
    ];
    for source in &[&backward[..], &forward[..]] {
      let (result, machine) = run(source);
      assert!(matches!(result, Ok(Outcome::Halted { status: 1, .. })));
      assert_eq!(output(&machine), "-> 7\n");
    }
  }
}
