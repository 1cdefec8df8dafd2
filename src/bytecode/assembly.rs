/*!
  The human readable textual form of a program is called assembly. A program is a sequence of
  lines, each of which is blank, a comment, a label definition, or an instruction:
    ```text
    <line>        ::= <label_def> | <instruction> | ''
    <label_def>   ::= '.' <name>
    <instruction> ::= <mnemonic> (<ws> <operand>)*
    <operand>     ::= '@' <register> | '.' <name> | <decimal>
    <comment>     ::= '#' .* EOL
    ```
  Labels and operands share one flat stream, so a label denotes a position in the assembled
  stream rather than a source line. Assembly therefore takes two passes over the lines: the
  first counts tokens to find every label's position, the second emits operands with label
  references resolved, whether the label is defined before or after its use.
*/

use std::fmt::{Display, Formatter};

use nom::{
  branch::alt,
  bytes::complete::{is_not, take_till},
  character::complete::{
    char as one_char,
    i32 as decimal,
    space1
  },
  combinator::{all_consuming, map, rest},
  multi::separated_list1,
  sequence::preceded,
  IResult
};
use tracing::debug;

use crate::bytecode::{Operand, Operation, Word, UNRESOLVED};
use crate::config::{MachineConfig, Resolution};
use crate::error::AssemblyError;
use crate::labels::{DefineError, LabelTable};
use crate::listing::program_table;
use crate::registers::Register;

/// An assembled program: the operand stream and the label table it was resolved against.
#[derive(Clone, Debug)]
pub struct Program {
  operands : Vec<Operand>,
  labels   : LabelTable
}

impl Program {
  pub fn operands(&self) -> &[Operand] {
    &self.operands
  }

  pub fn labels(&self) -> &LabelTable {
    &self.labels
  }

  pub fn len(&self) -> usize {
    self.operands.len()
  }

  pub fn is_empty(&self) -> bool {
    self.operands.is_empty()
  }

  pub fn get(&self, position: usize) -> Option<Operand> {
    self.operands.get(position).copied()
  }
}

impl Display for Program {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", program_table(self))
  }
}

// region Line syntax

#[derive(Clone, Debug, Eq, PartialEq)]
enum Line<'a> {
  Blank,
  Label(&'a str),
  Instruction(Vec<&'a str>)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OperandToken<'a> {
  Register(&'a str),
  Label(&'a str),
  Literal(&'a str)
}

fn code_p(input: &str) -> IResult<&str, &str> {
  take_till(|c: char| c == '#')(input)
}

fn label_definition_p(input: &str) -> IResult<&str, &str> {
  map(preceded(one_char('.'), rest), str::trim)(input)
}

fn tokens_p(input: &str) -> IResult<&str, Vec<&str>> {
  separated_list1(space1, is_not(" \t"))(input)
}

fn operand_p(input: &str) -> IResult<&str, OperandToken<'_>> {
  alt((
    map(preceded(one_char('@'), rest), OperandToken::Register),
    map(preceded(one_char('.'), rest), OperandToken::Label),
    map(rest, OperandToken::Literal)
  ))(input)
}

fn literal_p(input: &str) -> IResult<&str, Word> {
  all_consuming(decimal)(input)
}

fn parse_line(text: &str) -> Line<'_> {
  let code = match code_p(text) {
    Ok((_comment, code)) => code.trim(),
    Err(_)               => text.trim()
  };
  if code.is_empty() {
    return Line::Blank;
  }
  if let Ok((_, name)) = label_definition_p(code) {
    return Line::Label(name);
  }
  match tokens_p(code) {
    Ok((_, tokens)) => Line::Instruction(tokens),
    // Trimmed, non-empty text always has a first token.
    Err(_)          => Line::Instruction(vec![code])
  }
}

fn parse_literal(text: &str) -> Option<Word> {
  literal_p(text).ok().map(|(_, value)| value)
}

// endregion

/// Two-pass assembler. Holds the limits and resolution policy for one assembly.
pub struct Assembler<'c> {
  config: &'c MachineConfig
}

impl<'c> Assembler<'c> {

  pub fn new(config: &'c MachineConfig) -> Assembler<'c> {
    Assembler{ config }
  }

  fn strict(&self) -> bool {
    self.config.resolution == Resolution::Strict
  }

  pub fn assemble<S: AsRef<str>>(&self, source: &[S]) -> Result<Program, AssemblyError> {
    let lines: Vec<(usize, Line<'_>)> =
      source.iter()
            .enumerate()
            .map(|(i, text)| (i + 1, parse_line(text.as_ref())))
            .collect();

    let labels   = self.discover_labels(&lines)?;
    let operands = self.emit(&lines, &labels)?;

    debug!(operands = operands.len(), labels = labels.len(), "assembled program");
    Ok(Program{ operands, labels })
  }

  /// Pass 1. A label's position is the number of tokens emitted before it.
  fn discover_labels(&self, lines: &[(usize, Line<'_>)]) -> Result<LabelTable, AssemblyError> {
    let mut labels = LabelTable::new(self.config.label_capacity);
    let mut count: usize = 0;

    for (line, syntax) in lines {
      let line = *line;
      match syntax {

        Line::Blank => {}

        Line::Label(name) => {
          if name.is_empty() {
            return Err(AssemblyError::EmptyLabel { line });
          }
          labels.define(name, count as Word).map_err(|e| match e {
            DefineError::Duplicate =>
              AssemblyError::DuplicateLabel { line, name: name.to_string() },
            DefineError::Full =>
              AssemblyError::TooManyLabels { line, capacity: self.config.label_capacity }
          })?;
        }

        Line::Instruction(tokens) => {
          count += tokens.len();
          if count > self.config.program_capacity {
            return Err(AssemblyError::ProgramTooLarge {
              line,
              capacity: self.config.program_capacity
            });
          }
        }

      } // end match on line
    }
    Ok(labels)
  }

  /// Pass 2. Every token becomes exactly one operand.
  fn emit(&self, lines: &[(usize, Line<'_>)], labels: &LabelTable)
    -> Result<Vec<Operand>, AssemblyError>
  {
    let mut operands = Vec::with_capacity(self.config.program_capacity);

    for (line, syntax) in lines {
      let tokens = match syntax {
        Line::Instruction(tokens) => tokens,
        _                         => continue
      };
      let line = *line;
      let (mnemonic, arguments) = match tokens.split_first() {
        Some((mnemonic, arguments)) => (*mnemonic, arguments),
        None                        => continue
      };

      match Operation::from_mnemonic(mnemonic) {

        Some(operation) => {
          if self.strict() && operation.arity() != arguments.len() {
            return Err(AssemblyError::WrongArity {
              line,
              operation,
              expected: operation.arity(),
              given: arguments.len()
            });
          }
          operands.push(Operand::code(operation));
        }

        None if self.strict() => {
          return Err(AssemblyError::UnknownMnemonic { line, name: mnemonic.to_string() });
        }

        None => {
          operands.push(Operand::Code(UNRESOLVED));
        }

      }

      for token in arguments {
        operands.push(self.emit_operand(line, token, labels)?);
      }
    }
    Ok(operands)
  }

  fn emit_operand(&self, line: usize, token: &str, labels: &LabelTable)
    -> Result<Operand, AssemblyError>
  {
    let classified = match operand_p(token) {
      Ok((_, classified)) => classified,
      Err(_)              => OperandToken::Literal(token)
    };

    match classified {

      OperandToken::Register(name) => {
        match Register::from_name(name) {
          Some(register)          => Ok(Operand::register(register)),
          None if self.strict()   =>
            Err(AssemblyError::UnknownRegister { line, name: name.to_string() }),
          None                    => Ok(Operand::Register(UNRESOLVED))
        }
      }

      OperandToken::Label(name) => {
        match labels.position(name) {
          Some(position)          => Ok(Operand::label(position)),
          None if self.strict()   =>
            Err(AssemblyError::UnknownLabel { line, name: name.to_string() }),
          None                    => Ok(Operand::Label(UNRESOLVED))
        }
      }

      OperandToken::Literal(text) => {
        match parse_literal(text) {
          Some(value)             => Ok(Operand::value(value)),
          None if self.strict()   =>
            Err(AssemblyError::InvalidLiteral { line, text: text.to_string() }),
          None                    => Ok(Operand::value(0))
        }
      }

    } // end match on operand token
  }
}

/// Assembles `source` with the limits and policy in `config`.
pub fn assemble<S: AsRef<str>>(source: &[S], config: &MachineConfig)
  -> Result<Program, AssemblyError>
{
  Assembler::new(config).assemble(source)
}
