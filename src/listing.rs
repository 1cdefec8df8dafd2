//! Tables for the instruction set, the registers, and assembled programs.

use lazy_static::lazy_static;
use prettytable::{format as TableFormat, row, Table};
use strum::{EnumCount, IntoEnumIterator};

use crate::bytecode::{Operation, Program};
use crate::registers::{Register, REGISTER_COUNT};

lazy_static! {
  pub static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

/// Every instruction, grouped, with its opcode id in hex.
pub fn operations_table() -> Table {
  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"#", ubl->"Instruction", ubl->"Group"]);

  let mut last_group = None;
  for operation in Operation::iter() {
    let group = operation.group();
    // Blank row between groups.
    if last_group.is_some() && last_group != Some(group) {
      table.add_row(row!["", "", ""]);
    }
    last_group = Some(group);
    table.add_row(row![
      r->format!("{:03x}", operation.code()),
      operation.signature(),
      group
    ]);
  }
  table
}

pub fn operations_listing() -> String {
  format!(
    "{}\nTotal {} instructions available.\n",
    operations_table(),
    Operation::COUNT
  )
}

pub fn registers_table() -> Table {
  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"#", ubl->"Register", ubl->"Purpose"]);
  for register in Register::iter() {
    table.add_row(row![r->format!("{:x}", register.id()), register, register.purpose()]);
  }
  table
}

pub fn registers_listing() -> String {
  format!("{}\nTotal {} registers available.\n", registers_table(), REGISTER_COUNT)
}

/// The assembled operand stream, one row per operand, with labels shown where they point.
pub fn program_table(program: &Program) -> Table {
  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Position", ubl->"Label", ubl->"Operand"]);

  for (position, operand) in program.operands().iter().enumerate() {
    let labels = program
      .labels()
      .iter()
      .filter(|(_, at)| *at as usize == position)
      .map(|(name, _)| format!(".{}", name))
      .collect::<Vec<String>>()
      .join(" ");
    table.add_row(row![r->position, labels, operand]);
  }
  table
}
