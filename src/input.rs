//! The input side of `RDV`: whitespace separated decimal integers, consumed one per read in the
//! order they appear, regardless of how they are split across lines.

use std::collections::VecDeque;
use std::io::BufRead;

/// Splits lines from `reader` into tokens and hands them out one at a time.
pub struct IntegerReader<R: BufRead> {
  reader  : R,
  pending : VecDeque<String>
}

impl<R: BufRead> IntegerReader<R> {

  pub fn new(reader: R) -> IntegerReader<R> {
    IntegerReader{
      reader,
      pending: VecDeque::new()
    }
  }

  /// Blocks until a token is available. `None` means the input is exhausted.
  pub fn next_token(&mut self) -> std::io::Result<Option<String>> {
    while self.pending.is_empty() {
      let mut line = String::new();
      if self.reader.read_line(&mut line)? == 0 {
        return Ok(None);
      }
      self.pending.extend(line.split_whitespace().map(str::to_string));
    }
    Ok(self.pending.pop_front())
  }

  /// Reads a whole line, without its line terminator, discarding any tokens still pending from
  /// the previous one. `None` means the input is exhausted.
  pub fn read_line(&mut self) -> std::io::Result<Option<String>> {
    self.pending.clear();
    let mut line = String::new();
    if self.reader.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    let trimmed = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
    line.truncate(trimmed);
    Ok(Some(line))
  }
}
