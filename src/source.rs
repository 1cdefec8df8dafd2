/*!
  Where program text comes from. A program is a list of lines; the assembler neither knows nor
  cares whether they came from a file or were typed at the `| ` prompt.
*/

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SourceError;

/// Extension tried when the path as given does not exist.
pub const DEFAULT_EXTENSION: &str = "ins";

/// The prompt printed before each line read interactively.
pub const LINE_PROMPT: &str = "| ";

/// Finds the file to read: `path` itself, or `path` with `.ins` appended.
fn locate(path: &Path) -> Result<PathBuf, SourceError> {
  if path.is_file() {
    return Ok(path.to_path_buf());
  }
  let mut with_extension = path.as_os_str().to_os_string();
  with_extension.push(".");
  with_extension.push(DEFAULT_EXTENSION);
  let with_extension = PathBuf::from(with_extension);
  match with_extension.is_file() {
    true  => Ok(with_extension),
    false => Err(SourceError::NotFound(path.to_path_buf()))
  }
}

/// Reads every line of the program file at `path`, falling back to `path.ins`.
pub fn read_program_file(path: &Path, line_capacity: usize) -> Result<Vec<String>, SourceError> {
  let located = locate(path)?;
  let text = fs::read_to_string(&located)?;
  let lines: Vec<String> = text.lines().map(str::to_string).collect();
  if lines.len() > line_capacity {
    return Err(SourceError::TooManyLines(line_capacity));
  }
  debug!(path = %located.display(), lines = lines.len(), "read program file");
  Ok(lines)
}

/**
  Prompts for program lines on `prompt` and reads them from `reader` until an empty line or the
  end of input. The prompt is flushed before each read so it shows up on a terminal.
*/
pub fn read_program_lines<R, W>(reader: &mut R, prompt: &mut W, line_capacity: usize)
  -> Result<Vec<String>, SourceError>
  where R: BufRead,
        W: Write
{
  let mut lines = Vec::new();
  loop {
    write!(prompt, "{}", LINE_PROMPT)?;
    prompt.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
      break;
    }
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
    if line.is_empty() {
      break;
    }
    if lines.len() == line_capacity {
      return Err(SourceError::TooManyLines(line_capacity));
    }
    lines.push(line.to_string());
  }
  debug!(lines = lines.len(), "read program from input");
  Ok(lines)
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::io::{self, Cursor};

  #[test]
  fn lines_until_blank() {
    let mut input = Cursor::new("PSH 1\r\nPRT\n\nHLT\n");
    let mut prompt = Vec::new();
    let lines = read_program_lines(&mut input, &mut prompt, 8).unwrap();
    assert_eq!(lines, vec!["PSH 1", "PRT"]);
    assert_eq!(String::from_utf8(prompt).unwrap(), "| | | ");

    // The rest is still there for whoever reads next.
    let mut rest = String::new();
    input.read_line(&mut rest).unwrap();
    assert_eq!(rest, "HLT\n");
  }

  #[test]
  fn lines_until_end_of_input() {
    let mut input = Cursor::new("PSH 1\nHLT");
    let lines = read_program_lines(&mut input, &mut io::sink(), 8).unwrap();
    assert_eq!(lines, vec!["PSH 1", "HLT"]);

    let mut empty = Cursor::new("");
    assert!(read_program_lines(&mut empty, &mut io::sink(), 8).unwrap().is_empty());
  }

  #[test]
  fn interactive_line_capacity() {
    let mut input = Cursor::new("A\nB\nC\n");
    let error = read_program_lines(&mut input, &mut io::sink(), 2).unwrap_err();
    assert!(matches!(error, SourceError::TooManyLines(2)));
  }

  #[test]
  fn file_with_and_without_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("count.ins");
    fs::write(&path, "PSH 3\n.loop\nDEC\nJGZ .loop\nHLT\n").unwrap();

    let direct = read_program_file(&path, 16).unwrap();
    assert_eq!(direct.len(), 5);
    assert_eq!(direct[1], ".loop");

    let fallback = read_program_file(&dir.path().join("count"), 16).unwrap();
    assert_eq!(fallback, direct);
  }

  #[test]
  fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nothing");
    let error = read_program_file(&missing, 16).unwrap_err();
    assert!(matches!(&error, SourceError::NotFound(path) if path == &missing));
    assert!(error.to_string().contains("not found"));
  }

  #[test]
  fn file_line_capacity() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "PSH 1\nPSH 2\nADD\nHLT").unwrap();
    let error = read_program_file(file.path(), 3).unwrap_err();
    assert!(matches!(error, SourceError::TooManyLines(3)));
  }
}
