use bimap::BiMap;
use string_cache::DefaultAtom;

use crate::bytecode::Word;

/**
  The label table maps label names to their position in the instruction stream. Names are
  interned and paired with a slot in definition order through a BiMap; the slot indexes the
  resolved position. Several labels may share one position, which is why positions are not
  the right side of the BiMap.

  The table has a fixed capacity given at construction.
*/
#[derive(Clone, Debug)]
pub struct LabelTable {
  slots     : BiMap<DefaultAtom, usize>,
  positions : Vec<Word>,
  capacity  : usize
}

/// Why a label could not be defined.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DefineError {
  Duplicate,
  Full
}

impl LabelTable {

  pub fn new(capacity: usize) -> LabelTable {
    LabelTable{
      slots     : BiMap::new(),
      positions : Vec::with_capacity(capacity),
      capacity
    }
  }

  pub fn define(&mut self, name: &str, position: Word) -> Result<(), DefineError> {
    let name = DefaultAtom::from(name);
    if self.slots.contains_left(&name) {
      return Err(DefineError::Duplicate);
    }
    if self.positions.len() >= self.capacity {
      return Err(DefineError::Full);
    }
    self.slots.insert(name, self.positions.len());
    self.positions.push(position);
    Ok(())
  }

  pub fn position(&self, name: &str) -> Option<Word> {
    self.slots
        .get_by_left(&DefaultAtom::from(name))
        .map(|slot| self.positions[*slot])
  }

  /// Labels in definition order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, Word)> + '_ {
    self.positions
        .iter()
        .enumerate()
        .filter_map(move |(slot, position)| {
          self.slots.get_by_right(&slot).map(|name| (&**name, *position))
        })
  }

  pub fn len(&self) -> usize {
    self.positions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn define_and_resolve() {
    let mut table = LabelTable::new(4);
    assert!(table.is_empty());
    table.define("loop", 0).unwrap();
    table.define("end", 7).unwrap();
    table.define("also_end", 7).unwrap();

    assert_eq!(table.position("loop"), Some(0));
    assert_eq!(table.position("also_end"), Some(7));
    assert_eq!(table.position("nowhere"), None);
    assert!(!table.is_empty());
    assert_eq!(
      table.iter().collect::<Vec<_>>(),
      vec![("loop", 0), ("end", 7), ("also_end", 7)]
    );
  }

  #[test]
  fn duplicates_and_capacity() {
    let mut table = LabelTable::new(1);
    table.define("a", 1).unwrap();
    assert_eq!(table.define("a", 2), Err(DefineError::Duplicate));
    assert_eq!(table.define("b", 2), Err(DefineError::Full));
    assert_eq!(table.position("a"), Some(1));
    assert_eq!(table.len(), 1);
  }
}
