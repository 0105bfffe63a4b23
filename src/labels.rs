use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::address::AddressNumberType;
use crate::register::Identifier;

/**
  A label table maps label names to the address of the instruction queued immediately before the
  label, which is `-1` for a label that precedes every instruction. Several labels may share an
  address, and a label defined twice keeps its latest address. A label table is really just a
  convenience wrapper around a `HashMap`.
*/
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelTable {
  table: HashMap<Identifier, AddressNumberType>
}

impl LabelTable {

  pub fn new() -> LabelTable {
    LabelTable {
      table: HashMap::new()
    }
  }

  pub fn get_address(&self, label: &Identifier) -> Option<AddressNumberType> {
    self.table.get(label).copied()
  }

  /// Records `address` for `label`, returning the address it previously had, if any.
  pub fn insert(&mut self, label: Identifier, address: AddressNumberType)
    -> Option<AddressNumberType> {
    self.table.insert(label, address)
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }

  /// Entries ordered by address, then by name.
  pub fn entries(&self) -> Vec<(Identifier, AddressNumberType)> {
    let mut entries: Vec<(Identifier, AddressNumberType)> =
      self.table
          .iter()
          .map(|(label, address)| (label.clone(), *address))
          .collect();
    entries.sort_by_key(|(label, address)| (*address, label.to_string()));
    entries
  }
}

impl Display for LabelTable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{{{}}}",
      self.entries()
          .iter()
          .map(|(label, address)| format!("{}: {}", label, address))
          .collect::<Vec<String>>()
          .join(", ")
    )
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_and_lookup() {
    let mut labels = LabelTable::new();
    assert!(labels.is_empty());
    assert_eq!(labels.insert(Identifier::from("cycle"), 1), None);
    assert_eq!(labels.get_address(&Identifier::from("cycle")), Some(1));
    assert_eq!(labels.get_address(&Identifier::from("finish")), None);
  }

  #[test]
  fn redefinition_keeps_latest() {
    let mut labels = LabelTable::new();
    labels.insert(Identifier::from("top"), -1);
    assert_eq!(labels.insert(Identifier::from("top"), 4), Some(-1));
    assert_eq!(labels.get_address(&Identifier::from("top")), Some(4));
    assert_eq!(labels.len(), 1);
  }

  #[test]
  fn display_orders_by_address() {
    let mut labels = LabelTable::new();
    labels.insert(Identifier::from("finish"), 9);
    labels.insert(Identifier::from("cycle"), 1);
    labels.insert(Identifier::from("asmaller"), 5);
    assert_eq!(labels.to_string(), "{cycle: 1, asmaller: 5, finish: 9}");
  }
}
