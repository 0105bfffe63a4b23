//! Registers are named cells owned by the machine state for the duration of one run. Besides the
//! user-visible registers the interpreter was built with, directives provision registers of their
//! own: the comparison flag and the label table both live in registers.

use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;

use crate::error::{MachineError, Result};
use crate::labels::LabelTable;

/// Register, operation, and label names. As with all strings in this codebase, names are interned,
/// so clones are cheap and comparisons are pointer comparisons.
pub type Identifier = DefaultAtom;

/// Arithmetic is on machine integers and is not overflow checked.
pub type Number = i64;

/// The contents of a register.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Cell {
  Number(Number),
  /// The identity of a register, as stored by `mov` when its source is a register.
  Register(Identifier),
  /// A bare symbol, as stored by `mov` when its source is a label.
  Label(Identifier),
  /// The label table provisioned by `label` and the jump family.
  Labels(LabelTable),
}

impl Cell {
  pub fn as_number(&self) -> Option<Number> {
    match self {
      Cell::Number(n) => Some(*n),
      _               => None
    }
  }
}

impl Default for Cell {
  fn default() -> Cell {
    Cell::Number(0)
  }
}

impl From<Number> for Cell {
  fn from(n: Number) -> Cell {
    Cell::Number(n)
  }
}

impl Display for Cell {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Cell::Number(n) => {
        write!(f, "{}", n)
      },
      Cell::Register(name) => {
        write!(f, "<REG, {}>", name)
      },
      Cell::Label(name) => {
        write!(f, "<LABEL, {}>", name)
      },
      Cell::Labels(table) => {
        write!(f, "{}", table)
      }
    }
  }
}

/// A named mutable value cell.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Register {
  pub name : Identifier,
  value    : Cell
}

impl Register {

  /// Creates a register holding zero.
  pub fn new<T: Into<Identifier>>(name: T) -> Register {
    Register::with_value(name, Cell::default())
  }

  pub fn with_value<T: Into<Identifier>>(name: T, value: Cell) -> Register {
    Register {
      name: name.into(),
      value
    }
  }

  pub fn read(&self) -> &Cell {
    &self.value
  }

  pub fn read_mut(&mut self) -> &mut Cell {
    &mut self.value
  }

  pub fn write(&mut self, value: Cell) {
    self.value = value;
  }

  /// Reads the register as a number, failing if it holds anything else.
  pub fn number(&self) -> Result<Number> {
    self.value.as_number().ok_or_else(|| {
      MachineError::NotANumber {
        register : self.name.clone(),
        found    : self.value.clone()
      }
    })
  }
}

impl Display for Register {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.name, self.value)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_register_is_zero() {
    let r = Register::new("ax");
    assert_eq!(r.read(), &Cell::Number(0));
    assert_eq!(r.number(), Ok(0));
  }

  #[test]
  fn write_then_read() {
    let mut r = Register::new("bx");
    r.write(Cell::Number(-7));
    assert_eq!(r.number(), Ok(-7));
    assert_eq!(format!("{}", r), "bx:-7");
  }

  #[test]
  fn register_identity_is_not_a_number() {
    let r = Register::with_value("ax", Cell::Register(Identifier::from("bx")));
    match r.number() {
      Err(MachineError::NotANumber { register, found }) => {
        assert_eq!(register, Identifier::from("ax"));
        assert_eq!(found, Cell::Register(Identifier::from("bx")));
      }
      other => panic!("expected NotANumber, got {:?}", other)
    }
  }

  #[test]
  fn cell_display() {
    assert_eq!(Cell::Number(40).to_string(), "40");
    assert_eq!(Cell::Register(Identifier::from("cx")).to_string(), "<REG, cx>");
    assert_eq!(Cell::Label(Identifier::from("cycle")).to_string(), "<LABEL, cycle>");
  }
}
