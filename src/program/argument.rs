use std::fmt::{Display, Formatter};

use crate::register::{Cell, Identifier, Number};

/**
  An argument to an operation: either a literal number, a reference to a register, or a bare
  label symbol. Operations resolve arguments explicitly; `inc`, `dec`, and `cmp` read the value of
  a register argument, `mov` stores the argument exactly as given, and jumps look labels up in the
  label table.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Argument {
  Literal(Number),
  Register(Identifier),
  Label(Identifier),
}

impl Argument {

  pub fn label<T: Into<Identifier>>(name: T) -> Argument {
    Argument::Label(name.into())
  }

  /// The cell `mov` writes for this argument. Registers are stored by identity.
  pub fn to_cell(&self) -> Cell {
    match self {
      Argument::Literal(n)     => Cell::Number(*n),
      Argument::Register(name) => Cell::Register(name.clone()),
      Argument::Label(name)    => Cell::Label(name.clone()),
    }
  }

  pub fn register_name(&self) -> Option<&Identifier> {
    match self {
      Argument::Register(name) => Some(name),
      _                        => None
    }
  }
}

impl From<Number> for Argument {
  fn from(n: Number) -> Argument {
    Argument::Literal(n)
  }
}

impl Display for Argument {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Argument::Literal(n) => {
        write!(f, "{}", n)
      },
      | Argument::Register(name)
      | Argument::Label(name) => {
        write!(f, "{}", name)
      }
    }
  }
}
