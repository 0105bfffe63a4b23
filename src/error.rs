//! Errors raised while building an interpreter, assembling a program, or running it.

use thiserror::Error;

use crate::address::AddressNumberType;
use crate::program::{Argument, Arity};
use crate::register::{Cell, Identifier};

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MachineError {
  /// The name is neither an operation nor a register of this interpreter.
  #[error("`{0}` is neither an operation nor a register")]
  UnknownOperation(Identifier),

  /// The name is dispatchable, but it names an operation rather than a register.
  #[error("`{0}` is not a register")]
  NotARegister(Identifier),

  /// A jump named a label that no `label` invocation defined.
  #[error("jump to undefined label `{0}`")]
  UndefinedLabel(Identifier),

  #[error("{operation} takes {expected} argument(s) but was given {given}")]
  WrongArity {
    operation : Identifier,
    expected  : Arity,
    given     : usize
  },

  #[error("{operation} requires a register as its destination, found {found}")]
  ExpectedRegister {
    operation : Identifier,
    found     : Argument
  },

  #[error("{operation} requires a label, found {found}")]
  ExpectedLabel {
    operation : Identifier,
    found     : Argument
  },

  #[error("`{register}` holds {found}, which is not a number")]
  NotANumber {
    register : Identifier,
    found    : Cell
  },

  #[error("`{0}` is not a numeric operand")]
  NotNumeric(Argument),

  #[error("`{0}` cannot be used as a jump target")]
  NotAnAddress(Argument),

  #[error("jump target {0} lies before the start of the program")]
  InvalidAddress(AddressNumberType),

  /// Raised at construction when two names of the dispatch surface coincide.
  #[error("the name `{0}` is declared more than once")]
  NameCollision(Identifier),
}

pub type Result<T> = std::result::Result<T, MachineError>;
