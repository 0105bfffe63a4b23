use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

use strum_macros::Display as StrumDisplay;

use crate::error::{MachineError, Result};
use crate::machine::MachineState;
use crate::program::Argument;
use crate::register::{Identifier, Register};

/// How an invocation of an operation is dispatched during assembly.
#[derive(StrumDisplay, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
  /// Appended to the instruction table and executed by the fetch-execute loop.
  Instruction,
  /// Executed against the machine state at the moment it is invoked. Never queued.
  Immediate,
}

/// The number of arguments an operation accepts, inclusive on both ends.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Arity {
  pub min : usize,
  pub max : usize
}

impl Arity {
  pub fn exactly(n: usize) -> Arity {
    Arity { min: n, max: n }
  }

  pub fn between(min: usize, max: usize) -> Arity {
    Arity { min, max }
  }

  pub fn accepts(&self, given: usize) -> bool {
    self.min <= given && given <= self.max
  }
}

impl Display for Arity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.min == self.max {
      true  => write!(f, "{}", self.min),
      false => write!(f, "{} to {}", self.min, self.max)
    }
  }
}

/**
  An operation descriptor. The interpreter is built from a fixed set of these, and every name and
  alias a descriptor reports becomes an entry of the interpreter's dispatch table.

  Registers returned by `provisioned_registers` are added to the machine state at the start of
  every run. Descriptors that provision a register of the same name share one copy, which is how
  `cmp` and the jump family communicate through the comparison flag.
*/
pub trait Directive: Debug {
  fn name(&self) -> Identifier;

  fn aliases(&self) -> Vec<Identifier> {
    vec![]
  }

  fn kind(&self) -> Kind {
    Kind::Instruction
  }

  fn arity(&self) -> Arity;

  fn provisioned_registers(&self) -> Vec<Register> {
    vec![]
  }

  /// The behavior of the operation. `args` has already been checked against `arity`.
  fn execute(&self, state: &mut MachineState, args: &[Argument]) -> Result<()>;
}

pub type RcDirective = Rc<dyn Directive>;

/// Fails with `WrongArity` unless `directive` accepts `given` arguments.
pub fn check_arity(directive: &dyn Directive, given: usize) -> Result<()> {
  let expected = directive.arity();
  match expected.accepts(given) {
    true  => Ok(()),
    false => Err(MachineError::WrongArity {
      operation: directive.name(),
      expected,
      given
    })
  }
}
