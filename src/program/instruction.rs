use std::fmt::{Display, Formatter};

use crate::error::Result;
use crate::machine::MachineState;
use crate::program::{Argument, RcDirective};
use crate::register::Identifier;

/// One named invocation of a program description.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Invocation {
  pub name      : Identifier,
  pub arguments : Vec<Argument>
}

impl Invocation {
  pub fn new<T: Into<Identifier>>(name: T, arguments: Vec<Argument>) -> Invocation {
    Invocation {
      name: name.into(),
      arguments
    }
  }
}

impl Display for Invocation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}({})", self.name, join_arguments(&self.arguments))
  }
}

/// An assembled instruction. Its address is its index in the instruction table, and it is never
/// mutated once queued.
#[derive(Clone, Debug)]
pub struct QueuedInstruction {
  directive : RcDirective,
  arguments : Vec<Argument>
}

impl QueuedInstruction {
  pub fn new(directive: RcDirective, arguments: Vec<Argument>) -> QueuedInstruction {
    QueuedInstruction { directive, arguments }
  }

  pub fn name(&self) -> Identifier {
    self.directive.name()
  }

  pub fn arguments(&self) -> &[Argument] {
    &self.arguments
  }

  pub fn execute(&self, state: &mut MachineState) -> Result<()> {
    self.directive.execute(state, &self.arguments)
  }
}

impl Display for QueuedInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}({})", self.directive.name(), join_arguments(&self.arguments))
  }
}

fn join_arguments(arguments: &[Argument]) -> String {
  arguments.iter()
           .map(Argument::to_string)
           .collect::<Vec<String>>()
           .join(", ")
}
