/*!
  A program is described to the interpreter as an ordered sequence of named invocations. Each name
  resolves to an operation descriptor, a `Directive`, which decides whether the invocation is
  queued into the instruction table for later execution or executed on the spot.

  Nothing in this module is textual. A front end that reads assembly from somewhere is expected to
  translate it into `Invocation`s itself.
*/

mod argument;
mod directive;
mod instruction;

pub use argument::Argument;
pub use directive::{check_arity, Arity, Directive, Kind, RcDirective};
pub use instruction::{Invocation, QueuedInstruction};
