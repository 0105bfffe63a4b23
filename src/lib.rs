/*!
  A directive-driven register machine.

  An `Interpreter` is built from a list of register names and a set of operation descriptors,
  `Directive`s. A program is an ordered sequence of named invocations; the interpreter assembles it
  into an instruction table, resolving labels as it goes, and then runs a fetch-execute loop over
  the table until the program counter runs off its end. The values of the named registers are the
  result.

  ```
  use asm_dsl::{Argument, Cell, Interpreter};

  let interpreter = Interpreter::standard().unwrap();
  let results = interpreter.run_with(|asm| {
    let ax = asm.reference("ax")?;
    asm.invoke("mov", vec![ax.clone(), Argument::Literal(41)])?;
    asm.invoke("inc", vec![ax])
  }).unwrap();
  assert_eq!(results[0], Cell::Number(42));
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod error;
pub mod instruction_set;
pub mod interpreter;
pub mod labels;
pub mod machine;
pub mod program;
pub mod register;

pub use error::{MachineError, Result};
pub use interpreter::{Assembler, Interpreter};
pub use machine::MachineState;
pub use program::{Argument, Directive, Invocation, Kind};
pub use register::{Cell, Identifier, Number, Register};
