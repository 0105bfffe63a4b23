/*!
  The interpreter runs a program description in two phases.

   1. Assembly. Each invocation is resolved against the dispatch table. Instruction-kind
      operations are queued into the instruction table; immediate operations (`label`) are
      executed against the machine state on the spot.
   2. Execution. The fetch-execute loop runs the instruction at the program counter and then
      advances the counter by one, unconditionally, until the counter leaves the table.

  The dispatch table is closed: it is built once, from the register names and directives the
  interpreter is constructed with, and any other name fails with `UnknownOperation`. Every run
  assembles into a fresh `MachineState`, so runs never observe each other.

  There is no halt instruction and no step limit. A program that never leaves the instruction
  table never returns.
*/

use std::collections::HashMap;

use tracing::{debug, info, trace};

use crate::error::{MachineError, Result};
use crate::instruction_set;
use crate::machine::MachineState;
use crate::program::{check_arity, Argument, Arity, Invocation, Kind, QueuedInstruction, RcDirective};
use crate::register::{Cell, Identifier, Register};

/// Registers of the standard configuration.
pub const STANDARD_REGISTERS: [&str; 4] = ["ax", "bx", "cx", "dx"];

/// What a name of the dispatch surface resolves to.
#[derive(Clone, Debug)]
enum Entry {
  Register,
  Operation(RcDirective)
}

#[derive(Clone, Debug)]
pub struct Interpreter {
  registers   : Vec<Identifier>, // User-visible registers, in the order results are returned
  provisioned : Vec<Register>,   // Registers requested by directives, one per name
  dispatch    : HashMap<Identifier, Entry>,
}

impl Interpreter {

  // region Construction

  /**
    Builds an interpreter with one zero-initialized register per name and one dispatch entry per
    directive name and alias. Fails with `NameCollision` if any two of those names coincide, or if
    a register name coincides with a register some directive provisions.
  */
  pub fn new<I, T>(register_names: I, directives: Vec<RcDirective>) -> Result<Interpreter>
    where I: IntoIterator<Item = T>,
          T: Into<Identifier>
  {
    let mut interpreter = Interpreter {
      registers   : vec![],
      provisioned : vec![],
      dispatch    : HashMap::new(),
    };

    for name in register_names {
      let name = name.into();
      interpreter.bind(name.clone(), Entry::Register)?;
      interpreter.registers.push(name);
    }

    for directive in directives {
      interpreter.register_directive(directive)?;
    }

    Ok(interpreter)
  }

  /// Registers `ax`, `bx`, `cx`, `dx` with the full instruction set.
  pub fn standard() -> Result<Interpreter> {
    Interpreter::new(STANDARD_REGISTERS.iter().copied(), instruction_set::standard())
  }

  fn bind(&mut self, name: Identifier, entry: Entry) -> Result<()> {
    if self.dispatch.contains_key(&name) {
      return Err(MachineError::NameCollision(name));
    }
    self.dispatch.insert(name, entry);
    Ok(())
  }

  fn register_directive(&mut self, directive: RcDirective) -> Result<()> {
    let mut names = vec![directive.name()];
    names.extend(directive.aliases());
    for name in names {
      self.bind(name, Entry::Operation(directive.clone()))?;
    }

    for register in directive.provisioned_registers() {
      if self.registers.contains(&register.name) {
        return Err(MachineError::NameCollision(register.name));
      }
      if self.provisioned.iter().all(|known| known.name != register.name) {
        self.provisioned.push(register);
      }
    }
    Ok(())
  }

  // endregion

  // region Accessors

  pub fn register_names(&self) -> &[Identifier] {
    &self.registers
  }

  /// The registers directives asked for, in the order they were first requested.
  pub fn provisioned_registers(&self) -> &[Register] {
    &self.provisioned
  }

  pub fn is_register(&self, name: &Identifier) -> bool {
    matches!(self.dispatch.get(name), Some(Entry::Register))
  }

  /// The directive an operation name or alias dispatches to.
  pub fn directive(&self, name: &Identifier) -> Option<RcDirective> {
    match self.dispatch.get(name) {
      Some(Entry::Operation(directive)) => Some(directive.clone()),
      _                                 => None
    }
  }

  // endregion

  // region Assembly

  /// Starts assembling a new program into a fresh machine state.
  pub fn assembler(&self) -> Assembler<'_> {
    Assembler {
      interpreter : self,
      state       : MachineState::new(&self.registers, &self.provisioned)
    }
  }

  /// Assembles `program` without executing it.
  pub fn assemble(&self, program: &[Invocation]) -> Result<MachineState> {
    self.assemble_with(|assembler| {
      for invocation in program {
        assembler.invoke(invocation.name.clone(), invocation.arguments.clone())?;
      }
      Ok(())
    })
  }

  /// Assembles the program `build` describes through the assembler's `invoke` and `reference`.
  pub fn assemble_with<F>(&self, build: F) -> Result<MachineState>
    where F: FnOnce(&mut Assembler<'_>) -> Result<()>
  {
    let mut assembler = self.assembler();
    build(&mut assembler)?;
    Ok(assembler.finish())
  }

  // endregion

  // region Execution

  /// The fetch-execute loop. Runs until the program counter leaves the instruction table.
  pub fn execute(&self, state: &mut MachineState) -> Result<()> {
    #[cfg(feature = "trace_computation")]
    println!("{}", state);

    while let Some(instruction) = state.fetch() {
      trace!("{}: {}", state.program_counter(), instruction);
      instruction.execute(state)?;
      state.advance();

      #[cfg(feature = "trace_computation")]
      println!("{}", state);
    }
    Ok(())
  }

  /// The values of the user-visible registers, in construction order.
  pub fn results(&self, state: &MachineState) -> Vec<Cell> {
    self.registers
        .iter()
        .map(|name| state.read(name).cloned().unwrap_or_default())
        .collect()
  }

  /// Assembles and executes `program`, returning the final values of the user-visible registers.
  pub fn run(&self, program: &[Invocation]) -> Result<Vec<Cell>> {
    let mut state = self.assemble(program)?;
    self.run_assembled(&mut state)
  }

  /// Like `run`, with the program described by a closure over the assembler.
  pub fn run_with<F>(&self, build: F) -> Result<Vec<Cell>>
    where F: FnOnce(&mut Assembler<'_>) -> Result<()>
  {
    let mut state = self.assemble_with(build)?;
    self.run_assembled(&mut state)
  }

  fn run_assembled(&self, state: &mut MachineState) -> Result<Vec<Cell>> {
    info!("running {} instruction(s)", state.instruction_count());
    self.execute(state)?;

    let results = self.results(state);
    info!(
      "finished: {}",
      self.registers
          .iter()
          .zip(results.iter())
          .map(|(name, value)| format!("{} = {}", name, value))
          .collect::<Vec<String>>()
          .join(", ")
    );
    Ok(results)
  }

  // endregion
}

/**
  The dispatch surface of one program under assembly. `invoke` is the single entry point for
  operations; `reference` is the single entry point for registers, producing the argument that
  lets an operation tell "this register's value" apart from a literal.
*/
pub struct Assembler<'i> {
  interpreter : &'i Interpreter,
  state       : MachineState
}

impl<'i> Assembler<'i> {

  /**
    Dispatches one invocation. Instruction-kind operations are queued; immediate operations run
    now. A register name may be invoked with no arguments, which has no effect.

    Arguments are checked against the operation's arity, and every register argument must name a
    register of this interpreter.
  */
  pub fn invoke<T: Into<Identifier>>(&mut self, name: T, args: Vec<Argument>) -> Result<()> {
    let name = name.into();
    let directive =
      match self.interpreter.dispatch.get(&name) {
        None => {
          return Err(MachineError::UnknownOperation(name));
        }
        Some(Entry::Register) => {
          return match args.is_empty() {
            true  => Ok(()),
            false => Err(MachineError::WrongArity {
              operation : name,
              expected  : Arity::exactly(0),
              given     : args.len()
            })
          };
        }
        Some(Entry::Operation(directive)) => directive.clone()
      };

    check_arity(&*directive, args.len())?;
    for argument in args.iter() {
      if let Argument::Register(register) = argument {
        self.reference(register.clone())?;
      }
    }

    match directive.kind() {
      Kind::Instruction => {
        let instruction = QueuedInstruction::new(directive, args);
        debug!("[{}] {}", self.state.assembled_count(), instruction);
        self.state.queue(instruction);
        Ok(())
      }
      Kind::Immediate => {
        debug!("immediate {}", Invocation::new(name, args.clone()));
        directive.execute(&mut self.state, &args)
      }
    }
  }

  /// A reference to the named register, for use as an argument.
  pub fn reference<T: Into<Identifier>>(&self, name: T) -> Result<Argument> {
    let name = name.into();
    match self.interpreter.dispatch.get(&name) {
      Some(Entry::Register)     => Ok(Argument::Register(name)),
      Some(Entry::Operation(_)) => Err(MachineError::NotARegister(name)),
      None                      => Err(MachineError::UnknownOperation(name))
    }
  }

  pub fn state(&self) -> &MachineState {
    &self.state
  }

  /// Ends assembly. The instruction table and the label table are final from here on.
  pub fn finish(self) -> MachineState {
    self.state
  }
}
