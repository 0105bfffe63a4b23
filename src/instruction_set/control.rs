use tracing::debug;

use crate::address::AddressNumberType;
use crate::error::{MachineError, Result};
use crate::labels::LabelTable;
use crate::machine::{MachineState, COMPARISON_FLAG, LABEL_TABLE};
use crate::program::{check_arity, Argument, Arity, Directive, Kind};
use crate::register::{Cell, Identifier, Number, Register};

use super::Mnemonic;

fn label_table_register() -> Register {
  Register::with_value(LABEL_TABLE, Cell::Labels(LabelTable::new()))
}

/**
  `label name` is executed during assembly. It records the address of the most recently queued
  instruction, `assembled_count - 1`, under `name`. A label that precedes every instruction records
  `-1`.
*/
#[derive(Clone, Copy, Debug, Default)]
pub struct Label;

impl Directive for Label {
  fn name(&self) -> Identifier {
    Mnemonic::Label.identifier()
  }

  fn kind(&self) -> Kind {
    Kind::Immediate
  }

  fn arity(&self) -> Arity {
    Arity::exactly(1)
  }

  fn provisioned_registers(&self) -> Vec<Register> {
    vec![label_table_register()]
  }

  fn execute(&self, state: &mut MachineState, args: &[Argument]) -> Result<()> {
    check_arity(self, args.len())?;
    let name =
      match &args[0] {
        Argument::Label(name) => name.clone(),
        other => {
          return Err(MachineError::ExpectedLabel {
            operation : self.name(),
            found     : other.clone()
          });
        }
      };

    let address = state.assembled_count() as AddressNumberType - 1;
    match state.labels_mut().insert(name.clone(), address) {
      Some(previous) => debug!("label {} moved from {} to {}", name, previous, address),
      None           => debug!("label {} = {}", name, address)
    }
    Ok(())
  }
}

/**
  The jump family. Each jump tests the comparison flag with its condition and, if the condition
  holds, overwrites the program counter with its target: the address recorded for a label, or a
  literal address. A failed condition leaves the counter alone.
*/
#[derive(Clone, Copy, Debug)]
pub struct Jump {
  mnemonic  : Mnemonic,
  condition : fn(Number) -> bool
}

impl Jump {
  pub fn always() -> Jump {
    Jump { mnemonic: Mnemonic::Jmp, condition: |_| true }
  }

  pub fn equal() -> Jump {
    Jump { mnemonic: Mnemonic::Je, condition: |flag| flag == 0 }
  }

  pub fn not_equal() -> Jump {
    Jump { mnemonic: Mnemonic::Jne, condition: |flag| flag != 0 }
  }

  pub fn less() -> Jump {
    Jump { mnemonic: Mnemonic::Jl, condition: |flag| flag < 0 }
  }

  pub fn less_equal() -> Jump {
    Jump { mnemonic: Mnemonic::Jle, condition: |flag| flag <= 0 }
  }

  pub fn greater() -> Jump {
    Jump { mnemonic: Mnemonic::Jg, condition: |flag| flag > 0 }
  }

  pub fn greater_equal() -> Jump {
    Jump { mnemonic: Mnemonic::Jge, condition: |flag| flag >= 0 }
  }

  pub fn all() -> Vec<Jump> {
    vec![
      Jump::always(),
      Jump::equal(),
      Jump::not_equal(),
      Jump::less(),
      Jump::less_equal(),
      Jump::greater(),
      Jump::greater_equal(),
    ]
  }

  pub fn holds(&self, flag: Number) -> bool {
    (self.condition)(flag)
  }

  fn target(&self, state: &MachineState, argument: &Argument) -> Result<AddressNumberType> {
    match argument {
      Argument::Literal(address) => Ok(*address),
      Argument::Label(name)      => {
        state.labels()
             .and_then(|labels| labels.get_address(name))
             .ok_or_else(|| MachineError::UndefinedLabel(name.clone()))
      }
      register @ Argument::Register(_) => Err(MachineError::NotAnAddress(register.clone()))
    }
  }
}

impl Directive for Jump {
  fn name(&self) -> Identifier {
    self.mnemonic.identifier()
  }

  fn arity(&self) -> Arity {
    Arity::exactly(1)
  }

  // Jumps read both registers, so they work even when `cmp` or `label` is absent.
  fn provisioned_registers(&self) -> Vec<Register> {
    vec![Register::new(COMPARISON_FLAG), label_table_register()]
  }

  fn execute(&self, state: &mut MachineState, args: &[Argument]) -> Result<()> {
    check_arity(self, args.len())?;
    if !self.holds(state.comparison()) {
      return Ok(());
    }

    let target = self.target(state, &args[0])?;
    debug!("{} taken: {} -> {}", self.mnemonic, state.program_counter(), target);
    state.jump(target)
  }
}
