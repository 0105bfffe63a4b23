use tracing::trace;

use crate::error::Result;
use crate::machine::{MachineState, COMPARISON_FLAG};
use crate::program::{check_arity, Argument, Arity, Directive};
use crate::register::{Cell, Identifier, Register};

use super::{destination, resolve, Mnemonic};

/**
  `mov register, value` writes `value` into `register` exactly as given. Unlike `inc`, `dec`, and
  `cmp`, a register source is not read: `mov ax, bx` stores the identity of `bx` in `ax`, and a
  later `inc ax` fails because `ax` no longer holds a number.
*/
#[derive(Clone, Copy, Debug, Default)]
pub struct Move;

impl Directive for Move {
  fn name(&self) -> Identifier {
    Mnemonic::Mov.identifier()
  }

  fn aliases(&self) -> Vec<Identifier> {
    Mnemonic::Mov.aliases()
  }

  fn arity(&self) -> Arity {
    Arity::exactly(2)
  }

  fn execute(&self, state: &mut MachineState, args: &[Argument]) -> Result<()> {
    check_arity(self, args.len())?;
    let value    = args[1].to_cell();
    let register = destination(state, Mnemonic::Mov, &args[0])?;

    trace!("mov: {} <- {}", register.name, value);
    register.write(value);
    Ok(())
  }
}

/// `inc register[, amount]` and `dec register[, amount]`. The amount defaults to one.
#[derive(Clone, Copy, Debug)]
pub struct Arithmetic {
  mnemonic: Mnemonic
}

impl Arithmetic {
  pub fn increment() -> Arithmetic {
    Arithmetic { mnemonic: Mnemonic::Inc }
  }

  pub fn decrement() -> Arithmetic {
    Arithmetic { mnemonic: Mnemonic::Dec }
  }
}

impl Directive for Arithmetic {
  fn name(&self) -> Identifier {
    self.mnemonic.identifier()
  }

  fn aliases(&self) -> Vec<Identifier> {
    self.mnemonic.aliases()
  }

  fn arity(&self) -> Arity {
    Arity::between(1, 2)
  }

  fn execute(&self, state: &mut MachineState, args: &[Argument]) -> Result<()> {
    check_arity(self, args.len())?;
    let amount   = resolve(state, args.get(1))?;
    let register = destination(state, self.mnemonic, &args[0])?;
    let current  = register.number()?;

    let result =
      match self.mnemonic {
        Mnemonic::Dec => current.wrapping_sub(amount),
        _             => current.wrapping_add(amount)
      };
    trace!("{}: {} <- {}", self.mnemonic, register.name, result);
    register.write(Cell::Number(result));
    Ok(())
  }
}

/// `cmp register[, amount]` stores `register - amount` in the comparison flag. The amount defaults
/// to one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Compare;

impl Directive for Compare {
  fn name(&self) -> Identifier {
    Mnemonic::Cmp.identifier()
  }

  fn aliases(&self) -> Vec<Identifier> {
    Mnemonic::Cmp.aliases()
  }

  fn arity(&self) -> Arity {
    Arity::between(1, 2)
  }

  fn provisioned_registers(&self) -> Vec<Register> {
    vec![Register::new(COMPARISON_FLAG)]
  }

  fn execute(&self, state: &mut MachineState, args: &[Argument]) -> Result<()> {
    check_arity(self, args.len())?;
    let amount  = resolve(state, args.get(1))?;
    let current = destination(state, Mnemonic::Cmp, &args[0])?.number()?;

    let difference = current.wrapping_sub(amount);
    trace!("cmp: {} <- {}", COMPARISON_FLAG, difference);
    state.set_comparison(difference);
    Ok(())
  }
}
