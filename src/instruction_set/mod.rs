/*!
  The register-machine instruction set: `mov`, `inc`, `dec`, `cmp`, `label`, and the jump family.

  `cmp` leaves the signed difference of its operands in the comparison flag register, `bool`, and
  the conditional jumps test that value against zero. `label` is the only immediate directive. It
  runs during assembly and records the address of the most recently queued instruction, so a label
  placed immediately before an instruction makes a jump to it land on that instruction once the
  fetch-execute loop has advanced the counter past the jump target.
*/

mod arithmetic;
mod control;

use std::rc::Rc;

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

use crate::error::{MachineError, Result};
use crate::machine::MachineState;
use crate::program::{Argument, RcDirective};
use crate::register::{Identifier, Number, Register};

pub use arithmetic::{Arithmetic, Compare, Move};
pub use control::{Jump, Label};

/// Mnemonics of the standard instruction set. The order is the order in which `standard()`
/// registers the corresponding directives.
#[derive(
  StrumDisplay, EnumString, EnumIter,
  Clone,        Copy,       Eq,       PartialEq, Debug, Hash
)]
pub enum Mnemonic {
  // Math directives //
  #[strum(serialize = "mov")]   Mov,
  #[strum(serialize = "inc")]   Inc,
  #[strum(serialize = "dec")]   Dec,
  #[strum(serialize = "cmp")]   Cmp,
  #[strum(serialize = "label")] Label,

  // Jump directives //
  #[strum(serialize = "jmp")]   Jmp,
  #[strum(serialize = "je")]    Je,
  #[strum(serialize = "jne")]   Jne,
  #[strum(serialize = "jl")]    Jl,
  #[strum(serialize = "jle")]   Jle,
  #[strum(serialize = "jg")]    Jg,
  #[strum(serialize = "jge")]   Jge,
}

impl Mnemonic {

  pub fn identifier(&self) -> Identifier {
    Identifier::from(self.to_string())
  }

  /// Long-form names that dispatch to the same directive.
  pub fn aliases(&self) -> Vec<Identifier> {
    let aliases: &[&str] =
      match self {
        Mnemonic::Mov => &["move"],
        Mnemonic::Inc => &["increment"],
        Mnemonic::Dec => &["decrement"],
        Mnemonic::Cmp => &["compare"],
        _             => &[]
      };
    aliases.iter().map(|alias| Identifier::from(*alias)).collect()
  }

  /// The directive implementing this mnemonic.
  pub fn directive(&self) -> RcDirective {
    match self {
      Mnemonic::Mov   => Rc::new(Move),
      Mnemonic::Inc   => Rc::new(Arithmetic::increment()),
      Mnemonic::Dec   => Rc::new(Arithmetic::decrement()),
      Mnemonic::Cmp   => Rc::new(Compare),
      Mnemonic::Label => Rc::new(Label),
      Mnemonic::Jmp   => Rc::new(Jump::always()),
      Mnemonic::Je    => Rc::new(Jump::equal()),
      Mnemonic::Jne   => Rc::new(Jump::not_equal()),
      Mnemonic::Jl    => Rc::new(Jump::less()),
      Mnemonic::Jle   => Rc::new(Jump::less_equal()),
      Mnemonic::Jg    => Rc::new(Jump::greater()),
      Mnemonic::Jge   => Rc::new(Jump::greater_equal()),
    }
  }
}

/// `mov`, `inc`, `dec`, `cmp`, and `label`.
pub fn math_directives() -> Vec<RcDirective> {
  vec![
    Mnemonic::Mov.directive(),
    Mnemonic::Inc.directive(),
    Mnemonic::Dec.directive(),
    Mnemonic::Cmp.directive(),
    Mnemonic::Label.directive(),
  ]
}

/// `jmp` and the six conditional jumps.
pub fn jump_directives() -> Vec<RcDirective> {
  Jump::all()
    .into_iter()
    .map(|jump| Rc::new(jump) as RcDirective)
    .collect()
}

/// The complete instruction set.
pub fn standard() -> Vec<RcDirective> {
  let mut directives = math_directives();
  directives.extend(jump_directives());
  directives
}

// region Operand helpers shared by the directives

/// The register an operation writes to. Only register references qualify.
fn destination<'a>(
    state     : &'a mut MachineState,
    mnemonic  : Mnemonic,
    argument  : &Argument
  ) -> Result<&'a mut Register>
{
  match argument {
    Argument::Register(name) => {
      state.register_mut(name)
           .ok_or_else(|| MachineError::UnknownOperation(name.clone()))
    }
    _ => {
      Err(MachineError::ExpectedRegister {
        operation : mnemonic.identifier(),
        found     : argument.clone()
      })
    }
  }
}

/// Resolves an optional numeric operand: a literal is used as is, a register contributes its
/// current value, and a missing operand defaults to one.
fn resolve(state: &MachineState, argument: Option<&Argument>) -> Result<Number> {
  match argument {
    None                           => Ok(1),
    Some(Argument::Literal(n))     => Ok(*n),
    Some(Argument::Register(name)) => {
      state.register(name)
           .ok_or_else(|| MachineError::UnknownOperation(name.clone()))?
           .number()
    }
    Some(label @ Argument::Label(_)) => Err(MachineError::NotNumeric(label.clone())),
  }
}

// endregion


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;
  use strum::IntoEnumIterator;
  use crate::program::Directive;

  #[test]
  fn mnemonics_round_trip_through_text() {
    for mnemonic in Mnemonic::iter() {
      assert_eq!(Mnemonic::from_str(&mnemonic.to_string()).ok(), Some(mnemonic));
    }
    assert!(Mnemonic::from_str("halt").is_err());
  }

  #[test]
  fn every_mnemonic_names_its_directive() {
    for mnemonic in Mnemonic::iter() {
      assert_eq!(mnemonic.directive().name(), mnemonic.identifier());
    }
  }

  #[test]
  fn standard_set_is_math_then_jumps() {
    let names: Vec<String> = standard().iter().map(|d| d.name().to_string()).collect();
    assert_eq!(
      names,
      vec!["mov", "inc", "dec", "cmp", "label", "jmp", "je", "jne", "jl", "jle", "jg", "jge"]
    );
  }

  #[test]
  fn resolve_defaults_to_one() {
    let state = MachineState::new(&[], &[]);
    assert_eq!(resolve(&state, None), Ok(1));
    assert_eq!(resolve(&state, Some(&Argument::Literal(-3))), Ok(-3));
    assert_eq!(
      resolve(&state, Some(&Argument::label("top"))),
      Err(MachineError::NotNumeric(Argument::label("top")))
    );
  }
}
