//! Instruction addresses and the program counter that walks them.

use std::fmt::{Display, Formatter};

use crate::error::{MachineError, Result};

/// `AddressNumberType` is signed: a label defined before any instruction is queued records `-1`.
pub type AddressNumberType = i64;

/// The lowest address a jump may target. The loop's post-increment turns it into address `0`.
pub const MIN_JUMP_TARGET: AddressNumberType = -1;

/// Index of the next instruction to execute.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ProgramCounter(AddressNumberType);

impl ProgramCounter {

  pub fn new() -> ProgramCounter {
    ProgramCounter(0)
  }

  pub fn address(&self) -> AddressNumberType {
    self.0
  }

  /// Converts the counter to an index into an instruction table of `len` entries. Returns `None`
  /// once the counter has left the table, which is how a program terminates.
  pub fn idx(&self, len: usize) -> Option<usize> {
    match self.0 {
      a if a < 0              => None,
      a if a as usize >= len  => None,
      a                       => Some(a as usize)
    }
  }

  /// Overwrites the counter with a jump target. The fetch-execute loop still advances the counter
  /// afterward, so execution resumes at `target + 1`.
  pub fn jump(&mut self, target: AddressNumberType) -> Result<()> {
    if target < MIN_JUMP_TARGET {
      return Err(MachineError::InvalidAddress(target));
    }
    self.0 = target;
    Ok(())
  }

  pub fn advance(&mut self) {
    self.0 = self.0.wrapping_add(1);
  }
}

impl Display for ProgramCounter {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "PC[{}]", self.0)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn idx_inside_and_outside_table() {
    let mut pc = ProgramCounter::new();
    assert_eq!(pc.idx(2), Some(0));
    pc.advance();
    assert_eq!(pc.idx(2), Some(1));
    pc.advance();
    assert_eq!(pc.idx(2), None);
    assert_eq!(ProgramCounter::new().idx(0), None);
  }

  #[test]
  fn jump_then_advance_lands_after_target() {
    let mut pc = ProgramCounter::new();
    pc.jump(3).unwrap();
    pc.advance();
    assert_eq!(pc.address(), 4);

    pc.jump(MIN_JUMP_TARGET).unwrap();
    pc.advance();
    assert_eq!(pc.idx(1), Some(0));
  }

  #[test]
  fn jump_before_program_start_fails() {
    let mut pc = ProgramCounter::new();
    assert_eq!(pc.jump(-2), Err(MachineError::InvalidAddress(-2)));
    assert_eq!(pc.address(), 0);
  }
}
