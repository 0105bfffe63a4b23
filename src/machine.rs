//! The state of one interpreter run: the instruction table, the program counter, and every
//! register, user-visible or provisioned. A fresh `MachineState` is built by each run and dropped
//! when the run ends.

use std::fmt::{Display, Formatter};
use std::rc::Rc;

use bimap::BiMap;
use prettytable::{format as TableFormat, Table};

use crate::address::{AddressNumberType, ProgramCounter};
use crate::error::Result;
use crate::labels::LabelTable;
use crate::program::QueuedInstruction;
use crate::register::{Cell, Identifier, Number, Register};

/// Name of the register holding the signed result of the last `cmp`.
pub const COMPARISON_FLAG: &str = "bool";
/// Name of the register holding the label table.
pub const LABEL_TABLE: &str = "labels";

#[derive(Clone, Debug)]
pub struct MachineState {
  instructions : Vec<Rc<QueuedInstruction>>, // Append-only; an index is an address
  pc           : ProgramCounter,
  registers    : Vec<Register>,
  slots        : BiMap<Identifier, usize>,    // Register name <-> index into `registers`
  assembled    : usize,                       // Instructions queued so far
}

impl MachineState {

  // region Construction

  /// Builds the state with a zeroed register for each of `names`, followed by the `provisioned`
  /// registers. A name that is already bound keeps its first register.
  pub fn new(names: &[Identifier], provisioned: &[Register]) -> MachineState {
    let mut state = MachineState {
      instructions : vec![],
      pc           : ProgramCounter::new(),
      registers    : vec![],
      slots        : BiMap::new(),
      assembled    : 0,
    };

    for name in names {
      state.provision(Register::new(name.clone()));
    }
    for register in provisioned {
      state.provision(register.clone());
    }
    state
  }

  /// Binds `register` unless a register of the same name is already bound. Returns the slot the
  /// name is bound to.
  pub fn provision(&mut self, register: Register) -> usize {
    if let Some(slot) = self.slots.get_by_left(&register.name) {
      return *slot;
    }
    let slot = self.registers.len();
    self.slots.insert(register.name.clone(), slot);
    self.registers.push(register);
    slot
  }

  // endregion

  // region Instruction table

  /// Appends an instruction to the table and returns its address.
  pub fn queue(&mut self, instruction: QueuedInstruction) -> AddressNumberType {
    self.instructions.push(Rc::new(instruction));
    self.assembled += 1;
    (self.assembled - 1) as AddressNumberType
  }

  pub fn assembled_count(&self) -> usize {
    self.assembled
  }

  pub fn instructions(&self) -> impl Iterator<Item = &QueuedInstruction> {
    self.instructions.iter().map(|instruction| &**instruction)
  }

  pub fn instruction_count(&self) -> usize {
    self.instructions.len()
  }

  /// The instruction at the program counter, or `None` once the counter has left the table.
  pub fn fetch(&self) -> Option<Rc<QueuedInstruction>> {
    self.pc
        .idx(self.instructions.len())
        .map(|idx| self.instructions[idx].clone())
  }

  pub fn program_counter(&self) -> ProgramCounter {
    self.pc
  }

  pub fn jump(&mut self, target: AddressNumberType) -> Result<()> {
    self.pc.jump(target)
  }

  pub fn advance(&mut self) {
    self.pc.advance();
  }

  // endregion

  // region Registers

  pub fn register(&self, name: &Identifier) -> Option<&Register> {
    self.slots
        .get_by_left(name)
        .map(|slot| &self.registers[*slot])
  }

  pub fn register_mut(&mut self, name: &Identifier) -> Option<&mut Register> {
    match self.slots.get_by_left(name) {
      Some(slot) => Some(&mut self.registers[*slot]),
      None       => None
    }
  }

  pub fn read(&self, name: &Identifier) -> Option<&Cell> {
    self.register(name).map(Register::read)
  }

  /// All registers in the order they were bound.
  pub fn registers(&self) -> impl Iterator<Item = &Register> {
    self.registers.iter()
  }

  /// The value of the comparison flag, zero until the first `cmp` writes it.
  pub fn comparison(&self) -> Number {
    self.read(&Identifier::from(COMPARISON_FLAG))
        .and_then(Cell::as_number)
        .unwrap_or(0)
  }

  pub fn set_comparison(&mut self, value: Number) {
    let slot = self.provision(Register::new(COMPARISON_FLAG));
    self.registers[slot].write(Cell::Number(value));
  }

  pub fn labels(&self) -> Option<&LabelTable> {
    match self.read(&Identifier::from(LABEL_TABLE)) {
      Some(Cell::Labels(table)) => Some(table),
      _                         => None
    }
  }

  /// The label table, provisioned on first use if no directive provisioned it.
  pub fn labels_mut(&mut self) -> &mut LabelTable {
    let slot = self.provision(Register::with_value(LABEL_TABLE, Cell::Labels(LabelTable::new())));

    let cell = self.registers[slot].read_mut();
    if !matches!(cell, Cell::Labels(_)) {
      *cell = Cell::Labels(LabelTable::new());
    }
    match cell {
      Cell::Labels(table) => table,
      _                   => unreachable!("the label table cell was just written")
    }
  }

  // endregion

  // region Display methods

  fn make_table<T>(
      titles    : (&str, &str),
      rows      : Vec<(String, T)>,
      highlight : Option<usize>
    ) -> Table
    where T: Display
  {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->titles.0, ubl->titles.1]);

    for (i, (key, contents)) in rows.iter().enumerate() {
      match Some(i) == highlight {

        true  => {
          table.add_row(row![r->format!("* --> {} =", key), format!("{}", contents)]);
        }

        false => {
          table.add_row(row![r->format!("{} =", key), format!("{}", contents)]);
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for MachineState {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let register_rows =
      self.registers
          .iter()
          .map(|register| (register.name.to_string(), register.read().clone()))
          .collect::<Vec<_>>();
    let instruction_rows =
      self.instructions
          .iter()
          .enumerate()
          .map(|(address, instruction)| (format!("[{}]", address), instruction.clone()))
          .collect::<Vec<_>>();

    let r_table = MachineState::make_table(("Name", "Contents"), register_rows, None);
    let i_table = MachineState::make_table(
      ("Address", "Instruction"),
      instruction_rows,
      self.pc.idx(self.instructions.len())
    );

    let mut combined_table = table!([r_table, i_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Instructions"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "{}\tAssembled: {}\n{}", self.pc, self.assembled, combined_table)
  }
}
