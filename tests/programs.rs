//! End-to-end programs run through the standard interpreter.

use asm_dsl::{Argument, Cell, Identifier, Interpreter, Invocation, MachineError};

fn reg(name: &str) -> Argument {
  Argument::Register(Identifier::from(name))
}

fn lit(n: i64) -> Argument {
  Argument::Literal(n)
}

fn label(name: &str) -> Argument {
  Argument::label(name)
}

fn op(name: &str, arguments: Vec<Argument>) -> Invocation {
  Invocation::new(name, arguments)
}

fn numbers(results: Vec<Cell>) -> Vec<i64> {
  results.iter().map(|cell| cell.as_number().unwrap()).collect()
}

fn run(program: &[Invocation]) -> Result<Vec<i64>, MachineError> {
  Interpreter::standard().unwrap().run(program).map(numbers)
}

fn gcd(a: i64, b: i64) -> Vec<Invocation> {
  vec![
    op("move",      vec![reg("ax"), lit(a)]),
    op("move",      vec![reg("bx"), lit(b)]),
    op("label",     vec![label("cycle")]),
    op("compare",   vec![reg("ax"), reg("bx")]),
    op("je",        vec![label("finish")]),
    op("jl",        vec![label("asmaller")]),
    op("decrement", vec![reg("ax"), reg("bx")]),
    op("jmp",       vec![label("cycle")]),
    op("label",     vec![label("asmaller")]),
    op("decrement", vec![reg("bx"), reg("ax")]),
    op("jmp",       vec![label("cycle")]),
    op("label",     vec![label("finish")]),
  ]
}

#[test]
fn subtractive_gcd() {
  assert_eq!(run(&gcd(40, 32)), Ok(vec![8, 8, 0, 0]));
  assert_eq!(run(&gcd(21, 14)), Ok(vec![7, 7, 0, 0]));
  assert_eq!(run(&gcd(17, 5)),  Ok(vec![1, 1, 0, 0]));
}

#[test]
fn gcd_label_addresses() {
  let interpreter = Interpreter::standard().unwrap();
  let state = interpreter.assemble(&gcd(40, 32)).unwrap();
  let labels = state.labels().unwrap();

  assert_eq!(state.instruction_count(), 9);
  assert_eq!(labels.get_address(&Identifier::from("cycle")),    Some(1));
  assert_eq!(labels.get_address(&Identifier::from("asmaller")), Some(6));
  assert_eq!(labels.get_address(&Identifier::from("finish")),   Some(8));
}

#[test]
fn identical_configurations_agree() {
  let first  = Interpreter::standard().unwrap().run(&gcd(84, 36)).unwrap();
  let second = Interpreter::standard().unwrap().run(&gcd(84, 36)).unwrap();
  assert_eq!(first, second);
  assert_eq!(numbers(first), vec![12, 12, 0, 0]);
}

#[test]
fn increment_defaults_to_one() {
  let program = vec![
    op("increment", vec![reg("ax")]),
  ];
  assert_eq!(run(&program), Ok(vec![1, 0, 0, 0]));
}

#[test]
fn increment_by_register_value() {
  let program = vec![
    op("mov", vec![reg("ax"), lit(2)]),
    op("mov", vec![reg("bx"), lit(5)]),
    op("inc", vec![reg("ax"), reg("bx")]),
  ];
  assert_eq!(run(&program), Ok(vec![7, 5, 0, 0]));
}

#[test]
fn jump_lands_on_instruction_after_label() {
  let program = vec![
    op("mov",   vec![reg("ax"), lit(1)]),
    op("jmp",   vec![label("target")]),
    op("inc",   vec![reg("ax"), lit(100)]),
    op("label", vec![label("target")]),
    op("inc",   vec![reg("ax"), lit(10)]),
  ];
  assert_eq!(run(&program), Ok(vec![11, 0, 0, 0]));
}

#[test]
fn literal_jump_resumes_after_address() {
  let program = vec![
    op("jmp", vec![lit(1)]),
    op("inc", vec![reg("ax"), lit(100)]),
    op("inc", vec![reg("bx")]),
  ];
  assert_eq!(run(&program), Ok(vec![0, 1, 0, 0]));
}

#[test]
fn untaken_jump_falls_through() {
  let program = vec![
    op("cmp", vec![reg("ax"), lit(1)]),
    op("jg",  vec![lit(5)]),
    op("inc", vec![reg("ax")]),
  ];
  assert_eq!(run(&program), Ok(vec![1, 0, 0, 0]));
}

#[test]
fn loop_back_to_start() {
  let program = vec![
    op("label", vec![label("top")]),
    op("inc",   vec![reg("ax")]),
    op("cmp",   vec![reg("ax"), lit(5)]),
    op("jl",    vec![label("top")]),
  ];
  assert_eq!(run(&program), Ok(vec![5, 0, 0, 0]));
}

#[test]
fn multiply_by_repeated_addition() {
  let program = vec![
    op("mov",   vec![reg("bx"), lit(6)]),
    op("mov",   vec![reg("cx"), lit(7)]),
    op("label", vec![label("again")]),
    op("inc",   vec![reg("ax"), reg("bx")]),
    op("dec",   vec![reg("cx")]),
    op("cmp",   vec![reg("cx"), lit(0)]),
    op("jne",   vec![label("again")]),
  ];
  assert_eq!(run(&program), Ok(vec![42, 6, 0, 0]));
}

#[test]
fn forward_and_backward_jumps_with_jge_and_jle() {
  // dx counts the values of ax in 0..4 that exceed 2.
  let program = vec![
    op("label", vec![label("next")]),
    op("cmp",   vec![reg("ax"), lit(2)]),
    op("jle",   vec![label("small")]),
    op("inc",   vec![reg("dx")]),
    op("label", vec![label("small")]),
    op("inc",   vec![reg("ax")]),
    op("cmp",   vec![reg("ax"), lit(4)]),
    op("jge",   vec![label("done")]),
    op("jmp",   vec![label("next")]),
    op("label", vec![label("done")]),
  ];
  assert_eq!(run(&program), Ok(vec![4, 0, 0, 1]));
}

#[test]
fn mov_stores_register_identity() {
  let interpreter = Interpreter::standard().unwrap();
  let results = interpreter.run(&[
    op("mov", vec![reg("bx"), lit(9)]),
    op("mov", vec![reg("ax"), reg("bx")]),
  ]).unwrap();
  assert_eq!(results[0], Cell::Register(Identifier::from("bx")));
  assert_eq!(results[1], Cell::Number(9));
}

#[test]
fn undefined_label_fails() {
  let program = vec![
    op("inc", vec![reg("ax")]),
    op("jmp", vec![label("nowhere")]),
  ];
  assert_eq!(run(&program), Err(MachineError::UndefinedLabel(Identifier::from("nowhere"))));
}

#[test]
fn untaken_jump_to_undefined_label_is_harmless() {
  let program = vec![
    op("cmp", vec![reg("ax"), lit(0)]),
    op("jne", vec![label("nowhere")]),
    op("inc", vec![reg("ax")]),
  ];
  assert_eq!(run(&program), Ok(vec![1, 0, 0, 0]));
}

#[test]
fn jump_before_program_start_fails() {
  assert_eq!(run(&[op("jmp", vec![lit(-5)])]), Err(MachineError::InvalidAddress(-5)));
}

#[test]
fn custom_register_set() {
  let interpreter = Interpreter::new(vec!["x", "y"], asm_dsl::instruction_set::standard()).unwrap();
  let results = interpreter.run(&[
    op("mov", vec![reg("x"), lit(3)]),
    op("dec", vec![reg("y"), reg("x")]),
  ]).unwrap();
  assert_eq!(numbers(results), vec![3, -3]);
}
