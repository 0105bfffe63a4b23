#[macro_use] extern crate prettytable;

use std::process;

use clap::Parser;
use prettytable::{format, Table};
use tracing_subscriber::EnvFilter;

use asm_dsl::{Argument, Interpreter, Invocation, MachineError, Number};

#[derive(Parser)]
#[command(name = "asm-dsl")]
#[command(about = "Computes a greatest common divisor on the register machine", long_about = None)]
struct Cli {
  /// First operand, loaded into `ax`.
  #[arg(default_value_t = 40)]
  a: Number,

  /// Second operand, loaded into `bx`.
  #[arg(default_value_t = 32)]
  b: Number,

  /// Print the machine state after the program finishes.
  #[arg(long)]
  state: bool,
}

/// Subtractive GCD. Both operands must be positive for the program to terminate.
fn gcd_program(a: Number, b: Number) -> Vec<Invocation> {
  let ax = Argument::Register("ax".into());
  let bx = Argument::Register("bx".into());

  vec![
    Invocation::new("mov",   vec![ax.clone(), Argument::Literal(a)]),
    Invocation::new("mov",   vec![bx.clone(), Argument::Literal(b)]),
    Invocation::new("label", vec![Argument::label("cycle")]),
    Invocation::new("cmp",   vec![ax.clone(), bx.clone()]),
    Invocation::new("je",    vec![Argument::label("finish")]),
    Invocation::new("jl",    vec![Argument::label("asmaller")]),
    Invocation::new("dec",   vec![ax.clone(), bx.clone()]),
    Invocation::new("jmp",   vec![Argument::label("cycle")]),
    Invocation::new("label", vec![Argument::label("asmaller")]),
    Invocation::new("dec",   vec![bx, ax]),
    Invocation::new("jmp",   vec![Argument::label("cycle")]),
    Invocation::new("label", vec![Argument::label("finish")]),
  ]
}

fn run(cli: &Cli) -> Result<(), MachineError> {
  let interpreter = Interpreter::standard()?;
  let mut state   = interpreter.assemble(&gcd_program(cli.a, cli.b))?;
  interpreter.execute(&mut state)?;

  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_CLEAN);
  for (name, value) in interpreter.register_names().iter().zip(interpreter.results(&state)) {
    table.add_row(row![r->name, value]);
  }
  print!("{}", table);

  if cli.state {
    println!("{}", state);
  }
  Ok(())
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  if cli.a <= 0 || cli.b <= 0 {
    eprintln!("Error: both operands must be positive.");
    process::exit(2);
  }

  if let Err(e) = run(&cli) {
    eprintln!("Error: {}", e);
    process::exit(1);
  }
}
