use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};

use botasm::output::Output;
use botasm::serialize::{annotate, encode_bits};
use botasm::{decode, Vm, DEFAULT_STEP_LIMIT};

/// Botasm assembles and runs programs for a small robot-control instruction set.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble the built-in sample program
    Demo {
        /// Emit an annotated listing instead of the bit stream
        #[arg(short, long)]
        annotate: bool,
        /// Include labels and annotations in the listing
        #[arg(short, long, requires = "annotate")]
        notes: bool,
        /// Destination file, stdout if omitted
        dest: Option<PathBuf>,
    },
    /// Run a bit stream and print the final memory
    Run {
        /// Bit stream file, stdin if omitted
        name: Option<PathBuf>,
        /// Trace every executed instruction to stderr
        #[arg(short, long)]
        trace: bool,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
        /// Abort after this many instructions
        #[arg(long)]
        max_steps: Option<u64>,
    },
    /// Decode a bit stream without running it
    Check {
        /// Bit stream file, stdin if omitted
        name: Option<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    use MsgColor::*;
    let args = Args::parse();
    botasm::env::init();

    miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().build())
    }))?;

    let Some(command) = args.command else {
        println!("\n~ botasm v{VERSION} ~");
        println!("{SHORT_INFO}");
        return Ok(());
    };

    match command {
        Command::Demo {
            annotate: annotated,
            notes,
            dest,
        } => {
            message(Green, "Assembling", "sample program");
            let (script, _) = botasm::demo::build()?;
            let program = script.link()?;
            message(Green, "Linked", &format!("{} instructions", program.len()));

            let out = if annotated {
                annotate(&program, notes)
            } else {
                encode_bits(&program)? + "\n"
            };
            match dest {
                Some(dest) => {
                    fs::write(&dest, out).into_diagnostic()?;
                    file_message(Green, "Saved", &dest);
                }
                None => print!("{out}"),
            }
            Ok(())
        }
        Command::Run {
            name,
            trace,
            minimal,
            max_steps,
        } => {
            Output::set_minimal(minimal);
            Output::set_tracing(trace || botasm::env::is_trace_enabled());

            let input = read_input(name.as_deref())?;
            let mut vm = Vm::from_bits(&input)?;
            vm.set_step_limit(
                max_steps
                    .or_else(botasm::env::max_steps)
                    .unwrap_or(DEFAULT_STEP_LIMIT),
            );

            if !minimal {
                message(Green, "Running", &format!("{} instructions", vm.program().len()));
            }
            // Memory is reported even when execution fails
            let result = vm.run();
            Output::Normal.print_memory(vm.memory());
            result?;

            if !minimal {
                message(Cyan, "Halted", &format!("after {} steps", vm.steps()));
            }
            Ok(())
        }
        Command::Check { name } => {
            let input = read_input(name.as_deref())?;
            let program = decode::parse_bits(&input)?;
            message(Green, "Success", &format!("{} instructions", program.len()));
            Ok(())
        }
    }
}

/// Read the whole bit stream from a file, or stdin when no file is given.
fn read_input(name: Option<&Path>) -> Result<String> {
    match name {
        Some(name) => {
            file_message(MsgColor::Green, "Reading", name);
            fs::read_to_string(name).into_diagnostic()
        }
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).into_diagnostic()?;
            Ok(input)
        }
    }
}

#[allow(unused)]
enum MsgColor {
    Green,
    Cyan,
    Red,
}

fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

// Status goes to stderr so stdout can be piped between commands
fn message(color: MsgColor, left: &str, right: &str) {
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
        MsgColor::Red => left.red(),
    };
    eprintln!("{left:>12} {right}");
}

const SHORT_INFO: &str = r"
Welcome to botasm, an assembler and virtual machine for the robot instruction set.
Please use `-h` or `--help` to access the usage instructions.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
