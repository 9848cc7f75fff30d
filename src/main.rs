//! hackasm CLI - assembles a Hack `.asm` file into a `.hack` file.
//!
//! Usage:
//!     hackasm Max.asm
//!     hackasm Max.asm out/Max.hack --strict -v

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser as ClapParser;
use hackasm::symbols::{SymbolTable, VARIABLE_BASE};
use hackasm::{
    AsmError, AssemblerOptions, DuplicatePolicy, assemble_file, output_path, write_output,
};

#[derive(ClapParser, Debug)]
#[command(name = "hackasm")]
#[command(version)]
#[command(author = "nand2tetris")]
#[command(about = "Two-pass assembler for the Hack computer")]
struct Args {
    /// Input assembly file (.asm)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to INPUT with a .hack extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Treat a redeclared label as an error
    #[arg(long)]
    strict: bool,

    /// Print labels and variables after assembly
    #[arg(long)]
    symbols: bool,
}

fn print_symbols(table: &SymbolTable) {
    for (name, address, kind) in table.user_symbols() {
        eprintln!("  {:<8} {:>5}  {}", format!("{kind:?}"), address, name);
    }
}

fn run(args: &Args, output: &Path) -> hackasm::Result<()> {
    let start = Instant::now();
    let options = AssemblerOptions {
        duplicates: if args.strict {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::FirstWins
        },
    };

    if args.verbose {
        eprintln!("Assembling: {}", args.input.display());
    }

    let assembly = assemble_file(&args.input, options)?;
    write_output(output, &assembly.to_hack())?;

    if args.verbose {
        let variables = assembly.symbols.next_variable_address() - VARIABLE_BASE;
        let labels = assembly.symbols.user_symbols().len() - variables as usize;
        eprintln!(
            "  ✓ {} instructions, {} labels, {} variables in {:.2}ms",
            assembly.words.len(),
            labels,
            variables,
            start.elapsed().as_secs_f64() * 1000.0
        );
        eprintln!("  Output: {}", output.display());
    } else {
        println!("{} -> {}", args.input.display(), output.display());
    }

    if args.symbols {
        print_symbols(&assembly.symbols);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !args.input.is_file() {
        eprintln!("Error: Input not found: {}", args.input.display());
        return ExitCode::from(2);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.input));

    match run(&args, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ AsmError::InvalidPath { .. }) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
