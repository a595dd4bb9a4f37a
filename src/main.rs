//! Jank CLI: execute script files, evaluate one-liners, or run the REPL.

use std::fs;
use std::process;

use janky::{repl::Repl, run_with_debug, VmResult};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI command to execute.
enum Command {
    /// Run a script file
    Run { file: String },
    /// Evaluate a string
    Eval { code: String },
    /// Start the REPL
    Repl,
}

struct Options {
    command: Command,
    debug: bool,
}

fn print_usage() {
    eprintln!("Jank {} - Janky Interpreter", VERSION);
    eprintln!();
    eprintln!("Usage: jank [options] <script.js>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e <code>       Evaluate code and print the result");
    eprintln!("  --repl          Start the interactive REPL");
    eprintln!("  --debug         Dump tokens, AST and bytecode between stages");
    eprintln!("  --help, -h      Show this help message");
}

fn parse_args() -> Options {
    let mut args = std::env::args().skip(1);
    let mut debug = false;
    let mut repl_mode = false;
    let mut eval_code: Option<String> = None;
    let mut file: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--debug" => debug = true,
            "--repl" => repl_mode = true,
            "-e" => match args.next() {
                Some(code) => eval_code = Some(code),
                None => {
                    eprintln!("Error: -e requires an argument");
                    process::exit(1);
                }
            },
            _ if arg.starts_with('-') => {
                eprintln!("Unknown flag '{}'", arg);
                process::exit(1);
            }
            _ => file = Some(arg),
        }
    }

    let command = if repl_mode {
        Command::Repl
    } else if let Some(code) = eval_code {
        Command::Eval { code }
    } else if let Some(file) = file {
        Command::Run { file }
    } else {
        print_usage();
        process::exit(1);
    };

    Options { command, debug }
}

fn main() {
    let options = parse_args();

    match options.command {
        Command::Repl => Repl::new(options.debug).run(),
        Command::Run { file } => {
            let source = match fs::read_to_string(&file) {
                Ok(source) => source,
                Err(err) => {
                    eprintln!("Error opening source file '{}': {}", file, err);
                    process::exit(1);
                }
            };
            execute(&source, options.debug);
        }
        Command::Eval { code } => execute(&code, options.debug),
    }
}

fn execute(source: &str, debug: bool) {
    let result = run_with_debug(source, debug);
    janky::repl::report(&result);
    match VmResult::of(&result) {
        VmResult::Ok => {}
        // Internal errors are invariant violations, kept distinct from
        // ordinary failures in the exit status.
        VmResult::InternalError => process::exit(2),
        _ => process::exit(1),
    }
}
