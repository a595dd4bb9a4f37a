//! Interactive read-eval-print loop.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;

use crate::{run_with_debug, JankyError, VmResult};

const HISTORY_FILE: &str = ".janky_history";

pub struct Repl {
    debug: bool,
    history: Vec<String>,
    history_file: PathBuf,
}

impl Repl {
    pub fn new(debug: bool) -> Self {
        let mut repl = Self {
            debug,
            history: Vec::new(),
            history_file: Self::history_path(),
        };
        repl.load_history();
        repl
    }

    fn history_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(HISTORY_FILE)
        } else {
            PathBuf::from(HISTORY_FILE)
        }
    }

    fn load_history(&mut self) {
        if let Ok(content) = std::fs::read_to_string(&self.history_file) {
            for line in content.lines() {
                if !line.trim().is_empty() {
                    self.history.push(line.to_string());
                }
            }
        }
    }

    fn save_history(&self) {
        let content = self.history.join("\n");
        let _ = std::fs::write(&self.history_file, content);
    }

    /// Run the loop until EOF. Every line gets its own pipeline; no state
    /// survives from one line to the next.
    pub fn run(&mut self) {
        println!("Janky - REPL");

        let stdin = io::stdin();

        loop {
            print!("janky-vm>  ");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) => {
                    println!();
                    break;
                }
                Ok(_) => {}
                Err(_) => break,
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.history.push(trimmed.to_string());

            let result = run_with_debug(&line, self.debug);
            report(&result);
        }

        self.save_history();
    }
}

/// Render a pipeline failure for the terminal. Success output was already
/// printed by the VM itself.
pub fn report(result: &Result<Option<String>, JankyError>) {
    if let Err(err) = result {
        eprintln!("{} {}", "Error:".red().bold(), err);
        match VmResult::of(result) {
            VmResult::CompileError => eprintln!("Compile time error."),
            VmResult::RuntimeError => eprintln!("Runtime error."),
            VmResult::InternalError => eprintln!("Internal error."),
            VmResult::Ok => {}
        }
    }
}
