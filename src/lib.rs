//! Janky: a small JS-flavored expression language.
//!
//! Source text flows through four stages, each running to completion before
//! the next begins:
//!
//! 1. **Lexer**: source text to a token stream
//! 2. **Parser**: tokens to an expression AST via a precedence ladder
//! 3. **Compiler**: single-pass AST-to-bytecode lowering with a constant pool
//! 4. **VM**: stack-based execution over tagged dynamic values
//!
//! Each `run` call owns an independent pipeline; nothing is shared between
//! invocations.

#![allow(clippy::module_inception)]
#![allow(clippy::result_large_err)]
#![allow(clippy::new_without_default)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod span;
pub mod vm;

pub use error::JankyError;

/// Classification of a pipeline run, mirroring the three-tier error taxonomy:
/// compile-time errors never start execution, runtime errors stop it, and
/// internal errors mark invariant violations that should never happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmResult {
    Ok,
    CompileError,
    RuntimeError,
    InternalError,
}

impl VmResult {
    pub fn of<T>(result: &Result<T, JankyError>) -> VmResult {
        match result {
            Ok(_) => VmResult::Ok,
            Err(e) if e.is_compile_time() => VmResult::CompileError,
            Err(JankyError::Runtime(_)) => VmResult::RuntimeError,
            Err(_) => VmResult::InternalError,
        }
    }
}

/// Tokenize source code without parsing.
pub fn tokenize(source: &str) -> Result<Vec<lexer::Token>, JankyError> {
    Ok(lexer::Scanner::new(source).scan_tokens()?)
}

/// Parse source code into an AST without executing.
pub fn parse(source: &str) -> Result<ast::Program, JankyError> {
    let tokens = lexer::Scanner::new(source).scan_tokens()?;
    let program = parser::Parser::new(tokens).parse()?;
    Ok(program)
}

/// Compile source code to bytecode without executing.
pub fn compile(source: &str) -> Result<vm::Bytecode, JankyError> {
    let program = parse(source)?;
    vm::Compiler::compile(&program)
}

/// Run a Janky program from source. Returns the rendered value of the last
/// expression, or `None` when the program leaves nothing on the stack.
pub fn run(source: &str) -> Result<Option<String>, JankyError> {
    run_with_debug(source, false)
}

/// Run a Janky program, optionally dumping the token stream, AST and
/// disassembled bytecode between stages.
pub fn run_with_debug(source: &str, debug: bool) -> Result<Option<String>, JankyError> {
    let tokens = lexer::Scanner::new(source).scan_tokens()?;

    if debug {
        println!("\nTOKENS:");
        for token in &tokens {
            println!("Token: {:?} | '{}'", token.kind, token.kind);
        }
        println!();
    }

    let program = parser::Parser::new(tokens).parse()?;

    if debug {
        println!("\nAST:");
        print!("{}", ast::dump_program(&program));
        println!();
    }

    let bytecode = vm::Compiler::compile(&program)?;

    if debug {
        println!("\nBYTECODE:");
        vm::print_disassembly(&bytecode);
        println!();
    }

    let mut machine = vm::Vm::new(bytecode);
    machine.run()?;
    Ok(machine.output.into_iter().last())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_returns_last_value() {
        assert_eq!(run("1 + 2;").unwrap(), Some("3.000000".to_string()));
        assert_eq!(run("").unwrap(), None);
    }

    #[test]
    fn test_compile_is_idempotent() {
        // No hidden global state: the same source compiles to identical
        // bytecode every time.
        let a = compile("1 + 2 * 3; \"x\" == 1;").unwrap();
        let b = compile("1 + 2 * 3; \"x\" == 1;").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_classification() {
        assert_eq!(VmResult::of(&run("1;")), VmResult::Ok);
        assert_eq!(VmResult::of(&run("\"abc")), VmResult::CompileError);
        assert_eq!(VmResult::of(&run("1 +")), VmResult::CompileError);
        assert_eq!(VmResult::of(&run("-true;")), VmResult::RuntimeError);
        assert_eq!(VmResult::of(&run("x;")), VmResult::InternalError);
    }
}
