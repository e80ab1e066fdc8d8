//! Command-line calculator.
//!
//! With arguments, evaluates them as one expression and prints the value.
//! Without arguments, reads statements from stdin line by line and prints
//! one value per line, reporting diagnostics without exiting.

use calc_example::CalcGrammar;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let grammar = CalcGrammar::new();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if !args.is_empty() {
        let source = args.join(" ");
        return match grammar.eval_expression(&source) {
            Ok(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        match grammar.eval_program(&line) {
            Ok(values) => {
                for value in values {
                    println!("{value}");
                }
            }
            Err(err) => eprintln!("error: {err}"),
        }
        let _ = stdout.flush();
    }
    ExitCode::SUCCESS
}
