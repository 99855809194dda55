use crate::builtins::{self, create_global_scope};
use crate::evaluator::Evaluator;
use std::io::{self, Write};

/// Line-at-a-time loop over one persistent global scope. A failing line is
/// reported and discarded; earlier bindings survive it.
pub fn start(show_ast: bool) {
    start_with(Evaluator::new(create_global_scope(builtins::standard())), show_ast);
}

/// Runs the loop over an existing evaluator, keeping whatever it has bound.
pub fn start_with(evaluator: Evaluator, show_ast: bool) {
    println!("Scripto Interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                run_repl_command(line, &evaluator, show_ast);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

fn run_repl_command(source: &str, evaluator: &Evaluator, show_ast: bool) {
    let program = match crate::parse(source) {
        Ok(program) => program,
        Err(error) => {
            error.report(source, None);
            return;
        }
    };

    if show_ast {
        println!("{:#?}", program);
    }

    match evaluator.evaluate_program(&program) {
        Ok(value) => println!("{}", value),
        Err(error) => error.report(source, None),
    }
}
