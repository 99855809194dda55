use clap::{Arg, Command};
use scripto::builtins::{self, create_global_scope};
use scripto::Evaluator;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Diagnostics go to stderr; RUST_LOG overrides the default level
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let matches = Command::new("scripto")
        .about("Evaluator for the Scripto expression language")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start the REPL, after running FILE or SOURCE if given")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .value_name("SOURCE")
                .help("Evaluate SOURCE and print its value")
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parsed AST before evaluating")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let show_ast = matches.get_flag("ast");
    let interactive = matches.get_flag("interactive");
    let evaluator = Evaluator::new(create_global_scope(builtins::standard()));

    let status = if let Some(source) = matches.get_one::<String>("eval") {
        match scripto::run_with(&evaluator, source, Some("<eval>"), show_ast) {
            Ok(value) => {
                println!("{}", value);
                ExitCode::SUCCESS
            }
            Err(_) => ExitCode::FAILURE,
        }
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(&evaluator, file_path, show_ast)
    } else {
        scripto::start_repl_with(evaluator, show_ast);
        return ExitCode::SUCCESS;
    };

    // -i keeps the scope the script or snippet left behind
    if interactive {
        scripto::start_repl_with(evaluator, show_ast);
    }
    status
}

fn run_file(evaluator: &Evaluator, path: &str, show_ast: bool) -> ExitCode {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::FAILURE;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let filename = path.display().to_string();
            tracing::debug!(file = %filename, bytes = source.len(), "running script");
            match scripto::run_with(evaluator, &source, Some(&filename), show_ast) {
                Ok(_) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            }
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}
