use crate::builtins::{self, create_global_scope};
use crate::error::ScriptoError;
use crate::evaluator::Evaluator;
use crate::value::Value;

/// Parse and evaluate a whole source text in a fresh global scope.
/// Errors are reported to stderr and returned so the caller can pick an exit code.
pub fn run(source: &str, filename: Option<&str>, show_ast: bool) -> Result<Value, ScriptoError> {
    let evaluator = Evaluator::new(create_global_scope(builtins::standard()));
    run_with(&evaluator, source, filename, show_ast)
}

/// Like [`run`], but in the scope `evaluator` is bound to, so its bindings
/// stay visible to whatever runs there next.
pub fn run_with(
    evaluator: &Evaluator,
    source: &str,
    filename: Option<&str>,
    show_ast: bool,
) -> Result<Value, ScriptoError> {
    let program = crate::parse(source).inspect_err(|error| error.report(source, filename))?;

    if show_ast {
        println!("{:#?}", program);
    }

    evaluator
        .evaluate_program(&program)
        .inspect_err(|error| error.report(source, filename))
}
