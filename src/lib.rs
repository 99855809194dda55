// Scripto Language Library
//
// Front end and tree-walking evaluator for a small expression language:
// source text is lexed, parsed into an AST, and evaluated against an
// explicitly constructed global scope.

// Public modules
pub mod ast;
pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, Program, Property, Stmt};
pub use builtins::create_global_scope;
pub use environment::{EnvRef, Environment};
pub use error::{ErrorKind, LexError, ParseError, RuntimeError, ScriptoError, Span};
pub use evaluator::{Evaluator, Node};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;
pub use value::{NativeFunction, ObjectValue, Value};

// Re-export main functions
pub use repl::{start as start_repl, start_with as start_repl_with};
pub use runner::{run, run_with};

/// Lex and parse `source` into a program.
pub fn parse(source: &str) -> Result<Program, ScriptoError> {
    let tokens = Lexer::new(source).scan_tokens()?;
    Parser::new(tokens).parse()
}

/// Evaluate a program, statement or expression in `scope`.
pub fn evaluate<'a>(node: impl Into<Node<'a>>, scope: &EnvRef) -> Result<Value, ScriptoError> {
    Evaluator::new(std::rc::Rc::clone(scope)).evaluate(node)
}
