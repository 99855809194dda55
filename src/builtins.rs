//! Host-provided native functions and global scope construction.

use crate::environment::{EnvRef, Environment};
use crate::value::{NativeFunction, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Root scope seeded with the constants `true`, `false`, `null` and each
/// supplied native under its own name. Every call builds an independent scope.
pub fn create_global_scope(builtins: impl IntoIterator<Item = NativeFunction>) -> EnvRef {
    let env = Environment::root();
    {
        let mut scope = env.borrow_mut();
        let constants = [
            ("true", Value::Boolean(true)),
            ("false", Value::Boolean(false)),
            ("null", Value::Null),
        ];
        for (name, value) in constants {
            if let Err(error) = scope.declare(name, value, true) {
                tracing::warn!(%error, "skipping built-in constant");
            }
        }

        for native in builtins {
            let name = native.name.clone();
            if let Err(error) = scope.declare(&name, Value::NativeFunction(native), true) {
                tracing::warn!(%error, "skipping native function");
            }
        }
    }
    env
}

/// `print` writing the space-separated arguments, then a newline, to `sink`.
pub fn print<W: Write + 'static>(sink: Rc<RefCell<W>>) -> NativeFunction {
    NativeFunction::new("print", move |args, _env| {
        let line = args
            .iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        if let Err(error) = writeln!(sink.borrow_mut(), "{}", line) {
            tracing::warn!(%error, "print could not write to its sink");
        }
        Value::Null
    })
}

/// The natives the command-line runner installs.
pub fn standard() -> Vec<NativeFunction> {
    vec![print(Rc::new(RefCell::new(io::stdout())))]
}
