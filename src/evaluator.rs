use crate::ast::{BinaryOp, Expr, Program, Stmt};
use crate::environment::{EnvRef, Environment};
use crate::error::{RuntimeError, ScriptoError, Span};
use crate::value::{FunctionValue, ObjectValue, Value};
use std::rc::Rc;

/// Anything the evaluator accepts as an entry point.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Stmt),
    Expression(&'a Expr),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Node::Statement(stmt)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Node::Expression(expr)
    }
}

/// Tree-walking evaluator bound to one root scope.
///
/// Two evaluators only share state if they were given the same scope.
pub struct Evaluator {
    environment: EnvRef,
}

impl Evaluator {
    pub fn new(environment: EnvRef) -> Self {
        Self { environment }
    }

    pub fn evaluate<'a>(&self, node: impl Into<Node<'a>>) -> Result<Value, ScriptoError> {
        match node.into() {
            Node::Program(program) => self.evaluate_program(program),
            Node::Statement(stmt) => self.evaluate_statement(stmt),
            Node::Expression(expr) => self.evaluate_expression(expr),
        }
    }

    /// Runs every statement in the root scope and yields the last value,
    /// or `Null` for an empty program.
    pub fn evaluate_program(&self, program: &Program) -> Result<Value, ScriptoError> {
        let mut last = Value::Null;
        for (index, statement) in program.body.iter().enumerate() {
            tracing::debug!(index, span = ?statement.span(), "evaluating statement");
            last = self.evaluate_statement(statement)?;
        }
        Ok(last)
    }

    pub fn evaluate_statement(&self, stmt: &Stmt) -> Result<Value, ScriptoError> {
        execute_statement(stmt, &self.environment)
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<Value, ScriptoError> {
        evaluate_expression(expr, &self.environment)
    }
}

fn runtime(span: &Span) -> impl FnOnce(RuntimeError) -> ScriptoError + '_ {
    move |error| ScriptoError::runtime_error(span.clone(), error)
}

fn execute_statement(stmt: &Stmt, env: &EnvRef) -> Result<Value, ScriptoError> {
    match stmt {
        Stmt::VariableDeclaration {
            name,
            constant,
            initializer,
            span,
        } => {
            let value = match initializer {
                Some(expr) => evaluate_expression(expr, env)?,
                None => Value::Null,
            };
            env.borrow_mut()
                .declare(name, value, *constant)
                .map_err(runtime(span))
        }
        Stmt::Expression { expr, .. } => evaluate_expression(expr, env),
    }
}

fn evaluate_expression(expr: &Expr, env: &EnvRef) -> Result<Value, ScriptoError> {
    match expr {
        Expr::NumericLiteral { value, .. } => Ok(Value::Number(*value)),
        Expr::Identifier { name, span } => env.borrow().lookup(name).map_err(runtime(span)),
        Expr::Binary {
            left,
            operator,
            right,
            ..
        } => {
            let left_val = evaluate_expression(left, env)?;
            let right_val = evaluate_expression(right, env)?;
            Ok(evaluate_binary_op(*operator, &left_val, &right_val))
        }
        Expr::Assignment {
            target,
            value,
            span,
        } => {
            let Expr::Identifier { name, .. } = target.as_ref() else {
                return Err(ScriptoError::runtime_error(
                    span.clone(),
                    RuntimeError::InvalidAssignmentTarget(target.kind_name().to_string()),
                )
                .with_help("Only variables can be assigned to. Example: x = 10"));
            };
            let val = evaluate_expression(value, env)?;
            env.borrow_mut().assign(name, val).map_err(runtime(span))
        }
        Expr::ObjectLiteral { properties, .. } => {
            let mut object = ObjectValue::new();
            for property in properties {
                let value = match &property.value {
                    Some(expr) => evaluate_expression(expr, env)?,
                    None => env
                        .borrow()
                        .lookup(&property.key)
                        .map_err(runtime(&property.span))?,
                };
                object.insert(property.key.clone(), value);
            }
            Ok(Value::Object(Rc::new(object)))
        }
        Expr::Call {
            callee,
            arguments,
            span,
        } => {
            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(evaluate_expression(argument, env)?);
            }

            match evaluate_expression(callee, env)? {
                Value::NativeFunction(native) => {
                    // The callback's own result never reaches the script.
                    native.call(&args, env);
                    Ok(Value::Null)
                }
                Value::Function(function) => call_function(&function, args, span),
                other => Err(ScriptoError::runtime_error(
                    span.clone(),
                    RuntimeError::NotCallable(other.type_name().to_string()),
                )),
            }
        }
        Expr::Member {
            object,
            property,
            computed,
            span,
        } => {
            let target = match evaluate_expression(object, env)? {
                Value::Object(target) => target,
                other => {
                    return Err(ScriptoError::runtime_error(
                        span.clone(),
                        RuntimeError::NotAnObject(other.type_name().to_string()),
                    ))
                }
            };

            let key = match property.as_ref() {
                Expr::Identifier { name, .. } if !*computed => name.clone(),
                _ => evaluate_expression(property, env)?.to_string(),
            };

            Ok(target.get(&key).cloned().unwrap_or(Value::Null))
        }
    }
}

/// Binds arguments positionally in a fresh scope over the closure. Missing
/// arguments stay unbound and extra ones are dropped.
fn call_function(
    function: &FunctionValue,
    args: Vec<Value>,
    span: &Span,
) -> Result<Value, ScriptoError> {
    let scope = Environment::with_parent(&function.closure);
    tracing::trace!(
        parameters = function.parameters.len(),
        arguments = args.len(),
        "entering function scope"
    );

    for (parameter, arg) in function.parameters.iter().zip(args) {
        scope
            .borrow_mut()
            .declare(parameter, arg, false)
            .map_err(runtime(span))?;
    }

    let mut result = Value::Null;
    for statement in &function.body {
        result = execute_statement(statement, &scope)?;
    }
    Ok(result)
}

/// Arithmetic is defined only on two numbers; every other pairing is `Null`.
fn evaluate_binary_op(operator: BinaryOp, left: &Value, right: &Value) -> Value {
    let (Value::Number(l), Value::Number(r)) = (left, right) else {
        return Value::Null;
    };

    let result = match operator {
        BinaryOp::Add => l + r,
        BinaryOp::Subtract => l - r,
        BinaryOp::Multiply => l * r,
        BinaryOp::Divide => l / r,
        BinaryOp::Modulo => l % r,
        BinaryOp::Power => repeated_product(*l, *r),
    };
    Value::Number(result)
}

/// Multiplies `base` into itself once per step from 1 up to `exponent`.
/// An exponent of 1 or less, including 0, returns `base` unchanged.
fn repeated_product(base: f64, exponent: f64) -> f64 {
    let mut accumulator = base;
    let mut step = 1.0;
    while step < exponent {
        accumulator *= base;
        step += 1.0;
    }
    accumulator
}
