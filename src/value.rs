use crate::ast::Stmt;
use crate::environment::EnvRef;
use std::fmt;
use std::rc::Rc;

/// Host callback behind a native function value.
pub type NativeCallback = dyn Fn(&[Value], &EnvRef) -> Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Boolean(bool),
    Object(Rc<ObjectValue>),
    NativeFunction(NativeFunction),
    Function(Rc<FunctionValue>),
}

impl Value {
    /// Builds a script function closing over `closure`. No syntax produces
    /// these; embedders construct them directly.
    pub fn function(parameters: Vec<String>, body: Vec<Stmt>, closure: EnvRef) -> Self {
        Value::Function(Rc::new(FunctionValue {
            parameters,
            body,
            closure,
        }))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Object(_) => "object",
            Value::NativeFunction(_) => "native function",
            Value::Function(_) => "function",
        }
    }
}

/// Property map that keeps insertion order. Re-inserting a key replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectValue {
    properties: Vec<(String, Value)>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: Value) {
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    callback: Rc<NativeCallback>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&[Value], &EnvRef) -> Value + 'static,
    {
        Self {
            name: name.into(),
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self, args: &[Value], env: &EnvRef) -> Value {
        (self.callback)(args, env)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// Natives are equal only when they share the same callback.
impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

pub struct FunctionValue {
    pub parameters: Vec<String>,
    pub body: Vec<Stmt>,
    pub closure: EnvRef,
}

// The closure scope may hold this very function, so it stays out of Debug.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Object(object) => {
                if object.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, (key, value)) in object.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, " }}")
            }
            Value::NativeFunction(native) => write!(f, "<native fn {}>", native.name),
            Value::Function(function) => write!(f, "<fn({})>", function.parameters.join(", ")),
        }
    }
}
