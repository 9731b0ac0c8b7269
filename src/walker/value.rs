use std::{
    fmt,
    rc::Rc,
};
use crate::Error;
use super::{Env, Name};

/// What a special form asks the evaluator to do next.
pub enum Step {
    Done(Value),
    Eval(Value, Env),
}

/// An eager operator: both operands are evaluated before `func` runs.
#[derive(Copy, Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(Value, Value) -> Result<Value, Error>,
}

/// A lazy operator: the left operand arrives evaluated, the right one as
/// unevaluated syntax together with the environment it belongs to.
#[derive(Copy, Clone)]
pub struct Special {
    pub name: &'static str,
    pub func: fn(Value, &Value, &Env) -> Result<Step, Error>,
}

/// A user-defined operator.
pub struct Function {
    pub left: Option<Name>,
    pub right: Option<Name>,
    pub body: Value,
    pub env: Env,
}

/// `head` applied to `left` and `right`.
pub struct Tree {
    pub left: Value,
    pub head: Value,
    pub right: Value,
}

#[derive(Clone)]
pub enum Value {
    Nil,
    Symbol(Name),
    Int(i64),
    String(String),
    RawString(String),
    Comment(String),
    Var(Name),
    ParsedArray(Rc<[Value]>),
    Array(Vec<Value>),
    Cons(Rc<(Value, Value)>),
    Quote(Rc<Value>),
    Unquote(Rc<Value>),
    Block(Rc<Value>),
    Tree(Rc<Tree>),
    Builtin(Builtin),
    Special(Special),
    Function(Rc<Function>),
}

impl Value {
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(Name::new(name))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Value::Var(Name::new(name))
    }

    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Cons(Rc::new((car, cdr)))
    }

    pub fn tree(left: Value, head: Value, right: Value) -> Self {
        Value::Tree(Rc::new(Tree { left, head, right }))
    }

    pub fn quote(inner: Value) -> Self {
        Value::Quote(Rc::new(inner))
    }

    pub fn unquote(inner: Value) -> Self {
        Value::Unquote(Rc::new(inner))
    }

    pub fn block(inner: Value) -> Self {
        Value::Block(Rc::new(inner))
    }

    /// Symbols and strings double as names when bound or looked up.
    pub fn as_name(&self) -> Option<Name> {
        match self {
            Value::Symbol(name) => Some(name.clone()),
            Value::String(text) => Some(Name::computed(text.as_str())),
            _ => None,
        }
    }

    /// Integer coercion used by the arithmetic operators.
    pub fn to_int(&self) -> Result<i64, Error> {
        match self {
            Value::Nil => Ok(0),
            Value::Int(x) => Ok(*x),
            Value::String(text) if text.is_empty() => Ok(0),
            Value::Symbol(text) => self.parse_int(text),
            Value::String(text) => self.parse_int(text),
            _ => Err(Error::not_an_integer(self)),
        }
    }

    // A numeral that does not fit is an overflow, not a non-integer.
    fn parse_int(&self, text: &str) -> Result<i64, Error> {
        text.parse().map_err(|_| {
            let digits = text.strip_prefix('-').unwrap_or(text);
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                Error::overflow()
            } else {
                Error::not_an_integer(self)
            }
        })
    }

    /// Textual form used by `~` when concatenating.
    pub fn text(&self) -> Option<String> {
        match self {
            Value::Symbol(name) => Some(name.to_string()),
            Value::String(text) => Some(text.clone()),
            Value::Int(x) => Some(x.to_string()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::RawString(a), Value::RawString(b)) => a == b,
            (Value::Comment(a), Value::Comment(b)) => a == b,
            (Value::Var(a), Value::Var(b)) => a == b,
            (Value::ParsedArray(a), Value::ParsedArray(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Cons(a), Value::Cons(b)) => a == b,
            (Value::Quote(a), Value::Quote(b)) => a == b,
            (Value::Unquote(a), Value::Unquote(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => a == b,
            (Value::Tree(a), Value::Tree(b)) => a.left == b.left && a.head == b.head && a.right == b.right,
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Special(a), Value::Special(b)) => a.name == b.name,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn write_seq(f: &mut fmt::Formatter, items: &[Value], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{:?}", item)?;
    }
    Ok(())
}

// Integers carry a `#` so they stay distinguishable from numeral symbols.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "()"),
            Value::Symbol(name) => write!(f, "{}", name),
            Value::Int(x) => write!(f, "#{}", x),
            Value::String(text) => write!(f, "{:?}", text),
            Value::RawString(text) => write!(f, "'{}", text),
            Value::Comment(text) => write!(f, "#{:?}", text),
            Value::Var(name) => write!(f, "{{{}}}", name),
            Value::ParsedArray(items) => {
                write!(f, "[")?;
                write_seq(f, items, " ")?;
                write!(f, "]")
            },
            Value::Array(items) => {
                write!(f, "#[")?;
                write_seq(f, items, ", ")?;
                write!(f, "]")
            },
            Value::Cons(pair) => write!(f, "({:?} : {:?})", pair.0, pair.1),
            Value::Quote(inner) => write!(f, "[| {:?} |]", inner),
            Value::Unquote(inner) => write!(f, "(| {:?} |)", inner),
            Value::Block(inner) => write!(f, "<block {:?}>", inner),
            Value::Tree(tree) => write!(f, "({:?} {:?} {:?})", tree.left, tree.head, tree.right),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
            Value::Special(s) => write!(f, "<special {}>", s.name),
            Value::Function(func) => {
                let param = |p: &Option<Name>| p.as_ref().map(|n| n.to_string()).unwrap_or_else(|| "_".to_string());
                write!(f, "<function {} {}>", param(&func.left), param(&func.right))
            },
        }
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}
