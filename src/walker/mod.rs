pub mod builtins;
mod env;
mod name;
mod value;

use std::rc::Rc;
use tracing::trace;
use crate::Error;

pub use self::{
    env::Env,
    name::Name,
    value::{Builtin, Function, Special, Step, Tree, Value},
};

/// Evaluate `ast` in `env`.
///
/// Operator application runs as a loop over the current `(ast, env)` pair:
/// special forms and user functions hand back their continuation instead of
/// recursing, so tail calls run in constant native stack. Right operands and
/// heads are evaluated by nested calls, which return before the continuation
/// runs. Left operands are walked iteratively by `apply`.
pub fn eval(ast: &Value, env: &Env) -> Result<Value, Error> {
    let mut ast = ast.clone();
    let mut env = env.clone();

    loop {
        let (next, next_env) = match &ast {
            Value::Tree(tree) => match apply(tree, &env)? {
                Step::Done(val) => return Ok(val),
                Step::Eval(next, next_env) => (next, next_env),
            },
            Value::Var(name) => return Ok(env.lookup(name)),
            Value::Unquote(inner) => ((**inner).clone(), env.clone()),
            Value::Quote(inner) => return Ok(Value::Block(Rc::new(quasiquote(inner, &env)?))),
            Value::ParsedArray(items) => return items
                .iter()
                .map(|item| eval(item, &env))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => return Ok(ast.clone()),
        };

        ast = next;
        env = next_env;
    }
}

/// Apply `tree` in `env`.
///
/// Left-associative chains such as `1 , 2 , 3` nest down `left`, so the spine
/// is collected first and folded from the innermost tree outwards. Only the
/// outermost application may hand back a continuation; inner ones are run to
/// completion before their parent uses the result.
fn apply(tree: &Rc<Tree>, env: &Env) -> Result<Step, Error> {
    let mut spine = Vec::new();
    let mut inner = Rc::clone(tree);
    while let Value::Tree(left) = &inner.left {
        let left = Rc::clone(left);
        spine.push(inner);
        inner = left;
    }

    let mut lhs = eval(&inner.left, env)?;
    loop {
        let step = dispatch(lhs, &inner, env)?;
        inner = match spine.pop() {
            Some(parent) => parent,
            None => return Ok(step),
        };
        lhs = match step {
            Step::Done(val) => val,
            Step::Eval(next, next_env) => eval(&next, &next_env)?,
        };
    }
}

/// Resolve the head of `tree` and apply it to the evaluated left operand.
#[inline(never)]
fn dispatch(lhs: Value, tree: &Tree, env: &Env) -> Result<Step, Error> {
    let head = eval(&tree.head, env)?;
    let head = match head.as_name() {
        Some(name) => env.lookup(&name),
        None => head,
    };

    match head {
        Value::Special(special) => {
            trace!(special = special.name, "dispatching special form");
            (special.func)(lhs, &tree.right, env)
        },
        head => {
            let rhs = eval(&tree.right, env)?;
            match head {
                Value::Nil => Ok(Step::Done(lhs)),
                Value::Builtin(builtin) => (builtin.func)(lhs, rhs).map(Step::Done),
                Value::Function(func) => {
                    trace!(left = ?func.left, right = ?func.right, "applying function");
                    let frame = func.env.child();
                    if let Some(name) = &func.left {
                        frame.define(name.clone(), lhs);
                    }
                    if let Some(name) = &func.right {
                        frame.define(name.clone(), rhs);
                    }
                    Ok(Step::Eval(func.body.clone(), frame))
                },
                head => Err(Error::unsupported_operator(head)),
            }
        },
    }
}

/// Copy `ast`, replacing every unquote with the value of its contents in `env`.
pub fn quasiquote(ast: &Value, env: &Env) -> Result<Value, Error> {
    Ok(match ast {
        Value::Unquote(inner) => eval(inner, env)?,
        Value::Tree(tree) => Value::tree(
            quasiquote(&tree.left, env)?,
            quasiquote(&tree.head, env)?,
            quasiquote(&tree.right, env)?,
        ),
        Value::Cons(pair) => Value::cons(quasiquote(&pair.0, env)?, quasiquote(&pair.1, env)?),
        Value::ParsedArray(items) => Value::ParsedArray(items
            .iter()
            .map(|item| quasiquote(item, env))
            .collect::<Result<_, _>>()?),
        Value::Array(items) => Value::Array(items
            .iter()
            .map(|item| quasiquote(item, env))
            .collect::<Result<_, _>>()?),
        other => other.clone(),
    })
}
