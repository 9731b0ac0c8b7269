use std::rc::Rc;
use crate::Error;
use super::{eval, Builtin, Env, Function, Name, Special, Step, Value};

pub const BUILTINS: &[Builtin] = &[
    Builtin { name: "~", func: combine },
    Builtin { name: "+", func: add },
    Builtin { name: "-", func: sub },
    Builtin { name: "*", func: mul },
    Builtin { name: ":", func: cons },
    Builtin { name: ",", func: append },
];

pub const SPECIALS: &[Special] = &[
    Special { name: "\\", func: then },
    Special { name: "|", func: otherwise },
    Special { name: "=", func: assign },
    Special { name: "->", func: lambda },
];

/// Bind every builtin operator in `env`.
pub fn install(env: &Env) {
    for builtin in BUILTINS {
        env.define(Name::new(builtin.name), Value::Builtin(*builtin));
    }
    for special in SPECIALS {
        env.define(Name::new(special.name), Value::Special(*special));
    }
}

fn arith(lhs: &Value, rhs: &Value, f: fn(i64, i64) -> Option<i64>) -> Result<Value, Error> {
    f(lhs.to_int()?, rhs.to_int()?)
        .map(Value::Int)
        .ok_or_else(Error::overflow)
}

fn add(lhs: Value, rhs: Value) -> Result<Value, Error> {
    arith(&lhs, &rhs, i64::checked_add)
}

fn sub(lhs: Value, rhs: Value) -> Result<Value, Error> {
    arith(&lhs, &rhs, i64::checked_sub)
}

fn mul(lhs: Value, rhs: Value) -> Result<Value, Error> {
    arith(&lhs, &rhs, i64::checked_mul)
}

fn combine(lhs: Value, rhs: Value) -> Result<Value, Error> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => a.checked_add(b).map(Value::Int).ok_or_else(Error::overflow),
        (Value::Array(mut a), Value::Array(b)) => {
            a.extend(b);
            Ok(Value::Array(a))
        },
        (lhs, rhs) => match (lhs.text(), rhs.text()) {
            (Some(a), Some(b)) => {
                let text = a + &b;
                if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) {
                    Ok(Value::String(text))
                } else {
                    Ok(Value::Symbol(Name::computed(text)))
                }
            },
            _ => Err(Error::cannot_combine(lhs, rhs)),
        },
    }
}

fn cons(lhs: Value, rhs: Value) -> Result<Value, Error> {
    Ok(Value::cons(lhs, rhs))
}

fn append(lhs: Value, rhs: Value) -> Result<Value, Error> {
    match lhs {
        Value::Array(mut items) => {
            items.push(rhs);
            Ok(Value::Array(items))
        },
        lhs => Ok(Value::Array(vec![lhs, rhs])),
    }
}

fn then(_: Value, rhs: &Value, env: &Env) -> Result<Step, Error> {
    Ok(Step::Eval(rhs.clone(), env.clone()))
}

fn otherwise(lhs: Value, rhs: &Value, env: &Env) -> Result<Step, Error> {
    match lhs {
        Value::Nil => Ok(Step::Eval(rhs.clone(), env.clone())),
        lhs => Ok(Step::Done(lhs)),
    }
}

fn assign(lhs: Value, rhs: &Value, env: &Env) -> Result<Step, Error> {
    let val = eval(rhs, env)?;
    destructure(env, &lhs, &val)?;
    Ok(Step::Done(val))
}

/// Bind `pattern` against `val` in the innermost frame of `env`. A cons
/// pattern matched against a non-cons binds each of its names to the whole
/// value; `Nil` leaves are skipped.
fn destructure(env: &Env, pattern: &Value, val: &Value) -> Result<(), Error> {
    match (pattern, val) {
        (Value::Cons(pat), Value::Cons(pair)) => {
            destructure(env, &pat.0, &pair.0)?;
            destructure(env, &pat.1, &pair.1)
        },
        (Value::Cons(pat), val) => {
            destructure(env, &pat.0, val)?;
            destructure(env, &pat.1, val)
        },
        (Value::Nil, _) => Ok(()),
        (pattern, val) => {
            let name = pattern.as_name().ok_or_else(|| Error::invalid_binding(pattern))?;
            env.define(name, val.clone());
            Ok(())
        },
    }
}

fn param(pattern: &Value) -> Result<Option<Name>, Error> {
    match pattern {
        Value::Nil => Ok(None),
        pattern => pattern
            .as_name()
            .map(Some)
            .ok_or_else(|| Error::invalid_binding(pattern)),
    }
}

fn lambda(lhs: Value, rhs: &Value, env: &Env) -> Result<Step, Error> {
    let (left, right) = match &lhs {
        Value::Cons(pair) => (param(&pair.0)?, param(&pair.1)?),
        lhs => (param(lhs)?, None),
    };
    Ok(Step::Done(Value::Function(Rc::new(Function {
        left,
        right,
        body: rhs.clone(),
        env: env.clone(),
    }))))
}
