mod error;
mod lex;
mod parse;
mod util;
mod walker;

use tracing::debug;

pub use self::{
    error::{Error, ErrorKind},
    parse::{Assoc, Precedence},
    util::{SrcLoc, SrcRegion},
    walker::{builtins, eval, quasiquote, Builtin, Env, Function, Name, Special, Step, Tree, Value},
};

/// Parses and evaluates programs against a fixed operator table and a set of
/// global bindings. Each execution runs in its own frame on top of the
/// globals, so bindings made by one program are not seen by the next.
pub struct Engine {
    precedence: Precedence,
    globals: Env,
}

impl Default for Engine {
    fn default() -> Self {
        let globals = Env::root();
        builtins::install(&globals);
        Self {
            precedence: Precedence::default(),
            globals,
        }
    }
}

impl Engine {
    pub fn with_global(self, name: &str, val: impl Into<Value>) -> Self {
        self.globals.define(Name::new(name), val.into());
        self
    }

    pub fn with_operator(mut self, op: &str, level: u32, assoc: Assoc) -> Self {
        self.precedence = self.precedence.with(op, level, assoc);
        self
    }

    pub fn with_builtin(self, builtin: Builtin) -> Self {
        self.with_global(builtin.name, Value::Builtin(builtin))
    }

    pub fn with_special(self, special: Special) -> Self {
        self.with_global(special.name, Value::Special(special))
    }

    pub fn parse(&self, code: &str) -> Result<Value, Error> {
        let ast = parse::parse(code, &self.precedence)?;
        debug!(?ast, "parsed");
        Ok(ast)
    }

    pub fn eval(&self, ast: &Value) -> Result<Value, Error> {
        let val = eval(ast, &self.globals.child())?;
        debug!(?val, "evaluated");
        Ok(val)
    }

    pub fn execute(&self, code: &str) -> Result<Value, Error> {
        let ast = self.parse(code)?;
        self.eval(&ast)
    }
}
