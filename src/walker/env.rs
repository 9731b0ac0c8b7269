use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::Rc,
};
use super::{Name, Value};

struct Frame {
    vars: RefCell<HashMap<Name, Value>>,
    parent: Option<Env>,
}

/// A chain of frames. Children never touch their parent's bindings; `define`
/// only writes to the innermost frame.
#[derive(Clone)]
pub struct Env(Rc<Frame>);

impl Env {
    pub fn root() -> Self {
        Self(Rc::new(Frame {
            vars: RefCell::new(HashMap::new()),
            parent: None,
        }))
    }

    pub fn child(&self) -> Self {
        Self(Rc::new(Frame {
            vars: RefCell::new(HashMap::new()),
            parent: Some(self.clone()),
        }))
    }

    /// Unbound names resolve to `Nil`.
    pub fn lookup(&self, name: &Name) -> Value {
        let mut env = self;
        loop {
            if let Some(val) = env.0.vars.borrow().get(name) {
                return val.clone();
            }
            match &env.0.parent {
                Some(parent) => env = parent,
                None => return Value::Nil,
            }
        }
    }

    pub fn define(&self, name: Name, val: Value) {
        self.0.vars.borrow_mut().insert(name, val);
    }

    pub fn is_bound_here(&self, name: &Name) -> bool {
        self.0.vars.borrow().contains_key(name)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut depth = 0;
        let mut env = self;
        while let Some(parent) = &env.0.parent {
            depth += 1;
            env = parent;
        }
        write!(f, "<env {} names, depth {}>", self.0.vars.borrow().len(), depth)
    }
}
