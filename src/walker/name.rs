use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    rc::Rc,
};
use internment::Intern;

/// A binding name.
///
/// Names written in the source are interned, so there are only as many of
/// them as the program text contains. Names produced while running (by `~`, or
/// a string used as a binder) are kept as plain shared text and freed with
/// their last use. Both kinds compare and hash by their text.
#[derive(Clone)]
pub enum Name {
    Interned(Intern<String>),
    Computed(Rc<str>),
}

impl Name {
    pub fn new(text: impl Into<String>) -> Self {
        Name::Interned(Intern::new(text.into()))
    }

    pub fn computed(text: impl Into<Rc<str>>) -> Self {
        Name::Computed(text.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Name::Interned(text) => text.as_str(),
            Name::Computed(text) => text,
        }
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Name::Interned(a), Name::Interned(b)) => a == b,
            (a, b) => a.as_str() == b.as_str(),
        }
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
