use std::fmt;
use crate::util::SrcRegion;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("mismatched brackets: expected `{expected}`, found `{found}`")]
    BracketMismatch { expected: String, found: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected a name at the head of `{{...}}`, found {0}")]
    InvalidBinder(String),
    #[error("cannot bind to {0}")]
    InvalidBinding(String),
    #[error("{0} is not an operator")]
    UnsupportedOperator(String),
    #[error("{0} is not an integer")]
    NotAnInteger(String),
    #[error("cannot combine {0} with {1}")]
    CannotCombine(String, String),
    #[error("integer overflow")]
    Overflow,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    region: SrcRegion,
}

impl Error {
    pub fn bracket_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::from(ErrorKind::BracketMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }

    pub fn unterminated_string() -> Self {
        Self::from(ErrorKind::UnterminatedString)
    }

    pub fn invalid_binder(found: impl fmt::Debug) -> Self {
        Self::from(ErrorKind::InvalidBinder(format!("{:?}", found)))
    }

    pub fn invalid_binding(pattern: impl fmt::Debug) -> Self {
        Self::from(ErrorKind::InvalidBinding(format!("{:?}", pattern)))
    }

    pub fn unsupported_operator(head: impl fmt::Debug) -> Self {
        Self::from(ErrorKind::UnsupportedOperator(format!("{:?}", head)))
    }

    pub fn not_an_integer(val: impl fmt::Debug) -> Self {
        Self::from(ErrorKind::NotAnInteger(format!("{:?}", val)))
    }

    pub fn cannot_combine(lhs: impl fmt::Debug, rhs: impl fmt::Debug) -> Self {
        Self::from(ErrorKind::CannotCombine(format!("{:?}", lhs), format!("{:?}", rhs)))
    }

    pub fn overflow() -> Self {
        Self::from(ErrorKind::Overflow)
    }

    pub fn at(mut self, region: impl Into<SrcRegion>) -> Self {
        self.region = region.into();
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn region(&self) -> SrcRegion {
        self.region
    }

    /// Render the error against the code it came from, prefixing the position when known.
    pub fn in_context(&self, code: &str) -> String {
        match self.region.in_context(code) {
            Some(((line, col), _)) => format!("{}:{}: {}", line + 1, col + 1, self.kind),
            None => self.kind.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.region {
            SrcRegion::None => write!(f, "{}", self.kind),
            region => write!(f, "{} at {:?}", self.kind, region),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            region: SrcRegion::none(),
        }
    }
}
