use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SrcLoc(usize);

impl SrcLoc {
    pub fn start() -> Self {
        Self(0)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn offset(self) -> usize {
        self.0
    }

    /// Zero-based `(line, column)` of this location within `code`.
    pub fn in_context(&self, code: &str) -> (usize, usize) {
        let mut pos = self.0;
        for (i, line) in code.lines().enumerate() {
            let len = line.chars().count();
            if pos < len + 1 {
                return (i, pos);
            }
            pos -= len + 1;
        }
        (code.lines().count(), 0)
    }
}

impl fmt::Debug for SrcLoc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<usize> for SrcLoc {
    fn from(pos: usize) -> Self {
        Self(pos)
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum SrcRegion {
    None,
    Range(SrcLoc, SrcLoc),
}

impl SrcRegion {
    pub fn none() -> Self {
        SrcRegion::None
    }

    pub fn single(loc: SrcLoc) -> Self {
        SrcRegion::Range(loc, loc.next())
    }

    pub fn range(from: SrcLoc, until: SrcLoc) -> SrcRegion {
        if from.0 < until.0 {
            SrcRegion::Range(from, until)
        } else {
            SrcRegion::single(from)
        }
    }

    pub fn in_context(&self, code: &str) -> Option<((usize, usize), (usize, usize))> {
        match self {
            SrcRegion::Range(from, until) => Some((from.in_context(code), until.in_context(code))),
            SrcRegion::None => None,
        }
    }
}

impl fmt::Debug for SrcRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SrcRegion::None => write!(f, "<none>"),
            SrcRegion::Range(from, to) => write!(f, "{:?}:{:?}", from, to),
        }
    }
}

impl From<usize> for SrcRegion {
    fn from(pos: usize) -> Self {
        SrcRegion::single(SrcLoc::from(pos))
    }
}

impl From<(usize, usize)> for SrcRegion {
    fn from((from, to): (usize, usize)) -> Self {
        SrcRegion::range(SrcLoc::from(from), SrcLoc::from(to))
    }
}
