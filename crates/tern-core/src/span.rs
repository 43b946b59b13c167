use serde::Serialize;

/// Byte range of a node in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub lo: u32,
    pub hi: u32,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

impl Span {
    pub fn new(lo: u32, hi: u32) -> Span {
        Span { lo, hi }
    }

    pub fn position(&self) -> u32 {
        self.lo
    }

    pub fn to(self, other: Span) -> Span {
        Span {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Joins two optional spans, keeping whichever side is known.
    pub fn join(lhs: Option<Span>, rhs: Option<Span>) -> Option<Span> {
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => Some(lhs.to(rhs)),
            (Some(span), None) | (None, Some(span)) => Some(span),
            (None, None) => None,
        }
    }
}
