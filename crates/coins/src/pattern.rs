use crate::*;

/// Structural class of a sequence, which decides the oracle's response rule.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum Pattern {
    /// All three coins equal: HHH, TTT.
    Uniform,
    /// First and third equal, middle differs: HTH, THT.
    Palindromic,
    /// Everything else: HHT, HTT, THH, TTH.
    Generic,
}

impl Pattern {
    pub const fn all() -> [Pattern; 3] {
        [Pattern::Uniform, Pattern::Palindromic, Pattern::Generic]
    }
    /// Sequences belonging to this class, in canonical order.
    pub fn members(&self) -> impl Iterator<Item = Sequence> + '_ {
        Sequence::all()
            .into_iter()
            .filter(move |s| s.pattern() == *self)
    }
}

impl From<Sequence> for Pattern {
    fn from(seq: Sequence) -> Self {
        match seq.coins() {
            [a, b, c] if a == b && b == c => Pattern::Uniform,
            [a, b, c] if a == c && a != b => Pattern::Palindromic,
            _ => Pattern::Generic,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Pattern::Uniform => write!(f, "uniform"),
            Pattern::Palindromic => write!(f, "palindromic"),
            Pattern::Generic => write!(f, "generic"),
        }
    }
}
