use rand::Rng;

/// Which side of a [`Game`](crate::Game) called the sequence that appeared first.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum Winner {
    A,
    B,
}

impl Winner {
    /// Unbiased coin flip between the two sides.
    pub fn toss<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        if rng.random::<bool>() { Self::B } else { Self::A }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
