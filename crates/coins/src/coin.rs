use penney_core::Arbitrary;
use rand::Rng;

/// Face of a fair coin.
///
/// The discriminant doubles as the bit used when packing a [`Sequence`]:
/// heads is 0, tails is 1.
///
/// [`Sequence`]: crate::Sequence
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum Coin {
    H = 0,
    T = 1,
}

impl Coin {
    /// Both faces in canonical order.
    pub const fn all() -> [Coin; 2] {
        [Coin::H, Coin::T]
    }
    /// The opposite face. An involution: `c.flip().flip() == c`.
    pub const fn flip(self) -> Coin {
        match self {
            Coin::H => Coin::T,
            Coin::T => Coin::H,
        }
    }
    /// Toss this coin with the given random source.
    pub fn toss<R>(rng: &mut R) -> Coin
    where
        R: Rng,
    {
        Coin::from(rng.random::<bool>())
    }
}

/// bool isomorphism (true = tails)
impl From<bool> for Coin {
    fn from(tails: bool) -> Self {
        if tails { Coin::T } else { Coin::H }
    }
}

/// u8 isomorphism
impl From<u8> for Coin {
    fn from(n: u8) -> Self {
        match n {
            0 => Coin::H,
            1 => Coin::T,
            _ => unreachable!("invalid coin bit"),
        }
    }
}
impl From<Coin> for u8 {
    fn from(c: Coin) -> u8 {
        c as u8
    }
}

/// char isomorphism
impl TryFrom<char> for Coin {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'H' => Ok(Coin::H),
            'T' => Ok(Coin::T),
            _ => Err(anyhow::anyhow!("invalid coin char: {:?}", c)),
        }
    }
}

/// str isomorphism, accepting both the letter and the long name
impl TryFrom<&str> for Coin {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "h" | "heads" => Ok(Coin::H),
            "t" | "tails" => Ok(Coin::T),
            _ => Err(anyhow::anyhow!("invalid coin str: {:?}", s)),
        }
    }
}

impl Arbitrary for Coin {
    fn random() -> Self {
        Coin::from(rand::random::<bool>())
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Coin::H => write!(f, "H"),
            Coin::T => write!(f, "T"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_involution() {
        for coin in Coin::all() {
            assert_ne!(coin, coin.flip());
            assert_eq!(coin, coin.flip().flip());
        }
    }

    #[test]
    fn bijective_u8() {
        for coin in Coin::all() {
            assert_eq!(coin, Coin::from(u8::from(coin)));
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!(Coin::try_from("heads").unwrap(), Coin::H);
        assert_eq!(Coin::try_from("T").unwrap(), Coin::T);
        assert_eq!(Coin::try_from('h').unwrap(), Coin::H);
        assert!(Coin::try_from("edge").is_err());
        assert!(Coin::try_from('x').is_err());
    }
}
