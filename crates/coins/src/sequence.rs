use crate::*;
use penney_core::Arbitrary;
use penney_core::LENGTH;
use penney_core::SEQUENCES;
use rand::Rng;

/// One of the 8 length-3 coin sequences a player can call.
///
/// Packed into the low three bits of a `u8`, first coin most significant,
/// heads = 0. The packing makes the canonical order fall out of the integer
/// order:
///
/// | index | 0   | 1   | 2   | 3   | 4   | 5   | 6   | 7   |
/// |-------|-----|-----|-----|-----|-----|-----|-----|-----|
/// | seq   | HHH | HHT | HTH | HTT | THH | THT | TTH | TTT |
///
/// It also lets the simulator compare a rolling 3-bit window against a
/// sequence with a single integer comparison.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sequence(u8);

impl Sequence {
    const MASK: u8 = (1 << LENGTH) - 1;

    /// All 8 sequences in canonical order.
    pub const fn all() -> [Sequence; SEQUENCES] {
        [
            Self(0b000),
            Self(0b001),
            Self(0b010),
            Self(0b011),
            Self(0b100),
            Self(0b101),
            Self(0b110),
            Self(0b111),
        ]
    }
    /// Position in canonical order, in `0..8`.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
    /// Packed 3-bit representation.
    pub const fn bits(&self) -> u8 {
        self.0
    }
    /// Slide one coin into a packed window, dropping the oldest.
    pub const fn push(window: u8, coin: Coin) -> u8 {
        ((window << 1) | coin as u8) & Self::MASK
    }
    /// The three coins, first to last.
    pub fn coins(&self) -> [Coin; LENGTH] {
        [
            Coin::from((self.0 >> 2) & 1),
            Coin::from((self.0 >> 1) & 1),
            Coin::from((self.0 >> 0) & 1),
        ]
    }
    /// Pattern class of this sequence.
    pub fn pattern(&self) -> Pattern {
        Pattern::from(*self)
    }
    /// Complement every coin.
    pub const fn flip(&self) -> Self {
        Self(!self.0 & Self::MASK)
    }
    /// Uniformly random sequence from the given random source.
    pub fn sample<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        Self(rng.random_range(0..SEQUENCES as u8))
    }
}

impl From<[Coin; LENGTH]> for Sequence {
    fn from([a, b, c]: [Coin; LENGTH]) -> Self {
        Self((u8::from(a) << 2) | (u8::from(b) << 1) | u8::from(c))
    }
}
impl From<Sequence> for [Coin; LENGTH] {
    fn from(seq: Sequence) -> Self {
        seq.coins()
    }
}

/// index isomorphism
impl TryFrom<usize> for Sequence {
    type Error = anyhow::Error;
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::all()
            .get(index)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("sequence index out of range: {}", index))
    }
}

/// str isomorphism. Accepts `HHT` (any case) or `heads-heads-tails`.
impl TryFrom<&str> for Sequence {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let trimmed = s.trim();
        let coins = if trimmed.contains('-') {
            trimmed
                .split('-')
                .map(Coin::try_from)
                .collect::<Result<Vec<Coin>, _>>()
        } else {
            trimmed
                .chars()
                .map(Coin::try_from)
                .collect::<Result<Vec<Coin>, _>>()
        }
        .map_err(|_| anyhow::anyhow!("invalid sequence str: {:?}", s))?;
        <[Coin; LENGTH]>::try_from(coins)
            .map(Self::from)
            .map_err(|_| anyhow::anyhow!("invalid sequence length: {:?}", s))
    }
}

impl std::str::FromStr for Sequence {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Arbitrary for Sequence {
    fn random() -> Self {
        Self(rand::random_range(0..SEQUENCES as u8))
    }
}

impl serde::Serialize for Sequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [a, b, c] = self.coins();
        write!(f, "{}{}{}", a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order() {
        let names = Sequence::all().map(|s| s.to_string());
        assert_eq!(
            names,
            ["HHH", "HHT", "HTH", "HTT", "THH", "THT", "TTH", "TTT"]
        );
        for (i, seq) in Sequence::all().into_iter().enumerate() {
            assert_eq!(seq.index(), i);
        }
    }

    #[test]
    fn bijective_str() {
        for seq in Sequence::all() {
            assert_eq!(seq, Sequence::try_from(seq.to_string().as_str()).unwrap());
        }
    }

    #[test]
    fn bijective_coins() {
        for seq in Sequence::all() {
            assert_eq!(seq, Sequence::from(seq.coins()));
        }
    }

    #[test]
    fn parse_forms() {
        let hht = Sequence::from([Coin::H, Coin::H, Coin::T]);
        assert_eq!(Sequence::try_from("hht").unwrap(), hht);
        assert_eq!(Sequence::try_from(" HHT ").unwrap(), hht);
        assert_eq!(Sequence::try_from("heads-heads-tails").unwrap(), hht);
        assert_eq!("HHT".parse::<Sequence>().unwrap(), hht);
    }

    #[test]
    fn parse_rejects() {
        for bad in ["", "HH", "HHHH", "HXT", "heads-tails", "heads-heads-edge"] {
            let err = Sequence::try_from(bad).unwrap_err();
            assert!(err.to_string().contains(&format!("{:?}", bad)), "{}", err);
        }
        assert!(Sequence::try_from(8usize).is_err());
        assert_eq!(Sequence::try_from(7usize).unwrap().to_string(), "TTT");
    }

    #[test]
    fn flip_involution() {
        for seq in Sequence::all() {
            assert_eq!(seq, seq.flip().flip());
            for (a, b) in seq.coins().into_iter().zip(seq.flip().coins()) {
                assert_eq!(a.flip(), b);
            }
        }
    }

    #[test]
    fn window_push() {
        let mut window = 0;
        for coin in [Coin::T, Coin::H, Coin::H, Coin::T] {
            window = Sequence::push(window, coin);
        }
        assert_eq!(window, Sequence::try_from("HHT").unwrap().bits());
    }

    #[test]
    fn serializes_as_text() {
        let json = serde_json::to_string(&Sequence::try_from("THH").unwrap()).unwrap();
        assert_eq!(json, "\"THH\"");
    }
}
