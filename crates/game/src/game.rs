use crate::*;
use penney_coins::*;
use penney_core::LENGTH;
use penney_core::MAX_FLIPS;
use rand::Rng;

/// A race between two called sequences over one stream of fair coins.
///
/// The random source is always passed in, so any number of games can be
/// played concurrently as long as each worker owns its own generator.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Game {
    a: Sequence,
    b: Sequence,
}

/// Result of a single [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Winner,
    /// Coins flipped before the race was decided (0 for a mirror match).
    pub flips: usize,
    /// Whether the race hit [`MAX_FLIPS`] and was settled by a coin toss.
    pub fallback: bool,
}

impl Game {
    pub fn new(a: Sequence, b: Sequence) -> Self {
        Self { a, b }
    }
    /// Flip coins until the last three spell `a` or `b`.
    ///
    /// Identical calls cannot be told apart, so a mirror match is decided by
    /// a single toss without flipping any coins. Otherwise the stream is cut
    /// off after [`MAX_FLIPS`] coins and the winner tossed for.
    pub fn play<R>(&self, rng: &mut R) -> Outcome
    where
        R: Rng,
    {
        if self.a == self.b {
            return Outcome {
                winner: Winner::toss(rng),
                flips: 0,
                fallback: false,
            };
        }
        let mut window = 0;
        for flips in 1..=MAX_FLIPS {
            window = Sequence::push(window, Coin::toss(rng));
            if flips < LENGTH {
                continue;
            }
            if window == self.a.bits() {
                return Outcome {
                    winner: Winner::A,
                    flips,
                    fallback: false,
                };
            }
            if window == self.b.bits() {
                return Outcome {
                    winner: Winner::B,
                    flips,
                    fallback: false,
                };
            }
        }
        log::warn!("{} vs {} undecided after {} flips", self.a, self.b, MAX_FLIPS);
        Outcome {
            winner: Winner::toss(rng),
            flips: MAX_FLIPS,
            fallback: true,
        }
    }
}

/// Decide which of `a` and `b` appears first in a fair coin stream.
pub fn simulate<R>(a: Sequence, b: Sequence, rng: &mut R) -> Winner
where
    R: Rng,
{
    Game::new(a, b).play(rng).winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn seq(s: &str) -> Sequence {
        Sequence::try_from(s).unwrap()
    }

    fn rate_b(a: Sequence, b: Sequence, n: usize, rng: &mut SmallRng) -> f64 {
        (0..n)
            .filter(|_| simulate(a, b, rng) == Winner::B)
            .count() as f64
            / n as f64
    }

    #[test]
    fn mirror_match_is_fair() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        for s in Sequence::all() {
            let outcome = Game::new(s, s).play(rng);
            assert_eq!(outcome.flips, 0);
            assert!(!outcome.fallback);
        }
        let p = rate_b(seq("HTH"), seq("HTH"), 20_000, rng);
        assert!((p - 0.5).abs() < 0.02, "mirror match B rate {:.4}", p);
    }

    #[test]
    fn decided_only_after_three_flips() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        for a in Sequence::all() {
            for b in Sequence::all().into_iter().filter(|b| *b != a) {
                let outcome = Game::new(a, b).play(rng);
                assert!(outcome.flips >= LENGTH);
                assert!(!outcome.fallback);
            }
        }
    }

    #[test]
    fn conway_pair() {
        // THH beats HHT three times in four
        let ref mut rng = SmallRng::seed_from_u64(3);
        let p = rate_b(seq("HHT"), seq("THH"), 20_000, rng);
        assert!((p - 0.75).abs() < 0.02, "THH vs HHT rate {:.4}", p);
    }

    #[test]
    fn sides_are_complementary() {
        let ref mut rng = SmallRng::seed_from_u64(4);
        for a in Sequence::all() {
            for b in Sequence::all().into_iter().filter(|b| *b != a) {
                let forward = rate_b(a, b, 4_000, rng);
                let reverse = rate_b(b, a, 4_000, rng);
                assert!(
                    (forward + (1. - reverse) - 2. * Oracle::odds(a, b)).abs() < 0.08,
                    "{} vs {}: {:.4} + {:.4}",
                    a,
                    b,
                    forward,
                    reverse
                );
            }
        }
    }

    #[test]
    fn fallback_never_fires() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        let fallbacks = (0..100_000)
            .map(|_| Game::new(Sequence::sample(rng), Sequence::sample(rng)).play(rng))
            .filter(|o| o.fallback)
            .count();
        assert_eq!(fallbacks, 0);
    }

    #[test]
    fn seeded_runs_repeat() {
        let play = |seed| {
            let ref mut rng = SmallRng::seed_from_u64(seed);
            (0..64)
                .map(|_| Game::new(seq("HTT"), seq("HHT")).play(rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(play(7), play(7));
    }
}
