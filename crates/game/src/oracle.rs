//! Closed-form responses and exact odds.
//!
//! The oracle never simulates. Its responses serve as ground truth for the
//! learner, and [`Oracle::odds`] gives the exact probabilities the Monte Carlo
//! harness should converge to.
use crate::*;
use penney_coins::*;
use penney_core::LENGTH;
use penney_core::Probability;

/// Which closed-form rule produced a response.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize)]
pub enum Rule {
    /// Uniform `(X,X,X)` → `(flip X, flip X, flip X)`.
    Inversion,
    /// Palindromic `(X,Y,X)` → `(Y, Y, flip Y)`.
    Mirror,
    /// Generic `(A,B,C)` → `(flip B, A, B)`.
    Conway,
}

impl Rule {
    /// Apply this rule to an opponent sequence, regardless of its pattern.
    pub fn apply(&self, opponent: Sequence) -> Sequence {
        let [a, b, _] = opponent.coins();
        match self {
            Rule::Inversion => opponent.flip(),
            Rule::Mirror => Sequence::from([b, b, b.flip()]),
            Rule::Conway => Sequence::from([b.flip(), a, b]),
        }
    }
    /// The formula instantiated for one opponent, e.g. `(flip(H), H, H) = THH`.
    pub fn derivation(&self, opponent: Sequence) -> String {
        let [a, b, c] = opponent.coins();
        let response = self.apply(opponent);
        match self {
            Rule::Inversion => format!("(flip({a}), flip({b}), flip({c})) = {response}"),
            Rule::Mirror => format!("({b}, {b}, flip({b})) = {response}"),
            Rule::Conway => format!("(flip({b}), {a}, {b}) = {response}"),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Rule::Inversion => write!(f, "inversion"),
            Rule::Mirror => write!(f, "mirror"),
            Rule::Conway => write!(f, "conway"),
        }
    }
}

/// Deterministic optimal-response rule for the second player.
pub struct Oracle;

impl Oracle {
    /// Reference win rates of [`Oracle::respond`], in canonical order.
    /// A cross-check for measured rates, not a contract.
    const REFERENCE: [Probability; 8] = [
        0.5000, // HHH -> TTT
        0.7500, // HHT -> THH
        0.6250, // HTH -> TTH
        0.6667, // HTT -> HHT
        0.6667, // THH -> TTH
        0.6250, // THT -> HHT
        0.7500, // TTH -> HTT
        0.5000, // TTT -> HHH
    ];

    /// Rule selected by the opponent's pattern.
    pub fn rule(opponent: Sequence) -> Rule {
        match opponent.pattern() {
            Pattern::Uniform => Rule::Inversion,
            Pattern::Palindromic => Rule::Mirror,
            Pattern::Generic => Rule::Conway,
        }
    }
    /// Best response to `opponent`.
    pub fn respond(opponent: Sequence) -> Sequence {
        Self::rule(opponent).apply(opponent)
    }
    /// The oracle as a full policy.
    pub fn policy() -> Policy {
        Policy::from_fn(Self::respond)
    }
    /// Expected win rate of each oracle response.
    pub fn reference() -> WinRates {
        WinRates::from(Self::REFERENCE)
    }
    /// Exact probability that `b` appears before `a` in a fair coin stream.
    ///
    /// Conway's formula: the odds of `b` over `a` are `(AA − AB) : (BB − BA)`,
    /// where `XY` is the correlation of `X` against `Y`.
    pub fn odds(a: Sequence, b: Sequence) -> Probability {
        if a == b {
            return 0.5;
        }
        let wa = Self::correlation(a, a) - Self::correlation(a, b);
        let wb = Self::correlation(b, b) - Self::correlation(b, a);
        wa as Probability / (wa + wb) as Probability
    }
    /// Sum of `2^(k-1)` over every `k` for which the last `k` coins of `x`
    /// equal the first `k` coins of `y`.
    fn correlation(x: Sequence, y: Sequence) -> u32 {
        (1..=LENGTH)
            .filter(|&k| x.bits() & ((1 << k) - 1) == y.bits() >> (LENGTH - k))
            .map(|k| 1 << (k - 1))
            .sum()
    }
}

impl Policy {
    /// Conway's rule applied to every opponent, including the uniform and
    /// palindromic ones the oracle treats specially.
    pub fn conway() -> Self {
        Self::from_fn(|opponent| Rule::Conway.apply(opponent))
    }
}
