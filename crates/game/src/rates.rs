use penney_coins::*;
use penney_core::Probability;
use penney_core::SEQUENCES;

/// Win probability of the responding player, one entry per opponent sequence.
///
/// Stored as probabilities in [0, 1]; [`WinRates::percent`] gives the
/// [0, 100] view used for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinRates([Probability; SEQUENCES]);

impl WinRates {
    /// Build a table by asking `f` for each opponent in canonical order.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(Sequence) -> Probability,
    {
        Self(Sequence::all().map(f))
    }
    pub fn get(&self, opponent: Sequence) -> Probability {
        self.0[opponent.index()]
    }
    pub fn percent(&self, opponent: Sequence) -> Probability {
        self.get(opponent) * 100.
    }
    /// Average over opponents drawn uniformly at random.
    pub fn mean(&self) -> Probability {
        self.0.iter().sum::<Probability>() / SEQUENCES as Probability
    }
    pub fn iter(&self) -> impl Iterator<Item = (Sequence, Probability)> + '_ {
        Sequence::all().into_iter().zip(self.0.iter().copied())
    }
}

impl From<[Probability; SEQUENCES]> for WinRates {
    fn from(rates: [Probability; SEQUENCES]) -> Self {
        debug_assert!(rates.iter().all(|p| (0. ..=1.).contains(p)));
        Self(rates)
    }
}

impl serde::Serialize for WinRates {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[rustfmt::skip]
impl std::fmt::Display for WinRates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "┌──────────┬─────────┐")?;
        writeln!(f, "│ Opponent │   Win % │")?;
        writeln!(f, "├──────────┼─────────┤")?;
        for (opponent, _) in self.iter() {
            writeln!(f, "│ {:>8} │ {:>7.2} │", opponent.to_string(), self.percent(opponent))?;
        }
        writeln!(f, "├──────────┼─────────┤")?;
        writeln!(f, "│     mean │ {:>7.2} │", self.mean() * 100.)?;
        writeln!(f, "└──────────┴─────────┘")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_view() {
        let rates = WinRates::from_fn(|s| s.index() as Probability / 8.);
        let tth = Sequence::try_from("TTH").unwrap();
        assert_eq!(rates.get(tth), 0.75);
        assert_eq!(rates.percent(tth), 75.);
        assert_eq!(rates.mean(), 28. / 64.);
    }
}
