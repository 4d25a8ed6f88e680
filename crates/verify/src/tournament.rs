use penney_coins::*;
use penney_core::Probability;
use penney_core::SEQUENCES;
use penney_game::WinRates;

/// Outcome of a strict comparison between policy A and policy B.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize)]
pub enum Verdict {
    A,
    B,
    Tie,
}

impl Verdict {
    fn compare(a: usize, b: usize) -> Self {
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Self::A,
            std::cmp::Ordering::Less => Self::B,
            std::cmp::Ordering::Equal => Self::Tie,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// One opponent's head-to-head: each policy's response and its win count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Case {
    pub opponent: Sequence,
    pub a: Sequence,
    pub b: Sequence,
    pub wins_a: usize,
    pub wins_b: usize,
}

impl Case {
    pub fn verdict(&self) -> Verdict {
        Verdict::compare(self.wins_a, self.wins_b)
    }
}

/// Per-opponent and aggregate comparison of two policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    cases: [Case; SEQUENCES],
    trials: usize,
}

impl Tournament {
    pub fn new(cases: [Case; SEQUENCES], trials: usize) -> Self {
        debug_assert!(cases.iter().all(|c| c.wins_a <= trials && c.wins_b <= trials));
        Self { cases, trials }
    }
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }
    /// Games per policy per opponent.
    pub fn trials(&self) -> usize {
        self.trials
    }
    pub fn rates_a(&self) -> WinRates {
        WinRates::from_fn(|s| self.rate(self.cases[s.index()].wins_a))
    }
    pub fn rates_b(&self) -> WinRates {
        WinRates::from_fn(|s| self.rate(self.cases[s.index()].wins_b))
    }
    /// Win rate of policy A against a uniformly random opponent.
    pub fn aggregate_a(&self) -> Probability {
        self.rates_a().mean()
    }
    pub fn aggregate_b(&self) -> Probability {
        self.rates_b().mean()
    }
    /// Strict comparison of total wins across every case.
    pub fn verdict(&self) -> Verdict {
        Verdict::compare(
            self.cases.iter().map(|c| c.wins_a).sum(),
            self.cases.iter().map(|c| c.wins_b).sum(),
        )
    }
    fn rate(&self, wins: usize) -> Probability {
        wins as Probability / self.trials as Probability
    }
}

impl serde::Serialize for Tournament {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Tournament", 5)?;
        state.serialize_field("trials", &self.trials)?;
        state.serialize_field("cases", &self.cases.to_vec())?;
        state.serialize_field("aggregate_a", &self.aggregate_a())?;
        state.serialize_field("aggregate_b", &self.aggregate_b())?;
        state.serialize_field("verdict", &self.verdict())?;
        state.end()
    }
}

#[rustfmt::skip]
impl std::fmt::Display for Tournament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "┌──────────┬──────┬─────────┬──────┬─────────┬─────────┐")?;
        writeln!(f, "│ Opponent │    A │   A win │    B │   B win │ Verdict │")?;
        writeln!(f, "├──────────┼──────┼─────────┼──────┼─────────┼─────────┤")?;
        for case in self.cases.iter() {
            writeln!(f, "│ {:>8} │ {:>4} │ {:>6.2}% │ {:>4} │ {:>6.2}% │ {:>7} │",
                case.opponent.to_string(),
                case.a.to_string(),
                self.rate(case.wins_a) * 100.,
                case.b.to_string(),
                self.rate(case.wins_b) * 100.,
                case.verdict().to_string(),
            )?;
        }
        writeln!(f, "├──────────┼──────┼─────────┼──────┼─────────┼─────────┤")?;
        writeln!(f, "│     mean │      │ {:>6.2}% │      │ {:>6.2}% │ {:>7} │",
            self.aggregate_a() * 100.,
            self.aggregate_b() * 100.,
            self.verdict().to_string(),
        )?;
        writeln!(f, "└──────────┴──────┴─────────┴──────┴─────────┴─────────┘")?;
        write!(f, "{} trials per arm", self.trials())
    }
}
