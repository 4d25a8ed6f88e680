use penney_coins::*;
use penney_core::Probability;
use penney_core::SEQUENCES;
use penney_game::Policy;

/// Greedy policies from independent training runs, compared per opponent.
#[derive(Debug, Clone, PartialEq)]
pub struct Consistency(Vec<Policy>);

impl Consistency {
    pub fn runs(&self) -> usize {
        self.0.len()
    }
    pub fn policies(&self) -> &[Policy] {
        &self.0
    }
    /// Each run's response to `opponent`, in run order.
    pub fn responses(&self, opponent: Sequence) -> Vec<Sequence> {
        self.0.iter().map(|p| p.respond(opponent)).collect()
    }
    /// The response every run agreed on, if any.
    pub fn consensus(&self, opponent: Sequence) -> Option<Sequence> {
        let first = self.0.first()?.respond(opponent);
        self.0
            .iter()
            .all(|p| p.respond(opponent) == first)
            .then_some(first)
    }
    pub fn unanimous(&self, opponent: Sequence) -> bool {
        self.consensus(opponent).is_some()
    }
    /// Fraction of all opponents with a unanimous response.
    pub fn rate(&self) -> Probability {
        Self::fraction(Sequence::all().into_iter().map(|s| self.unanimous(s)))
    }
    /// Fraction of one pattern class's opponents with a unanimous response.
    pub fn rate_for(&self, pattern: Pattern) -> Probability {
        Self::fraction(pattern.members().map(|s| self.unanimous(s)))
    }
    fn fraction(flags: impl Iterator<Item = bool>) -> Probability {
        let (agreed, total) = flags.fold((0, 0), |(a, t), f| (a + f as usize, t + 1));
        agreed as Probability / total.max(1) as Probability
    }
}

impl From<Vec<Policy>> for Consistency {
    fn from(policies: Vec<Policy>) -> Self {
        Self(policies)
    }
}

impl serde::Serialize for Consistency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let patterns = Pattern::all()
            .into_iter()
            .map(|p| (p.to_string(), self.rate_for(p)))
            .collect::<std::collections::BTreeMap<_, _>>();
        let mut state = serializer.serialize_struct("Consistency", 4)?;
        state.serialize_field("runs", &self.0)?;
        state.serialize_field("rate", &self.rate())?;
        state.serialize_field("patterns", &patterns)?;
        state.serialize_field(
            "unanimous",
            &Sequence::all().map(|s| self.unanimous(s)).to_vec(),
        )?;
        state.end()
    }
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let runs = self.runs();
        let rule = |l: &str, m: &str, r: &str| {
            format!("{l}──────────{m}{}─────────{r}", format!("──────{m}").repeat(runs))
        };
        writeln!(f, "{}", rule("┌", "┬", "┐"))?;
        write!(f, "│ Opponent │")?;
        for run in 0..runs {
            write!(f, " {:>4} │", format!("#{}", run + 1))?;
        }
        writeln!(f, " Agreed? │")?;
        writeln!(f, "{}", rule("├", "┼", "┤"))?;
        for opponent in Sequence::all() {
            write!(f, "│ {:>8} │", opponent.to_string())?;
            for response in self.responses(opponent) {
                write!(f, " {:>4} │", response.to_string())?;
            }
            let agreed = if self.unanimous(opponent) { "yes" } else { "no" };
            writeln!(f, " {:>7} │", agreed)?;
        }
        writeln!(f, "{}", rule("└", "┴", "┘"))?;
        for pattern in Pattern::all() {
            writeln!(f, "{:>12} {:>6.1}%", pattern.to_string(), self.rate_for(pattern) * 100.)?;
        }
        write!(f, "{:>12} {:>6.1}% of {}", "overall", self.rate() * 100., SEQUENCES)
    }
}
