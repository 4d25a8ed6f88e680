use penney_coins::*;
use penney_core::Probability;
use penney_core::Rate;
use penney_core::SEQUENCES;
use penney_core::Utility;
use penney_game::Policy;
use rand::Rng;

/// Running reward estimate for every `(opponent, response)` pair.
///
/// Rows are states (opponent sequences), columns are actions (responses),
/// both in canonical order. Starts at zero and, with rewards of ±1 and
/// α ≤ 1, never leaves [-1, 1].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueTable([[Utility; SEQUENCES]; SEQUENCES]);

impl ValueTable {
    pub fn get(&self, state: Sequence, action: Sequence) -> Utility {
        self.0[state.index()][action.index()]
    }
    /// `value ← value + α·(reward − value)`
    pub fn update(&mut self, state: Sequence, action: Sequence, reward: Utility, alpha: Rate) {
        let ref mut value = self.0[state.index()][action.index()];
        *value += alpha * (reward - *value);
    }
    /// Highest-valued action, lowest index on ties.
    pub fn greedy(&self, state: Sequence) -> Sequence {
        let ref row = self.0[state.index()];
        let best = (1..SEQUENCES).fold(0, |best, i| if row[i] > row[best] { i } else { best });
        Sequence::all()[best]
    }
    /// ε-greedy: a uniformly random action with probability `epsilon`,
    /// otherwise [`ValueTable::greedy`].
    pub fn select<R>(&self, state: Sequence, epsilon: Probability, rng: &mut R) -> Sequence
    where
        R: Rng,
    {
        if rng.random::<Probability>() < epsilon {
            Sequence::sample(rng)
        } else {
            self.greedy(state)
        }
    }
    /// Greedy response for every opponent.
    pub fn policy(&self) -> Policy {
        Policy::from_fn(|state| self.greedy(state))
    }
}

impl serde::Serialize for ValueTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(Sequence::all().into_iter().map(|state| {
            let row = Sequence::all()
                .into_iter()
                .map(|action| (action.to_string(), self.get(state, action)))
                .collect::<std::collections::BTreeMap<_, _>>();
            (state.to_string(), row)
        }))
    }
}

impl std::fmt::Display for ValueTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = |l: &str, m: &str, r: &str| {
            format!("{}─────{}{}", l, m, vec!["────────"; SEQUENCES].join(m)) + r
        };
        writeln!(f, "{}", rule("┌", "┬", "┐"))?;
        write!(f, "│     │")?;
        for action in Sequence::all() {
            write!(f, " {:>6} │", action.to_string())?;
        }
        writeln!(f)?;
        writeln!(f, "{}", rule("├", "┼", "┤"))?;
        for state in Sequence::all() {
            write!(f, "│ {} │", state)?;
            for action in Sequence::all() {
                write!(f, " {:>+6.3} │", self.get(state, action))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", rule("└", "┴", "┘"))?;
        Ok(())
    }
}
