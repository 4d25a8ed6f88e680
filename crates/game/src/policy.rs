use penney_coins::*;
use penney_core::SEQUENCES;

/// A total response rule: for every opponent sequence, the sequence to call.
///
/// Need not be injective. Produced by the [`Oracle`](crate::Oracle) or read
/// off a trained value table, and consumed by tournaments and evaluations.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Policy([Sequence; SEQUENCES]);

impl Policy {
    /// Build a policy by asking `f` for each opponent in canonical order.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(Sequence) -> Sequence,
    {
        Self(Sequence::all().map(f))
    }
    /// Response to the given opponent sequence.
    pub fn respond(&self, opponent: Sequence) -> Sequence {
        self.0[opponent.index()]
    }
    /// `(opponent, response)` pairs in canonical opponent order.
    pub fn iter(&self) -> impl Iterator<Item = (Sequence, Sequence)> + '_ {
        Sequence::all().into_iter().zip(self.0.iter().copied())
    }
    /// Number of opponents for which both policies give the same response.
    pub fn agreement(&self, other: &Self) -> usize {
        self.0.iter().zip(other.0.iter()).filter(|(a, b)| a == b).count()
    }
}

impl From<[Sequence; SEQUENCES]> for Policy {
    fn from(responses: [Sequence; SEQUENCES]) -> Self {
        Self(responses)
    }
}

/// Parses `HHH:TTT,HHT:THH,...`. Every opponent must appear exactly once,
/// in any order.
impl TryFrom<&str> for Policy {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut responses = [None; SEQUENCES];
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (opponent, response) = entry
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("invalid policy entry: {:?}", entry))?;
            let opponent = Sequence::try_from(opponent)?;
            let response = Sequence::try_from(response)?;
            if responses[opponent.index()].replace(response).is_some() {
                anyhow::bail!("duplicate policy entry for {}", opponent);
            }
        }
        let missing = Sequence::all()
            .into_iter()
            .filter(|s| responses[s.index()].is_none())
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            anyhow::bail!("policy missing opponents: {}", missing.join(","));
        }
        Ok(Self::from_fn(|opponent| {
            responses[opponent.index()].unwrap_or_else(|| unreachable!("checked above"))
        }))
    }
}

impl std::str::FromStr for Policy {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl serde::Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let entries = self
            .iter()
            .map(|(opponent, response)| format!("{}:{}", opponent, response))
            .collect::<Vec<_>>();
        write!(f, "{}", entries.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "HHH:TTT,HHT:THH,HTH:TTH,HTT:HHT,THH:TTH,THT:TTH,TTH:HTT,TTT:HTT";

    #[test]
    fn bijective_str() {
        let policy = Policy::try_from(TABLE).unwrap();
        assert_eq!(policy.to_string(), TABLE);
        assert_eq!(policy, TABLE.parse::<Policy>().unwrap());
    }

    #[test]
    fn order_free_parse() {
        let shuffled = "TTT:HTT, HHH:TTT, THT:TTH, HHT:THH, HTH:TTH, TTH:HTT, HTT:HHT, THH:TTH";
        assert_eq!(
            Policy::try_from(shuffled).unwrap(),
            Policy::try_from(TABLE).unwrap()
        );
    }

    #[test]
    fn rejects_incomplete() {
        let err = Policy::try_from("HHH:TTT,HHT:THH").unwrap_err();
        assert!(err.to_string().contains("HTH"), "{}", err);
        assert!(Policy::try_from("HHH:TTT,HHH:THH").is_err());
        assert!(Policy::try_from("HHH-TTT").is_err());
        assert!(Policy::try_from(&*TABLE.replace("TTT:HTT", "TTT:HXT")).is_err());
    }

    #[test]
    fn agreement_counts() {
        let a = Policy::try_from(TABLE).unwrap();
        let b = Policy::from_fn(|s| s.flip());
        assert_eq!(a.agreement(&a), SEQUENCES);
        // only HHH -> TTT coincides with flipping every coin
        assert_eq!(a.agreement(&b), 1);
    }

    #[test]
    fn serializes_as_map() {
        let json = serde_json::to_value(Policy::try_from(TABLE).unwrap()).unwrap();
        assert_eq!(json["HHT"], "THH");
        assert_eq!(json.as_object().unwrap().len(), SEQUENCES);
    }
}
