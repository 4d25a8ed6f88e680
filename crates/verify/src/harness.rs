use crate::*;
use penney_coins::*;
use penney_core::Probability;
use penney_core::TRIAL_CHUNK;
use penney_game::Policy;
use penney_game::WinRates;
use penney_game::Winner;
use penney_learning::Config;
use penney_learning::Trainer;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hash::Hash;

/// Entry point for every Monte Carlo check.
///
/// Holds nothing but an optional base seed. Unseeded harnesses draw a fresh
/// base per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Harness {
    seed: Option<u64>,
}

impl Harness {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Probability that `b` appears before `a`.
    pub fn estimate(
        &self,
        a: Sequence,
        b: Sequence,
        trials: usize,
        confidence: Probability,
    ) -> anyhow::Result<Estimate> {
        Estimate::z(confidence)?;
        if trials == 0 {
            anyhow::bail!("trials must be positive: {}", trials);
        }
        let wins = Self::wins(self.base(), (a, b), a, b, trials);
        let estimate = Estimate::new(wins, trials, confidence)?;
        log::debug!("{} vs {}: {}", a, b, estimate);
        Ok(estimate)
    }

    /// Train `runs` independent learners under the same config and compare
    /// their greedy policies opponent by opponent.
    pub fn consistency(&self, config: &Config, runs: usize) -> anyhow::Result<Consistency> {
        if runs == 0 {
            anyhow::bail!("runs must be positive: {}", runs);
        }
        let base = self.base();
        let train = |run: usize| {
            let seed = Self::derive(base, (config.seeded(), run));
            log::info!("consistency run {}/{}", run + 1, runs);
            Trainer::new(config.seed(seed))
                .solve()
                .map(|trainer| trainer.policy())
        };
        let policies = batch(runs, train)
            .into_iter()
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Consistency::from(policies))
    }

    /// Pit two policies against every opponent, `trials` games per arm.
    ///
    /// Both arms of a case replay the same coin streams, so identical
    /// responses tie exactly.
    pub fn tournament(&self, a: &Policy, b: &Policy, trials: usize) -> anyhow::Result<Tournament> {
        if trials == 0 {
            anyhow::bail!("trials must be positive: {}", trials);
        }
        let base = self.base();
        let cases = Sequence::all().map(|opponent| {
            let response_a = a.respond(opponent);
            let response_b = b.respond(opponent);
            Case {
                opponent,
                a: response_a,
                b: response_b,
                wins_a: Self::wins(base, opponent, opponent, response_a, trials),
                wins_b: Self::wins(base, opponent, opponent, response_b, trials),
            }
        });
        Ok(Tournament::new(cases, trials))
    }

    /// Measured win rate of a policy's response against each opponent.
    pub fn evaluate(&self, policy: &Policy, trials: usize) -> anyhow::Result<WinRates> {
        if trials == 0 {
            anyhow::bail!("trials must be positive: {}", trials);
        }
        let base = self.base();
        Ok(WinRates::from_fn(|opponent| {
            let wins = Self::wins(base, opponent, opponent, policy.respond(opponent), trials);
            wins as Probability / trials as Probability
        }))
    }

    fn base(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Deterministic seed for one independent stream.
    fn derive<K>(base: u64, key: K) -> u64
    where
        K: Hash,
    {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let ref mut hasher = DefaultHasher::new();
        base.hash(hasher);
        key.hash(hasher);
        hasher.finish()
    }

    /// Games won by `b` out of `trials`, split into seeded chunks.
    fn wins<K>(base: u64, case: K, a: Sequence, b: Sequence, trials: usize) -> usize
    where
        K: Hash + Copy + Send + Sync,
    {
        let chunk = |i: usize| {
            let ref mut rng = SmallRng::seed_from_u64(Self::derive(base, (case, i)));
            let n = TRIAL_CHUNK.min(trials - i * TRIAL_CHUNK);
            (0..n)
                .filter(|_| penney_game::simulate(a, b, rng) == Winner::B)
                .count()
        };
        batch(trials.div_ceil(TRIAL_CHUNK), chunk).into_iter().sum()
    }
}

/// `f(0), .., f(n - 1)` in order, on rayon's pool.
#[cfg(feature = "server")]
fn batch<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    use rayon::iter::IntoParallelIterator;
    use rayon::iter::ParallelIterator;
    (0..n).into_par_iter().map(f).collect()
}
/// `f(0), .., f(n - 1)` in order, on the calling thread.
#[cfg(not(feature = "server"))]
fn batch<T, F>(n: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use penney_core::CONFIDENCE_LEVEL;
    use penney_core::ESTIMATE_TRIALS;
    use penney_core::TOURNAMENT_TRIALS;
    use penney_game::Oracle;

    fn seq(s: &str) -> Sequence {
        Sequence::try_from(s).unwrap()
    }

    #[test]
    fn oracle_soundness() {
        let harness = Harness::seeded(0);
        for opponent in Sequence::all() {
            let response = Oracle::respond(opponent);
            let e = harness
                .estimate(opponent, response, ESTIMATE_TRIALS, CONFIDENCE_LEVEL)
                .unwrap();
            match opponent.pattern() {
                Pattern::Uniform => assert!((e.point() - 0.5).abs() < 0.01, "{}: {}", opponent, e),
                Pattern::Palindromic => assert!(e.point() > 0.5, "{}: {}", opponent, e),
                Pattern::Generic => assert!(e.point() > 0.6, "{}: {}", opponent, e),
            }
        }
        let e = harness
            .estimate(seq("HHT"), seq("THH"), ESTIMATE_TRIALS, CONFIDENCE_LEVEL)
            .unwrap();
        assert!(e.point() >= 0.70, "{}", e);
    }

    #[test]
    fn sides_sum_to_one() {
        let harness = Harness::seeded(1);
        for (a, b) in [("HHT", "THH"), ("HTH", "TTH"), ("HHH", "THT")] {
            let forward = harness.estimate(seq(a), seq(b), 50_000, 0.95).unwrap();
            let reverse = harness.estimate(seq(b), seq(a), 50_000, 0.95).unwrap();
            let sum = forward.point() + reverse.point();
            assert!((sum - 1.).abs() < 0.02, "{} vs {}: {}", a, b, sum);
        }
    }

    #[test]
    fn intervals_contain_exact_odds() {
        let harness = Harness::seeded(2);
        for a in Sequence::all() {
            for b in Sequence::all() {
                let e = harness.estimate(a, b, 20_000, 0.9999).unwrap();
                let exact = Oracle::odds(a, b);
                assert!(e.contains(exact), "{} vs {}: {} vs {:.4}", a, b, e, exact);
            }
        }
    }

    #[test]
    fn seeded_estimates_repeat() {
        let a = Harness::seeded(3).estimate(seq("HTT"), seq("HHT"), 10_000, 0.95);
        let b = Harness::seeded(3).estimate(seq("HTT"), seq("HHT"), 10_000, 0.95);
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn partial_chunks_count_exactly() {
        let e = Harness::seeded(4)
            .estimate(seq("HHH"), seq("HHH"), TRIAL_CHUNK + 3, 0.95)
            .unwrap();
        assert_eq!(e.trials(), TRIAL_CHUNK + 3);
        assert!(e.wins() <= TRIAL_CHUNK + 3);
    }

    #[test]
    fn rejects_invalid() {
        let harness = Harness::seeded(5);
        let (a, b) = (seq("HHT"), seq("THH"));
        assert!(harness.estimate(a, b, 0, 0.95).is_err());
        assert!(harness.estimate(a, b, 100, 1.).is_err());
        assert!(harness.estimate(a, b, 100, 0.).is_err());
        assert!(harness.consistency(&Config::default(), 0).is_err());
        let oracle = Oracle::policy();
        assert!(harness.tournament(&oracle, &oracle, 0).is_err());
        assert!(harness.evaluate(&oracle, 0).is_err());
    }

    #[test]
    fn oracle_ties_itself() {
        let oracle = Oracle::policy();
        let t = Harness::seeded(6).tournament(&oracle, &oracle, 10_000).unwrap();
        assert_eq!(t.trials(), 10_000);
        assert!(t.cases().iter().all(|case| case.verdict() == Verdict::Tie));
        assert_eq!(t.verdict(), Verdict::Tie);
        assert_eq!(t.aggregate_a(), t.aggregate_b());
    }

    #[test]
    fn oracle_against_conway() {
        let t = Harness::seeded(7)
            .tournament(&Oracle::policy(), &Policy::conway(), TOURNAMENT_TRIALS)
            .unwrap();
        for case in t.cases() {
            match case.opponent.pattern() {
                // identical responses
                Pattern::Generic => assert_eq!(case.verdict(), Verdict::Tie),
                // THH beats HHH 7 in 8, HHT beats HTH 2 in 3
                Pattern::Uniform | Pattern::Palindromic => {
                    assert_eq!(case.verdict(), Verdict::B, "{}", t)
                }
            }
        }
        assert_eq!(t.verdict(), Verdict::B);
    }

    #[test]
    fn evaluation_matches_reference() {
        let measured = Harness::seeded(8)
            .evaluate(&Oracle::policy(), TOURNAMENT_TRIALS)
            .unwrap();
        let reference = Oracle::reference();
        for (opponent, p) in measured.iter() {
            assert!((p - reference.get(opponent)).abs() < 0.01, "{}: {:.4}", opponent, p);
        }
    }

    #[test]
    fn low_noise_training_is_unanimous() {
        let config = Config::new(0.005, 0.1, 1 << 20).unwrap();
        let consistency = Harness::seeded(9).consistency(&config, 3).unwrap();
        assert_eq!(consistency.runs(), 3);
        assert_eq!(consistency.rate_for(Pattern::Generic), 1., "\n{}", consistency);
        for opponent in Pattern::Generic.members() {
            assert_eq!(consistency.consensus(opponent), Some(Oracle::respond(opponent)));
        }
    }

    /// Constant alpha = 0.1 leaves each value with noise comparable to the
    /// gap between the best and runner-up Generic responses, so runs often
    /// disagree. This records the rate rather than bounding it.
    #[test]
    #[ignore]
    fn default_training_consistency_is_measured() {
        let consistency = Harness::seeded(0)
            .consistency(&Config::default(), penney_core::CONSISTENCY_RUNS)
            .unwrap();
        println!("{}", consistency);
        let generic = Pattern::Generic
            .members()
            .filter(|s| consistency.consensus(*s).is_some())
            .count();
        assert_eq!(consistency.runs(), penney_core::CONSISTENCY_RUNS);
        assert_eq!(consistency.rate_for(Pattern::Generic), generic as f64 / 4.);
        assert!((0. ..=1.).contains(&consistency.rate()));
        for opponent in Sequence::all() {
            assert_eq!(consistency.responses(opponent).len(), consistency.runs());
        }
    }
}
