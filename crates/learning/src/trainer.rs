use crate::*;
use penney_coins::*;
use penney_core::REWARD_LOSS;
use penney_core::REWARD_WIN;
use penney_core::Utility;
use penney_game::Policy;
use penney_game::Winner;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Learns a response policy purely from simulated play.
///
/// Each episode draws a uniformly random opponent, picks a response
/// ε-greedily, plays the race with the opponent as side A and the response
/// as side B, and nudges the chosen cell toward the ±1 reward.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: Config,
    table: ValueTable,
    metrics: Metrics,
    rng: SmallRng,
}

impl Trainer {
    /// Fresh zeroed table. Unseeded configs draw a seed from the thread rng.
    pub fn new(config: Config) -> Self {
        let seed = config.seeded().unwrap_or_else(rand::random);
        log::debug!("trainer {} (stream {:#x})", config, seed);
        Self {
            config,
            table: ValueTable::default(),
            metrics: Metrics::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn table(&self) -> &ValueTable {
        &self.table
    }
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
    /// ε-greedy action for `state` from this trainer's own stream.
    pub fn select(&mut self, state: Sequence) -> Sequence {
        self.table.select(state, self.config.epsilon(), &mut self.rng)
    }
    pub fn update(&mut self, state: Sequence, action: Sequence, reward: Utility) {
        self.table.update(state, action, reward, self.config.alpha());
    }
    /// Greedy response per opponent, lowest index on ties.
    pub fn policy(&self) -> Policy {
        self.table.policy()
    }
    /// Play `episodes` more episodes.
    ///
    /// Stops early, at a window boundary, if a graceful interrupt has been
    /// requested.
    pub fn train(&mut self, episodes: usize) -> anyhow::Result<()> {
        if episodes == 0 {
            anyhow::bail!("episodes must be positive: {}", episodes);
        }
        for _ in 0..episodes {
            let state = Sequence::sample(&mut self.rng);
            let action = self.select(state);
            let won = penney_game::simulate(state, action, &mut self.rng) == Winner::B;
            let reward = if won { REWARD_WIN } else { REWARD_LOSS };
            self.update(state, action, reward);
            if let Some(rate) = self.metrics.record(won) {
                log::debug!(
                    "episode {:>9} window win% {:>6.2}",
                    self.metrics.episodes(),
                    rate * 100.
                );
                if let Some(stats) = self.metrics.checkpoint() {
                    log::info!("{}", stats);
                }
                if penney_core::interrupted() {
                    log::warn!("interrupted after {} episodes", self.metrics.episodes());
                    break;
                }
            }
        }
        Ok(())
    }
    /// Train for the configured number of episodes.
    pub fn solve(mut self) -> anyhow::Result<Self> {
        self.train(self.config.episodes())?;
        log::info!("{}", self.metrics.summary());
        Ok(self)
    }
}
