use crate::Progress;
use penney_core::Probability;
use penney_core::TRAINING_LOG_INTERVAL;
use penney_core::TRAINING_WINDOW;
use std::time::Duration;
use std::time::Instant;

/// Accumulated counters for one [`Trainer`](crate::Trainer).
///
/// Owned by its trainer and never shared. Besides the cumulative totals it
/// keeps the win rate of every completed window of [`TRAINING_WINDOW`]
/// episodes, and owns timing for periodic checkpoint logging.
#[derive(Debug, Clone)]
pub struct Metrics {
    episodes: usize,
    wins: usize,
    window: usize,
    history: Vec<Probability>,
    start: Instant,
    prior: (Instant, usize),
}

impl Default for Metrics {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            episodes: 0,
            wins: 0,
            window: 0,
            history: Vec::new(),
            start: now,
            prior: (now, 0),
        }
    }
}

impl Metrics {
    /// Count one episode. Returns the window's win rate when this episode
    /// completes a window.
    pub fn record(&mut self, won: bool) -> Option<Probability> {
        self.episodes += 1;
        if won {
            self.wins += 1;
            self.window += 1;
        }
        if self.episodes % TRAINING_WINDOW == 0 {
            let rate = self.window as Probability / TRAINING_WINDOW as Probability;
            self.history.push(rate);
            self.window = 0;
            Some(rate)
        } else {
            None
        }
    }
    /// Win rate of each completed window, oldest first.
    pub fn history(&self) -> &[Probability] {
        &self.history
    }
    /// Returns stats only if the checkpoint interval has elapsed, reporting
    /// throughput since the previous checkpoint rather than cumulative.
    pub fn checkpoint(&mut self) -> Option<String> {
        let (then, count) = self.prior;
        if then.elapsed() >= TRAINING_LOG_INTERVAL {
            let secs = then.elapsed().as_secs_f64().max(1e-3);
            let rate = (self.episodes - count) as f64 / secs;
            self.prior = (Instant::now(), self.episodes);
            Some(format!(
                "{:<20}{:<20}{:<20}{:<20}",
                format!("episodes {}", self.episodes),
                format!("wins {}", self.wins),
                format!("win% {:.2}", self.win_rate() * 100.),
                format!("E/sec {:.1}", rate),
            ))
        } else {
            None
        }
    }
}

impl Progress for Metrics {
    fn episodes(&self) -> usize {
        self.episodes
    }
    fn wins(&self) -> usize {
        self.wins
    }
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl serde::Serialize for Metrics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Metrics", 4)?;
        state.serialize_field("episodes", &self.episodes)?;
        state.serialize_field("wins", &self.wins)?;
        state.serialize_field("elapsed", &self.elapsed().as_secs_f64())?;
        state.serialize_field("history", &self.history)?;
        state.end()
    }
}
