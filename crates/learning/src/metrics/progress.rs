use penney_core::Probability;
use std::time::Duration;

/// Read-only view of a training run's progress.
///
/// # Required Methods
///
/// - `episodes()` — Episodes played so far
/// - `wins()` — Episodes in which the selected response won
/// - `elapsed()` — Wall-clock training duration
///
/// # Provided Methods
///
/// - `win_rate()` — Cumulative fraction of episodes won
/// - `format()` — Aligned columns with episode throughput
/// - `summary()` — Final output with "training stopped" prefix
pub trait Progress {
    fn episodes(&self) -> usize;
    fn wins(&self) -> usize;
    fn elapsed(&self) -> Duration;
    /// Cumulative win rate, including exploratory episodes.
    fn win_rate(&self) -> Probability {
        self.wins() as Probability / self.episodes().max(1) as Probability
    }
    fn format(&self) -> String {
        let rate = self.episodes() as f64 / self.elapsed().as_secs_f64().max(1e-3);
        format!(
            "{:<20}{:<20}{:<20}{:<20}",
            format!("episodes {}", self.episodes()),
            format!("wins {}", self.wins()),
            format!("win% {:.2}", self.win_rate() * 100.),
            format!("E/sec {:.1}", rate),
        )
    }
    fn summary(&self) -> String {
        format!("training stopped\n{}", self.format())
    }
}
