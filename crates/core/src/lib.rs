//! Core type aliases, traits, and constants for penney.
//!
//! This crate provides the foundational types and tuning parameters
//! used throughout the penney workspace.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Win rates, exploration rates, and confidence levels.
pub type Probability = f64;
/// Rewards and value-table estimates, always within [-1, 1].
pub type Utility = f64;
/// Step sizes for incremental value updates.
pub type Rate = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Coins per player sequence.
pub const LENGTH: usize = 3;
/// Number of distinct sequences (2^LENGTH). Fixes both state and action spaces.
pub const SEQUENCES: usize = 1 << LENGTH;
/// Hard cap on coins flipped in one game before falling back to a fair coin.
/// Every pair of distinct length-3 patterns is resolved within a few dozen
/// flips on average, so the fallback is never observed in practice.
pub const MAX_FLIPS: usize = 0x10000;

// ============================================================================
// Q-LEARNING
// Single-shot episodes: value ← value + α·(reward − value), ε-greedy selection.
// ============================================================================
/// Default step size (α). Higher converges faster but tracks noise more closely.
pub const LEARNING_RATE: Rate = 0.1;
/// Default exploration rate (ε). Fixed for the whole run, never decayed.
pub const EXPLORATION_RATE: Probability = 0.1;
/// Default training budget (~1M episodes over 64 state-action cells).
pub const TRAINING_EPISODES: usize = 0x100000;
/// Reward for a response that appears first.
pub const REWARD_WIN: Utility = 1.0;
/// Reward for a response that loses the race.
pub const REWARD_LOSS: Utility = -1.0;

// ============================================================================
// VERIFICATION
// ============================================================================
/// Default confidence level for Monte Carlo interval estimates.
pub const CONFIDENCE_LEVEL: Probability = 0.95;
/// Default trials per probability estimate.
pub const ESTIMATE_TRIALS: usize = 200_000;
/// Default trials per tournament case (per policy).
pub const TOURNAMENT_TRIALS: usize = 100_000;
/// Default independent runs for the training consistency check.
pub const CONSISTENCY_RUNS: usize = 3;
/// Trials per independently seeded chunk. Fixed so that a seeded estimate
/// does not depend on how many threads happen to run it.
pub const TRIAL_CHUNK: usize = 0x1000;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Episodes per recorded win-rate window.
pub const TRAINING_WINDOW: usize = 10_000;
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Global interrupt flag for graceful shutdown coordination.
#[cfg(feature = "server")]
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
/// Optional training deadline from TRAIN_DURATION env var.
#[cfg(feature = "server")]
static DEADLINE: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
/// Check if graceful shutdown was requested (via stdin "Q") or deadline reached.
#[cfg(feature = "server")]
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
        || DEADLINE
            .get()
            .map_or(false, |d| std::time::Instant::now() >= *d)
}
/// No-op interrupt check when server feature disabled.
#[cfg(not(feature = "server"))]
pub fn interrupted() -> bool {
    false
}
/// Register graceful interrupt handler. Type "Q" + Enter to stop training
/// at the next window boundary.
/// Optionally set TRAIN_DURATION env var (e.g., "2h", "30m") for timed runs.
#[cfg(feature = "server")]
pub fn brb() {
    if let Ok(duration) = std::env::var("TRAIN_DURATION") {
        match parse_duration(&duration) {
            Some(deadline) => {
                let _ = DEADLINE.set(std::time::Instant::now() + deadline);
                log::info!("training will stop after {}", duration);
            }
            None => log::warn!("ignoring malformed TRAIN_DURATION {:?}", duration),
        }
    }
    std::thread::spawn(|| {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().to_uppercase() == "Q" => {
                    log::warn!("graceful interrupt requested, finishing current window...");
                    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}
/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (split, unit) = s.char_indices().last()?;
    let value: u64 = s[..split].parse().ok()?;
    let scale = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86400,
        _ => return None,
    };
    value.checked_mul(scale).map(std::time::Duration::from_secs)
}
