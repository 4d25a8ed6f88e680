use penney_core::Probability;
use penney_core::Rate;

/// Hyperparameters for one training run.
///
/// Constructed only through [`Config::new`] (or `TryFrom`), so a `Config`
/// in hand is always valid: α ∈ (0, 1], ε ∈ [0, 1], at least one episode.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Config {
    alpha: Rate,
    epsilon: Probability,
    episodes: usize,
    seed: Option<u64>,
}

impl Config {
    pub fn new(alpha: Rate, epsilon: Probability, episodes: usize) -> anyhow::Result<Self> {
        if !(alpha > 0. && alpha <= 1.) {
            anyhow::bail!("learning rate must be in (0, 1]: {}", alpha);
        }
        if !(0. ..=1.).contains(&epsilon) {
            anyhow::bail!("exploration rate must be in [0, 1]: {}", epsilon);
        }
        if episodes == 0 {
            anyhow::bail!("episodes must be positive: {}", episodes);
        }
        Ok(Self {
            alpha,
            epsilon,
            episodes,
            seed: None,
        })
    }
    /// Fix the trainer's random stream for reproducible runs.
    pub fn seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
    pub fn alpha(&self) -> Rate {
        self.alpha
    }
    pub fn epsilon(&self) -> Probability {
        self.epsilon
    }
    pub fn episodes(&self) -> usize {
        self.episodes
    }
    pub fn seeded(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: penney_core::LEARNING_RATE,
            epsilon: penney_core::EXPLORATION_RATE,
            episodes: penney_core::TRAINING_EPISODES,
            seed: None,
        }
    }
}

/// `(alpha, epsilon, episodes)`
impl TryFrom<(Rate, Probability, usize)> for Config {
    type Error = anyhow::Error;
    fn try_from((alpha, epsilon, episodes): (Rate, Probability, usize)) -> Result<Self, Self::Error> {
        Self::new(alpha, epsilon, episodes)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "alpha {} epsilon {} episodes {}",
            self.alpha, self.epsilon, self.episodes
        )?;
        match self.seed {
            Some(seed) => write!(f, " seed {}", seed),
            None => Ok(()),
        }
    }
}
