use penney_core::Probability;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

/// Normal-approximation confidence interval for a win probability.
///
/// `lower ≤ point ≤ upper`, clamped to [0, 1]. A point estimate of exactly
/// 0 or 1 has zero margin.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Estimate {
    point: Probability,
    lower: Probability,
    upper: Probability,
    wins: usize,
    trials: usize,
    confidence: Probability,
}

impl Estimate {
    /// Interval for `wins` successes out of `trials`.
    pub fn new(wins: usize, trials: usize, confidence: Probability) -> anyhow::Result<Self> {
        if trials == 0 {
            anyhow::bail!("trials must be positive: {}", trials);
        }
        if wins > trials {
            anyhow::bail!("wins exceed trials: {} > {}", wins, trials);
        }
        let z = Self::z(confidence)?;
        let n = trials as Probability;
        let point = wins as Probability / n;
        let margin = z * (point * (1. - point) / n).sqrt();
        Ok(Self {
            point,
            lower: (point - margin).max(0.),
            upper: (point + margin).min(1.),
            wins,
            trials,
            confidence,
        })
    }
    /// Two-sided critical value `Φ⁻¹((1 + confidence) / 2)`.
    pub fn z(confidence: Probability) -> anyhow::Result<f64> {
        if !(confidence > 0. && confidence < 1.) {
            anyhow::bail!("confidence must be in (0, 1): {}", confidence);
        }
        Ok(Normal::new(0., 1.)?.inverse_cdf((1. + confidence) / 2.))
    }
    pub fn point(&self) -> Probability {
        self.point
    }
    pub fn lower(&self) -> Probability {
        self.lower
    }
    pub fn upper(&self) -> Probability {
        self.upper
    }
    pub fn wins(&self) -> usize {
        self.wins
    }
    pub fn trials(&self) -> usize {
        self.trials
    }
    pub fn confidence(&self) -> Probability {
        self.confidence
    }
    pub fn width(&self) -> Probability {
        self.upper - self.lower
    }
    pub fn contains(&self, p: Probability) -> bool {
        (self.lower..=self.upper).contains(&p)
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:.4} [{:.4}, {:.4}] ({}% CI, n = {})",
            self.point,
            self.lower,
            self.upper,
            self.confidence * 100.,
            self.trials
        )
    }
}
