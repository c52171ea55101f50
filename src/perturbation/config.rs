//! Perturbation driver configuration.

/// Configuration for [`PerturbationRunner`](super::PerturbationRunner).
///
/// # Examples
///
/// ```
/// use tsp_neighborhood::perturbation::PerturbationConfig;
///
/// let config = PerturbationConfig::default()
///     .with_max_restarts(50)
///     .with_shuffle_fraction(0.2)
///     .with_seed(7);
/// assert_eq!(config.max_restarts, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerturbationConfig {
    /// Maximum number of perturb-and-descend restarts after the first descent.
    pub max_restarts: usize,
    /// Restarts without a new best before stopping. 0 = no limit.
    pub max_no_improve: usize,
    /// Upper bound on the shuffled segment, as a fraction of `n`.
    ///
    /// The segment length is drawn from `[2, max(2, fraction * n)]`.
    pub shuffle_fraction: f64,
    /// Random seed (None for a random seed).
    pub seed: Option<u64>,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            max_restarts: 100,
            max_no_improve: 30,
            shuffle_fraction: 0.1,
            seed: None,
        }
    }
}

impl PerturbationConfig {
    pub fn with_max_restarts(mut self, n: usize) -> Self {
        self.max_restarts = n;
        self
    }

    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    pub fn with_shuffle_fraction(mut self, fraction: f64) -> Self {
        self.shuffle_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.shuffle_fraction > 0.0 && self.shuffle_fraction <= 1.0) {
            return Err(format!(
                "shuffle_fraction must be in (0, 1], got {}",
                self.shuffle_fraction
            ));
        }
        Ok(())
    }
}
