//! Improvement-selection policy.

use rand::Rng;

use crate::random::coin_flip;

/// Decides whether a neighborhood scan stops at the first improving move
/// or searches exhaustively for the best one.
///
/// The two random states resolve at different granularities.
/// [`call_policy`](Self::call_policy) resolves only `RandomPerCall`;
/// [`iteration_policy`](Self::iteration_policy) resolves only
/// `RandomPerIteration`. Engines compose both as
/// `policy.call_policy(rng).iteration_policy(rng)`, so each random state is
/// resolved by exactly one of the two steps.
///
/// # Examples
///
/// ```
/// use tsp_neighborhood::local_search::ImprovementPolicy;
/// use tsp_neighborhood::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let resolved = ImprovementPolicy::RandomPerCall
///     .call_policy(&mut rng)
///     .iteration_policy(&mut rng);
/// assert!(matches!(
///     resolved,
///     ImprovementPolicy::AlwaysBest | ImprovementPolicy::AlwaysFirst
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImprovementPolicy {
    /// Scan the whole neighborhood and apply the best move.
    #[default]
    AlwaysBest,
    /// Apply the first strictly improving move found.
    AlwaysFirst,
    /// Flip a coin once per local-search call.
    RandomPerCall,
    /// Flip a coin at iteration granularity.
    RandomPerIteration,
}

impl ImprovementPolicy {
    /// Resolves `RandomPerCall` by a coin flip; every other state is
    /// returned unchanged, including `RandomPerIteration`.
    pub fn call_policy<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self {
            ImprovementPolicy::RandomPerCall => Self::flip(rng),
            other => other,
        }
    }

    /// Resolves `RandomPerIteration` by a coin flip; every other state is
    /// returned unchanged.
    pub fn iteration_policy<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self {
            ImprovementPolicy::RandomPerIteration => Self::flip(rng),
            other => other,
        }
    }

    /// `true` only for [`AlwaysFirst`](Self::AlwaysFirst).
    pub fn use_first_improvement(self) -> bool {
        self == ImprovementPolicy::AlwaysFirst
    }

    /// The resolved first-improvement flag for one local-search call.
    pub fn resolve_first_improvement<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        self.call_policy(rng)
            .iteration_policy(rng)
            .use_first_improvement()
    }

    fn flip<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if coin_flip(rng) {
            ImprovementPolicy::AlwaysBest
        } else {
            ImprovementPolicy::AlwaysFirst
        }
    }
}
