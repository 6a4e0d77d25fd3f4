//! Seeded pseudo-random draw source.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::{DrawSource, SizePolicy};
use crate::error::DrawError;

/// Draw source backed by a seeded [`SmallRng`].
///
/// The same seed always yields the same sequence of choices, which makes
/// generated graphs reproducible from a single `u64`.
///
/// # Examples
/// ```
/// use graphgen_core::{DrawSource, RngSource};
///
/// let mut left = RngSource::seeded(42);
/// let mut right = RngSource::seeded(42);
/// assert_eq!(left.draw_range(0, 1000)?, right.draw_range(0, 1000)?);
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RngSource {
    rng: SmallRng,
    policy: SizePolicy,
}

impl RngSource {
    /// Creates a source seeded with `seed` and the default [`SizePolicy`].
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            policy: SizePolicy::default(),
        }
    }

    /// Overrides how large unbounded collections may grow.
    #[must_use]
    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active size policy.
    #[must_use]
    pub fn size_policy(&self) -> SizePolicy {
        self.policy
    }
}

impl DrawSource for RngSource {
    fn draw_range(&mut self, min: usize, max: usize) -> Result<usize, DrawError> {
        if max <= min {
            return Ok(min);
        }
        Ok(self.rng.gen_range(min..=max))
    }

    fn draw_size(&mut self, min: usize, max: Option<usize>) -> Result<usize, DrawError> {
        let upper = max.unwrap_or_else(|| self.policy.upper_bound(min));
        self.draw_range(min, upper)
    }

    fn draw_bits(&mut self) -> Result<u64, DrawError> {
        Ok(self.rng.r#gen())
    }
}
