//! Replay of recorded choice sequences.

use super::{DrawSource, SizePolicy};
use crate::error::DrawError;

/// Draw source that replays a fixed sequence of raw choices.
///
/// Each choice `c` answers a request for `[min, max]` with
/// `min + c % (max - min + 1)`, so a zero choice always means "the minimum".
/// Once the tape runs out every further request is answered with its
/// minimum. Shorter tapes and smaller choices therefore describe simpler
/// graphs, which is what lets an external shrinker minimise them.
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, DrawSource};
///
/// let mut tape = ChoiceTape::new(vec![3]).with_limit(1);
/// assert_eq!(tape.draw_range(0, 10)?, 3);
/// assert!(tape.draw_range(0, 10).is_err());
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChoiceTape {
    choices: Vec<u64>,
    position: usize,
    limit: Option<usize>,
    policy: SizePolicy,
}

impl ChoiceTape {
    /// Creates a tape replaying `choices` with no choice limit.
    #[must_use]
    pub fn new(choices: Vec<u64>) -> Self {
        Self {
            choices,
            position: 0,
            limit: None,
            policy: SizePolicy::default(),
        }
    }

    /// Fails with [`DrawError::Overrun`] after `limit` choices.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Overrides how large unbounded collections may grow.
    #[must_use]
    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns how many choices have been consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of recorded choices on the tape.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns whether the tape holds no recorded choices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    fn next_choice(&mut self) -> Result<u64, DrawError> {
        if let Some(limit) = self.limit
            && self.position >= limit
        {
            return Err(DrawError::Overrun { limit });
        }
        let choice = self.choices.get(self.position).copied().unwrap_or(0);
        self.position = self.position.saturating_add(1);
        Ok(choice)
    }
}

impl DrawSource for ChoiceTape {
    fn draw_range(&mut self, min: usize, max: usize) -> Result<usize, DrawError> {
        let choice = self.next_choice()?;
        let span = u64::try_from(max.saturating_sub(min)).unwrap_or(u64::MAX);
        let offset = match span.checked_add(1) {
            Some(width) => choice % width,
            None => choice,
        };
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(min.saturating_add(offset).min(max.max(min)))
    }

    fn draw_size(&mut self, min: usize, max: Option<usize>) -> Result<usize, DrawError> {
        let upper = max.unwrap_or_else(|| self.policy.upper_bound(min));
        self.draw_range(min, upper)
    }

    fn draw_bits(&mut self) -> Result<u64, DrawError> {
        self.next_choice()
    }
}
