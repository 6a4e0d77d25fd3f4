//! Choice recording for deterministic replay.

use super::DrawSource;
use crate::error::DrawError;

/// Wraps a draw source and records every answer as a replayable choice.
///
/// Range and size answers are stored relative to the requested minimum, so
/// feeding the recording to a [`super::ChoiceTape`] with the same
/// [`super::SizePolicy`] reproduces the original generation exactly.
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, DrawSource, Recorder, RngSource};
///
/// let mut recorder = Recorder::new(RngSource::seeded(9));
/// let first = recorder.draw_range(10, 20)?;
/// let mut replay = ChoiceTape::new(recorder.into_choices());
/// assert_eq!(replay.draw_range(10, 20)?, first);
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Recorder<S> {
    inner: S,
    choices: Vec<u64>,
}

impl<S: DrawSource> Recorder<S> {
    /// Starts recording the choices made by `inner`.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            choices: Vec::new(),
        }
    }

    /// Returns the choices recorded so far.
    #[must_use]
    pub fn choices(&self) -> &[u64] {
        &self.choices
    }

    /// Consumes the recorder, returning the recorded choices.
    #[must_use]
    pub fn into_choices(self) -> Vec<u64> {
        self.choices
    }

    /// Consumes the recorder, returning the wrapped source.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn record_offset(&mut self, value: usize, min: usize) {
        let offset = value.saturating_sub(min);
        self.choices
            .push(u64::try_from(offset).unwrap_or(u64::MAX));
    }
}

impl<S: DrawSource> DrawSource for Recorder<S> {
    fn draw_range(&mut self, min: usize, max: usize) -> Result<usize, DrawError> {
        let value = self.inner.draw_range(min, max)?;
        self.record_offset(value, min);
        Ok(value)
    }

    fn draw_size(&mut self, min: usize, max: Option<usize>) -> Result<usize, DrawError> {
        let value = self.inner.draw_size(min, max)?;
        self.record_offset(value, min);
        Ok(value)
    }

    fn draw_bits(&mut self) -> Result<u64, DrawError> {
        let bits = self.inner.draw_bits()?;
        self.choices.push(bits);
        Ok(bits)
    }
}
