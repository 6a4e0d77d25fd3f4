//! Draw sources: where every random decision of a generation comes from.
//!
//! A [`DrawSource`] is threaded explicitly through each pipeline stage. The
//! contract is small: bounded integers that shrink toward their
//! minimum, collection sizes with an optional upper bound, and raw bits for
//! value generators. Sampling from a finite set and drawing unique
//! collections are layered on top in [`sample`] and [`draw_unique`].

mod recorder;
#[cfg(feature = "rng")]
mod rng;
mod tape;

use std::{collections::HashSet, hash::Hash};

use crate::{error::DrawError, generator::Generator};

pub use recorder::Recorder;
#[cfg(feature = "rng")]
pub use rng::RngSource;
pub use tape::ChoiceTape;

/// Extra attempts allowed per requested element when drawing unique values.
const UNIQUE_ATTEMPTS_PER_ELEMENT: usize = 10;

/// Supplies randomised choices to the generator.
///
/// Implementations must be deterministic for a fixed seed or recording so a
/// generation can be replayed, and should map their "simplest" choice to the
/// lower end of every requested range so shrinking converges on small graphs.
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, DrawSource};
///
/// let mut tape = ChoiceTape::new(vec![7, 0]);
/// assert_eq!(tape.draw_range(2, 4)?, 3);
/// assert_eq!(tape.draw_range(2, 4)?, 2);
/// // An exhausted tape keeps answering with the minimum.
/// assert_eq!(tape.draw_range(2, 4)?, 2);
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
pub trait DrawSource {
    /// Draws an integer in `[min, max]`, preferring `min` when shrinking.
    ///
    /// A `max` below `min` is treated as `min`.
    ///
    /// # Errors
    /// Returns [`DrawError`] when the source cannot make another choice.
    fn draw_range(&mut self, min: usize, max: usize) -> Result<usize, DrawError>;

    /// Draws a collection size of at least `min`.
    ///
    /// `None` leaves the upper end to the source's own [`SizePolicy`].
    ///
    /// # Errors
    /// Returns [`DrawError`] when the source cannot make another choice.
    fn draw_size(&mut self, min: usize, max: Option<usize>) -> Result<usize, DrawError>;

    /// Draws 64 raw bits for value generators such as
    /// [`AnyInt`](crate::AnyInt) and [`AnyBool`](crate::AnyBool).
    ///
    /// A zero choice is the simplest.
    ///
    /// # Errors
    /// Returns [`DrawError`] when the source cannot make another choice.
    fn draw_bits(&mut self) -> Result<u64, DrawError>;
}

impl<S: DrawSource + ?Sized> DrawSource for &mut S {
    fn draw_range(&mut self, min: usize, max: usize) -> Result<usize, DrawError> {
        (**self).draw_range(min, max)
    }

    fn draw_size(&mut self, min: usize, max: Option<usize>) -> Result<usize, DrawError> {
        (**self).draw_size(min, max)
    }

    fn draw_bits(&mut self) -> Result<u64, DrawError> {
        (**self).draw_bits()
    }
}

/// How far above the minimum an unbounded collection may grow.
///
/// # Examples
/// ```
/// use graphgen_core::SizePolicy;
///
/// let policy = SizePolicy::new(10);
/// assert_eq!(policy.upper_bound(3), 13);
/// assert_eq!(SizePolicy::default().span(), 25);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizePolicy {
    span: usize,
}

impl SizePolicy {
    /// Creates a policy allowing up to `span` elements beyond the minimum.
    #[must_use]
    pub const fn new(span: usize) -> Self {
        Self { span }
    }

    /// Returns the configured span.
    #[must_use]
    pub const fn span(self) -> usize {
        self.span
    }

    /// Resolves the effective upper bound for a collection of at least `min`.
    #[must_use]
    pub const fn upper_bound(self, min: usize) -> usize {
        min.saturating_add(self.span)
    }
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self::new(25)
    }
}

/// Draws one element of `items`, shrinking toward the first.
///
/// Returns `Ok(None)` when `items` is empty.
///
/// # Errors
/// Propagates the source's [`DrawError`].
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, draw};
///
/// let mut tape = ChoiceTape::new(vec![1]);
/// assert_eq!(draw::sample(&mut tape, &["a", "b", "c"])?, Some(&"b"));
/// assert_eq!(draw::sample::<u8>(&mut tape, &[])?, None);
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
pub fn sample<'a, T>(
    source: &mut dyn DrawSource,
    items: &'a [T],
) -> Result<Option<&'a T>, DrawError> {
    let Some(last) = items.len().checked_sub(1) else {
        return Ok(None);
    };
    let index = source.draw_range(0, last)?;
    Ok(items.get(index))
}

/// Draws exactly `count` distinct values from `generator`, in draw order.
///
/// Duplicates are discarded and redrawn; after a bounded number of fruitless
/// attempts the request fails with [`DrawError::Exhausted`].
///
/// # Errors
/// Returns [`DrawError::Exhausted`] when not enough distinct values turn up,
/// or any error raised by the source or the generator.
///
/// # Examples
/// ```
/// use graphgen_core::{IntRange, RngSource, draw};
///
/// let mut source = RngSource::seeded(3);
/// let keys = draw::draw_unique(&mut source, &IntRange::new(0, 100), 5)?;
/// assert_eq!(keys.len(), 5);
///
/// let err = draw::draw_unique(&mut source, &IntRange::new(0, 1), 3).unwrap_err();
/// assert!(matches!(err, graphgen_core::DrawError::Exhausted { requested: 3, produced: 2 }));
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
pub fn draw_unique<G>(
    source: &mut dyn DrawSource,
    generator: &G,
    count: usize,
) -> Result<Vec<G::Output>, DrawError>
where
    G: Generator + ?Sized,
    G::Output: Clone + Eq + Hash,
{
    let mut seen = HashSet::with_capacity(count);
    let mut values = Vec::with_capacity(count);
    let budget = count
        .saturating_mul(UNIQUE_ATTEMPTS_PER_ELEMENT)
        .saturating_add(UNIQUE_ATTEMPTS_PER_ELEMENT);

    for _ in 0..budget {
        if values.len() == count {
            break;
        }
        let value = generator.draw(source)?;
        if seen.insert(value.clone()) {
            values.push(value);
        }
    }

    if values.len() < count {
        return Err(DrawError::Exhausted {
            requested: count,
            produced: values.len(),
        });
    }
    Ok(values)
}
