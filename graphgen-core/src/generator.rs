//! Declarative value generators for attribute payloads and node keys.
//!
//! A [`Generator`] describes how to turn draws from a [`DrawSource`] into a
//! value. The pipeline only ever calls [`Generator::draw`]; what comes out is
//! passed through to the graph untouched.

use std::{fmt, sync::Arc};

use crate::{
    draw::{self, DrawSource},
    error::DrawError,
    value::{Attributes, Value},
};

/// Produces values from a [`DrawSource`].
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, Generator, IntRange};
///
/// let doubled = IntRange::new(0, 10).map(|value| value * 2);
/// let mut tape = ChoiceTape::new(vec![4]);
/// assert_eq!(doubled.draw(&mut tape)?, 8);
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
pub trait Generator {
    /// Type of value produced.
    type Output;

    /// Draws one value.
    ///
    /// # Errors
    /// Propagates any [`DrawError`] raised by `source`.
    fn draw(&self, source: &mut dyn DrawSource) -> Result<Self::Output, DrawError>;

    /// Transforms every drawn value with `f`.
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { inner: self, f }
    }
}

impl<G: Generator + ?Sized> Generator for &G {
    type Output = G::Output;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<Self::Output, DrawError> {
        (**self).draw(source)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    type Output = G::Output;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<Self::Output, DrawError> {
        (**self).draw(source)
    }
}

impl<G: Generator + ?Sized> Generator for Arc<G> {
    type Output = G::Output;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<Self::Output, DrawError> {
        (**self).draw(source)
    }
}

/// Shared, type-erased generator of attribute payloads.
pub type AttributeGenerator = Arc<dyn Generator<Output = Attributes> + Send + Sync>;

/// Shared, type-erased generator of single attribute values.
pub type ValueGenerator = Arc<dyn Generator<Output = Value> + Send + Sync>;

/// Always yields a clone of the wrapped value without drawing.
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, Generator, Just};
///
/// let mut tape = ChoiceTape::new(Vec::new()).with_limit(0);
/// assert_eq!(Just("fixed").draw(&mut tape)?, "fixed");
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Just<T>(pub T);

impl<T: Clone> Generator for Just<T> {
    type Output = T;

    fn draw(&self, _source: &mut dyn DrawSource) -> Result<T, DrawError> {
        Ok(self.0.clone())
    }
}

/// Integers in an inclusive range, shrinking toward the lower end.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    /// Creates a generator over `[min, max]`; the bounds are swapped if
    /// given in the wrong order.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }
}

impl Generator for IntRange {
    type Output = i64;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<i64, DrawError> {
        let span = usize::try_from(self.max.abs_diff(self.min)).unwrap_or(usize::MAX);
        let offset = source.draw_range(0, span)?;
        let offset = u64::try_from(offset).unwrap_or(u64::MAX);
        Ok(self.min.saturating_add_unsigned(offset).min(self.max))
    }
}

/// Picks one of a fixed list of values, shrinking toward the first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SampledFrom<T> {
    items: Vec<T>,
}

impl<T> SampledFrom<T> {
    /// Creates a generator choosing among `items`.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone> Generator for SampledFrom<T> {
    type Output = T;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<T, DrawError> {
        draw::sample(source, &self.items)?
            .cloned()
            .ok_or(DrawError::Exhausted {
                requested: 1,
                produced: 0,
            })
    }
}

/// Fair coin flips taken from the low bit of a raw draw.
///
/// A zero choice yields `false`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AnyBool;

impl Generator for AnyBool {
    type Output = bool;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<bool, DrawError> {
        Ok(source.draw_bits()? & 1 == 1)
    }
}

/// Any `i64`, decoded from raw bits so that small magnitudes come from small
/// choices.
///
/// The low bit carries the sign: `0, 1, 2, 3, 4` decode to `0, -1, 1, -2, 2`.
///
/// # Examples
/// ```
/// use graphgen_core::{AnyInt, ChoiceTape, Generator};
///
/// let mut tape = ChoiceTape::new(vec![0, 3, 4, u64::MAX]);
/// assert_eq!(AnyInt.draw(&mut tape)?, 0);
/// assert_eq!(AnyInt.draw(&mut tape)?, -2);
/// assert_eq!(AnyInt.draw(&mut tape)?, 2);
/// assert_eq!(AnyInt.draw(&mut tape)?, i64::MIN);
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AnyInt;

impl Generator for AnyInt {
    type Output = i64;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<i64, DrawError> {
        let bits = source.draw_bits()?;
        let magnitude = i64::try_from(bits >> 1).unwrap_or(i64::MAX);
        if bits & 1 == 1 {
            Ok(-magnitude - 1)
        } else {
            Ok(magnitude)
        }
    }
}

/// Strings over a fixed alphabet with a bounded or policy-driven length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextOf {
    alphabet: Vec<char>,
    min_len: usize,
    max_len: Option<usize>,
}

impl TextOf {
    /// Creates a generator of strings over the characters of `alphabet`.
    #[must_use]
    pub fn new(alphabet: &str, min_len: usize, max_len: Option<usize>) -> Self {
        Self {
            alphabet: alphabet.chars().collect(),
            min_len,
            max_len,
        }
    }
}

impl Generator for TextOf {
    type Output = String;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<String, DrawError> {
        if self.alphabet.is_empty() {
            if self.min_len > 0 {
                return Err(DrawError::Exhausted {
                    requested: self.min_len,
                    produced: 0,
                });
            }
            return Ok(String::new());
        }
        let len = source.draw_size(self.min_len, self.max_len)?;
        let mut text = String::with_capacity(len);
        for _ in 0..len {
            if let Some(ch) = draw::sample(source, &self.alphabet)? {
                text.push(*ch);
            }
        }
        Ok(text)
    }
}

/// Payload with a fixed set of keys, each value drawn from its own generator.
///
/// The empty instance is the default payload for nodes and edges.
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, FixedAttributes, Generator, IntRange, Value};
///
/// let payload = FixedAttributes::empty()
///     .with_field("weight", IntRange::new(1, 9).map(Value::Int));
/// let attrs = payload.draw(&mut ChoiceTape::new(vec![2]))?;
/// assert_eq!(attrs.get(&Value::from("weight")), Some(&Value::Int(3)));
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[derive(Clone, Default)]
pub struct FixedAttributes {
    fields: Vec<(Value, ValueGenerator)>,
}

impl FixedAttributes {
    /// Creates a payload generator with no keys.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a key whose value is drawn from `generator`.
    #[must_use]
    pub fn with_field<K, G>(mut self, key: K, generator: G) -> Self
    where
        K: Into<Value>,
        G: Generator<Output = Value> + Send + Sync + 'static,
    {
        self.fields.push((key.into(), Arc::new(generator)));
        self
    }
}

impl fmt::Debug for FixedAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedAttributes")
            .field(
                "keys",
                &self.fields.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Generator for FixedAttributes {
    type Output = Attributes;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<Attributes, DrawError> {
        let mut attrs = Attributes::new();
        for (key, generator) in &self.fields {
            attrs.insert(key.clone(), generator.draw(source)?);
        }
        Ok(attrs)
    }
}

/// Variable-size payload with drawn keys and values.
///
/// A size is drawn first, then that many key/value pairs; colliding keys
/// keep the last value, so the payload holds at most the drawn size.
#[derive(Clone)]
pub struct AttributeMap {
    keys: ValueGenerator,
    values: ValueGenerator,
    min_size: usize,
    max_size: Option<usize>,
}

impl AttributeMap {
    /// Creates a payload generator with up to `max_size` entries.
    #[must_use]
    pub fn new<K, V>(keys: K, values: V, min_size: usize, max_size: Option<usize>) -> Self
    where
        K: Generator<Output = Value> + Send + Sync + 'static,
        V: Generator<Output = Value> + Send + Sync + 'static,
    {
        Self {
            keys: Arc::new(keys),
            values: Arc::new(values),
            min_size,
            max_size,
        }
    }
}

impl fmt::Debug for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeMap")
            .field("min_size", &self.min_size)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

impl Generator for AttributeMap {
    type Output = Attributes;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<Attributes, DrawError> {
        let size = source.draw_size(self.min_size, self.max_size)?;
        let mut attrs = Attributes::new();
        for _ in 0..size {
            let key = self.keys.draw(source)?;
            let value = self.values.draw(source)?;
            attrs.insert(key, value);
        }
        Ok(attrs)
    }
}

/// Generator adapter returned by [`Generator::map`].
#[derive(Clone, Debug)]
pub struct Map<G, F> {
    inner: G,
    f: F,
}

impl<G, F, U> Generator for Map<G, F>
where
    G: Generator,
    F: Fn(G::Output) -> U,
{
    type Output = U;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<U, DrawError> {
        self.inner.draw(source).map(&self.f)
    }
}

/// Generator backed by a closure.
#[derive(Clone, Debug)]
pub struct FromFn<F>(F);

/// Wraps a closure as a [`Generator`].
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, DrawSource, Generator, generator};
///
/// let coin = generator::from_fn(|source: &mut dyn DrawSource| Ok(source.draw_range(0, 1)? == 1));
/// assert!(coin.draw(&mut ChoiceTape::new(vec![1]))?);
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
pub const fn from_fn<F, T>(f: F) -> FromFn<F>
where
    F: Fn(&mut dyn DrawSource) -> Result<T, DrawError>,
{
    FromFn(f)
}

impl<F, T> Generator for FromFn<F>
where
    F: Fn(&mut dyn DrawSource) -> Result<T, DrawError>,
{
    type Output = T;

    fn draw(&self, source: &mut dyn DrawSource) -> Result<T, DrawError> {
        (self.0)(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::ChoiceTape, value::attributes};

    use rstest::rstest;

    #[rstest]
    #[case(IntRange::new(-3, 3), vec![0], -3)]
    #[case(IntRange::new(-3, 3), vec![6], 3)]
    #[case(IntRange::new(5, -5), vec![1], -4)]
    #[case(IntRange::new(i64::MIN, i64::MAX), vec![], i64::MIN)]
    fn int_range_offsets_from_minimum(
        #[case] generator: IntRange,
        #[case] choices: Vec<u64>,
        #[case] expected: i64,
    ) {
        let mut tape = ChoiceTape::new(choices);
        assert_eq!(generator.draw(&mut tape).expect("no limit"), expected);
    }

    #[test]
    fn sampled_from_empty_list_is_exhausted() {
        let generator = SampledFrom::<u8>::new(Vec::new());
        let err = generator
            .draw(&mut ChoiceTape::default())
            .expect_err("nothing to sample");
        assert!(matches!(err, DrawError::Exhausted { requested: 1, produced: 0 }));
    }

    #[test]
    fn text_draws_length_then_characters() {
        let generator = TextOf::new("abc", 1, Some(3));
        let mut tape = ChoiceTape::new(vec![1, 2, 0]);
        assert_eq!(generator.draw(&mut tape).expect("no limit"), "ca");
    }

    #[test]
    fn empty_alphabet_cannot_reach_minimum_length() {
        let generator = TextOf::new("", 3, Some(5));
        let err = generator
            .draw(&mut ChoiceTape::default())
            .expect_err("no characters to draw");
        assert_eq!(err, DrawError::Exhausted { requested: 3, produced: 0 });
    }

    #[test]
    fn empty_alphabet_allows_empty_text() {
        let generator = TextOf::new("", 0, Some(5));
        let mut tape = ChoiceTape::new(Vec::new()).with_limit(0);
        assert_eq!(generator.draw(&mut tape).expect("no draws"), "");
    }

    #[rstest]
    #[case::zero(0, false)]
    #[case::odd(7, true)]
    #[case::even(u64::MAX - 1, false)]
    fn any_bool_reads_the_low_bit(#[case] choice: u64, #[case] expected: bool) {
        let mut tape = ChoiceTape::new(vec![choice]);
        assert_eq!(AnyBool.draw(&mut tape).expect("no limit"), expected);
    }

    #[rstest]
    #[case::zero(0, 0)]
    #[case::minus_one(1, -1)]
    #[case::one(2, 1)]
    #[case::largest(u64::MAX - 1, i64::MAX)]
    #[case::smallest(u64::MAX, i64::MIN)]
    fn any_int_decodes_sign_from_low_bit(#[case] choice: u64, #[case] expected: i64) {
        let mut tape = ChoiceTape::new(vec![choice]);
        assert_eq!(AnyInt.draw(&mut tape).expect("no limit"), expected);
    }

    #[test]
    fn bit_generators_feed_attribute_values() {
        let generator = FixedAttributes::empty()
            .with_field("flag", AnyBool.map(Value::Bool))
            .with_field("offset", AnyInt.map(Value::Int));
        let mut tape = ChoiceTape::new(vec![1, 5]);
        let attrs = generator.draw(&mut tape).expect("no limit");
        assert_eq!(
            attrs,
            attributes([("flag", Value::Bool(true)), ("offset", Value::Int(-3))])
        );
    }

    #[test]
    fn fixed_attributes_draw_in_field_order() {
        let generator = FixedAttributes::empty()
            .with_field("a", IntRange::new(0, 9).map(Value::Int))
            .with_field("b", Just(Value::from("x")))
            .with_field("c", IntRange::new(0, 9).map(Value::Int));
        let mut tape = ChoiceTape::new(vec![4, 7]);
        let attrs = generator.draw(&mut tape).expect("no limit");
        assert_eq!(
            attrs,
            attributes([
                ("a", Value::Int(4)),
                ("b", Value::from("x")),
                ("c", Value::Int(7)),
            ])
        );
    }

    #[test]
    fn attribute_map_collapses_duplicate_keys() {
        let generator = AttributeMap::new(
            SampledFrom::new(vec![Value::from("k")]),
            IntRange::new(0, 9).map(Value::Int),
            0,
            Some(3),
        );
        // Size 2, then two (key, value) pairs. Sampling the lone key still
        // consumes a choice.
        let mut tape = ChoiceTape::new(vec![2, 0, 1, 0, 5]);
        let attrs = generator.draw(&mut tape).expect("no limit");
        assert_eq!(attrs, attributes([("k", 5)]));
    }

    #[test]
    fn empty_payload_draws_nothing() {
        let mut tape = ChoiceTape::new(Vec::new()).with_limit(0);
        let attrs = FixedAttributes::empty().draw(&mut tape).expect("no draws");
        assert!(attrs.is_empty());
    }
}
