//! Payload generators shared by the generation tests.

use graphgen_core::{Attributes, FixedAttributes, Generator, IntRange, Just, Value, attributes};

/// Payload giving every element `{"color": "red"}`.
#[must_use]
pub fn red() -> FixedAttributes {
    FixedAttributes::empty().with_field("color", Just(Value::from("red")))
}

/// The attributes every [`red`] payload draws.
#[must_use]
pub fn red_attributes() -> Attributes {
    attributes([("color", "red")])
}

/// Payload with a single drawn integer `weight` in `[0, 99]`.
///
/// # Examples
/// ```
/// use graphgen_core::{ChoiceTape, Generator, Value};
/// use graphgen_test_support::payloads::weighted;
///
/// let attrs = weighted().draw(&mut ChoiceTape::new(vec![42]))?;
/// assert_eq!(attrs.get(&Value::from("weight")), Some(&Value::Int(42)));
/// # Ok::<(), graphgen_core::DrawError>(())
/// ```
#[must_use]
pub fn weighted() -> FixedAttributes {
    FixedAttributes::empty().with_field("weight", IntRange::new(0, 99).map(Value::Int))
}
