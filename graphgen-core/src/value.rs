//! Opaque attribute payloads carried by nodes and edges.
//!
//! The generator never looks inside a payload; it only guarantees that every
//! node and every edge receives exactly one of them.

use std::{collections::BTreeMap, fmt};

/// A dynamically typed attribute key or value.
///
/// Payloads mix types freely, so keys and values share one sum type.
///
/// # Examples
/// ```
/// use graphgen_core::Value;
///
/// let key = Value::from("color");
/// assert_eq!(key, Value::Text("color".to_owned()));
/// assert!(Value::from(1) < Value::from("a"));
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A UTF-8 string.
    Text(String),
    /// A fixed-arity tuple of nested values.
    Tuple(Vec<Value>),
}

/// Key/value payload attached to a single node or edge.
pub type Attributes = BTreeMap<Value, Value>;

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Tuple(values)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::Tuple(values) => {
                f.write_str("(")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Builds an [`Attributes`] map from key/value pairs.
///
/// # Examples
/// ```
/// use graphgen_core::{Value, attributes};
///
/// let attrs = attributes([("color", "red")]);
/// assert_eq!(attrs.get(&Value::from("color")), Some(&Value::from("red")));
/// ```
pub fn attributes<K, V, I>(pairs: I) -> Attributes
where
    K: Into<Value>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(Value::from(true), "true")]
    #[case(Value::from(-3), "-3")]
    #[case(Value::from("red"), "\"red\"")]
    #[case(Value::from(vec![Value::from(1), Value::from("x")]), "(1, \"x\")")]
    fn display_renders_nested_values(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn attributes_collects_pairs_in_key_order() {
        let attrs = attributes([("b", 2), ("a", 1)]);
        let keys: Vec<_> = attrs.keys().cloned().collect();
        assert_eq!(keys, vec![Value::from("a"), Value::from("b")]);
    }
}
