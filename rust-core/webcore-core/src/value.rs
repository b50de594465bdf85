//! # Record Values
//!
//! Tagged scalar values stored in flat-file records, and the explicit
//! comparison rules the query operators are built on.
//!
//! ## Comparison rules
//!
//! - `Null` equals `Null`; booleans order `false < true`
//! - `Int` and `Float` compare numerically (`Int` against `Int` exactly)
//! - A number against a `String` coerces the string when it parses as a
//!   finite number, otherwise the pair is incomparable
//! - `String` against `String` compares lexicographically by bytes
//! - every other pairing is incomparable
//!
//! ## Encoding
//!
//! Values map to JSON scalars. Decoding rejects integers outside the `i64`
//! range instead of widening them to floats, and encoding rejects
//! non-finite floats, which JSON cannot represent.

use serde::de::{self, Visitor};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A single record: field name to scalar value
pub type Record = BTreeMap<String, Value>;

/// The whole flat-file document: collection name to ordered records
pub type Document = BTreeMap<String, Vec<Record>>;

/// Scalar value of a record field
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON `null`
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Int(i64),
    /// Float value (f64)
    Float(f64),
    /// String value
    String(String),
}

impl Value {
    /// Get the type name for log and error messages
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    /// Check if value is `Null`
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get as i64 if Int variant
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if Int or Float variant
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as bool if Bool variant
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as &str if String variant
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view used by comparisons; `None` for non-numbers
    fn number(&self) -> Option<Number> {
        match self {
            Self::Int(i) => Some(Number::Int(*i)),
            Self::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(f) => Err(ser::Error::custom(format_args!(
                "non-finite float {f} cannot be stored"
            ))),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

struct ValueVisitor;

impl Visitor<'_> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON scalar")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| E::custom(format_args!("integer {v} is out of range for i64")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        if v.is_finite() {
            Ok(Value::Float(v))
        } else {
            Err(E::custom(format_args!("non-finite float {v}")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parse a numeric string, rejecting `inf`/`NaN` spellings
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(Self::Int(i));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Self::Float)
    }

    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    fn cmp_with(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }
}

/// Compare two values under the record store's rules
///
/// Returns `None` when the pair is incomparable (see module docs).
#[must_use]
pub fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
        (Value::String(s), other) => Number::parse(s)?.cmp_with(other.number()?),
        (other, Value::String(s)) => other.number()?.cmp_with(Number::parse(s)?),
        (a, b) => a.number()?.cmp_with(b.number()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_numbers_across_variants() {
        assert_eq!(compare(&Value::Int(2), &Value::Float(2.0)), Some(Ordering::Equal));
        assert_eq!(compare(&Value::Float(1.5), &Value::Int(2)), Some(Ordering::Less));
        assert_eq!(compare(&Value::Int(i64::MAX), &Value::Int(i64::MAX - 1)), Some(Ordering::Greater));
    }

    #[test]
    fn test_compare_numeric_string_coercion() {
        assert_eq!(compare(&Value::from("10"), &Value::Int(9)), Some(Ordering::Greater));
        assert_eq!(compare(&Value::Int(3), &Value::from(" 3.0")), Some(Ordering::Equal));
        assert_eq!(compare(&Value::from("abc"), &Value::Int(1)), None);
        assert_eq!(compare(&Value::from("inf"), &Value::Float(1.0)), None);
    }

    #[test]
    fn test_compare_strings_lexicographically() {
        assert_eq!(compare(&Value::from("10"), &Value::from("9")), Some(Ordering::Less));
        assert_eq!(compare(&Value::from("b"), &Value::from("a")), Some(Ordering::Greater));
    }

    #[test]
    fn test_compare_mixed_kinds_incomparable() {
        assert_eq!(compare(&Value::Null, &Value::Int(0)), None);
        assert_eq!(compare(&Value::Bool(true), &Value::Int(1)), None);
        assert_eq!(compare(&Value::Null, &Value::Null), Some(Ordering::Equal));
        assert_eq!(compare(&Value::Bool(false), &Value::Bool(true)), Some(Ordering::Less));
    }

    #[test]
    fn test_value_deserializes_scalars() {
        let record: Record =
            serde_json::from_str(r#"{"a": null, "b": true, "c": 7, "d": 1.5, "e": "x"}"#).unwrap();
        assert_eq!(record["a"], Value::Null);
        assert_eq!(record["b"], Value::Bool(true));
        assert_eq!(record["c"], Value::Int(7));
        assert_eq!(record["d"], Value::Float(1.5));
        assert_eq!(record["e"], Value::from("x"));
    }

    #[test]
    fn test_value_rejects_nested() {
        let result: serde_json::Result<Record> = serde_json::from_str(r#"{"tags": ["a", "b"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_rejects_integer_beyond_i64() {
        let result: serde_json::Result<Record> =
            serde_json::from_str(r#"{"n": 10000000000000000000}"#);
        assert!(result.is_err());

        let record: Record = serde_json::from_str(r#"{"n": 9223372036854775807}"#).unwrap();
        assert_eq!(record["n"], Value::Int(i64::MAX));
    }

    #[test]
    fn test_non_finite_float_is_not_encoded() {
        assert!(serde_json::to_string(&Value::Float(f64::NAN)).is_err());
        assert!(serde_json::to_string(&Value::Float(f64::INFINITY)).is_err());
        assert_eq!(serde_json::to_string(&Value::Float(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(4).as_float(), Some(4.0));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
    }
}
