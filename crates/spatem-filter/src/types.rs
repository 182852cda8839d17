//! Core record types.
//!
//! A spatem is a device-originated record. The filter only ever reads two
//! of its fields, `deviceId` and `deviceIdType`; everything else is kept
//! as an opaque map so that records can be passed through untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Identifier values
// =============================================================================

/// An identifier or identifier-type value.
///
/// Any JSON scalar can be an identifier. Equality is type-aware across
/// kinds (`Integer(2)` is not `Text("2")`), but numbers compare by value
/// whatever their representation, so `Float(2.0) == Integer(2)`. Only the
/// signature criterion renders values to text.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum IdValue {
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// An explicit JSON `null` (a missing field is `None` instead)
    Null,
}

impl IdValue {
    /// Convert an untyped JSON value, if it can represent an identifier.
    ///
    /// Scalars always convert. Floats with no fractional part that fit in
    /// an `i64` become `Integer`. Arrays and objects yield `None`: they
    /// can never equal a configured value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(IdValue::Null),
            Value::Bool(flag) => Some(IdValue::Bool(*flag)),
            Value::String(text) => Some(IdValue::Text(text.clone())),
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    return Some(IdValue::Integer(integer));
                }
                if let Some(unsigned) = number.as_u64() {
                    return Some(IdValue::Unsigned(unsigned));
                }
                number.as_f64().map(IdValue::from)
            }
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            IdValue::Integer(integer) => Some(Number::Exact(i128::from(*integer))),
            IdValue::Unsigned(unsigned) => Some(Number::Exact(i128::from(*unsigned))),
            IdValue::Float(float) => Some(Number::Float(*float)),
            _ => None,
        }
    }
}

/// Numeric view used for value equality.
#[derive(Clone, Copy)]
enum Number {
    Exact(i128),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Exact(a), Number::Exact(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Exact(exact), Number::Float(float))
            | (Number::Float(float), Number::Exact(exact)) => {
                float.fract() == 0.0 && float as i128 == exact
            }
        }
    }
}

impl PartialEq for IdValue {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a == b;
        }
        match (self, other) {
            (IdValue::Bool(a), IdValue::Bool(b)) => a == b,
            (IdValue::Text(a), IdValue::Text(b)) => a == b,
            (IdValue::Null, IdValue::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Integer(integer) => write!(f, "{}", integer),
            IdValue::Unsigned(unsigned) => write!(f, "{}", unsigned),
            IdValue::Float(float) => write!(f, "{}", float),
            IdValue::Bool(flag) => write!(f, "{}", flag),
            IdValue::Text(text) => f.write_str(text),
            IdValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for IdValue {
    fn from(text: &str) -> Self {
        IdValue::Text(text.to_string())
    }
}

impl From<String> for IdValue {
    fn from(text: String) -> Self {
        IdValue::Text(text)
    }
}

impl From<i64> for IdValue {
    fn from(integer: i64) -> Self {
        IdValue::Integer(integer)
    }
}

impl From<u64> for IdValue {
    fn from(unsigned: u64) -> Self {
        match i64::try_from(unsigned) {
            Ok(integer) => IdValue::Integer(integer),
            Err(_) => IdValue::Unsigned(unsigned),
        }
    }
}

impl From<f64> for IdValue {
    fn from(float: f64) -> Self {
        let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
        if float.fract() == 0.0 && in_range {
            IdValue::Integer(float as i64)
        } else {
            IdValue::Float(float)
        }
    }
}

impl From<bool> for IdValue {
    fn from(flag: bool) -> Self {
        IdValue::Bool(flag)
    }
}

macro_rules! impl_from_small_integer {
    ($($integer:ty),*) => {
        $(
            impl From<$integer> for IdValue {
                fn from(integer: $integer) -> Self {
                    IdValue::Integer(i64::from(integer))
                }
            }
        )*
    };
}

impl_from_small_integer!(u8, u16, u32, i32);

// =============================================================================
// Spatem record
// =============================================================================

/// Separator between the two halves of a device signature.
pub const SIGNATURE_SEPARATOR: char = '/';

/// A spatem record as seen by the filter.
///
/// A missing `deviceId`/`deviceIdType` (or one holding an array or object)
/// decodes to `None` instead of failing, so any JSON object can be evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spatem {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub device_id: Option<IdValue>,

    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub device_id_type: Option<IdValue>,

    /// Fields the filter never inspects.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Spatem {
    /// Create a spatem carrying only a device identifier and its type.
    pub fn new(device_id: impl Into<IdValue>, device_id_type: impl Into<IdValue>) -> Self {
        Self {
            device_id: Some(device_id.into()),
            device_id_type: Some(device_id_type.into()),
            other: Map::new(),
        }
    }

    /// The composite `deviceId/deviceIdType` key.
    ///
    /// Returns `None` unless both fields are present. Neither half is
    /// escaped, so a `/` inside `deviceId` makes the key ambiguous.
    pub fn signature(&self) -> Option<String> {
        let device_id = self.device_id.as_ref()?;
        let device_id_type = self.device_id_type.as_ref()?;
        Some(format!("{}{}{}", device_id, SIGNATURE_SEPARATOR, device_id_type))
    }
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<IdValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(IdValue::from_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_value_from_json() {
        assert_eq!(IdValue::from_json(&json!("abc")), Some(IdValue::from("abc")));
        assert_eq!(IdValue::from_json(&json!(2)), Some(IdValue::from(2)));
        assert_eq!(IdValue::from_json(&json!(2.0)), Some(IdValue::from(2)));
        assert_eq!(IdValue::from_json(&json!(2.5)), Some(IdValue::Float(2.5)));
        assert_eq!(IdValue::from_json(&json!(null)), Some(IdValue::Null));
        assert_eq!(IdValue::from_json(&json!(true)), Some(IdValue::Bool(true)));
        assert_eq!(
            IdValue::from_json(&json!(u64::MAX)),
            Some(IdValue::Unsigned(u64::MAX))
        );
        assert_eq!(IdValue::from_json(&json!(["a"])), None);
        assert_eq!(IdValue::from_json(&json!({ "a": 1 })), None);
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(IdValue::Float(2.0), IdValue::Integer(2));
        assert_eq!(IdValue::Integer(7), IdValue::Unsigned(7));
        assert_eq!(IdValue::Float(2.5), IdValue::from(2.5));
        assert_ne!(IdValue::Float(2.5), IdValue::Integer(2));
        assert_ne!(IdValue::Unsigned(u64::MAX), IdValue::Integer(-1));
    }

    #[test]
    fn test_kinds_never_cross_match() {
        assert_ne!(IdValue::Bool(true), IdValue::Integer(1));
        assert_ne!(IdValue::Null, IdValue::Integer(0));
        assert_ne!(IdValue::Null, IdValue::from("null"));
        assert_eq!(IdValue::Null, IdValue::Null);
    }

    #[test]
    fn test_id_value_equality_is_type_aware() {
        assert_ne!(IdValue::from(2), IdValue::from("2"));
        assert_eq!(IdValue::from(2).to_string(), IdValue::from("2").to_string());
    }

    #[test]
    fn test_signature() {
        let spatem = Spatem::new("aa:bb:cc:dd:ee:ff", 2);
        assert_eq!(spatem.signature().as_deref(), Some("aa:bb:cc:dd:ee:ff/2"));
        assert_eq!(Spatem::new("abc", 2.5).signature().as_deref(), Some("abc/2.5"));
        assert_eq!(Spatem::new("abc", true).signature().as_deref(), Some("abc/true"));

        let partial = Spatem {
            device_id: Some(IdValue::from("aa:bb:cc:dd:ee:ff")),
            ..Spatem::default()
        };
        assert_eq!(partial.signature(), None);
    }

    #[test]
    fn test_deserialize_keeps_other_fields() {
        let spatem: Spatem = serde_json::from_value(json!({
            "deviceId": "fee150bada55",
            "deviceIdType": 3,
            "type": "location",
            "data": { "features": [] }
        }))
        .unwrap();

        assert_eq!(spatem.device_id, Some(IdValue::from("fee150bada55")));
        assert_eq!(spatem.device_id_type, Some(IdValue::from(3)));
        assert_eq!(spatem.other.get("type"), Some(&json!("location")));
        assert!(spatem.other.contains_key("data"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_and_odd_fields() {
        let empty: Spatem = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.device_id, None);
        assert_eq!(empty.device_id_type, None);

        let odd: Spatem = serde_json::from_value(json!({
            "deviceId": null,
            "deviceIdType": { "nested": true }
        }))
        .unwrap();
        assert_eq!(odd.device_id, Some(IdValue::Null));
        assert_eq!(odd.device_id_type, None);
    }
}
