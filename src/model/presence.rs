//! Lenient field decoding and the loosely-typed [`FieldValue`].
//!
//! Three `deserialize_with` helpers cover every optional field:
//!
//! - [`present`]: JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}`
//!   decode to `None`, as does a value of the wrong shape.
//! - [`lenient`]: only `null` and mis-shaped values decode to `None`; a zero
//!   count is still a count.
//! - [`lenient_or_default`]: like [`lenient`], falling back to `T::default()`.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A display value whose JSON type the backend does not pin down.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    List(Vec<FieldValue>),
    Object(serde_json::Map<String, Value>),
    Empty,
}

impl FieldValue {
    /// Render the value as plain text. Lists are joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
            Self::List(items) => items
                .iter()
                .filter(|item| !matches!(item, Self::Empty))
                .map(Self::display)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Object(map) => serde_json::to_string(map).unwrap_or_default(),
            Self::Empty => String::new(),
        }
    }

    /// Numeric view of the value, if it is a number or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// JSON truthiness, with empty arrays and objects counting as absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Decode an optional field using JSON truthiness.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !is_present(&value) {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Decode an optional field, treating only `null` and mis-shaped values as absent.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Decode a number that may arrive as a JSON number or a numeric string
/// (`"0.85"`). Zero is kept; anything non-numeric is absent.
pub fn numeric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<FieldValue> = lenient(deserializer)?;
    Ok(value.as_ref().and_then(FieldValue::as_f64))
}

/// Decode a field, substituting the default for `null` or mis-shaped values.
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "present")]
        text: Option<FieldValue>,
        #[serde(default, deserialize_with = "present")]
        items: Option<Vec<FieldValue>>,
        #[serde(default, deserialize_with = "lenient")]
        count: Option<f64>,
        #[serde(default, deserialize_with = "lenient_or_default")]
        names: Vec<String>,
    }

    fn decode(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn falsy_values_are_absent() {
        for falsy in [json!(null), json!(""), json!(0), json!(false), json!([]), json!({})] {
            let p = decode(json!({ "text": falsy }));
            assert!(p.text.is_none());
        }
    }

    #[test]
    fn missing_fields_are_absent() {
        let p = decode(json!({}));
        assert!(p.text.is_none());
        assert!(p.items.is_none());
        assert!(p.count.is_none());
        assert!(p.names.is_empty());
    }

    #[test]
    fn non_array_list_is_absent() {
        let p = decode(json!({ "items": "do this, then that" }));
        assert!(p.items.is_none());
    }

    #[test]
    fn list_with_null_items_still_decodes() {
        let p = decode(json!({ "items": ["a", null, "b"] }));
        let items = p.items.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(FieldValue::List(items).display(), "a, b");
    }

    #[test]
    fn lenient_keeps_zero() {
        let p = decode(json!({ "count": 0 }));
        assert_eq!(p.count, Some(0.0));
    }

    #[test]
    fn lenient_drops_wrong_shape() {
        let p = decode(json!({ "count": "lots", "names": 7 }));
        assert!(p.count.is_none());
        assert!(p.names.is_empty());
    }

    #[test]
    fn display_covers_each_shape() {
        assert_eq!(FieldValue::from("hi").display(), "hi");
        assert_eq!(FieldValue::from(42).display(), "42");
        assert_eq!(FieldValue::Flag(true).display(), "true");
        let list: FieldValue = serde_json::from_value(json!(["Search", "Social"])).unwrap();
        assert_eq!(list.display(), "Search, Social");
    }

    #[test]
    fn numeric_strings_read_as_numbers() {
        assert_eq!(FieldValue::from("60").as_f64(), Some(60.0));
        assert_eq!(FieldValue::from(30).as_f64(), Some(30.0));
        assert_eq!(FieldValue::from("n/a").as_f64(), None);
    }
}
