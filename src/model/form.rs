//! Raw form input and its JSON request body.
use serde_json::{Map, Value};

/// Ordered `name → value` pairs as submitted from a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    fields: Vec<(String, String)>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.set(name, value);
        }
        form
    }

    /// Set a field, replacing any earlier value with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// JSON body for `POST /generate-report`.
    ///
    /// All fields are sent as strings except `budget` (float) and `duration`
    /// (integer), which are always present and coerce to `0` when missing or
    /// unparseable.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in self.iter() {
            map.insert(name.to_string(), Value::String(value.to_string()));
        }
        map.insert("budget".to_string(), Value::from(coerce_float(self.get("budget"))));
        map.insert("duration".to_string(), Value::from(coerce_int(self.get("duration"))));
        Value::Object(map)
    }

    /// JSON body with every field as a string (credential forms).
    pub fn to_string_map(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(n, v)| (n.to_string(), Value::String(v.to_string())))
            .collect();
        Value::Object(map)
    }
}

/// Parse a float, falling back to `0.0`.
pub fn coerce_float(value: Option<&str>) -> f64 {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Parse an integer, falling back to `0`.
pub fn coerce_int(value: Option<&str>) -> i64 {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0)
}
