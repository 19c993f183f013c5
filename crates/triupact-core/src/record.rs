//! Raw API records and their canonical, render-ready form.
//!
//! # Design
//! - Raw records stay untouched JSON maps; nothing mutates them after fetch.
//! - Canonical records keep insertion order so columns render deterministically.
//! - Absent values turn into the placeholder only when displayed.

use serde_json::{Map, Value};

/// Record exactly as returned by an endpoint.
pub type RawRecord = Map<String, Value>;

/// Text shown for absent or blank values.
pub const PLACEHOLDER: &str = "-";

/// Single canonical field value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Absent or JSON `null`.
    Null,
    /// String value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Array or object, kept verbatim.
    Nested(Value),
}

impl FieldValue {
    /// Convert a JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(_) | Value::Object(_) => Self::Nested(value.clone()),
        }
    }

    /// Convert back into JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(text) => Value::String(text.clone()),
            Self::Number(number) => serde_json::Number::from_f64(*number)
                .map_or(Value::Null, Value::Number),
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Nested(value) => value.clone(),
        }
    }

    /// `true` for null values.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` for null values and whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Plain text form; empty for null.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(number) => format_number(*number),
            Self::Bool(flag) => flag.to_string(),
            Self::Nested(value) => serde_json::to_string(value).unwrap_or_default(),
        }
    }

    /// Text for display, substituting the placeholder for blank values.
    #[must_use]
    pub fn display(&self) -> String {
        if self.is_blank() {
            PLACEHOLDER.to_string()
        } else {
            self.as_text()
        }
    }

    /// Numeric interpretation when the value is a number or numeric text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite()),
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
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Normalised record a list view operates on.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalRecord {
    id: FieldValue,
    fields: Vec<(String, FieldValue)>,
}

impl CanonicalRecord {
    /// Start a record with the given identifier.
    #[must_use]
    pub const fn new(id: FieldValue) -> Self {
        Self {
            id,
            fields: Vec::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Insert or replace a field, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Record identifier.
    #[must_use]
    pub const fn id(&self) -> &FieldValue {
        &self.id
    }

    /// Look up a field; `id` resolves to the identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        if name == "id" {
            return Some(&self.id);
        }
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Display text for a field.
    #[must_use]
    pub fn display(&self, name: &str) -> String {
        self.get(name)
            .map_or_else(|| PLACEHOLDER.to_string(), FieldValue::display)
    }

    /// Iterate fields in insertion order, identifier excluded.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// JSON object holding the identifier and every field.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), self.id.to_json());
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.to_json());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values_render_placeholder() {
        assert_eq!(FieldValue::Null.display(), PLACEHOLDER);
        assert_eq!(FieldValue::from("   ").display(), PLACEHOLDER);
        assert_eq!(FieldValue::from("x").display(), "x");
        assert_eq!(FieldValue::from(0_i64).display(), "0");
    }

    #[test]
    fn numbers_render_without_trailing_fraction() {
        assert_eq!(FieldValue::from(42.0).as_text(), "42");
        assert_eq!(FieldValue::from(2.5).as_text(), "2.5");
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(FieldValue::from(" 12 ").as_number(), Some(12.0));
        assert_eq!(FieldValue::from("12a").as_number(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
    }

    #[test]
    fn nested_values_render_as_json() {
        let value = FieldValue::from_json(&json!({"a": [1, 2]}));
        assert_eq!(value.as_text(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut record = CanonicalRecord::new(FieldValue::from(1_i64))
            .with_field("name", "a")
            .with_field("code", "b");
        record.insert("name", FieldValue::from("z"));
        let names: Vec<&str> = record.fields().map(|(key, _)| key).collect();
        assert_eq!(names, vec!["name", "code"]);
        assert_eq!(record.display("name"), "z");
        assert_eq!(record.display("id"), "1");
        assert_eq!(record.display("missing"), PLACEHOLDER);
    }

    #[test]
    fn to_json_includes_identifier_first() {
        let record = CanonicalRecord::new(FieldValue::from("7")).with_field("name", "x");
        assert_eq!(record.to_json(), json!({"id": "7", "name": "x"}));
    }
}
