//! Typed property values and the raw values the host delivers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Property name -> stored value.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A coerced, typed property value.
///
/// Enum members and colors are stored as [`PropertyValue::Text`]; the
/// schema descriptor carries the finer-grained kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Whole number (integer-valued ranges such as `fontSize`).
    Integer(i64),
    /// Real number.
    Number(f64),
    /// Boolean flag.
    Boolean(bool),
    /// String, enum member, or color.
    Text(String),
}

impl PropertyValue {
    /// Numeric view of the value, if it is a number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            Self::Boolean(_) | Self::Text(_) => None,
        }
    }

    /// Boolean view of the value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// String view of the value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Uncoerced input from a form control.
///
/// Checkboxes report a boolean; every other control reports its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Checkbox state.
    Bool(bool),
    /// Text of an input, select, or color control.
    Text(String),
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_control_text() {
        assert_eq!(PropertyValue::Integer(16).to_string(), "16");
        assert_eq!(PropertyValue::Number(1.0).to_string(), "1");
        assert_eq!(PropertyValue::Number(2.5).to_string(), "2.5");
        assert_eq!(PropertyValue::Boolean(true).to_string(), "true");
        assert_eq!(PropertyValue::Text("#dddddd".into()).to_string(), "#dddddd");
    }

    #[test]
    fn test_raw_value_from_json() {
        let raw: RawValue = serde_json::from_str("true").expect("bool");
        assert_eq!(raw, RawValue::Bool(true));
        let raw: RawValue = serde_json::from_str("\"24\"").expect("string");
        assert_eq!(raw, RawValue::Text("24".into()));
        assert!(serde_json::from_str::<RawValue>("24").is_err());
    }

    #[test]
    fn test_property_value_json_shape() {
        let json = serde_json::to_string(&PropertyValue::Integer(16)).expect("serialize");
        assert_eq!(json, "16");
        let json = serde_json::to_string(&PropertyValue::Text("Arial".into())).expect("serialize");
        assert_eq!(json, "\"Arial\"");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(PropertyValue::Integer(8).as_f64(), Some(8.0));
        assert_eq!(PropertyValue::Boolean(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::Text("x".into()).as_str(), Some("x"));
        assert_eq!(PropertyValue::Text("x".into()).as_f64(), None);
    }
}
