//! Serde mirror of the layout JSON format.
//!
//! Every key is optional at this level so that missing keys can be reported
//! with their document path during conversion instead of as an opaque serde
//! error.

use crate::error::LayoutError;
use crate::rule::Rule;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<RawSection>>,
    /// Rules bundled with the layout, in the same shape the extractor emits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

impl RawDocument {
    /// Deserializes a raw document, reporting type errors with the document
    /// path of the offending key (e.g. `sections[0].fields[2].pick_list_values`).
    pub fn deserialize_tracked<'de, D>(deserializer: D) -> Result<Self, LayoutError>
    where
        D: Deserializer<'de>,
        D::Error: std::fmt::Display,
    {
        serde_path_to_error::deserialize(deserializer).map_err(|err| {
            let path = err.path().to_string();
            let inner = err.into_inner();
            if path == "." {
                LayoutError::MalformedInput(inner.to_string())
            } else {
                LayoutError::MalformedInput(format!("{}: {}", path, inner))
            }
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<RawField>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_list_values: Option<Vec<RawPickListValue>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPickListValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    /// Outer `Option` records key presence, inner one a literal `null`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub maps: Option<Option<Vec<RawFieldMap>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFieldMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_list_values: Option<Vec<RawPickListValue>>,
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_value(json: &str) -> RawPickListValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn maps_key_presence_is_tracked() {
        assert!(parse_value(r#"{"actual_value": "a"}"#).maps.is_none());
        assert!(matches!(
            parse_value(r#"{"actual_value": "a", "maps": null}"#).maps,
            Some(None)
        ));
        assert!(matches!(
            parse_value(r#"{"actual_value": "a", "maps": []}"#).maps,
            Some(Some(ref maps)) if maps.is_empty()
        ));
    }

    #[test]
    fn wrong_types_report_their_path() {
        let layout = serde_json::json!({
            "sections": [{ "fields": [
                { "data_type": "text", "api_name": "notes" },
                { "data_type": "text", "api_name": "other" },
                { "data_type": "pick_list", "api_name": "status", "pick_list_values": "abc" }
            ] }]
        });
        let err = RawDocument::deserialize_tracked(layout).unwrap_err();
        let LayoutError::MalformedInput(message) = err else {
            panic!("expected malformed input, got {:?}", err);
        };
        assert!(
            message.starts_with("sections[0].fields[2].pick_list_values: invalid type"),
            "unexpected message: {}",
            message
        );
    }

    #[test]
    fn root_level_errors_carry_no_path() {
        let err = RawDocument::deserialize_tracked(serde_json::json!(42)).unwrap_err();
        let LayoutError::MalformedInput(message) = err else {
            panic!("expected malformed input, got {:?}", err);
        };
        assert!(message.starts_with("invalid type"), "unexpected message: {}", message);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let value = parse_value(r#"{"actual_value": "a", "sequence_number": 3, "colour": "red"}"#);
        assert_eq!(value.actual_value.as_deref(), Some("a"));
    }
}
