//! Common test utilities for building layout documents and form values.
use jouken::prelude::*;
use serde_json::{Value as Json, json};

/// The single-field layout used throughout the extraction tests.
///
/// `status` is a pick list whose `Open` value maps onto a dependent value and
/// whose `Closed` value declares no maps.
#[allow(dead_code)]
pub fn status_layout() -> Json {
    json!({
        "sections": [{
            "fields": [{
                "data_type": "pick_list",
                "api_name": "status",
                "pick_list_values": [
                    {
                        "actual_value": "Open",
                        "maps": [{ "pick_list_values": [{ "api_name": "x", "actual_value": "y" }] }]
                    },
                    { "actual_value": "Closed" }
                ]
            }]
        }]
    })
}

/// A two-section layout mixing pick lists, text fields and the legacy
/// `picklist` spelling.
///
/// Mapped values, in document order: `kind=company`, `kind=person`,
/// `country=DE`, `legacy=on` (the last only when `picklist` is accepted).
#[allow(dead_code)]
pub fn mixed_layout() -> Json {
    json!({
        "sections": [
            {
                "id": "general",
                "name": "General",
                "fields": [
                    { "data_type": "text", "api_name": "notes", "default_value": "none",
                      "pick_list_values": [{ "actual_value": "ignored", "maps": [] }] },
                    {
                        "data_type": "pick_list",
                        "api_name": "kind",
                        "pick_list_values": [
                            { "actual_value": "company", "maps": [
                                { "api_name": "vat_number", "visible": true }
                            ] },
                            { "actual_value": "person", "maps": [] },
                            { "actual_value": "other" }
                        ]
                    }
                ]
            },
            {
                "id": "address",
                "name": "Address",
                "fields": [
                    {
                        "data_type": "pick_list",
                        "api_name": "country",
                        "pick_list_values": [
                            { "actual_value": "FR" },
                            { "actual_value": "DE", "maps": [
                                { "api_name": "city", "pick_list_values": [
                                    { "actual_value": "Berlin" },
                                    { "actual_value": "Hamburg" }
                                ] }
                            ] }
                        ]
                    },
                    {
                        "data_type": "picklist",
                        "api_name": "legacy",
                        "pick_list_values": [{ "actual_value": "on", "maps": [] }]
                    }
                ]
            }
        ]
    })
}

/// Builds the `(field, value)` pairs of the `is` conditions of `rules`.
#[allow(dead_code)]
pub fn condition_pairs(rules: &[Rule]) -> Vec<(String, String)> {
    rules
        .iter()
        .map(|rule| {
            assert_eq!(rule.conditions.func, "is");
            let operand = |i: usize| match &rule.conditions.args[i] {
                RuleArgument::Operand(op) => op.clone(),
                other => panic!("expected operand, got {:?}", other),
            };
            (
                operand(0).field.expect("field operand"),
                operand(1).value.expect("value operand"),
            )
        })
        .collect()
}

#[allow(dead_code)]
pub fn pair(field: &str, value: &str) -> (String, String) {
    (field.to_string(), value.to_string())
}
