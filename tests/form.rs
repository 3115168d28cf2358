//! Tests for driving form state with maps, extracted rules and layout rules.
use jouken::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn contact_layout() -> Document {
    json!({
        "sections": [
            { "id": "contact", "fields": [
                { "data_type": "pick_list", "api_name": "kind", "pick_list_values": [
                    { "actual_value": "company", "maps": [{ "api_name": "vat_number", "visible": true }] },
                    { "actual_value": "person", "maps": [{ "api_name": "vat_number", "visible": false }] }
                ] },
                { "data_type": "text", "api_name": "vat_number", "required": true, "visible": false },
                { "data_type": "pick_list", "api_name": "country", "pick_list_values": [
                    { "actual_value": "FR" },
                    { "actual_value": "DE", "maps": [{ "api_name": "city", "pick_list_values": [
                        { "actual_value": "Berlin" },
                        { "actual_value": "Hamburg" }
                    ] }] }
                ] },
                { "data_type": "pick_list", "api_name": "city", "required": true, "pick_list_values": [
                    { "actual_value": "Paris" },
                    { "actual_value": "Berlin" },
                    { "actual_value": "Hamburg" },
                    { "actual_value": "Munich" }
                ] }
            ] },
            { "id": "extra", "fields": [
                { "data_type": "text", "api_name": "newsletter" }
            ] }
        ],
        "rules": [{
            "conditions": [{ "func": "is", "args": [{ "field": "kind" }, { "value": "company" }] }],
            "fulfilled": [{ "func": "hide", "args": [{ "section": "extra" }] }],
            "rejected": [{ "func": "show", "args": [{ "section": "extra" }] }]
        }]
    })
    .into_layout()
    .expect("layout should be valid")
}

fn evaluator_for(document: &Document) -> Evaluator {
    let mut rules = ConditionExtractor::builder()
        .with_dependents(DependentPolicy::Fulfill)
        .build()
        .extract(document)
        .expect("Failed to extract");
    rules.extend(document.rules.iter().cloned());
    Evaluator::from_rules(&rules, &RuleCompiler::default()).expect("Failed to compile")
}

fn offered(state: &FormState, api_name: &str) -> Vec<String> {
    state
        .allowed_values(api_name)
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.actual_value.clone())
        .collect()
}

#[test]
fn test_starting_state_applies_maps_and_layout_rules() {
    let document = contact_layout();
    let evaluator = evaluator_for(&document);
    let state = FormState::new(&document, &evaluator, &FormValues::new()).unwrap();

    assert_eq!(state.value("kind"), Some("company"));
    assert_eq!(state.value("city"), Some("Paris"));
    assert!(state.is_field_visible("vat_number"));
    assert!(!state.is_section_visible("extra"));
    assert!(!state.is_field_visible("newsletter"));
    assert_eq!(offered(&state, "city").len(), 4);

    assert!(!state.is_valid());
    assert_eq!(state.missing_required(), vec!["vat_number"]);
}

#[test]
fn test_choices_restrict_dependent_values() {
    let document = contact_layout();
    let evaluator = evaluator_for(&document);
    let mut state = FormState::new(&document, &evaluator, &FormValues::new()).unwrap();

    state.set_value("country", "DE").unwrap();
    assert_eq!(offered(&state, "city"), vec!["Berlin", "Hamburg"]);
    assert_eq!(offered(&state, "country"), vec!["FR", "DE"]);
}

#[test]
fn test_hidden_required_fields_do_not_block_validity() {
    let document = contact_layout();
    let evaluator = evaluator_for(&document);
    let mut state = FormState::new(&document, &evaluator, &FormValues::new()).unwrap();

    state.set_value("kind", "person").unwrap();
    assert!(!state.is_field_visible("vat_number"));
    assert!(state.is_section_visible("extra"));
    assert!(state.is_valid());

    state.set_value("kind", "company").unwrap();
    assert!(!state.is_valid());
    state.set_value("vat_number", "DE123456789").unwrap();
    assert!(state.is_valid());
    assert_eq!(state.values().len(), 4);
}
