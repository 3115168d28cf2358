//! Tests for rule compilation and evaluation against form values.
mod common;
use common::*;
use jouken::prelude::*;
use pretty_assertions::assert_eq;

fn fulfilled_status_rules() -> Vec<Rule> {
    ConditionExtractor::builder()
        .with_dependents(DependentPolicy::Fulfill)
        .build()
        .extract_from(status_layout())
        .unwrap()
}

#[test]
fn test_extracted_rule_is_fulfilled_by_matching_value() {
    let evaluator = Evaluator::from_rules(&fulfilled_status_rules(), &RuleCompiler::default())
        .expect("Failed to compile");

    let values: FormValues = [("status", "Open")].into_iter().collect();
    let outcomes = evaluator.eval(&values).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].fulfilled);
    assert_eq!(outcomes[0].effects, vec![RuleFunction::allow("x", "y")]);
    assert_eq!(outcomes[0].reason, "$status (was \"Open\") == \"Open\"");
}

#[test]
fn test_extracted_rule_is_rejected_by_other_value() {
    let mut rules = fulfilled_status_rules();
    rules[0].rejected = vec![RuleFunction::new(
        "hide",
        vec![Operand::field("x").into()],
    )];
    let evaluator = Evaluator::from_rules(&rules, &RuleCompiler::default()).unwrap();

    let values: FormValues = [("status", "Closed")].into_iter().collect();
    let outcome = &evaluator.eval(&values).unwrap()[0];

    assert!(!outcome.fulfilled);
    assert_eq!(outcome.effects, rules[0].rejected);
}

#[test]
fn test_nested_logic_with_short_circuit_reason() {
    let rule = Rule::new(RuleFunction::new(
        "or",
        vec![
            RuleFunction::is("kind", "company").into(),
            RuleFunction::new(
                "and",
                vec![
                    RuleFunction::is("kind", "person").into(),
                    RuleFunction::is("country", "DE").into(),
                ],
            )
            .into(),
        ],
    ));
    let evaluator = Evaluator::from_rules(&[rule], &RuleCompiler::default()).unwrap();

    let company: FormValues = [("kind", "company")].into_iter().collect();
    let outcome = &evaluator.eval(&company).unwrap()[0];
    assert!(outcome.fulfilled);
    assert_eq!(outcome.reason, "$kind (was \"company\") == \"company\"");

    let person_fr: FormValues = [("kind", "person"), ("country", "FR")]
        .into_iter()
        .collect();
    let outcome = &evaluator.eval(&person_fr).unwrap()[0];
    assert!(!outcome.fulfilled);
    assert_eq!(
        outcome.reason,
        "$kind (was \"person\") == \"company\" OR \
         $kind (was \"person\") == \"person\" AND $country (was \"FR\") == \"DE\""
    );
}

#[test]
fn test_updated_fields_select_rules() {
    let rules = ConditionExtractor::default()
        .extract_from(mixed_layout())
        .unwrap();
    let evaluator = Evaluator::from_rules(&rules, &RuleCompiler::default()).unwrap();
    let values: FormValues = [("kind", "person"), ("country", "DE")]
        .into_iter()
        .collect();

    let outcomes = evaluator.eval_updated(&values, &["country"]).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].rule_index, 2);
    assert!(outcomes[0].fulfilled);

    let outcomes = evaluator.eval_updated(&values, &["kind"]).unwrap();
    let indices: Vec<_> = outcomes.iter().map(|o| o.rule_index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(
        outcomes.iter().map(|o| o.fulfilled).collect::<Vec<_>>(),
        vec![false, true]
    );

    assert!(evaluator.eval_updated(&values, &["notes"]).unwrap().is_empty());
}

#[test]
fn test_conjunction_needs_every_branch_touched() {
    let condition = RuleFunction::new(
        "and",
        vec![
            RuleFunction::is("a", "1").into(),
            RuleFunction::is("b", "2").into(),
        ],
    );
    let evaluator =
        Evaluator::from_rules(&[Rule::new(condition)], &RuleCompiler::default()).unwrap();
    let values = FormValues::new();

    assert!(evaluator.eval_updated(&values, &["a"]).unwrap().is_empty());
    assert_eq!(evaluator.eval_updated(&values, &["a", "b"]).unwrap().len(), 1);
}

#[test]
fn test_unknown_function_fails_compilation() {
    let rule = Rule::new(RuleFunction::new("matches", vec![]));
    let err = Evaluator::from_rules(&[rule], &RuleCompiler::default())
        .err()
        .expect("compilation should fail");
    assert_eq!(err, RuleError::UnknownFunction("matches".to_string()));
}

#[test]
fn test_initial_values_drive_evaluation() {
    let document = LayoutLoader::from_str(&mixed_layout().to_string()).unwrap();
    let rules = ConditionExtractor::default().extract(&document).unwrap();
    let evaluator = Evaluator::from_rules(&rules, &RuleCompiler::default()).unwrap();

    let values = initial_values(&document, &FormValues::new());
    assert_eq!(values.get("kind"), Some("company"));
    assert_eq!(values.get("country"), Some("FR"));
    // Text fields with pick-list values still start on the first value.
    assert_eq!(values.get("notes"), Some("ignored"));

    let fulfilled: Vec<_> = evaluator
        .eval(&values)
        .unwrap()
        .into_iter()
        .map(|o| o.fulfilled)
        .collect();
    assert_eq!(fulfilled, vec![true, false, false]);
}
