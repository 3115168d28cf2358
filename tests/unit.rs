//! Unit tests for core Jouken types.
mod common;
use jouken::prelude::*;
use std::collections::HashSet;

#[test]
fn test_value_display() {
    assert_eq!(format!("{}", Value::from("Open")), "\"Open\"");
    assert_eq!(format!("{}", Value::Bool(true)), "true");
    assert_eq!(format!("{}", Value::Null), "null");
}

#[test]
fn test_input_source_display() {
    let source = InputSource::Field {
        api_name: "status".to_string(),
    };
    assert_eq!(format!("{}", source), "$status");
}

#[test]
fn test_expression_required_fields() {
    let expr = Expression::Or(
        Box::new(Expression::Equal(
            Box::new(Expression::Input(InputSource::Field {
                api_name: "kind".to_string(),
            })),
            Box::new(Expression::Literal(Value::from("company"))),
        )),
        Box::new(Expression::Equal(
            Box::new(Expression::Input(InputSource::Field {
                api_name: "country".to_string(),
            })),
            Box::new(Expression::Input(InputSource::Field {
                api_name: "kind".to_string(),
            })),
        )),
    );

    let mut fields = HashSet::new();
    expr.get_required_fields(&mut fields);
    assert_eq!(fields.len(), 2);
    assert!(fields.contains("kind"));
    assert!(fields.contains("country"));
}

#[test]
fn test_trace_formatter_short_circuit() {
    let trace = EvaluationTrace::BinaryOp {
        op_symbol: "OR",
        left: Box::new(EvaluationTrace::Leaf {
            source: "true".to_string(),
            value: Value::Bool(true),
        }),
        right: Box::new(EvaluationTrace::NotEvaluated),
        outcome: Value::Bool(true),
    };

    let formatted = TraceFormatter::format_trace(&trace);
    assert_eq!(formatted, "true");
}

#[test]
fn test_error_display() {
    let err = LayoutError::MissingField {
        path: "sections[2].fields[0]".to_string(),
        key: "api_name".to_string(),
    };
    assert!(err.to_string().contains("sections[2].fields[0]"));
    assert!(err.to_string().contains("api_name"));

    let rule_err = RuleError::ArityMismatch {
        func: "is".to_string(),
        expected: 2,
        found: 3,
    };
    assert!(rule_err.to_string().contains("'is'"));
    assert!(rule_err.to_string().contains("received 3"));

    let eval_err = EvaluationError::TypeMismatch {
        operation: "AND".to_string(),
        expected: "Bool".to_string(),
        found: Value::from("yes"),
    };
    assert!(eval_err.to_string().contains("AND"));
    assert!(eval_err.to_string().contains("Bool"));
    assert!(eval_err.to_string().contains("yes"));
}

#[test]
fn test_document_path_display() {
    let path = DocumentPath::field(1, 3).key("pick_list_values").index(0);
    assert_eq!(path.to_string(), "sections[1].fields[3].pick_list_values[0]");
}
