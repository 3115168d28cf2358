use crate::ast::{EvaluationTrace, Expression, InputSource, Value};
use crate::data::FormValues;
use crate::error::EvaluationError;

/// The core recursive engine for evaluating a single condition against form values.
pub(super) struct AstEngine<'a> {
    expression: &'a Expression,
    values: &'a FormValues,
}

impl<'a> AstEngine<'a> {
    pub(super) fn new(expression: &'a Expression, values: &'a FormValues) -> Self {
        Self { expression, values }
    }

    /// Evaluates the AST and returns a trace of the execution.
    pub(super) fn evaluate(&self) -> Result<EvaluationTrace, EvaluationError> {
        self.evaluate_recursive(self.expression)
    }

    fn evaluate_recursive(&self, expr: &Expression) -> Result<EvaluationTrace, EvaluationError> {
        match expr {
            Expression::Equal(l, r) => {
                let left_trace = self.evaluate_recursive(l)?;
                let right_trace = self.evaluate_recursive(r)?;
                let outcome = Value::Bool(left_trace.get_outcome() == right_trace.get_outcome());
                Ok(EvaluationTrace::BinaryOp {
                    op_symbol: "==",
                    left: Box::new(left_trace),
                    right: Box::new(right_trace),
                    outcome,
                })
            }

            // --- Logical Operations ---
            Expression::And(l, r) => self.eval_logical(l, r, "AND", false),
            Expression::Or(l, r) => self.eval_logical(l, r, "OR", true),

            Expression::Literal(val) => Ok(EvaluationTrace::Leaf {
                source: val.to_string(),
                value: val.clone(),
            }),
            Expression::Input(source) => {
                let value = match source {
                    InputSource::Field { api_name } => self
                        .values
                        .get(api_name)
                        .map(Value::from)
                        .unwrap_or(Value::Null),
                };
                Ok(EvaluationTrace::Leaf {
                    source: source.to_string(),
                    value,
                })
            }
        }
    }

    /// Evaluates a short-circuiting operator. When the left side equals
    /// `short_circuit_on`, the right side is not evaluated.
    fn eval_logical(
        &self,
        l: &Expression,
        r: &Expression,
        op: &'static str,
        short_circuit_on: bool,
    ) -> Result<EvaluationTrace, EvaluationError> {
        let left_trace = self.evaluate_recursive(l)?;
        let left_value = match left_trace.get_outcome() {
            Value::Bool(b) => b,
            other => return Err(self.type_mismatch(op, "Bool", other)),
        };
        if left_value == short_circuit_on {
            return Ok(EvaluationTrace::BinaryOp {
                op_symbol: op,
                left: Box::new(left_trace),
                right: Box::new(EvaluationTrace::NotEvaluated),
                outcome: Value::Bool(short_circuit_on),
            });
        }

        let right_trace = self.evaluate_recursive(r)?;
        let outcome = match right_trace.get_outcome() {
            Value::Bool(b) => Value::Bool(b),
            other => return Err(self.type_mismatch(op, "Bool", other)),
        };
        Ok(EvaluationTrace::BinaryOp {
            op_symbol: op,
            left: Box::new(left_trace),
            right: Box::new(right_trace),
            outcome,
        })
    }

    fn type_mismatch(&self, op: &str, expected: &str, found: Value) -> EvaluationError {
        EvaluationError::TypeMismatch {
            operation: op.to_string(),
            expected: expected.to_string(),
            found,
        }
    }
}
