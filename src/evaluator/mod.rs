use crate::ast::Value;
use crate::compiler::{CompiledRule, RuleCompiler};
use crate::data::FormValues;
use crate::error::{EvaluationError, RuleError};
use crate::rule::{Rule, RuleFunction};
use crate::trace::TraceFormatter;
use tracing::debug;

mod engine;

use engine::AstEngine;

/// The result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Position of the rule in the list the evaluator was built from.
    pub rule_index: usize,
    /// Whether the rule's conditions held.
    pub fulfilled: bool,
    /// The rule's `fulfilled` effects if the conditions held, otherwise its `rejected` ones.
    pub effects: Vec<RuleFunction>,
    /// A human-readable explanation of the logic that led to the result.
    pub reason: String,
}

/// Evaluates compiled rules against form values.
///
/// An `Evaluator` holds no mutable state and can be reused for any number of
/// value sets.
pub struct Evaluator {
    rules: Vec<CompiledRule>,
}

impl Evaluator {
    pub fn new(rules: Vec<CompiledRule>) -> Self {
        Self { rules }
    }

    /// Compiles `rules` with `compiler` and wraps them in an evaluator.
    pub fn from_rules(rules: &[Rule], compiler: &RuleCompiler) -> Result<Self, RuleError> {
        Ok(Self::new(compiler.compile_all(rules)?))
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Evaluates every rule, in order.
    pub fn eval(&self, values: &FormValues) -> Result<Vec<RuleOutcome>, EvaluationError> {
        self.rules
            .iter()
            .map(|rule| Self::eval_rule(rule, values))
            .collect()
    }

    /// Evaluates only the rules whose conditions can be affected by a change
    /// to one of the `updated` fields.
    pub fn eval_updated(
        &self,
        values: &FormValues,
        updated: &[&str],
    ) -> Result<Vec<RuleOutcome>, EvaluationError> {
        self.rules
            .iter()
            .filter(|rule| rule.condition.is_touched_by(updated))
            .map(|rule| Self::eval_rule(rule, values))
            .collect()
    }

    fn eval_rule(rule: &CompiledRule, values: &FormValues) -> Result<RuleOutcome, EvaluationError> {
        let trace = AstEngine::new(&rule.condition, values).evaluate()?;
        let fulfilled = match trace.get_outcome() {
            Value::Bool(b) => b,
            other => {
                return Err(EvaluationError::TypeMismatch {
                    operation: "rule condition".to_string(),
                    expected: "Bool".to_string(),
                    found: other,
                });
            }
        };
        let reason = TraceFormatter::format_trace(&trace);
        debug!(rule = rule.index, fulfilled, %reason, "evaluated rule");

        let effects = if fulfilled {
            rule.fulfilled.clone()
        } else {
            rule.rejected.clone()
        };
        Ok(RuleOutcome {
            rule_index: rule.index,
            fulfilled,
            effects,
            reason,
        })
    }
}
