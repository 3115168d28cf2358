use super::{InputSource, Value};
use std::collections::HashSet;
use std::fmt;

/// The Abstract Syntax Tree representing a compiled rule condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    // Logical
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),

    // Comparison
    Equal(Box<Expression>, Box<Expression>),

    // Leaf nodes
    Literal(Value),
    Input(InputSource),
}

impl Expression {
    /// Collects every field `api_name` read by this expression.
    pub fn get_required_fields(&self, fields: &mut HashSet<String>) {
        match self {
            Expression::Input(InputSource::Field { api_name }) => {
                fields.insert(api_name.clone());
            }
            Expression::And(l, r) | Expression::Or(l, r) | Expression::Equal(l, r) => {
                l.get_required_fields(fields);
                r.get_required_fields(fields);
            }
            Expression::Literal(_) => {}
        }
    }

    /// Whether a change to any of `updated` can alter the outcome of this condition.
    ///
    /// An equality is touched when one of its field operands was updated. A
    /// conjunction needs both sides touched, a disjunction only one.
    pub fn is_touched_by(&self, updated: &[&str]) -> bool {
        match self {
            Expression::Equal(l, r) => [l.as_ref(), r.as_ref()].into_iter().any(|side| {
                matches!(side, Expression::Input(InputSource::Field { api_name })
                    if updated.contains(&api_name.as_str()))
            }),
            Expression::And(l, r) => l.is_touched_by(updated) && r.is_touched_by(updated),
            Expression::Or(l, r) => l.is_touched_by(updated) || r.is_touched_by(updated),
            // Folded empty conjunctions are vacuously touched, empty disjunctions never.
            Expression::Literal(Value::Bool(b)) => *b,
            Expression::Literal(_) | Expression::Input(_) => false,
        }
    }

    /// Gets the precedence level for an expression type. Higher numbers bind more tightly.
    fn precedence(&self) -> u8 {
        match self {
            Expression::Or(_, _) => 1,
            Expression::And(_, _) => 2,
            Expression::Equal(_, _) => 4,
            Expression::Literal(_) | Expression::Input(_) => 9,
        }
    }

    fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, parent_precedence: u8) -> fmt::Result {
        let current_precedence = self.precedence();
        let needs_parens = current_precedence < parent_precedence;

        if needs_parens {
            write!(f, "(")?;
        }

        match self {
            Expression::Or(l, r) => self.fmt_binary(f, "OR", l, r, current_precedence)?,
            Expression::And(l, r) => self.fmt_binary(f, "AND", l, r, current_precedence)?,
            Expression::Equal(l, r) => self.fmt_binary(f, "==", l, r, current_precedence)?,
            Expression::Literal(v) => write!(f, "{}", v)?,
            Expression::Input(s) => write!(f, "{}", s)?,
        }

        if needs_parens {
            write!(f, ")")?;
        }
        Ok(())
    }

    fn fmt_binary(
        &self,
        f: &mut fmt::Formatter<'_>,
        op: &str,
        l: &Expression,
        r: &Expression,
        current_precedence: u8,
    ) -> fmt::Result {
        l.fmt_with_precedence(f, current_precedence)?;
        write!(f, " {} ", op)?;
        r.fmt_with_precedence(f, current_precedence)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_precedence(f, 0)
    }
}
