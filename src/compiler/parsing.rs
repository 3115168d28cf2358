use crate::ast::{Expression, Value};
use crate::error::RuleError;
use ahash::AHashMap;

/// A rule-function argument after lowering, tagged with what it was in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedArgument {
    /// A nested rule function, lowered to a boolean expression.
    Condition(Expression),
    /// A `{field}` / `{value}` / `{section}` operand.
    Operand(Expression),
}

/// Defines the contract for parsing a specific `func` name into an `Expression`.
pub trait FunctionParser: Send + Sync {
    fn func_name(&self) -> &str;
    fn parse(&self, args: Vec<ParsedArgument>) -> Result<Expression, RuleError>;
}

/// Helper to check for exactly two operand arguments.
fn require_operand_pair(
    args: Vec<ParsedArgument>,
    func: &str,
) -> Result<(Expression, Expression), RuleError> {
    let found = args.len();
    let mut operands = args.into_iter().enumerate().map(|(index, arg)| match arg {
        ParsedArgument::Operand(expr) => Ok(expr),
        ParsedArgument::Condition(_) => Err(RuleError::ExpectedOperand {
            func: func.to_string(),
            index,
        }),
    });
    match (operands.next(), operands.next(), found) {
        (Some(l), Some(r), 2) => Ok((l?, r?)),
        _ => Err(RuleError::ArityMismatch {
            func: func.to_string(),
            expected: 2,
            found,
        }),
    }
}

/// Helper to check that every argument is a nested function.
fn require_conditions(args: Vec<ParsedArgument>, func: &str) -> Result<Vec<Expression>, RuleError> {
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            ParsedArgument::Condition(expr) => Ok(expr),
            ParsedArgument::Operand(_) => Err(RuleError::ExpectedFunction {
                func: func.to_string(),
                index,
            }),
        })
        .collect()
}

/// Folds n-ary logical arguments into left-nested binary nodes.
fn fold_conditions(
    conditions: Vec<Expression>,
    identity: bool,
    combine: fn(Box<Expression>, Box<Expression>) -> Expression,
) -> Expression {
    conditions
        .into_iter()
        .reduce(|acc, next| combine(Box::new(acc), Box::new(next)))
        .unwrap_or(Expression::Literal(Value::Bool(identity)))
}

/// Master macro to define all standard function parsers, their registration, and their creation.
macro_rules! define_function_parsers {
    ( $( ($struct_name:ident, $func:literal, Comparison, $variant:path) ),* $(,)? ; $( ($lg_struct_name:ident, $lg_func:literal, Logical, $lg_variant:path, $identity:expr) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl FunctionParser for $struct_name {
                fn func_name(&self) -> &str { $func }
                fn parse(&self, args: Vec<ParsedArgument>) -> Result<Expression, RuleError> {
                    require_operand_pair(args, $func).map(|(l, r)| $variant(Box::new(l), Box::new(r)))
                }
            }
        )*
        $(
            struct $lg_struct_name;
            impl FunctionParser for $lg_struct_name {
                fn func_name(&self) -> &str { $lg_func }
                fn parse(&self, args: Vec<ParsedArgument>) -> Result<Expression, RuleError> {
                    require_conditions(args, $lg_func)
                        .map(|c| fold_conditions(c, $identity, $lg_variant))
                }
            }
        )*

        pub(super) fn register_default_parsers(registry: &mut AHashMap<String, Box<dyn FunctionParser>>) {
            $( registry.insert($func.to_string(), Box::new($struct_name)); )*
            $( registry.insert($lg_func.to_string(), Box::new($lg_struct_name)); )*
        }

        pub(super) fn create_parser_by_name(name: &str) -> Option<Box<dyn FunctionParser>> {
            match name {
                $( $func => Some(Box::new($struct_name)), )*
                $( $lg_func => Some(Box::new($lg_struct_name)), )*
                _ => None,
            }
        }
    };
}

define_function_parsers! {
    (IsParser, "is", Comparison, Expression::Equal),

    ;

    (AndParser, "and", Logical, Expression::And, true),
    (OrParser, "or", Logical, Expression::Or, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::InputSource;

    fn operand(name: &str) -> ParsedArgument {
        ParsedArgument::Operand(Expression::Input(InputSource::Field {
            api_name: name.to_string(),
        }))
    }

    #[test]
    fn is_rejects_wrong_arity() {
        let err = IsParser.parse(vec![operand("a")]).unwrap_err();
        assert_eq!(
            err,
            RuleError::ArityMismatch {
                func: "is".to_string(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn logical_parsers_reject_operands() {
        let err = OrParser.parse(vec![operand("a")]).unwrap_err();
        assert_eq!(
            err,
            RuleError::ExpectedFunction {
                func: "or".to_string(),
                index: 0,
            }
        );
    }

    #[test]
    fn empty_logical_functions_fold_to_identity() {
        assert_eq!(
            AndParser.parse(vec![]).unwrap(),
            Expression::Literal(Value::Bool(true))
        );
        assert_eq!(
            OrParser.parse(vec![]).unwrap(),
            Expression::Literal(Value::Bool(false))
        );
    }

    #[test]
    fn lookup_by_name() {
        assert!(create_parser_by_name("and").is_some());
        assert!(create_parser_by_name("xor").is_none());
    }
}
