use crate::ast::{Expression, InputSource, Value};
use crate::error::RuleError;
use crate::rule::{Operand, Rule, RuleArgument, RuleFunction};
use ahash::AHashMap;
use tracing::debug;

pub mod parsing;

pub use parsing::{FunctionParser, ParsedArgument};
use parsing::{create_parser_by_name, register_default_parsers};

/// A rule whose condition has been lowered to an [`Expression`], ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    /// Position of the rule in the source list.
    pub index: usize,
    pub condition: Expression,
    pub fulfilled: Vec<RuleFunction>,
    pub rejected: Vec<RuleFunction>,
}

/// Compiles rule functions into expressions through a registry of named parsers.
pub struct RuleCompiler {
    registry: AHashMap<String, Box<dyn FunctionParser>>,
}

pub struct RuleCompilerBuilder {
    registry: AHashMap<String, Box<dyn FunctionParser>>,
}

impl RuleCompilerBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn FunctionParser>> = AHashMap::new();
        register_default_parsers(&mut registry);
        Self { registry }
    }

    /// Makes `user_func` behave like the built-in `builtin_func`.
    pub fn with_function_alias(mut self, user_func: &str, builtin_func: &str) -> Self {
        if let Some(parser) = create_parser_by_name(builtin_func) {
            self.registry.insert(user_func.to_string(), parser);
        }
        self
    }

    pub fn with_custom_parser(mut self, parser: Box<dyn FunctionParser>) -> Self {
        self.registry.insert(parser.func_name().to_string(), parser);
        self
    }

    pub fn build(self) -> RuleCompiler {
        RuleCompiler {
            registry: self.registry,
        }
    }
}

impl Default for RuleCompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for RuleCompiler {
    fn default() -> Self {
        RuleCompilerBuilder::new().build()
    }
}

impl RuleCompiler {
    pub fn builder() -> RuleCompilerBuilder {
        RuleCompilerBuilder::new()
    }

    /// Recursively lowers a rule function and its nested arguments.
    pub fn compile_function(&self, function: &RuleFunction) -> Result<Expression, RuleError> {
        let parser = self
            .registry
            .get(&function.func)
            .ok_or_else(|| RuleError::UnknownFunction(function.func.clone()))?;

        let args = function
            .args
            .iter()
            .map(|arg| match arg {
                RuleArgument::Function(nested) => {
                    self.compile_function(nested).map(ParsedArgument::Condition)
                }
                RuleArgument::Operand(operand) => Ok(ParsedArgument::Operand(lower_operand(operand))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        parser.parse(args)
    }

    pub fn compile(&self, index: usize, rule: &Rule) -> Result<CompiledRule, RuleError> {
        let condition = self.compile_function(&rule.conditions)?;
        debug!(index, condition = %condition, "compiled rule");
        Ok(CompiledRule {
            index,
            condition,
            fulfilled: rule.fulfilled.clone(),
            rejected: rule.rejected.clone(),
        })
    }

    pub fn compile_all(&self, rules: &[Rule]) -> Result<Vec<CompiledRule>, RuleError> {
        rules
            .iter()
            .enumerate()
            .map(|(index, rule)| self.compile(index, rule))
            .collect()
    }
}

/// A non-empty literal `value` wins over a non-empty `field` reference;
/// anything else is null.
fn lower_operand(operand: &Operand) -> Expression {
    let non_empty = |key: &Option<String>| key.as_ref().filter(|s| !s.is_empty()).cloned();
    match (non_empty(&operand.value), non_empty(&operand.field)) {
        (Some(value), _) => Expression::Literal(Value::Text(value)),
        (None, Some(api_name)) => Expression::Input(InputSource::Field { api_name }),
        (None, None) => Expression::Literal(Value::Null),
    }
}
