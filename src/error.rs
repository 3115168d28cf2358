use crate::ast::Value;
use thiserror::Error;

/// Errors raised while turning a layout document into the validated model or
/// while extracting rules from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Missing required key '{key}' at {path}")]
    MissingField { path: String, key: String },

    #[error("Malformed layout input: {0}")]
    MalformedInput(String),
}

/// Errors that can occur while loading a layout from disk or a reader.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read layout '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors that can occur while compiling rule functions into expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule function '{0}' is not registered")]
    UnknownFunction(String),

    #[error("Rule function '{func}' requires {expected} arguments, but received {found}")]
    ArityMismatch {
        func: String,
        expected: usize,
        found: usize,
    },

    #[error("Rule function '{func}' expects nested functions, but argument {index} is an operand")]
    ExpectedFunction { func: String, index: usize },

    #[error("Rule function '{func}' expects operands, but argument {index} is a function")]
    ExpectedOperand { func: String, index: usize },
}

/// Errors that can occur during rule evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error(
        "Type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },
}

/// Errors that can occur while reading or writing serialized rule sets.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Could not access rule file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Rule serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
