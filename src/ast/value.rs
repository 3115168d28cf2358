use std::fmt;

/// Runtime value types used during rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    Bool(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Defines the source of data for a leaf node in the AST.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// The current value of the field with this `api_name`.
    Field { api_name: String },
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Field { api_name } => write!(f, "${}", api_name),
        }
    }
}
