use serde::{Deserialize, Deserializer, Serialize};

/// A conditional rule: when `conditions` holds, the `fulfilled` effects apply,
/// otherwise the `rejected` ones.
///
/// `conditions` is written as a single function. When reading, a list of
/// functions is also accepted and means all of them must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(deserialize_with = "single_or_all")]
    pub conditions: RuleFunction,
    #[serde(default)]
    pub fulfilled: Vec<RuleFunction>,
    #[serde(default)]
    pub rejected: Vec<RuleFunction>,
}

impl Rule {
    /// A rule with no effects on either branch.
    pub fn new(conditions: RuleFunction) -> Self {
        Self {
            conditions,
            fulfilled: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// A named function applied to operands or to nested functions, e.g.
/// `{"func": "is", "args": [{"field": "status"}, {"value": "Open"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFunction {
    pub func: String,
    #[serde(default)]
    pub args: Vec<RuleArgument>,
}

impl RuleFunction {
    pub fn new(func: impl Into<String>, args: Vec<RuleArgument>) -> Self {
        Self {
            func: func.into(),
            args,
        }
    }

    /// `field == value`.
    pub fn is(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            "is",
            vec![Operand::field(field).into(), Operand::value(value).into()],
        )
    }

    /// Restricts the options of `field` to include `value`.
    pub fn allow(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            "allow",
            vec![Operand::field(field).into(), Operand::value(value).into()],
        )
    }
}

fn single_or_all<'de, D>(deserializer: D) -> Result<RuleFunction, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Conditions {
        Single(RuleFunction),
        All(Vec<RuleFunction>),
    }

    Ok(match Conditions::deserialize(deserializer)? {
        Conditions::Single(function) => function,
        Conditions::All(functions) => {
            RuleFunction::new("and", functions.into_iter().map(Into::into).collect())
        }
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleArgument {
    Function(RuleFunction),
    Operand(Operand),
}

impl From<Operand> for RuleArgument {
    fn from(operand: Operand) -> Self {
        RuleArgument::Operand(operand)
    }
}

impl From<RuleFunction> for RuleArgument {
    fn from(function: RuleFunction) -> Self {
        RuleArgument::Function(function)
    }
}

/// A leaf argument. Exactly one key is normally set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Operand {
    pub fn field(api_name: impl Into<String>) -> Self {
        Self {
            field: Some(api_name.into()),
            ..Default::default()
        }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn section(id: impl Into<String>) -> Self {
        Self {
            section: Some(id.into()),
            ..Default::default()
        }
    }
}
