use super::model::Rule;
use crate::error::OutputError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;

/// An ordered list of rules, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, OutputError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Writes the rule set followed by a trailing newline.
    pub fn write_to(&self, mut writer: impl Write, pretty: bool) -> Result<(), OutputError> {
        let json = self.to_json(pretty)?;
        writeln!(writer, "{}", json).map_err(|source| OutputError::Io {
            path: "<writer>".to_string(),
            source,
        })
    }

    /// Saves the rule set to `path` as JSON.
    pub fn save(&self, path: &str, pretty: bool) -> Result<(), OutputError> {
        let file = fs::File::create(path).map_err(|source| OutputError::Io {
            path: path.to_string(),
            source,
        })?;
        self.write_to(file, pretty)
    }

    /// Loads a rule set previously written with [`RuleSet::save`].
    pub fn from_file(path: &str) -> Result<Self, OutputError> {
        let content = fs::read_to_string(path).map_err(|source| OutputError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}
