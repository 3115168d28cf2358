use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// Current form values keyed by field `api_name`, matching the JSON object
/// format accepted by the evaluator (`{"status": "Open", ...}`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FormValues {
    values: AHashMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load form values from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let data = serde_json::from_str(&content)?;
        Ok(data)
    }

    pub fn get(&self, api_name: &str) -> Option<&str> {
        self.values.get(api_name).map(String::as_str)
    }

    pub fn insert(&mut self, api_name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(api_name.into(), value.into());
    }

    pub fn remove(&mut self, api_name: &str) -> Option<String> {
        self.values.remove(api_name)
    }

    /// Returns a copy of `self` with every entry of `other` applied on top.
    pub fn merged_with(&self, other: &FormValues) -> FormValues {
        let mut merged = self.clone();
        for (api_name, value) in &other.values {
            merged.insert(api_name.clone(), value.clone());
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FormValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}
