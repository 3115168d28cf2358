//! Extraction of condition rules from pick-list maps.
//!
//! Every pick-list value that declares a `maps` key yields one [`Rule`] whose
//! condition is `owning_field == value`. Output order follows the document:
//! sections, then fields, then pick-list values.

use crate::error::LayoutError;
use crate::layout::{Document, DocumentPath, Field, IntoLayout};
use crate::rule::{Rule, RuleFunction};
use ahash::AHashSet;
use tracing::{debug, trace};

mod effects;

/// The data type that marks a field as a pick list.
pub const PICK_LIST: &str = "pick_list";

/// What to do with the dependent values listed inside a value's maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DependentPolicy {
    /// Leave `fulfilled` and `rejected` empty.
    #[default]
    Ignore,
    /// Turn map visibility and dependent values into `fulfilled` effects.
    Fulfill,
}

/// Walks a layout [`Document`] and produces its condition rules.
pub struct ConditionExtractor {
    data_types: AHashSet<String>,
    policy: DependentPolicy,
}

pub struct ExtractorBuilder {
    data_types: AHashSet<String>,
    policy: DependentPolicy,
}

impl ExtractorBuilder {
    pub fn new() -> Self {
        let mut data_types = AHashSet::new();
        data_types.insert(PICK_LIST.to_string());
        Self {
            data_types,
            policy: DependentPolicy::default(),
        }
    }

    /// Accepts an additional `data_type` as a pick list (e.g. `"picklist"`).
    pub fn with_data_type(mut self, data_type: &str) -> Self {
        self.data_types.insert(data_type.to_string());
        self
    }

    pub fn with_dependents(mut self, policy: DependentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> ConditionExtractor {
        ConditionExtractor {
            data_types: self.data_types,
            policy: self.policy,
        }
    }
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ConditionExtractor {
    fn default() -> Self {
        ExtractorBuilder::new().build()
    }
}

impl ConditionExtractor {
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    pub fn policy(&self) -> DependentPolicy {
        self.policy
    }

    fn is_pick_list(&self, field: &Field) -> bool {
        self.data_types.contains(&field.data_type)
    }

    /// Extracts one rule per mapped pick-list value, in document order.
    ///
    /// Keys are only required where they are read: `pick_list_values` on every
    /// processed pick-list field, and the field's `api_name` plus the value's
    /// `actual_value` once a value with `maps` is found. Under
    /// [`DependentPolicy::Fulfill`] the dependent values must resolve too.
    /// Any missing key fails the whole extraction without a partial result.
    pub fn extract(&self, document: &Document) -> Result<Vec<Rule>, LayoutError> {
        let mut rules = Vec::new();

        let pick_lists = document
            .indexed_fields()
            .filter(|(_, _, field)| self.is_pick_list(field));

        for (si, fi, field) in pick_lists {
            let field_path = DocumentPath::field(si, fi);
            let values =
                required(field.pick_list_values.as_ref(), &field_path, "pick_list_values")?;
            let values_path = field_path.key("pick_list_values");

            for (vi, value) in values.iter().enumerate() {
                let Some(maps) = value.maps.as_deref() else {
                    continue;
                };
                let value_path = values_path.index(vi);
                let api_name = required(field.api_name.as_ref(), &field_path, "api_name")?;
                let actual_value =
                    required(value.actual_value.as_ref(), &value_path, "actual_value")?;

                let mut rule = Rule::new(RuleFunction::is(api_name, actual_value));
                match self.policy {
                    DependentPolicy::Fulfill => {
                        rule.fulfilled = effects::dependent_effects(maps, &value_path)?;
                    }
                    // Dependent values are never read.
                    DependentPolicy::Ignore => {}
                }

                trace!(
                    field = %api_name,
                    value = %actual_value,
                    maps = maps.len(),
                    effects = rule.fulfilled.len(),
                    "extracted rule"
                );
                rules.push(rule);
            }
        }

        debug!(rules = rules.len(), policy = ?self.policy, "extraction finished");
        Ok(rules)
    }

    /// Validates `layout` and extracts its rules in one step.
    pub fn extract_from(&self, layout: impl IntoLayout) -> Result<Vec<Rule>, LayoutError> {
        let document = layout.into_layout()?;
        self.extract(&document)
    }
}

pub(crate) fn required<'a, T: ?Sized>(
    value: Option<&'a T>,
    path: &DocumentPath,
    key: &str,
) -> Result<&'a T, LayoutError> {
    value.ok_or_else(|| LayoutError::MissingField {
        path: path.to_string(),
        key: key.to_string(),
    })
}
