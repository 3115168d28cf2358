//! Form state driven by pick-list maps and rule effects.
//!
//! A [`FormState`] tracks the current value of every field together with the
//! visibility and allowed pick-list values that maps and rules have imposed on
//! fields and sections. Setting a value applies the maps of the chosen
//! pick-list value first, then the effects of every rule the change touches.

use crate::data::FormValues;
use crate::error::EvaluationError;
use crate::evaluator::Evaluator;
use crate::layout::{Document, Field, FieldMap, PickListValue, Section, initial_values};
use ahash::{AHashMap, AHashSet};
use tracing::{debug, trace, warn};

mod mapping;

/// A field (by `api_name`) or a section (by `id`) whose presentation maps can change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    Field(String),
    Section(String),
}

/// What maps and rule effects have changed about one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectState {
    pub visible: Option<bool>,
    /// The subset of the field's pick-list values still on offer.
    pub pick_list_values: Option<Vec<PickListValue>>,
}

pub struct FormState<'a> {
    document: &'a Document,
    evaluator: &'a Evaluator,
    values: FormValues,
    objects: AHashMap<ObjectRef, ObjectState>,
}

impl<'a> FormState<'a> {
    /// Builds the starting state of a form.
    ///
    /// The starting values from [`initial_values`] are set one field at a time
    /// in document order, exactly as if each had been chosen by hand.
    pub fn new(
        document: &'a Document,
        evaluator: &'a Evaluator,
        provided: &FormValues,
    ) -> Result<Self, EvaluationError> {
        let mut state = Self {
            document,
            evaluator,
            values: FormValues::new(),
            objects: AHashMap::new(),
        };

        let initial = initial_values(document, provided);
        let mut seen = AHashSet::new();
        for api_name in document.fields().filter_map(|f| f.api_name.as_deref()) {
            if !seen.insert(api_name) {
                continue;
            }
            if let Some(value) = initial.get(api_name) {
                state.set_value(api_name, value)?;
            }
        }

        debug!(
            values = state.values.len(),
            objects = state.objects.len(),
            "form state initialised"
        );
        Ok(state)
    }

    /// Sets `api_name` to `value`, then applies the maps declared by the chosen
    /// pick-list value and the effects of every rule the change touches.
    pub fn set_value(&mut self, api_name: &str, value: &str) -> Result<(), EvaluationError> {
        self.values.insert(api_name, value);

        let mut maps: Vec<FieldMap> = self
            .document
            .field(api_name)
            .and_then(|field| field.pick_list_value(value))
            .and_then(|choice| choice.maps.clone())
            .unwrap_or_default();

        for outcome in self.evaluator.eval_updated(&self.values, &[api_name])? {
            trace!(
                rule = outcome.rule_index,
                fulfilled = outcome.fulfilled,
                "applying rule effects"
            );
            maps.extend(mapping::effect_maps(&outcome.effects));
        }

        for map in &maps {
            self.apply_map(map);
        }
        Ok(())
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, api_name: &str) -> Option<&str> {
        self.values.get(api_name)
    }

    pub fn object(&self, object: &ObjectRef) -> Option<&ObjectState> {
        self.objects.get(object)
    }

    /// Whether the section is shown: the last map or effect decides, otherwise
    /// the layout's `visible` flag, otherwise shown.
    pub fn is_section_visible(&self, id: &str) -> bool {
        self.override_visible(&ObjectRef::Section(id.to_string()))
            .or_else(|| self.document.section(id).and_then(|s| s.visible))
            .unwrap_or(true)
    }

    /// Whether the field is shown. A field inside a hidden section is hidden.
    pub fn is_field_visible(&self, api_name: &str) -> bool {
        let Some((section, field)) = self.locate(api_name) else {
            return false;
        };
        let section_visible = section
            .id
            .as_deref()
            .is_none_or(|id| self.is_section_visible(id));
        section_visible
            && self
                .override_visible(&ObjectRef::Field(api_name.to_string()))
                .or(field.visible)
                .unwrap_or(true)
    }

    /// The pick-list values the field currently offers.
    pub fn allowed_values(&self, api_name: &str) -> Option<&[PickListValue]> {
        self.objects
            .get(&ObjectRef::Field(api_name.to_string()))
            .and_then(|state| state.pick_list_values.as_deref())
            .or_else(|| {
                self.document
                    .field(api_name)
                    .and_then(|field| field.pick_list_values.as_deref())
            })
    }

    /// Required, visible fields that have no value yet, in document order.
    pub fn missing_required(&self) -> Vec<&'a str> {
        let mut seen = AHashSet::new();
        self.document
            .fields()
            .filter(|field| field.required)
            .filter_map(|field| field.api_name.as_deref())
            .filter(|api_name| seen.insert(*api_name))
            .filter(|api_name| self.is_field_visible(api_name))
            .filter(|api_name| self.value(api_name).is_none_or(str::is_empty))
            .collect()
    }

    /// A form is valid once every required, visible field has a non-empty value.
    pub fn is_valid(&self) -> bool {
        self.missing_required().is_empty()
    }

    fn locate(&self, api_name: &str) -> Option<(&'a Section, &'a Field)> {
        self.document.sections.iter().rev().find_map(|section| {
            section
                .fields
                .iter()
                .rev()
                .find(|field| field.api_name.as_deref() == Some(api_name))
                .map(|field| (section, field))
        })
    }

    fn override_visible(&self, object: &ObjectRef) -> Option<bool> {
        self.objects.get(object).and_then(|state| state.visible)
    }

    /// A map targets the field named by `api_name`, otherwise the section or
    /// field whose `id` matches.
    fn resolve_target(&self, map: &FieldMap) -> Option<ObjectRef> {
        if let Some(api_name) = &map.api_name {
            return Some(ObjectRef::Field(api_name.clone()));
        }
        let id = map.id.as_deref()?;
        if self.document.section(id).is_some() {
            return Some(ObjectRef::Section(id.to_string()));
        }
        self.document
            .fields()
            .find(|field| field.id.as_deref() == Some(id))
            .and_then(|field| field.api_name.clone())
            .map(ObjectRef::Field)
    }

    fn apply_map(&mut self, map: &FieldMap) {
        let Some(target) = self.resolve_target(map) else {
            warn!(id = ?map.id, "map target not found in the layout; ignoring");
            return;
        };

        let restricted = match (&target, &map.pick_list_values) {
            (ObjectRef::Field(api_name), Some(dependents)) => {
                let offered: AHashSet<&str> = dependents
                    .iter()
                    .filter_map(|d| d.actual_value.as_deref())
                    .collect();
                let original = self
                    .document
                    .field(api_name)
                    .and_then(|field| field.pick_list_values.as_ref());
                Some(
                    original
                        .iter()
                        .copied()
                        .flatten()
                        .filter(|choice| {
                            choice
                                .actual_value
                                .as_deref()
                                .is_some_and(|v| offered.contains(v))
                        })
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            }
            _ => None,
        };

        let state = self.objects.entry(target).or_default();
        if let Some(values) = restricted {
            state.pick_list_values = Some(values);
        }
        if let Some(visible) = map.visible {
            state.visible = Some(visible);
        }
    }
}
