use crate::rule::Rule;

/// A validated form layout: an ordered list of sections, plus any rules the
/// layout ships with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sections: Vec<Section>,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub id: Option<String>,
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub fields: Vec<Field>,
}

/// A single form field. Only `data_type` is checked up front; `api_name` and
/// `pick_list_values` are required by whichever step reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub api_name: Option<String>,
    pub data_type: String,
    pub id: Option<String>,
    pub field_label: Option<String>,
    pub json_type: Option<String>,
    pub required: bool,
    pub visible: Option<bool>,
    pub default_value: Option<serde_json::Value>,
    pub pick_list_values: Option<Vec<PickListValue>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickListValue {
    pub actual_value: Option<String>,
    pub display_value: Option<String>,
    /// Set on dependent values nested inside a map.
    pub api_name: Option<String>,
    /// `Some` whenever the `maps` key was present, even if it was empty or null.
    pub maps: Option<Vec<FieldMap>>,
}

/// A conditional mapping from one pick-list value onto another field or section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    pub api_name: Option<String>,
    pub id: Option<String>,
    pub visible: Option<bool>,
    pub pick_list_values: Option<Vec<PickListValue>>,
}

impl Document {
    /// All fields across all sections, in document order, with their
    /// `(section_index, field_index)` position.
    pub fn indexed_fields(&self) -> impl Iterator<Item = (usize, usize, &Field)> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(si, section)| {
                section
                    .fields
                    .iter()
                    .enumerate()
                    .map(move |(fi, field)| (si, fi, field))
            })
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.indexed_fields().map(|(_, _, field)| field)
    }

    /// The last field declaring `api_name`, matching how later fields shadow
    /// earlier ones in the starting values.
    pub fn field(&self, api_name: &str) -> Option<&Field> {
        self.fields()
            .filter(|field| field.api_name.as_deref() == Some(api_name))
            .last()
    }

    /// The section whose `id` is `id`.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.id.as_deref() == Some(id))
    }
}

impl Field {
    /// The pick-list value whose `actual_value` is `value`.
    pub fn pick_list_value(&self, value: &str) -> Option<&PickListValue> {
        self.pick_list_values
            .iter()
            .flatten()
            .find(|choice| choice.actual_value.as_deref() == Some(value))
    }
}

impl PickListValue {
    pub fn has_maps(&self) -> bool {
        self.maps.is_some()
    }
}
