use super::model::{Document, Field, FieldMap, PickListValue, Section};
use super::path::DocumentPath;
use super::raw::{RawDocument, RawField, RawFieldMap, RawPickListValue, RawSection};
use crate::error::LayoutError;

/// A trait for layout representations that can be validated into a [`Document`].
///
/// The bundled implementation covers the JSON layout format ([`RawDocument`]
/// and an already-parsed `serde_json::Value`). Other sources can implement it
/// to feed the extractor without going through JSON.
pub trait IntoLayout {
    /// Consumes the object and converts it into a validated layout document.
    fn into_layout(self) -> Result<Document, LayoutError>;
}

impl IntoLayout for RawDocument {
    fn into_layout(self) -> Result<Document, LayoutError> {
        let root = DocumentPath::root();
        let sections_path = root.key("sections");
        let sections = require(self.sections, &root, "sections")?
            .into_iter()
            .enumerate()
            .map(|(i, section)| convert_section(section, &sections_path.index(i)))
            .collect::<Result<_, _>>()?;
        Ok(Document {
            sections,
            rules: self.rules.unwrap_or_default(),
        })
    }
}

impl IntoLayout for serde_json::Value {
    fn into_layout(self) -> Result<Document, LayoutError> {
        RawDocument::deserialize_tracked(self)?.into_layout()
    }
}

impl IntoLayout for Document {
    fn into_layout(self) -> Result<Document, LayoutError> {
        Ok(self)
    }
}

fn require<T>(value: Option<T>, path: &DocumentPath, key: &str) -> Result<T, LayoutError> {
    value.ok_or_else(|| LayoutError::MissingField {
        path: path.to_string(),
        key: key.to_string(),
    })
}

fn convert_section(raw: RawSection, path: &DocumentPath) -> Result<Section, LayoutError> {
    let fields_path = path.key("fields");
    let fields = require(raw.fields, path, "fields")?
        .into_iter()
        .enumerate()
        .map(|(i, field)| convert_field(field, &fields_path.index(i)))
        .collect::<Result<_, _>>()?;
    Ok(Section {
        id: raw.id,
        name: raw.name,
        visible: raw.visible,
        fields,
    })
}

// `data_type` is the only key every field must carry; it decides whether the
// rest of the field is read at all.
fn convert_field(raw: RawField, path: &DocumentPath) -> Result<Field, LayoutError> {
    let data_type = require(raw.data_type, path, "data_type")?;
    let pick_list_values = raw.pick_list_values.map(convert_values);
    Ok(Field {
        api_name: raw.api_name,
        data_type,
        id: raw.id,
        field_label: raw.field_label,
        json_type: raw.json_type,
        required: raw.required.unwrap_or(false),
        visible: raw.visible,
        default_value: raw.default_value,
        pick_list_values,
    })
}

fn convert_values(values: Vec<RawPickListValue>) -> Vec<PickListValue> {
    values.into_iter().map(convert_value).collect()
}

fn convert_value(raw: RawPickListValue) -> PickListValue {
    // A present-but-null `maps` still counts as present.
    let maps = raw
        .maps
        .map(|maps| maps.unwrap_or_default().into_iter().map(convert_map).collect());
    PickListValue {
        actual_value: raw.actual_value,
        display_value: raw.display_value,
        api_name: raw.api_name,
        maps,
    }
}

fn convert_map(raw: RawFieldMap) -> FieldMap {
    FieldMap {
        api_name: raw.api_name,
        id: raw.id,
        visible: raw.visible,
        pick_list_values: raw.pick_list_values.map(convert_values),
    }
}
