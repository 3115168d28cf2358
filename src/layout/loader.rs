use super::conversion::IntoLayout;
use super::model::Document;
use super::raw::RawDocument;
use crate::error::{LayoutError, LoadError};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// The layout file read when no explicit path is given.
pub const DEFAULT_FIXTURE: &str = "fixture.json";

/// Reads JSON layout documents and validates them into a [`Document`].
pub struct LayoutLoader;

impl LayoutLoader {
    /// Loads and validates the layout stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Document, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading layout");
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_str(&content)?)
    }

    /// Loads `fixture.json` from the current working directory.
    pub fn from_default_fixture() -> Result<Document, LoadError> {
        Self::from_path(DEFAULT_FIXTURE)
    }

    /// Parses and validates a layout held in memory.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Document, LayoutError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let raw = RawDocument::deserialize_tracked(&mut deserializer)?;
        deserializer
            .end()
            .map_err(|e| LayoutError::MalformedInput(e.to_string()))?;
        let document = raw.into_layout()?;
        debug!(sections = document.sections.len(), "layout parsed");
        Ok(document)
    }

    /// Parses and validates a layout from any reader.
    pub fn from_reader(mut reader: impl Read) -> Result<Document, LoadError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|source| LoadError::Io {
                path: "<reader>".to_string(),
                source,
            })?;
        Ok(Self::from_str(&content)?)
    }
}
