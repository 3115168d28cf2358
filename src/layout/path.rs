use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

/// Location of a node inside a layout document, used to point error messages
/// at the offending object (e.g. `sections[0].fields[2]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPath {
    segments: Vec<Segment>,
}

impl DocumentPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &'static str) -> Self {
        self.with(Segment::Key(key))
    }

    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// Shorthand for `sections[section].fields[field]`.
    pub fn field(section: usize, field: usize) -> Self {
        Self::root()
            .key("sections")
            .index(section)
            .key("fields")
            .index(field)
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "document root");
        }
        let rendered = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| match segment {
                Segment::Key(key) if i == 0 => key.to_string(),
                Segment::Key(key) => format!(".{}", key),
                Segment::Index(index) => format!("[{}]", index),
            })
            .join("");
        write!(f, "{}", rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_paths() {
        let path = DocumentPath::field(0, 2).key("pick_list_values").index(1);
        assert_eq!(path.to_string(), "sections[0].fields[2].pick_list_values[1]");
    }

    #[test]
    fn renders_root() {
        assert_eq!(DocumentPath::root().to_string(), "document root");
    }
}
