//! Typed form of a validator's native result tree
//!
//! Validators report `{section: {guideline: {technique: [entry, ...]}}}`.
//! Decoding checks that shape level by level and reports the first
//! deviation instead of guessing at what the validator meant.

use crate::model::SectionType;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("expected a mapping at {path}, found {found}")]
    NotAMapping { path: String, found: &'static str },

    #[error("expected a list of entries at {path}, found {found}")]
    NotAList { path: String, found: &'static str },

    #[error("entry {index} at {path} is {found}, not a mapping")]
    EntryNotAMapping {
        path: String,
        index: usize,
        found: &'static str,
    },

    #[error("unknown section type: {0}")]
    UnknownSection(String),
}

/// One raw entry as the validator reported it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingEntry {
    pub guideline: Option<String>,
    pub technique: Option<String>,
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub xpath: Option<String>,
    pub classes: Option<String>,
    pub id: Option<String>,
}

impl FindingEntry {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            guideline: text_field(map, "guideline"),
            technique: text_field(map, "technique"),
            message: text_field(map, "message"),
            error_code: text_field(map, "error_code"),
            xpath: text_field(map, "xpath"),
            classes: text_field(map, "classes"),
            id: text_field(map, "id"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechniqueNode {
    pub technique: String,
    pub entries: Vec<FindingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidelineNode {
    pub guideline: String,
    pub techniques: Vec<TechniqueNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionNode {
    pub section_type: SectionType,
    pub guidelines: Vec<GuidelineNode>,
}

impl SectionNode {
    pub fn entries(&self) -> impl Iterator<Item = &FindingEntry> {
        self.guidelines
            .iter()
            .flat_map(|g| g.techniques.iter())
            .flat_map(|t| t.entries.iter())
    }
}

/// Decoded result tree, sections in the order the validator listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTree {
    pub sections: Vec<SectionNode>,
}

impl ResultTree {
    /// Decode a validator's raw JSON output
    pub fn decode(raw: &Value) -> Result<Self, TreeError> {
        let root = as_mapping(raw, "$")?;
        let mut sections = Vec::new();

        for (key, value) in root {
            let section_type =
                SectionType::parse(key).ok_or_else(|| TreeError::UnknownSection(key.clone()))?;
            let path = format!("$.{}", key);

            if is_empty_section(value) {
                sections.push(SectionNode {
                    section_type,
                    guidelines: Vec::new(),
                });
                continue;
            }

            let mut guidelines = Vec::new();
            for (guideline, techniques_value) in as_mapping(value, &path)? {
                let guideline_path = format!("{}.{}", path, guideline);
                let mut techniques = Vec::new();

                for (technique, entries_value) in as_mapping(techniques_value, &guideline_path)? {
                    let technique_path = format!("{}.{}", guideline_path, technique);
                    techniques.push(TechniqueNode {
                        technique: technique.clone(),
                        entries: decode_entries(entries_value, &technique_path)?,
                    });
                }

                guidelines.push(GuidelineNode {
                    guideline: guideline.clone(),
                    techniques,
                });
            }

            sections.push(SectionNode {
                section_type,
                guidelines,
            });
        }

        Ok(Self { sections })
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries().count()).sum()
    }

    pub fn count_for(&self, section_type: SectionType) -> usize {
        self.sections
            .iter()
            .filter(|s| s.section_type == section_type)
            .map(|s| s.entries().count())
            .sum()
    }
}

fn decode_entries(value: &Value, path: &str) -> Result<Vec<FindingEntry>, TreeError> {
    let items = value.as_array().ok_or_else(|| TreeError::NotAList {
        path: path.to_string(),
        found: kind(value),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_object()
                .map(FindingEntry::from_map)
                .ok_or_else(|| TreeError::EntryNotAMapping {
                    path: path.to_string(),
                    index,
                    found: kind(item),
                })
        })
        .collect()
}

fn as_mapping<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, TreeError> {
    value.as_object().ok_or_else(|| TreeError::NotAMapping {
        path: path.to_string(),
        found: kind(value),
    })
}

// Validators emit `{}`, `[]` or nothing at all for sections they did not fill.
fn is_empty_section(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_nested_tree() {
        let raw = json!({
            "failures": {
                "1.4.3": {
                    "G18": [
                        { "message": "Insufficient contrast", "xpath": "/html/body/p", "error_code": 2 },
                        { "message": "Insufficient contrast", "id": "intro" }
                    ]
                }
            },
            "warnings": {},
            "success": []
        });

        let tree = ResultTree::decode(&raw).unwrap();
        assert_eq!(tree.sections.len(), 3);
        assert_eq!(tree.entry_count(), 2);
        assert_eq!(tree.count_for(SectionType::Failures), 2);

        let entry = &tree.sections[0].guidelines[0].techniques[0].entries[0];
        assert_eq!(entry.error_code.as_deref(), Some("2"));
        assert_eq!(entry.classes, None);
    }

    #[test]
    fn test_section_must_be_mapping() {
        let err = ResultTree::decode(&json!({ "failures": "not a mapping" })).unwrap_err();
        assert_eq!(
            err,
            TreeError::NotAMapping {
                path: "$.failures".to_string(),
                found: "a string",
            }
        );
    }

    #[test]
    fn test_technique_must_be_list() {
        let err = ResultTree::decode(&json!({ "warnings": { "2.4.4": { "H30": {} } } })).unwrap_err();
        assert!(matches!(err, TreeError::NotAList { .. }));
    }

    #[test]
    fn test_entry_must_be_mapping() {
        let err =
            ResultTree::decode(&json!({ "skipped": { "1.1.1": { "H37": ["alt missing"] } } }))
                .unwrap_err();
        assert!(matches!(err, TreeError::EntryNotAMapping { index: 0, .. }));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = ResultTree::decode(&json!({ "Failed": {} })).unwrap_err();
        assert_eq!(err, TreeError::UnknownSection("Failed".to_string()));
    }

    #[test]
    fn test_root_must_be_mapping() {
        assert!(ResultTree::decode(&json!(["failures"])).is_err());
    }
}
