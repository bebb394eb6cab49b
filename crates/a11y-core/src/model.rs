//! Scan data model
//!
//! Findings are flat rows with a fixed shape: every optional field is
//! serialized as `null` rather than omitted, so consumers of the stored JSON
//! can rely on the same keys for every row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verdict when a serif family appears in a `font-family` declaration
pub const SERIF_FOUND: &str = "Serif font found in url.";

/// Verdict when no serif family appears
pub const NO_SERIF_FOUND: &str = "No serif fonts found in url.";

/// Message returned in place of a bundle with no findings at all
pub const NO_ISSUES_MESSAGE: &str = "No accessibility issues found.";

/// Category a validator files an entry under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Success,
    Failures,
    Warnings,
    Skipped,
}

impl SectionType {
    pub const ALL: [SectionType; 4] = [
        SectionType::Success,
        SectionType::Failures,
        SectionType::Warnings,
        SectionType::Skipped,
    ];

    /// Key used in validator output and stored bundles
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Success => "success",
            SectionType::Failures => "failures",
            SectionType::Warnings => "warnings",
            SectionType::Skipped => "skipped",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flattened validator entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub section_type: SectionType,
    pub guideline: Option<String>,
    pub technique: Option<String>,
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub xpath: Option<String>,
    pub classes: Option<String>,
    pub element_id: Option<String>,
    pub timestamp: String,
    pub source_url: String,
}

/// Aggregated output of one scan across every validator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub success: Vec<ValidationFinding>,
    pub failures: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
    pub skipped: Vec<ValidationFinding>,
    pub serif_font_check: Vec<String>,
}

impl ResultBundle {
    /// Empty bundle carrying only the serif verdict
    pub fn new(serif_verdict: impl Into<String>) -> Self {
        Self {
            serif_font_check: vec![serif_verdict.into()],
            ..Self::default()
        }
    }

    pub fn section(&self, section: SectionType) -> &[ValidationFinding] {
        match section {
            SectionType::Success => &self.success,
            SectionType::Failures => &self.failures,
            SectionType::Warnings => &self.warnings,
            SectionType::Skipped => &self.skipped,
        }
    }

    pub fn section_mut(&mut self, section: SectionType) -> &mut Vec<ValidationFinding> {
        match section {
            SectionType::Success => &mut self.success,
            SectionType::Failures => &mut self.failures,
            SectionType::Warnings => &mut self.warnings,
            SectionType::Skipped => &mut self.skipped,
        }
    }

    /// True when no validator reported anything in any category
    pub fn has_no_findings(&self) -> bool {
        SectionType::ALL.iter().all(|s| self.section(*s).is_empty())
    }

    pub fn total_findings(&self) -> usize {
        SectionType::ALL.iter().map(|s| self.section(*s).len()).sum()
    }

    pub fn serif_verdict(&self) -> Option<&str> {
        self.serif_font_check.first().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// What a caller gets back from a scan attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanOutcome {
    Results(ResultBundle),
    Clean { message: String },
    Error { error: String },
}

impl ScanOutcome {
    pub fn clean() -> Self {
        ScanOutcome::Clean {
            message: NO_ISSUES_MESSAGE.to_string(),
        }
    }

    pub fn fetch_failed(detail: impl std::fmt::Display) -> Self {
        ScanOutcome::Error {
            error: format!("Could not fetch the URL. Error: {}", detail),
        }
    }

    pub fn bad_status(status: u16) -> Self {
        ScanOutcome::Error {
            error: format!("Error with request: {}", status),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScanOutcome::Error { .. })
    }

    pub fn bundle(&self) -> Option<&ResultBundle> {
        match self {
            ScanOutcome::Results(bundle) => Some(bundle),
            _ => None,
        }
    }
}

/// A fetched page ready for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub text: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, status: u16, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            text: text.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Persisted scan record; `json_response` is opaque to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredScanRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub json_response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(section_type: SectionType, message: &str) -> ValidationFinding {
        ValidationFinding {
            section_type,
            guideline: Some("1.4.3".to_string()),
            technique: Some("G18".to_string()),
            message: Some(message.to_string()),
            error_code: None,
            xpath: Some("/html/body/p[1]".to_string()),
            classes: None,
            element_id: None,
            timestamp: "2024-05-01T10:00:00.000000Z".to_string(),
            source_url: "https://example.com/".to_string(),
        }
    }

    #[test]
    fn test_section_type_names() {
        for section in SectionType::ALL {
            assert_eq!(SectionType::parse(section.as_str()), Some(section));
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section.as_str()));
        }
        assert_eq!(SectionType::parse("Failed"), None);
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let json = serde_json::to_value(finding(SectionType::Failures, "x")).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 10);
        assert!(obj["error_code"].is_null());
        assert!(obj["classes"].is_null());
        assert!(obj["element_id"].is_null());
    }

    #[test]
    fn test_bundle_round_trip() {
        let mut bundle = ResultBundle::new(SERIF_FOUND);
        bundle.failures.push(finding(SectionType::Failures, "Low contrast - text"));
        bundle.skipped.push(finding(SectionType::Skipped, "Hidden element"));

        let json = bundle.to_json().unwrap();
        assert_eq!(ResultBundle::from_json(&json).unwrap(), bundle);
    }

    #[test]
    fn test_empty_bundle_keeps_every_list() {
        let json = serde_json::to_value(ResultBundle::new(NO_SERIF_FOUND)).unwrap();
        for key in ["success", "failures", "warnings", "skipped"] {
            assert_eq!(json[key], serde_json::json!([]));
        }
        assert_eq!(json["serif_font_check"], serde_json::json!([NO_SERIF_FOUND]));
    }

    #[test]
    fn test_outcome_shapes() {
        let clean = serde_json::to_value(ScanOutcome::clean()).unwrap();
        assert_eq!(clean, serde_json::json!({ "message": "No accessibility issues found." }));

        let status = serde_json::to_value(ScanOutcome::bad_status(404)).unwrap();
        assert_eq!(status, serde_json::json!({ "error": "Error with request: 404" }));

        let fetch = ScanOutcome::fetch_failed("dns error");
        assert!(fetch.is_error());
        assert!(fetch.bundle().is_none());
    }
}
