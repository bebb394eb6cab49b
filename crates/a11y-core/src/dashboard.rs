//! Dashboard summaries of the most recent scan
//!
//! Summaries are read from stored JSON, which may come from older writers,
//! error payloads or hand-edited rows. Nothing here fails: whatever cannot
//! be read counts as empty.

use crate::model::{SectionType, StoredScanRecord};
use crate::store::ResultStore;
use crate::CoreResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NO_FAILURES: &str = "No failures recorded";
pub const NO_WARNINGS: &str = "No warnings recorded";
pub const NO_SKIPPED: &str = "Individual elements recorded for each skipped record";
pub const NO_SUCCESSES: &str = "No successful elements recorded";
pub const NO_SERIF_RESULT: &str = "No result recorded";
pub const NO_URL: &str = "No URL checked yet";

/// Everything the dashboard page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub failure_count: usize,
    pub warning_count: usize,
    pub skipped_count: usize,
    pub success_count: usize,
    pub failure_example: String,
    pub warning_example: String,
    pub skipped_example: String,
    pub success_example: String,
    pub serif_font_check: String,
    pub url: String,
    pub checked_at: Option<String>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            failure_count: 0,
            warning_count: 0,
            skipped_count: 0,
            success_count: 0,
            failure_example: NO_FAILURES.to_string(),
            warning_example: NO_WARNINGS.to_string(),
            skipped_example: NO_SKIPPED.to_string(),
            success_example: NO_SUCCESSES.to_string(),
            serif_font_check: NO_SERIF_RESULT.to_string(),
            url: NO_URL.to_string(),
            checked_at: None,
        }
    }
}

impl DashboardView {
    pub fn count(&self, section: SectionType) -> usize {
        match section {
            SectionType::Failures => self.failure_count,
            SectionType::Warnings => self.warning_count,
            SectionType::Skipped => self.skipped_count,
            SectionType::Success => self.success_count,
        }
    }

    pub fn example(&self, section: SectionType) -> &str {
        match section {
            SectionType::Failures => &self.failure_example,
            SectionType::Warnings => &self.warning_example,
            SectionType::Skipped => &self.skipped_example,
            SectionType::Success => &self.success_example,
        }
    }
}

/// Default example text for a category with nothing to show
pub fn default_example(section: SectionType) -> &'static str {
    match section {
        SectionType::Failures => NO_FAILURES,
        SectionType::Warnings => NO_WARNINGS,
        SectionType::Skipped => NO_SKIPPED,
        SectionType::Success => NO_SUCCESSES,
    }
}

/// Summarize the newest record in `store`
pub async fn summarize_latest(store: &dyn ResultStore) -> CoreResult<DashboardView> {
    Ok(summarize(store.latest().await?.as_ref()))
}

/// Summarize one stored record, or the empty state when there is none
pub fn summarize(record: Option<&StoredScanRecord>) -> DashboardView {
    let Some(record) = record else {
        return DashboardView::default();
    };

    let mut view = summarize_payload(&parse_payload(&record.json_response));
    view.url = record.url.clone();
    view.checked_at = Some(record.timestamp.to_rfc3339());
    view
}

/// Summarize a bundle already parsed as JSON
pub fn summarize_payload(payload: &Value) -> DashboardView {
    let mut view = DashboardView::default();

    for section in SectionType::ALL {
        let items = payload
            .get(section.as_str())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let example = first_example(items).unwrap_or_else(|| default_example(section).to_string());
        match section {
            SectionType::Failures => {
                view.failure_count = items.len();
                view.failure_example = example;
            }
            SectionType::Warnings => {
                view.warning_count = items.len();
                view.warning_example = example;
            }
            SectionType::Skipped => {
                view.skipped_count = items.len();
                view.skipped_example = example;
            }
            SectionType::Success => {
                view.success_count = items.len();
                view.success_example = example;
            }
        }
    }

    if let Some(verdict) = payload
        .get("serif_font_check")
        .and_then(Value::as_array)
        .and_then(|v| v.first())
        .and_then(Value::as_str)
    {
        view.serif_font_check = verdict.to_string();
    }

    view
}

/// Message of the first finding, cut at the first `" - "`
fn first_example(items: &[Value]) -> Option<String> {
    let message = items.first()?.get("message")?.as_str()?;
    if message.is_empty() {
        return None;
    }
    let head = message.split(" - ").next().unwrap_or(message);
    Some(head.to_string())
}

// Older rows hold the bundle as a JSON string inside the JSON column.
fn parse_payload(json_response: &str) -> Value {
    match serde_json::from_str::<Value>(json_response) {
        Ok(Value::String(inner)) => serde_json::from_str(&inner).unwrap_or(Value::Null),
        Ok(value) => value,
        Err(_) => Value::Null,
    }
}
