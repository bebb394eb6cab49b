//! Database schema types

use a11y_core::StoredScanRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct AccessibilityResult {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub json_response: String,
}

impl From<AccessibilityResult> for StoredScanRecord {
    fn from(row: AccessibilityResult) -> Self {
        StoredScanRecord {
            id: row.id,
            timestamp: row.timestamp,
            url: row.url,
            json_response: row.json_response,
        }
    }
}
