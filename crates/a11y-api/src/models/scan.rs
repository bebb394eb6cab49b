//! Scan models

use serde::{Deserialize, Serialize};
use url::Url;

pub const MAX_URL_LENGTH: usize = 200;

/// Form and JSON body carrying the URL to check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlForm {
    #[serde(default)]
    pub url: String,
}

impl UrlForm {
    /// Accept absolute http(s) URLs up to 200 characters
    pub fn validate(&self) -> Result<Url, String> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err("Enter a URL to check.".to_string());
        }
        if raw.chars().count() > MAX_URL_LENGTH {
            return Err(format!(
                "Ensure the URL has at most {} characters (it has {}).",
                MAX_URL_LENGTH,
                raw.chars().count()
            ));
        }

        let url = Url::parse(raw).map_err(|_| "Enter a valid URL.".to_string())?;
        match url.scheme() {
            "http" | "https" if url.host().is_some() => Ok(url),
            _ => Err("Enter a valid URL.".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanListItem {
    pub id: i64,
    pub url: String,
    pub timestamp: String,
    pub failure_count: usize,
    pub warning_count: usize,
    pub skipped_count: usize,
    pub success_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanListResponse {
    pub scans: Vec<ScanListItem>,
    pub total: u64,
}
