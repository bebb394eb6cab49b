//! Report generation

pub mod json;
pub mod text;

use crate::model::ScanOutcome;
use crate::CoreResult;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Text,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Generate report in specified format
pub fn generate_report(outcome: &ScanOutcome, format: ReportFormat) -> CoreResult<String> {
    match format {
        ReportFormat::Json => json::generate(outcome),
        ReportFormat::Text => Ok(text::generate(outcome)),
    }
}
