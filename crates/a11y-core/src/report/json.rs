//! JSON report generation

use crate::model::ScanOutcome;
use crate::{CoreError, CoreResult};

pub fn generate(outcome: &ScanOutcome) -> CoreResult<String> {
    serde_json::to_string_pretty(outcome).map_err(CoreError::Serialization)
}
