//! Scan worker: fetch, validate, persist

use crate::AppState;
use a11y_core::{CoreResult, ScanOutcome};
use tracing::{error, info, warn};

/// Scan `url` end to end.
///
/// Fetch failures come back as an error outcome and store nothing; a
/// non-200 response stores an error payload; aggregation errors propagate.
pub async fn run_scan(state: &AppState, url: &str) -> CoreResult<ScanOutcome> {
    info!("Starting scan for {}", url);

    let page = match state.pages.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Could not fetch {}: {}", url, e);
            return Ok(ScanOutcome::fetch_failed(e));
        }
    };

    match state.scanner.scan_page(&page, state.store.as_ref()).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            error!("Scan of {} failed: {}", page.url, e);
            Err(e)
        }
    }
}
