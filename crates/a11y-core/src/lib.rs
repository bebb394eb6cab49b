//! Accessibility Scanner Core
//!
//! This crate runs a set of WCAG validators over a fetched page, flattens
//! their nested result trees into one bundle of uniform rows, persists the
//! bundle and summarizes the most recent one for the dashboard.

pub mod aggregate;
pub mod dashboard;
pub mod diagnostics;
pub mod model;
pub mod report;
pub mod serif;
pub mod store;
pub mod tree;
pub mod validators;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub use dashboard::{summarize, summarize_latest, DashboardView};
pub use diagnostics::{DiagnosticSink, JsonDirSink, NullSink, TracingSink};
pub use model::{
    FetchedPage, ResultBundle, ScanOutcome, SectionType, StoredScanRecord, ValidationFinding,
};
pub use serif::check_for_serif_fonts;
pub use store::{MemoryStore, ResultStore};
pub use tree::{ResultTree, TreeError};
pub use validators::{run_validator, StaticValidator, Validator, ValidatorRegistry};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validator {validator} failed: {message}")]
    Validator { validator: String, message: String },

    #[error("Validator {validator} returned a malformed tree: {source}")]
    Decode {
        validator: String,
        #[source]
        source: TreeError,
    },

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// What to do when one validator fails or returns a malformed tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Fail the whole scan; nothing is stored
    #[default]
    Abort,
    /// Drop that validator's contribution and keep going
    SkipValidator,
}

impl std::str::FromStr for FailurePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "skip-validator" | "skip" => Ok(FailurePolicy::SkipValidator),
            other => Err(CoreError::Config(format!("unknown failure policy: {}", other))),
        }
    }
}

/// Scan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    pub failure_policy: FailurePolicy,
}

/// Per-scan values threaded through aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    /// Correlation id for logs and diagnostic dumps
    pub scan_id: Uuid,
    /// ISO-8601 wall-clock time shared by every row of the scan
    pub timestamp: String,
}

impl ScanContext {
    pub fn new() -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            timestamp: timestamp.into(),
        }
    }
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Main scanner interface
pub struct Scanner {
    config: ScanConfig,
    validators: ValidatorRegistry,
    sink: Box<dyn DiagnosticSink>,
}

impl Scanner {
    pub fn new(validators: ValidatorRegistry) -> Self {
        Self::with_config(validators, ScanConfig::default())
    }

    pub fn with_config(validators: ValidatorRegistry, config: ScanConfig) -> Self {
        Self {
            config,
            validators,
            sink: Box::new(NullSink),
        }
    }

    /// Route raw validator trees to `sink`
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    /// Scan a fetched page; non-200 responses are stored as error payloads
    pub async fn scan_page(&self, page: &FetchedPage, store: &dyn ResultStore) -> CoreResult<ScanOutcome> {
        if !page.is_ok() {
            warn!("Not scanning {}: status {}", page.url, page.status);
            let outcome = ScanOutcome::bad_status(page.status);
            let payload = serde_json::to_string(&outcome).map_err(CoreError::Serialization)?;
            store.save(&page.url, &payload).await?;
            return Ok(outcome);
        }

        self.check_accessibility(page, &ScanContext::new(), store).await
    }

    /// Run every validator over the page, persist the merged bundle and
    /// return it, or the clean sentinel when nothing was reported
    pub async fn check_accessibility(
        &self,
        page: &FetchedPage,
        ctx: &ScanContext,
        store: &dyn ResultStore,
    ) -> CoreResult<ScanOutcome> {
        let bundle = self.aggregate(page, ctx).await?;
        store::save_bundle(store, &bundle, &page.url).await?;

        info!(
            "Scan {} of {} finished: {} failures, {} warnings, {} skipped, {} successes",
            ctx.scan_id,
            page.url,
            bundle.failures.len(),
            bundle.warnings.len(),
            bundle.skipped.len(),
            bundle.success.len()
        );

        if bundle.has_no_findings() {
            Ok(ScanOutcome::clean())
        } else {
            Ok(ScanOutcome::Results(bundle))
        }
    }

    /// Build the bundle without persisting it
    pub async fn aggregate(&self, page: &FetchedPage, ctx: &ScanContext) -> CoreResult<ResultBundle> {
        info!("Starting scan {} for {}", ctx.scan_id, page.url);

        let mut bundle = ResultBundle::new(check_for_serif_fonts(&page.text));

        for validator in self.validators.iter() {
            let (raw, tree) = match run_validator(validator, &page.text).await {
                Ok(result) => result,
                Err(e) if self.config.failure_policy == FailurePolicy::SkipValidator => {
                    warn!("Skipping {} for scan {}: {}", validator.name(), ctx.scan_id, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Err(e) = self.sink.record(ctx, validator.name(), &raw).await {
                warn!("Could not record diagnostics for {}: {}", validator.name(), e);
            }

            let added = aggregate::flatten_into(&mut bundle, &tree, ctx, &page.url);
            debug!("{} contributed {} rows to scan {}", validator.name(), added, ctx.scan_id);
        }

        Ok(bundle)
    }
}
