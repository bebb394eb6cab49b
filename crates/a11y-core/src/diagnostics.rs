//! Diagnostic sinks for raw validator output

use crate::{CoreError, CoreResult, ScanContext};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Receives each validator's raw tree before it is flattened
#[async_trait]
pub trait DiagnosticSink: Send + Sync {
    async fn record(&self, ctx: &ScanContext, validator: &str, raw: &Value) -> CoreResult<()>;
}

/// Discards everything
pub struct NullSink;

#[async_trait]
impl DiagnosticSink for NullSink {
    async fn record(&self, _ctx: &ScanContext, _validator: &str, _raw: &Value) -> CoreResult<()> {
        Ok(())
    }
}

/// Logs each tree at debug level
pub struct TracingSink;

#[async_trait]
impl DiagnosticSink for TracingSink {
    async fn record(&self, ctx: &ScanContext, validator: &str, raw: &Value) -> CoreResult<()> {
        tracing::debug!(scan_id = %ctx.scan_id, validator, tree = %raw, "raw validator output");
        Ok(())
    }
}

/// Writes `<dir>/<scan_id>-<validator>.json` for every tree
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, ctx: &ScanContext, validator: &str) -> PathBuf {
        self.dir
            .join(format!("{}-{}.json", ctx.scan_id, validator.to_lowercase()))
    }
}

#[async_trait]
impl DiagnosticSink for JsonDirSink {
    async fn record(&self, ctx: &ScanContext, validator: &str, raw: &Value) -> CoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(raw).map_err(CoreError::Serialization)?;
        tokio::fs::write(self.path_for(ctx, validator), json).await?;
        Ok(())
    }
}
