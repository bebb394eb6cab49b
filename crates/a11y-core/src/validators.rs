//! Validator capability and ordered registry
//!
//! A validator is anything that accepts page markup as bytes and returns a
//! nested result tree as JSON. The registry only fixes the order they run
//! in; the aggregator never looks at which validator produced a tree.

use crate::tree::ResultTree;
use crate::CoreResult;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for WCAG validators
#[async_trait]
pub trait Validator: Send + Sync {
    /// Get validator name
    fn name(&self) -> &str;

    /// Validate a byte-encoded document and return the raw result tree
    async fn validate_document(&self, markup: &[u8]) -> CoreResult<Value>;
}

/// Run one validator over page markup.
///
/// Returns the raw tree alongside its decoded form so callers can keep a
/// diagnostic copy. Validator errors propagate unchanged.
pub async fn run_validator(validator: &dyn Validator, markup: &str) -> CoreResult<(Value, ResultTree)> {
    let raw = validator.validate_document(markup.as_bytes()).await?;
    let tree = ResultTree::decode(&raw).map_err(|source| crate::CoreError::Decode {
        validator: validator.name().to_string(),
        source,
    })?;
    Ok((raw, tree))
}

/// Validators in the order a scan runs them
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    pub fn with(mut self, validator: Box<dyn Validator>) -> Self {
        self.register(validator);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Validator> {
        self.validators.iter().map(|v| v.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl FromIterator<Box<dyn Validator>> for ValidatorRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn Validator>>>(iter: I) -> Self {
        Self {
            validators: iter.into_iter().collect(),
        }
    }
}

/// Validator that returns a canned tree, for tests and dry runs
pub struct StaticValidator {
    name: String,
    output: Value,
}

impl StaticValidator {
    pub fn new(name: impl Into<String>, output: Value) -> Self {
        Self {
            name: name.into(),
            output,
        }
    }
}

#[async_trait]
impl Validator for StaticValidator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn validate_document(&self, _markup: &[u8]) -> CoreResult<Value> {
        Ok(self.output.clone())
    }
}
