//! wcag_zoo validator integration
//!
//! Each validator runs in a short-lived Python process: the markup goes in
//! on stdin, the validator's `validate_document` result comes back as JSON
//! on stdout.

use crate::{resolve_command, run_command_with_input, ToolConfig, ToolError, ToolResult};
use a11y_core::{CoreError, CoreResult, Validator, ValidatorRegistry};
use async_trait::async_trait;
use serde_json::Value;

/// The five wcag_zoo validators as `(module, class)`, in scan order
pub const ZOO_VALIDATORS: [(&str, &str); 5] = [
    ("anteater", "Anteater"),
    ("ayeaye", "Ayeaye"),
    ("glowworm", "Glowworm"),
    ("molerat", "Molerat"),
    ("tarsier", "Tarsier"),
];

const BRIDGE: &str = r#"import importlib, json, sys
module, name = sys.argv[1], sys.argv[2]
cls = getattr(importlib.import_module("wcag_zoo.validators." + module), name)
result = cls().validate_document(sys.stdin.buffer.read())
json.dump(result, sys.stdout, default=str)
"#;

/// One wcag_zoo validator class
pub struct ZooValidator {
    config: ToolConfig,
    module: String,
    class: String,
}

impl ZooValidator {
    pub fn new(config: ToolConfig, module: &str, class: &str) -> Self {
        Self {
            config,
            module: module.to_string(),
            class: class.to_string(),
        }
    }

    /// Check that the interpreter exists and can import wcag_zoo
    pub async fn is_available(&self) -> bool {
        let Some(python) = resolve_command(&self.config.python) else {
            return false;
        };
        matches!(
            run_command_with_input(&python, &["-c", "import wcag_zoo"], b"", self.config.timeout_secs).await,
            Ok(out) if out.code == 0
        )
    }

    /// Run the validator and parse its JSON output
    pub async fn run(&self, markup: &[u8]) -> ToolResult<Value> {
        let python = resolve_command(&self.config.python)
            .ok_or_else(|| ToolError::NotFound(self.config.python.display().to_string()))?;

        tracing::debug!("Running wcag_zoo {} on {} bytes", self.class, markup.len());

        let out = run_command_with_input(
            &python,
            &["-c", BRIDGE, &self.module, &self.class],
            markup,
            self.config.timeout_secs,
        )
        .await?;

        if out.code != 0 {
            return Err(ToolError::ExecutionFailed(format!(
                "{} exited with {}: {}",
                self.class,
                out.code,
                out.stderr.trim()
            )));
        }

        parse_output(&out.stdout)
    }
}

#[async_trait]
impl Validator for ZooValidator {
    fn name(&self) -> &str {
        &self.class
    }

    async fn validate_document(&self, markup: &[u8]) -> CoreResult<Value> {
        self.run(markup).await.map_err(|e| CoreError::Validator {
            validator: self.class.clone(),
            message: e.to_string(),
        })
    }
}

fn parse_output(stdout: &str) -> ToolResult<Value> {
    serde_json::from_str(stdout.trim())
        .map_err(|e| ToolError::ParseError(format!("validator output is not JSON: {}", e)))
}

/// Registry of all five wcag_zoo validators
pub fn wcag_zoo_registry(config: &ToolConfig) -> ValidatorRegistry {
    ZOO_VALIDATORS
        .iter()
        .map(|(module, class)| Box::new(ZooValidator::new(config.clone(), module, class)) as Box<dyn Validator>)
        .collect()
}
