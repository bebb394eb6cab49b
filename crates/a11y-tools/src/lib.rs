//! External collaborators for accessibility scans
//!
//! The WCAG validators come from the Python `wcag_zoo` package and run as
//! subprocesses; pages are fetched over HTTP with reqwest.

pub mod fetch;
pub mod zoo;

pub use fetch::{FetchConfig, PageFetcher, PageSource};
pub use zoo::{wcag_zoo_registry, ZooValidator, ZOO_VALIDATORS};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Tool timeout after {0} seconds")]
    Timeout(u64),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("{0}")]
    Fetch(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Python interpreter with `wcag_zoo` installed
    pub python: PathBuf,

    /// Timeout for each validator run (seconds)
    pub timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python3"),
            timeout_secs: 120,
        }
    }
}

/// Captured output of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

/// Run a command with `input` on stdin, bounded by a timeout
pub async fn run_command_with_input(
    cmd: &std::path::Path,
    args: &[&str],
    input: &[u8],
    timeout_secs: u64,
) -> ToolResult<CommandOutput> {
    use std::process::Stdio;
    use tokio::io::AsyncWriteExt;
    use tokio::process::Command;
    use tokio::time::{timeout, Duration};

    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ToolError::ExecutionFailed(format!("{}: {}", cmd.display(), e)))?;

    let stdin = child.stdin.take();
    let feed = async move {
        let Some(mut stdin) = stdin else {
            return Ok(());
        };
        // Dropping stdin afterwards closes it so the child sees EOF
        match stdin.write_all(input).await {
            // The child quit without reading everything; its stderr says why
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            result => result,
        }
    };

    let run = async {
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        fed?;
        Ok::<_, ToolError>(output)
    };

    match timeout(Duration::from_secs(timeout_secs), run).await {
        Ok(Ok(output)) => Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code().unwrap_or(-1),
        }),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(ToolError::Timeout(timeout_secs)),
    }
}

/// Resolve a command through PATH, keeping explicit paths as given
pub fn resolve_command(cmd: &std::path::Path) -> Option<PathBuf> {
    if cmd.components().count() > 1 {
        return cmd.exists().then(|| cmd.to_path_buf());
    }
    which::which(cmd).ok()
}
