use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

/// Result of one completed tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn new<O: Into<String>, E: Into<String>>(exit_code: i32, stdout: O, stderr: E) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Options recognized by the execution collaborator
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    pub cwd: Option<PathBuf>,
    pub env: HashMap<String, String>,
}

/// Runs the external tool and captures its streams.
///
/// Spawn failures (e.g. executable not found) are independent of the tool's
/// own exit code and surface as `io::Error`, unclassified. Cancellation and
/// timeouts are the caller's concern.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(
        &self,
        tool: &Path,
        arguments: &[String],
        options: &ExecutionOptions,
    ) -> io::Result<ExecutionResult>;
}

/// Default executor on top of `tokio::process`
#[derive(Debug, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl Executor for ProcessExecutor {
    async fn execute(
        &self,
        tool: &Path,
        arguments: &[String],
        options: &ExecutionOptions,
    ) -> io::Result<ExecutionResult> {
        let mut command = Command::new(tool);
        command.args(arguments).stdin(Stdio::null());

        if let Some(cwd) = &options.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &options.env {
            command.env(key, value);
        }

        let output = command.output().await?;

        Ok(ExecutionResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
