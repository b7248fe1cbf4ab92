use std::io;
use thiserror::Error;

/// Errors that can occur while building or parsing TFVC commands
#[derive(Debug, Error)]
pub enum TfvcError {
    #[error("Argument is required: {0}")]
    ArgumentMissing(String),

    #[error("The TFVC command line '{command}' is not using the English language; its output cannot be parsed")]
    NotAnEnuCommandLine { command: String },

    #[error("The TFVC command '{command}' failed with exit code {exit_code}: {message}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
        message: String,
    },

    #[error("Failed to parse TFVC XML output: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl TfvcError {
    /// Fixed message used when the failing command's output offers nothing better
    pub const EXEC_FAILED: &'static str = "The TFVC command line failed to execute properly";

    pub fn argument_missing(argument: &str) -> Self {
        TfvcError::ArgumentMissing(argument.to_string())
    }
}

/// Result type for TFVC operations
pub type TfvcResult<T> = std::result::Result<T, TfvcError>;
