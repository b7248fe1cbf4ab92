pub mod audit;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod repository;

// Re-export commonly used types for convenience
pub use commands::{
    Add, ArgumentBuilder, ArgumentProvider, Delete, GetFileContent, GetInfo, GetVersion, ItemInfo,
    PendingChange, Status, TfvcCommand, Undo,
};
pub use context::{Credentials, ServerContext};
pub use error::{TfvcError, TfvcResult};
pub use exec::{ExecutionOptions, ExecutionResult, Executor, ProcessExecutor};
pub use repository::{Repository, ToolFlavor};
