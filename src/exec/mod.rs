pub mod executor;

pub use executor::{ExecutionOptions, ExecutionResult, Executor, ProcessExecutor};
