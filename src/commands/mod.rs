pub mod add;
pub mod builder;
pub mod delete;
pub mod get_file_content;
pub mod get_info;
pub mod get_version;
pub mod helper;
pub mod status;
pub mod undo;

pub use add::Add;
pub use builder::{ArgumentBuilder, ArgumentProvider};
pub use delete::Delete;
pub use get_file_content::GetFileContent;
pub use get_info::{GetInfo, ItemInfo};
pub use get_version::GetVersion;
pub use status::{PendingChange, Status};
pub use undo::Undo;

use crate::error::TfvcResult;
use crate::exec::{ExecutionOptions, ExecutionResult};

/// One logical TFVC operation: an argument-construction step paired with an
/// output-parsing step.
///
/// The exe-flavored pair covers the native `tf.exe` client, which spells some
/// subcommands and banners differently; it defaults to the primary pair and is
/// overridden only where the two clients actually differ. Implementations are
/// constructed per invocation and hold no mutable state, so parsing the same
/// result twice yields the same answer.
pub trait TfvcCommand {
    type Output;

    fn arguments(&self) -> ArgumentProvider;

    fn options(&self) -> ExecutionOptions {
        ExecutionOptions::default()
    }

    fn parse_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output>;

    fn exe_arguments(&self) -> ArgumentProvider {
        self.arguments()
    }

    fn exe_options(&self) -> ExecutionOptions {
        self.options()
    }

    fn parse_exe_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        self.parse_output(result)
    }
}
