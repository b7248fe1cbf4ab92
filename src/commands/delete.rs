use std::path::PathBuf;

use crate::commands::builder::{ArgumentBuilder, ArgumentProvider};
use crate::commands::helper;
use crate::commands::TfvcCommand;
use crate::context::ServerContext;
use crate::error::{TfvcError, TfvcResult};
use crate::exec::ExecutionResult;

/// Marks the given items for deletion and returns the affected files.
///
/// `delete [/lock:none|checkin|checkout] [/recursive] <itemSpec>...`
#[derive(Debug)]
pub struct Delete<'a> {
    context: Option<&'a ServerContext>,
    item_paths: Vec<String>,
}

impl<'a> Delete<'a> {
    pub fn new<I, S>(context: Option<&'a ServerContext>, item_paths: I) -> TfvcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item_paths: Vec<String> = item_paths.into_iter().map(Into::into).collect();
        if item_paths.is_empty() {
            return Err(TfvcError::argument_missing("item_paths"));
        }
        Ok(Self {
            context,
            item_paths,
        })
    }
}

impl TfvcCommand for Delete<'_> {
    type Output = Vec<PathBuf>;

    fn arguments(&self) -> ArgumentProvider {
        ArgumentBuilder::with_context("delete", self.context)
            .add_all(self.item_paths.iter().cloned())
            .build()
    }

    /// Example output:
    /// ```text
    /// folder1:
    /// file1.txt
    /// ```
    fn parse_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        // delete exits with 0 on success and 100 on failure
        if result.exit_code == 100 {
            helper::process_errors(self.arguments().command(), result, true)?;
        }

        let lines = helper::split_into_lines(&result.stdout, true, true);
        let mut files = Vec::new();
        let mut current_folder = "";
        for line in lines {
            if helper::is_file_path(line) {
                current_folder = line;
            } else if !line.is_empty() {
                // No prefix on the filename line for delete
                files.push(helper::get_file_path(current_folder, line, None));
            }
        }
        Ok(files)
    }
}
