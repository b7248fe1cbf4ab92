use std::path::PathBuf;

use crate::commands::builder::{ArgumentBuilder, ArgumentProvider};
use crate::commands::helper;
use crate::commands::TfvcCommand;
use crate::context::ServerContext;
use crate::error::{TfvcError, TfvcResult};
use crate::exec::ExecutionResult;

/// Undoes pending changes to the files passed in and returns the files
/// actually undone.
///
/// `undo [/recursive] <itemSpec>...`
#[derive(Debug)]
pub struct Undo<'a> {
    context: Option<&'a ServerContext>,
    item_paths: Vec<String>,
}

/// Asking to undo an item with no pending changes is a no-op, not an error
const NO_PENDING_CHANGES: &str = "No pending changes were found for ";

impl<'a> Undo<'a> {
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

    // A data line reads '<verb>: <filename>', e.g. 'Undoing edit: file1.txt'.
    // An unexpected verb phrasing with no separator yields no filename.
    fn file_from_line(line: &str) -> Option<&str> {
        match line.find(": ") {
            Some(index) if index > 0 => Some(&line[index + 2..]),
            _ => None,
        }
    }
}

impl TfvcCommand for Undo<'_> {
    type Output = Vec<PathBuf>;

    fn arguments(&self) -> ArgumentProvider {
        ArgumentBuilder::with_context("undo", self.context)
            .add_all(self.item_paths.iter().cloned())
            .build()
    }

    /// Example output:
    /// ```text
    /// folder1:
    /// Undoing edit: file1.txt
    /// Undoing add: file2.txt
    /// ```
    fn parse_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        if helper::has_error(result, NO_PENDING_CHANGES) {
            return Ok(Vec::new());
        }

        helper::process_errors(self.arguments().command(), result, false)?;

        let lines = helper::split_into_lines(&result.stdout, true, true);
        let mut files = Vec::new();
        let mut current_folder = "";
        for line in lines {
            if helper::is_file_path(line) {
                current_folder = line;
            } else if let Some(file) = Self::file_from_line(line) {
                files.push(helper::get_file_path(current_folder, file, None));
            }
        }
        Ok(files)
    }
}
