use crate::commands::builder::{ArgumentBuilder, ArgumentProvider};
use crate::commands::helper;
use crate::commands::TfvcCommand;
use crate::context::ServerContext;
use crate::error::{TfvcError, TfvcResult};
use crate::exec::ExecutionResult;

/// Local and server details for one versioned item.
///
/// Missing keys are left empty; the tool omits lines freely (e.g. no lock
/// owner when there is no lock).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemInfo {
    pub server_item: String,
    pub local_item: String,
    pub local_version: String,
    pub server_version: String,
    pub change: String,
    pub item_type: String,
    pub lock: String,
    pub lock_owner: String,
    pub deletion_id: String,
    pub last_modified: String,
    pub file_type: String,
    pub file_size: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Local,
    Server,
}

/// Retrieves item information for each of the given items.
///
/// `info <itemSpec>...`
#[derive(Debug)]
pub struct GetInfo<'a> {
    context: Option<&'a ServerContext>,
    item_paths: Vec<String>,
}

impl<'a> GetInfo<'a> {
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

    fn apply(item: &mut ItemInfo, section: Section, key: &str, value: &str) {
        let value = value.trim().to_string();
        match key {
            "server path" => item.server_item = value,
            "local path" => item.local_item = value,
            // The changeset key appears in both sections with different meaning
            "changeset" => match section {
                Section::Local => item.local_version = value,
                Section::Server => item.server_version = value,
            },
            "change" => item.change = value,
            "type" => item.item_type = value,
            "lock" => item.lock = value,
            "lock owner" => item.lock_owner = value,
            "deletion id" => item.deletion_id = value,
            "last modified" => item.last_modified = value,
            "file type" => item.file_type = value,
            "size" => item.file_size = value,
            _ => {}
        }
    }
}

impl TfvcCommand for GetInfo<'_> {
    type Output = Vec<ItemInfo>;

    fn arguments(&self) -> ArgumentProvider {
        ArgumentBuilder::with_context("info", self.context)
            .add_all(self.item_paths.iter().cloned())
            .build()
    }

    /// Example output:
    /// ```text
    /// Local information:
    ///   Local path:  /repo/folder1/file1.txt
    ///   Server path: $/project/folder1/file1.txt
    ///   Changeset:   18
    ///   Change:      edit
    ///   Type:        file
    /// Server information:
    ///   Server path:   $/project/folder1/file1.txt
    ///   Changeset:     19
    ///   Deletion ID:   0
    ///   Lock:          none
    /// ```
    fn parse_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        helper::process_errors(self.arguments().command(), result, false)?;

        let lines = helper::split_into_lines(&result.stdout, true, true);
        let mut items = Vec::new();
        let mut current: Option<ItemInfo> = None;
        let mut section = Section::Local;

        for line in lines {
            let lowered = line.trim().to_lowercase();
            if lowered.starts_with("local information") {
                // Each item starts with a fresh local section
                if let Some(done) = current.take() {
                    items.push(done);
                }
                current = Some(ItemInfo::default());
                section = Section::Local;
            } else if lowered.starts_with("server information") {
                section = Section::Server;
            } else if let Some(item) = current.as_mut() {
                if let Some((key, value)) = line.split_once(':') {
                    Self::apply(item, section, &key.trim().to_lowercase(), value);
                }
            }
        }
        if let Some(done) = current.take() {
            items.push(done);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ITEM: &str = "\
Local information:
  Local path:  /repo/folder1/file1.txt
  Server path: $/project/folder1/file1.txt
  Changeset:   18
  Change:      edit
  Type:        file
Server information:
  Server path:   $/project/folder1/file1.txt
  Changeset:     19
  Deletion ID:   0
  Lock:          none
  Lock owner:
  Last modified: Nov 18, 2016 11:10:20 AM
  Type:          file
  File type:     windows-1252
  Size:          1385
";

    #[test]
    fn test_empty_item_paths_rejected() {
        let paths: Vec<String> = Vec::new();
        let err = GetInfo::new(None, paths).unwrap_err();
        assert!(matches!(err, TfvcError::ArgumentMissing(_)));
    }

    #[test]
    fn test_arguments() {
        let cmd = GetInfo::new(None, ["folder1/file1.txt"]).unwrap();
        assert_eq!(
            cmd.arguments().display_string(),
            "info -noprompt folder1/file1.txt"
        );
    }

    #[test]
    fn test_parse_single_item() {
        let cmd = GetInfo::new(None, ["folder1/file1.txt"]).unwrap();
        let result = ExecutionResult::new(0, ONE_ITEM, "");

        let items = cmd.parse_output(&result).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.local_item, "/repo/folder1/file1.txt");
        assert_eq!(item.server_item, "$/project/folder1/file1.txt");
        assert_eq!(item.local_version, "18");
        assert_eq!(item.server_version, "19");
        assert_eq!(item.change, "edit");
        assert_eq!(item.item_type, "file");
        assert_eq!(item.lock, "none");
        assert_eq!(item.lock_owner, "");
        assert_eq!(item.deletion_id, "0");
        assert_eq!(item.last_modified, "Nov 18, 2016 11:10:20 AM");
        assert_eq!(item.file_type, "windows-1252");
        assert_eq!(item.file_size, "1385");
    }

    #[test]
    fn test_parse_two_items() {
        let second = "\
Local information:
  Local path:  /repo/file2.txt
  Server path: $/project/file2.txt
  Changeset:   7
Server information:
  Changeset:   9
";
        let cmd = GetInfo::new(None, ["folder1/file1.txt", "file2.txt"]).unwrap();
        let result = ExecutionResult::new(0, format!("{}{}", ONE_ITEM, second), "");

        let items = cmd.parse_output(&result).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].local_item, "/repo/file2.txt");
        assert_eq!(items[1].local_version, "7");
        assert_eq!(items[1].server_version, "9");
    }

    #[test]
    fn test_parse_empty_stdout() {
        let cmd = GetInfo::new(None, ["file1.txt"]).unwrap();
        let result = ExecutionResult::new(0, "", "");
        assert!(cmd.parse_output(&result).unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_exit_code() {
        let cmd = GetInfo::new(None, ["file1.txt"]).unwrap();
        let result = ExecutionResult::new(1, "", "The item could not be found.\n");
        assert!(cmd.parse_output(&result).is_err());
    }
}
