use std::path::{Path, PathBuf};

use crate::audit::AuditLogger;
use crate::commands::{
    Add, Delete, GetFileContent, GetInfo, GetVersion, ItemInfo, PendingChange, Status,
    TfvcCommand, Undo,
};
use crate::config::Config;
use crate::context::ServerContext;
use crate::error::TfvcResult;
use crate::exec::{Executor, ProcessExecutor};

/// Which client the configured tool location points at.
///
/// The cross-platform CLC and the native `tf.exe` accept the same logical
/// operations but differ in some subcommand spellings and banner phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFlavor {
    Clc,
    Exe,
}

impl ToolFlavor {
    pub fn from_location(location: &Path) -> Self {
        let is_exe = location
            .file_name()
            .map(|name| name.eq_ignore_ascii_case("tf.exe"))
            .unwrap_or(false);
        if is_exe {
            ToolFlavor::Exe
        } else {
            ToolFlavor::Clc
        }
    }
}

/// A local TFVC workspace and the client used to talk to it.
///
/// One method per logical operation. Each call builds the flavor-appropriate
/// argument list, hands it to the executor, appends the credential-masked
/// rendering to the audit log, and parses the result. Errors propagate once;
/// retrying a version-control mutation is the caller's decision.
pub struct Repository {
    tool_location: PathBuf,
    flavor: ToolFlavor,
    context: Option<ServerContext>,
    working_dir: PathBuf,
    executor: Box<dyn Executor>,
    audit: Option<AuditLogger>,
}

impl Repository {
    pub fn new(
        tool_location: impl Into<PathBuf>,
        context: Option<ServerContext>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::with_executor(tool_location, context, working_dir, Box::new(ProcessExecutor))
    }

    pub fn with_executor(
        tool_location: impl Into<PathBuf>,
        context: Option<ServerContext>,
        working_dir: impl Into<PathBuf>,
        executor: Box<dyn Executor>,
    ) -> Self {
        let tool_location = tool_location.into();
        let flavor = ToolFlavor::from_location(&tool_location);
        Self {
            tool_location,
            flavor,
            context,
            working_dir: working_dir.into(),
            executor,
            audit: None,
        }
    }

    /// Build a repository from configuration, wiring up the audit log when
    /// `behavior.log_commands` is set
    pub fn from_config(
        config: &Config,
        context: Option<ServerContext>,
        working_dir: impl Into<PathBuf>,
    ) -> TfvcResult<Self> {
        let mut repository = Self::new(config.tool_location(), context, working_dir);
        if config.behavior.log_commands {
            repository.audit = Some(AuditLogger::new()?);
        }
        Ok(repository)
    }

    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn tool_location(&self) -> &Path {
        &self.tool_location
    }

    pub fn flavor(&self) -> ToolFlavor {
        self.flavor
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Version of the installed client, from its banner line
    pub async fn check_version(&self) -> TfvcResult<String> {
        self.run(&GetVersion::new()).await
    }

    pub async fn add<I, S>(&self, item_paths: I) -> TfvcResult<Vec<PathBuf>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = Add::new(self.context.as_ref(), item_paths)?;
        self.run(&command).await
    }

    pub async fn delete<I, S>(&self, item_paths: I) -> TfvcResult<Vec<PathBuf>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = Delete::new(self.context.as_ref(), item_paths)?;
        self.run(&command).await
    }

    pub async fn undo<I, S>(&self, item_paths: I) -> TfvcResult<Vec<PathBuf>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = Undo::new(self.context.as_ref(), item_paths)?;
        self.run(&command).await
    }

    pub async fn get_file_content(
        &self,
        local_path: &str,
        version_spec: Option<&str>,
        ignore_file_not_found: bool,
    ) -> TfvcResult<String> {
        let command = GetFileContent::new(
            self.context.as_ref(),
            local_path,
            version_spec,
            ignore_file_not_found,
        )?;
        self.run(&command).await
    }

    /// Pending changes for the whole workspace, or for the given items
    pub async fn status<I, S>(&self, local_paths: I) -> TfvcResult<Vec<PendingChange>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = Status::new(self.context.as_ref(), local_paths);
        self.run(&command).await
    }

    pub async fn get_info<I, S>(&self, item_paths: I) -> TfvcResult<Vec<ItemInfo>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = GetInfo::new(self.context.as_ref(), item_paths)?;
        self.run(&command).await
    }

    async fn run<C: TfvcCommand>(&self, command: &C) -> TfvcResult<C::Output> {
        let (provider, mut options) = match self.flavor {
            ToolFlavor::Clc => (command.arguments(), command.options()),
            ToolFlavor::Exe => (command.exe_arguments(), command.exe_options()),
        };
        if options.cwd.is_none() {
            options.cwd = Some(self.working_dir.clone());
        }

        let mut invocation = Vec::with_capacity(provider.arguments().len() + 1);
        invocation.push(provider.command().to_string());
        invocation.extend(provider.arguments().iter().cloned());

        let result = self
            .executor
            .execute(&self.tool_location, &invocation, &options)
            .await?;

        if let Some(audit) = &self.audit {
            // Only the masked rendering is logged; a logging failure must not
            // fail the command itself
            let _ = audit.log_command(
                &provider.display_string(),
                &self.working_dir,
                result.exit_code,
            );
        }

        match self.flavor {
            ToolFlavor::Clc => command.parse_output(&result),
            ToolFlavor::Exe => command.parse_exe_output(&result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Credentials;
    use crate::exec::{ExecutionOptions, ExecutionResult};
    use async_trait::async_trait;
    use std::io;
    use std::sync::{Arc, Mutex};

    type Invocations = Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>;

    /// Returns a canned result and records what it was asked to run
    struct ScriptedExecutor {
        result: ExecutionResult,
        invocations: Invocations,
    }

    impl ScriptedExecutor {
        fn new(result: ExecutionResult) -> (Self, Invocations) {
            let invocations: Invocations = Arc::new(Mutex::new(Vec::new()));
            let executor = Self {
                result,
                invocations: Arc::clone(&invocations),
            };
            (executor, invocations)
        }
    }

    #[async_trait]
    impl Executor for ScriptedExecutor {
        async fn execute(
            &self,
            tool: &Path,
            arguments: &[String],
            _options: &ExecutionOptions,
        ) -> io::Result<ExecutionResult> {
            self.invocations
                .lock()
                .unwrap()
                .push((tool.to_path_buf(), arguments.to_vec()));
            Ok(self.result.clone())
        }
    }

    #[test]
    fn test_flavor_from_location() {
        assert_eq!(
            ToolFlavor::from_location(Path::new("/opt/tee-clc/tf")),
            ToolFlavor::Clc
        );
        assert_eq!(
            ToolFlavor::from_location(Path::new("/mnt/c/tools/TF.exe")),
            ToolFlavor::Exe
        );
        assert_eq!(
            ToolFlavor::from_location(Path::new("tf")),
            ToolFlavor::Clc
        );
    }

    #[tokio::test]
    async fn test_undo_runs_tool_and_parses() {
        let (executor, _) =
            ScriptedExecutor::new(ExecutionResult::new(0, "Undoing edit: README.md\n", ""));
        let repository =
            Repository::with_executor("/opt/tee-clc/tf", None, "/workspace", Box::new(executor));

        let files = repository.undo(["README.md"]).await.unwrap();
        assert_eq!(files, [PathBuf::from("README.md")]);
    }

    #[tokio::test]
    async fn test_invocation_shape() {
        let (executor, invocations) = ScriptedExecutor::new(ExecutionResult::new(0, "", ""));
        let repository =
            Repository::with_executor("/opt/tee-clc/tf", None, "/workspace", Box::new(executor));

        repository.undo(["README.md"]).await.unwrap();

        // Command name first, then arguments, against the configured tool
        let seen = invocations.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, PathBuf::from("/opt/tee-clc/tf"));
        assert_eq!(seen[0].1, ["undo", "-noprompt", "README.md"]);
    }

    #[tokio::test]
    async fn test_real_invocation_carries_login_token() {
        let (executor, invocations) =
            ScriptedExecutor::new(ExecutionResult::new(0, "Undoing edit: README.md\n", ""));
        let context = ServerContext::with_credentials(
            "http://server:8080/tfs/collection1",
            Credentials::new("user1", "pass1"),
        );
        let repository = Repository::with_executor(
            "/opt/tee-clc/tf",
            Some(context),
            "/workspace",
            Box::new(executor),
        );

        repository.undo(["README.md"]).await.unwrap();

        // The tool sees the real credential token, never the mask
        let seen = invocations.lock().unwrap();
        assert!(seen[0].1.contains(&"-login:user1,pass1".to_string()));
        assert!(!seen[0].1.iter().any(|token| token == "********"));
    }

    #[tokio::test]
    async fn test_exe_flavor_uses_exe_arguments() {
        let (executor, invocations) =
            ScriptedExecutor::new(ExecutionResult::new(0, "file content", ""));
        let repository = Repository::with_executor(
            "/mnt/c/tools/tf.exe",
            None,
            "/workspace",
            Box::new(executor),
        );
        assert_eq!(repository.flavor(), ToolFlavor::Exe);

        let content = repository
            .get_file_content("README.md", None, false)
            .await
            .unwrap();
        assert_eq!(content, "file content");

        // The exe client spells this subcommand `view`
        let seen = invocations.lock().unwrap();
        assert_eq!(seen[0].1[0], "view");
    }

    #[tokio::test]
    async fn test_audit_log_gets_mask_never_password() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("history.log");

        let context = ServerContext::with_credentials(
            "http://server:8080/tfs/collection1",
            Credentials::new("user1", "pass1"),
        );
        let (executor, _) =
            ScriptedExecutor::new(ExecutionResult::new(0, "Undoing edit: README.md\n", ""));
        let repository = Repository::with_executor(
            "/opt/tee-clc/tf",
            Some(context),
            "/workspace",
            Box::new(executor),
        )
        .with_audit_logger(AuditLogger::with_path(&log_path).unwrap());

        repository.undo(["README.md"]).await.unwrap();

        let logged = std::fs::read_to_string(&log_path).unwrap();
        assert!(logged.contains("********"));
        assert!(!logged.contains("pass1"));
    }

    #[tokio::test]
    async fn test_construction_error_before_execution() {
        let (executor, invocations) = ScriptedExecutor::new(ExecutionResult::new(0, "", ""));
        let repository =
            Repository::with_executor("/opt/tee-clc/tf", None, "/workspace", Box::new(executor));

        let paths: Vec<String> = Vec::new();
        let err = repository.delete(paths).await.unwrap_err();
        assert!(matches!(err, crate::error::TfvcError::ArgumentMissing(_)));

        // Validation failed before any process ran
        assert!(invocations.lock().unwrap().is_empty());
    }
}
