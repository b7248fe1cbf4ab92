use crate::commands::builder::{ArgumentBuilder, ArgumentProvider};
use crate::commands::helper;
use crate::commands::TfvcCommand;
use crate::context::ServerContext;
use crate::error::{TfvcError, TfvcResult};
use crate::exec::ExecutionResult;

/// Fetches the contents of a file at an optional version.
///
/// The cross-platform client spells this `print`; the native client spells it
/// `view`. The option shapes are identical.
#[derive(Debug)]
pub struct GetFileContent<'a> {
    context: Option<&'a ServerContext>,
    local_path: String,
    version_spec: Option<String>,
    ignore_file_not_found: bool,
}

const NO_FILE_MATCHES: &str = "No file matches";
const NOT_AT_VERSION: &str = "The specified file does not exist at the specified version";

impl<'a> GetFileContent<'a> {
    pub fn new(
        context: Option<&'a ServerContext>,
        local_path: &str,
        version_spec: Option<&str>,
        ignore_file_not_found: bool,
    ) -> TfvcResult<Self> {
        if local_path.is_empty() {
            return Err(TfvcError::argument_missing("local_path"));
        }
        Ok(Self {
            context,
            local_path: local_path.to_string(),
            version_spec: version_spec.map(str::to_string),
            ignore_file_not_found,
        })
    }

    fn build_arguments(&self, command: &str) -> ArgumentProvider {
        let mut builder =
            ArgumentBuilder::with_context(command, self.context).add(self.local_path.as_str());
        if let Some(version_spec) = &self.version_spec {
            builder = builder.add_option("version", version_spec);
        }
        builder.build()
    }
}

impl TfvcCommand for GetFileContent<'_> {
    type Output = String;

    fn arguments(&self) -> ArgumentProvider {
        self.build_arguments("print")
    }

    fn exe_arguments(&self) -> ArgumentProvider {
        self.build_arguments("view")
    }

    fn parse_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        if self.ignore_file_not_found
            && (helper::has_error(result, NO_FILE_MATCHES)
                || helper::has_error(result, NOT_AT_VERSION))
        {
            return Ok(String::new());
        }

        helper::process_errors(self.arguments().command(), result, false)?;

        // stdout is the file content, verbatim
        Ok(result.stdout.clone())
    }

    // The exe output is parsed identically; failures therefore report the
    // primary command name.
}
