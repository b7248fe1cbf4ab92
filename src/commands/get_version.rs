use std::sync::LazyLock;

use regex::Regex;

use crate::commands::builder::{ArgumentBuilder, ArgumentProvider};
use crate::commands::helper;
use crate::commands::TfvcCommand;
use crate::error::{TfvcError, TfvcResult};
use crate::exec::ExecutionResult;

// CLC banner: "Team Explorer Everywhere Command Line Client (version 14.0.3.201603291047)"
static CLC_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(.*\(version )([.\d]*)(\).*)").expect("valid regex"));

// exe banner: "Microsoft (R) TF - Team Foundation Version Control Tool, Version 14.102.25619.0"
static EXE_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(.*version )([.\d]*)(.*)").expect("valid regex"));

/// Determines the version of the command-line client by asking for the help
/// of the add command; the first output line of every command carries the
/// version banner.
pub struct GetVersion;

impl GetVersion {
    pub fn new() -> Self {
        Self
    }

    fn parse_version(&self, result: &ExecutionResult, banner: &Regex) -> TfvcResult<String> {
        helper::process_errors(self.arguments().command(), result, false)?;

        let lines = helper::split_into_lines(&result.stdout, true, false);
        let Some(first_line) = lines.first().copied() else {
            return Ok(String::new());
        };

        let value = match banner.captures(first_line) {
            Some(captures) => captures.get(2).map_or("", |m| m.as_str()),
            // No banner match: keep the whole line so the token check below
            // can tell a localized banner from an empty one
            None => first_line,
        };

        // More than one token left means the banner was not the English one we
        // can parse; fail fast rather than hand mis-parsed values downstream.
        let mut tokens = value.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (_, Some(_)) => Err(TfvcError::NotAnEnuCommandLine {
                command: self.arguments().command().to_string(),
            }),
            (Some(version), None) => Ok(version.to_string()),
            (None, None) => Ok(String::new()),
        }
    }
}

impl Default for GetVersion {
    fn default() -> Self {
        Self::new()
    }
}

impl TfvcCommand for GetVersion {
    type Output = String;

    fn arguments(&self) -> ArgumentProvider {
        ArgumentBuilder::new("add").add_switch("?").build()
    }

    fn parse_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        self.parse_version(result, &CLC_BANNER)
    }

    fn parse_exe_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        self.parse_version(result, &EXE_BANNER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments() {
        let cmd = GetVersion::new();
        assert_eq!(cmd.arguments().display_string(), "add -noprompt -?");
        assert_eq!(cmd.arguments().command(), "add");
    }

    #[test]
    fn test_parse_clc_banner() {
        let cmd = GetVersion::new();
        let result = ExecutionResult::new(
            0,
            "Team Explorer Everywhere Command Line Client (version 14.0.3.201603291047)\n",
            "",
        );
        assert_eq!(cmd.parse_output(&result).unwrap(), "14.0.3.201603291047");
    }

    #[test]
    fn test_parse_exe_banner() {
        let cmd = GetVersion::new();
        let result = ExecutionResult::new(
            0,
            "Microsoft (R) TF - Team Foundation Version Control Tool, Version 14.102.25619.0\n",
            "",
        );
        assert_eq!(cmd.parse_exe_output(&result).unwrap(), "14.102.25619.0");
    }

    #[test]
    fn test_parse_non_english_banner_fails_fast() {
        let cmd = GetVersion::new();
        // Spanish exe banner: the version keyword is accented, so the match
        // fails and multiple tokens remain
        let result = ExecutionResult::new(
            0,
            "Microsoft (R) TF - Herramienta Control de versiones de Team Foundation, versi\u{f3}n 14.102.25619.0\n",
            "",
        );
        let err = cmd.parse_exe_output(&result).unwrap_err();
        assert!(matches!(err, TfvcError::NotAnEnuCommandLine { .. }));
    }

    #[test]
    fn test_parse_empty_stdout_is_empty_version() {
        let cmd = GetVersion::new();
        let result = ExecutionResult::new(0, "", "");
        assert_eq!(cmd.parse_output(&result).unwrap(), "");
    }

    #[test]
    fn test_parse_only_first_line_considered() {
        let cmd = GetVersion::new();
        let result = ExecutionResult::new(
            0,
            "Team Explorer Everywhere Command Line Client (version 14.0.3.201603291047)\n\
             Usage: tf add [itemSpec...]\n",
            "",
        );
        assert_eq!(cmd.parse_output(&result).unwrap(), "14.0.3.201603291047");
    }

    #[test]
    fn test_parse_error_exit_code() {
        let cmd = GetVersion::new();
        let result = ExecutionResult::new(1, "", "tf: command failed\n");
        let err = cmd.parse_output(&result).unwrap_err();
        assert!(matches!(err, TfvcError::CommandFailed { .. }));
    }
}
