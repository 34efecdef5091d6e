//! AWS CLI command execution.
//!
//! Runs `aws` commands as child processes and returns their stdout.

use colored::Colorize;
use regex::Regex;
use std::sync::OnceLock;
use tokio::process::Command;

/// Upper bound on accepted stdout size.
const MAX_STDOUT_BYTES: usize = 500_000;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Failed command invocation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CliError {
    /// The process ran and exited non-zero. `message` is its stderr.
    #[error("exit code {code}: {message}")]
    Exit { code: i32, message: String },
    /// The process could not be run, was killed, or its output was unusable.
    #[error("{0}")]
    Failed(String),
}

impl CliError {
    pub fn message(&self) -> &str {
        match self {
            CliError::Exit { message, .. } => message,
            CliError::Failed(message) => message,
        }
    }
}

/// Run a command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
/// The child is killed if the returned future is dropped before it exits.
pub async fn run(cmd: &str) -> Result<String, CliError> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd);
    log::trace!("split cmds={:?}", cmds);

    let (program, args) = cmds
        .split_first()
        .ok_or_else(|| CliError::Failed("Empty command".to_string()))?;

    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            log::error!("Command execution failed: {}", e);
            CliError::Failed(format!("Failed to execute command: {e}"))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(match output.status.code() {
            Some(code) => CliError::Exit {
                code,
                message: stderr,
            },
            None => CliError::Failed(format!("{}: {stderr}", output.status)),
        });
    }

    log::debug!("Success cmd: {cmd} stdout.len()={}", output.stdout.len());
    if output.stdout.len() > MAX_STDOUT_BYTES {
        return Err(CliError::Failed(format!(
            "Response too large: {} bytes",
            output.stdout.len()
        )));
    }

    String::from_utf8(output.stdout).map_err(|e| CliError::Failed(format!("Invalid UTF-8: {e}")))
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_describe_subnets() {
        let input = "aws ec2 describe-subnets --subnet-ids subnet-0a1 --output json";
        let expected = vec![
            "aws",
            "ec2",
            "describe-subnets",
            "--subnet-ids",
            "subnet-0a1",
            "--output",
            "json",
        ];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_keeps_quoted_query() {
        let input = "aws ec2 describe-subnets --query 'Subnets[0].CidrBlock'  --region \"us-east-1\"";
        let expected = vec![
            "aws",
            "ec2",
            "describe-subnets",
            "--query",
            "Subnets[0].CidrBlock",
            "--region",
            "us-east-1",
        ];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_and_strip("   ").is_empty());
    }

    #[tokio::test]
    async fn test_run_empty_command() {
        let err = run("").await.unwrap_err();
        assert_eq!(err.message(), "Empty command");
        assert_eq!(err.to_string(), "Empty command");
    }

    #[test]
    fn test_cli_error_display() {
        let err = CliError::Exit {
            code: 254,
            message: "An error occurred (InvalidSubnetID.NotFound)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "exit code 254: An error occurred (InvalidSubnetID.NotFound)"
        );
        assert_eq!(err.message(), "An error occurred (InvalidSubnetID.NotFound)");
        let err: Box<dyn std::error::Error> = Box::new(CliError::Failed("killed".into()));
        assert_eq!(err.to_string(), "killed");
    }
}
