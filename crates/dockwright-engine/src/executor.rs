use std::path::Path;
use std::process::Stdio;

use crate::process::ProcessError;

/// Abstraction over external command execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run a command in `dir`, streaming its output to the terminal.
    async fn run(&self, program: &str, args: &[String], dir: &Path) -> Result<(), ProcessError>;

    /// Run a command with data piped to stdin and capture stdout.
    async fn run_with_stdin(
        &self,
        program: &str,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<String, ProcessError>;
}

/// Executes commands with `tokio::process`.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn run(&self, program: &str, args: &[String], dir: &Path) -> Result<(), ProcessError> {
        tracing::debug!(program, ?args, dir = %dir.display(), "running command");

        let status = tokio::process::Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ProcessError::NotFound {
                program: program.to_owned(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::CommandFailed {
                program: program.to_owned(),
                args: args.to_vec(),
                status: status.to_string(),
            })
        }
    }

    async fn run_with_stdin(
        &self,
        program: &str,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<String, ProcessError> {
        use tokio::io::AsyncWriteExt;

        tracing::debug!(program, ?args, "running command with stdin");

        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ProcessError::NotFound {
                program: program.to_owned(),
                source: e,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(stdin_data)
                .await
                .map_err(|e| ProcessError::StdinWrite {
                    program: program.to_owned(),
                    source: e,
                })?;
            stdin
                .shutdown()
                .await
                .map_err(|e| ProcessError::StdinWrite {
                    program: program.to_owned(),
                    source: e,
                })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ProcessError::NotFound {
                program: program.to_owned(),
                source: e,
            })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| ProcessError::InvalidUtf8 {
                program: program.to_owned(),
                source: e,
            })
        } else {
            Err(ProcessError::CommandFailed {
                program: program.to_owned(),
                args: args.to_vec(),
                status: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            })
        }
    }
}
