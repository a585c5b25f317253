//! External command execution
//!
//! The auth tool is only ever reached through [`CommandRunner`].

use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Runs a named program and captures its standard output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, returning stdout on a zero exit status
    async fn run(&self, program: &str, args: &[&str]) -> AppResult<Vec<u8>>;
}

/// Spawns real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> AppResult<Vec<u8>> {
        debug!("Running external command: {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            };
            return Err(AppError::CommandFailed {
                program: program.to_string(),
                detail,
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout() {
        let out = SystemCommandRunner.run("echo", &["hello"]).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim(), "hello");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        let err = SystemCommandRunner.run("false", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::CommandFailed { ref program, .. } if program == "false"));
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let err = SystemCommandRunner
            .run("cf-onboard-no-such-binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
