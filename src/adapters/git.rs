//! Git adapter for publishing the site repository.
//!
//! Runs `git` as a subprocess in the repository root with inherited
//! stdout/stderr, so progress output reaches the terminal unchanged.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{PublishError, Publisher};

/// Git adapter using subprocess mode
pub struct GitPublisher {
    /// Path to the git binary (default: "git")
    binary_path: String,

    /// Working tree root
    repo: PathBuf,

    remote: String,
    branch: String,
}

impl GitPublisher {
    /// Create a git adapter for `repo`, syncing `remote`/`branch`
    pub fn new(repo: impl Into<PathBuf>, remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            binary_path: "git".to_string(),
            repo: repo.into(),
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    /// Use a custom git binary
    pub fn with_binary_path(mut self, binary_path: impl Into<String>) -> Self {
        self.binary_path = binary_path.into();
        self
    }

    async fn run(&self, args: &[&str]) -> Result<(), PublishError> {
        let command = format!("{} {}", self.binary_path, args.join(" "));
        debug!(%command, repo = %self.repo.display(), "Running git");

        let status = Command::new(&self.binary_path)
            .args(args)
            .current_dir(&self.repo)
            .status()
            .await
            .map_err(|source| PublishError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            // Killed by a signal: no code to inherit
            let code = status.code().unwrap_or(1);
            return Err(PublishError::CommandFailed { command, code });
        }

        Ok(())
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    fn name(&self) -> &str {
        "git"
    }

    async fn pull(&self) -> Result<(), PublishError> {
        self.run(&["pull", self.remote.as_str(), self.branch.as_str()]).await
    }

    async fn stage_all(&self) -> Result<(), PublishError> {
        self.run(&["add", "-A"]).await
    }

    async fn commit(&self, message: &str) -> Result<(), PublishError> {
        self.run(&["commit", "-m", message]).await
    }

    async fn push(&self) -> Result<(), PublishError> {
        self.run(&["push", self.remote.as_str(), self.branch.as_str()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_publisher_creation() {
        let publisher = GitPublisher::new("/site", "origin", "main");
        assert_eq!(publisher.name(), "git");
        assert_eq!(publisher.binary_path, "git");
    }

    #[test]
    fn test_custom_binary_path() {
        let publisher = GitPublisher::new("/site", "origin", "main").with_binary_path("/opt/git");
        assert_eq!(publisher.binary_path, "/opt/git");
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let publisher = GitPublisher::new(std::env::temp_dir(), "origin", "main")
            .with_binary_path("/nonexistent/soonsal-git");
        let err = publisher.pull().await.unwrap_err();
        assert!(matches!(err, PublishError::Spawn { .. }));
        assert_eq!(err.exit_code(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_carries_exit_code() {
        // `false` ignores its arguments and exits with 1
        let publisher =
            GitPublisher::new(std::env::temp_dir(), "origin", "main").with_binary_path("false");
        let err = publisher.stage_all().await.unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
    }
}
