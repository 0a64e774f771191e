//! Adapter interfaces for external systems.
//!
//! Publishing the site repository is delegated to a [`Publisher`]. The
//! shipped implementation drives the `git` CLI as a subprocess.

pub mod git;

use async_trait::async_trait;
use thiserror::Error;

// Re-export the git adapter
pub use git::GitPublisher;

/// Failure of an external publish step
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },
}

impl PublishError {
    /// Exit code the process should terminate with, if the failing command
    /// reported one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            PublishError::CommandFailed { code, .. } => Some(*code),
            PublishError::Spawn { .. } => None,
        }
    }
}

/// Version-control collaborator for a deploy run
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Bring the working tree up to date before editing
    async fn pull(&self) -> Result<(), PublishError>;

    /// Stage every change in the working tree
    async fn stage_all(&self) -> Result<(), PublishError>;

    /// Record staged changes
    async fn commit(&self, message: &str) -> Result<(), PublishError>;

    /// Publish recorded changes
    async fn push(&self) -> Result<(), PublishError>;
}
