//! Core deploy logic.
//!
//! This module contains:
//! - Metadata: summary extraction from page HTML
//! - Orchestrator: the batch deploy driver

pub mod metadata;
pub mod orchestrator;

// Re-export commonly used types
pub use metadata::extract_keywords;
pub use orchestrator::{
    commit_message, group_by_date, DeployError, DeployOptions, DeployReport, Deployer, SkippedFile,
};
