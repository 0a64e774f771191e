//! Domain types for soonsal-deploy.
//!
//! This module contains the core data structures:
//! - Content: content types, dates and deployed items
//! - Rule: ordered filename classification rules

pub mod content;
pub mod rule;

// Re-export commonly used types
pub use content::{build_link, deploy_path, ContentDate, ContentItem, ContentType};
pub use rule::{default_rules, Classification, Classifier, ClassifyError, TypeRule};
