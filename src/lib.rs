//! soonsal-deploy - newsletter publisher for a static site repository
//!
//! Takes newsletter HTML files dropped on the command line, files them into
//! the site repository and keeps the site's index pages current.
//!
//! # Pipeline
//!
//! For each input file:
//! - Classify by filename prefix (first matching rule wins)
//! - Extract the YYYYMMDD date and a summary of the page
//! - Copy to `{category}/{YYYY}/{MMDD}{suffix}.html`
//!
//! Then, per date: update the homepage (hero pointer, date sections) and
//! the category archives, and finally `git add -A`, commit and push.
//!
//! # Modules
//!
//! - `adapters`: External system integrations (git)
//! - `core`: Summary extraction and the deploy orchestrator
//! - `domain`: Content types, dates, classification rules
//! - `index`: Homepage and archive page models
//! - `config`: Layered configuration and repository paths
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! soonsal-deploy ~/Downloads/순살브리핑_20260302.html ~/Downloads/순살크립토_20260302.html
//!
//! # Edit a scratch checkout without touching git
//! soonsal-deploy --repo ./site --no-git 순살카드뉴스_20260302.html
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod index;

// Re-export main types at crate root for convenience
pub use core::{DeployOptions, DeployReport, Deployer};
pub use domain::{Classifier, ContentDate, ContentItem, ContentType, TypeRule};
pub use index::{ArchiveIndex, HomeIndex, IndexError};
