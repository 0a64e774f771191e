//! Main deploy orchestrator.
//!
//! Coordinates classification, copying, index mutation and publishing for
//! one batch of input files. Every step runs sequentially; a publish failure
//! aborts the run and leaves the working tree as it is.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::adapters::Publisher;
use crate::config::{paths, ResolvedConfig};
use crate::domain::{ClassifyError, ContentDate, ContentItem};
use crate::index::{ArchiveIndex, HomeIndex, IndexError, Placement};

use super::metadata::extract_keywords;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("No valid files to deploy")]
    NoValidFiles,
}

/// Which publish steps to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    /// Pull before editing, then stage and commit
    pub git: bool,

    /// Push after committing (ignored when `git` is false)
    pub push: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            git: true,
            push: true,
        }
    }
}

/// An input file left out of the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: ClassifyError,
}

/// Outcome of a deploy run
#[derive(Debug, Clone, Default)]
pub struct DeployReport {
    /// Deployed items, in input order
    pub items: Vec<ContentItem>,

    /// Inputs that could not be classified
    pub skipped: Vec<SkippedFile>,

    /// Category directories whose archive index was missing
    pub missing_archives: Vec<String>,

    /// Index mutations that could not be applied
    pub conditions: Vec<IndexError>,

    /// Generated commit message
    pub commit_message: String,

    /// Whether a commit was recorded
    pub committed: bool,

    /// Whether the commit was pushed
    pub pushed: bool,
}

/// Commit message for a batch: `Add {names joined by " & "} {MMDD}`
pub fn commit_message(items: &[ContentItem]) -> String {
    let names: Vec<String> = items.iter().map(ContentItem::commit_name).collect();
    let month_day = items
        .first()
        .map(|item| item.date.month_day.as_str())
        .unwrap_or_default();
    format!("Add {} {}", names.join(" & "), month_day)
}

/// Group items by date, oldest first, keeping input order within a date
pub fn group_by_date(items: &[ContentItem]) -> BTreeMap<ContentDate, Vec<ContentItem>> {
    let mut groups: BTreeMap<ContentDate, Vec<ContentItem>> = BTreeMap::new();
    for item in items {
        groups
            .entry(item.date.clone())
            .or_default()
            .push(item.clone());
    }
    groups
}

/// Main deploy orchestrator
pub struct Deployer {
    config: ResolvedConfig,
    publisher: Box<dyn Publisher>,
    options: DeployOptions,
}

impl Deployer {
    /// Create a deployer publishing through `publisher`
    pub fn new(config: ResolvedConfig, publisher: Box<dyn Publisher>, options: DeployOptions) -> Self {
        Self {
            config,
            publisher,
            options,
        }
    }

    /// Deploy a batch of input files
    #[instrument(skip(self, inputs), fields(repo = %self.config.repo.display(), files = inputs.len()))]
    pub async fn deploy(&self, inputs: &[PathBuf]) -> Result<DeployReport> {
        let mut report = DeployReport::default();

        if self.options.git {
            info!(publisher = self.publisher.name(), "Pulling");
            self.publisher.pull().await?;
        }

        for input in inputs {
            match self.stage_file(input).await? {
                Ok(item) => report.items.push(item),
                Err(reason) => {
                    warn!(file = %input.display(), %reason, "Cannot parse, skipping");
                    report.skipped.push(SkippedFile {
                        path: input.clone(),
                        reason,
                    });
                }
            }
        }

        if report.items.is_empty() {
            return Err(DeployError::NoValidFiles.into());
        }

        for (date, items) in group_by_date(&report.items) {
            info!(date = %date, items = items.len(), "Updating indexes");
            self.update_home(&date, &items, &mut report).await?;
            for item in &items {
                self.update_archive(item, &mut report).await?;
            }
        }

        report.commit_message = commit_message(&report.items);

        if self.options.git {
            info!(message = %report.commit_message, "Committing");
            self.publisher.stage_all().await?;
            self.publisher.commit(&report.commit_message).await?;
            report.committed = true;

            if self.options.push {
                info!("Pushing");
                self.publisher.push().await?;
                report.pushed = true;
            }
        }

        Ok(report)
    }

    /// Classify, summarize and copy one input. Classification failures are
    /// returned as the inner error; I/O failures abort the run.
    async fn stage_file(&self, input: &Path) -> Result<Result<ContentItem, ClassifyError>> {
        let path = paths::expand_tilde(input);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let classification = match self.config.classifier.classify(&filename) {
            Ok(classification) => classification,
            Err(e) => return Ok(Err(e)),
        };

        let html = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;

        let rule = classification.rule;
        let item = ContentItem::new(
            rule.content_type,
            rule.directory.clone(),
            &rule.suffix,
            classification.date,
            extract_keywords(&html),
        );

        let dest = paths::destination(&self.config.repo, &item.deploy_path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if is_same_file(&path, &dest).await {
            debug!(file = %filename, "Already in place, not copying");
        } else {
            fs::copy(&path, &dest).await.with_context(|| {
                format!("Failed to copy {} to {}", path.display(), dest.display())
            })?;
        }
        info!(file = %filename, dest = %item.deploy_path, keywords = %item.keywords, "Copied");

        Ok(Ok(item))
    }

    async fn update_home(
        &self,
        date: &ContentDate,
        items: &[ContentItem],
        report: &mut DeployReport,
    ) -> Result<()> {
        let path = paths::home_index(&self.config.repo);
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read homepage: {}", path.display()))?;
        let mut home = HomeIndex::parse(&content);

        let previous = home.backfill_candidate(date, items).cloned();
        let previous_keywords = match previous {
            Some(ref old) => self.load_briefing_keywords(old).await,
            None => None,
        };

        let update = home.apply(date, items, previous_keywords.as_deref());
        if let Some(old) = &update.previous_latest {
            info!(from = %old, to = %date, backfilled = update.backfilled, "Moved latest briefing");
        }
        for condition in update.conditions {
            warn!(index = %path.display(), %condition, "Homepage update incomplete");
            report.conditions.push(condition);
        }

        fs::write(&path, home.render())
            .await
            .with_context(|| format!("Failed to write homepage: {}", path.display()))?;
        info!(index = %paths::HOME_INDEX, "Updated");

        Ok(())
    }

    async fn update_archive(&self, item: &ContentItem, report: &mut DeployReport) -> Result<()> {
        let path = paths::archive_index(&self.config.repo, &item.directory);
        if !path.exists() {
            warn!(directory = %item.directory, "Archive index not found, skipping");
            if !report.missing_archives.contains(&item.directory) {
                report.missing_archives.push(item.directory.clone());
            }
            return Ok(());
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read archive index: {}", path.display()))?;
        let mut archive = ArchiveIndex::parse(&content);

        match archive.add_item(item) {
            Ok(placement) => {
                fs::write(&path, archive.render())
                    .await
                    .with_context(|| format!("Failed to write archive index: {}", path.display()))?;
                let new_section = placement == Placement::NewSection;
                info!(index = %format!("{}/{}", item.directory, paths::HOME_INDEX), new_section, "Updated");
            }
            Err(condition) => {
                warn!(index = %path.display(), %condition, "Archive update skipped");
                report.conditions.push(condition);
            }
        }

        Ok(())
    }

    /// Re-extract the summary of the briefing deployed for `date`
    async fn load_briefing_keywords(&self, date: &ContentDate) -> Option<String> {
        let path = paths::briefing_file(&self.config.repo, date);
        match fs::read_to_string(&path).await {
            Ok(html) => Some(extract_keywords(&html)),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Previous briefing not found, skipping back-fill");
                None
            }
        }
    }
}

async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
