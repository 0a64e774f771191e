//! Command-line interface for soonsal-deploy.
//!
//! One command: deploy the given HTML files into the site repository,
//! update its indexes, then commit and push.

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::adapters::{GitPublisher, PublishError};
use crate::config::ResolvedConfig;
use crate::core::{DeployOptions, DeployReport, Deployer};

/// soonsal-deploy - publish newsletter pages to the static site
#[derive(Parser, Debug)]
#[command(name = "soonsal-deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// HTML files to deploy (e.g. ~/Downloads/순살브리핑_20260302.html)
    pub files: Vec<PathBuf>,

    /// Site repository root (default: ~/kdvol.github.io)
    #[arg(long, env = "SOONSAL_REPO")]
    pub repo: Option<PathBuf>,

    /// Copy files and edit indexes without pulling, committing or pushing
    #[arg(long, env = "SOONSAL_NO_GIT")]
    pub no_git: bool,

    /// Commit but do not push
    #[arg(long, env = "SOONSAL_NO_PUSH", conflicts_with = "no_git")]
    pub no_push: bool,
}

impl Cli {
    /// Execute the deploy
    pub async fn execute(self) -> Result<DeployReport> {
        if self.files.is_empty() {
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("Example: soonsal-deploy ~/Downloads/순살브리핑_20260302.html ~/Downloads/순살크립토_20260302.html");
            anyhow::bail!("No input files given");
        }

        let config = ResolvedConfig::load(self.repo.as_deref())?;
        let publisher = GitPublisher::new(&config.repo, &config.remote, &config.branch);
        let options = DeployOptions {
            git: !self.no_git,
            push: !self.no_push,
        };

        let deployer = Deployer::new(config, Box::new(publisher), options);
        let report = deployer.deploy(&self.files).await?;
        print_report(&report);

        Ok(report)
    }
}

fn print_report(report: &DeployReport) {
    for item in &report.items {
        println!("{} → {}", item.content_type, item.deploy_path);
    }
    for skipped in &report.skipped {
        eprintln!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    for directory in &report.missing_archives {
        eprintln!("No archive index in {}/, not updated", directory);
    }
    for condition in &report.conditions {
        eprintln!("Index not fully updated: {}", condition);
    }

    if report.pushed {
        println!("Done! {}", report.commit_message);
    } else if report.committed {
        println!("Committed (not pushed): {}", report.commit_message);
    } else {
        println!("Indexes updated (git skipped): {}", report.commit_message);
    }
}

/// Process exit code for a failed run: a failing git command's own code,
/// otherwise 1
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<PublishError>()
        .and_then(PublishError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
