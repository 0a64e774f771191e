//! Configuration for soonsal-deploy.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (`--repo`)
//! 2. Environment variables (SOONSAL_REPO, SOONSAL_REMOTE, SOONSAL_BRANCH)
//! 3. Config file (.soonsal/config.yaml)
//! 4. Defaults (~/kdvol.github.io, origin, main, built-in type rules)
//!
//! Config file discovery:
//! - Searches current directory and parents for .soonsal/config.yaml
//! - A relative `repo` is resolved against the directory containing .soonsal/

pub mod paths;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{default_rules, Classifier, ClassifyError, TypeRule};

/// Default git remote
pub const DEFAULT_REMOTE: &str = "origin";

/// Default git branch
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to determine home directory")]
    NoHomeDir,

    #[error("Invalid type rules: {0}")]
    Rules(#[from] ClassifyError),
}

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Site repository root (relative to the project root)
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub git: GitConfig,
    /// Replacement classification rules, in priority order
    #[serde(default)]
    pub types: Option<Vec<TypeRule>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitConfig {
    pub remote: Option<String>,
    pub branch: Option<String>,
}

/// Environment overrides
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub repo: Option<String>,
    pub remote: Option<String>,
    pub branch: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            repo: std::env::var("SOONSAL_REPO").ok(),
            remote: std::env::var("SOONSAL_REMOTE").ok(),
            branch: std::env::var("SOONSAL_BRANCH").ok(),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Site repository root
    pub repo: PathBuf,
    /// Remote to pull from and push to
    pub remote: String,
    /// Branch to pull and push
    pub branch: String,
    /// Classification rules in priority order
    pub classifier: Classifier,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Load from all sources, with an optional `--repo` override
    pub fn load(repo_override: Option<&Path>) -> Result<Self, ConfigError> {
        let found = match find_config_file() {
            Some(path) => {
                let file = load_config_file(&path)?;
                Some((path, file))
            }
            None => None,
        };
        resolve(found, EnvOverrides::from_env(), repo_override)
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".soonsal").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = paths::expand_tilde(Path::new(path_str));
    if path.is_absolute() {
        path
    } else {
        base.join(&path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge the config file, environment and override into a [`ResolvedConfig`]
pub fn resolve(
    config: Option<(PathBuf, ConfigFile)>,
    env: EnvOverrides,
    repo_override: Option<&Path>,
) -> Result<ResolvedConfig, ConfigError> {
    let (config_file, file) = match config {
        Some((path, file)) => (Some(path), Some(file)),
        None => (None, None),
    };

    let repo = if let Some(repo) = repo_override {
        paths::expand_tilde(repo)
    } else if let Some(env_repo) = env.repo {
        paths::expand_tilde(Path::new(&env_repo))
    } else if let Some(file_repo) = file.as_ref().and_then(|f| f.repo.as_deref()) {
        // Project root is the parent of .soonsal/
        let base_dir = config_file
            .as_deref()
            .and_then(Path::parent)
            .and_then(Path::parent)
            .unwrap_or(Path::new("."));
        resolve_path(base_dir, file_repo)
    } else {
        paths::default_repo().ok_or(ConfigError::NoHomeDir)?
    };

    let git = file.as_ref().map(|f| f.git.clone()).unwrap_or_default();
    let remote = env
        .remote
        .or(git.remote)
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string());
    let branch = env
        .branch
        .or(git.branch)
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

    let rules = file
        .and_then(|f| f.types)
        .unwrap_or_else(default_rules);
    let classifier = Classifier::new(rules)?;

    Ok(ResolvedConfig {
        repo,
        remote,
        branch,
        classifier,
        config_file,
    })
}
