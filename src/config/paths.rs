//! Canonical paths inside the site repository.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! ## Layout
//!
//! | Location | Purpose |
//! |----------|---------|
//! | `index.html` | Homepage (hero + date sections) |
//! | `{category}/index.html` | Category archive |
//! | `{category}/{YYYY}/{MMDD}{suffix}.html` | Deployed pages |

use std::path::{Path, PathBuf};

use crate::domain::ContentDate;
use crate::index::home::briefing_path;

/// Homepage file name, relative to the repository root
pub const HOME_INDEX: &str = "index.html";

/// Repository checked out under the user's home when nothing else is set
pub const DEFAULT_REPO_NAME: &str = "kdvol.github.io";

/// `~/kdvol.github.io`
pub fn default_repo() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_REPO_NAME))
}

/// Homepage path
pub fn home_index(repo: &Path) -> PathBuf {
    repo.join(HOME_INDEX)
}

/// Archive index for a category directory
pub fn archive_index(repo: &Path, directory: &str) -> PathBuf {
    repo.join(directory).join(HOME_INDEX)
}

/// Absolute destination of a repository-relative deploy path
pub fn destination(repo: &Path, deploy_path: &str) -> PathBuf {
    repo.join(deploy_path)
}

/// Deployed briefing for `date`
pub fn briefing_file(repo: &Path, date: &ContentDate) -> PathBuf {
    repo.join(briefing_path(date))
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
