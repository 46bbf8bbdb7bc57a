//! Source file discovery.
//!
//! Listers return absolute paths under the configured scan directories that
//! carry a recognized extension, sorted and deduplicated.

use std::path::{Path, PathBuf};
use std::process::Command;

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;

/// Directories a walk never descends into.
const SKIP_DIRS: &[&str] = &["node_modules", ".git"];

pub trait Inventory {
    fn list(&self, config: &Config) -> Result<Vec<PathBuf>, Error>;
}

/// Pick the lister a config asks for.
pub fn for_config(config: &Config) -> Box<dyn Inventory> {
    if config.use_git {
        Box::new(GitInventory)
    } else {
        Box::new(WalkInventory)
    }
}

fn finish(mut files: Vec<PathBuf>) -> Vec<PathBuf> {
    files.sort();
    files.dedup();
    files
}

/// Files tracked by git (`git ls-files`). Untracked files are excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitInventory;

impl Inventory for GitInventory {
    fn list(&self, config: &Config) -> Result<Vec<PathBuf>, Error> {
        let output = Command::new("git")
            .args(["ls-files", "-z", "--cached", "--"])
            .args(&config.scan_dirs)
            .current_dir(&config.project_root)
            .output()
            .map_err(|e| Error::GitError(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitError(format!(
                "git ls-files failed: {}",
                stderr.trim()
            )));
        }

        let files: Vec<PathBuf> = output
            .stdout
            .split(|&b| b == 0)
            .filter(|entry| !entry.is_empty())
            .map(|entry| config.project_root.join(&*String::from_utf8_lossy(entry)))
            .filter(|path| config.is_recognized(path) && path.is_file())
            .collect();
        debug!(count = files.len(), "listed tracked files");
        Ok(finish(files))
    }
}

/// Walk the scan directories, honoring `.gitignore` but not requiring a repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkInventory;

fn is_skipped(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| SKIP_DIRS.contains(&n))
}

impl Inventory for WalkInventory {
    fn list(&self, config: &Config) -> Result<Vec<PathBuf>, Error> {
        let mut files = Vec::new();
        for dir in &config.scan_dirs {
            let walker = WalkBuilder::new(dir)
                .hidden(false)
                .git_ignore(true)
                .require_git(false)
                .filter_entry(|entry| !(entry.path().is_dir() && is_skipped(entry.path())))
                .build();

            for entry in walker {
                let path = match entry {
                    Ok(entry) => entry.into_path(),
                    Err(e) => {
                        warn!("skipping unreadable entry: {e}");
                        continue;
                    }
                };
                if path.is_file() && config.is_recognized(&path) {
                    files.push(path);
                }
            }
        }
        debug!(count = files.len(), "walked source files");
        Ok(finish(files))
    }
}

/// A pre-listed inventory, passed through verbatim.
impl Inventory for Vec<PathBuf> {
    fn list(&self, _config: &Config) -> Result<Vec<PathBuf>, Error> {
        Ok(self.clone())
    }
}
