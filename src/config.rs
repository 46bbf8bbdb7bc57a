//! Run configuration.
//!
//! A [`Config`] is built once per run from CLI flags layered over an optional
//! JSON file and threaded by reference through the builder and resolvers.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify::LocatorClassifier;
use crate::error::Error;

/// Looked up in the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".importgraph.json";

pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

pub const DEFAULT_GRAPH_NAME: &str = "imports";

/// On-disk config. Every field is optional; CLI flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigFile {
    pub scan_dirs: Option<Vec<PathBuf>>,
    pub base_dir: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub libraries: Vec<String>,
    pub local_prefixes: Vec<String>,
    pub graph_name: Option<String>,
    pub url_prefix: Option<String>,
    pub use_git: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data =
            std::fs::read_to_string(path).map_err(|e| Error::ConfigRead(path.to_path_buf(), e))?;
        serde_json::from_str(&data).map_err(|e| Error::ConfigParse(path.to_path_buf(), e))
    }

    /// Load `path` if given, else the default file in `root` if present.
    pub fn discover(root: &Path, path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = root.join(CONFIG_FILE_NAME);
                if default.is_file() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Values supplied on the command line. Empty vectors and `None` mean "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub scan_dirs: Vec<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub libraries: Vec<String>,
    pub local_prefixes: Vec<String>,
    pub graph_name: Option<String>,
    pub url_prefix: Option<String>,
    pub no_git: bool,
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonical project root; relative paths are reported against it.
    pub project_root: PathBuf,
    /// Canonical directories whose files are scanned.
    pub scan_dirs: Vec<PathBuf>,
    /// Base for project-rooted locators such as `components/...`.
    pub base_dir: PathBuf,
    /// Recognized extensions, without dots, in resolution order.
    pub extensions: Vec<String>,
    pub classifier: LocatorClassifier,
    pub graph_name: String,
    pub url_prefix: Option<String>,
    pub use_git: bool,
}

fn canonical_dir(root: &Path, dir: &Path) -> Result<PathBuf, Error> {
    let joined = root.join(dir);
    joined
        .canonicalize()
        .map_err(|e| Error::RootNotFound(joined, e))
}

/// Accept both `--ext ts --ext tsx` and `--ext ts,.tsx`.
fn normalize_extensions(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for ext in raw.iter().flat_map(|s| s.split(',')) {
        let ext = ext.trim().trim_start_matches('.');
        if !ext.is_empty() && !out.iter().any(|e| e == ext) {
            out.push(ext.to_string());
        }
    }
    out
}

impl Config {
    /// Config with defaults for `project_root`, no file and no overrides.
    pub fn for_root(project_root: &Path) -> Result<Self, Error> {
        Self::resolve(project_root, ConfigFile::default(), Overrides::default())
    }

    /// Layer `overrides` over `file` and canonicalize every directory.
    pub fn resolve(project_root: &Path, file: ConfigFile, overrides: Overrides) -> Result<Self, Error> {
        let project_root = project_root
            .canonicalize()
            .map_err(|e| Error::RootNotFound(project_root.to_path_buf(), e))?;

        let scan_dirs = if overrides.scan_dirs.is_empty() {
            file.scan_dirs.unwrap_or_default()
        } else {
            overrides.scan_dirs
        };
        let mut scan_dirs = scan_dirs
            .iter()
            .map(|d| canonical_dir(&project_root, d))
            .collect::<Result<Vec<_>, _>>()?;
        if scan_dirs.is_empty() {
            scan_dirs.push(project_root.clone());
        }

        let base_dir = match overrides.base_dir.or(file.base_dir) {
            Some(dir) => canonical_dir(&project_root, &dir)?,
            None => project_root.clone(),
        };

        let extensions = if overrides.extensions.is_empty() {
            file.extensions.unwrap_or_else(|| {
                DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
            })
        } else {
            overrides.extensions
        };

        let libraries: Vec<String> = file.libraries.into_iter().chain(overrides.libraries).collect();
        let local_prefixes: Vec<String> = file
            .local_prefixes
            .into_iter()
            .chain(overrides.local_prefixes)
            .collect();

        Ok(Self {
            project_root,
            scan_dirs,
            base_dir,
            extensions: normalize_extensions(&extensions),
            classifier: LocatorClassifier::new(&local_prefixes, &libraries),
            graph_name: overrides
                .graph_name
                .or(file.graph_name)
                .unwrap_or_else(|| DEFAULT_GRAPH_NAME.to_string()),
            url_prefix: overrides.url_prefix.or(file.url_prefix),
            use_git: !overrides.no_git && file.use_git.unwrap_or(true),
        })
    }

    pub fn is_recognized(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}
