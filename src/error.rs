//! Error types for the importgraph CLI.

use std::path::PathBuf;

use crate::graph::FileId;

/// Errors from configuration, inventory, graph construction, and output.
///
/// Per-line parse failures are not represented here; see
/// [`crate::locator::ParseError`].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Project root or scan directory does not exist.
    RootNotFound(PathBuf, std::io::Error),
    /// Cannot read a config file from disk.
    ConfigRead(PathBuf, std::io::Error),
    /// Config file contains invalid JSON or unknown fields.
    ConfigParse(PathBuf, serde_json::Error),
    /// Git command failed.
    GitError(String),
    /// Two inventory entries share the same absolute path.
    DuplicateFile(PathBuf),
    /// The same (importer, locator) pair was inserted twice.
    DuplicateEdge { importer: String, locator: String },
    /// An edge refers to a file id the graph has never handed out.
    UnknownReference { file: FileId, locator: String },
    /// Cannot write an output file.
    OutputWrite(PathBuf, std::io::Error),
    /// Graph records or a summary could not be encoded as JSON.
    Serialize(serde_json::Error),
    /// The layout engine could not be started.
    RenderSpawn(String, std::io::Error),
    /// The layout engine exited unsuccessfully.
    RenderFailed(String),
    /// No image format given and none inferable from the output path.
    UnknownFormat(PathBuf),
}

impl Error {
    /// User-facing hint to accompany the error message.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::RootNotFound(..) => Some("pass an existing directory with --root"),
            Self::GitError(_) => Some("use --no-git to scan untracked files with a directory walk"),
            Self::DuplicateFile(_) | Self::UnknownReference { .. } => {
                Some("the file inventory is inconsistent; this is a bug in the lister")
            }
            Self::RenderSpawn(..) => {
                Some("install Graphviz or choose another layout engine with --engine")
            }
            Self::UnknownFormat(_) => Some("pass --format (e.g. svg, png, pdf)"),
            _ => None,
        }
    }

    /// Whether the run may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DuplicateEdge { .. })
    }
}

// Display: lowercase, no trailing punctuation, so it composes into
// larger error messages.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound(path, source) => {
                write!(f, "cannot find directory '{}': {source}", path.display())
            }
            Self::ConfigRead(path, source) => {
                write!(f, "cannot read config '{}': {source}", path.display())
            }
            Self::ConfigParse(path, source) => {
                write!(f, "invalid config '{}': {source}", path.display())
            }
            Self::GitError(msg) => write!(f, "git: {msg}"),
            Self::DuplicateFile(path) => {
                write!(f, "file '{}' was listed twice", path.display())
            }
            Self::DuplicateEdge { importer, locator } => {
                write!(f, "'{importer}' already imports '{locator}'")
            }
            Self::UnknownReference { file, locator } => {
                write!(
                    f,
                    "import '{locator}' refers to unknown file #{}",
                    file.0
                )
            }
            Self::OutputWrite(path, source) => {
                write!(f, "cannot write '{}': {source}", path.display())
            }
            Self::Serialize(source) => write!(f, "cannot encode JSON: {source}"),
            Self::RenderSpawn(engine, source) => {
                write!(f, "cannot run layout engine '{engine}': {source}")
            }
            Self::RenderFailed(msg) => write!(f, "layout engine failed: {msg}"),
            Self::UnknownFormat(path) => {
                write!(f, "cannot infer image format from '{}'", path.display())
            }
        }
    }
}

// Implement source() for error chain introspection.
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RootNotFound(_, e)
            | Self::ConfigRead(_, e)
            | Self::OutputWrite(_, e)
            | Self::RenderSpawn(_, e) => Some(e),
            Self::ConfigParse(_, e) | Self::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_edge_is_recoverable() {
        let err = Error::DuplicateEdge {
            importer: "src/a.ts".into(),
            locator: "./b".into(),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("./b"));
    }

    #[test]
    fn duplicate_file_is_fatal_with_hint() {
        let err = Error::DuplicateFile(PathBuf::from("/proj/a.ts"));
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("/proj/a.ts"));
        assert!(err.hint().unwrap().contains("inventory"));
    }

    #[test]
    fn unknown_reference_names_locator() {
        let err = Error::UnknownReference {
            file: FileId(7),
            locator: "./x".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("./x"), "got: {msg}");
        assert!(msg.contains("#7"), "got: {msg}");
    }

    #[test]
    fn render_spawn_has_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::RenderSpawn("dot".into(), io);
        assert!(err.source().is_some());
        assert!(err.hint().unwrap().contains("Graphviz"));
    }
}
