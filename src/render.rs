//! Hand a DOT description to an external layout engine.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::Error;

pub const DEFAULT_ENGINE: &str = "dot";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub engine: String,
    /// Output format passed as `-T<format>` (svg, png, pdf, ...).
    pub format: String,
    pub output: PathBuf,
}

impl RenderOptions {
    /// Use `format` if given, else the output file's extension.
    pub fn new(output: &Path, format: Option<&str>, engine: Option<&str>) -> Result<Self, Error> {
        let format = match format {
            Some(f) => f.to_string(),
            None => output
                .extension()
                .and_then(|e| e.to_str())
                .filter(|e| !e.is_empty())
                .map(str::to_ascii_lowercase)
                .ok_or_else(|| Error::UnknownFormat(output.to_path_buf()))?,
        };
        Ok(Self {
            engine: engine.unwrap_or(DEFAULT_ENGINE).to_string(),
            format,
            output: output.to_path_buf(),
        })
    }
}

/// Run `<engine> -T<format> -o <output>` with `dot` on stdin.
///
/// A failing engine's own stderr takes precedence over a failed write to its
/// stdin, which is usually just the broken pipe left by its early exit.
pub fn render(dot: &str, opts: &RenderOptions) -> Result<(), Error> {
    debug!(engine = %opts.engine, format = %opts.format, output = %opts.output.display(), "rendering");
    let mut child = Command::new(&opts.engine)
        .arg(format!("-T{}", opts.format))
        .arg("-o")
        .arg(&opts.output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::RenderSpawn(opts.engine.clone(), e))?;

    // Dropping stdin at the end of this statement closes the pipe.
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(dot.as_bytes()));

    let output = child
        .wait_with_output()
        .map_err(|e| Error::RenderFailed(format!("{} did not finish: {e}", opts.engine)))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::RenderFailed(format!(
            "{} exited with {}: {}",
            opts.engine,
            output.status,
            stderr.trim()
        )));
    }
    written.map_err(|e| Error::RenderFailed(format!("cannot write to {}: {e}", opts.engine)))
}
