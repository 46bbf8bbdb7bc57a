use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::classify::LocatorKind;
use crate::config::Config;
use crate::error::Error;
use crate::extract::import_statements;
use crate::graph::{DependencyGraph, NewEdge};
use crate::inventory::Inventory;
use crate::locator::parse_locator;
use crate::resolver::resolve_local;

/// One import found in a file, classified and (if local) resolved, before
/// it is inserted into the graph.
#[derive(Debug, Clone)]
struct ScannedImport {
    locator: String,
    kind: Option<LocatorKind>,
    target_path: Option<PathBuf>,
}

struct ScannedFile {
    imports: Vec<ScannedImport>,
    warnings: Vec<String>,
}

/// Result of building a dependency graph.
#[derive(Debug)]
pub struct BuildResult {
    pub graph: DependencyGraph,
    /// Files that could not be read and import lines that yielded no locator.
    pub warnings: Vec<String>,
    /// Second occurrences of an (importer, locator) pair that were dropped.
    pub duplicate_imports: usize,
}

fn scan_source(path: &Path, source: &str, config: &Config) -> ScannedFile {
    let mut imports = Vec::new();
    let mut warnings = Vec::new();

    for statement in import_statements(source) {
        let locator = match parse_locator(&statement) {
            Ok(locator) => locator,
            Err(e) => {
                warn!(file = %path.display(), "skipping import line: {e}");
                warnings.push(format!("{}: {e}", path.display()));
                continue;
            }
        };
        let kind = config.classifier.classify(&locator);
        let target_path = match kind {
            Some(LocatorKind::Local) => {
                resolve_local(&locator, path, &config.base_dir, &config.extensions)
            }
            _ => None,
        };
        imports.push(ScannedImport {
            locator,
            kind,
            target_path,
        });
    }

    ScannedFile { imports, warnings }
}

fn scan_file(path: &Path, config: &Config) -> ScannedFile {
    match std::fs::read(path) {
        Ok(bytes) => scan_source(path, &String::from_utf8_lossy(&bytes), config),
        Err(e) => {
            warn!(file = %path.display(), "cannot read file: {e}");
            ScannedFile {
                imports: Vec::new(),
                warnings: vec![format!("cannot read {}: {e}", path.display())],
            }
        }
    }
}

/// Build the dependency graph for every file the inventory lists.
///
/// Files are registered first so imports can target files later in the
/// inventory. Scanning runs in parallel; insertion happens on this thread in
/// inventory order, so the result is deterministic.
pub fn build_graph(config: &Config, inventory: &dyn Inventory) -> Result<BuildResult, Error> {
    let start = Instant::now();
    let files = inventory.list(config)?;
    let mut graph = DependencyGraph::new();

    let mut ids = Vec::with_capacity(files.len());
    for path in &files {
        ids.push(graph.add_file(path.clone(), &config.project_root)?);
    }

    let scanned: Vec<ScannedFile> = files.par_iter().map(|p| scan_file(p, config)).collect();

    let mut warnings = Vec::new();
    let mut duplicate_imports = 0;
    for ((path, importer), file) in files.iter().zip(ids).zip(scanned) {
        debug!(file = %path.display(), imports = file.imports.len(), "scanned");
        warnings.extend(file.warnings);

        for import in file.imports {
            let target = import
                .target_path
                .as_deref()
                .and_then(|p| graph.file_id(p));
            let edge = NewEdge {
                importer,
                locator: import.locator,
                kind: import.kind,
                target,
                target_path: import.target_path,
            };
            match graph.add_edge(edge) {
                Ok(_) => {}
                Err(e) if e.is_recoverable() => {
                    debug!("dropping duplicate import: {e}");
                    duplicate_imports += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    info!(
        files = graph.file_count(),
        imports = graph.edge_count(),
        elapsed_ms = format_args!("{:.1}", start.elapsed().as_secs_f64() * 1000.0),
        "built dependency graph"
    );
    Ok(BuildResult {
        graph,
        warnings,
        duplicate_imports,
    })
}
