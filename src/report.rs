use serde::Serialize;

use crate::builder::BuildResult;
use crate::classify::LocatorKind;
use crate::graph::DependencyGraph;

/// Counts and notable edges for one build.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub file_count: usize,
    pub import_count: usize,
    pub local_count: usize,
    pub library_count: usize,
    pub unclassified_count: usize,
    /// Local imports with a resolved target file in the graph.
    pub resolved_count: usize,
    pub unresolved_local: Vec<UnresolvedImport>,
    /// Files no other file imports, by relative path.
    pub entry_files: Vec<String>,
    pub duplicate_imports: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnresolvedImport {
    pub importer: String,
    pub locator: String,
}

impl Summary {
    pub fn new(result: &BuildResult) -> Self {
        let graph: &DependencyGraph = &result.graph;
        let mut local_count = 0;
        let mut library_count = 0;
        let mut unclassified_count = 0;
        let mut unresolved_local = Vec::new();

        for edge in graph.edges() {
            match edge.kind {
                Some(LocatorKind::Local) => {
                    local_count += 1;
                    if edge.target_path.is_none() {
                        unresolved_local.push(UnresolvedImport {
                            importer: edge.importer_rel_path.clone(),
                            locator: edge.locator.clone(),
                        });
                    }
                }
                Some(LocatorKind::Library) => library_count += 1,
                None => unclassified_count += 1,
            }
        }

        Self {
            file_count: graph.file_count(),
            import_count: graph.edge_count(),
            local_count,
            library_count,
            unclassified_count,
            resolved_count: graph.edges_with_resolved_target().count(),
            unresolved_local,
            entry_files: graph
                .files_without_incoming_edges()
                .map(|f| f.rel_path.clone())
                .collect(),
            duplicate_imports: result.duplicate_imports,
            warnings: result.warnings.clone(),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn print_summary(summary: &Summary) {
    println!(
        "{} file{}, {} import{}",
        summary.file_count,
        plural(summary.file_count),
        summary.import_count,
        plural(summary.import_count)
    );
    println!(
        "  local: {} ({} resolved in graph)  lib: {}  unclassified: {}",
        summary.local_count, summary.resolved_count, summary.library_count, summary.unclassified_count
    );
    if summary.duplicate_imports > 0 {
        println!("  duplicate imports dropped: {}", summary.duplicate_imports);
    }
    println!();

    println!("Entry files (not imported by any file):");
    if summary.entry_files.is_empty() {
        println!("  (none, every file is imported somewhere)");
    } else {
        for path in &summary.entry_files {
            println!("  {path}");
        }
    }

    if !summary.unresolved_local.is_empty() {
        println!();
        println!("Unresolved local imports:");
        for u in &summary.unresolved_local {
            println!("  {:<40} {}", u.importer, u.locator);
        }
    }

    if !summary.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &summary.warnings {
            println!("  {w}");
        }
    }
}

pub fn print_summary_json(summary: &Summary) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
