use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::classify::LocatorKind;
use crate::graph::DependencyGraph;

/// One row of the `files` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: u32,
    pub path: PathBuf,
    pub rel_path: String,
    pub name: String,
    pub ext: String,
}

/// One row of the `imports` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub id: u32,
    pub file_id: u32,
    pub file_rel_path: String,
    pub locator: String,
    #[serde(rename = "local_or_lib", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<LocatorKind>,
    pub target_file_id: Option<u32>,
    pub target_path: Option<PathBuf>,
}

/// The graph flattened into the two relations a store would hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecords {
    pub files: Vec<FileRecord>,
    pub imports: Vec<ImportRecord>,
}

impl GraphRecords {
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let files = graph
            .files()
            .iter()
            .map(|f| FileRecord {
                id: f.id.0,
                path: f.path.clone(),
                rel_path: f.rel_path.clone(),
                name: f.name.clone(),
                ext: f.ext.clone(),
            })
            .collect();
        let imports = graph
            .edges()
            .iter()
            .map(|e| ImportRecord {
                id: e.id.0,
                file_id: e.importer.0,
                file_rel_path: e.importer_rel_path.clone(),
                locator: e.locator.clone(),
                kind: e.kind,
                target_file_id: e.target.map(|t| t.0),
                target_path: e.target_path.clone(),
            })
            .collect();
        Self { files, imports }
    }
}
