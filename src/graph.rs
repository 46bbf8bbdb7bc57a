//! Dependency graph data structures.
//!
//! A [`DependencyGraph`] is an insert-only directed graph of source files
//! connected by import edges. Nodes are dense `u32`-indexed [`FileId`]s in
//! insertion order; edges carry the raw locator and its classification.
//! Cycles are allowed.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::LocatorKind;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct FileId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EdgeId(pub u32);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub id: FileId,
    pub path: PathBuf,
    /// Path relative to the project root, `/`-separated as listed.
    pub rel_path: String,
    pub name: String,
    /// Extension without the dot; empty when the file has none.
    pub ext: String,
}

impl SourceFile {
    /// Derive the display fields of a file from its absolute path.
    pub fn describe(path: &Path, project_root: &Path) -> (String, String, String) {
        let rel_path = path
            .strip_prefix(project_root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        (rel_path, name, ext)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEdge {
    pub id: EdgeId,
    pub importer: FileId,
    /// Denormalized from the importer for display.
    pub importer_rel_path: String,
    /// The locator as written in source (e.g. "./foo", "@scope/pkg").
    pub locator: String,
    pub kind: Option<LocatorKind>,
    /// Set when the resolved path is itself a tracked file.
    pub target: Option<FileId>,
    pub target_path: Option<PathBuf>,
}

/// Edge data before the graph assigns an id.
#[derive(Debug, Clone)]
pub struct NewEdge {
    pub importer: FileId,
    pub locator: String,
    pub kind: Option<LocatorKind>,
    pub target: Option<FileId>,
    pub target_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    files: Vec<SourceFile>,
    edges: Vec<ImportEdge>,
    /// Outgoing edges per file (indexed by `FileId`)
    forward_adj: Vec<Vec<EdgeId>>,
    /// Number of resolved edges pointing at each file (indexed by `FileId`)
    incoming: Vec<u32>,
    path_to_id: HashMap<PathBuf, FileId>,
    edge_keys: HashSet<(FileId, String)>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file. Absolute paths are unique within a graph.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_file(&mut self, path: PathBuf, project_root: &Path) -> Result<FileId, Error> {
        if self.path_to_id.contains_key(&path) {
            return Err(Error::DuplicateFile(path));
        }
        let id = FileId(self.files.len() as u32);
        let (rel_path, name, ext) = SourceFile::describe(&path, project_root);
        self.files.push(SourceFile {
            id,
            path: path.clone(),
            rel_path,
            name,
            ext,
        });
        self.forward_adj.push(Vec::new());
        self.incoming.push(0);
        self.path_to_id.insert(path, id);
        Ok(id)
    }

    /// Insert an edge. The (importer, locator) pair is unique within a graph.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_edge(&mut self, edge: NewEdge) -> Result<EdgeId, Error> {
        for id in std::iter::once(edge.importer).chain(edge.target) {
            if !self.contains(id) {
                return Err(Error::UnknownReference {
                    file: id,
                    locator: edge.locator,
                });
            }
        }

        let importer_rel_path = self.file(edge.importer).rel_path.clone();
        if !self.edge_keys.insert((edge.importer, edge.locator.clone())) {
            return Err(Error::DuplicateEdge {
                importer: importer_rel_path,
                locator: edge.locator,
            });
        }

        let id = EdgeId(self.edges.len() as u32);
        if let Some(target) = edge.target {
            self.incoming[target.0 as usize] += 1;
        }
        self.forward_adj[edge.importer.0 as usize].push(id);
        self.edges.push(ImportEdge {
            id,
            importer: edge.importer,
            importer_rel_path,
            locator: edge.locator,
            kind: edge.kind,
            target: edge.target,
            target_path: edge.target_path,
        });
        Ok(id)
    }

    pub fn contains(&self, id: FileId) -> bool {
        (id.0 as usize) < self.files.len()
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0 as usize]
    }

    pub fn edge(&self, id: EdgeId) -> &ImportEdge {
        &self.edges[id.0 as usize]
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.path_to_id.get(path).copied()
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn edges(&self) -> &[ImportEdge] {
        &self.edges
    }

    pub fn outgoing_edges(&self, id: FileId) -> &[EdgeId] {
        &self.forward_adj[id.0 as usize]
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Files nothing in the graph imports (via a resolved edge), in insertion order.
    pub fn files_without_incoming_edges(&self) -> impl Iterator<Item = &SourceFile> {
        self.files
            .iter()
            .filter(|f| self.incoming[f.id.0 as usize] == 0)
    }

    /// Edges whose target is a file in the graph, in insertion order.
    pub fn edges_with_resolved_target(&self) -> impl Iterator<Item = (&ImportEdge, FileId)> {
        self.edges
            .iter()
            .filter_map(|e| e.target.map(|t| (e, t)))
    }
}
