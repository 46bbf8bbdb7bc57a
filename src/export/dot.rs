use crate::config::Config;
use crate::graph::{DependencyGraph, FileId, SourceFile};

/// Styling and naming for the DOT description.
#[derive(Debug, Clone)]
pub struct DotOptions {
    pub graph_name: String,
    /// Prepended to each file's relative path to form its `URL` attribute.
    pub url_prefix: Option<String>,
    pub rankdir: &'static str,
    pub fontname: &'static str,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            graph_name: crate::config::DEFAULT_GRAPH_NAME.to_string(),
            url_prefix: None,
            rankdir: "LR",
            fontname: "Helvetica",
        }
    }
}

impl DotOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            graph_name: config.graph_name.clone(),
            url_prefix: config.url_prefix.clone(),
            ..Self::default()
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn node_id(id: FileId) -> String {
    format!("n{}", id.0)
}

fn node_line(file: &SourceFile, is_root: bool, opts: &DotOptions) -> String {
    let mut attrs = format!(
        "label=\"{}\", tooltip=\"{}\"",
        escape(&file.name),
        escape(&file.rel_path)
    );
    if let Some(prefix) = &opts.url_prefix {
        attrs.push_str(&format!(", URL=\"{}\"", escape(&format!("{prefix}{}", file.rel_path))));
    }
    if is_root {
        attrs.push_str(", penwidth=2");
    }
    format!("    {} [{attrs}];\n", node_id(file.id))
}

/// Render the graph as a `strict digraph`.
///
/// One node per file in insertion order, one edge per import whose target is a
/// file in the graph. Library and unresolved imports are left out.
pub fn to_dot(graph: &DependencyGraph, opts: &DotOptions) -> String {
    let mut roots = vec![false; graph.file_count()];
    for file in graph.files_without_incoming_edges() {
        roots[file.id.0 as usize] = true;
    }

    let mut out = format!(
        concat!(
            "strict digraph \"{name}\" {{\n",
            "    rankdir={rankdir};\n",
            "    graph [fontname=\"{fontname}\"];\n",
            "    node [fontname=\"{fontname}\", fontsize=10, shape=box];\n",
            "    edge [fontname=\"{fontname}\", arrowsize=0.6];\n",
        ),
        name = escape(&opts.graph_name),
        rankdir = opts.rankdir,
        fontname = opts.fontname,
    );

    for file in graph.files() {
        out.push_str(&node_line(file, roots[file.id.0 as usize], opts));
    }
    for (edge, target) in graph.edges_with_resolved_target() {
        out.push_str(&format!("    {} -> {};\n", node_id(edge.importer), node_id(target)));
    }

    out.push_str("}\n");
    out
}
