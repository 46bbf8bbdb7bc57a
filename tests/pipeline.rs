mod common;

use std::collections::HashSet;
use std::path::PathBuf;

use importgraph::builder::{BuildResult, build_graph};
use importgraph::classify::LocatorKind;
use importgraph::config::{Config, ConfigFile, Overrides};
use importgraph::export::dot::{DotOptions, to_dot};
use importgraph::export::records::GraphRecords;
use importgraph::inventory;
use importgraph::report::Summary;

fn walk_config(p: &common::TestProject, overrides: Overrides) -> Config {
    let file = ConfigFile::discover(p.root(), None).unwrap();
    Config::resolve(
        p.root(),
        file,
        Overrides {
            no_git: true,
            ..overrides
        },
    )
    .unwrap()
}

fn build(config: &Config) -> BuildResult {
    build_graph(config, inventory::for_config(config).as_ref()).unwrap()
}

fn edge_lines(dot: &str) -> usize {
    dot.lines().filter(|l| l.contains(" -> ")).count()
}

#[test]
fn two_files_one_edge() {
    let p = common::TestProject::pair();
    let config = walk_config(&p, Overrides::default());
    let result = build(&config);

    assert_eq!(result.graph.file_count(), 2);
    assert_eq!(result.graph.edge_count(), 1);

    let dot = to_dot(&result.graph, &DotOptions::from_config(&config));
    assert!(dot.starts_with("strict digraph \"imports\" {"));
    assert_eq!(edge_lines(&dot), 1);
    assert!(dot.contains("label=\"a.ts\""));
    assert!(dot.contains("label=\"b.ts\""));
}

#[test]
fn library_import_recorded_but_not_drawn() {
    let p = common::TestProject::new();
    let config = walk_config(&p, Overrides::default());
    let result = build(&config);

    let lodash = result
        .graph
        .edges()
        .iter()
        .find(|e| e.locator == "lodash")
        .expect("lodash import recorded");
    assert_eq!(lodash.kind, Some(LocatorKind::Library));
    assert!(lodash.target.is_none());

    let dot = to_dot(&result.graph, &DotOptions::from_config(&config));
    assert_eq!(edge_lines(&dot), 2);
    assert!(!dot.contains("lodash"));
}

#[test]
fn multiline_import_is_extracted() {
    let p = common::TestProject::new();
    let config = walk_config(&p, Overrides::default());
    let result = build(&config);

    let react = result
        .graph
        .edges()
        .iter()
        .find(|e| e.locator == "react")
        .expect("react import recorded");
    assert_eq!(react.importer_rel_path, "components/Button.tsx");
    assert_eq!(react.kind, Some(LocatorKind::Library));
}

#[test]
fn summary_reports_unresolved_and_entries() {
    let p = common::TestProject::new();
    let config = walk_config(&p, Overrides::default());
    let result = build(&config);
    let summary = Summary::new(&result);

    assert_eq!(summary.file_count, 3);
    assert_eq!(summary.import_count, 5);
    assert_eq!(summary.local_count, 3);
    assert_eq!(summary.library_count, 2);
    assert_eq!(summary.resolved_count, 2);
    assert_eq!(summary.unresolved_local.len(), 1);
    assert_eq!(summary.unresolved_local[0].locator, "./missing");
    assert_eq!(summary.entry_files, vec!["src/a.ts".to_string()]);
}

#[test]
fn rebuild_is_identical() {
    let p = common::TestProject::new();
    let config = walk_config(&p, Overrides::default());
    let opts = DotOptions::from_config(&config);

    let first = build(&config);
    let second = build(&config);
    assert_eq!(to_dot(&first.graph, &opts), to_dot(&second.graph, &opts));
    assert_eq!(
        GraphRecords::from_graph(&first.graph),
        GraphRecords::from_graph(&second.graph)
    );
}

#[test]
fn repeated_import_is_stored_once() {
    let p = common::TestProject::pair();
    p.write(
        "a.ts",
        "import { b } from './b';\nimport { c } from \"./b\";\n",
    );
    let config = walk_config(&p, Overrides::default());
    let result = build(&config);

    assert_eq!(result.graph.edge_count(), 1);
    assert_eq!(result.duplicate_imports, 1);

    let keys: HashSet<_> = result
        .graph
        .edges()
        .iter()
        .map(|e| (e.importer, e.locator.clone()))
        .collect();
    assert_eq!(keys.len(), result.graph.edge_count());
}

#[test]
fn scan_dir_limits_nodes() {
    let p = common::TestProject::new();
    let config = walk_config(
        &p,
        Overrides {
            scan_dirs: vec![PathBuf::from("src")],
            ..Overrides::default()
        },
    );
    let result = build(&config);
    assert_eq!(result.graph.file_count(), 2);

    // components/Button.tsx exists on disk but is not a node.
    let button = result
        .graph
        .edges()
        .iter()
        .find(|e| e.locator == "components/Button")
        .unwrap();
    assert!(button.target.is_none());
    assert!(button.target_path.is_some());

    let dot = to_dot(&result.graph, &DotOptions::from_config(&config));
    assert_eq!(edge_lines(&dot), 1);
}

#[test]
fn config_file_extends_libraries_and_names_graph() {
    let p = common::TestProject::pair();
    p.write("c.ts", "import x from 'my-private-lib';\n");
    p.write(
        ".importgraph.json",
        r#"{"libraries": ["my-private-lib"], "graphName": "web"}"#,
    );
    let config = walk_config(&p, Overrides::default());
    let result = build(&config);

    let edge = result
        .graph
        .edges()
        .iter()
        .find(|e| e.locator == "my-private-lib")
        .unwrap();
    assert_eq!(edge.kind, Some(LocatorKind::Library));

    let dot = to_dot(&result.graph, &DotOptions::from_config(&config));
    assert!(dot.starts_with("strict digraph \"web\" {"));
}

#[test]
fn records_reference_existing_files() {
    let p = common::TestProject::new();
    let config = walk_config(&p, Overrides::default());
    let records = GraphRecords::from_graph(&build(&config).graph);

    let ids: HashSet<u32> = records.files.iter().map(|f| f.id).collect();
    for import in &records.imports {
        assert!(ids.contains(&import.file_id));
        if let Some(target) = import.target_file_id {
            assert!(ids.contains(&target));
        }
    }
}
