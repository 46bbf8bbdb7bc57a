//! Local/library classification of import locators.
//!
//! Bare package names cannot be told apart from unresolvable project paths
//! without reading a manifest, so libraries come from a closed, hand-kept
//! allowlist. Anything neither local nor known stays unclassified.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Locator prefixes that always mean "a file in this project".
const RELATIVE_PREFIXES: &[&str] = &["./", "../"];

/// Project-rooted prefixes resolved against the fallback base directory.
pub const DEFAULT_LOCAL_PREFIXES: &[&str] = &["components"];

/// Curated set of third-party packages and Node built-ins.
pub const KNOWN_LIBRARIES: &[&str] = &[
    // Node built-ins
    "assert",
    "buffer",
    "child_process",
    "crypto",
    "events",
    "fs",
    "http",
    "https",
    "net",
    "os",
    "path",
    "process",
    "querystring",
    "readline",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "url",
    "util",
    "vm",
    "worker_threads",
    "zlib",
    // Frameworks and UI
    "react",
    "react-dom",
    "react-router",
    "react-router-dom",
    "react-redux",
    "redux",
    "redux-thunk",
    "next",
    "vue",
    "vue-router",
    "vuex",
    "svelte",
    "preact",
    "jquery",
    "styled-components",
    "classnames",
    "prop-types",
    // Data and utilities
    "lodash",
    "lodash-es",
    "underscore",
    "ramda",
    "immutable",
    "immer",
    "rxjs",
    "moment",
    "dayjs",
    "date-fns",
    "uuid",
    "axios",
    "d3",
    "graphql",
    "zod",
    "yup",
    // Server side
    "express",
    "koa",
    "body-parser",
    "cors",
    "dotenv",
    "mongoose",
    "pg",
    "sequelize",
    // Tooling and tests
    "jest",
    "vitest",
    "mocha",
    "chai",
    "sinon",
    "enzyme",
    "webpack",
    "typescript",
];

/// Classification tag attached to an import edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocatorKind {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "lib")]
    Library,
}

impl LocatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Library => "lib",
        }
    }
}

impl std::fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LocatorClassifier {
    local_prefixes: Vec<String>,
    libraries: HashSet<String>,
}

impl Default for LocatorClassifier {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}

impl LocatorClassifier {
    /// Build a classifier from the defaults plus caller-supplied additions.
    pub fn new(extra_local_prefixes: &[String], extra_libraries: &[String]) -> Self {
        let local_prefixes = DEFAULT_LOCAL_PREFIXES
            .iter()
            .map(|s| (*s).to_string())
            .chain(extra_local_prefixes.iter().cloned())
            .collect();
        let libraries = KNOWN_LIBRARIES
            .iter()
            .map(|s| (*s).to_string())
            .chain(extra_libraries.iter().cloned())
            .collect();
        Self {
            local_prefixes,
            libraries,
        }
    }

    pub fn is_local(&self, locator: &str) -> bool {
        RELATIVE_PREFIXES.iter().any(|p| locator.starts_with(p))
            || self
                .local_prefixes
                .iter()
                .any(|p| locator.starts_with(p.as_str()))
    }

    /// Library test on its own; callers wanting the ordered rules use [`classify`](Self::classify).
    pub fn is_library(&self, locator: &str) -> bool {
        if locator.starts_with('@') || self.libraries.contains(locator) {
            return true;
        }
        // Sub-path import such as `lodash/fp` or `react-dom/client`.
        locator
            .split_once('/')
            .is_some_and(|(head, _)| self.libraries.contains(head))
    }

    pub fn classify(&self, locator: &str) -> Option<LocatorKind> {
        if self.is_local(locator) {
            Some(LocatorKind::Local)
        } else if self.is_library(locator) {
            Some(LocatorKind::Library)
        } else {
            None
        }
    }
}
