#![warn(clippy::pedantic)]
// The library exists to serve the binary and its integration tests.
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod graph;
pub mod inventory;
pub mod locator;
pub mod logging;
pub mod render;
pub mod report;
pub mod resolver;
