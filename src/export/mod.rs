//! Serialization of a [`DependencyGraph`](crate::graph::DependencyGraph).
//!
//! [`dot`] produces the layout-engine description; [`records`] produces the
//! flat file/import relations for external querying.

pub mod dot;
pub mod records;
