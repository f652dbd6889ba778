//! Common configuration and shared types for the AAM workspace.
//!
//! This crate provides the search configuration, the resolution-graph node id,
//! a minimal labeled molecule model and the test cases shared across the
//! workspace.

mod config;
pub mod molecule;
mod node_id;
mod test_cases;

pub use crate::config::*;
pub use crate::node_id::NodeId;
pub use crate::test_cases::*;
