//! Territory graph
//!
//! Nodes are territories, edges are undirected links. Generated maps are
//! random recursive trees: connected, acyclic, `N - 1` edges.

pub mod generation;
pub mod node;
pub mod topology;

pub use generation::{generate_initial, validate_roster};
pub use node::{Edge, Node};
pub use topology::{find_duplicate_edge, is_connected, neighbors};
