//! Adjacency and connectivity queries over an edge list

use std::collections::{HashSet, VecDeque};

use crate::core::types::NodeId;
use crate::graph::node::Edge;

/// Nodes adjacent to `node`, ascending by id
pub fn neighbors(edges: &[Edge], node: NodeId) -> Vec<NodeId> {
    let mut result: Vec<NodeId> = edges.iter().filter_map(|e| e.other(node)).collect();
    result.sort_unstable();
    result.dedup();
    result
}

/// Whether every node in `0..node_count` is reachable from node 0
pub fn is_connected(node_count: usize, edges: &[Edge]) -> bool {
    if node_count == 0 {
        return true;
    }

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for edge in edges {
        let (a, b) = (edge.a.index(), edge.b.index());
        if a >= node_count || b >= node_count {
            return false;
        }
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut visited = vec![false; node_count];
    let mut queue = VecDeque::from([0usize]);
    visited[0] = true;
    let mut reached = 1;

    while let Some(current) = queue.pop_front() {
        for &next in &adjacency[current] {
            if !visited[next] {
                visited[next] = true;
                reached += 1;
                queue.push_back(next);
            }
        }
    }

    reached == node_count
}

/// First edge that repeats an earlier one (in either direction)
pub fn find_duplicate_edge(edges: &[Edge]) -> Option<Edge> {
    let mut seen = HashSet::new();
    edges.iter().copied().find(|e| !seen.insert(e.key()))
}
