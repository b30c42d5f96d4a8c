//! Edge-list export of a resolved dependency structure

use ahash::AHashSet;

use cellscope_core::CellAddress;

use crate::resolve::{DependencyTree, NodeId};

/// A directed edge in data-flow direction: `source` is read by `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// The referenced cell
    pub source: CellAddress,
    /// The cell whose formula reads it
    pub target: CellAddress,
}

/// Flatten a dependency tree into directed edges (referenced → referencer)
///
/// Depth-first preorder walk from the root, following each node's
/// dependency order, so the output is deterministic. Nodes are shared in
/// the arena, so each node's edges are emitted exactly once; consumers
/// that union edges idempotently see the same graph either way.
pub fn to_edges(tree: &DependencyTree) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut visited = AHashSet::new();
    visit(tree, tree.root(), &mut visited, &mut edges);
    edges
}

fn visit(
    tree: &DependencyTree,
    id: NodeId,
    visited: &mut AHashSet<NodeId>,
    edges: &mut Vec<Edge>,
) {
    if !visited.insert(id) {
        return;
    }

    let node = tree.node(id);
    for &dep in node.dependencies() {
        edges.push(Edge {
            source: tree.node(dep).address(),
            target: node.address(),
        });
        visit(tree, dep, visited, edges);
    }
}
