//! Breadth-first search and the shortest-path tree it produces.

use crate::error::GraphError;
use crate::graph::CollabGraph;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef; // For edges_directed
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// The directed predecessor forest produced by [`run_bfs`].
///
/// Every vertex reachable from the root appears exactly once. Each
/// non-root vertex has a single outgoing edge pointing at its BFS
/// parent, labeled with the group connecting the two; the root has
/// none. Immutable once BFS returns it.
#[derive(Debug)]
pub struct PathTree {
    tree: DiGraph<String, String>,
    name_index: HashMap<String, NodeIndex>,
    root: String,
}

impl PathTree {
    /// Creates a tree containing only the root.
    pub(crate) fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let mut tree = DiGraph::new();
        let mut name_index = HashMap::new();
        let index = tree.add_node(root.clone());
        name_index.insert(root.clone(), index);
        Self {
            tree,
            name_index,
            root,
        }
    }

    /// Inserts a vertex if it is not already present.
    pub(crate) fn insert_vertex(&mut self, name: &str) -> NodeIndex {
        if let Some(&existing) = self.name_index.get(name) {
            return existing;
        }
        let index = self.tree.add_node(name.to_string());
        self.name_index.insert(name.to_string(), index);
        index
    }

    /// Adds the child → parent edge for a newly discovered vertex.
    /// BFS calls this exactly once per non-root vertex; the forest
    /// invariant depends on that.
    pub(crate) fn insert_parent_edge(&mut self, child: &str, parent: &str, group: &str) {
        let child_idx = self.insert_vertex(child);
        let parent_idx = self.insert_vertex(parent);
        self.tree.add_edge(child_idx, parent_idx, group.to_string());
    }

    /// The root entity this tree was built from.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns true if the entity was reached by BFS.
    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Returns the number of vertices in the tree.
    pub fn vertex_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Iterates over all entity names in the tree.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.tree.node_weights().map(String::as_str)
    }

    /// Returns the `(group, parent)` edge leading one step closer to
    /// the root, or `None` for the root itself or an unknown name.
    pub fn parent_edge(&self, name: &str) -> Option<(&str, &str)> {
        let index = *self.name_index.get(name)?;
        self.tree
            .edges_directed(index, Direction::Outgoing)
            .next()
            .and_then(|edge_ref| {
                let parent = self.tree.node_weight(edge_ref.target())?;
                Some((edge_ref.weight().as_str(), parent.as_str()))
            })
    }
}

/// Runs breadth-first search from a root entity and returns the
/// shortest-path tree.
///
/// Fails with [`GraphError::RootNotFound`] if the root is not a vertex
/// of the graph; no partial tree is returned. Vertices not reachable
/// from the root never enter the tree.
///
/// Distances are deterministic. The specific path recorded when several
/// shortest paths exist follows the graph's incident-edge order, so it
/// is only deterministic for a fixed edge ordering.
pub fn run_bfs(graph: &CollabGraph, root: &str) -> Result<PathTree, GraphError> {
    let root_id = graph
        .vertex_id(root)
        .ok_or_else(|| GraphError::RootNotFound(root.to_string()))?;

    let mut tree = PathTree::new(root);
    let mut queue = VecDeque::new();
    queue.push_back(root_id);

    while let Some(current) = queue.pop_front() {
        let Some(current_name) = graph.vertex_name(current) else {
            continue;
        };
        for edge in graph.incident_edges(current) {
            let end = graph.opposite(current, edge)?;
            let (Some(end_name), Some(group)) = (graph.vertex_name(end), graph.group(edge)) else {
                continue;
            };
            // First discovery wins: insertion order off a FIFO queue is
            // what makes every tree path shortest.
            if !tree.contains(end_name) {
                tree.insert_parent_edge(end_name, current_name, group);
                queue.push_back(end);
            }
        }
    }

    debug!(
        root = %root,
        reached = tree.vertex_count(),
        of = graph.vertex_count(),
        "BFS complete"
    );

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The Root/X/Y/Z graph: (Root,X,"g1"), (Root,Y,"g1"), (X,Z,"g2"),
    /// plus an isolated vertex W.
    fn sample_graph() -> CollabGraph {
        let mut graph = CollabGraph::new();
        for name in ["Root", "X", "Y", "Z", "W"] {
            graph.insert_vertex(name);
        }
        graph.insert_edge("Root", "X", "g1").unwrap();
        graph.insert_edge("Root", "Y", "g1").unwrap();
        graph.insert_edge("X", "Z", "g2").unwrap();
        graph
    }

    #[test]
    fn test_root_not_found() {
        let graph = sample_graph();
        let err = run_bfs(&graph, "Nobody").unwrap_err();
        assert_eq!(err, GraphError::RootNotFound("Nobody".to_string()));
    }

    #[test]
    fn test_tree_shape() {
        let graph = sample_graph();
        let tree = run_bfs(&graph, "Root").unwrap();

        assert_eq!(tree.root(), "Root");
        assert_eq!(tree.vertex_count(), 4);
        assert_eq!(tree.parent_edge("Root"), None);
        assert_eq!(tree.parent_edge("X"), Some(("g1", "Root")));
        assert_eq!(tree.parent_edge("Y"), Some(("g1", "Root")));
        assert_eq!(tree.parent_edge("Z"), Some(("g2", "X")));
    }

    #[test]
    fn test_unreachable_vertex_excluded() {
        let graph = sample_graph();
        let tree = run_bfs(&graph, "Root").unwrap();
        assert!(!tree.contains("W"));
    }

    #[test]
    fn test_forest_invariant() {
        let graph = sample_graph();
        let tree = run_bfs(&graph, "Root").unwrap();

        for name in tree.vertices() {
            if name == tree.root() {
                assert!(tree.parent_edge(name).is_none());
            } else {
                assert!(tree.parent_edge(name).is_some());
            }
        }
    }

    #[test]
    fn test_idempotent_for_fixed_graph() {
        let graph = sample_graph();
        let first = run_bfs(&graph, "Root").unwrap();
        let second = run_bfs(&graph, "Root").unwrap();

        assert_eq!(first.vertex_count(), second.vertex_count());
        for name in first.vertices() {
            assert!(second.contains(name));
            assert_eq!(first.parent_edge(name), second.parent_edge(name));
        }
    }

    #[test]
    fn test_triangle_group_all_distance_one() {
        // One 3-member group: P, Q, R pairwise connected.
        let mut graph = CollabGraph::new();
        for name in ["P", "Q", "R"] {
            graph.insert_vertex(name);
        }
        graph.insert_edge("P", "Q", "g").unwrap();
        graph.insert_edge("P", "R", "g").unwrap();
        graph.insert_edge("Q", "R", "g").unwrap();

        let tree = run_bfs(&graph, "P").unwrap();
        assert_eq!(tree.parent_edge("Q"), Some(("g", "P")));
        assert_eq!(tree.parent_edge("R"), Some(("g", "P")));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = CollabGraph::new();
        for name in ["A", "B", "C"] {
            graph.insert_vertex(name);
        }
        graph.insert_edge("A", "B", "g1").unwrap();
        graph.insert_edge("B", "C", "g2").unwrap();
        graph.insert_edge("C", "A", "g3").unwrap();

        let tree = run_bfs(&graph, "A").unwrap();
        assert_eq!(tree.vertex_count(), 3);
    }
}
