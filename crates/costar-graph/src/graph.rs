//! The collaboration graph.
//!
//! CollabGraph wraps an undirected petgraph graph and adds a name index
//! for string lookups. Vertices are entity names, edge weights are the
//! group names that connect two entities.

use crate::error::GraphError;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef; // For edge_references
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a vertex in the graph.
pub type VertexId = NodeIndex;

/// Unique identifier for an edge in the graph.
pub type EdgeId = EdgeIndex;

/// The undirected co-occurrence graph.
///
/// Built once by the [`GraphBuilder`](crate::GraphBuilder) and read-only
/// afterward. Parallel edges between the same pair are allowed as long
/// as they carry different group names.
#[derive(Debug)]
pub struct CollabGraph {
    /// The underlying petgraph graph.
    graph: UnGraph<String, String>,

    /// Maps entity names to graph node indexes.
    name_index: HashMap<String, VertexId>,
}

impl Default for CollabGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CollabGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            name_index: HashMap::new(),
        }
    }

    /// Adds a vertex for an entity name.
    ///
    /// Idempotent: inserting a name that is already present returns the
    /// existing vertex instead of duplicating it.
    pub fn insert_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let name = name.into();
        if let Some(&existing) = self.name_index.get(&name) {
            return existing;
        }
        let index = self.graph.add_node(name.clone());
        self.name_index.insert(name, index);
        index
    }

    /// Adds an undirected edge between two existing vertices, labeled
    /// with the group that connects them.
    ///
    /// Fails with [`GraphError::UnknownVertex`] if either endpoint was
    /// never inserted.
    pub fn insert_edge(
        &mut self,
        a: &str,
        b: &str,
        group: impl Into<String>,
    ) -> Result<EdgeId, GraphError> {
        let a_idx = self
            .vertex_id(a)
            .ok_or_else(|| GraphError::UnknownVertex(a.to_string()))?;
        let b_idx = self
            .vertex_id(b)
            .ok_or_else(|| GraphError::UnknownVertex(b.to_string()))?;
        Ok(self.graph.add_edge(a_idx, b_idx, group.into()))
    }

    /// Returns true if the entity name is a vertex of the graph.
    pub fn contains_vertex(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Gets the vertex index for an entity name.
    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.name_index.get(name).copied()
    }

    /// Gets the entity name stored at a vertex.
    pub fn vertex_name(&self, index: VertexId) -> Option<&str> {
        self.graph.node_weight(index).map(String::as_str)
    }

    /// Gets the group name carried by an edge.
    pub fn group(&self, edge: EdgeId) -> Option<&str> {
        self.graph.edge_weight(edge).map(String::as_str)
    }

    /// Iterates over all edges touching a vertex.
    ///
    /// The order is fixed for a given build of the graph but is
    /// otherwise unspecified. It decides which of several equal-length
    /// paths BFS discovers first; it never changes any distance.
    pub fn incident_edges(&self, index: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.graph.edges(index).map(|edge_ref| edge_ref.id())
    }

    /// Returns the endpoint of an edge opposite to the given vertex.
    ///
    /// Fails with [`GraphError::InvalidEdge`] if the vertex is not an
    /// endpoint of the edge.
    pub fn opposite(&self, index: VertexId, edge: EdgeId) -> Result<VertexId, GraphError> {
        let (a, b) = self.graph.edge_endpoints(edge).ok_or_else(|| {
            GraphError::InvalidEdge {
                vertex: self.describe(index),
            }
        })?;
        if index == a {
            Ok(b)
        } else if index == b {
            Ok(a)
        } else {
            Err(GraphError::InvalidEdge {
                vertex: self.describe(index),
            })
        }
    }

    fn describe(&self, index: VertexId) -> String {
        self.vertex_name(index)
            .unwrap_or("<unknown>")
            .to_string()
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all entity names in the graph.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Returns all edges with endpoint names for export.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .filter_map(|edge_ref| {
                let source = self.graph.node_weight(edge_ref.source())?;
                let target = self.graph.node_weight(edge_ref.target())?;
                Some(GraphEdge {
                    source: source.clone(),
                    target: target.clone(),
                    group: edge_ref.weight().clone(),
                })
            })
            .collect()
    }
}

/// A simplified edge for graph export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub group: String,
}

/// Graph statistics for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
}

impl CollabGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertex_count: self.vertex_count(),
            edge_count: self.edge_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_vertex_idempotent() {
        let mut graph = CollabGraph::new();
        let first = graph.insert_vertex("Alice");
        let second = graph.insert_vertex("Alice");

        assert_eq!(first, second);
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_insert_edge_unknown_vertex() {
        let mut graph = CollabGraph::new();
        graph.insert_vertex("Alice");

        let err = graph.insert_edge("Alice", "Bob", "g1").unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex("Bob".to_string()));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edge_visible_from_both_endpoints() {
        let mut graph = CollabGraph::new();
        let a = graph.insert_vertex("Alice");
        let b = graph.insert_vertex("Bob");
        let edge = graph.insert_edge("Alice", "Bob", "g1").unwrap();

        let from_a: Vec<_> = graph.incident_edges(a).collect();
        let from_b: Vec<_> = graph.incident_edges(b).collect();
        assert_eq!(from_a, vec![edge]);
        assert_eq!(from_b, vec![edge]);

        assert_eq!(graph.opposite(a, edge).unwrap(), b);
        assert_eq!(graph.opposite(b, edge).unwrap(), a);
    }

    #[test]
    fn test_opposite_rejects_non_endpoint() {
        let mut graph = CollabGraph::new();
        graph.insert_vertex("Alice");
        graph.insert_vertex("Bob");
        let c = graph.insert_vertex("Carol");
        let edge = graph.insert_edge("Alice", "Bob", "g1").unwrap();

        let err = graph.opposite(c, edge).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidEdge {
                vertex: "Carol".to_string()
            }
        );
    }

    #[test]
    fn test_parallel_edges_kept() {
        let mut graph = CollabGraph::new();
        let a = graph.insert_vertex("Alice");
        graph.insert_vertex("Bob");
        graph.insert_edge("Alice", "Bob", "g1").unwrap();
        graph.insert_edge("Alice", "Bob", "g2").unwrap();

        assert_eq!(graph.edge_count(), 2);
        let groups: Vec<_> = graph
            .incident_edges(a)
            .filter_map(|e| graph.group(e))
            .collect();
        assert!(groups.contains(&"g1"));
        assert!(groups.contains(&"g2"));
    }

    #[test]
    fn test_isolated_vertex_has_no_edges() {
        let mut graph = CollabGraph::new();
        let w = graph.insert_vertex("Wanda");
        assert_eq!(graph.incident_edges(w).count(), 0);
        assert!(graph.contains_vertex("Wanda"));
    }
}
