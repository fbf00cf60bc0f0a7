//! Distance-and-path queries against the shortest-path tree.

use crate::bfs::PathTree;
use crate::error::GraphError;
use crate::graph::CollabGraph;
use serde::Serialize;

/// One hop of a root-ward path: `from` appeared in `group` with `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub from: String,
    pub group: String,
    pub to: String,
}

/// The answer to a separation query.
#[derive(Debug, Clone, Serialize)]
pub struct Separation {
    pub target: String,
    /// Number of edges between the target and the root.
    pub hops: usize,
    /// Steps in target-to-root order. Empty when the target is the root.
    pub steps: Vec<Step>,
}

impl Separation {
    /// Returns a one-line summary suitable for terminal output.
    pub fn summary(&self) -> String {
        format!("{}'s number is {}", self.target, self.hops)
    }
}

/// Session state for answering queries: an immutable view over the
/// source graph and the predecessor tree built from it. Construct one
/// after BFS and thread it through each query.
pub struct QuerySession<'a> {
    graph: &'a CollabGraph,
    tree: &'a PathTree,
}

impl<'a> QuerySession<'a> {
    /// Creates a session over a graph and the tree BFS produced from it.
    pub fn new(graph: &'a CollabGraph, tree: &'a PathTree) -> Self {
        Self { graph, tree }
    }

    /// The root entity distances are measured from.
    pub fn root(&self) -> &str {
        self.tree.root()
    }

    /// Computes the hop count and root-ward path for a target entity.
    ///
    /// Distinguishes a name missing from the graph entirely
    /// ([`GraphError::UnknownEntity`]) from one that is present but has
    /// no path to the root ([`GraphError::Unreachable`]). The walk is
    /// bounded by the tree's vertex count; exceeding the bound means
    /// the tree invariant is broken and fails with
    /// [`GraphError::MalformedTree`].
    pub fn separation(&self, target: &str) -> Result<Separation, GraphError> {
        if !self.graph.contains_vertex(target) {
            return Err(GraphError::UnknownEntity(target.to_string()));
        }
        if target == self.tree.root() {
            return Ok(Separation {
                target: target.to_string(),
                hops: 0,
                steps: Vec::new(),
            });
        }
        if !self.tree.contains(target) {
            return Err(GraphError::Unreachable(target.to_string()));
        }

        let bound = self.tree.vertex_count();
        let mut steps = Vec::new();
        let mut current: &str = target;
        while current != self.tree.root() {
            if steps.len() >= bound {
                return Err(GraphError::MalformedTree {
                    vertex: target.to_string(),
                });
            }
            let Some((group, parent)) = self.tree.parent_edge(current) else {
                return Err(GraphError::MalformedTree {
                    vertex: current.to_string(),
                });
            };
            steps.push(Step {
                from: current.to_string(),
                group: group.to_string(),
                to: parent.to_string(),
            });
            current = parent;
        }

        Ok(Separation {
            target: target.to_string(),
            hops: steps.len(),
            steps,
        })
    }
}
