//! Error types for graph construction, BFS, and path queries.

use thiserror::Error;

/// Everything that can go wrong in the costar-graph crate.
///
/// Build-time errors abort construction entirely; query-time errors
/// (`UnknownEntity`, `Unreachable`) are per-query and a session loop is
/// expected to continue past them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Edge insertion referenced an endpoint that was never inserted.
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// `opposite` was called with a vertex that is not an endpoint of
    /// the given edge.
    #[error("vertex '{vertex}' is not an endpoint of the given edge")]
    InvalidEdge { vertex: String },

    /// An input line did not match the `id|name` shape, or repeated an id.
    #[error("malformed record at line {line}: {content:?}")]
    MalformedRecord { line: usize, content: String },

    /// The BFS root is not a vertex of the source graph.
    #[error("root entity '{0}' is not in the graph")]
    RootNotFound(String),

    /// The query target is not a vertex of the source graph.
    #[error("entity '{0}' is not in the graph")]
    UnknownEntity(String),

    /// The query target is in the graph but has no path to the root.
    #[error("entity '{0}' has no path to the root")]
    Unreachable(String),

    /// A predecessor walk exceeded the tree's vertex count or hit a
    /// non-root vertex with no parent. Indicates a broken tree
    /// invariant, never bad input.
    #[error("predecessor tree is malformed: walk from '{vertex}' cannot reach the root")]
    MalformedTree { vertex: String },
}
