//! Costar graph core — collaboration graph, BFS, and separation queries.
//!
//! This crate builds an undirected co-occurrence graph from relational
//! records, runs breadth-first search from a root entity, and answers
//! "how far is this entity from the root, and through whom" queries by
//! walking the resulting predecessor tree.
//!
//! # Architecture
//!
//! The graph and tree both wrap petgraph with a name index on the side:
//! - [`CollabGraph`] — undirected, entity vertices, group-labeled edges
//! - [`PathTree`] — directed forest, one parent edge per reached vertex
//!
//! Construction is strictly one-way: records → [`GraphBuilder`] →
//! [`CollabGraph`] → [`run_bfs`] → [`PathTree`] → [`QuerySession`].
//! Nothing is mutated after it is built.
//!
//! # Example
//!
//! ```
//! use costar_graph::{GraphBuilder, Membership, NameTable, QuerySession, run_bfs};
//!
//! let entities = NameTable::from_lines(["1|Ada", "2|Grace"]).unwrap();
//! let groups = NameTable::from_lines(["m1|ENIAC"]).unwrap();
//! let memberships = Membership::from_lines(["m1|1", "m1|2"]).unwrap();
//!
//! let mut builder = GraphBuilder::new(entities, groups);
//! builder.add_memberships(memberships);
//! let outcome = builder.build().unwrap();
//!
//! let tree = run_bfs(&outcome.graph, "Ada").unwrap();
//! let session = QuerySession::new(&outcome.graph, &tree);
//! assert_eq!(session.separation("Grace").unwrap().hops, 1);
//! ```

mod bfs;
mod builder;
mod error;
mod graph;
mod query;
mod records;

pub use bfs::{run_bfs, PathTree};
pub use builder::{BuildOutcome, GraphBuilder, SkipReason, SkippedRecord};
pub use error::GraphError;
pub use graph::{CollabGraph, EdgeId, GraphEdge, GraphStats, VertexId};
pub use query::{QuerySession, Separation, Step};
pub use records::{Membership, NameTable};
