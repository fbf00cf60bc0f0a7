//! Graph builder for constructing the collaboration graph from records.
//!
//! The builder resolves membership ids through the entity and group
//! name tables, then connects every pair of entities that share a group
//! with an edge labeled by the group's name.

use crate::error::GraphError;
use crate::graph::CollabGraph;
use crate::records::{Membership, NameTable};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Which table a skipped membership record failed to resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownGroupId,
    UnknownEntityId,
}

/// A membership record dropped during the build because one of its ids
/// has no corresponding name.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub group_id: String,
    pub entity_id: String,
    pub reason: SkipReason,
}

/// The result of a successful build: the graph plus every record that
/// was skipped. Skips are surfaced, never silently dropped.
pub struct BuildOutcome {
    pub graph: CollabGraph,
    pub skipped: Vec<SkippedRecord>,
}

/// Builds a [`CollabGraph`] from relational record sets.
pub struct GraphBuilder {
    entities: NameTable,
    groups: NameTable,
    memberships: Vec<Membership>,
}

impl GraphBuilder {
    /// Creates a builder over the two id → name tables.
    pub fn new(entities: NameTable, groups: NameTable) -> Self {
        Self {
            entities,
            groups,
            memberships: Vec::new(),
        }
    }

    /// Adds one co-occurrence record.
    pub fn add_membership(&mut self, record: Membership) {
        self.memberships.push(record);
    }

    /// Adds a batch of co-occurrence records.
    pub fn add_memberships(&mut self, records: impl IntoIterator<Item = Membership>) {
        self.memberships.extend(records);
    }

    /// Builds the graph.
    ///
    /// Every entity in the table becomes a vertex, whether or not any
    /// membership mentions it. Each group with k ≥ 2 resolved members
    /// contributes C(k,2) edges labeled with the group name; smaller
    /// groups contribute none. The graph must not be mutated after this
    /// returns.
    pub fn build(self) -> Result<BuildOutcome, GraphError> {
        let mut graph = CollabGraph::new();
        for name in self.entities.names() {
            graph.insert_vertex(name);
        }

        // Group memberships by resolved group name. BTree containers
        // collapse duplicate (group, entity) pairs and keep edge
        // emission order stable for identical input.
        let mut members_by_group: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut skipped = Vec::new();
        for record in &self.memberships {
            let Some(group) = self.groups.resolve(&record.group_id) else {
                warn!(group_id = %record.group_id, "membership references unknown group id, skipping");
                skipped.push(SkippedRecord {
                    group_id: record.group_id.clone(),
                    entity_id: record.entity_id.clone(),
                    reason: SkipReason::UnknownGroupId,
                });
                continue;
            };
            let Some(entity) = self.entities.resolve(&record.entity_id) else {
                warn!(entity_id = %record.entity_id, "membership references unknown entity id, skipping");
                skipped.push(SkippedRecord {
                    group_id: record.group_id.clone(),
                    entity_id: record.entity_id.clone(),
                    reason: SkipReason::UnknownEntityId,
                });
                continue;
            };
            members_by_group.entry(group).or_default().insert(entity);
        }

        // Emit all pairs from a materialized member list. The graph
        // models direct co-occurrence, so a group of k members really
        // does mean C(k,2) edges.
        for (group, members) in &members_by_group {
            if members.len() < 2 {
                continue;
            }
            let members: Vec<&str> = members.iter().copied().collect();
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    graph.insert_edge(members[i], members[j], *group)?;
                }
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            skipped = skipped.len(),
            "collaboration graph built"
        );

        Ok(BuildOutcome { graph, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> NameTable {
        let mut table = NameTable::new();
        for (id, name) in entries {
            table.insert(*id, *name);
        }
        table
    }

    fn membership(group_id: &str, entity_id: &str) -> Membership {
        Membership {
            group_id: group_id.to_string(),
            entity_id: entity_id.to_string(),
        }
    }

    #[test]
    fn test_every_entity_becomes_a_vertex() {
        let entities = table(&[("1", "Alice"), ("2", "Bob"), ("3", "Carol")]);
        let builder = GraphBuilder::new(entities, table(&[]));
        let outcome = builder.build().unwrap();

        assert_eq!(outcome.graph.vertex_count(), 3);
        assert_eq!(outcome.graph.edge_count(), 0);
        assert!(outcome.graph.contains_vertex("Carol"));
    }

    #[test]
    fn test_three_member_group_yields_three_edges() {
        let entities = table(&[("1", "P"), ("2", "Q"), ("3", "R")]);
        let groups = table(&[("m1", "gathering")]);
        let mut builder = GraphBuilder::new(entities, groups);
        builder.add_memberships([
            membership("m1", "1"),
            membership("m1", "2"),
            membership("m1", "3"),
        ]);

        let outcome = builder.build().unwrap();
        assert_eq!(outcome.graph.edge_count(), 3);

        // Every edge carries the group name.
        for edge in outcome.graph.export_edges() {
            assert_eq!(edge.group, "gathering");
        }
    }

    #[test]
    fn test_singleton_group_contributes_no_edges() {
        let entities = table(&[("1", "Alice"), ("2", "Bob")]);
        let groups = table(&[("m1", "solo")]);
        let mut builder = GraphBuilder::new(entities, groups);
        builder.add_membership(membership("m1", "1"));

        let outcome = builder.build().unwrap();
        assert_eq!(outcome.graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_memberships_deduplicated() {
        let entities = table(&[("1", "Alice"), ("2", "Bob")]);
        let groups = table(&[("m1", "g1")]);
        let mut builder = GraphBuilder::new(entities, groups);
        builder.add_memberships([
            membership("m1", "1"),
            membership("m1", "2"),
            membership("m1", "1"),
            membership("m1", "2"),
        ]);

        let outcome = builder.build().unwrap();
        assert_eq!(outcome.graph.edge_count(), 1);
    }

    #[test]
    fn test_unresolved_ids_skipped_and_reported() {
        let entities = table(&[("1", "Alice"), ("2", "Bob")]);
        let groups = table(&[("m1", "g1")]);
        let mut builder = GraphBuilder::new(entities, groups);
        builder.add_memberships([
            membership("m1", "1"),
            membership("m1", "2"),
            membership("m9", "1"), // unknown group
            membership("m1", "99"), // unknown entity
        ]);

        let outcome = builder.build().unwrap();
        assert_eq!(outcome.graph.edge_count(), 1);
        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].reason, SkipReason::UnknownGroupId);
        assert_eq!(outcome.skipped[1].reason, SkipReason::UnknownEntityId);
    }

    #[test]
    fn test_shared_pair_across_groups_keeps_both_edges() {
        let entities = table(&[("1", "Alice"), ("2", "Bob")]);
        let groups = table(&[("m1", "g1"), ("m2", "g2")]);
        let mut builder = GraphBuilder::new(entities, groups);
        builder.add_memberships([
            membership("m1", "1"),
            membership("m1", "2"),
            membership("m2", "1"),
            membership("m2", "2"),
        ]);

        let outcome = builder.build().unwrap();
        assert_eq!(outcome.graph.edge_count(), 2);
    }
}
