//! Pre-parsed relational record sets.
//!
//! Inputs arrive as three pipe-delimited text files: entity `id|name`
//! pairs, group `id|name` pairs, and `groupId|entityId` membership
//! pairs. The functions here only parse lines; reading files from disk
//! is the caller's job.

use crate::error::GraphError;
use std::collections::HashMap;

/// An id → canonical name table with unique keys.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    by_id: HashMap<String, String>,
}

impl NameTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an id → name mapping, returning the previous name if
    /// the id was already present.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.by_id.insert(id.into(), name.into())
    }

    /// Parses `id|name` lines into a table.
    ///
    /// Splits each line on its first `|`, so names may themselves
    /// contain the separator. Blank lines are skipped. A line without a
    /// separator, an empty id or name, or a repeated id is a
    /// [`GraphError::MalformedRecord`] carrying the 1-based line number.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (id, name) = split_record(line, idx + 1)?;
            if table.insert(id, name).is_some() {
                return Err(GraphError::MalformedRecord {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
        }
        Ok(table)
    }

    /// Resolves an id to its canonical name.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Iterates over all names in the table.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_id.values().map(String::as_str)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// A single `(group, entity)` co-occurrence record.
///
/// Duplicates are permitted here; the builder applies set semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub group_id: String,
    pub entity_id: String,
}

impl Membership {
    /// Parses `groupId|entityId` lines, with the same malformed-line
    /// rules as [`NameTable::from_lines`]. Duplicate pairs are kept.
    pub fn from_lines<'a, I>(lines: I) -> Result<Vec<Self>, GraphError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records = Vec::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (group_id, entity_id) = split_record(line, idx + 1)?;
            records.push(Self {
                group_id: group_id.to_string(),
                entity_id: entity_id.to_string(),
            });
        }
        Ok(records)
    }
}

/// Splits a line on its first `|`, rejecting empty sides.
fn split_record(line: &str, line_no: usize) -> Result<(&str, &str), GraphError> {
    match line.split_once('|') {
        Some((id, rest)) if !id.is_empty() && !rest.is_empty() => Ok((id, rest)),
        _ => Err(GraphError::MalformedRecord {
            line: line_no,
            content: line.to_string(),
        }),
    }
}
