use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A position in a two-level (section, item) collection.
///
/// Ordering is section-major, so sorted sets of paths iterate section by
/// section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.item)
    }
}

impl FromStr for IndexPath {
    type Err = TypeError;

    /// Parse the `"section.item"` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (section, item) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| TypeError::InvalidIndexPath(s.to_string()))?;
        Ok(Self {
            section: parse_index(section)?,
            item: parse_index(item)?,
        })
    }
}

fn parse_index(s: &str) -> Result<usize, TypeError> {
    s.parse().map_err(|e: std::num::ParseIntError| TypeError::InvalidIndex {
        value: s.to_string(),
        reason: e.to_string(),
    })
}

/// A section relocated from `from` (old index space) to `to` (new index space).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoveIndex {
    pub from: usize,
    pub to: usize,
}

impl MoveIndex {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for MoveIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// An item relocated from `from` (old index space) to `to` (new index space).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoveIndexPath {
    pub from: IndexPath,
    pub to: IndexPath,
}

impl MoveIndexPath {
    pub fn new(from: IndexPath, to: IndexPath) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for MoveIndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
