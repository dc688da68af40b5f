use serde::{Deserialize, Serialize};

use crate::index::IndexPath;

/// Whether an explicit operation inserts or deletes.
///
/// Deletes are expressed in the old index space, inserts in the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Insert,
    Delete,
}

/// An explicit insert or delete of a whole section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionOperation {
    pub kind: OperationKind,
    pub index: usize,
}

impl SectionOperation {
    pub fn insert(index: usize) -> Self {
        Self {
            kind: OperationKind::Insert,
            index,
        }
    }

    pub fn delete(index: usize) -> Self {
        Self {
            kind: OperationKind::Delete,
            index,
        }
    }
}

/// An explicit insert or delete of a single item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemOperation {
    pub kind: OperationKind,
    pub path: IndexPath,
}

impl ItemOperation {
    pub fn insert(path: IndexPath) -> Self {
        Self {
            kind: OperationKind::Insert,
            path,
        }
    }

    pub fn delete(path: IndexPath) -> Self {
        Self {
            kind: OperationKind::Delete,
            path,
        }
    }
}
