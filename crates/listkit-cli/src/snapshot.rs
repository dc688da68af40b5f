//! JSON snapshot formats read by the CLI.
//!
//! A flat list is an array of elements. An element is either a bare string
//! (its identity) or an object `{"id": "...", "content": ...}`; two elements
//! with the same id are equal when their `content` values are equal.
//!
//! A sectioned snapshot is an array of `{"id": "...", "items": [...]}`
//! objects, each optionally carrying its own `content`.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use listkit_batch::DiffableSection;
use listkit_types::Diffable;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawElement")]
pub struct Element {
    pub id: String,
    pub content: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawElement {
    Bare(String),
    Full {
        id: String,
        #[serde(default)]
        content: Value,
    },
}

impl From<RawElement> for Element {
    fn from(raw: RawElement) -> Self {
        match raw {
            RawElement::Bare(id) => Self {
                id,
                content: Value::Null,
            },
            RawElement::Full { id, content } => Self { id, content },
        }
    }
}

impl Diffable for Element {
    type Identity = String;

    fn identity(&self) -> String {
        self.id.clone()
    }

    fn is_equal(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSection {
    pub id: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub items: Vec<Element>,
}

impl Diffable for SnapshotSection {
    type Identity = String;

    fn identity(&self) -> String {
        self.id.clone()
    }

    fn is_equal(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl DiffableSection for SnapshotSection {
    type Item = Element;

    fn items(&self) -> &[Element] {
        &self.items
    }
}

/// Read and parse a JSON snapshot file.
pub fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid snapshot {}", path.display()))
}
