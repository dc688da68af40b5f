//! Error types for the batch crate.

use std::path::PathBuf;

use listkit_types::IndexPath;

/// A broken [`BatchUpdateData`](crate::BatchUpdateData) invariant.
///
/// The reconciler never produces one of these; [`validate`] exists so tests
/// and callers holding a batch can assert that.
///
/// [`validate`]: crate::BatchUpdateData::validate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// A section is both deleted and the origin of a move.
    #[error("section {from} is deleted and moved")]
    SectionMoveFromDeleted { from: usize },

    /// A section is both inserted and the destination of a move.
    #[error("section {to} is inserted and a move destination")]
    SectionMoveToInserted { to: usize },

    /// An item is both deleted and the origin of a move.
    #[error("item {from} is deleted and moved")]
    ItemMoveFromDeleted { from: IndexPath },

    /// An item is both inserted and the destination of a move.
    #[error("item {to} is inserted and a move destination")]
    ItemMoveToInserted { to: IndexPath },

    /// An item delete or move origin lies inside a deleted section.
    #[error("item {path} lies in deleted section {}", .path.section)]
    ItemInDeletedSection { path: IndexPath },

    /// An item insert or move destination lies inside an inserted section.
    #[error("item {path} lies in inserted section {}", .path.section)]
    ItemInInsertedSection { path: IndexPath },
}

/// Errors raised while loading a [`BatchConfig`](crate::BatchConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}
