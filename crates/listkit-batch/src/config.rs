use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for candidate building and reconciliation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Emit items whose content changed as a delete of the old path plus an
    /// insert of the new path. A rendering surface cannot reload and move
    /// the same cell in one transaction.
    pub convert_item_updates: bool,
    /// Downgrade a section move to a section delete + insert when the moved
    /// section also carries item deletes, inserts or moves. The item
    /// operations are then absorbed by the section replacement.
    pub downgrade_moved_sections_with_changes: bool,
}

/// The default keeps section moves even when the moved section also has
/// item changes, so the surface sees the fewest whole-section reloads. A
/// surface that rejects item changes inside a moving section in one
/// transaction should use [`BatchConfig::strict`] instead, at the cost of
/// reloading those sections.
impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            convert_item_updates: true,
            downgrade_moved_sections_with_changes: false,
        }
    }
}

impl BatchConfig {
    /// The most conservative configuration: never combine a section move
    /// with item changes inside that section.
    pub fn strict() -> Self {
        Self {
            downgrade_moved_sections_with_changes: true,
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML text. Missing keys take their
    /// default values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_converts_updates_and_keeps_section_moves() {
        let config = BatchConfig::default();
        assert!(config.convert_item_updates);
        assert!(!config.downgrade_moved_sections_with_changes);
    }

    #[test]
    fn strict_downgrades_moved_sections() {
        let config = BatchConfig::strict();
        assert!(config.convert_item_updates);
        assert!(config.downgrade_moved_sections_with_changes);
    }

    #[test]
    fn strict_replaces_moved_section_with_item_changes() {
        use listkit_types::{IndexPath, ItemOperation, MoveIndex};

        use crate::{Candidates, Reconciler};

        let candidates = Candidates {
            section_moves: vec![MoveIndex::new(0, 1), MoveIndex::new(1, 0)],
            item_ops: vec![ItemOperation::delete(IndexPath::new(1, 0))],
            ..Default::default()
        };

        let relaxed = Reconciler::new(BatchConfig::default()).reconcile(&candidates);
        assert_eq!(relaxed.move_sections().len(), 2);
        assert_eq!(relaxed.delete_item_paths().len(), 1);

        let strict = Reconciler::new(BatchConfig::strict()).reconcile(&candidates);
        assert_eq!(strict.move_sections().len(), 1);
        assert!(strict.delete_sections().contains(&1));
        assert!(strict.insert_sections().contains(&0));
        assert!(strict.delete_item_paths().is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = BatchConfig::from_toml_str("convert_item_updates = false\n").unwrap();
        assert!(!config.convert_item_updates);
        assert!(!config.downgrade_moved_sections_with_changes);
    }

    #[test]
    fn unknown_value_type_is_rejected() {
        let err = BatchConfig::from_toml_str("convert_item_updates = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let config = BatchConfig::strict();
        let text = config.to_toml_string().unwrap();
        assert_eq!(BatchConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "downgrade_moved_sections_with_changes = true").unwrap();
        let config = BatchConfig::load(file.path()).unwrap();
        assert_eq!(config, BatchConfig::strict());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = BatchConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
