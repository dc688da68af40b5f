//! Batch reconciliation for listkit.
//!
//! Diffing a sectioned collection produces section operations and, for every
//! section present on both sides, item operations. Those raw candidates can
//! contradict each other: an item move inside a section that is also being
//! deleted, a section move whose origin is also a delete. Handing such a set
//! to an index-based list surface crashes it.
//!
//! This crate builds the candidates and reconciles them into a
//! [`BatchUpdateData`] that is always safe to apply. Conflicts are resolved
//! conservatively: a move is downgraded to a delete plus an insert, and item
//! operations already covered by a section delete or insert are dropped.
//!
//! # Key Types
//!
//! - [`DiffableSection`] -- A section of a two-level collection
//! - [`build_candidates`] / [`Candidates`] -- Raw, unreconciled operations
//! - [`Reconciler`] -- The ordered rule pipeline, configured by [`BatchConfig`]
//! - [`BatchUpdateData`] -- The immutable, invariant-respecting result
//!
//! ```rust
//! use listkit_batch::reconcile;
//! use listkit_types::{IndexPath, MoveIndexPath, SectionOperation};
//!
//! // Section 0 is deleted, yet the diff also reported an item move inside it.
//! let batch = reconcile(
//!     &[SectionOperation::delete(0)],
//!     &[],
//!     &[],
//!     &[MoveIndexPath::new(IndexPath::new(0, 2), IndexPath::new(0, 0))],
//! );
//! assert_eq!(batch.delete_sections().len(), 1);
//! assert!(batch.move_item_paths().is_empty());
//! assert!(batch.validate().is_ok());
//! ```

pub mod batch;
pub mod candidates;
pub mod config;
pub mod error;
pub mod reconcile;
mod rules;


pub use batch::BatchUpdateData;
pub use candidates::{build_candidates, Candidates, DiffableSection};
pub use config::BatchConfig;
pub use error::{ConfigError, InvariantViolation};
pub use reconcile::{batch_updates, reconcile, ReconcileReport, Reconciler, RuleReport};
