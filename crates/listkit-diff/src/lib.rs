//! Diff engine for listkit.
//!
//! Computes the structural difference between an old and a new ordered
//! sequence of [`Diffable`](listkit_types::Diffable) elements: which old
//! positions were deleted, which new positions were inserted, which matched
//! elements moved, and which changed content in place.
//!
//! # Key Types
//!
//! - [`diff`] / [`DiffResult`] -- Flat sequence diff (old-space deletes, new-space inserts, moves)
//! - [`diff_paths`] / [`PathDiff`] -- The same diff addressed by `(section, item)` paths
//!
//! ```rust
//! use listkit_diff::diff;
//! use listkit_types::MoveIndex;
//!
//! let result = diff(&["x", "y", "z"], &["z", "y", "w"]);
//! assert_eq!(result.deletes.iter().copied().collect::<Vec<_>>(), vec![0]);
//! assert_eq!(result.inserts.iter().copied().collect::<Vec<_>>(), vec![2]);
//! assert!(result.moves.contains(&MoveIndex::new(2, 0)));
//! ```

pub mod heckel;
pub mod paths;
pub mod result;

#[cfg(test)]
mod property_tests;

pub use heckel::diff;
pub use paths::{diff_paths, PathDiff};
pub use result::DiffResult;
