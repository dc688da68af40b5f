//! Foundation types for listkit.
//!
//! This crate provides the identity contract and the index value types shared
//! by the diff engine and the batch reconciler. Every other listkit crate
//! depends on `listkit-types`.
//!
//! # Key Types
//!
//! - [`Diffable`] -- Identity + equality contract every diffed element implements
//! - [`IndexPath`] -- A `(section, item)` position in a two-level collection
//! - [`MoveIndex`] / [`MoveIndexPath`] -- Section and item relocations
//! - [`SectionOperation`] / [`ItemOperation`] -- Explicit insert/delete operations

pub mod error;
pub mod identity;
pub mod index;
pub mod operation;

pub use error::TypeError;
pub use identity::Diffable;
pub use index::{IndexPath, MoveIndex, MoveIndexPath};
pub use operation::{ItemOperation, OperationKind, SectionOperation};
