//! Player data model: groups, tracks and segments.
//!
//! The catalog is a set of fixed-capacity arenas linked by typed indices,
//! built once through [`CatalogBuilder`] and afterwards only mutated through
//! its cursors and object ids.
//!
//! # Modules
//!
//! - [`index`] - `GroupIdx`, `TrackIdx`, `SegmentIdx` and arena capacities
//! - [`track`] - `Track` and `Segment` records
//! - [`catalog`] - `Catalog`, `Group` and the builder
//! - [`navigation`] - prev/next/first/last/goto over any of the lists
//! - `builtin` - the catalog a fresh local player starts with

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

#[macro_use]
mod log;

mod builtin;
pub mod catalog;
pub mod index;
pub mod navigation;
pub mod track;

pub use catalog::{Catalog, CatalogBuilder, CatalogError, Group};
pub use index::{GroupIdx, SegmentIdx, TrackIdx, MAX_GROUPS, MAX_SEGMENTS, MAX_TRACKS};
pub use navigation::{Chain, GroupChain, Moved, SegmentChain, TrackChain, Walk};
pub use track::{Segment, Track};
