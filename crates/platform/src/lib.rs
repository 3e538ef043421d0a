//! Platform collaborators for the media control stack
//!
//! This crate holds the types and traits the media player and its GATT
//! layers share with the rest of the Bluetooth host, so that the player can
//! be developed and tested without a radio.
//!
//! # Architecture Layers
//!
//! ```text
//! Controllers (MCS service relay, local application, channel consumer)
//!         ↓
//! Media Proxy (bluetooth crate)
//!         ↓
//! Media Player List (playback crate) ── Player Data Model (library crate)
//!         ↓
//! Platform collaborators (this crate - OTS, CCID, ATT/ACL primitives)
//! ```
//!
//! # Modules
//!
//! - [`ots`] - 48-bit object ids and the Object Transfer Service trait
//! - [`ccid`] - Content Control ID allocation
//! - [`bluetooth`] - connection handles, ATT error codes, errno values
//! - [`config`] - player name, icon URL and buffer sizes
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Derive `defmt::Format` on platform types

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // plain accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod bluetooth;
pub mod ccid;
pub mod config;
pub mod mocks;
pub mod ots;

pub use bluetooth::{AttError, ConnHandle};
pub use ccid::CcidAllocator;
pub use config::PlayerConfig;
pub use ots::{ObjectAddParams, ObjectCreation, ObjectId, ObjectTransferService, ObjectType, OtsError};
