//! Media Player List: the local media player behind the media control service.
//!
//! [`Mpl`] owns a [`library::Catalog`] and runs the control point state
//! machine over it. Every change it makes is reported as a [`PlayerEvent`]
//! to the sink passed into the call, so the crate has no I/O of its own and
//! runs unchanged on the host.
//!
//! # Modules
//!
//! - [`media`] - media state, playing order, speeds and their constants
//! - [`command`] - control point opcodes, commands and result codes
//! - [`search`] - search control item parsing
//! - [`events`] - `PlayerEvent` and the `PlayerEventSink` trait
//! - [`player`] - the `MediaPlayer` trait the proxy drives
//! - [`engine`] - `Mpl`, the state machine
//! - [`objects`] - object registration, selection and reads
//! - [`snapshot`] - serialisable view of a player for tooling

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

#[macro_use]
mod log;

pub mod command;
pub mod engine;
pub mod events;
pub mod media;
pub mod objects;
pub mod player;
pub mod search;
pub mod snapshot;

pub use command::{Command, CommandNtf, Opcode, ResultCode, OPCODES_SUPPORTED};
pub use engine::Mpl;
pub use events::{EventKind, EventLog, NullSink, PlayerEvent, PlayerEventSink};
pub use media::{MediaState, PlayingOrder, PlayingOrders, SearchResultCode};
pub use objects::{ObjectError, Registration};
pub use player::MediaPlayer;
pub use search::{SearchError, SearchType};
pub use snapshot::PlayerSnapshot;
