//! Media proxy and the GATT layers of the Media Control Service.
//!
//! [`MediaProxy`] routes controller calls to the local [`playback::Mpl`] or
//! to a remote player behind a [`MediaControlClient`], and fans the local
//! player's events out to its controllers. [`MediaControlService`] is the
//! synchronous controller that serves the player over GATT.
//!
//! # Modules
//!
//! - [`characteristic`] - MCS characteristics, UUIDs and properties
//! - [`value`] - characteristic values and their encoding
//! - [`request`] - parsed characteristic writes
//! - [`error`] - `ProxyError` and `RemoteError`
//! - [`controller`] - player handles and the controller traits
//! - [`proxy`] - `MediaProxy`
//! - [`mcs`] - GATT server: subscriptions, notifications, reads and writes
//! - [`mcc`] - GATT client seam and response decoding
//! - [`channel`] - async controller over an embassy channel
//! - [`state`] - remote player tracking
//! - [`local_player`] - local player initialisation
//!
//! # Features
//!
//! - `defmt`: log through `defmt` and derive `defmt::Format`
//! - `tracing`: log through `tracing` on the host

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

#[macro_use]
mod log;

pub mod channel;
pub mod characteristic;
pub mod controller;
pub mod error;
pub mod local_player;
pub mod mcc;
pub mod mcs;
pub mod proxy;
pub mod request;
pub mod state;
pub mod value;

pub use channel::{ChannelController, ControllerChannel, ControllerMessage, CHANNEL_DEPTH};
pub use characteristic::Characteristic;
pub use controller::{AsyncController, NoController, PlayerHandle, SyncMediaControl};
pub use error::{ProxyError, RemoteError};
pub use local_player::{init_local_player, resume_object_registration};
pub use mcc::{decode_read, ClientEvent, MediaControlClient};
pub use mcs::{GattNotifier, MediaControlService};
pub use proxy::MediaProxy;
pub use request::WriteRequest;
pub use value::Value;
