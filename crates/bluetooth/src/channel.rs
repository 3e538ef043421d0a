//! Async controller backed by an embassy channel.
//!
//! [`ChannelController`] turns every controller callback into an owned
//! [`ControllerMessage`] and queues it on a [`Channel`], so the application
//! task that consumes them can run on its own. Messages keep the order the
//! proxy produced them in.
//!
//! # Overflow handling
//!
//! Callbacks run inside the proxy and cannot wait. When the consumer stalls
//! and the channel is full, the message is dropped, a warning is logged and
//! [`ChannelController::dropped`] counts it. [`CHANNEL_DEPTH`] controls how
//! many messages may queue before drops begin.
//!
//! ```ignore
//! static CONTROLLER_CHANNEL: ControllerChannel<CriticalSectionRawMutex> = Channel::new();
//!
//! proxy.register_controller(ChannelController::new(&CONTROLLER_CHANNEL));
//! let rx = CONTROLLER_CHANNEL.receiver();
//! // In the application task:
//! let message = rx.receive().await;
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Sender};

use crate::characteristic::Characteristic;
use crate::controller::{AsyncController, PlayerHandle};
use crate::error::RemoteError;
use crate::request::WriteRequest;
use crate::value::Value;

/// Default channel depth.
pub const CHANNEL_DEPTH: usize = 16;

/// Channel carrying controller messages.
pub type ControllerChannel<M, const N: usize = CHANNEL_DEPTH> = Channel<M, ControllerMessage, N>;

/// One controller callback, owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerMessage {
    /// See [`AsyncController::player_available`].
    PlayerAvailable {
        /// Player the message is about.
        player: PlayerHandle,
        /// Outcome.
        result: Result<(), RemoteError>,
    },
    /// See [`AsyncController::value`].
    Value {
        /// Player the message is about.
        player: PlayerHandle,
        /// Characteristic read or notified.
        characteristic: Characteristic,
        /// The value, or why it is missing.
        result: Result<Value, RemoteError>,
    },
    /// See [`AsyncController::written`].
    Written {
        /// Player the message is about.
        player: PlayerHandle,
        /// The write.
        request: WriteRequest,
        /// Outcome.
        result: Result<(), RemoteError>,
    },
}

impl ControllerMessage {
    /// Player the message is about.
    #[must_use]
    pub const fn player(&self) -> PlayerHandle {
        match self {
            ControllerMessage::PlayerAvailable { player, .. }
            | ControllerMessage::Value { player, .. }
            | ControllerMessage::Written { player, .. } => *player,
        }
    }
}

/// Async controller that queues its callbacks on a channel.
pub struct ChannelController<'ch, M: RawMutex, const N: usize> {
    tx: Sender<'ch, M, ControllerMessage, N>,
    dropped: usize,
}

impl<'ch, M: RawMutex, const N: usize> ChannelController<'ch, M, N> {
    /// A controller sending into `channel`.
    pub fn new(channel: &'ch Channel<M, ControllerMessage, N>) -> Self {
        Self {
            tx: channel.sender(),
            dropped: 0,
        }
    }

    /// Messages dropped because the channel was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn push(&mut self, message: ControllerMessage) {
        if self.tx.try_send(message).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            warn!("controller channel full, {} messages dropped", self.dropped);
        }
    }
}

impl<M: RawMutex, const N: usize> AsyncController for ChannelController<'_, M, N> {
    fn player_available(&mut self, player: PlayerHandle, result: Result<(), RemoteError>) {
        self.push(ControllerMessage::PlayerAvailable { player, result });
    }

    fn value(
        &mut self,
        player: PlayerHandle,
        characteristic: Characteristic,
        result: Result<&Value, RemoteError>,
    ) {
        self.push(ControllerMessage::Value {
            player,
            characteristic,
            result: result.cloned(),
        });
    }

    fn written(
        &mut self,
        player: PlayerHandle,
        request: &WriteRequest,
        result: Result<(), RemoteError>,
    ) {
        self.push(ControllerMessage::Written {
            player,
            request: request.clone(),
            result,
        });
    }
}
