//! Controller roles.
//!
//! The proxy serves two kinds of controller. The synchronous controller is
//! the GATT service relaying for a peer: it only ever talks to the local
//! player, calls in through [`SyncMediaControl`], and receives plain
//! [`PlayerEvent`](playback::PlayerEvent)s through a
//! [`PlayerEventSink`](playback::PlayerEventSink). The asynchronous
//! controller is local application code: every call names a player and every
//! answer arrives through [`AsyncController`], tagged with that player and a
//! result.

use core::fmt;

use platform::ConnHandle;

use crate::characteristic::Characteristic;
use crate::error::{ProxyError, RemoteError};
use crate::request::WriteRequest;
use crate::value::Value;

/// Which player a controller is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerHandle {
    /// The player registered in this device.
    Local,
    /// The player discovered on a peer over this connection.
    Remote(ConnHandle),
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerHandle::Local => f.write_str("local"),
            PlayerHandle::Remote(conn) => write!(f, "remote {conn}"),
        }
    }
}

/// Callbacks of the asynchronous controller.
///
/// For the local player every callback runs before the call that caused it
/// returns. For a remote player they run when the client's response arrives.
pub trait AsyncController {
    /// A player became usable, or discovery of a remote one failed.
    fn player_available(&mut self, player: PlayerHandle, result: Result<(), RemoteError>);

    /// A read completed or a player notified a change.
    fn value(
        &mut self,
        player: PlayerHandle,
        characteristic: Characteristic,
        result: Result<&Value, RemoteError>,
    );

    /// A write was delivered.
    fn written(
        &mut self,
        player: PlayerHandle,
        request: &WriteRequest,
        result: Result<(), RemoteError>,
    );
}

/// Calls the synchronous controller makes into the local player.
pub trait SyncMediaControl {
    /// Current value of `characteristic`.
    ///
    /// # Errors
    ///
    /// [`ProxyError::NotSupported`] without a local player, or for
    /// characteristics that cannot be read.
    fn read_local(&self, characteristic: Characteristic) -> Result<Value, ProxyError>;

    /// Apply `request` to the local player.
    ///
    /// # Errors
    ///
    /// [`ProxyError::NotSupported`] without a local player.
    fn write_local(&mut self, request: &WriteRequest) -> Result<(), ProxyError>;
}

/// Async controller that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoController;

impl AsyncController for NoController {
    fn player_available(&mut self, _player: PlayerHandle, _result: Result<(), RemoteError>) {}

    fn value(
        &mut self,
        _player: PlayerHandle,
        _characteristic: Characteristic,
        _result: Result<&Value, RemoteError>,
    ) {
    }

    fn written(
        &mut self,
        _player: PlayerHandle,
        _request: &WriteRequest,
        _result: Result<(), RemoteError>,
    ) {
    }
}
