//! Media proxy: the switchboard between controllers and players.
//!
//! One local player and at most one remote player sit behind the proxy.
//! Local calls run synchronously; every event the local player emits while
//! handling one fans out to the synchronous controller and then to the async
//! controller. Calls on the remote player are forwarded to the
//! [`MediaControlClient`] and answered later through
//! [`MediaProxy::on_client_event`].
//!
//! ```text
//!   MCS (sync) ─┐                    ┌─ local MediaPlayer
//!               ├── MediaProxy ──────┤
//!   app (async) ┘                    └─ MediaControlClient ── remote player
//! ```

use playback::{MediaPlayer, PlayerEvent, PlayerEventSink};
use platform::ConnHandle;

use crate::characteristic::Characteristic;
use crate::controller::{AsyncController, PlayerHandle, SyncMediaControl};
use crate::error::{ProxyError, RemoteError};
use crate::mcc::{decode_read, ClientEvent, MediaControlClient};
use crate::request::WriteRequest;
use crate::state::RemoteState;
use crate::value::Value;

/// Routes controller calls to the local or the remote player.
pub struct MediaProxy<P, C, S, A> {
    local: Option<P>,
    client: C,
    remote: RemoteState,
    sync: Option<S>,
    controller: Option<A>,
}

/// Delivers each local player event to both controllers, in that order.
struct FanOut<'a, S, A> {
    sync: Option<&'a mut S>,
    controller: Option<&'a mut A>,
}

impl<S: PlayerEventSink, A: AsyncController> PlayerEventSink for FanOut<'_, S, A> {
    fn on_player_event(&mut self, event: &PlayerEvent) {
        if let Some(sync) = self.sync.as_deref_mut() {
            sync.on_player_event(event);
        }
        if let Some(controller) = self.controller.as_deref_mut() {
            let value = Value::from_event(event);
            controller.value(PlayerHandle::Local, value.characteristic(), Ok(&value));
        }
    }
}

impl<P, C, S, A> MediaProxy<P, C, S, A>
where
    P: MediaPlayer,
    C: MediaControlClient,
    S: PlayerEventSink,
    A: AsyncController,
{
    /// A proxy with no players and no controllers.
    pub const fn new(client: C) -> Self {
        Self {
            local: None,
            client,
            remote: RemoteState::new(),
            sync: None,
            controller: None,
        }
    }

    /// Register the local player.
    ///
    /// # Errors
    ///
    /// [`ProxyError::AlreadyRegistered`] if one is registered already; the
    /// new player is dropped.
    pub fn register_local_player(&mut self, player: P) -> Result<(), ProxyError> {
        if self.local.is_some() {
            warn!("local player already registered");
            return Err(ProxyError::AlreadyRegistered);
        }
        self.local = Some(player);
        info!("local player registered");
        if let Some(controller) = self.controller.as_mut() {
            controller.player_available(PlayerHandle::Local, Ok(()));
        }
        Ok(())
    }

    /// Register the synchronous controller, replacing any previous one.
    pub fn register_sync_controller(&mut self, sync: S) {
        self.sync = Some(sync);
    }

    /// Register the async controller, replacing any previous one. It is told
    /// about the local player at once if there is one.
    pub fn register_controller(&mut self, controller: A) {
        let controller = self.controller.insert(controller);
        if self.local.is_some() {
            controller.player_available(PlayerHandle::Local, Ok(()));
        }
    }

    /// Whether a local player is registered.
    pub fn has_local_player(&self) -> bool {
        self.local.is_some()
    }

    /// The local player.
    pub fn local_player(&self) -> Option<&P> {
        self.local.as_ref()
    }

    /// The local player, for calls that emit no events.
    pub fn local_player_mut(&mut self) -> Option<&mut P> {
        self.local.as_mut()
    }

    /// Run `f` on the local player with the controllers as its event sink.
    ///
    /// # Errors
    ///
    /// [`ProxyError::NotSupported`] without a local player.
    pub fn drive_local<R>(
        &mut self,
        f: impl FnOnce(&mut P, &mut dyn PlayerEventSink) -> R,
    ) -> Result<R, ProxyError> {
        let player = self.local.as_mut().ok_or(ProxyError::NotSupported)?;
        let mut sink = FanOut {
            sync: self.sync.as_mut(),
            controller: self.controller.as_mut(),
        };
        Ok(f(player, &mut sink))
    }

    /// The synchronous controller.
    pub fn sync_controller(&self) -> Option<&S> {
        self.sync.as_ref()
    }

    /// The synchronous controller, mutably.
    pub fn sync_controller_mut(&mut self) -> Option<&mut S> {
        self.sync.as_mut()
    }

    /// The async controller.
    pub fn controller(&self) -> Option<&A> {
        self.controller.as_ref()
    }

    /// The async controller, mutably.
    pub fn controller_mut(&mut self) -> Option<&mut A> {
        self.controller.as_mut()
    }

    /// The media control client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The media control client, mutably.
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Handle of the remote player, once discovered.
    pub fn remote_player(&self) -> Option<PlayerHandle> {
        self.remote.player().map(PlayerHandle::Remote)
    }

    /// Read `characteristic` from `player`. The value reaches the async
    /// controller: at once for the local player, later for a remote one.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::NotSupported`] for characteristics that cannot be read,
    ///   or when no such player is registered
    /// - [`ProxyError::Client`] when the client cannot issue the read
    pub fn read(&mut self, player: PlayerHandle, characteristic: Characteristic) -> Result<(), ProxyError> {
        if !characteristic.is_readable() {
            return Err(ProxyError::NotSupported);
        }
        match player {
            PlayerHandle::Local => {
                let value = self.read_local(characteristic)?;
                if let Some(controller) = self.controller.as_mut() {
                    controller.value(PlayerHandle::Local, characteristic, Ok(&value));
                }
                Ok(())
            }
            PlayerHandle::Remote(conn) => {
                self.check_remote(conn)?;
                debug!("read {} on {}", characteristic, conn);
                self.client.read(conn, characteristic)
            }
        }
    }

    /// Write `request` to `player`. For the local player the events it
    /// causes fan out first, then the async controller gets the write
    /// confirmation.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::NotSupported`] when no such player is registered
    /// - [`ProxyError::Client`] when the client cannot issue the write
    pub fn write(&mut self, player: PlayerHandle, request: &WriteRequest) -> Result<(), ProxyError> {
        match player {
            PlayerHandle::Local => {
                self.drive_local(|player, sink| request.apply(player, sink))?;
                if let Some(controller) = self.controller.as_mut() {
                    controller.written(PlayerHandle::Local, request, Ok(()));
                }
                Ok(())
            }
            PlayerHandle::Remote(conn) => {
                self.check_remote(conn)?;
                debug!("write {} on {}", request.characteristic(), conn);
                self.client.write(conn, request)
            }
        }
    }

    /// Look for a media player on the peer at `conn`.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Client`] when discovery cannot be started.
    pub fn discover_player(&mut self, conn: ConnHandle) -> Result<(), ProxyError> {
        self.client.discover(conn)?;
        self.remote.on_discovery_started(conn);
        debug!("discovering media player on {}", conn);
        Ok(())
    }

    /// Handle a completion from the media control client.
    pub fn on_client_event(&mut self, event: ClientEvent<'_>) {
        match event {
            ClientEvent::Discovered { conn, result } => {
                if !self.remote.on_discovered(conn, result.is_ok()) {
                    warn!("unexpected discovery result on {}", conn);
                    return;
                }
                match result {
                    Ok(()) => info!("remote media player on {}", conn),
                    Err(e) => warn!("discovery on {} failed: {}", conn, e),
                }
                if let Some(controller) = self.controller.as_mut() {
                    controller.player_available(PlayerHandle::Remote(conn), result);
                }
            }
            ClientEvent::Read {
                conn,
                characteristic,
                result,
            } => {
                let value = result.and_then(|data| decode_read(characteristic, data));
                self.deliver_remote(conn, characteristic, &value);
            }
            ClientEvent::Notified {
                conn,
                characteristic,
                data,
            } => {
                let value = decode_read(characteristic, data);
                self.deliver_remote(conn, characteristic, &value);
            }
            ClientEvent::Written {
                conn,
                request,
                result,
            } => {
                if self.remote.player() != Some(conn) {
                    debug!("dropping write result from {}", conn);
                    return;
                }
                if let Some(controller) = self.controller.as_mut() {
                    controller.written(PlayerHandle::Remote(conn), &request, result);
                }
            }
        }
    }

    /// The connection at `conn` went away.
    pub fn on_disconnected(&mut self, conn: ConnHandle) {
        if self.remote.on_disconnected(conn) {
            info!("remote media player on {} gone", conn);
        }
    }

    fn check_remote(&self, conn: ConnHandle) -> Result<(), ProxyError> {
        if self.remote.player() == Some(conn) {
            Ok(())
        } else {
            debug!("no media player on {}", conn);
            Err(ProxyError::NotSupported)
        }
    }

    fn deliver_remote(
        &mut self,
        conn: ConnHandle,
        characteristic: Characteristic,
        value: &Result<Value, RemoteError>,
    ) {
        if self.remote.player() != Some(conn) {
            debug!("dropping {} from {}", characteristic, conn);
            return;
        }
        if let Err(e) = value {
            warn!("{} from {}: {}", characteristic, conn, e);
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.value(PlayerHandle::Remote(conn), characteristic, value.as_ref().map_err(|e| *e));
        }
    }
}

impl<P, C, S, A> SyncMediaControl for MediaProxy<P, C, S, A>
where
    P: MediaPlayer,
    C: MediaControlClient,
    S: PlayerEventSink,
    A: AsyncController,
{
    fn read_local(&self, characteristic: Characteristic) -> Result<Value, ProxyError> {
        let player = self.local.as_ref().ok_or(ProxyError::NotSupported)?;
        Value::read(player, characteristic).ok_or(ProxyError::NotSupported)
    }

    fn write_local(&mut self, request: &WriteRequest) -> Result<(), ProxyError> {
        self.drive_local(|player, sink| request.apply(player, sink))
    }
}
