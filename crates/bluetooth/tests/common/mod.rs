//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use bluetooth::{
    AsyncController, Characteristic, ControllerMessage, GattNotifier, MediaControlClient,
    MediaControlService, MediaProxy, PlayerHandle, ProxyError, RemoteError, Value, WriteRequest,
};
use platform::{AttError, ConnHandle};
use playback::{EventLog, Mpl};

/// Media control client that records what it was asked to do.
#[derive(Debug, Default)]
pub struct MockClient {
    pub discovered: Vec<ConnHandle>,
    pub reads: Vec<(ConnHandle, Characteristic)>,
    pub writes: Vec<(ConnHandle, WriteRequest)>,
    /// Refuse every request with this errno.
    pub refuse: Option<i32>,
}

impl MockClient {
    fn accept(&self) -> Result<(), ProxyError> {
        self.refuse.map_or(Ok(()), |err| Err(ProxyError::Client(err)))
    }
}

impl MediaControlClient for MockClient {
    fn discover(&mut self, conn: ConnHandle) -> Result<(), ProxyError> {
        self.accept()?;
        self.discovered.push(conn);
        Ok(())
    }

    fn read(&mut self, conn: ConnHandle, characteristic: Characteristic) -> Result<(), ProxyError> {
        self.accept()?;
        self.reads.push((conn, characteristic));
        Ok(())
    }

    fn write(&mut self, conn: ConnHandle, request: &WriteRequest) -> Result<(), ProxyError> {
        self.accept()?;
        self.writes.push((conn, request.clone()));
        Ok(())
    }
}

/// Async controller that keeps every callback as a message.
#[derive(Debug, Default)]
pub struct Recording {
    pub messages: Vec<ControllerMessage>,
}

impl Recording {
    /// Characteristics of the value messages, in order.
    pub fn characteristics(&self) -> Vec<Characteristic> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                ControllerMessage::Value { characteristic, .. } => Some(*characteristic),
                _ => None,
            })
            .collect()
    }
}

impl AsyncController for Recording {
    fn player_available(&mut self, player: PlayerHandle, result: Result<(), RemoteError>) {
        self.messages
            .push(ControllerMessage::PlayerAvailable { player, result });
    }

    fn value(
        &mut self,
        player: PlayerHandle,
        characteristic: Characteristic,
        result: Result<&Value, RemoteError>,
    ) {
        self.messages.push(ControllerMessage::Value {
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
        self.messages.push(ControllerMessage::Written {
            player,
            request: request.clone(),
            result,
        });
    }
}

/// Notifier that keeps every notification.
#[derive(Debug, Default)]
pub struct Notifications {
    pub sent: Vec<(Characteristic, Vec<u8>)>,
    /// Fail every notification with this error.
    pub refuse: Option<AttError>,
}

impl GattNotifier for Notifications {
    fn notify(&mut self, characteristic: Characteristic, value: &[u8]) -> Result<(), AttError> {
        if let Some(e) = self.refuse {
            return Err(e);
        }
        self.sent.push((characteristic, value.to_vec()));
        Ok(())
    }
}

/// Proxy with a recording sync sink and a recording async controller.
pub type TestProxy = MediaProxy<Mpl, MockClient, EventLog<64>, Recording>;

/// Proxy with the GATT service as its sync controller.
pub type ServiceProxy = MediaProxy<Mpl, MockClient, MediaControlService<Notifications>, Recording>;

pub const PEER: ConnHandle = ConnHandle(0x0040);
