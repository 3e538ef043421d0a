//! Media Control Service, the GATT server side.
//!
//! [`MediaControlService`] is the proxy's synchronous controller: it turns
//! every local player event into a notification of the matching
//! characteristic, for the characteristics a client subscribed to. Reads and
//! writes coming in from the ATT layer go through [`on_read`] and
//! [`on_write`], which talk to the proxy's [`SyncMediaControl`] side.

use platform::AttError;
use playback::{PlayerEvent, PlayerEventSink};

use crate::characteristic::{Characteristic, CCC_NOTIFY};
use crate::controller::SyncMediaControl;
use crate::request::WriteRequest;
use crate::value::{octets, Payload, Value};

/// Sends notifications to subscribed clients.
pub trait GattNotifier {
    /// Notify `value` for `characteristic`.
    ///
    /// # Errors
    ///
    /// Returns the ATT error when the notification cannot be queued.
    fn notify(&mut self, characteristic: Characteristic, value: &[u8]) -> Result<(), AttError>;
}

/// GATT server state of the Media Control Service.
#[derive(Debug, Default)]
pub struct MediaControlService<N> {
    notifier: N,
    /// One bit per [`Characteristic::index`].
    subscribed: u32,
    failed: usize,
}

impl<N: GattNotifier> MediaControlService<N> {
    /// A service with no subscriptions.
    pub const fn new(notifier: N) -> Self {
        Self {
            notifier,
            subscribed: 0,
            failed: 0,
        }
    }

    /// A client wrote the CCC descriptor of `characteristic`.
    ///
    /// # Errors
    ///
    /// [`AttError::WriteNotPermitted`] for characteristics without notify.
    pub fn on_ccc_write(&mut self, characteristic: Characteristic, value: u16) -> Result<(), AttError> {
        self.set_subscribed(characteristic, value & CCC_NOTIFY != 0)
    }

    /// Enable or disable notifications of `characteristic`.
    ///
    /// # Errors
    ///
    /// [`AttError::WriteNotPermitted`] for characteristics without notify.
    pub fn set_subscribed(&mut self, characteristic: Characteristic, enabled: bool) -> Result<(), AttError> {
        if !characteristic.is_notifiable() {
            return Err(AttError::WriteNotPermitted);
        }
        let bit = 1u32.checked_shl(u32::try_from(characteristic.index()).unwrap_or(u32::MAX)).unwrap_or(0);
        if enabled {
            self.subscribed |= bit;
        } else {
            self.subscribed &= !bit;
        }
        let state = if enabled { "on" } else { "off" };
        debug!("{} notifications {}", characteristic, state);
        Ok(())
    }

    /// Whether notifications of `characteristic` are enabled.
    pub fn is_subscribed(&self, characteristic: Characteristic) -> bool {
        u32::try_from(characteristic.index())
            .ok()
            .and_then(|i| self.subscribed.checked_shr(i))
            .is_some_and(|bits| bits & 1 != 0)
    }

    /// Notifications the notifier refused.
    pub fn failed_notifications(&self) -> usize {
        self.failed
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The notifier, mutably.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

impl<N: GattNotifier> PlayerEventSink for MediaControlService<N> {
    fn on_player_event(&mut self, event: &PlayerEvent) {
        let value = Value::from_event(event);
        let characteristic = value.characteristic();
        if !self.is_subscribed(characteristic) {
            return;
        }
        if let Err(e) = self.notifier.notify(characteristic, &value.encode()) {
            warn!("{} notification failed: {}", characteristic, e);
            self.failed = self.failed.saturating_add(1);
        }
    }
}

/// Answer an ATT read of `characteristic` from `offset`.
///
/// # Errors
///
/// - [`AttError::ReadNotPermitted`] for write-only characteristics
/// - [`AttError::Unlikely`] without a local player
/// - [`AttError::InvalidOffset`] for an offset past the end of the value
pub fn on_read(
    control: &dyn SyncMediaControl,
    characteristic: Characteristic,
    offset: usize,
) -> Result<Payload, AttError> {
    if !characteristic.is_readable() {
        return Err(AttError::ReadNotPermitted);
    }
    let value = control.read_local(characteristic).map_err(|e| {
        debug!("{} read failed: {}", characteristic, e);
        AttError::Unlikely
    })?;
    let encoded = value.encode();
    let rest = encoded.get(offset..).ok_or(AttError::InvalidOffset)?;
    Ok(octets(rest))
}

/// Handle an ATT write of `data` to `characteristic` at `offset`. Returns the
/// number of octets accepted.
///
/// # Errors
///
/// - [`AttError::WriteNotPermitted`] for read-only characteristics
/// - [`AttError::InvalidOffset`] for a non-zero offset
/// - [`AttError::InvalidAttributeLength`] for a value of the wrong length
/// - [`AttError::Unlikely`] without a local player
pub fn on_write(
    control: &mut dyn SyncMediaControl,
    characteristic: Characteristic,
    offset: usize,
    data: &[u8],
) -> Result<usize, AttError> {
    if !characteristic.is_writable() {
        return Err(AttError::WriteNotPermitted);
    }
    if offset != 0 {
        return Err(AttError::InvalidOffset);
    }
    let request = WriteRequest::decode(characteristic, data)?;
    control.write_local(&request).map_err(|e| {
        debug!("{} write failed: {}", characteristic, e);
        AttError::Unlikely
    })?;
    Ok(data.len())
}
