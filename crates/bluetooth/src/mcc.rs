//! Media control client seam.
//!
//! The proxy reaches remote players through a [`MediaControlClient`], which
//! issues GATT requests and later reports how they went as [`ClientEvent`]s.
//! Responses arrive as raw octets and are turned into [`Value`]s by
//! [`decode_read`], which applies the client's length rules.

use heapless::String;
use platform::bluetooth::errno;
use platform::config::{ICON_URL_MAX, PLAYER_NAME_MAX, TITLE_MAX};
use platform::{AttError, ConnHandle, ObjectId};
use playback::{CommandNtf, MediaState, PlayingOrder, PlayingOrders, ResultCode, SearchResultCode};

use crate::characteristic::Characteristic;
use crate::error::{ProxyError, RemoteError};
use crate::request::WriteRequest;
use crate::value::Value;

/// GATT client for the Media Control Service on a peer.
pub trait MediaControlClient {
    /// Discover the service on `conn` and subscribe to its notifications.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Client`] when the request cannot be issued.
    fn discover(&mut self, conn: ConnHandle) -> Result<(), ProxyError>;

    /// Read `characteristic` on `conn`.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Client`] when the request cannot be issued.
    fn read(&mut self, conn: ConnHandle, characteristic: Characteristic) -> Result<(), ProxyError>;

    /// Write `request` on `conn`.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Client`] when the request cannot be issued.
    fn write(&mut self, conn: ConnHandle, request: &WriteRequest) -> Result<(), ProxyError>;
}

/// Completion reported by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent<'a> {
    /// Discovery on `conn` finished.
    Discovered {
        /// Connection the service was looked for on.
        conn: ConnHandle,
        /// Outcome.
        result: Result<(), RemoteError>,
    },
    /// A read finished.
    Read {
        /// Connection of the remote player.
        conn: ConnHandle,
        /// Characteristic read.
        characteristic: Characteristic,
        /// Raw value, or the ATT error of the response.
        result: Result<&'a [u8], RemoteError>,
    },
    /// The peer notified a characteristic.
    Notified {
        /// Connection of the remote player.
        conn: ConnHandle,
        /// Characteristic notified.
        characteristic: Characteristic,
        /// Raw value.
        data: &'a [u8],
    },
    /// A write finished.
    Written {
        /// Connection of the remote player.
        conn: ConnHandle,
        /// The request as it was issued.
        request: WriteRequest,
        /// Outcome.
        result: Result<(), RemoteError>,
    },
}

const LEN_ERR: RemoteError = RemoteError::Att(AttError::InvalidAttributeLength.code());
const VALUE_ERR: RemoteError = RemoteError::Local(-errno::EINVAL);

/// Decode a value read or notified from a remote player.
///
/// Names and titles are cut at their capacity. Fixed-width values must have
/// their exact width, object ids exactly six octets. The next track and
/// search results ids may be empty, meaning none.
///
/// # Errors
///
/// - `Att(InvalidAttributeLength)` for a value of the wrong length
/// - `Att(InsufficientResources)` for an icon URL that does not fit
/// - `Local(-EINVAL)` for an enumerated value out of range
pub fn decode_read(characteristic: Characteristic, data: &[u8]) -> Result<Value, RemoteError> {
    Ok(match characteristic {
        Characteristic::PlayerName => Value::PlayerName(truncated::<PLAYER_NAME_MAX>(data)),
        Characteristic::IconUrl => {
            if data.len() > ICON_URL_MAX {
                return Err(AttError::InsufficientResources.into());
            }
            Value::IconUrl(truncated(data))
        }
        Characteristic::TrackChanged => Value::TrackChanged,
        Characteristic::TrackTitle => Value::TrackTitle(truncated::<TITLE_MAX>(data)),
        Characteristic::TrackDuration => Value::TrackDuration(i32::from_le_bytes(exact(data)?)),
        Characteristic::TrackPosition => Value::TrackPosition(i32::from_le_bytes(exact(data)?)),
        Characteristic::PlaybackSpeed => Value::PlaybackSpeed(i8::from_le_bytes(exact(data)?)),
        Characteristic::SeekingSpeed => Value::SeekingSpeed(i8::from_le_bytes(exact(data)?)),
        Characteristic::IconObjectId => Value::IconObjectId(object_id(data)?),
        Characteristic::TrackSegmentsObjectId => Value::TrackSegmentsObjectId(object_id(data)?),
        Characteristic::CurrentTrackObjectId => Value::CurrentTrackObjectId(object_id(data)?),
        Characteristic::ParentGroupObjectId => Value::ParentGroupObjectId(object_id(data)?),
        Characteristic::CurrentGroupObjectId => Value::CurrentGroupObjectId(object_id(data)?),
        Characteristic::NextTrackObjectId => Value::NextTrackObjectId(optional_object_id(data)?),
        Characteristic::SearchResultsObjectId => {
            Value::SearchResultsObjectId(optional_object_id(data)?)
        }
        Characteristic::PlayingOrder => {
            let [code] = exact(data)?;
            Value::PlayingOrder(PlayingOrder::try_from(code).map_err(|_| VALUE_ERR)?)
        }
        Characteristic::PlayingOrdersSupported => {
            Value::PlayingOrdersSupported(PlayingOrders(u16::from_le_bytes(exact(data)?)))
        }
        Characteristic::MediaState => {
            let [code] = exact(data)?;
            Value::MediaState(MediaState::try_from(code).map_err(|_| VALUE_ERR)?)
        }
        Characteristic::MediaControlPoint => {
            let [requested_opcode, result] = exact(data)?;
            Value::CommandResult(CommandNtf {
                requested_opcode,
                result: ResultCode::try_from(result).map_err(|_| VALUE_ERR)?,
            })
        }
        Characteristic::OpcodesSupported => {
            Value::OpcodesSupported(u32::from_le_bytes(exact(data)?))
        }
        Characteristic::SearchControlPoint => {
            let [code] = exact(data)?;
            Value::SearchResult(SearchResultCode::try_from(code).map_err(|_| VALUE_ERR)?)
        }
        Characteristic::ContentControlId => {
            let [ccid] = exact(data)?;
            Value::ContentControlId(ccid)
        }
    })
}

fn exact<const N: usize>(data: &[u8]) -> Result<[u8; N], RemoteError> {
    data.try_into().map_err(|_| LEN_ERR)
}

fn object_id(data: &[u8]) -> Result<Option<ObjectId>, RemoteError> {
    let bytes: [u8; ObjectId::SIZE] = exact(data)?;
    let id = ObjectId::from_le_bytes(bytes);
    Ok((id.get() != 0).then_some(id))
}

fn optional_object_id(data: &[u8]) -> Result<Option<ObjectId>, RemoteError> {
    if data.is_empty() {
        return Ok(None);
    }
    object_id(data)
}

/// UTF-8 prefix of `data` that fits `N` octets.
fn truncated<const N: usize>(data: &[u8]) -> String<N> {
    let head = data.get(..N).unwrap_or(data);
    let text = match core::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(head.get(..e.valid_up_to()).unwrap_or_default())
            .unwrap_or_default(),
    };
    String::try_from(text).unwrap_or_default()
}
