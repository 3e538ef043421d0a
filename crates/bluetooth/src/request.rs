//! Characteristic writes.
//!
//! A [`WriteRequest`] is the parsed form of a GATT write to one of the
//! writable characteristics. The same type is handed to the proxy's async
//! write, forwarded to a remote player, and applied to a local one.

use heapless::Vec;
use platform::config::SEARCH_LEN_MAX;
use platform::{AttError, ObjectId};
use playback::{Command, MediaPlayer, PlayerEventSink, PlayingOrder};

use crate::characteristic::Characteristic;
use crate::value::{octets, Payload};

/// Shortest search control point value: one item with length and type.
pub const SEARCH_LEN_MIN: usize = 2;

/// Control point value without and with its `int32` parameter.
const CP_LEN: usize = 1;
const CP_PARAM_LEN: usize = CP_LEN + 4;

/// A write to a media control characteristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
    /// Move within the current track.
    TrackPosition(i32),
    /// Set the playback speed parameter.
    PlaybackSpeed(i8),
    /// Make a track current.
    CurrentTrackObjectId(ObjectId),
    /// Choose the next track.
    NextTrackObjectId(ObjectId),
    /// Make a group current.
    CurrentGroupObjectId(ObjectId),
    /// Playing order code, as written; unknown codes are ignored when applied.
    PlayingOrder(u8),
    /// Media control point write.
    Command(Command),
    /// Search control point write: concatenated search control items.
    Search(Vec<u8, SEARCH_LEN_MAX>),
}

impl WriteRequest {
    /// The characteristic written.
    #[must_use]
    pub const fn characteristic(&self) -> Characteristic {
        match self {
            WriteRequest::TrackPosition(_) => Characteristic::TrackPosition,
            WriteRequest::PlaybackSpeed(_) => Characteristic::PlaybackSpeed,
            WriteRequest::CurrentTrackObjectId(_) => Characteristic::CurrentTrackObjectId,
            WriteRequest::NextTrackObjectId(_) => Characteristic::NextTrackObjectId,
            WriteRequest::CurrentGroupObjectId(_) => Characteristic::CurrentGroupObjectId,
            WriteRequest::PlayingOrder(_) => Characteristic::PlayingOrder,
            WriteRequest::Command(_) => Characteristic::MediaControlPoint,
            WriteRequest::Search(_) => Characteristic::SearchControlPoint,
        }
    }

    /// A search request for `items`.
    ///
    /// # Errors
    ///
    /// [`AttError::InvalidAttributeLength`] when `items` is longer than
    /// [`SEARCH_LEN_MAX`].
    pub fn search(items: &[u8]) -> Result<Self, AttError> {
        Vec::from_slice(items)
            .map(WriteRequest::Search)
            .map_err(|_| AttError::InvalidAttributeLength)
    }

    /// Parse a write of `data` to `characteristic`.
    ///
    /// # Errors
    ///
    /// [`AttError::WriteNotPermitted`] for characteristics without a write
    /// property, [`AttError::InvalidAttributeLength`] when `data` does not
    /// have the characteristic's length.
    pub fn decode(characteristic: Characteristic, data: &[u8]) -> Result<Self, AttError> {
        let len_err = AttError::InvalidAttributeLength;
        Ok(match characteristic {
            Characteristic::TrackPosition => {
                WriteRequest::TrackPosition(i32::from_le_bytes(data.try_into().map_err(|_| len_err)?))
            }
            Characteristic::PlaybackSpeed => {
                WriteRequest::PlaybackSpeed(i8::from_le_bytes(data.try_into().map_err(|_| len_err)?))
            }
            Characteristic::CurrentTrackObjectId => {
                WriteRequest::CurrentTrackObjectId(ObjectId::from_slice(data).ok_or(len_err)?)
            }
            Characteristic::NextTrackObjectId => {
                WriteRequest::NextTrackObjectId(ObjectId::from_slice(data).ok_or(len_err)?)
            }
            Characteristic::CurrentGroupObjectId => {
                WriteRequest::CurrentGroupObjectId(ObjectId::from_slice(data).ok_or(len_err)?)
            }
            Characteristic::PlayingOrder => match data {
                [code] => WriteRequest::PlayingOrder(*code),
                _ => return Err(len_err),
            },
            Characteristic::MediaControlPoint => match (data.len(), data.split_first()) {
                (CP_LEN, Some((&opcode, _))) => WriteRequest::Command(Command {
                    opcode,
                    param: None,
                }),
                (CP_PARAM_LEN, Some((&opcode, param))) => WriteRequest::Command(Command {
                    opcode,
                    param: Some(i32::from_le_bytes(param.try_into().map_err(|_| len_err)?)),
                }),
                _ => return Err(len_err),
            },
            Characteristic::SearchControlPoint => {
                if data.len() < SEARCH_LEN_MIN {
                    return Err(len_err);
                }
                Self::search(data)?
            }
            _ => return Err(AttError::WriteNotPermitted),
        })
    }

    /// GATT encoding of the write, as sent to a remote player.
    #[must_use]
    pub fn encode(&self) -> Payload {
        match self {
            WriteRequest::TrackPosition(p) => octets(&p.to_le_bytes()),
            WriteRequest::PlaybackSpeed(s) => octets(&s.to_le_bytes()),
            WriteRequest::CurrentTrackObjectId(id)
            | WriteRequest::NextTrackObjectId(id)
            | WriteRequest::CurrentGroupObjectId(id) => octets(&id.to_le_bytes()),
            WriteRequest::PlayingOrder(code) => octets(&[*code]),
            WriteRequest::Command(cmd) => {
                let mut out = octets(&[cmd.opcode]);
                if let Some(param) = cmd.param {
                    out.extend(param.to_le_bytes());
                }
                out
            }
            WriteRequest::Search(items) => octets(items),
        }
    }

    /// Apply the write to a local player.
    pub fn apply<P: MediaPlayer + ?Sized>(&self, player: &mut P, sink: &mut dyn PlayerEventSink) {
        match self {
            WriteRequest::TrackPosition(p) => player.set_track_position(*p, sink),
            WriteRequest::PlaybackSpeed(s) => player.set_playback_speed(*s, sink),
            WriteRequest::CurrentTrackObjectId(id) => player.set_current_track_id(*id, sink),
            WriteRequest::NextTrackObjectId(id) => player.set_next_track_id(*id, sink),
            WriteRequest::CurrentGroupObjectId(id) => player.set_current_group_id(*id, sink),
            WriteRequest::PlayingOrder(code) => match PlayingOrder::try_from(*code) {
                Ok(order) => player.set_playing_order(order, sink),
                Err(code) => debug!("ignoring playing order {}", code),
            },
            WriteRequest::Command(cmd) => player.send_command(*cmd, sink),
            WriteRequest::Search(items) => player.send_search(items, sink),
        }
    }
}
