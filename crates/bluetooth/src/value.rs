//! Characteristic values and their GATT encoding.
//!
//! A [`Value`] is what a read returns and what a notification carries, one
//! variant per characteristic. The two control points have no readable value;
//! their variants hold the notification instead.
//!
//! Encoding is little-endian throughout. Strings are raw UTF-8 without a
//! length prefix. Object ids are 48-bit; the next track and search results
//! ids encode "none" as an empty value, the other ids as six zero octets.

use heapless::{String, Vec};
use platform::config::{ICON_URL_MAX, PLAYER_NAME_MAX, TITLE_MAX};
use platform::ObjectId;
use playback::{
    CommandNtf, MediaPlayer, MediaState, PlayerEvent, PlayingOrder, PlayingOrders,
    SearchResultCode,
};

use crate::characteristic::Characteristic;

/// Longest encoded characteristic value.
pub const VALUE_MAX: usize = 64;

/// Encoded value octets.
pub type Payload = Vec<u8, VALUE_MAX>;

/// A decoded characteristic value or control point notification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Value {
    PlayerName(String<PLAYER_NAME_MAX>),
    IconObjectId(Option<ObjectId>),
    IconUrl(String<ICON_URL_MAX>),
    /// Track changed carries no value.
    TrackChanged,
    TrackTitle(String<TITLE_MAX>),
    TrackDuration(i32),
    TrackPosition(i32),
    PlaybackSpeed(i8),
    SeekingSpeed(i8),
    TrackSegmentsObjectId(Option<ObjectId>),
    CurrentTrackObjectId(Option<ObjectId>),
    NextTrackObjectId(Option<ObjectId>),
    ParentGroupObjectId(Option<ObjectId>),
    CurrentGroupObjectId(Option<ObjectId>),
    PlayingOrder(PlayingOrder),
    PlayingOrdersSupported(PlayingOrders),
    MediaState(MediaState),
    /// Media control point notification.
    CommandResult(CommandNtf),
    OpcodesSupported(u32),
    SearchResultsObjectId(Option<ObjectId>),
    /// Search control point notification.
    SearchResult(SearchResultCode),
    ContentControlId(u8),
}

/// Copy `s`, cut at the capacity.
pub(crate) fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl Value {
    /// The characteristic this value belongs to.
    #[must_use]
    pub const fn characteristic(&self) -> Characteristic {
        match self {
            Value::PlayerName(_) => Characteristic::PlayerName,
            Value::IconObjectId(_) => Characteristic::IconObjectId,
            Value::IconUrl(_) => Characteristic::IconUrl,
            Value::TrackChanged => Characteristic::TrackChanged,
            Value::TrackTitle(_) => Characteristic::TrackTitle,
            Value::TrackDuration(_) => Characteristic::TrackDuration,
            Value::TrackPosition(_) => Characteristic::TrackPosition,
            Value::PlaybackSpeed(_) => Characteristic::PlaybackSpeed,
            Value::SeekingSpeed(_) => Characteristic::SeekingSpeed,
            Value::TrackSegmentsObjectId(_) => Characteristic::TrackSegmentsObjectId,
            Value::CurrentTrackObjectId(_) => Characteristic::CurrentTrackObjectId,
            Value::NextTrackObjectId(_) => Characteristic::NextTrackObjectId,
            Value::ParentGroupObjectId(_) => Characteristic::ParentGroupObjectId,
            Value::CurrentGroupObjectId(_) => Characteristic::CurrentGroupObjectId,
            Value::PlayingOrder(_) => Characteristic::PlayingOrder,
            Value::PlayingOrdersSupported(_) => Characteristic::PlayingOrdersSupported,
            Value::MediaState(_) => Characteristic::MediaState,
            Value::CommandResult(_) => Characteristic::MediaControlPoint,
            Value::OpcodesSupported(_) => Characteristic::OpcodesSupported,
            Value::SearchResultsObjectId(_) => Characteristic::SearchResultsObjectId,
            Value::SearchResult(_) => Characteristic::SearchControlPoint,
            Value::ContentControlId(_) => Characteristic::ContentControlId,
        }
    }

    /// Read the current value of `characteristic` from `player`.
    ///
    /// Returns `None` for characteristics without the read property.
    pub fn read<P: MediaPlayer + ?Sized>(player: &P, characteristic: Characteristic) -> Option<Self> {
        Some(match characteristic {
            Characteristic::PlayerName => Value::PlayerName(bounded(player.player_name())),
            Characteristic::IconObjectId => Value::IconObjectId(player.icon_id()),
            Characteristic::IconUrl => Value::IconUrl(bounded(player.icon_url())),
            Characteristic::TrackTitle => Value::TrackTitle(bounded(player.track_title())),
            Characteristic::TrackDuration => Value::TrackDuration(player.track_duration()),
            Characteristic::TrackPosition => Value::TrackPosition(player.track_position()),
            Characteristic::PlaybackSpeed => Value::PlaybackSpeed(player.playback_speed()),
            Characteristic::SeekingSpeed => Value::SeekingSpeed(player.seeking_speed()),
            Characteristic::TrackSegmentsObjectId => {
                Value::TrackSegmentsObjectId(player.track_segments_id())
            }
            Characteristic::CurrentTrackObjectId => {
                Value::CurrentTrackObjectId(player.current_track_id())
            }
            Characteristic::NextTrackObjectId => Value::NextTrackObjectId(player.next_track_id()),
            Characteristic::ParentGroupObjectId => {
                Value::ParentGroupObjectId(player.parent_group_id())
            }
            Characteristic::CurrentGroupObjectId => {
                Value::CurrentGroupObjectId(player.current_group_id())
            }
            Characteristic::PlayingOrder => Value::PlayingOrder(player.playing_order()),
            Characteristic::PlayingOrdersSupported => {
                Value::PlayingOrdersSupported(player.playing_orders_supported())
            }
            Characteristic::MediaState => Value::MediaState(player.media_state()),
            Characteristic::OpcodesSupported => Value::OpcodesSupported(player.opcodes_supported()),
            Characteristic::SearchResultsObjectId => {
                Value::SearchResultsObjectId(player.search_results_id())
            }
            Characteristic::ContentControlId => Value::ContentControlId(player.content_ctrl_id()),
            Characteristic::TrackChanged
            | Characteristic::MediaControlPoint
            | Characteristic::SearchControlPoint => return None,
        })
    }

    /// The value a player event reports.
    #[must_use]
    pub fn from_event(event: &PlayerEvent) -> Self {
        match event {
            PlayerEvent::TrackChanged => Value::TrackChanged,
            PlayerEvent::TrackTitle(title) => Value::TrackTitle(title.clone()),
            PlayerEvent::TrackDuration(d) => Value::TrackDuration(*d),
            PlayerEvent::TrackPosition(p) => Value::TrackPosition(*p),
            PlayerEvent::PlaybackSpeed(s) => Value::PlaybackSpeed(*s),
            PlayerEvent::SeekingSpeed(s) => Value::SeekingSpeed(*s),
            PlayerEvent::CurrentTrackId(id) => Value::CurrentTrackObjectId(*id),
            PlayerEvent::NextTrackId(id) => Value::NextTrackObjectId(*id),
            PlayerEvent::ParentGroupId(id) => Value::ParentGroupObjectId(*id),
            PlayerEvent::CurrentGroupId(id) => Value::CurrentGroupObjectId(*id),
            PlayerEvent::PlayingOrder(o) => Value::PlayingOrder(*o),
            PlayerEvent::MediaState(s) => Value::MediaState(*s),
            PlayerEvent::CommandResult(ntf) => Value::CommandResult(*ntf),
            PlayerEvent::SearchResult(code) => Value::SearchResult(*code),
            PlayerEvent::SearchResultsId(id) => Value::SearchResultsObjectId(*id),
            PlayerEvent::OpcodesSupported(ops) => Value::OpcodesSupported(*ops),
        }
    }

    /// GATT encoding of the value.
    #[must_use]
    pub fn encode(&self) -> Payload {
        match self {
            Value::PlayerName(s) => octets(s.as_bytes()),
            Value::IconUrl(s) => octets(s.as_bytes()),
            Value::TrackTitle(s) => octets(s.as_bytes()),
            Value::TrackChanged => Payload::new(),
            Value::TrackDuration(v) | Value::TrackPosition(v) => octets(&v.to_le_bytes()),
            Value::PlaybackSpeed(v) | Value::SeekingSpeed(v) => octets(&v.to_le_bytes()),
            Value::NextTrackObjectId(id) | Value::SearchResultsObjectId(id) => match id {
                Some(id) => octets(&id.to_le_bytes()),
                None => Payload::new(),
            },
            Value::IconObjectId(id)
            | Value::TrackSegmentsObjectId(id)
            | Value::CurrentTrackObjectId(id)
            | Value::ParentGroupObjectId(id)
            | Value::CurrentGroupObjectId(id) => {
                octets(&id.map_or([0; ObjectId::SIZE], ObjectId::to_le_bytes))
            }
            Value::PlayingOrder(o) => octets(&[o.code()]),
            Value::PlayingOrdersSupported(orders) => octets(&orders.0.to_le_bytes()),
            Value::MediaState(s) => octets(&[s.code()]),
            Value::CommandResult(ntf) => octets(&[ntf.requested_opcode, ntf.result.code()]),
            Value::OpcodesSupported(ops) => octets(&ops.to_le_bytes()),
            Value::SearchResult(code) => octets(&[code.code()]),
            Value::ContentControlId(ccid) => octets(&[*ccid]),
        }
    }
}

/// Copy up to [`VALUE_MAX`] octets.
pub(crate) fn octets(bytes: &[u8]) -> Payload {
    let mut out = Payload::new();
    out.extend(bytes.iter().take(VALUE_MAX).copied());
    out
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use playback::{Mpl, ResultCode};
    use platform::CcidAllocator;

    fn id(v: u64) -> ObjectId {
        ObjectId::new(v).expect("48-bit id")
    }

    #[test]
    fn test_next_track_none_is_empty() {
        assert!(Value::NextTrackObjectId(None).encode().is_empty());
        assert!(Value::SearchResultsObjectId(None).encode().is_empty());
        assert_eq!(
            Value::NextTrackObjectId(Some(id(0x105))).encode().as_slice(),
            [0x05, 0x01, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_other_ids_encode_zero_when_unset() {
        assert_eq!(
            Value::CurrentTrackObjectId(None).encode().as_slice(),
            [0u8; ObjectId::SIZE]
        );
    }

    #[test]
    fn test_fixed_width_layouts() {
        assert_eq!(Value::TrackPosition(-2).encode().as_slice(), [0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(Value::SeekingSpeed(-64).encode().as_slice(), [0xC0]);
        assert_eq!(
            Value::OpcodesSupported(0x001F_FFFF).encode().as_slice(),
            [0xFF, 0xFF, 0x1F, 0x00]
        );
        assert_eq!(
            Value::PlayingOrdersSupported(PlayingOrders::DEFAULT).encode().as_slice(),
            [0x0C, 0x00]
        );
        let ntf = CommandNtf {
            requested_opcode: 0x31,
            result: ResultCode::Success,
        };
        assert_eq!(Value::CommandResult(ntf).encode().as_slice(), [0x31, 0x01]);
    }

    #[test]
    fn test_read_from_builtin_player() {
        let mpl = Mpl::builtin(&mut CcidAllocator::new()).expect("builtin catalog");
        assert_eq!(
            Value::read(&mpl, Characteristic::PlayerName),
            Some(Value::PlayerName(bounded("Player0")))
        );
        assert_eq!(
            Value::read(&mpl, Characteristic::MediaState),
            Some(Value::MediaState(MediaState::Paused))
        );
        assert_eq!(Value::read(&mpl, Characteristic::MediaControlPoint), None);
        assert_eq!(Value::read(&mpl, Characteristic::TrackChanged), None);
    }

    #[test]
    fn test_event_values_name_their_characteristic() {
        let v = Value::from_event(&PlayerEvent::SearchResult(SearchResultCode::Failure));
        assert_eq!(v.characteristic(), Characteristic::SearchControlPoint);
        assert_eq!(v.encode().as_slice(), [0x02]);
        let v = Value::from_event(&PlayerEvent::TrackChanged);
        assert_eq!(v.characteristic(), Characteristic::TrackChanged);
        assert!(v.encode().is_empty());
    }
}
