//! Media Control Service characteristics.
//!
//! UUIDs are the 16-bit Bluetooth SIG assigned numbers. Properties follow the
//! Media Control Service: every object id and state value is readable, the
//! values a client may change are writable, and anything that changes on its
//! own is notifiable.

use core::fmt;

/// Media Control Service.
pub const MCS_UUID: u16 = 0x1848;

/// Generic Media Control Service.
pub const GMCS_UUID: u16 = 0x1849;

/// Client Characteristic Configuration descriptor.
pub const CCC_UUID: u16 = 0x2902;

/// CCC value enabling notifications.
pub const CCC_NOTIFY: u16 = 0x0001;

/// A characteristic of the Media Control Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Characteristic {
    PlayerName = 0,
    IconObjectId,
    IconUrl,
    TrackChanged,
    TrackTitle,
    TrackDuration,
    TrackPosition,
    PlaybackSpeed,
    SeekingSpeed,
    TrackSegmentsObjectId,
    CurrentTrackObjectId,
    NextTrackObjectId,
    ParentGroupObjectId,
    CurrentGroupObjectId,
    PlayingOrder,
    PlayingOrdersSupported,
    MediaState,
    MediaControlPoint,
    OpcodesSupported,
    SearchResultsObjectId,
    SearchControlPoint,
    ContentControlId,
}

impl Characteristic {
    /// Every characteristic, in declaration order.
    pub const ALL: [Characteristic; 22] = [
        Characteristic::PlayerName,
        Characteristic::IconObjectId,
        Characteristic::IconUrl,
        Characteristic::TrackChanged,
        Characteristic::TrackTitle,
        Characteristic::TrackDuration,
        Characteristic::TrackPosition,
        Characteristic::PlaybackSpeed,
        Characteristic::SeekingSpeed,
        Characteristic::TrackSegmentsObjectId,
        Characteristic::CurrentTrackObjectId,
        Characteristic::NextTrackObjectId,
        Characteristic::ParentGroupObjectId,
        Characteristic::CurrentGroupObjectId,
        Characteristic::PlayingOrder,
        Characteristic::PlayingOrdersSupported,
        Characteristic::MediaState,
        Characteristic::MediaControlPoint,
        Characteristic::OpcodesSupported,
        Characteristic::SearchResultsObjectId,
        Characteristic::SearchControlPoint,
        Characteristic::ContentControlId,
    ];

    /// Position in [`Characteristic::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Assigned 16-bit UUID.
    #[must_use]
    pub const fn uuid16(self) -> u16 {
        match self {
            Characteristic::PlayerName => 0x2B93,
            Characteristic::IconObjectId => 0x2B94,
            Characteristic::IconUrl => 0x2B95,
            Characteristic::TrackChanged => 0x2B96,
            Characteristic::TrackTitle => 0x2B97,
            Characteristic::TrackDuration => 0x2B98,
            Characteristic::TrackPosition => 0x2B99,
            Characteristic::PlaybackSpeed => 0x2B9A,
            Characteristic::SeekingSpeed => 0x2B9B,
            Characteristic::TrackSegmentsObjectId => 0x2B9C,
            Characteristic::CurrentTrackObjectId => 0x2B9D,
            Characteristic::NextTrackObjectId => 0x2B9E,
            Characteristic::ParentGroupObjectId => 0x2B9F,
            Characteristic::CurrentGroupObjectId => 0x2BA0,
            Characteristic::PlayingOrder => 0x2BA1,
            Characteristic::PlayingOrdersSupported => 0x2BA2,
            Characteristic::MediaState => 0x2BA3,
            Characteristic::MediaControlPoint => 0x2BA4,
            Characteristic::OpcodesSupported => 0x2BA5,
            Characteristic::SearchResultsObjectId => 0x2BA6,
            Characteristic::SearchControlPoint => 0x2BA7,
            Characteristic::ContentControlId => 0x2BBA,
        }
    }

    /// Look a characteristic up by UUID.
    #[must_use]
    pub fn from_uuid16(uuid: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.uuid16() == uuid)
    }

    /// Whether the characteristic has the read property.
    #[must_use]
    pub const fn is_readable(self) -> bool {
        !matches!(
            self,
            Characteristic::TrackChanged
                | Characteristic::MediaControlPoint
                | Characteristic::SearchControlPoint
        )
    }

    /// Whether the characteristic has a write property.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Characteristic::TrackPosition
                | Characteristic::PlaybackSpeed
                | Characteristic::CurrentTrackObjectId
                | Characteristic::NextTrackObjectId
                | Characteristic::CurrentGroupObjectId
                | Characteristic::PlayingOrder
                | Characteristic::MediaControlPoint
                | Characteristic::SearchControlPoint
        )
    }

    /// Whether the characteristic has the notify property.
    #[must_use]
    pub const fn is_notifiable(self) -> bool {
        !matches!(
            self,
            Characteristic::IconObjectId
                | Characteristic::IconUrl
                | Characteristic::TrackSegmentsObjectId
                | Characteristic::PlayingOrdersSupported
                | Characteristic::ContentControlId
        )
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Characteristic::PlayerName => "player name",
            Characteristic::IconObjectId => "icon object id",
            Characteristic::IconUrl => "icon url",
            Characteristic::TrackChanged => "track changed",
            Characteristic::TrackTitle => "track title",
            Characteristic::TrackDuration => "track duration",
            Characteristic::TrackPosition => "track position",
            Characteristic::PlaybackSpeed => "playback speed",
            Characteristic::SeekingSpeed => "seeking speed",
            Characteristic::TrackSegmentsObjectId => "track segments object id",
            Characteristic::CurrentTrackObjectId => "current track object id",
            Characteristic::NextTrackObjectId => "next track object id",
            Characteristic::ParentGroupObjectId => "parent group object id",
            Characteristic::CurrentGroupObjectId => "current group object id",
            Characteristic::PlayingOrder => "playing order",
            Characteristic::PlayingOrdersSupported => "playing orders supported",
            Characteristic::MediaState => "media state",
            Characteristic::MediaControlPoint => "media control point",
            Characteristic::OpcodesSupported => "opcodes supported",
            Characteristic::SearchResultsObjectId => "search results object id",
            Characteristic::SearchControlPoint => "search control point",
            Characteristic::ContentControlId => "content control id",
        })
    }
}
