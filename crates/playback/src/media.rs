//! Player state values shared with the GATT layer.

use core::fmt;

/// Margin, in hundredths of a second, within which "previous segment" goes
/// to the segment before instead of restarting the current one.
pub const PREV_MARGIN: i32 = 500;

/// Seeking speed change per fast forward / fast rewind.
pub const SEEKING_SPEED_FACTOR_STEP: i8 = 4;

/// Largest seeking speed magnitude.
pub const SEEKING_SPEED_FACTOR_MAX: i8 = 64;

/// Seeking speed when not seeking.
pub const SEEKING_SPEED_FACTOR_ZERO: i8 = 0;

/// Playback speed parameter for normal speed (2^0).
pub const PLAYBACK_SPEED_UNITY: i8 = 0;

/// Media state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MediaState {
    /// No current track; transport controls are refused.
    Inactive = 0,
    /// Playing the current track.
    Playing = 1,
    /// Paused at the current position.
    #[default]
    Paused = 2,
    /// Fast forwarding or rewinding.
    Seeking = 3,
}

impl MediaState {
    /// Raw wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MediaState {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MediaState::Inactive),
            1 => Ok(MediaState::Playing),
            2 => Ok(MediaState::Paused),
            3 => Ok(MediaState::Seeking),
            other => Err(other),
        }
    }
}

impl fmt::Display for MediaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaState::Inactive => "inactive",
            MediaState::Playing => "playing",
            MediaState::Paused => "paused",
            MediaState::Seeking => "seeking",
        })
    }
}

/// Playing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum PlayingOrder {
    SingleOnce = 1,
    SingleRepeat = 2,
    InOrderOnce = 3,
    InOrderRepeat = 4,
    OldestOnce = 5,
    OldestRepeat = 6,
    NewestOnce = 7,
    NewestRepeat = 8,
    ShuffleOnce = 9,
    ShuffleRepeat = 10,
}

impl PlayingOrder {
    /// Raw wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Bit of this order in the Playing Orders Supported bit set.
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << (self as u8 - 1)
    }
}

impl TryFrom<u8> for PlayingOrder {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => PlayingOrder::SingleOnce,
            2 => PlayingOrder::SingleRepeat,
            3 => PlayingOrder::InOrderOnce,
            4 => PlayingOrder::InOrderRepeat,
            5 => PlayingOrder::OldestOnce,
            6 => PlayingOrder::OldestRepeat,
            7 => PlayingOrder::NewestOnce,
            8 => PlayingOrder::NewestRepeat,
            9 => PlayingOrder::ShuffleOnce,
            10 => PlayingOrder::ShuffleRepeat,
            other => return Err(other),
        })
    }
}

/// Playing Orders Supported bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayingOrders(pub u16);

impl PlayingOrders {
    /// The orders a local player supports.
    pub const DEFAULT: PlayingOrders = PlayingOrders(
        PlayingOrder::InOrderOnce.bit() | PlayingOrder::InOrderRepeat.bit(),
    );

    /// Whether `order` is in the set.
    #[must_use]
    pub const fn contains(self, order: PlayingOrder) -> bool {
        self.0 & order.bit() != 0
    }
}

/// Search control point notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SearchResultCode {
    Success = 1,
    Failure = 2,
}

impl SearchResultCode {
    /// Raw wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SearchResultCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SearchResultCode::Success),
            2 => Ok(SearchResultCode::Failure),
            other => Err(other),
        }
    }
}
