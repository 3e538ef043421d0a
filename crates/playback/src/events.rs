//! Player events and the sink they are delivered to.
//!
//! Every state change a player makes is reported as a [`PlayerEvent`],
//! synchronously and in order, to the [`PlayerEventSink`] passed into the
//! call that caused it. The proxy is the production sink; tests record into
//! an [`EventLog`].

use core::fmt;

use heapless::String;
use platform::config::TITLE_MAX;
use platform::ObjectId;

use crate::command::CommandNtf;
use crate::media::{MediaState, PlayingOrder, SearchResultCode};

/// A change notification from a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The current track changed; the track values follow as their own events.
    TrackChanged,
    /// Title of the current track.
    TrackTitle(String<TITLE_MAX>),
    /// Duration of the current track, hundredths of a second.
    TrackDuration(i32),
    /// Position in the current track, hundredths of a second.
    TrackPosition(i32),
    /// Playback speed parameter.
    PlaybackSpeed(i8),
    /// Seeking speed factor.
    SeekingSpeed(i8),
    /// Object id of the current track.
    CurrentTrackId(Option<ObjectId>),
    /// Object id of the next track; `None` when there is no next track.
    NextTrackId(Option<ObjectId>),
    /// Object id of the parent group.
    ParentGroupId(Option<ObjectId>),
    /// Object id of the current group.
    CurrentGroupId(Option<ObjectId>),
    /// Playing order.
    PlayingOrder(PlayingOrder),
    /// Media state.
    MediaState(MediaState),
    /// Outcome of a control point write. Always the last event of a command.
    CommandResult(CommandNtf),
    /// Outcome of a search.
    SearchResult(SearchResultCode),
    /// Object id of the search results; `None` after a failed search.
    SearchResultsId(Option<ObjectId>),
    /// Opcodes supported bit set.
    OpcodesSupported(u32),
}

/// Which value an event reports, without the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum EventKind {
    TrackChanged,
    TrackTitle,
    TrackDuration,
    TrackPosition,
    PlaybackSpeed,
    SeekingSpeed,
    CurrentTrackId,
    NextTrackId,
    ParentGroupId,
    CurrentGroupId,
    PlayingOrder,
    MediaState,
    CommandResult,
    SearchResult,
    SearchResultsId,
    OpcodesSupported,
}

impl PlayerEvent {
    /// The kind of value this event carries.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            PlayerEvent::TrackChanged => EventKind::TrackChanged,
            PlayerEvent::TrackTitle(_) => EventKind::TrackTitle,
            PlayerEvent::TrackDuration(_) => EventKind::TrackDuration,
            PlayerEvent::TrackPosition(_) => EventKind::TrackPosition,
            PlayerEvent::PlaybackSpeed(_) => EventKind::PlaybackSpeed,
            PlayerEvent::SeekingSpeed(_) => EventKind::SeekingSpeed,
            PlayerEvent::CurrentTrackId(_) => EventKind::CurrentTrackId,
            PlayerEvent::NextTrackId(_) => EventKind::NextTrackId,
            PlayerEvent::ParentGroupId(_) => EventKind::ParentGroupId,
            PlayerEvent::CurrentGroupId(_) => EventKind::CurrentGroupId,
            PlayerEvent::PlayingOrder(_) => EventKind::PlayingOrder,
            PlayerEvent::MediaState(_) => EventKind::MediaState,
            PlayerEvent::CommandResult(_) => EventKind::CommandResult,
            PlayerEvent::SearchResult(_) => EventKind::SearchResult,
            PlayerEvent::SearchResultsId(_) => EventKind::SearchResultsId,
            PlayerEvent::OpcodesSupported(_) => EventKind::OpcodesSupported,
        }
    }

    /// Title event for `title`, cut at the event's capacity.
    #[must_use]
    pub fn track_title(title: &str) -> Self {
        let mut s = String::new();
        for c in title.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        PlayerEvent::TrackTitle(s)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::TrackChanged => "track changed",
            EventKind::TrackTitle => "track title",
            EventKind::TrackDuration => "track duration",
            EventKind::TrackPosition => "track position",
            EventKind::PlaybackSpeed => "playback speed",
            EventKind::SeekingSpeed => "seeking speed",
            EventKind::CurrentTrackId => "current track id",
            EventKind::NextTrackId => "next track id",
            EventKind::ParentGroupId => "parent group id",
            EventKind::CurrentGroupId => "current group id",
            EventKind::PlayingOrder => "playing order",
            EventKind::MediaState => "media state",
            EventKind::CommandResult => "command result",
            EventKind::SearchResult => "search result",
            EventKind::SearchResultsId => "search results id",
            EventKind::OpcodesSupported => "opcodes supported",
        })
    }
}

/// Receiver of player events.
pub trait PlayerEventSink {
    /// Called once per event, in the order the player emits them.
    fn on_player_event(&mut self, event: &PlayerEvent);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PlayerEventSink for NullSink {
    fn on_player_event(&mut self, _event: &PlayerEvent) {}
}

/// Sink that records up to `N` events and counts the ones it had to drop.
#[derive(Debug, Default, Clone)]
pub struct EventLog<const N: usize> {
    events: heapless::Vec<PlayerEvent, N>,
    dropped: usize,
}

impl<const N: usize> EventLog<N> {
    /// An empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
            dropped: 0,
        }
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[PlayerEvent] {
        &self.events
    }

    /// Kinds of the recorded events, oldest first.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.events.iter().map(PlayerEvent::kind)
    }

    /// Events that did not fit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// The most recent event.
    pub fn last(&self) -> Option<&PlayerEvent> {
        self.events.last()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> PlayerEventSink for EventLog<N> {
    fn on_player_event(&mut self, event: &PlayerEvent) {
        if self.events.push(event.clone()).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}
