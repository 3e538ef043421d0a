//! Point-in-time view of a player for debugging and host tooling.
//!
//! A [`PlayerSnapshot`] copies everything a human wants to see when checking
//! a session by hand: the player state plus the whole catalog with the object
//! ids assigned so far. With the `serde` feature it serialises, which is what
//! `xtask dump-state` prints.

use heapless::{String, Vec};
use library::{MAX_GROUPS, MAX_TRACKS};
use platform::config::{PLAYER_NAME_MAX, TITLE_MAX};
use platform::ObjectId;

use crate::engine::Mpl;
use crate::media::{MediaState, PlayingOrder};
use crate::player::MediaPlayer;

/// One group of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupSnapshot {
    /// Group title.
    pub title: String<TITLE_MAX>,
    /// Object id, once registered.
    pub id: Option<u64>,
    /// Number of tracks the group owns.
    pub track_count: usize,
}

/// One track of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackSnapshot {
    /// Position of the owning group in [`PlayerSnapshot::groups`].
    pub group: usize,
    /// Track title.
    pub title: String<TITLE_MAX>,
    /// Duration, hundredths of a second.
    pub duration: i32,
    /// Object id, once registered.
    pub id: Option<u64>,
}

/// Player state and catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlayerSnapshot {
    /// Player name.
    pub name: String<PLAYER_NAME_MAX>,
    /// Media state.
    pub state: MediaState,
    /// Position in the current track.
    pub track_position: i32,
    /// Playback speed parameter.
    pub playback_speed: i8,
    /// Seeking speed factor.
    pub seeking_speed: i8,
    /// Playing order.
    pub playing_order: PlayingOrder,
    /// Title of the current group.
    pub group_title: String<TITLE_MAX>,
    /// Title of the current track.
    pub track_title: String<TITLE_MAX>,
    /// Object id of the current track.
    pub current_track_id: Option<u64>,
    /// Object id of the current group.
    pub current_group_id: Option<u64>,
    /// Every group, in catalog order.
    pub groups: Vec<GroupSnapshot, MAX_GROUPS>,
    /// Every track, grouped by group.
    pub tracks: Vec<TrackSnapshot, MAX_TRACKS>,
}

/// Copy `s`, cut at the capacity.
fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl Mpl {
    /// Capture the current state and the catalog.
    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        let catalog = self.catalog();
        let current_group = catalog.group(self.current_group());

        let mut groups = Vec::new();
        let mut tracks = Vec::new();
        for (slot, (g, group)) in catalog.groups().enumerate() {
            let mut track_count: usize = 0;
            // The parent group's cursor borrows a track of another group.
            for t in catalog.tracks_of(g).filter(|&t| catalog.track(t).group() == g) {
                let track = catalog.track(t);
                // Capacities match the catalog's own arenas.
                let _ = tracks.push(TrackSnapshot {
                    group: slot,
                    title: bounded(track.title()),
                    duration: track.duration(),
                    id: track.id().map(ObjectId::get),
                });
                track_count = track_count.saturating_add(1);
            }
            let _ = groups.push(GroupSnapshot {
                title: bounded(group.title()),
                id: group.id().map(ObjectId::get),
                track_count,
            });
        }

        PlayerSnapshot {
            name: bounded(self.player_name()),
            state: self.media_state(),
            track_position: self.track_position(),
            playback_speed: self.playback_speed(),
            seeking_speed: self.seeking_speed(),
            playing_order: self.playing_order(),
            group_title: bounded(current_group.title()),
            track_title: bounded(self.track_title()),
            current_track_id: self.current_track_id().map(ObjectId::get),
            current_group_id: self.current_group_id().map(ObjectId::get),
            groups,
            tracks,
        }
    }
}
