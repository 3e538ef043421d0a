//! The calls a local media player offers to the proxy.
//!
//! Getters answer from current state. Setters and commands take the sink
//! that receives the events they cause; by the time a setter returns, every
//! event it produced has been delivered.

use platform::ObjectId;

use crate::command::Command;
use crate::events::PlayerEventSink;
use crate::media::{MediaState, PlayingOrder, PlayingOrders};

/// A media player that can be driven through the proxy.
pub trait MediaPlayer {
    /// Player name.
    fn player_name(&self) -> &str;

    /// Object id of the player icon, once registered.
    fn icon_id(&self) -> Option<ObjectId>;

    /// URL of the player icon.
    fn icon_url(&self) -> &str;

    /// Title of the current track.
    fn track_title(&self) -> &str;

    /// Duration of the current track, hundredths of a second.
    fn track_duration(&self) -> i32;

    /// Position in the current track, hundredths of a second.
    fn track_position(&self) -> i32;

    /// Move to `position`. Negative values count back from the end of the
    /// track. Notifies the position only when it changes.
    fn set_track_position(&mut self, position: i32, sink: &mut dyn PlayerEventSink);

    /// Playback speed parameter.
    fn playback_speed(&self) -> i8;

    /// Set the playback speed parameter. Notifies only on change.
    fn set_playback_speed(&mut self, speed: i8, sink: &mut dyn PlayerEventSink);

    /// Seeking speed factor.
    fn seeking_speed(&self) -> i8;

    /// Object id of the current track's segment list.
    fn track_segments_id(&self) -> Option<ObjectId>;

    /// Object id of the current track.
    fn current_track_id(&self) -> Option<ObjectId>;

    /// Make the track with object id `id` current. Unknown ids are ignored.
    fn set_current_track_id(&mut self, id: ObjectId, sink: &mut dyn PlayerEventSink);

    /// Object id of the track that `NextTrack` would move to.
    fn next_track_id(&self) -> Option<ObjectId>;

    /// Make the track with object id `id` the next track. Unknown ids are
    /// ignored.
    fn set_next_track_id(&mut self, id: ObjectId, sink: &mut dyn PlayerEventSink);

    /// Object id of the current group's parent.
    fn parent_group_id(&self) -> Option<ObjectId>;

    /// Object id of the current group.
    fn current_group_id(&self) -> Option<ObjectId>;

    /// Make the group with object id `id` current. Unknown ids are ignored.
    fn set_current_group_id(&mut self, id: ObjectId, sink: &mut dyn PlayerEventSink);

    /// Playing order.
    fn playing_order(&self) -> PlayingOrder;

    /// Change the playing order if it is supported.
    fn set_playing_order(&mut self, order: PlayingOrder, sink: &mut dyn PlayerEventSink);

    /// Playing orders this player accepts.
    fn playing_orders_supported(&self) -> PlayingOrders;

    /// Media state.
    fn media_state(&self) -> MediaState;

    /// Execute a control point command. Exactly one command result event is
    /// emitted, after every other event the command caused.
    fn send_command(&mut self, command: Command, sink: &mut dyn PlayerEventSink);

    /// Opcodes supported bit set.
    fn opcodes_supported(&self) -> u32;

    /// Run a search given as raw search control items.
    fn send_search(&mut self, search: &[u8], sink: &mut dyn PlayerEventSink);

    /// Object id of the last search results.
    fn search_results_id(&self) -> Option<ObjectId>;

    /// Content control id.
    fn content_ctrl_id(&self) -> u8;
}
