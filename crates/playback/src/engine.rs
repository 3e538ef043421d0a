//! Media Player List state machine.
//!
//! [`Mpl`] is a `no_std`, allocation-free local media player. It owns the
//! catalog, the group and track cursors, the media state and the speeds, and
//! executes control point commands against them.
//!
//! It has no I/O. Every change is reported to the [`PlayerEventSink`] passed
//! into the call, in a fixed order: new state first, the command result last.
//! This keeps the state machine testable on the host without a radio.
//!
//! # Command handling
//!
//! Opcodes fall into four categories (transport, segment, track, group).
//! While [`MediaState::Inactive`], transport and segment commands are refused
//! with [`ResultCode::PlayerInactive`]; track and group commands are carried
//! out and leave the player [`MediaState::Paused`]. A track or group jump
//! while seeking also stops seeking and pauses.

use library::navigation::{first, goto, head, last, step_next, step_prev, tail};
use library::{Catalog, CatalogError, GroupChain, GroupIdx, SegmentChain, Track, TrackChain, TrackIdx};
use platform::{CcidAllocator, ObjectId, PlayerConfig};

use crate::command::{Category, Command, CommandNtf, Nav, Opcode, ResultCode, OPCODES_SUPPORTED};
use crate::events::{EventKind, PlayerEvent, PlayerEventSink};
use crate::media::{
    MediaState, PlayingOrder, PlayingOrders, SearchResultCode, PLAYBACK_SPEED_UNITY, PREV_MARGIN,
    SEEKING_SPEED_FACTOR_MAX, SEEKING_SPEED_FACTOR_STEP, SEEKING_SPEED_FACTOR_ZERO,
};
use crate::objects::ObjectStore;
use crate::player::MediaPlayer;
use crate::search;

/// The local media player.
pub struct Mpl {
    config: PlayerConfig,
    pub(crate) catalog: Catalog,
    pub(crate) group: GroupIdx,
    track_pos: i32,
    state: MediaState,
    playback_speed: i8,
    seeking_speed: i8,
    playing_order: PlayingOrder,
    orders_supported: PlayingOrders,
    opcodes_supported: u32,
    content_ctrl_id: u8,
    /// Explicitly set next track, consumed by the next `NextTrack`.
    pub(crate) next: Option<(GroupIdx, TrackIdx)>,
    pub(crate) icon_id: Option<ObjectId>,
    search_results_id: Option<ObjectId>,
    pub(crate) objects: ObjectStore,
}

impl Mpl {
    /// Create a player over `catalog`, starting on the catalog's first group
    /// and that group's current track, paused at position 0.
    pub fn new(config: PlayerConfig, catalog: Catalog, ccids: &mut CcidAllocator) -> Self {
        let group = catalog.first_group();
        let content_ctrl_id = ccids.allocate();
        debug!("player created, ccid {}", content_ctrl_id);
        Self {
            config,
            catalog,
            group,
            track_pos: 0,
            state: MediaState::Paused,
            playback_speed: PLAYBACK_SPEED_UNITY,
            seeking_speed: SEEKING_SPEED_FACTOR_ZERO,
            playing_order: PlayingOrder::InOrderRepeat,
            orders_supported: PlayingOrders::DEFAULT,
            opcodes_supported: OPCODES_SUPPORTED,
            content_ctrl_id,
            next: None,
            icon_id: None,
            search_results_id: None,
            objects: ObjectStore::new(),
        }
    }

    /// A player with the default configuration and the built-in catalog.
    pub fn builtin(ccids: &mut CcidAllocator) -> Result<Self, CatalogError> {
        Ok(Self::new(PlayerConfig::default(), Catalog::builtin()?, ccids))
    }

    /// The catalog the player navigates.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current group.
    pub fn current_group(&self) -> GroupIdx {
        self.group
    }

    /// Current track: the track cursor of the current group.
    pub fn current_track(&self) -> TrackIdx {
        self.catalog.group(self.group).track()
    }

    pub(crate) fn track(&self) -> &Track {
        self.catalog.track(self.current_track())
    }

    /// Track that `NextTrack` moves to when no next track is set explicitly.
    pub(crate) fn natural_next(&self) -> Option<TrackIdx> {
        self.track().next()
    }

    // ── Test hooks ──────────────────────────────────────────────────────────

    /// Set the media state directly and notify it.
    pub fn force_media_state(&mut self, state: MediaState, sink: &mut dyn PlayerEventSink) {
        self.state = state;
        sink.on_player_event(&PlayerEvent::MediaState(state));
    }

    /// Make the current group its own parent.
    pub fn unset_parent_group(&mut self) {
        debug!("group {} is now its own parent", self.group);
        self.catalog.set_parent(self.group, self.group);
    }

    /// Emit the current value of `kind` as if it had just changed.
    ///
    /// [`EventKind::CommandResult`] and [`EventKind::SearchResult`] carry no
    /// stored value and emit nothing.
    pub fn emit_test_event(&self, kind: EventKind, sink: &mut dyn PlayerEventSink) {
        let event = match kind {
            EventKind::TrackChanged => PlayerEvent::TrackChanged,
            EventKind::TrackTitle => PlayerEvent::track_title(self.track().title()),
            EventKind::TrackDuration => PlayerEvent::TrackDuration(self.track().duration()),
            EventKind::TrackPosition => PlayerEvent::TrackPosition(self.track_pos),
            EventKind::PlaybackSpeed => PlayerEvent::PlaybackSpeed(self.playback_speed),
            EventKind::SeekingSpeed => PlayerEvent::SeekingSpeed(self.seeking_speed),
            EventKind::CurrentTrackId => PlayerEvent::CurrentTrackId(self.current_track_id()),
            EventKind::NextTrackId => PlayerEvent::NextTrackId(self.next_track_id()),
            EventKind::ParentGroupId => PlayerEvent::ParentGroupId(self.parent_group_id()),
            EventKind::CurrentGroupId => PlayerEvent::CurrentGroupId(self.current_group_id()),
            EventKind::PlayingOrder => PlayerEvent::PlayingOrder(self.playing_order),
            EventKind::MediaState => PlayerEvent::MediaState(self.state),
            EventKind::SearchResultsId => PlayerEvent::SearchResultsId(self.search_results_id),
            EventKind::OpcodesSupported => PlayerEvent::OpcodesSupported(self.opcodes_supported),
            EventKind::CommandResult | EventKind::SearchResult => return,
        };
        sink.on_player_event(&event);
    }

    // ── Notifications ───────────────────────────────────────────────────────

    /// The fixed sequence sent whenever the current track changes.
    fn track_change_notifications(&self, sink: &mut dyn PlayerEventSink) {
        let track = self.track();
        sink.on_player_event(&PlayerEvent::TrackChanged);
        sink.on_player_event(&PlayerEvent::track_title(track.title()));
        sink.on_player_event(&PlayerEvent::TrackDuration(track.duration()));
        sink.on_player_event(&PlayerEvent::TrackPosition(self.track_pos));
        sink.on_player_event(&PlayerEvent::CurrentTrackId(track.id()));
        let next = self.natural_next().and_then(|t| self.catalog.track(t).id());
        sink.on_player_event(&PlayerEvent::NextTrackId(next));
    }

    fn group_change_notifications(&self, sink: &mut dyn PlayerEventSink) {
        sink.on_player_event(&PlayerEvent::CurrentGroupId(self.current_group_id()));
    }

    fn notify_position(&self, sink: &mut dyn PlayerEventSink) {
        sink.on_player_event(&PlayerEvent::TrackPosition(self.track_pos));
    }

    fn notify_state(&self, sink: &mut dyn PlayerEventSink) {
        sink.on_player_event(&PlayerEvent::MediaState(self.state));
    }

    fn notify_seeking_speed(&self, sink: &mut dyn PlayerEventSink) {
        sink.on_player_event(&PlayerEvent::SeekingSpeed(self.seeking_speed));
    }

    // ── Command dispatch ────────────────────────────────────────────────────

    fn dispatch(
        &mut self,
        opcode: Opcode,
        param: Option<i32>,
        sink: &mut dyn PlayerEventSink,
    ) -> ResultCode {
        if self.opcodes_supported & opcode.supported_bit() == 0 {
            return ResultCode::NotSupported;
        }
        let result = match (self.state, opcode.category()) {
            (MediaState::Inactive, Category::Transport | Category::Segment) => {
                ResultCode::PlayerInactive
            }
            (_, Category::Transport) => self.transport(opcode, param, sink),
            (_, Category::Segment) => self.segment(opcode.nav(), param, sink),
            (_, Category::Track) => self.track_nav(opcode.nav(), param, sink),
            (_, Category::Group) => self.group_nav(opcode.nav(), param, sink),
        };
        if result == ResultCode::Success
            && matches!(opcode.category(), Category::Track | Category::Group)
        {
            self.settle_after_jump(sink);
        }
        result
    }

    /// After a track or group jump the player is paused, whatever it was.
    /// Playing stays playing.
    fn settle_after_jump(&mut self, sink: &mut dyn PlayerEventSink) {
        match self.state {
            MediaState::Playing | MediaState::Paused => {}
            MediaState::Inactive => {
                self.state = MediaState::Paused;
                self.notify_state(sink);
            }
            MediaState::Seeking => {
                self.seeking_speed = SEEKING_SPEED_FACTOR_ZERO;
                self.state = MediaState::Paused;
                self.notify_state(sink);
                self.notify_seeking_speed(sink);
            }
        }
    }

    fn transport(
        &mut self,
        opcode: Opcode,
        param: Option<i32>,
        sink: &mut dyn PlayerEventSink,
    ) -> ResultCode {
        let seeking = self.state == MediaState::Seeking;
        match opcode {
            Opcode::Play | Opcode::Pause => {
                let target = if opcode == Opcode::Play {
                    MediaState::Playing
                } else {
                    MediaState::Paused
                };
                if self.state != target {
                    self.seeking_speed = SEEKING_SPEED_FACTOR_ZERO;
                    self.state = target;
                    self.notify_state(sink);
                    if seeking {
                        self.notify_seeking_speed(sink);
                    }
                }
            }
            Opcode::FastRewind | Opcode::FastForward => {
                let step = if opcode == Opcode::FastForward {
                    SEEKING_SPEED_FACTOR_STEP
                } else {
                    SEEKING_SPEED_FACTOR_STEP.saturating_neg()
                };
                if seeking {
                    let limit = SEEKING_SPEED_FACTOR_MAX.saturating_sub(SEEKING_SPEED_FACTOR_STEP);
                    // Only move while the result stays within the maximum.
                    if self.seeking_speed.saturating_mul(step.signum()) <= limit {
                        self.seeking_speed = self.seeking_speed.saturating_add(step);
                        self.notify_seeking_speed(sink);
                    }
                } else {
                    self.seeking_speed = step;
                    self.state = MediaState::Seeking;
                    self.notify_state(sink);
                    self.notify_seeking_speed(sink);
                }
            }
            Opcode::Stop => {
                self.seeking_speed = SEEKING_SPEED_FACTOR_ZERO;
                self.track_pos = 0;
                self.state = MediaState::Paused;
                self.notify_state(sink);
                if seeking {
                    self.notify_seeking_speed(sink);
                }
                self.notify_position(sink);
            }
            Opcode::MoveRelative => {
                let result = match param {
                    Some(delta) => {
                        self.track_pos = clamp_position(self.track_pos, delta, self.track().duration());
                        ResultCode::Success
                    }
                    None => ResultCode::CannotBeCompleted,
                };
                // The position goes out even when nothing moved.
                self.notify_position(sink);
                return result;
            }
            _ => return ResultCode::NotSupported,
        }
        ResultCode::Success
    }

    fn segment(
        &mut self,
        nav: Option<Nav>,
        param: Option<i32>,
        sink: &mut dyn PlayerEventSink,
    ) -> ResultCode {
        let track = self.current_track();
        let Some(at) = self.catalog.track(track).segment() else {
            debug!("track {} has no segments", track);
            return ResultCode::CannotBeCompleted;
        };
        let chain = SegmentChain(&self.catalog);
        let to = match nav {
            Some(Nav::Prev) => {
                let start = self.catalog.segment(at).pos();
                if self.track_pos.saturating_sub(PREV_MARGIN) < start {
                    step_prev(&chain, at).to
                } else {
                    at
                }
            }
            Some(Nav::Next) => step_next(&chain, at).to,
            Some(Nav::First) => head(&chain, at),
            Some(Nav::Last) => tail(&chain, at),
            Some(Nav::Goto) => match param {
                None => return ResultCode::CannotBeCompleted,
                // Zero keeps both the segment and the position.
                Some(0) => return ResultCode::Success,
                Some(n) => goto(&chain, at, n).to,
            },
            None => return ResultCode::NotSupported,
        };
        debug!("segment {} -> {}", at, to);
        self.catalog.set_track_segment(track, to);
        self.track_pos = self.catalog.segment(to).pos();
        self.notify_position(sink);
        ResultCode::Success
    }

    fn track_nav(
        &mut self,
        nav: Option<Nav>,
        param: Option<i32>,
        sink: &mut dyn PlayerEventSink,
    ) -> ResultCode {
        if nav == Some(Nav::Next) {
            self.next_track(sink);
            return ResultCode::Success;
        }
        let at = self.current_track();
        let chain = TrackChain(&self.catalog);
        let moved = match nav {
            Some(Nav::Prev) => step_prev(&chain, at),
            Some(Nav::First) => first(&chain, at),
            Some(Nav::Last) => last(&chain, at),
            Some(Nav::Goto) => match param {
                Some(n) => goto(&chain, at, n),
                None => return ResultCode::CannotBeCompleted,
            },
            Some(Nav::Next) | None => return ResultCode::NotSupported,
        };
        debug!("track {} -> {}", at, moved.to);
        self.catalog.set_group_track(self.group, moved.to);
        // Restart the track even when it did not change.
        self.track_pos = 0;
        if moved.changed {
            self.track_change_notifications(sink);
        } else {
            self.notify_position(sink);
        }
        ResultCode::Success
    }

    fn next_track(&mut self, sink: &mut dyn PlayerEventSink) {
        if let Some((group, track)) = self.next.take() {
            debug!("next track set explicitly: {} in {}", track, group);
            if group != self.group {
                self.group = group;
                self.group_change_notifications(sink);
            }
            self.catalog.set_group_track(group, track);
            self.track_pos = 0;
            self.track_change_notifications(sink);
            return;
        }
        let at = self.current_track();
        let moved = step_next(&TrackChain(&self.catalog), at);
        if moved.changed {
            debug!("track {} -> {}", at, moved.to);
            self.catalog.set_group_track(self.group, moved.to);
            self.track_pos = 0;
            self.track_change_notifications(sink);
        }
        // On the last track the position is kept.
    }

    fn group_nav(
        &mut self,
        nav: Option<Nav>,
        param: Option<i32>,
        sink: &mut dyn PlayerEventSink,
    ) -> ResultCode {
        let at = self.group;
        let chain = GroupChain(&self.catalog);
        let moved = match nav {
            Some(Nav::Prev) => step_prev(&chain, at),
            Some(Nav::Next) => step_next(&chain, at),
            Some(Nav::First) => first(&chain, at),
            Some(Nav::Last) => last(&chain, at),
            Some(Nav::Goto) => match param {
                Some(n) => goto(&chain, at, n),
                None => return ResultCode::CannotBeCompleted,
            },
            None => return ResultCode::NotSupported,
        };
        debug!("group {} -> {}", at, moved.to);
        self.group = moved.to;

        let track = self.current_track();
        let to_first = first(&TrackChain(&self.catalog), track);
        self.catalog.set_group_track(self.group, to_first.to);

        if moved.changed {
            self.group_change_notifications(sink);
            self.track_pos = 0;
            self.track_change_notifications(sink);
        } else if to_first.changed {
            self.track_pos = 0;
            self.track_change_notifications(sink);
        } else if self.track_pos != 0 {
            self.track_pos = 0;
            self.notify_position(sink);
        }
        ResultCode::Success
    }
}

/// `pos + delta`, kept within `[0, duration]`.
pub(crate) fn clamp_position(pos: i32, delta: i32, duration: i32) -> i32 {
    let wanted = i64::from(pos).saturating_add(i64::from(delta));
    if wanted > i64::from(duration) {
        duration
    } else if wanted < 0 {
        0
    } else {
        // Between 0 and an i32 duration, so it fits.
        i32::try_from(wanted).unwrap_or(duration)
    }
}

/// Absolute position for a Track Position write. Negative values count back
/// from the end of the track.
pub(crate) fn resolve_position(position: i32, duration: i32) -> i32 {
    if position >= 0 {
        position.min(duration)
    } else if i64::from(position) < i64::from(duration).saturating_neg() {
        0
    } else {
        duration.saturating_add(position)
    }
}

impl MediaPlayer for Mpl {
    fn player_name(&self) -> &str {
        self.config.name()
    }

    fn icon_id(&self) -> Option<ObjectId> {
        self.icon_id
    }

    fn icon_url(&self) -> &str {
        self.config.icon_url()
    }

    fn track_title(&self) -> &str {
        self.track().title()
    }

    fn track_duration(&self) -> i32 {
        self.track().duration()
    }

    fn track_position(&self) -> i32 {
        self.track_pos
    }

    fn set_track_position(&mut self, position: i32, sink: &mut dyn PlayerEventSink) {
        let duration = self.track().duration();
        let new_pos = resolve_position(position, duration);
        debug!(
            "position given {}, resulting {} (duration {})",
            position, new_pos, duration
        );
        if new_pos != self.track_pos {
            self.track_pos = new_pos;
            self.notify_position(sink);
        }
    }

    fn playback_speed(&self) -> i8 {
        self.playback_speed
    }

    fn set_playback_speed(&mut self, speed: i8, sink: &mut dyn PlayerEventSink) {
        if speed != self.playback_speed {
            self.playback_speed = speed;
            sink.on_player_event(&PlayerEvent::PlaybackSpeed(speed));
        }
    }

    fn seeking_speed(&self) -> i8 {
        self.seeking_speed
    }

    fn track_segments_id(&self) -> Option<ObjectId> {
        self.track().segments_id()
    }

    fn current_track_id(&self) -> Option<ObjectId> {
        self.track().id()
    }

    fn set_current_track_id(&mut self, id: ObjectId, sink: &mut dyn PlayerEventSink) {
        debug!("current track id to set: {}", id);
        let Some((group, track)) = self.catalog.find_track_by_id(self.group, id) else {
            debug!("track not found");
            return;
        };
        if group != self.group {
            self.group = group;
            self.group_change_notifications(sink);
            // A group change is a track change, even onto the group's cursor.
            self.catalog.set_group_track(group, track);
            self.track_change_notifications(sink);
        } else if self.current_track() != track {
            self.catalog.set_group_track(group, track);
            self.track_change_notifications(sink);
        }
    }

    fn next_track_id(&self) -> Option<ObjectId> {
        match self.next {
            Some((_, track)) => self.catalog.track(track).id(),
            None => self.natural_next().and_then(|t| self.catalog.track(t).id()),
        }
    }

    fn set_next_track_id(&mut self, id: ObjectId, sink: &mut dyn PlayerEventSink) {
        debug!("next track id to set: {}", id);
        match self.catalog.find_track_by_id(self.group, id) {
            Some(found) => {
                self.next = Some(found);
                sink.on_player_event(&PlayerEvent::NextTrackId(Some(id)));
            }
            None => debug!("track not found"),
        }
    }

    fn parent_group_id(&self) -> Option<ObjectId> {
        let parent = self.catalog.group(self.group).parent();
        self.catalog.group(parent).id()
    }

    fn current_group_id(&self) -> Option<ObjectId> {
        self.catalog.group(self.group).id()
    }

    fn set_current_group_id(&mut self, id: ObjectId, sink: &mut dyn PlayerEventSink) {
        debug!("current group id to set: {}", id);
        let Some(group) = self.catalog.find_group_by_id(self.group, id) else {
            debug!("group not found");
            return;
        };
        if group == self.group {
            return;
        }
        self.group = group;
        self.group_change_notifications(sink);
        let moved = first(&TrackChain(&self.catalog), self.current_track());
        if moved.changed {
            self.catalog.set_group_track(group, moved.to);
            self.track_change_notifications(sink);
        }
    }

    fn playing_order(&self) -> PlayingOrder {
        self.playing_order
    }

    fn set_playing_order(&mut self, order: PlayingOrder, sink: &mut dyn PlayerEventSink) {
        if order != self.playing_order && self.orders_supported.contains(order) {
            self.playing_order = order;
            sink.on_player_event(&PlayerEvent::PlayingOrder(order));
        }
    }

    fn playing_orders_supported(&self) -> PlayingOrders {
        self.orders_supported
    }

    fn media_state(&self) -> MediaState {
        self.state
    }

    fn send_command(&mut self, command: Command, sink: &mut dyn PlayerEventSink) {
        let result = match Opcode::try_from(command.opcode) {
            Ok(opcode) => {
                match command.param {
                    Some(p) => debug!("command {} param {} in {}", opcode, p, self.state),
                    None => debug!("command {} in {}", opcode, self.state),
                }
                self.dispatch(opcode, command.param, sink)
            }
            Err(raw) => {
                debug!("invalid command opcode {}", raw);
                ResultCode::NotSupported
            }
        };
        debug!("command result: {}", result);
        sink.on_player_event(&PlayerEvent::CommandResult(CommandNtf {
            requested_opcode: command.opcode,
            result,
        }));
    }

    fn opcodes_supported(&self) -> u32 {
        self.opcodes_supported
    }

    fn send_search(&mut self, search: &[u8], sink: &mut dyn PlayerEventSink) {
        // Matching is not implemented: a well-formed search returns the
        // current group.
        let code = match search::validate(search) {
            Ok(_) => {
                self.search_results_id = self.current_group_id();
                SearchResultCode::Success
            }
            Err(_) => {
                self.search_results_id = None;
                SearchResultCode::Failure
            }
        };
        sink.on_player_event(&PlayerEvent::SearchResult(code));
        sink.on_player_event(&PlayerEvent::SearchResultsId(self.search_results_id));
    }

    fn search_results_id(&self) -> Option<ObjectId> {
        self.search_results_id
    }

    fn content_ctrl_id(&self) -> u8 {
        self.content_ctrl_id
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::events::EventLog;

    type Log = EventLog<32>;

    fn player() -> Mpl {
        Mpl::builtin(&mut CcidAllocator::new()).expect("builtin catalog")
    }

    fn run(mpl: &mut Mpl, command: Command) -> (ResultCode, Log) {
        let mut log = Log::new();
        mpl.send_command(command, &mut log);
        let result = match log.last() {
            Some(PlayerEvent::CommandResult(ntf)) => ntf.result,
            _ => ResultCode::NotSupported,
        };
        (result, log)
    }

    #[test]
    fn test_initial_state() {
        let mpl = player();
        assert_eq!(mpl.media_state(), MediaState::Paused);
        assert_eq!(mpl.track_title(), "Interlude #1 (Song for Alison)");
        assert_eq!(mpl.track_duration(), 6300);
        assert_eq!(mpl.track_position(), 0);
        assert_eq!(mpl.playing_order(), PlayingOrder::InOrderRepeat);
        assert_eq!(mpl.playback_speed(), PLAYBACK_SPEED_UNITY);
        assert_eq!(mpl.content_ctrl_id(), 0);
        assert_eq!(mpl.player_name(), "Player0");
    }

    #[test]
    fn test_play_pause_cycle() {
        let mut mpl = player();
        let (r, log) = run(&mut mpl, Command::new(Opcode::Play));
        assert_eq!(r, ResultCode::Success);
        assert_eq!(log.events()[0], PlayerEvent::MediaState(MediaState::Playing));

        let (r, log) = run(&mut mpl, Command::new(Opcode::Play));
        assert_eq!(r, ResultCode::Success);
        assert_eq!(log.events().len(), 1, "only the command result");

        let (_, _) = run(&mut mpl, Command::new(Opcode::Pause));
        assert_eq!(mpl.media_state(), MediaState::Paused);
    }

    #[test]
    fn test_unknown_opcode_not_supported() {
        let mut mpl = player();
        let mut log = Log::new();
        mpl.send_command(Command { opcode: 0x7F, param: None }, &mut log);
        assert_eq!(
            log.events(),
            [PlayerEvent::CommandResult(CommandNtf {
                requested_opcode: 0x7F,
                result: ResultCode::NotSupported,
            })]
        );
    }

    #[test]
    fn test_inactive_refuses_transport_and_segments() {
        let mut mpl = player();
        mpl.force_media_state(MediaState::Inactive, &mut Log::new());
        for op in [Opcode::Play, Opcode::Stop, Opcode::FastForward, Opcode::NextSegment] {
            let (r, log) = run(&mut mpl, Command::new(op));
            assert_eq!(r, ResultCode::PlayerInactive);
            assert_eq!(log.events().len(), 1);
        }
        let (r, _) = run(&mut mpl, Command::with_param(Opcode::MoveRelative, 10));
        assert_eq!(r, ResultCode::PlayerInactive);
        assert_eq!(mpl.track_position(), 0);
        assert_eq!(mpl.media_state(), MediaState::Inactive);
    }

    #[test]
    fn test_inactive_track_jump_pauses() {
        let mut mpl = player();
        mpl.force_media_state(MediaState::Inactive, &mut Log::new());
        let (r, log) = run(&mut mpl, Command::new(Opcode::NextTrack));
        assert_eq!(r, ResultCode::Success);
        assert_eq!(mpl.media_state(), MediaState::Paused);
        let kinds: std::vec::Vec<_> = log.kinds().collect();
        assert_eq!(
            kinds,
            [
                EventKind::TrackChanged,
                EventKind::TrackTitle,
                EventKind::TrackDuration,
                EventKind::TrackPosition,
                EventKind::CurrentTrackId,
                EventKind::NextTrackId,
                EventKind::MediaState,
                EventKind::CommandResult,
            ]
        );
    }

    #[test]
    fn test_inactive_goto_without_param_keeps_state() {
        let mut mpl = player();
        mpl.force_media_state(MediaState::Inactive, &mut Log::new());
        let (r, _) = run(&mut mpl, Command::new(Opcode::GotoTrack));
        assert_eq!(r, ResultCode::CannotBeCompleted);
        assert_eq!(mpl.media_state(), MediaState::Inactive);
    }

    #[test]
    fn test_fast_forward_accumulates_and_clamps() {
        let mut mpl = player();
        run(&mut mpl, Command::new(Opcode::Play));
        let (_, log) = run(&mut mpl, Command::new(Opcode::FastForward));
        assert_eq!(mpl.media_state(), MediaState::Seeking);
        assert_eq!(
            &log.events()[..2],
            [
                PlayerEvent::MediaState(MediaState::Seeking),
                PlayerEvent::SeekingSpeed(SEEKING_SPEED_FACTOR_STEP)
            ]
        );
        run(&mut mpl, Command::new(Opcode::FastForward));
        assert_eq!(mpl.seeking_speed(), 8);
        for _ in 0..40 {
            run(&mut mpl, Command::new(Opcode::FastForward));
        }
        assert_eq!(mpl.seeking_speed(), SEEKING_SPEED_FACTOR_MAX);
        let (_, log) = run(&mut mpl, Command::new(Opcode::FastForward));
        assert_eq!(log.events().len(), 1, "no change at the limit");
    }

    #[test]
    fn test_fast_rewind_reaches_negative_limit() {
        let mut mpl = player();
        for _ in 0..40 {
            run(&mut mpl, Command::new(Opcode::FastRewind));
        }
        assert_eq!(mpl.seeking_speed(), SEEKING_SPEED_FACTOR_MAX.saturating_neg());
    }

    #[test]
    fn test_stop_while_seeking() {
        let mut mpl = player();
        run(&mut mpl, Command::with_param(Opcode::MoveRelative, 1000));
        run(&mut mpl, Command::new(Opcode::FastRewind));
        let (_, log) = run(&mut mpl, Command::new(Opcode::Stop));
        assert_eq!(
            log.events()[..3],
            [
                PlayerEvent::MediaState(MediaState::Paused),
                PlayerEvent::SeekingSpeed(0),
                PlayerEvent::TrackPosition(0),
            ]
        );
    }

    #[test]
    fn test_move_relative_without_param() {
        let mut mpl = player();
        let (r, log) = run(&mut mpl, Command::new(Opcode::MoveRelative));
        assert_eq!(r, ResultCode::CannotBeCompleted);
        assert_eq!(log.events()[0], PlayerEvent::TrackPosition(0));
    }

    #[test]
    fn test_segment_navigation() {
        let mut mpl = player();
        let (_, log) = run(&mut mpl, Command::new(Opcode::LastSegment));
        assert_eq!(log.events()[0], PlayerEvent::TrackPosition(5000));

        // 5000 - margin < 5000, so it steps back to "Middle".
        run(&mut mpl, Command::new(Opcode::PrevSegment));
        assert_eq!(mpl.track_position(), 2000);

        // Well past the margin: restart the current segment.
        run(&mut mpl, Command::with_param(Opcode::MoveRelative, 1000));
        run(&mut mpl, Command::new(Opcode::PrevSegment));
        assert_eq!(mpl.track_position(), 2000);

        let (r, log) = run(&mut mpl, Command::with_param(Opcode::GotoSegment, 0));
        assert_eq!(r, ResultCode::Success);
        assert_eq!(log.events().len(), 1);

        run(&mut mpl, Command::with_param(Opcode::GotoSegment, -3));
        assert_eq!(mpl.track_position(), 0);
    }

    #[test]
    fn test_segments_missing_cannot_be_completed() {
        let mut mpl = player();
        run(&mut mpl, Command::new(Opcode::NextTrack));
        run(&mut mpl, Command::with_param(Opcode::MoveRelative, 300));
        let (r, log) = run(&mut mpl, Command::new(Opcode::FirstSegment));
        assert_eq!(r, ResultCode::CannotBeCompleted);
        assert_eq!(log.events().len(), 1);
        assert_eq!(mpl.track_position(), 300);
    }

    #[test]
    fn test_first_track_restarts_current() {
        let mut mpl = player();
        run(&mut mpl, Command::with_param(Opcode::MoveRelative, 100));
        let (_, log) = run(&mut mpl, Command::new(Opcode::FirstTrack));
        assert_eq!(mpl.track_position(), 0);
        assert_eq!(log.events()[0], PlayerEvent::TrackPosition(0));
    }

    #[test]
    fn test_next_track_on_last_keeps_position() {
        let mut mpl = player();
        run(&mut mpl, Command::new(Opcode::LastTrack));
        run(&mut mpl, Command::with_param(Opcode::MoveRelative, 250));
        let (r, log) = run(&mut mpl, Command::new(Opcode::NextTrack));
        assert_eq!(r, ResultCode::Success);
        assert_eq!(mpl.track_position(), 250);
        assert_eq!(log.events().len(), 1);
    }

    #[test]
    fn test_next_group_moves_to_first_track() {
        let mut mpl = player();
        let (_, log) = run(&mut mpl, Command::new(Opcode::NextGroup));
        assert_eq!(mpl.track_title(), "Track 2.1");
        assert_eq!(log.kinds().next(), Some(EventKind::CurrentGroupId));
        assert_eq!(log.events()[1], PlayerEvent::TrackChanged);
    }

    #[test]
    fn test_first_group_on_first_group_resets_position() {
        let mut mpl = player();
        run(&mut mpl, Command::with_param(Opcode::MoveRelative, 100));
        let (_, log) = run(&mut mpl, Command::new(Opcode::FirstGroup));
        assert_eq!(log.events()[0], PlayerEvent::TrackPosition(0));
        let (_, log) = run(&mut mpl, Command::new(Opcode::FirstGroup));
        assert_eq!(log.events().len(), 1, "nothing left to reset");
    }

    #[test]
    fn test_track_jump_while_seeking_stops_seeking() {
        let mut mpl = player();
        run(&mut mpl, Command::new(Opcode::FastForward));
        let (_, log) = run(&mut mpl, Command::new(Opcode::PrevTrack));
        assert_eq!(mpl.media_state(), MediaState::Paused);
        assert_eq!(mpl.seeking_speed(), 0);
        let tail: std::vec::Vec<_> = log.kinds().skip(1).collect();
        assert_eq!(
            tail,
            [EventKind::MediaState, EventKind::SeekingSpeed, EventKind::CommandResult]
        );
    }

    #[test]
    fn test_set_track_position_from_end() {
        let mut mpl = player();
        let mut log = Log::new();
        mpl.set_track_position(-300, &mut log);
        assert_eq!(mpl.track_position(), 6000);
        mpl.set_track_position(-100_000, &mut log);
        assert_eq!(mpl.track_position(), 0);
        mpl.set_track_position(100_000, &mut log);
        assert_eq!(mpl.track_position(), 6300);
        mpl.set_track_position(100_000, &mut log);
        assert_eq!(log.events().len(), 3, "no event without a change");
    }

    #[test]
    fn test_playback_speed_notifies_on_change() {
        let mut mpl = player();
        let mut log = Log::new();
        mpl.set_playback_speed(PLAYBACK_SPEED_UNITY, &mut log);
        mpl.set_playback_speed(-64, &mut log);
        assert_eq!(log.events(), [PlayerEvent::PlaybackSpeed(-64)]);
    }

    #[test]
    fn test_playing_order_must_be_supported() {
        let mut mpl = player();
        let mut log = Log::new();
        mpl.set_playing_order(PlayingOrder::ShuffleOnce, &mut log);
        mpl.set_playing_order(PlayingOrder::InOrderRepeat, &mut log);
        assert!(log.events().is_empty());
        mpl.set_playing_order(PlayingOrder::InOrderOnce, &mut log);
        assert_eq!(log.events(), [PlayerEvent::PlayingOrder(PlayingOrder::InOrderOnce)]);
    }

    #[test]
    fn test_search_results() {
        let mut mpl = player();
        let mut log = Log::new();
        mpl.send_search(&[0], &mut log);
        assert_eq!(
            log.events(),
            [
                PlayerEvent::SearchResult(SearchResultCode::Failure),
                PlayerEvent::SearchResultsId(None)
            ]
        );
        log.clear();
        mpl.send_search(&[2, 1, b'a'], &mut log);
        assert_eq!(log.events()[0], PlayerEvent::SearchResult(SearchResultCode::Success));
    }

    #[test]
    fn test_emit_test_event() {
        let mpl = player();
        let mut log = Log::new();
        mpl.emit_test_event(EventKind::TrackDuration, &mut log);
        mpl.emit_test_event(EventKind::CommandResult, &mut log);
        assert_eq!(log.events(), [PlayerEvent::TrackDuration(6300)]);
    }

    #[test]
    fn test_clamp_position() {
        assert_eq!(clamp_position(0, 7000, 6300), 6300);
        assert_eq!(clamp_position(100, -200, 6300), 0);
        assert_eq!(clamp_position(100, 50, 6300), 150);
        assert_eq!(clamp_position(i32::MAX, i32::MAX, i32::MAX), i32::MAX);
    }
}
