//! Catalog: fixed-capacity arena of groups, tracks and segments.
//!
//! All three record kinds live in `heapless::Vec` arenas and refer to each
//! other through typed indices. A [`Catalog`] can only be obtained from
//! [`CatalogBuilder::build`], which guarantees:
//!
//! - every group has at least one track and a valid track cursor
//! - sibling, track and segment lists are non-cyclic
//! - every track belongs to exactly one group's list

use heapless::{String, Vec};
use platform::config::TITLE_MAX;
use platform::ObjectId;

use crate::index::{GroupIdx, SegmentIdx, TrackIdx, MAX_GROUPS, MAX_SEGMENTS, MAX_TRACKS};
use crate::navigation::{head, tail, GroupChain, SegmentChain, TrackChain, Walk};
use crate::track::{Segment, Track};

/// Errors building a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// One of the arenas is at capacity.
    #[error("catalog arena full")]
    Full,
    /// A title or name does not fit [`TITLE_MAX`].
    #[error("title too long")]
    TitleTooLong,
    /// An index does not refer to an entry of this catalog, or a track
    /// cursor points outside its group.
    #[error("index does not belong to this catalog")]
    InvalidIndex,
    /// A group was left without tracks, or there are no sibling groups.
    #[error("group has no tracks")]
    EmptyGroup,
}

/// A group of tracks.
///
/// Groups are siblings in one list; each also names a parent group. The
/// topmost group is its own parent and sits outside the sibling list.
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) title: String<TITLE_MAX>,
    pub(crate) track: TrackIdx,
    pub(crate) parent: GroupIdx,
    pub(crate) prev: Option<GroupIdx>,
    pub(crate) next: Option<GroupIdx>,
    pub(crate) id: Option<ObjectId>,
}

impl Group {
    /// Group title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current track cursor of this group.
    pub fn track(&self) -> TrackIdx {
        self.track
    }

    /// Parent group.
    pub fn parent(&self) -> GroupIdx {
        self.parent
    }

    /// Previous sibling.
    pub fn prev(&self) -> Option<GroupIdx> {
        self.prev
    }

    /// Next sibling.
    pub fn next(&self) -> Option<GroupIdx> {
        self.next
    }

    /// OTS object id of the group, once registered.
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }
}

/// The player's data model.
#[derive(Debug, Clone)]
pub struct Catalog {
    first_group: GroupIdx,
    groups: Vec<Group, MAX_GROUPS>,
    tracks: Vec<Track, MAX_TRACKS>,
    segments: Vec<Segment, MAX_SEGMENTS>,
}

// Indices are only minted by the builder for its own arenas and nothing is
// ever removed, so the direct accessors below cannot go out of bounds.
#[allow(clippy::indexing_slicing)]
impl Catalog {
    /// Group at `idx`.
    ///
    /// # Panics
    ///
    /// If `idx` was not minted by the builder of this catalog. Use
    /// [`Catalog::get_group`] for indices of unknown origin.
    pub fn group(&self, idx: GroupIdx) -> &Group {
        &self.groups[idx.slot()]
    }

    /// Track at `idx`.
    ///
    /// # Panics
    ///
    /// If `idx` was not minted by the builder of this catalog. Use
    /// [`Catalog::get_track`] for indices of unknown origin.
    pub fn track(&self, idx: TrackIdx) -> &Track {
        &self.tracks[idx.slot()]
    }

    /// Segment at `idx`.
    ///
    /// # Panics
    ///
    /// If `idx` was not minted by the builder of this catalog. Use
    /// [`Catalog::get_segment`] for indices of unknown origin.
    pub fn segment(&self, idx: SegmentIdx) -> &Segment {
        &self.segments[idx.slot()]
    }

    fn group_mut(&mut self, idx: GroupIdx) -> &mut Group {
        &mut self.groups[idx.slot()]
    }

    fn track_mut(&mut self, idx: TrackIdx) -> &mut Track {
        &mut self.tracks[idx.slot()]
    }
}

impl Catalog {
    /// Group at `idx`, or `None` if this catalog has no such slot.
    pub fn get_group(&self, idx: GroupIdx) -> Option<&Group> {
        self.groups.get(idx.slot())
    }

    /// Track at `idx`, or `None` if this catalog has no such slot.
    pub fn get_track(&self, idx: TrackIdx) -> Option<&Track> {
        self.tracks.get(idx.slot())
    }

    /// Segment at `idx`, or `None` if this catalog has no such slot.
    pub fn get_segment(&self, idx: SegmentIdx) -> Option<&Segment> {
        self.segments.get(idx.slot())
    }

    /// The first group of the sibling list, where a player starts.
    pub fn first_group(&self) -> GroupIdx {
        self.first_group
    }

    /// Number of groups, including the parent group.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of tracks in all groups.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Every group in arena order, with its index.
    pub fn groups(&self) -> impl Iterator<Item = (GroupIdx, &Group)> + '_ {
        self.groups
            .iter()
            .enumerate()
            .map(|(slot, g)| (GroupIdx::from_slot(slot), g))
    }

    /// The sibling list containing `member`, from its first group.
    pub fn siblings(&self, member: GroupIdx) -> Walk<GroupChain<'_>> {
        Walk::whole(GroupChain(self), member)
    }

    /// The tracks of `group`, from its first track.
    pub fn tracks_of(&self, group: GroupIdx) -> Walk<TrackChain<'_>> {
        Walk::whole(TrackChain(self), self.group(group).track)
    }

    /// The segments of `track`, from its first segment. Empty when the track
    /// has none.
    pub fn segments_of(&self, track: TrackIdx) -> impl Iterator<Item = SegmentIdx> + '_ {
        self.track(track)
            .segment
            .map(|s| Walk::whole(SegmentChain(self), s))
            .into_iter()
            .flatten()
    }

    /// First track of `group`.
    pub fn first_track(&self, group: GroupIdx) -> TrackIdx {
        head(&TrackChain(self), self.group(group).track)
    }

    /// Last track of `group`.
    pub fn last_track(&self, group: GroupIdx) -> TrackIdx {
        tail(&TrackChain(self), self.group(group).track)
    }

    /// Finds the track with object id `id` among all siblings of `from`.
    pub fn find_track_by_id(&self, from: GroupIdx, id: ObjectId) -> Option<(GroupIdx, TrackIdx)> {
        self.siblings(from).find_map(|g| {
            self.tracks_of(g)
                .find(|&t| self.track(t).id == Some(id))
                .map(|t| (g, t))
        })
    }

    /// Finds the group with object id `id` among all siblings of `from`.
    pub fn find_group_by_id(&self, from: GroupIdx, id: ObjectId) -> Option<GroupIdx> {
        self.siblings(from).find(|&g| self.group(g).id == Some(id))
    }

    // ── Mutation ────────────────────────────────────────────────────────────
    //
    // Cursors and object ids are the only things that change after build.

    /// Moves the track cursor of `group`.
    pub fn set_group_track(&mut self, group: GroupIdx, track: TrackIdx) {
        self.group_mut(group).track = track;
    }

    /// Moves the segment cursor of `track`. No-op for a track without
    /// segments.
    pub fn set_track_segment(&mut self, track: TrackIdx, segment: SegmentIdx) {
        let t = self.track_mut(track);
        if t.segment.is_some() {
            t.segment = Some(segment);
        }
    }

    /// Records the OTS object id of a track.
    pub fn set_track_id(&mut self, track: TrackIdx, id: ObjectId) {
        self.track_mut(track).id = Some(id);
    }

    /// Records the OTS object id of a track's segment list.
    pub fn set_segments_id(&mut self, track: TrackIdx, id: ObjectId) {
        self.track_mut(track).segments_id = Some(id);
    }

    /// Records the OTS object id of a group.
    pub fn set_group_id(&mut self, group: GroupIdx, id: ObjectId) {
        self.group_mut(group).id = Some(id);
    }

    /// Re-parents `group`.
    pub fn set_parent(&mut self, group: GroupIdx, parent: GroupIdx) {
        self.group_mut(group).parent = parent;
    }
}

// ── Builder ─────────────────────────────────────────────────────────────────

struct GroupDraft {
    title: String<TITLE_MAX>,
    track: Option<TrackIdx>,
    last_track: Option<TrackIdx>,
    parent: GroupIdx,
    prev: Option<GroupIdx>,
    next: Option<GroupIdx>,
}

/// Builds a [`Catalog`] group by group.
///
/// ```
/// use library::CatalogBuilder;
///
/// let mut b = CatalogBuilder::new();
/// let root = b.parent_group("Parent")?;
/// let g = b.group("Album", root)?;
/// let t = b.track(g, "Opening", 30000)?;
/// b.select_track(root, t)?;
/// let catalog = b.build()?;
/// assert_eq!(catalog.track(t).title(), "Opening");
/// # Ok::<(), library::CatalogError>(())
/// ```
pub struct CatalogBuilder {
    groups: Vec<GroupDraft, MAX_GROUPS>,
    tracks: Vec<Track, MAX_TRACKS>,
    segments: Vec<Segment, MAX_SEGMENTS>,
    first_sibling: Option<GroupIdx>,
    last_sibling: Option<GroupIdx>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    pub const fn new() -> Self {
        Self {
            groups: Vec::new(),
            tracks: Vec::new(),
            segments: Vec::new(),
            first_sibling: None,
            last_sibling: None,
        }
    }

    /// Adds a group that is its own parent and is not part of the sibling
    /// list.
    pub fn parent_group(&mut self, title: &str) -> Result<GroupIdx, CatalogError> {
        let idx = GroupIdx::from_slot(self.groups.len());
        self.push_group(title, idx, None)?;
        Ok(idx)
    }

    /// Appends a group to the sibling list.
    pub fn group(&mut self, title: &str, parent: GroupIdx) -> Result<GroupIdx, CatalogError> {
        if parent.slot() >= self.groups.len() {
            return Err(CatalogError::InvalidIndex);
        }
        let idx = GroupIdx::from_slot(self.groups.len());
        let prev = self.last_sibling;
        self.push_group(title, parent, prev)?;
        if let Some(p) = prev.and_then(|p| self.groups.get_mut(p.slot())) {
            p.next = Some(idx);
        }
        self.last_sibling = Some(idx);
        if self.first_sibling.is_none() {
            self.first_sibling = Some(idx);
        }
        Ok(idx)
    }

    fn push_group(
        &mut self,
        title: &str,
        parent: GroupIdx,
        prev: Option<GroupIdx>,
    ) -> Result<(), CatalogError> {
        let title = String::try_from(title).map_err(|_| CatalogError::TitleTooLong)?;
        self.groups
            .push(GroupDraft {
                title,
                track: None,
                last_track: None,
                parent,
                prev,
                next: None,
            })
            .map_err(|_| CatalogError::Full)
    }

    /// Appends a track to `group`. The first track of a group becomes its
    /// cursor.
    pub fn track(
        &mut self,
        group: GroupIdx,
        title: &str,
        duration: i32,
    ) -> Result<TrackIdx, CatalogError> {
        let idx = TrackIdx::from_slot(self.tracks.len());
        let title = String::try_from(title).map_err(|_| CatalogError::TitleTooLong)?;
        let draft = self
            .groups
            .get_mut(group.slot())
            .ok_or(CatalogError::InvalidIndex)?;
        let prev = draft.last_track;
        self.tracks
            .push(Track {
                title,
                duration,
                group,
                segment: None,
                id: None,
                segments_id: None,
                prev,
                next: None,
            })
            .map_err(|_| CatalogError::Full)?;

        draft.last_track = Some(idx);
        if draft.track.is_none() {
            draft.track = Some(idx);
        }
        if let Some(p) = prev.and_then(|p| self.tracks.get_mut(p.slot())) {
            p.next = Some(idx);
        }
        Ok(idx)
    }

    /// Appends a segment to `track`. The first segment becomes the track's
    /// segment cursor.
    pub fn segment(
        &mut self,
        track: TrackIdx,
        name: &str,
        pos: i32,
    ) -> Result<SegmentIdx, CatalogError> {
        let idx = SegmentIdx::from_slot(self.segments.len());
        let name = String::try_from(name).map_err(|_| CatalogError::TitleTooLong)?;
        let first = self
            .tracks
            .get(track.slot())
            .ok_or(CatalogError::InvalidIndex)?
            .segment;

        // Find the current tail of the track's segment list.
        let mut prev = first;
        for _ in 0..MAX_SEGMENTS {
            match prev.and_then(|p| self.segments.get(p.slot())).and_then(|s| s.next) {
                Some(n) => prev = Some(n),
                None => break,
            }
        }

        self.segments
            .push(Segment {
                name,
                pos,
                prev,
                next: None,
            })
            .map_err(|_| CatalogError::Full)?;

        if let Some(p) = prev.and_then(|p| self.segments.get_mut(p.slot())) {
            p.next = Some(idx);
        }
        if let Some(t) = self.tracks.get_mut(track.slot()) {
            if t.segment.is_none() {
                t.segment = Some(idx);
            }
        }
        Ok(idx)
    }

    /// Sets the track cursor of `group`.
    ///
    /// The track must belong to the group, except for a self-parented group
    /// whose cursor may point into any group.
    pub fn select_track(&mut self, group: GroupIdx, track: TrackIdx) -> Result<(), CatalogError> {
        let owner = self
            .tracks
            .get(track.slot())
            .ok_or(CatalogError::InvalidIndex)?
            .group;
        let draft = self
            .groups
            .get_mut(group.slot())
            .ok_or(CatalogError::InvalidIndex)?;
        if owner != group && draft.parent != group {
            return Err(CatalogError::InvalidIndex);
        }
        draft.track = Some(track);
        Ok(())
    }

    /// Finishes the catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let first_group = self.first_sibling.ok_or(CatalogError::EmptyGroup)?;
        let mut groups = Vec::new();
        for draft in self.groups {
            let Some(track) = draft.track else {
                warn!("group '{}' has no tracks", draft.title.as_str());
                return Err(CatalogError::EmptyGroup);
            };
            groups
                .push(Group {
                    title: draft.title,
                    track,
                    parent: draft.parent,
                    prev: draft.prev,
                    next: draft.next,
                    id: None,
                })
                .map_err(|_| CatalogError::Full)?;
        }
        debug!(
            "catalog built: {} groups, {} tracks, {} segments",
            groups.len(),
            self.tracks.len(),
            self.segments.len()
        );
        Ok(Catalog {
            first_group,
            groups,
            tracks: self.tracks,
            segments: self.segments,
        })
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
