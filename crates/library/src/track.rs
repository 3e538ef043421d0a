//! Track and Segment: the leaf records of the catalog.

use heapless::String;
use platform::config::TITLE_MAX;
use platform::ObjectId;

use crate::index::{GroupIdx, SegmentIdx, TrackIdx};

/// A named position inside a track.
///
/// Segments of a track form an ordered, non-cyclic list. They are immutable
/// once the catalog is built.
#[derive(Debug, Clone)]
pub struct Segment {
    pub(crate) name: String<TITLE_MAX>,
    pub(crate) pos: i32,
    pub(crate) prev: Option<SegmentIdx>,
    pub(crate) next: Option<SegmentIdx>,
}

impl Segment {
    /// Segment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset from the start of the track, in hundredths of a second.
    pub fn pos(&self) -> i32 {
        self.pos
    }

    /// Previous segment in the same track.
    pub fn prev(&self) -> Option<SegmentIdx> {
        self.prev
    }

    /// Next segment in the same track.
    pub fn next(&self) -> Option<SegmentIdx> {
        self.next
    }
}

/// A single track of a group.
///
/// Tracks of a group form an ordered, non-cyclic list. Each track keeps a
/// cursor on its current segment, if it has segments at all.
#[derive(Debug, Clone)]
pub struct Track {
    pub(crate) title: String<TITLE_MAX>,
    /// Duration in hundredths of a second.
    pub(crate) duration: i32,
    pub(crate) group: GroupIdx,
    pub(crate) segment: Option<SegmentIdx>,
    pub(crate) id: Option<ObjectId>,
    pub(crate) segments_id: Option<ObjectId>,
    pub(crate) prev: Option<TrackIdx>,
    pub(crate) next: Option<TrackIdx>,
}

impl Track {
    /// Track title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Duration in hundredths of a second.
    pub fn duration(&self) -> i32 {
        self.duration
    }

    /// Group owning this track.
    pub fn group(&self) -> GroupIdx {
        self.group
    }

    /// Current segment cursor, `None` when the track has no segments.
    pub fn segment(&self) -> Option<SegmentIdx> {
        self.segment
    }

    /// Returns `true` if the track has a segment list.
    pub fn has_segments(&self) -> bool {
        self.segment.is_some()
    }

    /// OTS object id of the track, once registered.
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    /// OTS object id of the segment list, once registered.
    pub fn segments_id(&self) -> Option<ObjectId> {
        self.segments_id
    }

    /// Previous track in the group.
    pub fn prev(&self) -> Option<TrackIdx> {
        self.prev
    }

    /// Next track in the group.
    pub fn next(&self) -> Option<TrackIdx> {
        self.next
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use crate::CatalogBuilder;

    #[test]
    fn test_track_title_capacity() {
        let mut b = CatalogBuilder::new();
        let root = b.parent_group("root").expect("root");
        let g = b.group("g", root).expect("group");
        let t = b.track(g, "t", 100).expect("track");
        b.select_track(root, t).expect("root cursor");
        let cat = b.build().expect("build");
        assert_eq!(cat.track(t).title(), "t");
        assert_eq!(cat.track(t).duration(), 100);
        assert!(!cat.track(t).has_segments());
        assert_eq!(cat.track(t).id(), None);
    }

    #[test]
    fn test_segments_keep_insertion_order() {
        let mut b = CatalogBuilder::new();
        let root = b.parent_group("root").expect("root");
        let g = b.group("g", root).expect("group");
        let t = b.track(g, "t", 6300).expect("track");
        let s1 = b.segment(t, "Start", 0).expect("s1");
        let s2 = b.segment(t, "Middle", 2000).expect("s2");
        b.select_track(root, t).expect("root cursor");
        let cat = b.build().expect("build");

        assert_eq!(cat.track(t).segment(), Some(s1));
        assert_eq!(cat.segment(s1).next(), Some(s2));
        assert_eq!(cat.segment(s2).prev(), Some(s1));
        assert_eq!(cat.segment(s2).name(), "Middle");
        assert_eq!(cat.segment(s2).pos(), 2000);
    }
}
