//! The catalog a fresh local player starts with.
//!
//! Four sibling groups under one parent. Group 1 is a real album with
//! segments on its first track, groups 2 to 4 are filler with 300 second
//! tracks and their cursors parked away from the first track.

use crate::catalog::{Catalog, CatalogBuilder, CatalogError};

/// Durations are in hundredths of a second.
const GROUP_1: [(&str, i32); 5] = [
    ("Interlude #1 (Song for Alison)", 6300),
    ("Interlude #2 (For Bobbye)", 7500),
    ("Interlude #3 (Levanto Seventy)", 7800),
    ("Interlude #4 (Vesper Dreams)", 13500),
    ("Interlude #5 (Shasti)", 7500),
];

const GROUP_1_SEGMENTS: [(&str, i32); 3] = [("Start", 0), ("Middle", 2000), ("End", 5000)];

const FILLER_DURATION: i32 = 30000;

/// `(title, tracks, cursor)` for the filler groups; the cursor is the 0-based
/// position the group starts on.
const FILLER: [(&str, &[&str], usize); 3] = [
    ("Group 2", &["Track 2.1", "Track 2.2", "Track 2.3"], 1),
    ("Group 3", &["Track 3.1", "Track 3.2", "Track 3.3"], 2),
    ("Group 4", &["Track 4.1", "Track 4.2"], 1),
];

impl Catalog {
    /// Builds the built-in catalog.
    ///
    /// The first sibling group is the player's initial group and its first
    /// track the initial track. The parent group's cursor points at the first
    /// track of the last group.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        let mut b = CatalogBuilder::new();
        let parent = b.parent_group("Parent group")?;

        let album = b.group("Joe Pass - Guitar Interludes", parent)?;
        let mut first = None;
        for (title, duration) in GROUP_1 {
            let t = b.track(album, title, duration)?;
            if first.is_none() {
                first = Some(t);
            }
        }
        if let Some(t) = first {
            for (name, pos) in GROUP_1_SEGMENTS {
                b.segment(t, name, pos)?;
            }
        }

        let mut parent_cursor = None;
        for (title, tracks, cursor) in FILLER {
            let g = b.group(title, parent)?;
            for (i, name) in tracks.iter().enumerate() {
                let t = b.track(g, name, FILLER_DURATION)?;
                if i == 0 {
                    parent_cursor = Some(t);
                }
                if i == cursor {
                    b.select_track(g, t)?;
                }
            }
        }
        let parent_cursor = parent_cursor.ok_or(CatalogError::EmptyGroup)?;
        b.select_track(parent, parent_cursor)?;

        b.build()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn titles_of(cat: &Catalog, g: crate::GroupIdx) -> std::vec::Vec<&str> {
        cat.tracks_of(g).map(|t| cat.track(t).title()).collect()
    }

    #[test]
    fn test_builtin_has_four_siblings_and_a_parent() {
        let cat = Catalog::builtin().expect("builtin");
        let (first, _) = cat
            .groups()
            .find(|(_, g)| g.title() == "Joe Pass - Guitar Interludes")
            .expect("group 1");
        let siblings: std::vec::Vec<_> = cat.siblings(first).collect();
        assert_eq!(siblings.len(), 4);
        assert_eq!(cat.group_count(), 5);

        let parent = cat.group(first).parent();
        assert_eq!(cat.group(parent).title(), "Parent group");
        assert_eq!(cat.group(parent).parent(), parent);
        assert_eq!(cat.track(cat.group(parent).track()).title(), "Track 4.1");
    }

    #[test]
    fn test_builtin_group_one_tracks() {
        let cat = Catalog::builtin().expect("builtin");
        let first = cat.first_group();
        assert_eq!(
            titles_of(&cat, first),
            [
                "Interlude #1 (Song for Alison)",
                "Interlude #2 (For Bobbye)",
                "Interlude #3 (Levanto Seventy)",
                "Interlude #4 (Vesper Dreams)",
                "Interlude #5 (Shasti)",
            ]
        );
        let t1 = cat.group(first).track();
        assert_eq!(cat.track(t1).duration(), 6300);
        let segs: std::vec::Vec<_> = cat
            .segments_of(t1)
            .map(|s| (cat.segment(s).name(), cat.segment(s).pos()))
            .collect();
        assert_eq!(segs, [("Start", 0), ("Middle", 2000), ("End", 5000)]);
    }

    #[test]
    fn test_builtin_filler_cursors() {
        let cat = Catalog::builtin().expect("builtin");
        let cursors: std::vec::Vec<&str> = cat
            .siblings(cat.first_group())
            .skip(1)
            .map(|g| cat.track(cat.group(g).track()).title())
            .collect();
        assert_eq!(cursors, ["Track 2.2", "Track 3.3", "Track 4.2"]);
    }

    #[test]
    fn test_builtin_only_first_track_has_segments() {
        let cat = Catalog::builtin().expect("builtin");
        let with_segments = cat
            .groups()
            .flat_map(|(g, _)| cat.tracks_of(g).collect::<std::vec::Vec<_>>())
            .filter(|&t| cat.track(t).has_segments())
            .count();
        assert_eq!(with_segments, 1);
    }
}
