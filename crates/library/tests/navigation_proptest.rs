//! Property-based tests for cursor navigation.
//! Walks the built-in catalog with arbitrary goto parameters and starting
//! cursors and checks the moves against plain index arithmetic.

// Test files legitimately use expect() for readable assertions.
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use library::navigation::{first, goto, last, ordinal, step_next, step_prev};
use library::{Catalog, TrackChain, TrackIdx};

fn group_one_tracks(cat: &Catalog) -> Vec<TrackIdx> {
    cat.tracks_of(cat.first_group()).collect()
}

/// Position a `goto(n)` must land on in a list of `len`, 0-based.
fn expected_goto(start: usize, len: usize, n: i32) -> usize {
    let len_i = i64::try_from(len).expect("small");
    match n {
        0 => start,
        n if n > 0 => usize::try_from((i64::from(n) - 1).min(len_i - 1)).expect("in range"),
        n => usize::try_from((len_i + i64::from(n)).max(0)).expect("in range"),
    }
}

proptest::proptest! {
    /// goto lands where index arithmetic says, and reports a change exactly
    /// when the cursor moved.
    #[test]
    fn goto_matches_index_arithmetic(start in 0usize..5, n in proptest::num::i32::ANY) {
        let cat = Catalog::builtin().expect("builtin");
        let tracks = group_one_tracks(&cat);
        let chain = TrackChain(&cat);

        let moved = goto(&chain, tracks[start], n);
        let want = expected_goto(start, tracks.len(), n);
        assert_eq!(moved.to, tracks[want]);
        assert_eq!(moved.changed, want != start);
    }

    /// first/last always end on the list ends; changed iff not already there.
    #[test]
    fn first_last_reach_the_ends(start in 0usize..5) {
        let cat = Catalog::builtin().expect("builtin");
        let tracks = group_one_tracks(&cat);
        let chain = TrackChain(&cat);

        let f = first(&chain, tracks[start]);
        assert_eq!(f.to, tracks[0]);
        assert_eq!(f.changed, start != 0);

        let l = last(&chain, tracks[start]);
        assert_eq!(l.to, tracks[4]);
        assert_eq!(l.changed, start != 4);
    }

    /// A step moves the ordinal by exactly one unless at an end.
    #[test]
    fn steps_move_ordinal_by_one(start in 0usize..5) {
        let cat = Catalog::builtin().expect("builtin");
        let tracks = group_one_tracks(&cat);
        let chain = TrackChain(&cat);
        let at = tracks[start];

        let next = step_next(&chain, at);
        let prev = step_prev(&chain, at);
        assert_eq!(ordinal(&chain, at), start + 1);
        if next.changed {
            assert_eq!(ordinal(&chain, next.to), start + 2);
        } else {
            assert_eq!(start, 4);
        }
        if prev.changed {
            assert_eq!(ordinal(&chain, prev.to), start);
        } else {
            assert_eq!(start, 0);
        }
    }
}
