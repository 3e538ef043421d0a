//! Cursor movement over the catalog's linked lists.
//!
//! Groups, tracks and segments are all ordered, non-cyclic, doubly linked
//! lists. The moves the control point needs (step, first, last, goto) are the
//! same for all three, so they are written once against [`Chain`].
//!
//! Every walk is bounded by [`Chain::CAPACITY`], which also bounds the work a
//! `goto` with a huge parameter can cause.

use crate::index::{GroupIdx, SegmentIdx, TrackIdx, MAX_GROUPS, MAX_SEGMENTS, MAX_TRACKS};
use crate::Catalog;

/// A doubly linked list the cursor can move along.
pub trait Chain {
    /// Index type of the list elements.
    type Idx: Copy + PartialEq;

    /// Upper bound on the number of elements in any one list.
    const CAPACITY: usize;

    /// Element before `at`, if any.
    fn prev(&self, at: Self::Idx) -> Option<Self::Idx>;

    /// Element after `at`, if any.
    fn next(&self, at: Self::Idx) -> Option<Self::Idx>;
}

/// Outcome of a cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved<I> {
    /// Where the cursor ends up.
    pub to: I,
    /// Whether the move counts as a change for notification purposes.
    pub changed: bool,
}

impl<I> Moved<I> {
    const fn stay(at: I) -> Self {
        Self {
            to: at,
            changed: false,
        }
    }
}

/// Move one element back.
pub fn step_prev<C: Chain>(chain: &C, at: C::Idx) -> Moved<C::Idx> {
    match chain.prev(at) {
        Some(to) => Moved { to, changed: true },
        None => Moved::stay(at),
    }
}

/// Move one element forward.
pub fn step_next<C: Chain>(chain: &C, at: C::Idx) -> Moved<C::Idx> {
    match chain.next(at) {
        Some(to) => Moved { to, changed: true },
        None => Moved::stay(at),
    }
}

/// First element of the list containing `at`.
pub fn head<C: Chain>(chain: &C, at: C::Idx) -> C::Idx {
    let mut cur = at;
    for _ in 0..C::CAPACITY {
        match chain.prev(cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    cur
}

/// Last element of the list containing `at`.
pub fn tail<C: Chain>(chain: &C, at: C::Idx) -> C::Idx {
    let mut cur = at;
    for _ in 0..C::CAPACITY {
        match chain.next(cur) {
            Some(n) => cur = n,
            None => break,
        }
    }
    cur
}

/// Move to the first element.
///
/// One step is taken first and only that step decides `changed`; the rest of
/// the walk follows.
pub fn first<C: Chain>(chain: &C, at: C::Idx) -> Moved<C::Idx> {
    let step = step_prev(chain, at);
    if !step.changed {
        return step;
    }
    Moved {
        to: head(chain, step.to),
        changed: true,
    }
}

/// Move to the last element. Mirror of [`first`].
pub fn last<C: Chain>(chain: &C, at: C::Idx) -> Moved<C::Idx> {
    let step = step_next(chain, at);
    if !step.changed {
        return step;
    }
    Moved {
        to: tail(chain, step.to),
        changed: true,
    }
}

/// Move to the `n`th element: 1-based from the start when positive,
/// `-1` is the last element, `0` leaves the cursor alone.
///
/// Positions past either end stop at that end. Every step towards the
/// start counts -1 and every step towards the end counts +1; the move
/// is a change when the count is non-zero.
pub fn goto<C: Chain>(chain: &C, at: C::Idx, n: i32) -> Moved<C::Idx> {
    let mut cur = at;
    let mut count: i32 = 0;

    if n > 0 {
        for _ in 0..C::CAPACITY {
            match chain.prev(cur) {
                Some(p) => {
                    cur = p;
                    count = count.saturating_sub(1);
                }
                None => break,
            }
        }
        let steps = n.unsigned_abs().saturating_sub(1);
        for _ in 0..steps.min(capacity_u32::<C>()) {
            match chain.next(cur) {
                Some(nx) => {
                    cur = nx;
                    count = count.saturating_add(1);
                }
                None => break,
            }
        }
    } else if n < 0 {
        for _ in 0..C::CAPACITY {
            match chain.next(cur) {
                Some(nx) => {
                    cur = nx;
                    count = count.saturating_add(1);
                }
                None => break,
            }
        }
        let steps = n.unsigned_abs().saturating_sub(1);
        for _ in 0..steps.min(capacity_u32::<C>()) {
            match chain.prev(cur) {
                Some(p) => {
                    cur = p;
                    count = count.saturating_sub(1);
                }
                None => break,
            }
        }
    }

    Moved {
        to: cur,
        changed: count != 0,
    }
}

fn capacity_u32<C: Chain>() -> u32 {
    u32::try_from(C::CAPACITY).unwrap_or(u32::MAX)
}

/// 1-based position of `at` in its list.
pub fn ordinal<C: Chain>(chain: &C, at: C::Idx) -> usize {
    let mut cur = at;
    let mut pos: usize = 1;
    for _ in 0..C::CAPACITY {
        match chain.prev(cur) {
            Some(p) => {
                cur = p;
                pos = pos.saturating_add(1);
            }
            None => break,
        }
    }
    pos
}

/// Forward iterator over a list, starting at a given element.
#[derive(Clone)]
pub struct Walk<C: Chain> {
    chain: C,
    at: Option<C::Idx>,
    remaining: usize,
}

impl<C: Chain> Walk<C> {
    /// Walk from `start` to the end of its list.
    pub fn from(chain: C, start: C::Idx) -> Self {
        Self {
            chain,
            at: Some(start),
            remaining: C::CAPACITY,
        }
    }

    /// Walk the whole list containing `member`.
    pub fn whole(chain: C, member: C::Idx) -> Self {
        let start = head(&chain, member);
        Self::from(chain, start)
    }
}

impl<C: Chain> Iterator for Walk<C> {
    type Item = C::Idx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        let cur = self.at?;
        self.at = self.chain.next(cur);
        Some(cur)
    }
}

// ── Chain views over the catalog ─────────────────────────────────────────────

/// The sibling list of groups.
#[derive(Debug, Clone, Copy)]
pub struct GroupChain<'a>(pub &'a Catalog);

/// The track list of a group.
#[derive(Debug, Clone, Copy)]
pub struct TrackChain<'a>(pub &'a Catalog);

/// The segment list of a track.
#[derive(Debug, Clone, Copy)]
pub struct SegmentChain<'a>(pub &'a Catalog);

impl Chain for GroupChain<'_> {
    type Idx = GroupIdx;
    const CAPACITY: usize = MAX_GROUPS;

    fn prev(&self, at: GroupIdx) -> Option<GroupIdx> {
        self.0.group(at).prev()
    }

    fn next(&self, at: GroupIdx) -> Option<GroupIdx> {
        self.0.group(at).next()
    }
}

impl Chain for TrackChain<'_> {
    type Idx = TrackIdx;
    const CAPACITY: usize = MAX_TRACKS;

    fn prev(&self, at: TrackIdx) -> Option<TrackIdx> {
        self.0.track(at).prev()
    }

    fn next(&self, at: TrackIdx) -> Option<TrackIdx> {
        self.0.track(at).next()
    }
}

impl Chain for SegmentChain<'_> {
    type Idx = SegmentIdx;
    const CAPACITY: usize = MAX_SEGMENTS;

    fn prev(&self, at: SegmentIdx) -> Option<SegmentIdx> {
        self.0.segment(at).prev()
    }

    fn next(&self, at: SegmentIdx) -> Option<SegmentIdx> {
        self.0.segment(at).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain list 0..len for exercising the moves without a catalog.
    struct Line(usize);

    impl Chain for Line {
        type Idx = usize;
        const CAPACITY: usize = 16;

        fn prev(&self, at: usize) -> Option<usize> {
            at.checked_sub(1)
        }

        fn next(&self, at: usize) -> Option<usize> {
            let n = at.checked_add(1)?;
            (n < self.0).then_some(n)
        }
    }

    #[test]
    fn test_step_at_ends_is_unchanged() {
        let l = Line(3);
        assert_eq!(step_prev(&l, 0), Moved { to: 0, changed: false });
        assert_eq!(step_next(&l, 2), Moved { to: 2, changed: false });
        assert_eq!(step_next(&l, 0), Moved { to: 1, changed: true });
    }

    #[test]
    fn test_first_and_last() {
        let l = Line(5);
        assert_eq!(first(&l, 3), Moved { to: 0, changed: true });
        assert_eq!(first(&l, 0), Moved { to: 0, changed: false });
        assert_eq!(last(&l, 1), Moved { to: 4, changed: true });
        assert_eq!(last(&l, 4), Moved { to: 4, changed: false });
    }

    #[test]
    fn test_goto_positive_and_negative() {
        let l = Line(5);
        assert_eq!(goto(&l, 0, 3), Moved { to: 2, changed: true });
        assert_eq!(goto(&l, 2, 3), Moved { to: 2, changed: false });
        assert_eq!(goto(&l, 0, -1), Moved { to: 4, changed: true });
        assert_eq!(goto(&l, 4, -2), Moved { to: 3, changed: true });
        assert_eq!(goto(&l, 1, 0), Moved { to: 1, changed: false });
    }

    #[test]
    fn test_goto_past_the_end_stops_at_the_end() {
        let l = Line(4);
        assert_eq!(goto(&l, 0, 100), Moved { to: 3, changed: true });
        assert_eq!(goto(&l, 3, i32::MAX), Moved { to: 3, changed: false });
        assert_eq!(goto(&l, 3, i32::MIN), Moved { to: 0, changed: true });
    }

    #[test]
    fn test_ordinal_is_one_based() {
        let l = Line(4);
        assert_eq!(ordinal(&l, 0), 1);
        assert_eq!(ordinal(&l, 3), 4);
    }

    #[test]
    fn test_walk_whole_list() {
        let items: std::vec::Vec<usize> = Walk::whole(Line(4), 2).collect();
        assert_eq!(items, [0, 1, 2, 3]);
    }
}
