//! Typed arena indices for the catalog.
//!
//! Groups, tracks and segments live in fixed-capacity arenas inside
//! [`Catalog`](crate::Catalog). The links between them (prev/next siblings,
//! parent, cursors) are stored as these indices instead of pointers.
//!
//! Indices are only minted by the catalog that owns the arena and entries are
//! never removed, so an index obtained from a catalog stays valid for that
//! catalog's whole lifetime.

use core::fmt;

/// Maximum number of groups, including the parent group.
pub const MAX_GROUPS: usize = 8;

/// Maximum number of tracks across all groups.
pub const MAX_TRACKS: usize = 32;

/// Maximum number of track segments across all tracks.
pub const MAX_SEGMENTS: usize = 16;

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name(u16);

        impl $name {
            /// Arena slot of this entry.
            #[must_use]
            pub const fn slot(self) -> usize {
                self.0 as usize
            }

            /// Only the catalog builder creates indices. Arena capacities are
            /// far below `u16::MAX`, so the conversion cannot truncate.
            #[allow(clippy::cast_possible_truncation)]
            pub(crate) const fn from_slot(slot: usize) -> Self {
                Self(slot as u16)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_index!(
    /// Index of a [`Group`](crate::Group).
    GroupIdx,
    "g"
);
arena_index!(
    /// Index of a [`Track`](crate::Track).
    TrackIdx,
    "t"
);
arena_index!(
    /// Index of a [`Segment`](crate::Segment).
    SegmentIdx,
    "s"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_slot_round_trip() {
        assert_eq!(TrackIdx::from_slot(7).slot(), 7);
        assert_eq!(GroupIdx::from_slot(0).slot(), 0);
    }

    #[test]
    fn test_index_display_prefix() {
        assert_eq!(format!("{}", GroupIdx::from_slot(2)), "g2");
        assert_eq!(format!("{}", TrackIdx::from_slot(3)), "t3");
        assert_eq!(format!("{}", SegmentIdx::from_slot(4)), "s4");
    }

    #[test]
    fn test_index_capacity() {
        // Capacities must stay addressable by a u16 slot.
        assert!(MAX_TRACKS < usize::from(u16::MAX));
        assert!(MAX_SEGMENTS < usize::from(u16::MAX));
        assert!(MAX_GROUPS < usize::from(u16::MAX));
    }
}
