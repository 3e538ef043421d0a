//! Object Transfer Service (OTS) collaborator abstraction.
//!
//! The media player publishes its icon, tracks, groups and segment lists as
//! OTS objects. Each object is addressed by a 48-bit [`ObjectId`]. The
//! service itself (object table, L2CAP channel, OACP/OLCP) lives outside this
//! workspace and is reached through [`ObjectTransferService`].

use core::fmt;

// ── ObjectId ─────────────────────────────────────────────────────────────────

/// Error returned when a raw value does not fit in 48 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[error("object id {value:#x} exceeds the 48-bit range")]
pub struct OutOfRangeError {
    /// The rejected raw value.
    pub value: u64,
}

/// 48-bit OTS object identifier.
///
/// Wraps a `u64` with the invariant `value <= 0xFFFF_FFFF_FFFF`.
/// On the wire it is always 6 bytes, little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Encoded size in bytes.
    pub const SIZE: usize = 6;

    /// Largest representable identifier.
    pub const MAX: u64 = 0xFFFF_FFFF_FFFF;

    /// First identifier OTS hands out; lower values are reserved
    /// (0 is the directory listing object).
    pub const FIRST_ALLOCATABLE: u64 = 0x100;

    /// Create an `ObjectId`, rejecting values wider than 48 bits.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > ObjectId::MAX`.
    pub const fn new(value: u64) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX {
            Err(OutOfRangeError { value })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Little-endian 48-bit encoding.
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; Self::SIZE] {
        let [b0, b1, b2, b3, b4, b5, _, _] = self.0.to_le_bytes();
        [b0, b1, b2, b3, b4, b5]
    }

    /// Decode a little-endian 48-bit identifier.
    #[must_use]
    pub fn from_le_bytes(bytes: [u8; Self::SIZE]) -> Self {
        let [b0, b1, b2, b3, b4, b5] = bytes;
        Self(u64::from_le_bytes([b0, b1, b2, b3, b4, b5, 0, 0]))
    }

    /// Decode from a slice that must be exactly [`ObjectId::SIZE`] bytes long.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; Self::SIZE] = bytes.try_into().ok()?;
        Some(Self::from_le_bytes(raw))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:012X}", self.0)
    }
}

// ── Object types ─────────────────────────────────────────────────────────────

/// Kinds of objects the media player stores in OTS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObjectType {
    /// Media player icon (bitmap).
    Icon,
    /// Segment list of a track.
    TrackSegments,
    /// A single track.
    Track,
    /// A group of tracks, or the parent group of groups.
    Group,
}

impl ObjectType {
    /// 16-bit object type UUID assigned by the Bluetooth SIG.
    #[must_use]
    pub const fn uuid16(self) -> u16 {
        match self {
            ObjectType::Icon => 0x2BA9,
            ObjectType::TrackSegments => 0x2BAA,
            ObjectType::Track => 0x2BAB,
            ObjectType::Group => 0x2BAC,
        }
    }

    /// Inverse of [`ObjectType::uuid16`].
    #[must_use]
    pub const fn from_uuid16(uuid: u16) -> Option<Self> {
        match uuid {
            0x2BA9 => Some(ObjectType::Icon),
            0x2BAA => Some(ObjectType::TrackSegments),
            0x2BAB => Some(ObjectType::Track),
            0x2BAC => Some(ObjectType::Group),
            _ => None,
        }
    }
}

// ── Service trait ────────────────────────────────────────────────────────────

/// Metadata passed to OTS when adding an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectAddParams<'a> {
    /// Object name (track title, group title, "Icon").
    pub name: &'a str,
    /// Object type.
    pub object_type: ObjectType,
    /// Current and allocated size in bytes.
    pub size: u32,
    /// Read property; every media player object is readable.
    pub readable: bool,
}

/// How OTS completed an add request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObjectCreation {
    /// The object exists and was given this identifier.
    Created(ObjectId),
    /// The identifier will be delivered later through the owner's
    /// object-created handler.
    Pending,
}

/// Errors an OTS implementation may return from [`ObjectTransferService::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OtsError {
    /// The object table is full.
    #[error("object table full")]
    NoSpace,
    /// The service refused the object; carries the stack's negative errno.
    #[error("object rejected ({0})")]
    Rejected(i32),
}

/// Object Transfer Service server, as seen by an object owner.
pub trait ObjectTransferService {
    /// Add an object described by `params`.
    ///
    /// # Errors
    ///
    /// Returns [`OtsError`] when the object cannot be added.
    fn add(&mut self, params: &ObjectAddParams<'_>) -> Result<ObjectCreation, OtsError>;
}
