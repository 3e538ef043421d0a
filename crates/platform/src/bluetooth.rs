//! Bluetooth host primitives shared by the GATT service and client layers.

use core::fmt;

/// ACL connection handle assigned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnHandle(pub u16);

impl fmt::Display for ConnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// ATT protocol error codes (Core Spec Vol 3, Part F, 3.4.1.1) used by the
/// media control layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AttError {
    /// The attribute cannot be read.
    ReadNotPermitted = 0x02,
    /// The attribute cannot be written.
    WriteNotPermitted = 0x03,
    /// Offset past the end of the attribute value.
    InvalidOffset = 0x07,
    /// Value length does not match the characteristic format.
    InvalidAttributeLength = 0x0D,
    /// The request could not be completed for an unlikely reason.
    Unlikely = 0x0E,
    /// Not enough resources to complete the request.
    InsufficientResources = 0x11,
}

impl AttError {
    /// Return the on-air error code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map an on-air code back to a known error.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x02 => Some(AttError::ReadNotPermitted),
            0x03 => Some(AttError::WriteNotPermitted),
            0x07 => Some(AttError::InvalidOffset),
            0x0D => Some(AttError::InvalidAttributeLength),
            0x0E => Some(AttError::Unlikely),
            0x11 => Some(AttError::InsufficientResources),
            _ => None,
        }
    }
}

impl fmt::Display for AttError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttError::ReadNotPermitted => "read not permitted",
            AttError::WriteNotPermitted => "write not permitted",
            AttError::InvalidOffset => "invalid offset",
            AttError::InvalidAttributeLength => "invalid attribute value length",
            AttError::Unlikely => "unlikely error",
            AttError::InsufficientResources => "insufficient resources",
        };
        f.write_str(s)
    }
}

/// POSIX error numbers returned (negated) by the media control APIs.
pub mod errno {
    /// Out of memory.
    pub const ENOMEM: i32 = 12;
    /// Resource busy.
    pub const EBUSY: i32 = 16;
    /// Invalid argument.
    pub const EINVAL: i32 = 22;
    /// Message too long.
    pub const EMSGSIZE: i32 = 90;
    /// Operation not supported.
    pub const EOPNOTSUPP: i32 = 95;
    /// Operation already in progress / already done.
    pub const EALREADY: i32 = 114;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_att_error_codes_round_trip() {
        for e in [
            AttError::ReadNotPermitted,
            AttError::WriteNotPermitted,
            AttError::InvalidOffset,
            AttError::InvalidAttributeLength,
            AttError::Unlikely,
            AttError::InsufficientResources,
        ] {
            assert_eq!(AttError::from_code(e.code()), Some(e));
        }
    }

    #[test]
    fn test_att_error_invalid_length_code() {
        assert_eq!(AttError::InvalidAttributeLength.code(), 0x0D);
        assert_eq!(AttError::from_code(0x00), None);
    }
}
