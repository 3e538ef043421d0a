//! Control point commands and their results.
//!
//! A [`Command`] carries the raw opcode as written by the client, so an
//! unknown opcode can still be echoed back in its [`CommandNtf`].

use core::fmt;

/// Bit set of every opcode this player accepts, in Opcodes Supported layout.
pub const OPCODES_SUPPORTED: u32 = 0x001F_FFFF;

/// Control point opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    Play = 0x01,
    Pause = 0x02,
    FastRewind = 0x03,
    FastForward = 0x04,
    Stop = 0x05,
    MoveRelative = 0x10,
    PrevSegment = 0x20,
    NextSegment = 0x21,
    FirstSegment = 0x22,
    LastSegment = 0x23,
    GotoSegment = 0x24,
    PrevTrack = 0x30,
    NextTrack = 0x31,
    FirstTrack = 0x32,
    LastTrack = 0x33,
    GotoTrack = 0x34,
    PrevGroup = 0x40,
    NextGroup = 0x41,
    FirstGroup = 0x42,
    LastGroup = 0x43,
    GotoGroup = 0x44,
}

/// Which part of the player an opcode acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Transport,
    Segment,
    Track,
    Group,
}

/// Relative movement within one of the navigable lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nav {
    Prev,
    Next,
    First,
    Last,
    Goto,
}

impl Opcode {
    /// All opcodes, in wire order.
    pub const ALL: [Opcode; 21] = [
        Opcode::Play,
        Opcode::Pause,
        Opcode::FastRewind,
        Opcode::FastForward,
        Opcode::Stop,
        Opcode::MoveRelative,
        Opcode::PrevSegment,
        Opcode::NextSegment,
        Opcode::FirstSegment,
        Opcode::LastSegment,
        Opcode::GotoSegment,
        Opcode::PrevTrack,
        Opcode::NextTrack,
        Opcode::FirstTrack,
        Opcode::LastTrack,
        Opcode::GotoTrack,
        Opcode::PrevGroup,
        Opcode::NextGroup,
        Opcode::FirstGroup,
        Opcode::LastGroup,
        Opcode::GotoGroup,
    ];

    /// Raw wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the opcode carries an `int32` parameter.
    #[must_use]
    pub const fn takes_param(self) -> bool {
        matches!(
            self,
            Opcode::MoveRelative | Opcode::GotoSegment | Opcode::GotoTrack | Opcode::GotoGroup
        )
    }

    /// Position of this opcode in the Opcodes Supported bit set.
    #[must_use]
    pub fn supported_bit(self) -> u32 {
        let pos = Opcode::ALL.iter().position(|&o| o == self).unwrap_or(0);
        1u32.checked_shl(u32::try_from(pos).unwrap_or(0)).unwrap_or(0)
    }

    pub(crate) const fn category(self) -> Category {
        match self {
            Opcode::Play
            | Opcode::Pause
            | Opcode::FastRewind
            | Opcode::FastForward
            | Opcode::Stop
            | Opcode::MoveRelative => Category::Transport,
            Opcode::PrevSegment
            | Opcode::NextSegment
            | Opcode::FirstSegment
            | Opcode::LastSegment
            | Opcode::GotoSegment => Category::Segment,
            Opcode::PrevTrack
            | Opcode::NextTrack
            | Opcode::FirstTrack
            | Opcode::LastTrack
            | Opcode::GotoTrack => Category::Track,
            Opcode::PrevGroup
            | Opcode::NextGroup
            | Opcode::FirstGroup
            | Opcode::LastGroup
            | Opcode::GotoGroup => Category::Group,
        }
    }

    /// The list movement for segment, track and group opcodes.
    pub(crate) const fn nav(self) -> Option<Nav> {
        match self {
            Opcode::PrevSegment | Opcode::PrevTrack | Opcode::PrevGroup => Some(Nav::Prev),
            Opcode::NextSegment | Opcode::NextTrack | Opcode::NextGroup => Some(Nav::Next),
            Opcode::FirstSegment | Opcode::FirstTrack | Opcode::FirstGroup => Some(Nav::First),
            Opcode::LastSegment | Opcode::LastTrack | Opcode::LastGroup => Some(Nav::Last),
            Opcode::GotoSegment | Opcode::GotoTrack | Opcode::GotoGroup => Some(Nav::Goto),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|o| o.code() == code)
            .ok_or(code)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Play => "play",
            Opcode::Pause => "pause",
            Opcode::FastRewind => "fast-rewind",
            Opcode::FastForward => "fast-forward",
            Opcode::Stop => "stop",
            Opcode::MoveRelative => "move-relative",
            Opcode::PrevSegment => "prev-segment",
            Opcode::NextSegment => "next-segment",
            Opcode::FirstSegment => "first-segment",
            Opcode::LastSegment => "last-segment",
            Opcode::GotoSegment => "goto-segment",
            Opcode::PrevTrack => "prev-track",
            Opcode::NextTrack => "next-track",
            Opcode::FirstTrack => "first-track",
            Opcode::LastTrack => "last-track",
            Opcode::GotoTrack => "goto-track",
            Opcode::PrevGroup => "prev-group",
            Opcode::NextGroup => "next-group",
            Opcode::FirstGroup => "first-group",
            Opcode::LastGroup => "last-group",
            Opcode::GotoGroup => "goto-group",
        };
        f.write_str(name)
    }
}

/// A control point write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Raw opcode, possibly unknown.
    pub opcode: u8,
    /// Optional `int32` parameter.
    pub param: Option<i32>,
}

impl Command {
    /// A command without parameter.
    #[must_use]
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode: opcode as u8,
            param: None,
        }
    }

    /// A command with parameter.
    #[must_use]
    pub const fn with_param(opcode: Opcode, param: i32) -> Self {
        Self {
            opcode: opcode as u8,
            param: Some(param),
        }
    }
}

/// Control point result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ResultCode {
    Success = 1,
    NotSupported = 2,
    PlayerInactive = 3,
    CannotBeCompleted = 4,
}

impl ResultCode {
    /// Raw wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ResultCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ResultCode::Success),
            2 => Ok(ResultCode::NotSupported),
            3 => Ok(ResultCode::PlayerInactive),
            4 => Ok(ResultCode::CannotBeCompleted),
            other => Err(other),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultCode::Success => "success",
            ResultCode::NotSupported => "not supported",
            ResultCode::PlayerInactive => "player inactive",
            ResultCode::CannotBeCompleted => "cannot be completed",
        })
    }
}

/// Control point notification: the requested opcode and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandNtf {
    /// Opcode as it was written, even when unknown.
    pub requested_opcode: u8,
    /// Outcome.
    pub result: ResultCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_round_trip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::try_from(op.code()), Ok(op));
        }
        assert_eq!(Opcode::try_from(0x00), Err(0x00));
        assert_eq!(Opcode::try_from(0x06), Err(0x06));
        assert_eq!(Opcode::try_from(0x45), Err(0x45));
    }

    #[test]
    fn test_supported_bits_cover_all_opcodes() {
        let all = Opcode::ALL.iter().fold(0u32, |acc, o| acc | o.supported_bit());
        assert_eq!(all, OPCODES_SUPPORTED);
        assert_eq!(Opcode::Play.supported_bit(), 1);
        assert_eq!(Opcode::GotoGroup.supported_bit(), 1 << 20);
    }

    #[test]
    fn test_only_move_and_goto_take_params() {
        let with: Vec<Opcode> = Opcode::ALL.into_iter().filter(|o| o.takes_param()).collect();
        assert_eq!(
            with,
            [
                Opcode::MoveRelative,
                Opcode::GotoSegment,
                Opcode::GotoTrack,
                Opcode::GotoGroup
            ]
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(Opcode::Stop.category(), Category::Transport);
        assert_eq!(Opcode::MoveRelative.category(), Category::Transport);
        assert_eq!(Opcode::GotoSegment.category(), Category::Segment);
        assert_eq!(Opcode::NextTrack.category(), Category::Track);
        assert_eq!(Opcode::FirstGroup.category(), Category::Group);
        assert_eq!(Opcode::Play.nav(), None);
        assert_eq!(Opcode::LastGroup.nav(), Some(Nav::Last));
    }

    #[test]
    fn test_result_code_wire_values() {
        assert_eq!(ResultCode::Success.code(), 1);
        assert_eq!(ResultCode::CannotBeCompleted.code(), 4);
        assert_eq!(ResultCode::try_from(3), Ok(ResultCode::PlayerInactive));
        assert_eq!(ResultCode::try_from(0), Err(0));
    }
}
