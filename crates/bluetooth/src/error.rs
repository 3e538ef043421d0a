//! Proxy and remote-player errors.
//!
//! [`ProxyError`] is returned synchronously when a call cannot be accepted.
//! [`RemoteError`] arrives later, next to a controller callback, when a
//! request to a remote player failed on the way.

use platform::bluetooth::errno;
use platform::{AttError, OtsError};
use playback::ObjectError;

/// A proxy call was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProxyError {
    /// The value cannot be produced for this characteristic or player.
    #[error("invalid argument")]
    InvalidArgument,
    /// A local player is already registered.
    #[error("already registered")]
    AlreadyRegistered,
    /// No player answers to the handle, or it does not support the call.
    #[error("not supported")]
    NotSupported,
    /// The media control client refused to issue the request.
    #[error("client error ({0})")]
    Client(i32),
    /// Object registration with the OTS failed.
    #[error("object registration failed: {0}")]
    Objects(ObjectError),
}

impl ProxyError {
    /// The negative errno the C media proxy API returns for this error.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            ProxyError::InvalidArgument => -errno::EINVAL,
            ProxyError::AlreadyRegistered => -errno::EALREADY,
            ProxyError::NotSupported => -errno::EOPNOTSUPP,
            ProxyError::Client(err) => err,
            ProxyError::Objects(ObjectError::Busy) => -errno::EBUSY,
            ProxyError::Objects(ObjectError::Ots(OtsError::NoSpace)) => -errno::ENOMEM,
            ProxyError::Objects(ObjectError::Ots(OtsError::Rejected(err))) => err,
            ProxyError::Objects(_) => -errno::EINVAL,
        }
    }
}

impl From<ObjectError> for ProxyError {
    fn from(e: ObjectError) -> Self {
        ProxyError::Objects(e)
    }
}

/// A remote request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteError {
    /// The peer answered with this ATT error code.
    #[error("att error {0}")]
    Att(u8),
    /// The response could not be decoded; negative errno.
    #[error("local error ({0})")]
    Local(i32),
}

impl From<AttError> for RemoteError {
    fn from(e: AttError) -> Self {
        RemoteError::Att(e.code())
    }
}
