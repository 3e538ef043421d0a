//! Logging shims for the proxy and GATT layers.
//!
//! With `defmt` the macros forward to the firmware logger, with `tracing` to
//! the host subscriber. With neither they still type-check their arguments
//! through `format_args!` but emit nothing. Only `{}` placeholders are used
//! so both back ends accept the same format strings.

#![allow(unused_macros)]

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}
#[cfg(all(feature = "tracing", not(feature = "defmt")))]
macro_rules! debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}
#[cfg(not(any(feature = "defmt", feature = "tracing")))]
macro_rules! debug {
    ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }};
}

#[cfg(feature = "defmt")]
macro_rules! info {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}
#[cfg(all(feature = "tracing", not(feature = "defmt")))]
macro_rules! info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}
#[cfg(not(any(feature = "defmt", feature = "tracing")))]
macro_rules! info {
    ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }};
}

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}
#[cfg(all(feature = "tracing", not(feature = "defmt")))]
macro_rules! warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}
#[cfg(not(any(feature = "defmt", feature = "tracing")))]
macro_rules! warn {
    ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }};
}

#[cfg(feature = "defmt")]
macro_rules! error {
    ($($arg:tt)*) => { defmt::error!($($arg)*) };
}
#[cfg(all(feature = "tracing", not(feature = "defmt")))]
macro_rules! error {
    ($($arg:tt)*) => { tracing::error!($($arg)*) };
}
#[cfg(not(any(feature = "defmt", feature = "tracing")))]
macro_rules! error {
    ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }};
}
