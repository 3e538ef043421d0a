//! Media player configuration and constants
//!
//! Central values for the media control stack. Buffer sizes here bound every
//! `heapless` container in the player, the proxy and the GATT layers, so
//! change them here rather than at the use site.

use heapless::String;

/// Default media player name exposed through MCS.
pub const MEDIA_PLAYER_NAME: &str = "Player0";

/// Default media player icon URL.
pub const ICON_URL: &str = "http://server.some.where/path/icon.png";

/// Capacity of the player name.
pub const PLAYER_NAME_MAX: usize = 32;

/// Capacity of the icon URL.
pub const ICON_URL_MAX: usize = 64;

/// Capacity of track, group and segment titles.
pub const TITLE_MAX: usize = 64;

/// Size of the shared object content buffer.
pub const MAX_OBJ_SIZE: usize = 127;

/// Size of the icon bitmap object (capped by [`MAX_OBJ_SIZE`]).
pub const ICON_BITMAP_SIZE: usize = 321;

/// Size of a track object (capped by [`MAX_OBJ_SIZE`]).
pub const TRACK_OBJ_SIZE: usize = 50;

/// Longest search control point value.
pub const SEARCH_LEN_MAX: usize = 64;

/// Errors building a [`PlayerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Player name longer than [`PLAYER_NAME_MAX`].
    #[error("player name too long")]
    NameTooLong,
    /// Icon URL longer than [`ICON_URL_MAX`].
    #[error("icon url too long")]
    IconUrlTooLong,
}

/// Per-instance media player settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    name: String<PLAYER_NAME_MAX>,
    icon_url: String<ICON_URL_MAX>,
}

impl PlayerConfig {
    /// Build a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either string exceeds its capacity.
    pub fn new(name: &str, icon_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            name: String::try_from(name).map_err(|_| ConfigError::NameTooLong)?,
            icon_url: String::try_from(icon_url).map_err(|_| ConfigError::IconUrlTooLong)?,
        })
    }

    /// Player name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Icon URL.
    pub fn icon_url(&self) -> &str {
        &self.icon_url
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        // Both defaults are compile-time constants well inside their capacities.
        let mut name = String::new();
        let _ = name.push_str(MEDIA_PLAYER_NAME);
        let mut icon_url = String::new();
        let _ = icon_url.push_str(ICON_URL);
        Self { name, icon_url }
    }
}
