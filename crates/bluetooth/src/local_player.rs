//! Bringing up the local media player.

use library::Catalog;
use platform::{CcidAllocator, ObjectTransferService, PlayerConfig};
use playback::{MediaPlayer, Mpl, PlayerEventSink, Registration};

use crate::controller::AsyncController;
use crate::error::ProxyError;
use crate::mcc::MediaControlClient;
use crate::proxy::MediaProxy;

/// Create the local player over `catalog` and register it with `proxy`.
///
/// The player takes its content control id from `ccids`. With an `ots` its
/// objects are registered before the player is; a [`Registration::Pending`]
/// result means the OTS will report an object id later: deliver it through
/// [`Mpl::on_object_created`] and finish with
/// [`resume_object_registration`].
///
/// # Errors
///
/// - [`ProxyError::AlreadyRegistered`] if `proxy` already has a local player
/// - [`ProxyError::Objects`] if the OTS refused an object
pub fn init_local_player<C, S, A>(
    proxy: &mut MediaProxy<Mpl, C, S, A>,
    config: PlayerConfig,
    catalog: Catalog,
    ccids: &mut CcidAllocator,
    ots: Option<&mut dyn ObjectTransferService>,
) -> Result<Registration, ProxyError>
where
    C: MediaControlClient,
    S: PlayerEventSink,
    A: AsyncController,
{
    if proxy.has_local_player() {
        warn!("local player already initialised");
        return Err(ProxyError::AlreadyRegistered);
    }

    let mut player = Mpl::new(config, catalog, ccids);
    let registration = match ots {
        Some(ots) => player.register_objects(ots)?,
        None => Registration::Complete,
    };
    info!("local player {} on ccid {}", player.player_name(), player.content_ctrl_id());
    proxy.register_local_player(player)?;
    Ok(registration)
}

/// Offer the remaining objects of the local player to `ots`, after a
/// pending creation was delivered.
///
/// # Errors
///
/// - [`ProxyError::NotSupported`] without a local player
/// - [`ProxyError::Objects`] if the slot is still busy or the OTS refused an
///   object
pub fn resume_object_registration<C, S, A>(
    proxy: &mut MediaProxy<Mpl, C, S, A>,
    ots: &mut dyn ObjectTransferService,
) -> Result<Registration, ProxyError>
where
    C: MediaControlClient,
    S: PlayerEventSink,
    A: AsyncController,
{
    let player = proxy.local_player_mut().ok_or(ProxyError::NotSupported)?;
    Ok(player.register_objects(ots)?)
}
