//! Remote player tracker.
//!
//! The proxy serves at most one remote player. It becomes known when
//! discovery succeeds on the connection discovery was started on, and is
//! forgotten when that connection goes away.

use platform::ConnHandle;

/// Discovery progress and the discovered remote player.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RemoteState {
    discovering: Option<ConnHandle>,
    player: Option<ConnHandle>,
}

impl RemoteState {
    /// No discovery running, no remote player.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            discovering: None,
            player: None,
        }
    }

    /// Discovery was started on `conn`. A later start replaces it.
    pub fn on_discovery_started(&mut self, conn: ConnHandle) {
        self.discovering = Some(conn);
    }

    /// Discovery on `conn` finished. Returns `false` when no discovery was
    /// running on `conn`.
    pub fn on_discovered(&mut self, conn: ConnHandle, success: bool) -> bool {
        if self.discovering != Some(conn) {
            return false;
        }
        self.discovering = None;
        if success {
            self.player = Some(conn);
        }
        true
    }

    /// `conn` went away. Returns `true` if it carried the remote player.
    pub fn on_disconnected(&mut self, conn: ConnHandle) -> bool {
        if self.discovering == Some(conn) {
            self.discovering = None;
        }
        if self.player == Some(conn) {
            self.player = None;
            return true;
        }
        false
    }

    /// Connection of the remote player, once discovered.
    #[must_use]
    pub fn player(&self) -> Option<ConnHandle> {
        self.player
    }

    /// Connection discovery is running on.
    #[must_use]
    pub fn discovering(&self) -> Option<ConnHandle> {
        self.discovering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONN: ConnHandle = ConnHandle(0x40);

    #[test]
    fn test_starts_without_player() {
        let state = RemoteState::new();
        assert_eq!(state.player(), None);
        assert_eq!(state.discovering(), None);
    }

    #[test]
    fn test_discovery_registers_player() {
        let mut state = RemoteState::new();
        state.on_discovery_started(CONN);
        assert!(state.on_discovered(CONN, true));
        assert_eq!(state.player(), Some(CONN));
        assert_eq!(state.discovering(), None);
    }

    #[test]
    fn test_failed_discovery_leaves_no_player() {
        let mut state = RemoteState::new();
        state.on_discovery_started(CONN);
        assert!(state.on_discovered(CONN, false));
        assert_eq!(state.player(), None);
    }

    #[test]
    fn test_unsolicited_discovery_ignored() {
        let mut state = RemoteState::new();
        assert!(!state.on_discovered(CONN, true));
        assert_eq!(state.player(), None);
    }

    #[test]
    fn test_disconnect_forgets_player() {
        let mut state = RemoteState::new();
        state.on_discovery_started(CONN);
        state.on_discovered(CONN, true);
        assert!(!state.on_disconnected(ConnHandle(0x41)));
        assert!(state.on_disconnected(CONN));
        assert_eq!(state.player(), None);
    }
}
