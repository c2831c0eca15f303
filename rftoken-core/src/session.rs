//! Device initialization state
//!
//! The reader expects a one-time init exchange (get-info followed by
//! setting the LED green) before regular commands. `Session` tracks
//! whether that sequence has completed for one device handle; the state
//! is per-instance, never shared process-wide.

use std::sync::Arc;

/// Initialization state of a device session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Init sequence has not completed yet
    Uninitialized,

    /// Init sequence completed, device is ready
    Ready,
}

/// Session state handle
///
/// Thread-safe and can be cloned cheaply (Arc internally).
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    state: parking_lot::RwLock<DeviceState>,
}

impl Session {
    /// Create a new uninitialized session
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                state: parking_lot::RwLock::new(DeviceState::Uninitialized),
            }),
        }
    }

    /// Get current state
    pub fn state(&self) -> DeviceState {
        *self.inner.state.read()
    }

    /// Check if the init sequence has completed
    pub fn is_ready(&self) -> bool {
        self.state() == DeviceState::Ready
    }

    /// Record a completed init sequence
    pub fn mark_ready(&self) {
        *self.inner.state.write() = DeviceState::Ready;
    }

    /// Drop back to uninitialized, so the next connect re-runs init
    pub fn reset(&self) {
        *self.inner.state.write() = DeviceState::Uninitialized;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_new() {
        let session = Session::new();
        assert_eq!(session.state(), DeviceState::Uninitialized);
        assert!(!session.is_ready());
    }

    #[test]
    fn test_session_mark_ready() {
        let session = Session::new();
        session.mark_ready();

        assert_eq!(session.state(), DeviceState::Ready);
        assert!(session.is_ready());
    }

    #[test]
    fn test_session_reset() {
        let session = Session::new();
        session.mark_ready();
        session.reset();

        assert!(!session.is_ready());
    }

    #[test]
    fn test_session_clone_shares_state() {
        let session1 = Session::new();
        let session2 = session1.clone();

        session1.mark_ready();
        assert!(session2.is_ready());
    }
}
