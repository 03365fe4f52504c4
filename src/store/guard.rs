//! Init Guard
//!
//! Keeps repeated mounts from re-running a store's initial load.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    #[default]
    Idle,
    Initializing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitGuard {
    state: InitState,
}

impl InitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    /// Claim the initial load. False if it is already running or done.
    pub fn try_begin(&mut self) -> bool {
        match self.state {
            InitState::Initializing | InitState::Ready => false,
            InitState::Idle | InitState::Failed => {
                self.state = InitState::Initializing;
                true
            }
        }
    }

    pub fn finish(&mut self, ok: bool) {
        self.state = if ok { InitState::Ready } else { InitState::Failed };
    }

    /// Forget the load (logout, user switch)
    pub fn reset(&mut self) {
        self.state = InitState::Idle;
    }

    pub fn is_ready(&self) -> bool {
        self.state == InitState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected_while_running() {
        let mut guard = InitGuard::new();
        assert!(guard.try_begin());
        assert!(!guard.try_begin());
        assert_eq!(guard.state(), InitState::Initializing);
    }

    #[test]
    fn test_ready_is_sticky_until_reset() {
        let mut guard = InitGuard::new();
        assert!(guard.try_begin());
        guard.finish(true);
        assert!(guard.is_ready());
        assert!(!guard.try_begin());
        guard.reset();
        assert!(guard.try_begin());
    }

    #[test]
    fn test_failed_can_retry() {
        let mut guard = InitGuard::new();
        assert!(guard.try_begin());
        guard.finish(false);
        assert_eq!(guard.state(), InitState::Failed);
        assert!(guard.try_begin());
    }
}
