use crate::error::Result;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Installs (or re-installs) the platform hooks. Implementations must be
/// idempotent: an install tears down whatever was armed before.
pub trait HookBackend: Send {
    fn install(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct HookState {
    pub installed: bool,
    pub last_refresh: Instant,
}

/// Drives the install/re-arm cycle. The refresh is unconditional: there is
/// no signal when the OS drops a hook, a dead hook just stops delivering.
pub struct HookSupervisor<B: HookBackend> {
    backend: B,
    interval: Duration,
    state: HookState,
}

impl<B: HookBackend> HookSupervisor<B> {
    pub fn new(backend: B, interval: Duration) -> Self {
        Self {
            backend,
            interval,
            state: HookState {
                installed: false,
                last_refresh: Instant::now(),
            },
        }
    }

    pub fn state(&self) -> HookState {
        self.state
    }

    /// One install pass. A failure leaves the switcher inert until the next
    /// guard tick; it never takes the process down.
    pub fn refresh(&mut self) {
        match self.backend.install() {
            Ok(()) => {
                self.state.installed = true;
                info!("keyboard hooks installed/refreshed");
            }
            Err(e) => {
                self.state.installed = false;
                warn!("hook install failed, retrying on next guard tick: {}", e);
            }
        }
        self.state.last_refresh = Instant::now();
    }

    /// Install immediately, then re-arm on every guard tick, forever.
    pub async fn run(mut self) -> Result<()> {
        let mut guard = tokio::time::interval(self.interval);
        loop {
            // First tick completes immediately, doubling as the initial install.
            guard.tick().await;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwitchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FlakyBackend {
        installs: Arc<AtomicUsize>,
        fail_first: usize,
    }

    impl HookBackend for FlakyBackend {
        fn install(&mut self) -> Result<()> {
            let n = self.installs.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                Err(SwitchError::Hook("no permission".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_refresh_tracks_install_outcome() {
        let installs = Arc::new(AtomicUsize::new(0));
        let mut supervisor = HookSupervisor::new(
            FlakyBackend {
                installs: installs.clone(),
                fail_first: 1,
            },
            Duration::from_secs(60),
        );

        supervisor.refresh();
        assert!(!supervisor.state().installed);

        supervisor.refresh();
        assert!(supervisor.state().installed);
        assert_eq!(installs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_guard_reinstalls_regardless_of_failures() {
        let installs = Arc::new(AtomicUsize::new(0));
        let supervisor = HookSupervisor::new(
            FlakyBackend {
                installs: installs.clone(),
                fail_first: usize::MAX,
            },
            Duration::from_millis(10),
        );

        // Let a few guard ticks elapse, then stop the loop.
        let _ = tokio::time::timeout(Duration::from_millis(45), supervisor.run()).await;

        // Every tick retried the install even though each one failed.
        assert!(installs.load(Ordering::SeqCst) >= 3);
    }
}
