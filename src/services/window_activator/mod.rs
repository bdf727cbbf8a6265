//! WindowActivator service: forcing a target window to the foreground.
//!
//! Windows only grants `SetForegroundWindow` to processes with recent input,
//! so a polite request usually fails from a background process. The activator
//! runs an ordered list of strategies, from a spoofed-input direct request up
//! to the legacy `SwitchToThisWindow` primitive, and stops at the first one
//! after which the OS actually reports the target as foreground. Failure is
//! absorbed; the worst outcome is that nothing changes focus.

mod dry_run;
mod ops;
mod strategies;
#[cfg(windows)]
mod win32;

pub use self::ops::WindowOps;
pub use self::strategies::{ActivationStrategy, DirectRequest, InputQueueAttach, LegacySwitch};

use crate::error::Result;
use crate::events::WindowHandle;
use tracing::debug;

pub struct WindowActivator {
    ops: Box<dyn WindowOps>,
    strategies: Vec<Box<dyn ActivationStrategy>>,
}

impl WindowActivator {
    pub fn new(ops: Box<dyn WindowOps>) -> Self {
        Self {
            ops,
            strategies: vec![
                Box::new(DirectRequest),
                Box::new(InputQueueAttach),
                Box::new(LegacySwitch),
            ],
        }
    }

    /// Bring `target` to the foreground, escalating until the OS confirms.
    ///
    /// Safe to call with a handle that died since enumeration; that aborts
    /// before any tier runs.
    pub fn activate(&self, target: WindowHandle) {
        if !self.ops.is_window(target) {
            debug!("{} no longer exists, skipping activation", target);
            return;
        }

        // Un-minimize before fighting for focus; SW_RESTORE for iconic
        // windows, plain show otherwise.
        let restored = if self.ops.is_minimized(target) {
            self.ops.restore(target)
        } else {
            self.ops.show(target)
        };
        if let Err(e) = restored {
            debug!("restore of {} failed: {}", target, e);
        }

        for strategy in &self.strategies {
            if let Err(e) = strategy.attempt(self.ops.as_ref(), target) {
                debug!("{}: {}", strategy.name(), e);
            }

            if self.ops.foreground_window() == Some(target) {
                debug!("{} brought to foreground via {}", target, strategy.name());
                return;
            }
        }

        debug!("all activation tiers exhausted for {}", target);
    }
}

/// Factory function to create an appropriate activator based on the dry_run flag
pub fn create_window_activator(dry_run: bool) -> Result<WindowActivator> {
    if dry_run {
        Ok(WindowActivator::new(Box::new(dry_run::DryRunOps::new())))
    } else {
        #[cfg(windows)]
        {
            Ok(WindowActivator::new(Box::new(win32::Win32WindowOps)))
        }
        #[cfg(not(windows))]
        {
            Err(crate::error::SwitchError::ServiceUnavailable(
                "window activation requires Windows; use --dry-run elsewhere".to_string(),
            ))
        }
    }
}

#[cfg(windows)]
pub use self::win32::reset_foreground_lock_timeout;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwitchError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeState {
        calls: Vec<String>,
        foreground: Option<WindowHandle>,
        window_alive: bool,
        minimized: bool,
        foreground_grantable: bool,
        fail_bring_to_top: bool,
    }

    #[derive(Clone)]
    struct FakeOps {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeOps {
        fn new(state: FakeState) -> Self {
            Self {
                state: Arc::new(Mutex::new(state)),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.state.lock().calls.clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.state.lock().calls.push(call.into());
        }
    }

    impl WindowOps for FakeOps {
        fn is_window(&self, _window: WindowHandle) -> bool {
            self.state.lock().window_alive
        }

        fn is_minimized(&self, _window: WindowHandle) -> bool {
            self.state.lock().minimized
        }

        fn restore(&self, _window: WindowHandle) -> crate::error::Result<()> {
            self.record("restore");
            Ok(())
        }

        fn show(&self, _window: WindowHandle) -> crate::error::Result<()> {
            self.record("show");
            Ok(())
        }

        fn pulse_modifier(&self) -> crate::error::Result<()> {
            self.record("pulse_modifier");
            Ok(())
        }

        fn set_foreground(&self, window: WindowHandle) -> crate::error::Result<()> {
            self.record("set_foreground");
            let mut state = self.state.lock();
            if state.foreground_grantable {
                state.foreground = Some(window);
                Ok(())
            } else {
                Err(SwitchError::Activation("access denied".to_string()))
            }
        }

        fn set_focus(&self, _window: WindowHandle) -> crate::error::Result<()> {
            self.record("set_focus");
            Ok(())
        }

        fn bring_to_top(&self, _window: WindowHandle) -> crate::error::Result<()> {
            self.record("bring_to_top");
            if self.state.lock().fail_bring_to_top {
                Err(SwitchError::Activation("bring_to_top refused".to_string()))
            } else {
                Ok(())
            }
        }

        fn foreground_window(&self) -> Option<WindowHandle> {
            self.state.lock().foreground
        }

        fn current_thread_id(&self) -> u32 {
            1
        }

        fn window_thread_id(&self, window: WindowHandle) -> u32 {
            // Distinct thread per window so the attach tier has work to do.
            window.0 as u32 + 100
        }

        fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> crate::error::Result<()> {
            self.record(format!("attach({},{},{})", from, to, attach));
            Ok(())
        }

        fn switch_to_window(&self, window: WindowHandle) -> crate::error::Result<()> {
            self.record("switch_to_window");
            self.state.lock().foreground = Some(window);
            Ok(())
        }
    }

    #[test]
    fn test_stale_handle_aborts_silently() {
        let ops = FakeOps::new(FakeState {
            window_alive: false,
            ..Default::default()
        });
        let activator = WindowActivator::new(Box::new(ops.clone()));

        activator.activate(WindowHandle(5));
        assert!(ops.calls().is_empty());
    }

    #[test]
    fn test_direct_request_stops_escalation() {
        let ops = FakeOps::new(FakeState {
            window_alive: true,
            foreground_grantable: true,
            ..Default::default()
        });
        let activator = WindowActivator::new(Box::new(ops.clone()));

        activator.activate(WindowHandle(5));

        let calls = ops.calls();
        assert!(calls.contains(&"pulse_modifier".to_string()));
        assert!(calls.contains(&"set_foreground".to_string()));
        // Verified success after the first tier; no attach, no legacy switch.
        assert!(!calls.iter().any(|c| c.starts_with("attach")));
        assert!(!calls.contains(&"switch_to_window".to_string()));
    }

    #[test]
    fn test_minimized_window_restored_first() {
        let ops = FakeOps::new(FakeState {
            window_alive: true,
            minimized: true,
            foreground_grantable: true,
            ..Default::default()
        });
        let activator = WindowActivator::new(Box::new(ops.clone()));

        activator.activate(WindowHandle(5));
        assert_eq!(ops.calls()[0], "restore");
    }

    #[test]
    fn test_escalates_to_attach_and_detaches_on_failure() {
        // Foreground never granted and bring_to_top fails inside the attach
        // tier; every attach must still be matched by a detach.
        let ops = FakeOps::new(FakeState {
            window_alive: true,
            foreground: Some(WindowHandle(99)),
            fail_bring_to_top: true,
            ..Default::default()
        });
        let activator = WindowActivator::new(Box::new(ops.clone()));

        activator.activate(WindowHandle(5));

        let calls = ops.calls();
        let attaches: Vec<_> = calls
            .iter()
            .filter(|c| c.starts_with("attach(") && c.ends_with("true)"))
            .collect();
        let detaches: Vec<_> = calls
            .iter()
            .filter(|c| c.starts_with("attach(") && c.ends_with("false)"))
            .collect();

        // Attached to both the old foreground thread and the target thread.
        assert_eq!(attaches.len(), 2);
        assert_eq!(detaches.len(), 2);
    }

    #[test]
    fn test_legacy_switch_is_last_resort() {
        let ops = FakeOps::new(FakeState {
            window_alive: true,
            ..Default::default()
        });
        let activator = WindowActivator::new(Box::new(ops.clone()));

        activator.activate(WindowHandle(5));
        assert!(ops.calls().contains(&"switch_to_window".to_string()));
    }
}
