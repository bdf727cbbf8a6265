use super::ops::WindowOps;
use crate::error::Result;
use crate::events::WindowHandle;
use tracing::trace;

/// One tier of the escalation chain. The driver checks the actual foreground
/// window after each attempt, so a strategy only reports how its own calls
/// went.
pub trait ActivationStrategy: Send {
    fn name(&self) -> &'static str;
    fn attempt(&self, ops: &dyn WindowOps, target: WindowHandle) -> Result<()>;
}

/// Spoof recent input, then ask politely.
pub struct DirectRequest;

impl ActivationStrategy for DirectRequest {
    fn name(&self) -> &'static str {
        "direct-request"
    }

    fn attempt(&self, ops: &dyn WindowOps, target: WindowHandle) -> Result<()> {
        ops.pulse_modifier()?;
        ops.set_foreground(target)?;
        ops.set_focus(target)?;
        Ok(())
    }
}

/// Share an input queue with the foreground and target threads, which lifts
/// the foreground-change restriction, then retry.
pub struct InputQueueAttach;

impl ActivationStrategy for InputQueueAttach {
    fn name(&self) -> &'static str {
        "input-queue-attach"
    }

    fn attempt(&self, ops: &dyn WindowOps, target: WindowHandle) -> Result<()> {
        let current = ops.current_thread_id();

        let mut threads = Vec::with_capacity(2);
        if let Some(foreground) = ops.foreground_window() {
            threads.push(ops.window_thread_id(foreground));
        }
        threads.push(ops.window_thread_id(target));

        // Detach happens on drop, also on the error paths below. Leaking an
        // attach corrupts input routing for unrelated windows.
        let _guard = AttachGuard::attach(ops, current, &threads);

        let foreground_result = ops.set_foreground(target);
        ops.bring_to_top(target)?;
        foreground_result
    }
}

/// Legacy `SwitchToThisWindow`; still effective against stubborn windows.
pub struct LegacySwitch;

impl ActivationStrategy for LegacySwitch {
    fn name(&self) -> &'static str {
        "legacy-switch"
    }

    fn attempt(&self, ops: &dyn WindowOps, target: WindowHandle) -> Result<()> {
        ops.switch_to_window(target)
    }
}

/// Tracks successful thread-input attaches and undoes them on drop.
struct AttachGuard<'a> {
    ops: &'a dyn WindowOps,
    current: u32,
    attached: Vec<u32>,
}

impl<'a> AttachGuard<'a> {
    fn attach(ops: &'a dyn WindowOps, current: u32, threads: &[u32]) -> Self {
        let mut attached = Vec::new();
        for &thread in threads {
            if thread == 0 || thread == current || attached.contains(&thread) {
                continue;
            }
            match ops.attach_thread_input(current, thread, true) {
                Ok(()) => attached.push(thread),
                Err(e) => trace!("attach to thread {} failed: {}", thread, e),
            }
        }
        Self {
            ops,
            current,
            attached,
        }
    }
}

impl Drop for AttachGuard<'_> {
    fn drop(&mut self) {
        for &thread in &self.attached {
            if let Err(e) = self.ops.attach_thread_input(self.current, thread, false) {
                trace!("detach from thread {} failed: {}", thread, e);
            }
        }
    }
}
