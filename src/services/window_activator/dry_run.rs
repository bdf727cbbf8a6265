use super::ops::WindowOps;
use crate::error::Result;
use crate::events::WindowHandle;
use parking_lot::Mutex;
use tracing::info;

/// Emulated window table for `--dry-run`: every handle exists, foreground
/// requests always succeed, so activations complete on the first tier.
pub struct DryRunOps {
    foreground: Mutex<Option<WindowHandle>>,
}

impl DryRunOps {
    pub fn new() -> Self {
        Self {
            foreground: Mutex::new(None),
        }
    }
}

impl WindowOps for DryRunOps {
    fn is_window(&self, _window: WindowHandle) -> bool {
        true
    }

    fn is_minimized(&self, _window: WindowHandle) -> bool {
        false
    }

    fn restore(&self, window: WindowHandle) -> Result<()> {
        info!("dry-run: restore {}", window);
        Ok(())
    }

    fn show(&self, window: WindowHandle) -> Result<()> {
        info!("dry-run: show {}", window);
        Ok(())
    }

    fn pulse_modifier(&self) -> Result<()> {
        Ok(())
    }

    fn set_foreground(&self, window: WindowHandle) -> Result<()> {
        info!("dry-run: foreground {}", window);
        *self.foreground.lock() = Some(window);
        Ok(())
    }

    fn set_focus(&self, _window: WindowHandle) -> Result<()> {
        Ok(())
    }

    fn bring_to_top(&self, _window: WindowHandle) -> Result<()> {
        Ok(())
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        *self.foreground.lock()
    }

    fn current_thread_id(&self) -> u32 {
        0
    }

    fn window_thread_id(&self, _window: WindowHandle) -> u32 {
        0
    }

    fn attach_thread_input(&self, _from: u32, _to: u32, _attach: bool) -> Result<()> {
        Ok(())
    }

    fn switch_to_window(&self, window: WindowHandle) -> Result<()> {
        *self.foreground.lock() = Some(window);
        Ok(())
    }
}
