use crate::error::Result;
use crate::events::WindowHandle;

/// OS facade for everything the activation tiers touch.
///
/// One call per Win32 primitive so strategies stay readable and the whole
/// chain can run against a fake in tests.
pub trait WindowOps: Send {
    fn is_window(&self, window: WindowHandle) -> bool;
    fn is_minimized(&self, window: WindowHandle) -> bool;
    fn restore(&self, window: WindowHandle) -> Result<()>;
    fn show(&self, window: WindowHandle) -> Result<()>;

    /// Synthesize a harmless modifier down/up pair. Windows grants foreground
    /// changes to processes with recent input; this manufactures that.
    fn pulse_modifier(&self) -> Result<()>;

    fn set_foreground(&self, window: WindowHandle) -> Result<()>;
    fn set_focus(&self, window: WindowHandle) -> Result<()>;
    fn bring_to_top(&self, window: WindowHandle) -> Result<()>;
    fn foreground_window(&self) -> Option<WindowHandle>;

    fn current_thread_id(&self) -> u32;
    fn window_thread_id(&self, window: WindowHandle) -> u32;
    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> Result<()>;

    /// Undocumented but long-stable "switch to this window" primitive.
    fn switch_to_window(&self, window: WindowHandle) -> Result<()>;
}
