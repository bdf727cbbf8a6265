//! HotkeyListener service: responsibility and boundaries
//!
//! Owns the global Alt+Tab capture: installing the low-level keyboard hook,
//! swallowing the chord so the native switcher never appears, and forwarding
//! cycle/commit events to the switcher over a non-blocking channel. Windows
//! can silently evict low-level hooks, so a supervisor re-runs the install
//! on a timer whether or not anything looks broken. What the events *mean*
//! is the switcher's business, not this module's.

mod dry_run;
mod supervisor;
mod r#trait;
#[cfg(windows)]
mod win32;

pub use self::r#trait::{create_hotkey_listener, HotkeyListenerTrait};
pub use self::supervisor::{HookBackend, HookState, HookSupervisor};
