pub mod hotkey;
pub mod window;

pub use hotkey::SwitcherEvent;
pub use window::{
    DiscoveredWindow, IconHandle, IconRef, ProcessIcon, WindowCandidate, WindowHandle,
};
