use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Raw top-level window identifier (HWND value on Windows).
///
/// The referenced window can be destroyed at any moment, so holders must
/// re-validate the handle right before acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub fn raw(&self) -> isize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Raw icon identifier (HICON value on Windows; 0 marks the generic icon).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconHandle(pub isize);

impl IconHandle {
    pub const GENERIC: IconHandle = IconHandle(0);

    pub fn is_generic(&self) -> bool {
        self.0 == 0
    }
}

/// Icon resolved for a window's owning process, shared through the cache.
#[derive(Debug, PartialEq, Eq)]
pub struct ProcessIcon {
    pub handle: IconHandle,
    /// Executable the icon was loaded from; the overlay uses it for tooltips.
    pub exe_path: Option<PathBuf>,
}

impl ProcessIcon {
    pub fn generic() -> Self {
        Self {
            handle: IconHandle::GENERIC,
            exe_path: None,
        }
    }
}

pub type IconRef = Arc<ProcessIcon>;

/// Window as reported by enumeration, before icon decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub pid: u32,
}

impl DiscoveredWindow {
    pub fn new(handle: WindowHandle, title: impl Into<String>, pid: u32) -> Self {
        Self {
            handle,
            title: title.into(),
            pid,
        }
    }
}

impl fmt::Display for DiscoveredWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({}, pid {})", self.title, self.handle, self.pid)
    }
}

/// Entry of the overlay list: a discovered window plus its resolved icon.
///
/// Built fresh on every overlay show and discarded when it hides.
#[derive(Debug, Clone)]
pub struct WindowCandidate {
    pub handle: WindowHandle,
    pub title: String,
    pub pid: u32,
    pub icon: IconRef,
}

impl WindowCandidate {
    pub fn new(window: DiscoveredWindow, icon: IconRef) -> Self {
        Self {
            handle: window.handle,
            title: window.title,
            pid: window.pid,
            icon,
        }
    }
}
