use crate::error::Result;
use crate::events::{DiscoveredWindow, WindowHandle};
use parking_lot::RwLock;
use std::sync::Arc;

/// Handles the enumerator must never report: the switcher overlay itself and
/// the settings dialog while it is visible. Shared so the overlay side can
/// update it without reaching into the enumerator.
pub type ExcludedWindows = Arc<RwLock<Vec<WindowHandle>>>;

/// Trait for window enumerators that can run in different modes
pub trait WindowEnumeratorTrait: Send {
    /// List eligible top-level windows in OS enumeration order.
    ///
    /// Failures are absorbed: a broken enumeration pass yields an empty list,
    /// a broken attribute query skips (or keeps, for the cloak flag) only the
    /// affected window.
    fn enumerate(&self) -> Vec<DiscoveredWindow>;
}

/// Factory function to create an appropriate enumerator based on the dry_run flag
pub fn create_window_enumerator(
    excluded: ExcludedWindows,
    dry_run: bool,
) -> Result<Box<dyn WindowEnumeratorTrait>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunEnumerator::new(excluded)))
    } else {
        #[cfg(windows)]
        {
            Ok(Box::new(super::win32::Win32Enumerator::new(excluded)))
        }
        #[cfg(not(windows))]
        {
            Err(crate::error::SwitchError::ServiceUnavailable(
                "window enumeration requires Windows; use --dry-run elsewhere".to_string(),
            ))
        }
    }
}
