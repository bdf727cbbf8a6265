use super::r#trait::{ExcludedWindows, WindowEnumeratorTrait};
use crate::events::{DiscoveredWindow, WindowHandle};
use tracing::info;

/// Emulated window table for `--dry-run`: a fixed set of plausible windows,
/// still subject to the exclusion list so the full pipeline is exercised.
pub struct DryRunEnumerator {
    excluded: ExcludedWindows,
}

impl DryRunEnumerator {
    pub fn new(excluded: ExcludedWindows) -> Self {
        Self { excluded }
    }
}

impl WindowEnumeratorTrait for DryRunEnumerator {
    fn enumerate(&self) -> Vec<DiscoveredWindow> {
        let excluded = self.excluded.read().clone();

        let windows = vec![
            DiscoveredWindow::new(WindowHandle(0x1001), "Terminal - dry_run", 101),
            DiscoveredWindow::new(WindowHandle(0x1002), "Browser - dry_run", 102),
            DiscoveredWindow::new(WindowHandle(0x1003), "Editor - dry_run", 103),
            DiscoveredWindow::new(WindowHandle(0x1004), "Mail - dry_run", 104),
        ];

        let windows: Vec<_> = windows
            .into_iter()
            .filter(|w| !excluded.contains(&w.handle))
            .collect();

        info!("dry-run: emulating {} windows", windows.len());
        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::sync::Arc;

    #[test]
    fn test_dry_run_respects_exclusions() {
        let excluded = Arc::new(RwLock::new(vec![WindowHandle(0x1001)]));
        let enumerator = DryRunEnumerator::new(excluded);

        let windows = enumerator.enumerate();
        assert_eq!(windows.len(), 3);
        assert!(windows.iter().all(|w| w.handle != WindowHandle(0x1001)));
    }
}
