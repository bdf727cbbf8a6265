use crate::config::Config;
use crate::error::Result;
use crate::events::SwitcherEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Trait for hotkey listeners that can run in different modes
#[async_trait::async_trait]
pub trait HotkeyListenerTrait {
    /// Run the hotkey listener
    async fn run(self: Box<Self>) -> Result<()>;
}

/// Factory function to create an appropriate listener based on the dry_run flag
pub fn create_hotkey_listener(
    config: Arc<Config>,
    tx: mpsc::Sender<SwitcherEvent>,
    dry_run: bool,
) -> Result<Box<dyn HotkeyListenerTrait + Send>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunHotkeyListener::new(tx)))
    } else {
        #[cfg(windows)]
        {
            Ok(Box::new(super::win32::Win32HotkeyListener::new(config, tx)))
        }
        #[cfg(not(windows))]
        {
            let _ = config;
            Err(crate::error::SwitchError::ServiceUnavailable(
                "global key hooks require Windows; use --dry-run elsewhere".to_string(),
            ))
        }
    }
}
