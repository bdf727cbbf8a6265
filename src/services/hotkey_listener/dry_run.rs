use super::r#trait::HotkeyListenerTrait;
use crate::error::Result;
use crate::events::SwitcherEvent;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tracing::info;

/// Scripted chord source for `--dry-run`: tabs through the emulated window
/// list and commits, on a loop, so the whole pipeline can be watched without
/// installing hooks.
pub struct DryRunHotkeyListener {
    tx: mpsc::Sender<SwitcherEvent>,
}

impl DryRunHotkeyListener {
    pub fn new(tx: mpsc::Sender<SwitcherEvent>) -> Self {
        Self { tx }
    }

    async fn emit(&self, event: SwitcherEvent) -> Result<()> {
        info!("dry-run: emitting {}", event);
        self.tx.send(event).await.map_err(|_| {
            crate::error::SwitchError::Internal("switcher event channel closed".to_string())
        })
    }
}

#[async_trait::async_trait]
impl HotkeyListenerTrait for DryRunHotkeyListener {
    async fn run(self: Box<Self>) -> Result<()> {
        info!("dry-run mode - hotkey listener emits a scripted Alt+Tab loop");

        loop {
            sleep(Duration::from_secs(5)).await;

            self.emit(SwitcherEvent::Cycle).await?;
            sleep(Duration::from_millis(400)).await;
            self.emit(SwitcherEvent::Cycle).await?;
            sleep(Duration::from_millis(400)).await;
            self.emit(SwitcherEvent::Commit).await?;
        }
    }
}
