use crate::config::OverlayConfig;
use crate::events::{WindowCandidate, WindowHandle};
use tracing::info;

/// Contract the switcher requires from the overlay renderer.
///
/// Painting, theming and click handling are an external concern; clicks come
/// back to the switcher as `SwitcherEvent::Activate(index)` on the shared
/// event channel. `window_handle` feeds the enumerator's exclusion list so
/// the overlay never lists itself.
pub trait Overlay: Send {
    fn render(&mut self, candidates: &[WindowCandidate], selected: usize);
    fn show(&mut self);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;
    fn window_handle(&self) -> Option<WindowHandle>;
}

/// Stand-in renderer that writes the list to the log instead of the screen.
/// Keeps the core runnable (and `--dry-run` observable) without a UI stack.
pub struct LogOverlay {
    config: OverlayConfig,
    visible: bool,
}

impl LogOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            visible: false,
        }
    }
}

impl Overlay for LogOverlay {
    fn render(&mut self, candidates: &[WindowCandidate], selected: usize) {
        for (index, candidate) in candidates.iter().take(self.config.max_items).enumerate() {
            let marker = if index == selected { ">" } else { " " };
            info!("{} [{}] {}", marker, index, candidate.title);
        }
        if candidates.len() > self.config.max_items {
            info!("  ... {} more", candidates.len() - self.config.max_items);
        }
    }

    fn show(&mut self) {
        info!("overlay shown ({} layout)", self.config.layout_mode);
        self.visible = true;
    }

    fn hide(&mut self) {
        if self.visible {
            info!("overlay hidden");
        }
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn window_handle(&self) -> Option<WindowHandle> {
        None
    }
}
