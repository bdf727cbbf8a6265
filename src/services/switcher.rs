use crate::error::Result;
use crate::events::{SwitcherEvent, WindowCandidate};
use crate::services::icon_resolver::IconResolver;
use crate::services::overlay::Overlay;
use crate::services::window_activator::WindowActivator;
use crate::services::window_enumerator::{ExcludedWindows, WindowEnumeratorTrait};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Overlay visibility plus the highlighted candidate. Rebuilt from scratch on
/// every hidden -> visible transition; candidates never outlive one showing.
#[derive(Debug, Default)]
pub struct SwitcherState {
    visible: bool,
    selected: usize,
    candidates: Vec<WindowCandidate>,
}

impl SwitcherState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn candidates(&self) -> &[WindowCandidate] {
        &self.candidates
    }

    /// Become visible with a fresh candidate list. The highlight starts on
    /// the second entry when there is one - entry zero is the window the user
    /// is leaving, so one tap lands on "the previous window".
    pub fn show_with(&mut self, candidates: Vec<WindowCandidate>) {
        self.candidates = candidates;
        self.selected = if self.candidates.len() > 1 { 1 } else { 0 };
        self.visible = true;
    }

    /// Advance the highlight, wrapping. No-op on an empty list.
    pub fn advance(&mut self) {
        if !self.candidates.is_empty() {
            self.selected = (self.selected + 1) % self.candidates.len();
        }
    }

    /// Move the highlight to a clicked entry. Rejects out-of-range indices
    /// (the overlay may race a re-render).
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.candidates.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Leave the visible state, returning the candidate to activate (if the
    /// overlay was visible and had any). Always safe to call.
    pub fn hide(&mut self) -> Option<WindowCandidate> {
        let target = if self.visible {
            self.candidates.get(self.selected).cloned()
        } else {
            None
        };
        self.visible = false;
        self.selected = 0;
        self.candidates.clear();
        target
    }
}

/// The switcher loop: consumes hotkey/overlay events, owns the state, the
/// icon cache and the overlay handle. Everything here runs on one task; the
/// hook thread only ever enqueues.
pub struct Switcher {
    state: SwitcherState,
    enumerator: Box<dyn WindowEnumeratorTrait>,
    icons: IconResolver,
    activator: WindowActivator,
    overlay: Box<dyn Overlay>,
    events: mpsc::Receiver<SwitcherEvent>,
    excluded: ExcludedWindows,
    heartbeat: Duration,
}

impl Switcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        enumerator: Box<dyn WindowEnumeratorTrait>,
        icons: IconResolver,
        activator: WindowActivator,
        overlay: Box<dyn Overlay>,
        events: mpsc::Receiver<SwitcherEvent>,
        excluded: ExcludedWindows,
        heartbeat: Duration,
    ) -> Self {
        Self {
            state: SwitcherState::new(),
            enumerator,
            icons,
            activator,
            overlay,
            events,
            excluded,
            heartbeat,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        info!("switcher loop started");
        let mut heartbeat = tokio::time::interval(self.heartbeat);

        loop {
            tokio::select! {
                maybe_event = self.events.recv() => {
                    match maybe_event {
                        Some(event) => {
                            debug!("handling {}", event);
                            self.handle_event(event);
                        }
                        None => {
                            info!("event channel closed, switcher stopping");
                            return Ok(());
                        }
                    }
                }
                // No-op tick that keeps this task hot so the process is not
                // deprioritized as idle between keystrokes.
                _ = heartbeat.tick() => {}
            }
        }
    }

    pub fn handle_event(&mut self, event: SwitcherEvent) {
        match event {
            SwitcherEvent::Cycle => self.on_cycle(),
            SwitcherEvent::Commit => self.on_commit(),
            SwitcherEvent::Activate(index) => self.on_activate(index),
        }
    }

    fn on_cycle(&mut self) {
        if self.state.visible() {
            // Repeat tap: move the highlight only, never re-enumerate.
            self.state.advance();
            self.overlay
                .render(self.state.candidates(), self.state.selected());
            return;
        }

        self.sync_exclusions();
        let discovered = self.enumerator.enumerate();
        let candidates: Vec<WindowCandidate> = discovered
            .into_iter()
            .map(|window| {
                let icon = self.icons.resolve(window.pid);
                WindowCandidate::new(window, icon)
            })
            .collect();

        debug!("showing overlay with {} candidates", candidates.len());
        self.state.show_with(candidates);
        self.overlay
            .render(self.state.candidates(), self.state.selected());
        self.overlay.show();
    }

    fn on_commit(&mut self) {
        if !self.state.visible() {
            return;
        }

        // Hide before activating so the overlay never sits above the window
        // it just promoted.
        self.overlay.hide();
        if let Some(target) = self.state.hide() {
            info!("activating {}", target.title);
            self.activator.activate(target.handle);
        }
    }

    fn on_activate(&mut self, index: usize) {
        if !self.state.visible() {
            return;
        }
        if self.state.select(index) {
            self.on_commit();
        } else {
            debug!("click on stale index {}", index);
        }
    }

    fn sync_exclusions(&mut self) {
        let mut excluded = Vec::new();
        if let Some(handle) = self.overlay.window_handle() {
            excluded.push(handle);
        }
        *self.excluded.write() = excluded;
    }
}
