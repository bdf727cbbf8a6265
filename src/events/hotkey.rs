use std::fmt;

/// Event consumed by the switcher loop.
///
/// `Cycle` and `Commit` originate on the low-level hook thread; `Activate`
/// comes from the overlay's click callback. All three travel over the same
/// channel so the switcher applies them strictly in delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherEvent {
    /// Alt+Tab chord fired: show the overlay or advance the highlight.
    Cycle,
    /// The modifier was released: activate the highlighted window.
    Commit,
    /// A candidate was clicked directly; carries the list index.
    Activate(usize),
}

impl SwitcherEvent {
    #[allow(dead_code)]
    pub fn is_cycle(&self) -> bool {
        matches!(self, SwitcherEvent::Cycle)
    }
}

impl fmt::Display for SwitcherEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitcherEvent::Cycle => write!(f, "cycle"),
            SwitcherEvent::Commit => write!(f, "commit"),
            SwitcherEvent::Activate(index) => write!(f, "activate[{}]", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        assert_eq!(SwitcherEvent::Cycle.to_string(), "cycle");
        assert_eq!(SwitcherEvent::Commit.to_string(), "commit");
        assert_eq!(SwitcherEvent::Activate(3).to_string(), "activate[3]");
    }

    #[test]
    fn test_is_cycle() {
        assert!(SwitcherEvent::Cycle.is_cycle());
        assert!(!SwitcherEvent::Commit.is_cycle());
    }
}
