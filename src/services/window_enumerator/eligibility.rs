use crate::events::WindowHandle;

/// Desktop shell root window; it always carries a title yet never belongs in
/// a switcher.
const SHELL_ROOT_TITLE: &str = "Program Manager";

/// Result of the DWM cloak attribute query.
///
/// `QueryFailed` is a distinct state because the policy differs: a window we
/// could not ask about is treated as not cloaked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloakState {
    Cloaked,
    NotCloaked,
    QueryFailed,
}

/// Everything the eligibility rules need to know about one window, collected
/// up front so the decision itself needs no OS access.
#[derive(Debug, Clone)]
pub struct WindowProbe {
    pub handle: WindowHandle,
    pub visible: bool,
    pub cloak: CloakState,
    pub title: String,
    pub tool_window: bool,
    pub app_window: bool,
}

/// Whether a window belongs in the candidate list.
///
/// Mirrors what the native switcher shows: visible, uncloaked, titled
/// windows, excluding tool palettes unless they opt in with the app-window
/// style, and excluding our own surfaces.
pub fn is_eligible(probe: &WindowProbe, excluded: &[WindowHandle]) -> bool {
    if !probe.visible {
        return false;
    }

    // Fail open: an unanswerable cloak query keeps the window.
    if probe.cloak == CloakState::Cloaked {
        return false;
    }

    if probe.title.is_empty() || probe.title == SHELL_ROOT_TITLE {
        return false;
    }

    if probe.tool_window && !probe.app_window {
        return false;
    }

    if excluded.contains(&probe.handle) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(title: &str) -> WindowProbe {
        WindowProbe {
            handle: WindowHandle(1),
            visible: true,
            cloak: CloakState::NotCloaked,
            title: title.to_string(),
            tool_window: false,
            app_window: false,
        }
    }

    #[test]
    fn test_plain_visible_window_is_eligible() {
        assert!(is_eligible(&probe("Mail"), &[]));
    }

    #[test]
    fn test_invisible_window_excluded() {
        let mut p = probe("Mail");
        p.visible = false;
        assert!(!is_eligible(&p, &[]));
    }

    #[test]
    fn test_cloaked_window_excluded() {
        let mut p = probe("Mail");
        p.cloak = CloakState::Cloaked;
        assert!(!is_eligible(&p, &[]));
    }

    #[test]
    fn test_cloak_query_failure_fails_open() {
        let mut p = probe("Mail");
        p.cloak = CloakState::QueryFailed;
        assert!(is_eligible(&p, &[]));
    }

    #[test]
    fn test_empty_title_excluded() {
        assert!(!is_eligible(&probe(""), &[]));
    }

    #[test]
    fn test_shell_root_excluded() {
        assert!(!is_eligible(&probe("Program Manager"), &[]));
    }

    #[test]
    fn test_tool_window_excluded_unless_app_window() {
        let mut p = probe("Palette");
        p.tool_window = true;
        assert!(!is_eligible(&p, &[]));

        p.app_window = true;
        assert!(is_eligible(&p, &[]));
    }

    #[test]
    fn test_excluded_handles_skipped() {
        let p = probe("Mail");
        assert!(!is_eligible(&p, &[WindowHandle(1)]));
        assert!(is_eligible(&p, &[WindowHandle(2)]));
    }

    #[test]
    fn test_typical_desktop_filters_to_real_windows() {
        let probes = vec![
            WindowProbe {
                handle: WindowHandle(0xA),
                title: "Mail".to_string(),
                ..probe("")
            },
            WindowProbe {
                handle: WindowHandle(0xB),
                title: "Program Manager".to_string(),
                ..probe("")
            },
            WindowProbe {
                handle: WindowHandle(0xC),
                title: String::new(),
                ..probe("")
            },
        ];

        let eligible: Vec<_> = probes.iter().filter(|p| is_eligible(p, &[])).collect();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].handle, WindowHandle(0xA));
    }
}
