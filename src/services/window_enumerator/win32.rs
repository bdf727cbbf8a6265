use super::eligibility::{is_eligible, CloakState, WindowProbe};
use super::r#trait::{ExcludedWindows, WindowEnumeratorTrait};
use crate::events::{DiscoveredWindow, WindowHandle};
use std::ffi::c_void;
use tracing::{debug, trace, warn};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
use windows::Win32::Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_CLOAKED};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowLongW, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsWindowVisible, GWL_EXSTYLE, WS_EX_APPWINDOW, WS_EX_TOOLWINDOW,
};

pub struct Win32Enumerator {
    excluded: ExcludedWindows,
}

/// Carried through the EnumWindows callback via LPARAM.
struct EnumContext {
    excluded: Vec<WindowHandle>,
    windows: Vec<DiscoveredWindow>,
}

impl Win32Enumerator {
    pub fn new(excluded: ExcludedWindows) -> Self {
        Self { excluded }
    }
}

impl WindowEnumeratorTrait for Win32Enumerator {
    fn enumerate(&self) -> Vec<DiscoveredWindow> {
        let mut context = EnumContext {
            excluded: self.excluded.read().clone(),
            windows: Vec::new(),
        };

        let result = unsafe {
            EnumWindows(
                Some(enum_windows_callback),
                LPARAM(&mut context as *mut EnumContext as isize),
            )
        };

        if let Err(e) = result {
            // Treated as "no candidates"; the switcher shows nothing.
            warn!("EnumWindows failed: {}", e);
            return Vec::new();
        }

        debug!("enumerated {} eligible windows", context.windows.len());
        context.windows
    }
}

unsafe extern "system" fn enum_windows_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let context = &mut *(lparam.0 as *mut EnumContext);

    let probe = probe_window(hwnd);
    if !is_eligible(&probe, &context.excluded) {
        trace!("skipping {}", probe.handle);
        return TRUE;
    }

    let mut pid: u32 = 0;
    GetWindowThreadProcessId(hwnd, Some(&mut pid));

    context
        .windows
        .push(DiscoveredWindow::new(probe.handle, probe.title, pid));

    TRUE
}

unsafe fn probe_window(hwnd: HWND) -> WindowProbe {
    let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;

    WindowProbe {
        handle: WindowHandle(hwnd.0 as isize),
        visible: IsWindowVisible(hwnd).as_bool(),
        cloak: query_cloak(hwnd),
        title: window_title(hwnd),
        tool_window: ex_style & WS_EX_TOOLWINDOW.0 != 0,
        app_window: ex_style & WS_EX_APPWINDOW.0 != 0,
    }
}

unsafe fn query_cloak(hwnd: HWND) -> CloakState {
    let mut cloaked: u32 = 0;
    match DwmGetWindowAttribute(
        hwnd,
        DWMWA_CLOAKED,
        &mut cloaked as *mut u32 as *mut c_void,
        std::mem::size_of::<u32>() as u32,
    ) {
        Ok(()) if cloaked != 0 => CloakState::Cloaked,
        Ok(()) => CloakState::NotCloaked,
        Err(_) => CloakState::QueryFailed,
    }
}

unsafe fn window_title(hwnd: HWND) -> String {
    let len = GetWindowTextLengthW(hwnd);
    if len <= 0 {
        return String::new();
    }

    let mut buf: Vec<u16> = vec![0; (len + 1) as usize];
    let copied = GetWindowTextW(hwnd, &mut buf);
    if copied <= 0 {
        return String::new();
    }
    String::from_utf16_lossy(&buf[..copied as usize])
}
