use super::ops::WindowOps;
use crate::error::{Result, SwitchError};
use crate::events::WindowHandle;
use std::ffi::c_void;
use tracing::debug;
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Threading::{AttachThreadInput, GetCurrentThreadId};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, SetFocus, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_KEYUP, VK_MENU,
};
use windows::Win32::UI::WindowsAndMessaging::{
    BringWindowToTop, GetForegroundWindow, GetWindowThreadProcessId, IsIconic, IsWindow,
    SetForegroundWindow, ShowWindow, SwitchToThisWindow, SystemParametersInfoW,
    SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SPI_SETFOREGROUNDLOCKTIMEOUT, SW_RESTORE, SW_SHOW,
};

pub struct Win32WindowOps;

fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

impl WindowOps for Win32WindowOps {
    fn is_window(&self, window: WindowHandle) -> bool {
        unsafe { IsWindow(hwnd(window)).as_bool() }
    }

    fn is_minimized(&self, window: WindowHandle) -> bool {
        unsafe { IsIconic(hwnd(window)).as_bool() }
    }

    fn restore(&self, window: WindowHandle) -> Result<()> {
        // Return value is the previous visibility state, not an error code.
        unsafe {
            let _ = ShowWindow(hwnd(window), SW_RESTORE);
        }
        Ok(())
    }

    fn show(&self, window: WindowHandle) -> Result<()> {
        unsafe {
            let _ = ShowWindow(hwnd(window), SW_SHOW);
        }
        Ok(())
    }

    fn pulse_modifier(&self) -> Result<()> {
        let inputs = [
            INPUT {
                r#type: INPUT_KEYBOARD,
                Anonymous: INPUT_0 {
                    ki: KEYBDINPUT {
                        wVk: VK_MENU,
                        ..Default::default()
                    },
                },
            },
            INPUT {
                r#type: INPUT_KEYBOARD,
                Anonymous: INPUT_0 {
                    ki: KEYBDINPUT {
                        wVk: VK_MENU,
                        dwFlags: KEYEVENTF_KEYUP,
                        ..Default::default()
                    },
                },
            },
        ];

        let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(SwitchError::Activation(
                "SendInput dropped the modifier pulse".to_string(),
            ));
        }
        Ok(())
    }

    fn set_foreground(&self, window: WindowHandle) -> Result<()> {
        let granted = unsafe { SetForegroundWindow(hwnd(window)) };
        if granted.as_bool() {
            Ok(())
        } else {
            Err(SwitchError::Activation(format!(
                "SetForegroundWindow({}) refused",
                window
            )))
        }
    }

    fn set_focus(&self, window: WindowHandle) -> Result<()> {
        unsafe {
            SetFocus(hwnd(window))
                .map_err(|e| SwitchError::Activation(format!("SetFocus({}): {}", window, e)))?;
        }
        Ok(())
    }

    fn bring_to_top(&self, window: WindowHandle) -> Result<()> {
        unsafe {
            BringWindowToTop(hwnd(window)).map_err(|e| {
                SwitchError::Activation(format!("BringWindowToTop({}): {}", window, e))
            })
        }
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        let foreground = unsafe { GetForegroundWindow() };
        if foreground.0.is_null() {
            None
        } else {
            Some(WindowHandle(foreground.0 as isize))
        }
    }

    fn current_thread_id(&self) -> u32 {
        unsafe { GetCurrentThreadId() }
    }

    fn window_thread_id(&self, window: WindowHandle) -> u32 {
        unsafe { GetWindowThreadProcessId(hwnd(window), None) }
    }

    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> Result<()> {
        let ok = unsafe { AttachThreadInput(from, to, attach) };
        if ok.as_bool() {
            Ok(())
        } else {
            Err(SwitchError::Activation(format!(
                "AttachThreadInput({} -> {}, {}) failed",
                from, to, attach
            )))
        }
    }

    fn switch_to_window(&self, window: WindowHandle) -> Result<()> {
        unsafe { SwitchToThisWindow(hwnd(window), true) };
        Ok(())
    }
}

/// Zero the foreground lock timeout so foreground transfers are not delayed
/// system-wide. Best-effort; some setups deny the write.
pub fn reset_foreground_lock_timeout() {
    let result = unsafe {
        SystemParametersInfoW(
            SPI_SETFOREGROUNDLOCKTIMEOUT,
            0,
            None,
            SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
        )
    };
    if let Err(e) = result {
        debug!("could not reset foreground lock timeout: {}", e);
    }
}
