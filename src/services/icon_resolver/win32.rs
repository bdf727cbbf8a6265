use super::r#trait::IconLoader;
use crate::error::{Result, SwitchError};
use crate::events::IconHandle;
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use windows::core::PWSTR;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::Shell::ExtractIconExW;
use windows::Win32::UI::WindowsAndMessaging::HICON;

pub struct Win32IconLoader;

impl IconLoader for Win32IconLoader {
    fn executable_path(&self, pid: u32) -> Result<PathBuf> {
        unsafe {
            let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid)
                .map_err(|e| SwitchError::WindowQuery(format!("OpenProcess({}): {}", pid, e)))?;

            let mut buf = vec![0u16; 512];
            let mut len = buf.len() as u32;
            let query = QueryFullProcessImageNameW(
                process,
                PROCESS_NAME_WIN32,
                PWSTR(buf.as_mut_ptr()),
                &mut len,
            );
            let _ = CloseHandle(process);

            query.map_err(|e| {
                SwitchError::WindowQuery(format!("QueryFullProcessImageName({}): {}", pid, e))
            })?;

            Ok(PathBuf::from(String::from_utf16_lossy(&buf[..len as usize])))
        }
    }

    fn load_icon(&self, path: &Path) -> Result<IconHandle> {
        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        unsafe {
            let mut icon = HICON::default();
            let extracted = ExtractIconExW(
                windows::core::PCWSTR(wide.as_ptr()),
                0,
                None,
                Some(&mut icon),
                1,
            );

            if extracted == 0 || icon.is_invalid() {
                return Err(SwitchError::WindowQuery(format!(
                    "no extractable icon in {:?}",
                    path
                )));
            }

            Ok(IconHandle(icon.0 as isize))
        }
    }
}
