use super::IconResolver;
use crate::error::Result;
use crate::events::IconHandle;
use std::path::{Path, PathBuf};

/// OS-facing half of icon resolution, split out so the cache logic can be
/// tested against a fake.
pub trait IconLoader: Send {
    /// Resolve the executable path of a process.
    fn executable_path(&self, pid: u32) -> Result<PathBuf>;

    /// Load the shell icon for an executable.
    fn load_icon(&self, path: &Path) -> Result<IconHandle>;
}

/// Factory function to create an appropriate resolver based on the dry_run flag
pub fn create_icon_resolver(dry_run: bool) -> Result<IconResolver> {
    if dry_run {
        Ok(IconResolver::new(Box::new(DryRunLoader)))
    } else {
        #[cfg(windows)]
        {
            Ok(IconResolver::new(Box::new(super::win32::Win32IconLoader)))
        }
        #[cfg(not(windows))]
        {
            Err(crate::error::SwitchError::ServiceUnavailable(
                "icon resolution requires Windows; use --dry-run elsewhere".to_string(),
            ))
        }
    }
}

/// Emulated loader for `--dry-run`: deterministic paths, no shell calls.
struct DryRunLoader;

impl IconLoader for DryRunLoader {
    fn executable_path(&self, pid: u32) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("C:/apps/dry-run-{}.exe", pid)))
    }

    fn load_icon(&self, _path: &Path) -> Result<IconHandle> {
        Ok(IconHandle(1))
    }
}
