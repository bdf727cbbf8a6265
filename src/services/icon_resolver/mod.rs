//! IconResolver service: one icon per owning process.
//!
//! Cache-first by process id; a miss walks pid -> executable path -> shell
//! icon through the injected `IconLoader`. Failures yield the shared generic
//! icon and leave the cache alone. Entries live for the process lifetime and
//! are only touched from the switcher task, so no locking is involved.

mod r#trait;
#[cfg(windows)]
mod win32;

pub use self::r#trait::{create_icon_resolver, IconLoader};

use crate::events::{IconRef, ProcessIcon};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct IconResolver {
    loader: Box<dyn IconLoader>,
    cache: HashMap<u32, IconRef>,
    generic: IconRef,
}

impl IconResolver {
    pub fn new(loader: Box<dyn IconLoader>) -> Self {
        Self {
            loader,
            cache: HashMap::new(),
            generic: Arc::new(ProcessIcon::generic()),
        }
    }

    /// Resolve the icon for a process, sharing cached entries.
    pub fn resolve(&mut self, pid: u32) -> IconRef {
        if let Some(icon) = self.cache.get(&pid) {
            return icon.clone();
        }

        match self.try_resolve(pid) {
            Ok(icon) => {
                let icon: IconRef = Arc::new(icon);
                self.cache.insert(pid, icon.clone());
                icon
            }
            Err(e) => {
                // Usually the process is already gone; fall back without
                // caching so a live process with the same pid can still
                // resolve later.
                debug!("icon resolution failed for pid {}: {}", pid, e);
                self.generic.clone()
            }
        }
    }

    fn try_resolve(&self, pid: u32) -> crate::error::Result<ProcessIcon> {
        let path = self.loader.executable_path(pid)?;
        let handle = self.loader.load_icon(&path)?;
        Ok(ProcessIcon {
            handle,
            exe_path: Some(path),
        })
    }

    #[cfg(test)]
    fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SwitchError};
    use crate::events::IconHandle;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeLoader {
        fail: Arc<AtomicBool>,
        path_queries: Arc<AtomicUsize>,
    }

    impl IconLoader for FakeLoader {
        fn executable_path(&self, pid: u32) -> Result<PathBuf> {
            self.path_queries.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(SwitchError::WindowQuery(format!("no such process: {}", pid)))
            } else {
                Ok(PathBuf::from(format!("C:/apps/{}.exe", pid)))
            }
        }

        fn load_icon(&self, _path: &Path) -> Result<IconHandle> {
            Ok(IconHandle(42))
        }
    }

    fn resolver(fail: Arc<AtomicBool>, queries: Arc<AtomicUsize>) -> IconResolver {
        IconResolver::new(Box::new(FakeLoader {
            fail,
            path_queries: queries,
        }))
    }

    #[test]
    fn test_cache_returns_identical_instance() {
        let queries = Arc::new(AtomicUsize::new(0));
        let mut resolver = resolver(Arc::new(AtomicBool::new(false)), queries.clone());

        let first = resolver.resolve(10);
        let second = resolver.resolve(10);

        assert!(Arc::ptr_eq(&first, &second));
        // Second resolution never hit the loader.
        assert_eq!(queries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dead_process_falls_back_without_caching() {
        let fail = Arc::new(AtomicBool::new(true));
        let mut resolver = resolver(fail.clone(), Arc::new(AtomicUsize::new(0)));

        let icon = resolver.resolve(99);
        assert!(icon.handle.is_generic());
        assert_eq!(resolver.cached_count(), 0);

        // A later successful resolution for the same pid still populates.
        fail.store(false, Ordering::SeqCst);
        let icon = resolver.resolve(99);
        assert!(!icon.handle.is_generic());
        assert_eq!(resolver.cached_count(), 1);
    }

    #[test]
    fn test_distinct_pids_get_distinct_entries() {
        let mut resolver = resolver(
            Arc::new(AtomicBool::new(false)),
            Arc::new(AtomicUsize::new(0)),
        );

        let a = resolver.resolve(1);
        let b = resolver.resolve(2);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(resolver.cached_count(), 2);
    }
}
