//! WindowEnumerator service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for listing the
//! top-level windows a user would expect to see in a switcher, in the order
//! the OS reports them. Selection, icon decoration and activation live
//! elsewhere; eligibility decisions are pure functions in `eligibility` so
//! they stay testable without a window table.

mod dry_run;
mod eligibility;
mod r#trait;
#[cfg(windows)]
mod win32;

pub use self::eligibility::{is_eligible, WindowProbe};
pub use self::r#trait::{create_window_enumerator, ExcludedWindows, WindowEnumeratorTrait};
