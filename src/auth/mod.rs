//! Client-side authentication: token persistence, the session state machine
//! and the navigation hook used on forced logout.

use std::sync::{Mutex, MutexGuard};

pub mod jwt;
pub mod navigator;
pub mod session;
pub mod store;

pub use navigator::{Screen, TerminalNavigator};
pub use session::{Session, SessionState};
pub use store::{FileTokenStore, TokenStore};

/// Lock a mutex, recovering the data if a panicking holder poisoned it
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
