//! Scoped environment overrides for configuration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the process environment lock and restores overridden variables on
/// drop.
pub struct EnvVarGuard {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Clears every variable in `keys`, then applies `overrides`.
    pub fn scoped(keys: &[&str], overrides: &[(&str, &str)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let saved = keys
            .iter()
            .map(|key| ((*key).to_owned(), env::var(key).ok()))
            .collect();
        for key in keys {
            // SAFETY: the global mutex serializes environment mutations in tests.
            unsafe { env::remove_var(key) };
        }
        for (key, value) in overrides {
            // SAFETY: the global mutex serializes environment mutations in tests.
            unsafe { env::set_var(key, value) };
        }
        Self { saved, _lock: lock }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            // SAFETY: the lock is still held until this guard is dropped.
            unsafe {
                match value {
                    Some(previous) => env::set_var(&key, previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}
