// Storage medium abstraction.
// A synchronous string-keyed key-value store shared by the cache and the session.

mod file;
mod memory;

use std::sync::{Arc, Mutex, MutexGuard};

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Synchronous string-keyed key-value medium.
///
/// Implementations are process-wide singletons behind an [`Arc`]; all
/// methods take `&self` and never suspend. Writes from different callers
/// are not ordered; the last one committed wins.
pub trait Storage: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is a no-op.
    ///
    /// On error the key is still present.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently stored.
    fn keys(&self) -> Vec<String>;

    /// Remove every key in the medium.
    fn clear(&self);
}

/// Shared handle to the process-wide storage medium.
pub type SharedStorage = Arc<dyn Storage>;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("storage lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
