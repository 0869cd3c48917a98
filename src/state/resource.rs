// Loading state for a single screen resource.
// Keeps last-known data next to the load status so failed refreshes never blank the screen.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::storage::lock;

/// Status of the most recent load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Data plus load status for one screen.
///
/// `data` may be stale (from cache) while `status` is `Loading` or `Error`.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: LoadStatus::Idle,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == LoadStatus::Error
    }
}

/// Receives the output of a revalidation flow.
pub trait DataSink<T>: Send + Sync {
    /// Show `data`. Replaces whatever was shown before.
    fn publish(&self, data: T);

    fn set_status(&self, status: LoadStatus);

    fn set_error(&self, message: String);
}

/// A [`ResourceState`] shared between the render loop and background flows.
#[derive(Debug)]
pub struct SharedResource<T> {
    inner: Arc<Mutex<ResourceState<T>>>,
}

impl<T> Clone for SharedResource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedResource<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ResourceState::default())),
        }
    }
}

impl<T> SharedResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state for reading or direct mutation.
    pub fn lock(&self) -> MutexGuard<'_, ResourceState<T>> {
        lock(&self.inner)
    }

    /// Forget data, status and error.
    pub fn reset(&self) {
        *self.lock() = ResourceState::default();
    }
}

impl<T: Clone> SharedResource<T> {
    /// Copy of the current state.
    pub fn snapshot(&self) -> ResourceState<T> {
        self.lock().clone()
    }
}

impl<T: Send> DataSink<T> for SharedResource<T> {
    fn publish(&self, data: T) {
        self.lock().data = Some(data);
    }

    fn set_status(&self, status: LoadStatus) {
        let mut state = self.lock();
        state.status = status;
        if status != LoadStatus::Error {
            state.error = None;
        }
    }

    fn set_error(&self, message: String) {
        self.lock().error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_survives_only_in_error_status() {
        let resource = SharedResource::<Vec<u32>>::new();
        resource.publish(vec![1, 2]);
        resource.set_error("offline".to_string());
        resource.set_status(LoadStatus::Error);

        let state = resource.snapshot();
        assert_eq!(state.data, Some(vec![1, 2]));
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert!(state.is_error());

        resource.set_status(LoadStatus::Loading);
        let state = resource.snapshot();
        assert!(state.is_loading());
        assert_eq!(state.error, None);
        assert_eq!(state.data, Some(vec![1, 2]));
    }

    #[test]
    fn test_clones_share_state() {
        let resource = SharedResource::<u32>::new();
        let other = resource.clone();
        other.publish(7);
        assert_eq!(resource.snapshot().data, Some(7));

        resource.reset();
        assert_eq!(other.snapshot().data, None);
        assert_eq!(other.snapshot().status, LoadStatus::Idle);
    }
}
