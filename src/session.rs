// Session state: the credential slot and its Anonymous/Authenticated transitions.
// Shared by the API client (token reads, 401 clears) and the screens (login wall).

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::error::Result;
use crate::storage::SharedStorage;

/// Storage key of the bearer credential. Deliberately outside the cache namespace.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Whether a credential is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

/// Owned session object. Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    storage: SharedStorage,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Restore the session from storage: authenticated iff a non-empty credential is stored.
    pub fn restore(storage: SharedStorage) -> Self {
        let stored = storage.get(ACCESS_TOKEN_KEY);
        let state = if stored.is_some_and(|t| !t.is_empty()) {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        let (sender, _) = watch::channel(state);

        Self {
            inner: Arc::new(SessionInner {
                storage,
                state: sender,
            }),
        }
    }

    /// The current bearer credential, read from storage on every call.
    ///
    /// Always `None` once signed out, even if the stored copy could not be removed.
    pub fn token(&self) -> Option<String> {
        if !self.is_authenticated() {
            return None;
        }
        self.inner
            .storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Store a new credential, replacing any previous one.
    ///
    /// Unlike cache writes this one is not advisory: a storage failure is
    /// returned and the session stays as it was.
    pub fn sign_in(&self, token: &str) -> Result<()> {
        self.inner.storage.set(ACCESS_TOKEN_KEY, token)?;
        self.inner.state.send_replace(SessionState::Authenticated);
        info!("session authenticated");
        Ok(())
    }

    /// Drop the credential and notify watchers that the session ended.
    ///
    /// The session becomes anonymous even when the stored credential cannot
    /// be removed; that failure is returned so the caller can report it.
    pub fn sign_out(&self) -> Result<()> {
        let removed = self.inner.storage.remove(ACCESS_TOKEN_KEY);
        let ended = self.inner.state.send_if_modified(|state| {
            let was_authenticated = *state == SessionState::Authenticated;
            *state = SessionState::Anonymous;
            was_authenticated
        });
        if ended {
            info!("session ended");
        }
        removed?;
        Ok(())
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JournalError;
    use crate::storage::{FileStorage, MemoryStorage, Storage};

    #[test]
    fn test_restore_reflects_stored_credential() {
        let storage = Arc::new(MemoryStorage::new());
        assert_eq!(
            Session::restore(storage.clone()).state(),
            SessionState::Anonymous
        );

        storage.set(ACCESS_TOKEN_KEY, "tok").unwrap();
        let session = Session::restore(storage);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok".to_string()));
    }

    #[test]
    fn test_empty_stored_credential_restores_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "").unwrap();

        let session = Session::restore(storage);
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_failed_sign_out_still_ends_session() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let storage = Arc::new(FileStorage::open(&path));
        let session = Session::restore(storage.clone());
        session.sign_in("tok").unwrap();

        // Block the temp file so the removal cannot be persisted.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        let err = session.sign_out().unwrap_err();
        assert!(matches!(err, JournalError::Storage(_)));
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(session.token(), None);
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some("tok".to_string()));
    }

    #[test]
    fn test_sign_in_replaces_previous_credential() {
        let session = Session::restore(Arc::new(MemoryStorage::new()));
        session.sign_in("first").unwrap();
        session.sign_in("second").unwrap();

        assert_eq!(session.token(), Some("second".to_string()));
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[test]
    fn test_sign_out_notifies_subscribers() {
        let session = Session::restore(Arc::new(MemoryStorage::new()));
        session.sign_in("tok").unwrap();

        let mut rx = session.subscribe();
        assert!(!rx.has_changed().unwrap());

        session.sign_out().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_sign_out_while_anonymous_is_silent() {
        let session = Session::restore(Arc::new(MemoryStorage::new()));
        let rx = session.subscribe();

        session.sign_out().unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_sign_in_failure_keeps_anonymous() {
        let session = Session::restore(Arc::new(MemoryStorage::with_quota(4)));

        let err = session.sign_in("a-long-token").unwrap_err();
        assert!(matches!(err, JournalError::Storage(_)));
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(session.token(), None);
    }
}
