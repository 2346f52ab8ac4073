//! Session state machine
//!
//! Two states, three transitions (`login`, `logout`, `forced_logout`). The
//! current state is published on a `watch` channel so every consumer sees a
//! transition as soon as it happens.

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tokio::sync::watch;

use super::navigator::{Navigator, Screen};
use super::store::TokenStore;
use super::lock;
use crate::error::Result;

/// Authentication state of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Injectable session context shared by the HTTP client and the commands
pub struct Session {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
    /// Serializes transitions so concurrent forced logouts navigate once
    transition: Mutex<()>,
}

impl Session {
    /// Create a session whose initial state is derived from the store:
    /// authenticated iff it holds a token that passes the advisory check.
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        let initial = if store.is_valid() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        debug!("Session starts {:?}", initial);

        let (state, _) = watch::channel(initial);
        Self {
            store,
            navigator,
            state,
            transition: Mutex::new(()),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Receive every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Token to present to the backend, if any
    pub fn token(&self) -> Option<String> {
        self.store.read()
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Store `token` and become authenticated
    pub fn login(&self, token: &str) -> Result<()> {
        let _guard = lock(&self.transition);
        self.store.save(token)?;
        self.state.send_replace(SessionState::Authenticated);
        debug!("Session transitioned to Authenticated");
        Ok(())
    }

    /// Drop the token and become unauthenticated
    pub fn logout(&self) -> Result<()> {
        let _guard = lock(&self.transition);
        self.store.clear()?;
        self.state.send_replace(SessionState::Unauthenticated);
        debug!("Session transitioned to Unauthenticated");
        Ok(())
    }

    /// Logout triggered by an authorization failure from the backend.
    ///
    /// Same effect as [`Session::logout`], then sends the user to the login
    /// screen unless they are already there. Returns whether a navigation
    /// happened.
    pub fn forced_logout(&self) -> bool {
        let _guard = lock(&self.transition);
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear token during forced logout: {}", e);
        }
        // Publish only a real transition; repeated 401s must not re-notify
        let changed = self.state.send_if_modified(|state| {
            std::mem::replace(state, SessionState::Unauthenticated)
                != SessionState::Unauthenticated
        });
        debug!("Forced logout (state changed: {})", changed);

        if self.navigator.current() == Screen::Login {
            return false;
        }
        self.navigator.navigate(Screen::Login);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::tests::token_expiring_at;
    use crate::auth::navigator::RecordingNavigator;
    use crate::auth::store::MemoryTokenStore;
    use std::time::Duration;

    fn session_with(
        store: MemoryTokenStore,
        screen: Screen,
    ) -> (Session, Arc<MemoryTokenStore>, Arc<RecordingNavigator>) {
        let store = Arc::new(store);
        let nav = Arc::new(RecordingNavigator::new(screen));
        let session = Session::new(store.clone(), nav.clone());
        (session, store, nav)
    }

    #[test]
    fn test_initial_state_without_token() {
        let (session, _, _) = session_with(MemoryTokenStore::new(), Screen::Login);
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_initial_state_with_valid_token() {
        let token = token_expiring_at(chrono::Utc::now().timestamp() + 3600);
        let (session, _, _) = session_with(MemoryTokenStore::with_token(token), Screen::Instances);
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_initial_state_with_expired_token() {
        let token = token_expiring_at(chrono::Utc::now().timestamp() - 3600);
        let (session, store, _) =
            session_with(MemoryTokenStore::with_token(token), Screen::Instances);
        assert!(!session.is_authenticated());
        // The stale token is left in place until a transition removes it
        assert!(store.read().is_some());
    }

    #[test]
    fn test_login_then_check() {
        let (session, store, _) = session_with(MemoryTokenStore::new(), Screen::Login);

        session.login("x.y.z").unwrap();

        assert!(session.is_authenticated());
        assert_eq!(store.read().as_deref(), Some("x.y.z"));
        assert_eq!(session.token().as_deref(), Some("x.y.z"));
    }

    #[test]
    fn test_login_replaces_previous_token() {
        let (session, store, _) =
            session_with(MemoryTokenStore::with_token("old.tok.en"), Screen::Login);
        session.login("new.tok.en").unwrap();
        assert_eq!(store.read().as_deref(), Some("new.tok.en"));
    }

    #[test]
    fn test_logout_then_check() {
        let (session, store, nav) = session_with(MemoryTokenStore::new(), Screen::Instances);
        session.login("x.y.z").unwrap();

        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(store.read(), None);
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_forced_logout_navigates_to_login() {
        let (session, store, nav) = session_with(MemoryTokenStore::new(), Screen::Instances);
        session.login("x.y.z").unwrap();

        assert!(session.forced_logout());

        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(store.read(), None);
        assert_eq!(nav.history(), vec![Screen::Login]);
    }

    #[test]
    fn test_forced_logout_on_login_screen_does_not_navigate() {
        let (session, store, nav) =
            session_with(MemoryTokenStore::with_token("x.y.z"), Screen::Login);

        assert!(!session.forced_logout());

        assert_eq!(store.read(), None);
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_subscribers_see_transitions_immediately() {
        let (session, _, _) = session_with(MemoryTokenStore::new(), Screen::Login);
        let mut rx = session.subscribe();

        session.login("x.y.z").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Authenticated);

        session.forced_logout();
        assert_eq!(*rx.borrow_and_update(), SessionState::Unauthenticated);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_forced_logouts_navigate_once() {
        let (session, store, nav) = session_with(MemoryTokenStore::new(), Screen::Instances);
        session.login("x.y.z").unwrap();
        let session = Arc::new(session);

        let mut rx = session.subscribe();
        rx.borrow_and_update();
        let changes = tokio::spawn(async move {
            let mut seen = 0;
            while tokio::time::timeout(Duration::from_millis(200), rx.changed())
                .await
                .is_ok_and(|r| r.is_ok())
            {
                rx.borrow_and_update();
                seen += 1;
            }
            seen
        });

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let s = session.clone();
                tokio::spawn(async move { s.forced_logout() })
            })
            .collect();

        let mut navigations = 0;
        for handle in handles {
            if handle.await.unwrap() {
                navigations += 1;
            }
        }

        assert_eq!(navigations, 1);
        assert_eq!(nav.history(), vec![Screen::Login]);
        assert_eq!(store.read(), None);
        assert!(!session.is_authenticated());
        assert_eq!(changes.await.unwrap(), 1);
    }

    #[test]
    fn test_repeated_forced_logout_publishes_once() {
        let (session, _, _) = session_with(MemoryTokenStore::new(), Screen::Instances);
        session.login("x.y.z").unwrap();
        let mut rx = session.subscribe();
        rx.borrow_and_update();

        session.forced_logout();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Unauthenticated);

        session.forced_logout();
        assert!(!rx.has_changed().unwrap());
    }
}
