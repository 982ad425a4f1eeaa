//! Session token service. Every place that needs the bearer token, or needs to
//! drop it, goes through [`Session`]; nothing else touches token storage. The
//! API client calls [`Session::intercept`] on every response so a 401 from any
//! endpoint tears the session down exactly once. Views subscribe to session
//! events instead of reloading the page.
//!
//! The token is opaque and must never be logged.

use super::errors::AppError;
use std::{cell::RefCell, fmt, rc::Rc};
use tracing::{debug, info};

/// Persistent storage for the session token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn remove(&self);
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user signed out.
    Logout,
    /// The server rejected the token.
    Unauthenticated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut(SignOutReason),
}

type Listener = Rc<dyn Fn(SessionEvent)>;

struct Inner {
    store: Box<dyn TokenStore>,
    listeners: RefCell<Vec<Listener>>,
}

/// Shared handle to the process-wide session. Cloning is cheap and every clone
/// sees the same token and listeners.
#[derive(Clone)]
pub struct Session {
    inner: Rc<Inner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                store: Box::new(store),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Current token; blank stored values count as absent.
    pub fn token(&self) -> Option<String> {
        self.inner
            .store
            .load()
            .filter(|token| !token.trim().is_empty())
    }

    /// True iff a token is stored. Does not validate it with the server.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persists a freshly issued token and notifies subscribers.
    pub fn set_token(&self, token: &str) -> Result<(), AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Parse(
                "The server did not return a session token.".to_string(),
            ));
        }

        self.inner.store.save(token);
        info!("session established");
        self.notify(SessionEvent::SignedIn);
        Ok(())
    }

    /// Removes the token. Returns `false`, without notifying, when no usable
    /// token was stored; a blank leftover value is still wiped.
    pub fn clear_token(&self, reason: SignOutReason) -> bool {
        let Some(stored) = self.inner.store.load() else {
            debug!(?reason, "session already cleared");
            return false;
        };

        self.inner.store.remove();
        if stored.trim().is_empty() {
            debug!(?reason, "removed blank session token");
            return false;
        }
        info!(?reason, "session cleared");
        self.notify(SessionEvent::SignedOut(reason));
        true
    }

    /// Registers a listener for sign-in and sign-out events.
    pub fn subscribe(&self, listener: impl Fn(SessionEvent) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Registers a listener that only fires when the server rejected the token.
    pub fn on_unauthenticated(&self, listener: impl Fn() + 'static) {
        self.subscribe(move |event| {
            if event == SessionEvent::SignedOut(SignOutReason::Unauthenticated) {
                listener();
            }
        });
    }

    /// Applies the teardown rule to a response: an unauthenticated error clears
    /// the session before the error is handed back to the caller.
    pub fn intercept<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(err) = &result
            && err.is_unauthenticated()
            && !self.clear_token(SignOutReason::Unauthenticated)
        {
            debug!("unauthenticated response without a stored session");
        }
        result
    }

    fn notify(&self, event: SessionEvent) {
        // Listeners may subscribe or touch the session while running.
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

/// In-memory token store used by tests. Counts writes so callers can assert the
/// token was persisted exactly once.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
    saves: Rc<std::cell::Cell<usize>>,
    removals: Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub(crate) fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.borrow_mut() = Some(token.to_string());
        store
    }

    pub(crate) fn saves(&self) -> usize {
        self.saves.get()
    }

    pub(crate) fn removals(&self) -> usize {
        self.removals.get()
    }

    pub(crate) fn stored(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        self.saves.set(self.saves.get() + 1);
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        self.removals.set(self.removals.get() + 1);
        *self.token.borrow_mut() = None;
    }
}

/// Token store backed by `window.localStorage`, shared by all tabs.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageTokenStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(&self.key, token).is_err() {
                    tracing::warn!("failed to persist session token");
                }
            }
            None => tracing::warn!("local storage unavailable; session will not persist"),
        }
    }

    fn remove(&self) {
        if let Some(storage) = Self::storage()
            && storage.remove_item(&self.key).is_err()
        {
            tracing::warn!("failed to remove session token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryTokenStore, Session, SessionEvent, SignOutReason};
    use crate::app_lib::errors::AppError;
    use std::{cell::RefCell, rc::Rc};

    fn recorder(session: &Session) -> Rc<RefCell<Vec<SessionEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |event| sink.borrow_mut().push(event));
        events
    }

    #[test]
    fn blank_stored_token_is_not_authenticated() {
        let session = Session::new(MemoryTokenStore::with_token("   "));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn set_token_persists_and_notifies() {
        let store = MemoryTokenStore::default();
        let session = Session::new(store.clone());
        let events = recorder(&session);

        session.set_token("abc").expect("token accepted");

        assert!(session.is_authenticated());
        assert_eq!(store.stored().as_deref(), Some("abc"));
        assert_eq!(store.saves(), 1);
        assert_eq!(*events.borrow(), vec![SessionEvent::SignedIn]);
    }

    #[test]
    fn set_token_rejects_empty_tokens() {
        let store = MemoryTokenStore::default();
        let session = Session::new(store.clone());

        assert!(session.set_token("  ").is_err());
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn unauthenticated_response_clears_once() {
        let store = MemoryTokenStore::with_token("abc");
        let session = Session::new(store.clone());
        let events = recorder(&session);
        let fired = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fired);
        session.on_unauthenticated(move || *counter.borrow_mut() += 1);

        let first: Result<(), AppError> = session.intercept(Err(AppError::from_response(401, "")));
        let second: Result<(), AppError> =
            session.intercept(Err(AppError::from_response(401, "")));

        assert!(first.is_err());
        assert!(second.is_err());
        assert!(!session.is_authenticated());
        assert_eq!(store.removals(), 1);
        assert_eq!(*fired.borrow(), 1);
        assert_eq!(
            *events.borrow(),
            vec![SessionEvent::SignedOut(SignOutReason::Unauthenticated)]
        );
    }

    #[test]
    fn other_errors_leave_session_alone() {
        let store = MemoryTokenStore::with_token("abc");
        let session = Session::new(store.clone());

        for status in [403, 404, 500] {
            let result: Result<(), AppError> =
                session.intercept(Err(AppError::from_response(status, "")));
            assert!(result.is_err());
        }
        let _ = session.intercept::<()>(Err(AppError::Network("offline".to_string())));

        assert!(session.is_authenticated());
        assert_eq!(store.removals(), 0);
    }

    #[test]
    fn logout_reports_reason() {
        let session = Session::new(MemoryTokenStore::with_token("abc"));
        let events = recorder(&session);

        assert!(session.clear_token(SignOutReason::Logout));
        assert!(!session.clear_token(SignOutReason::Logout));

        assert_eq!(
            *events.borrow(),
            vec![SessionEvent::SignedOut(SignOutReason::Logout)]
        );
    }

    #[test]
    fn clearing_blank_token_wipes_storage_silently() {
        let store = MemoryTokenStore::with_token("   ");
        let session = Session::new(store.clone());
        let events = recorder(&session);

        assert!(!session.clear_token(SignOutReason::Logout));

        assert_eq!(store.removals(), 1);
        assert_eq!(store.stored(), None);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let session = Session::new(MemoryTokenStore::default());
        let other = session.clone();

        session.set_token("abc").expect("token accepted");
        assert!(other.is_authenticated());
    }
}
