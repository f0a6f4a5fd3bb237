//! Client-held login session, mirrored into local storage

use crate::config::PortalConfig;
use crate::storage::{KeyValueStore, StorageError};
use std::cell::RefCell;
use std::rc::Rc;

/// Current user's logged-in state and API key
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub username: String,
    pub api_key: String,
    /// ISO date as sent by the backend, or empty
    pub expiry: String,
}

impl Session {
    pub fn logged_in(
        username: impl Into<String>,
        api_key: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Self {
        Self {
            logged_in: true,
            username: username.into(),
            api_key: api_key.into(),
            expiry: expiry.into(),
        }
    }

    /// API key usable for authenticated calls
    pub fn active_key(&self) -> Option<&str> {
        Some(self.api_key.as_str()).filter(|key| self.logged_in && !key.is_empty())
    }
}

type Listener = Rc<dyn Fn(&Session)>;

/// Observable session store.
///
/// Memory and the four `session_*` storage slots are updated in the same call, so they
/// agree after every mutation. Listeners run after the update with the new session.
pub struct SessionStore<S> {
    storage: S,
    current: RefCell<Session>,
    listeners: RefCell<Vec<Listener>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create an empty, logged-out store. Call [`Self::load_session`] to hydrate it.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: RefCell::new(Session::default()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of the in-memory session
    pub fn session(&self) -> Session {
        self.current.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().logged_in
    }

    /// Persisted expiry, read straight from storage
    pub fn stored_expiry(&self) -> Option<String> {
        self.storage
            .get(PortalConfig::EXPIRY_KEY)
            .filter(|expiry| !expiry.is_empty())
    }

    /// Register a callback run after every mutation
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Replace the session wholesale.
    ///
    /// A logged-in session is written to all four storage slots. A logged-out one resets
    /// memory to the empty session and removes exactly those four slots.
    pub fn set_session(&self, session: Session) -> Result<(), StorageError> {
        let session = if session.logged_in {
            session
        } else {
            Session::default()
        };
        *self.current.borrow_mut() = session.clone();

        let persisted = if session.logged_in {
            self.write_all(&session)
        } else {
            for key in PortalConfig::SESSION_KEYS {
                self.storage.remove(key);
            }
            Ok(())
        };

        self.notify(&session);
        persisted
    }

    /// Log out locally
    pub fn clear(&self) -> Result<(), StorageError> {
        self.set_session(Session::default())
    }

    /// Hydrate memory from storage. Only the literal flag `"true"` counts as logged in.
    pub fn load_session(&self) -> Session {
        let session = if self.storage.get(PortalConfig::LOGGED_IN_KEY).as_deref() == Some("true")
        {
            let read = |key: &str| self.storage.get(key).unwrap_or_default();
            Session::logged_in(
                read(PortalConfig::USERNAME_KEY),
                read(PortalConfig::API_KEY_KEY),
                read(PortalConfig::EXPIRY_KEY),
            )
        } else {
            Session::default()
        };

        tracing::debug!(logged_in = session.logged_in, "session hydrated");
        *self.current.borrow_mut() = session.clone();
        self.notify(&session);
        session
    }

    fn write_all(&self, session: &Session) -> Result<(), StorageError> {
        let values = [
            (PortalConfig::LOGGED_IN_KEY, "true"),
            (PortalConfig::USERNAME_KEY, session.username.as_str()),
            (PortalConfig::API_KEY_KEY, session.api_key.as_str()),
            (PortalConfig::EXPIRY_KEY, session.expiry.as_str()),
        ];

        // Attempt every slot so one failure does not leave the rest stale
        let mut first_error = None;
        for (key, value) in values {
            if let Err(e) = self.storage.set(key, value) {
                tracing::warn!(key, error = %e, "failed to persist session slot");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn notify(&self, session: &Session) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(session);
        }
    }
}
