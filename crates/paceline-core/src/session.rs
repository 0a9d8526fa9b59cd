//! Login state and bearer-token lifecycle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, instrument, warn};

use crate::model::User;
use crate::store::{KeyValueStore, MemoryStore, TOKEN_KEY};
use crate::tokens::BearerToken;
use crate::Result;

/// The client's record of login status and token.
///
/// A session starts `loggedOut` unless the store already holds a token from
/// a previous run. [`Session::login`] enters `loggedIn` and persists the
/// token; [`Session::logout`] and [`Session::invalidate`] return to
/// `loggedOut` and remove it.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Every transition updates memory and the store while
/// holding the same write lock, so no reader observes one without the other.
///
/// # Example
///
/// ```
/// use paceline_core::{BearerToken, MemoryStore, Session, KeyValueStore, TOKEN_KEY};
///
/// let store = MemoryStore::new();
/// let session = Session::restore(store.clone()).unwrap();
/// session.login(BearerToken::new("T")).unwrap();
///
/// assert!(session.is_logged_in());
/// assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("T"));
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Box<dyn KeyValueStore>,
    state: RwLock<SessionState>,
}

#[derive(Default)]
struct SessionState {
    token: Option<BearerToken>,
    user_info: Option<User>,
}

impl Session {
    /// Restore a session from the persisted token, if one exists.
    ///
    /// This is a blocking read of the store and never touches the network.
    pub fn restore(store: impl KeyValueStore + 'static) -> Result<Self> {
        let token = store
            .get(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(BearerToken::new);

        debug!(logged_in = token.is_some(), "Session restored");

        Ok(Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                state: RwLock::new(SessionState {
                    token,
                    user_info: None,
                }),
            }),
        })
    }

    /// A logged-out session backed by process memory only.
    pub fn ephemeral() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(MemoryStore::new()),
                state: RwLock::new(SessionState::default()),
            }),
        }
    }

    /// Enter `loggedIn` with `token`, replacing any previous token.
    ///
    /// # Errors
    ///
    /// If the token cannot be persisted the session is left unchanged.
    #[instrument(skip_all)]
    pub fn login(&self, token: BearerToken) -> Result<()> {
        let mut state = self.write();
        self.inner.store.set(TOKEN_KEY, token.as_str())?;
        state.token = Some(token);
        state.user_info = None;
        info!("Logged in");
        Ok(())
    }

    /// Enter `loggedOut` and remove the persisted token.
    ///
    /// Memory is cleared even when the store fails; the store error is
    /// returned so the caller can report it.
    #[instrument(skip_all)]
    pub fn logout(&self) -> Result<()> {
        let mut state = self.write();
        state.token = None;
        state.user_info = None;
        self.inner.store.remove(TOKEN_KEY)?;
        info!("Logged out");
        Ok(())
    }

    /// Tear the session down after the server rejected it.
    ///
    /// Returns `true` if a token was held. A store failure is logged rather
    /// than returned, because the caller is already reporting the 401.
    pub fn invalidate(&self) -> bool {
        let mut state = self.write();
        let had_token = state.token.take().is_some();
        state.user_info = None;
        if let Err(e) = self.inner.store.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove persisted token");
        }
        if had_token {
            warn!("Session invalidated by server");
        } else {
            debug!("Server rejected an anonymous request");
        }
        had_token
    }

    /// Whether a token is held.
    pub fn is_logged_in(&self) -> bool {
        self.read().token.is_some()
    }

    /// A snapshot of the current token.
    pub fn token(&self) -> Option<BearerToken> {
        self.read().token.clone()
    }

    /// The profile last fetched for this session.
    pub fn user_info(&self) -> Option<User> {
        self.read().user_info.clone()
    }

    /// Remember the profile of the logged-in user.
    ///
    /// Ignored while logged out, so a late profile response cannot outlive
    /// a 401 that arrived first.
    pub fn set_user_info(&self, user: User) {
        let mut state = self.write();
        if state.token.is_some() {
            state.user_info = Some(user);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
