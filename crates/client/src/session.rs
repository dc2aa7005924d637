//! Session and token persistence.
//!
//! A [`Session`] is created once at startup from a [`TokenStore`] and handed
//! to the [`ApiClient`](crate::ApiClient). Its lifecycle is
//! `Anonymous → Authenticated → Cleared`: tokens loaded from the store make
//! it authenticated right away, login authenticates it, and logout or a
//! failed refresh clears it and wipes the store.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use filmbudget_shared::{TokenPair, UserInfo};
use tracing::{debug, info, warn};

use crate::error::SessionError;

/// Where tokens survive between runs.
pub trait TokenStore: Send + Sync {
    /// Loads the stored pair, if any.
    fn load(&self) -> Result<Option<TokenPair>, SessionError>;

    /// Replaces the stored pair.
    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError>;

    /// Removes the stored pair.
    fn clear(&self) -> Result<(), SessionError>;
}

/// JSON token file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_vec_pretty(tokens)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Process-local store, used in tests and for one-shot commands.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `tokens`.
    #[must_use]
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionError> {
        Ok(self
            .tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No tokens were found at startup.
    Anonymous,
    /// Tokens are available.
    Authenticated,
    /// Tokens were dropped by logout or a failed refresh.
    Cleared,
}

#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    tokens: Option<TokenPair>,
    user: Option<UserInfo>,
}

/// Authentication state shared by every API call.
pub struct Session {
    store: Box<dyn TokenStore>,
    inner: RwLock<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("inner", &self.inner).finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session from whatever `store` holds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn init(store: impl TokenStore + 'static) -> Result<Self, SessionError> {
        let tokens = store.load()?;
        let state = if tokens.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        debug!(?state, "Session initialised");

        Ok(Self {
            store: Box::new(store),
            inner: RwLock::new(SessionInner {
                state,
                tokens,
                user: None,
            }),
        })
    }

    /// Creates an anonymous session that persists nothing.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemoryTokenStore::new()),
            inner: RwLock::new(SessionInner {
                state: SessionState::Anonymous,
                tokens: None,
                user: None,
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.read(|inner| inner.state)
    }

    /// Whether requests can be authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Current access token.
    pub fn access_token(&self) -> Option<String> {
        self.read(|inner| inner.tokens.as_ref().map(|t| t.access_token.clone()))
    }

    /// Current refresh token.
    pub fn refresh_token(&self) -> Option<String> {
        self.read(|inner| inner.tokens.as_ref().map(|t| t.refresh_token.clone()))
    }

    /// Signed-in user, once fetched.
    pub fn user(&self) -> Option<UserInfo> {
        self.read(|inner| inner.user.clone())
    }

    /// Stores a fresh token pair and marks the session authenticated.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the pair cannot be persisted. The in-memory
    /// session is updated regardless.
    pub fn authenticate(&self, tokens: TokenPair) -> Result<(), SessionError> {
        let saved = self.store.save(&tokens);
        self.write(|inner| {
            inner.tokens = Some(tokens);
            inner.state = SessionState::Authenticated;
        });
        info!("Session authenticated");
        saved
    }

    /// Records the signed-in user.
    pub fn set_user(&self, user: UserInfo) {
        self.write(|inner| inner.user = Some(user));
    }

    /// Drops tokens and user and wipes the store.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be cleared. The in-memory
    /// session is cleared regardless.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.write(|inner| {
            inner.tokens = None;
            inner.user = None;
            inner.state = SessionState::Cleared;
        });
        info!("Session cleared");
        self.store.clear().inspect_err(|e| {
            warn!(error = %e, "Failed to wipe token store");
        })
    }

    fn read<T>(&self, f: impl FnOnce(&SessionInner) -> T) -> T {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write(&self, f: impl FnOnce(&mut SessionInner)) {
        f(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner));
    }
}
