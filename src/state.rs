//! Session arena for the script host.
//!
//! Cipher and hash sessions live here between script statements and are
//! addressed by numeric handles. Handles are never reused, so a stale handle
//! can only ever miss. Every operation takes `&mut self`: a store belongs to
//! one script execution and must be wrapped in a lock before it is shared.

use std::collections::HashMap;

use crate::crypto::{CipherSession, HashSession};
use crate::host::error::{HostError, HostResult};

/// Opaque session handle handed to scripts.
pub type SessionId = u64;

/// A live session owned by the store.
#[derive(Debug)]
pub enum Session {
    Cipher(CipherSession),
    Hash(HashSession),
}

impl Session {
    fn kind(&self) -> &'static str {
        match self {
            Session::Cipher(_) => "cipher",
            Session::Hash(_) => "hash",
        }
    }
}

/// Arena of live sessions keyed by handle.
#[derive(Debug)]
pub struct SessionStore {
    next_id: SessionId,
    sessions: HashMap<SessionId, Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            sessions: HashMap::new(),
        }
    }

    fn insert(&mut self, session: Session) -> SessionId {
        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(id, session);
        id
    }

    pub fn insert_cipher(&mut self, session: CipherSession) -> SessionId {
        self.insert(Session::Cipher(session))
    }

    pub fn insert_hash(&mut self, session: HashSession) -> SessionId {
        self.insert(Session::Hash(session))
    }

    fn missing(handle: SessionId) -> HostError {
        HostError::InvalidHandle {
            handle,
            reason: "no live session (never created, released, or already digested)"
                .to_string(),
        }
    }

    fn wrong_kind(handle: SessionId, expected: &str, found: &str) -> HostError {
        HostError::InvalidHandle {
            handle,
            reason: format!("expected a {} session, found a {} session", expected, found),
        }
    }

    /// Borrow a cipher session for `update`.
    pub fn cipher_mut(&mut self, handle: SessionId) -> HostResult<&mut CipherSession> {
        match self.sessions.get_mut(&handle) {
            Some(Session::Cipher(cipher)) => Ok(cipher),
            Some(other) => Err(Self::wrong_kind(handle, "cipher", other.kind())),
            None => Err(Self::missing(handle)),
        }
    }

    /// Borrow a hash session for `write`.
    pub fn hash_mut(&mut self, handle: SessionId) -> HostResult<&mut HashSession> {
        match self.sessions.get_mut(&handle) {
            Some(Session::Hash(hash)) => Ok(hash),
            Some(other) => Err(Self::wrong_kind(handle, "hash", other.kind())),
            None => Err(Self::missing(handle)),
        }
    }

    /// Remove a hash session for finalization.
    ///
    /// A handle of the wrong kind is left in place.
    pub fn take_hash(&mut self, handle: SessionId) -> HostResult<HashSession> {
        match self.sessions.remove(&handle) {
            Some(Session::Hash(hash)) => Ok(hash),
            Some(other) => {
                let err = Self::wrong_kind(handle, "hash", other.kind());
                self.sessions.insert(handle, other);
                Err(err)
            }
            None => Err(Self::missing(handle)),
        }
    }

    /// Drop a session. Returns whether one existed.
    pub fn release(&mut self, handle: SessionId) -> bool {
        self.sessions.remove(&handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
