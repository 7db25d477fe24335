//! User and session storage.
//!
//! The dispatcher only reads through [`SessionStore`] and [`UserStore`].
//! [`MemoryStore`] is the in-process backend the binary runs with; the
//! login and sign-up handlers are its only writers.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Deserialize;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
    #[error("user {0:?} already exists")]
    DuplicateUser(String),
    #[error("session {0:?} points at a missing user")]
    DanglingSession(String),
}

pub trait SessionStore: Send + Sync {
    /// Resolves a session id to its user. `Ok(None)` means not logged in.
    fn user_for_session(&self, session_id: &str) -> Result<Option<User>, StoreError>;
}

pub trait UserStore: Send + Sync {
    /// All users, in registration order.
    fn all_users(&self) -> Result<Vec<User>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    sessions: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Result<Self, StoreError> {
        let store = Self::new();
        for user in users {
            store.add_user(user)?;
        }
        Ok(store)
    }

    pub fn add_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        if users.iter().any(|u| u.user_id == user.user_id) {
            return Err(StoreError::DuplicateUser(user.user_id));
        }
        tracing::info!(user_id = %user.user_id, "user registered");
        users.push(user);
        Ok(())
    }

    pub fn find_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.iter().find(|u| u.user_id == user_id).cloned())
    }

    /// Checks credentials and opens a session, returning its id.
    pub fn login(&self, user_id: &str, password: &str) -> Result<Option<String>, StoreError> {
        match self.find_user(user_id)? {
            Some(user) if user.password == password => {
                let session_id = uuid::Uuid::new_v4().to_string();
                self.sessions
                    .write()
                    .map_err(|_| StoreError::Poisoned)?
                    .insert(session_id.clone(), user.user_id);
                Ok(Some(session_id))
            }
            _ => Ok(None),
        }
    }

    pub fn session_count(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.read().map_err(|_| StoreError::Poisoned)?.len())
    }
}

impl SessionStore for MemoryStore {
    fn user_for_session(&self, session_id: &str) -> Result<Option<User>, StoreError> {
        let user_id = {
            let sessions = self.sessions.read().map_err(|_| StoreError::Poisoned)?;
            match sessions.get(session_id) {
                Some(id) => id.clone(),
                None => return Ok(None),
            }
        };

        self.find_user(&user_id)?
            .map(Some)
            .ok_or_else(|| StoreError::DanglingSession(session_id.to_string()))
    }
}

impl UserStore for MemoryStore {
    fn all_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().map_err(|_| StoreError::Poisoned)?.clone())
    }
}
