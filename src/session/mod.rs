// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Session state shared by everything that issues authenticated requests.
//!
//! The user id and token always move together: the store holds a whole
//! `Option<Session>` behind one lock, so a reader sees either the previous
//! session, the new one, or none, never a mix.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::core::errors::ClientError;

/// Authenticated identity returned by a successful login
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
}

impl Session {
    pub fn new(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Holds the current session, if any. Starts unauthenticated.
#[derive(Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the current session
    pub fn set(&self, user_id: i64, token: impl Into<String>) -> Result<(), ClientError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ClientError::InvalidSession(
                "session token must not be empty".to_string(),
            ));
        }

        // A poisoned lock still holds a whole Option<Session>.
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Session { user_id, token });
        debug!(user_id, "Session stored");
        Ok(())
    }

    /// Snapshot of the current session
    pub fn get(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop the current session (logout)
    pub fn clear(&self) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = guard.take() {
            debug!(user_id = previous.user_id, "Session cleared");
        }
    }

    /// Clear the session only if it still carries `token`.
    ///
    /// Returns true when a session was removed.
    pub fn clear_if_token(&self, token: &str) -> bool {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if !guard.as_ref().is_some_and(|current| current.token == token) {
            return false;
        }
        if let Some(previous) = guard.take() {
            debug!(user_id = previous.user_id, "Expired session cleared");
        }
        true
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.get())
            .finish()
    }
}
