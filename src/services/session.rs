//! Single-use, expiring tokens that gate the calculation form.

use std::collections::HashMap;
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rand::RngCore;
use thiserror::Error;
use tracing::debug;

use super::clock::Clock;

const TOKEN_BYTES: usize = 16;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,
    #[error("Session has expired")]
    Expired,
    #[error("Form has already been used")]
    AlreadyUsed,
    #[error("Too many open form sessions, try again later")]
    Capacity,
}

#[derive(Debug, Clone)]
struct FormSession {
    expires_at: DateTime<Utc>,
    used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// What the form page needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormContext {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct FormSessionStore {
    sessions: Mutex<HashMap<String, FormSession>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    max_sessions: usize,
}

impl FormSessionStore {
    /// `max_sessions` bounds the live (unexpired) sessions held at once.
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
            ttl,
            max_sessions,
        }
    }

    pub fn issue(&self) -> Result<IssuedSession, SessionError> {
        let token = new_token();
        let now = self.clock.now();
        let expires_at = now + self.ttl;

        let mut sessions = self.sessions.lock();
        let swept = sweep(&mut sessions, now);
        if swept > 0 {
            debug!(swept, "dropped expired form sessions");
        }
        if sessions.len() >= self.max_sessions {
            return Err(SessionError::Capacity);
        }
        sessions.insert(
            token.clone(),
            FormSession {
                expires_at,
                used: false,
            },
        );

        Ok(IssuedSession { token, expires_at })
    }

    /// Consumes the token. Only the first successful call wins.
    pub fn redeem(&self, token: &str) -> Result<FormContext, SessionError> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(token).ok_or(SessionError::NotFound)?;

        if now > session.expires_at {
            return Err(SessionError::Expired);
        }
        if session.used {
            return Err(SessionError::AlreadyUsed);
        }
        session.used = true;

        Ok(FormContext {
            token: token.to_string(),
            expires_at: session.expires_at,
        })
    }

    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        sweep(&mut self.sessions.lock(), now)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sweep(sessions: &mut HashMap<String, FormSession>, now: DateTime<Utc>) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| now <= s.expires_at);
    before - sessions.len()
}

fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
