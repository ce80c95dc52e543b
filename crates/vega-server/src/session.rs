use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub const SESSION_TTL: Duration = Duration::from_secs(4 * 60 * 60);

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Clone, Copy, Debug)]
pub struct Session {
    pub issued_at: u64,
    pub expires_at: u64,
}

/// In-process admin token map. Expired tokens are dropped lazily when
/// they are next presented; there is no background sweep.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh token valid for [`SESSION_TTL`].
    pub fn issue(&self) -> (String, Session) {
        let token = Uuid::new_v4().to_string();
        let now = now_ms();
        let session = Session {
            issued_at: now,
            expires_at: now + SESSION_TTL.as_millis() as u64,
        };
        self.sessions.lock().insert(token.clone(), session);
        (token, session)
    }

    /// True when the token exists and has not expired. An expired
    /// token is removed from the map as a side effect.
    pub fn validate(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock();
        match sessions.get(token) {
            Some(s) if s.expires_at > now_ms() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    pub fn remove(&self, token: &str) -> bool {
        self.sessions.lock().remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    #[cfg(test)]
    pub fn insert_expired(&self, token: &str) {
        let now = now_ms();
        self.sessions.lock().insert(
            token.to_string(),
            Session {
                issued_at: now.saturating_sub(2),
                expires_at: now.saturating_sub(1),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_validate_until_removed() {
        let store = SessionStore::new();
        let (token, session) = store.issue();
        assert!(session.expires_at > session.issued_at);
        assert!(store.validate(&token));
        assert!(store.remove(&token));
        assert!(!store.validate(&token));
        assert!(!store.remove(&token));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let store = SessionStore::new();
        store.issue();
        assert!(!store.validate("not-a-token"));
    }

    #[test]
    fn expired_tokens_are_rejected_and_dropped() {
        let store = SessionStore::new();
        store.insert_expired("stale");
        assert_eq!(store.len(), 1);
        assert!(!store.validate("stale"));
        assert!(store.is_empty());
    }

    #[test]
    fn tokens_are_unique() {
        let store = SessionStore::new();
        let (a, _) = store.issue();
        let (b, _) = store.issue();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }
}
