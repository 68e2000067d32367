//! Per-user summarize-mode tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use teloxide::types::UserId;
use tokio::sync::Mutex;

/// Tracks which users have a pending summarize request. The next text
/// message from a pending user is summarization input, not a chat query.
pub struct ModeTracker {
    ttl: Option<Duration>,
    pending: Mutex<HashMap<UserId, Instant>>,
}

impl ModeTracker {
    /// `ttl = None` means flags never expire.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Mark the user's next text message as summarize input. Re-entering
    /// only refreshes the timestamp.
    pub async fn enter(&self, user: UserId) {
        self.pending.lock().await.insert(user, Instant::now());
    }

    /// Check-and-clear in one step: true at most once per `enter`.
    /// A flag older than the ttl is dropped and reported as not pending.
    pub async fn consume_if_pending(&self, user: UserId) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.remove(&user) {
            Some(entered) => match self.ttl {
                Some(ttl) => entered.elapsed() <= ttl,
                None => true,
            },
            None => false,
        }
    }
}
