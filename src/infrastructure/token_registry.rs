use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Issued bearer tokens and their expiry, in milliseconds since the epoch.
///
/// Entries are never removed; an expired token simply stops validating.
#[derive(Clone, Default)]
pub struct TokenRegistry {
    tokens: Arc<Mutex<HashMap<String, i64>>>,
}

impl TokenRegistry {
    pub fn new() -> Self { Self::default() }

    pub async fn insert(&self, token: String, expires_at_ms: i64) {
        self.tokens.lock().await.insert(token, expires_at_ms);
    }

    /// A token is valid strictly before its recorded expiry.
    pub async fn is_valid(&self, token: &str, now_ms: i64) -> bool {
        matches!(self.tokens.lock().await.get(token), Some(&exp) if exp > now_ms)
    }

    #[cfg(test)]
    async fn len(&self) -> usize { self.tokens.lock().await.len() }
}
