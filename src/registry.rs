//! Insertion-ordered mapping from origin key to policy.

use std::sync::Arc;

use crate::pattern::{self, WILDCARD};
use crate::policy::{Allowed, CorsPolicy};

/// The registered policies, keyed by origin.
///
/// Keys are literal origins, wildcard-subdomain patterns, or the bare
/// wildcard. At most one policy is live per exact key; re-registering a key
/// replaces the policy for that key only. Lookups try the exact key first
/// and then scan all keys through the pattern matcher in insertion order,
/// first match wins.
///
/// The registry is read-mostly, process-wide state: build it fully before
/// accepting traffic and share it immutably afterwards. If mutation after
/// traffic starts must be supported, wrap the whole registry in a
/// read-write lock rather than locking entries, since a miss scans the
/// whole key list.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    items: Vec<(String, Arc<CorsPolicy>)>,
}

impl PolicyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Register a policy under every one of its allowed origins, or under
    /// the wildcard key when the policy is wildcard-origin.
    pub fn add(&mut self, policy: Arc<CorsPolicy>) {
        let keys: Vec<String> = match policy.allowed_origins() {
            Allowed::Any => vec![WILDCARD.to_string()],
            Allowed::List(origins) => origins.clone(),
        };
        for key in keys {
            self.set(key, Arc::clone(&policy));
        }
    }

    /// Set a policy for one exact key, replacing any previous registration
    /// for that key.
    pub fn set(&mut self, key: impl Into<String>, policy: Arc<CorsPolicy>) {
        let key = key.into();
        self.remove(&key);
        self.items.push((key, policy));
    }

    /// Look up a policy: exact key first, then the wildcard-pattern scan in
    /// insertion order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<CorsPolicy>> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .or_else(|| self.items.iter().find(|(k, _)| pattern::matches(k, key)))
            .map(|(_, policy)| policy)
    }

    /// Determine if a key resolves, exactly or by pattern.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Determine if a key does not resolve.
    #[must_use]
    pub fn without(&self, key: &str) -> bool {
        !self.has(key)
    }

    /// Remove the policy registered under an exact key, if any.
    pub fn remove(&mut self, key: &str) {
        self.items.retain(|(k, _)| k != key);
    }

    /// All live registrations in insertion order.
    #[must_use]
    pub fn items(&self) -> &[(String, Arc<CorsPolicy>)] {
        &self.items
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The most recently inserted registration's policy.
    #[must_use]
    pub fn last(&self) -> Option<&Arc<CorsPolicy>> {
        self.items.last().map(|(_, policy)| policy)
    }

    /// Drop every registration.
    pub fn flush(&mut self) {
        self.items.clear();
    }
}
