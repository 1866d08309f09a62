//! User store module
//!
//! In-memory user records guarded by a reader/writer lock.
//! Every public operation takes a scoped guard and hands back owned copies,
//! so callers never hold the lock while serializing or writing to a socket.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A single user record
///
/// Missing fields decode to empty strings, so a body without `id` lands at
/// the empty key.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Concurrency-safe user store
pub struct Store {
    users: RwLock<HashMap<String, User>>,
}

impl Store {
    /// Create a store pre-populated with `(key, user)` pairs.
    ///
    /// Seed keys are taken as given and may differ from the record's `id`.
    pub fn new<I, K>(seed: I) -> Self
    where
        I: IntoIterator<Item = (K, User)>,
        K: Into<String>,
    {
        let users = seed
            .into_iter()
            .map(|(key, user)| (key.into(), user))
            .collect();

        Self {
            users: RwLock::new(users),
        }
    }

    /// Copy every record out of the store (order unspecified)
    pub async fn snapshot(&self) -> Vec<User> {
        let users = self.users.read().await;
        users.values().cloned().collect()
    }

    /// Look up a record by exact key
    pub async fn get(&self, key: &str) -> Option<User> {
        let users = self.users.read().await;
        users.get(key).cloned()
    }

    /// Insert or overwrite the record stored at `user.id`
    pub async fn put(&self, user: User) {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(std::iter::empty::<(String, User)>())
    }
}
