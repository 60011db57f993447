use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use lariat_core::error::Result;
use lariat_core::{Alias, LinkEntry, LinkStore, StoreError, User, UserStore};

/// In-memory implementation of the store traits using DashMap.
///
/// DashMap's sharded locks allow concurrent operations on different
/// aliases without blocking each other, which matches the one-statement-
/// at-a-time atomicity the store contract asks for.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    links: DashMap<String, LinkEntry>,
    users: DashMap<String, User>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert(&self, entry: LinkEntry) -> Result<()> {
        use dashmap::mapref::entry::Entry;

        // The map entry is the uniqueness arbiter: occupied means a racing
        // insert already won, expired or not.
        match self.links.entry(entry.alias.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateAlias(entry.alias.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    async fn get(&self, alias: &Alias) -> Result<Option<LinkEntry>> {
        Ok(self.links.get(alias.as_str()).map(|e| e.clone()))
    }

    async fn increment_visits(&self, alias: &Alias) -> Result<()> {
        let Some(mut entry) = self.links.get_mut(alias.as_str()) else {
            return Err(StoreError::Operation(format!(
                "no such alias: {}",
                alias
            )));
        };
        entry.visits += 1;
        Ok(())
    }

    async fn delete(&self, alias: &Alias) -> Result<bool> {
        Ok(self.links.remove(alias.as_str()).is_some())
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<LinkEntry>> {
        let mut entries: Vec<LinkEntry> = self
            .links
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.clone())
            .collect();
        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.alias.as_str().cmp(b.alias.as_str()))
        });
        Ok(entries)
    }

    async fn purge_expired(&self, threshold: Timestamp) -> Result<u64> {
        use std::sync::atomic::{AtomicU64, Ordering};

        // Counted inside the closure: `retain` walks shards one at a time,
        // so a concurrent insert can grow the map mid-sweep and a
        // before/after length diff would be wrong (or underflow).
        let purged = AtomicU64::new(0);
        self.links.retain(|_, entry| {
            let keep = entry.permanent || entry.created_at >= threshold;
            if !keep {
                purged.fetch_add(1, Ordering::Relaxed);
            }
            keep
        });
        Ok(purged.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<()> {
        use dashmap::mapref::entry::Entry;

        if self.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        match self.users.entry(user.user_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Operation(format!(
                "user id already exists: {}",
                user.user_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.users.get(user_id).map(|u| u.clone()))
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<String>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| u.user_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn alias(s: &str) -> Alias {
        Alias::new_unchecked(s)
    }

    fn entry(a: &str, owner: &str, permanent: bool, created_at: Timestamp) -> LinkEntry {
        LinkEntry::new(alias(a), owner, "https://example.com", permanent, created_at)
    }

    fn user(id: &str, email: &str) -> User {
        User {
            user_id: id.to_string(),
            name: "Test".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = MemoryStore::new();
        let now = Timestamp::now();

        store.insert(entry("abc", "u1", false, now)).await.unwrap();

        let got = store.get(&alias("abc")).await.unwrap().unwrap();
        assert_eq!(got.url, "https://example.com");
        assert_eq!(got.visits, 0);
        assert_eq!(got.created_at, now);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = MemoryStore::new();
        assert!(store.get(&alias("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_existing_entry() {
        let store = MemoryStore::new();
        let now = Timestamp::now();

        store.insert(entry("abc", "u1", false, now)).await.unwrap();

        let mut second = entry("abc", "u2", true, now);
        second.url = "https://other.com".to_string();
        let err = store.insert(second).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateAlias(_)));

        let got = store.get(&alias("abc")).await.unwrap().unwrap();
        assert_eq!(got.url, "https://example.com");
        assert_eq!(got.user_id, "u1");
    }

    #[tokio::test]
    async fn expired_entry_still_readable_until_swept() {
        let store = MemoryStore::new();
        let old = Timestamp::now() - SignedDuration::from_hours(24 * 30);

        store.insert(entry("old", "u1", false, old)).await.unwrap();

        // The store serves stale rows as-is; expiry is the policy's job.
        assert!(store.get(&alias("old")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn increment_visits() {
        let store = MemoryStore::new();
        store
            .insert(entry("abc", "u1", false, Timestamp::now()))
            .await
            .unwrap();

        store.increment_visits(&alias("abc")).await.unwrap();
        store.increment_visits(&alias("abc")).await.unwrap();

        let got = store.get(&alias("abc")).await.unwrap().unwrap();
        assert_eq!(got.visits, 2);
    }

    #[tokio::test]
    async fn increment_absent_alias_errors() {
        let store = MemoryStore::new();
        assert!(store.increment_visits(&alias("nope")).await.is_err());
    }

    #[tokio::test]
    async fn delete_existing_and_absent() {
        let store = MemoryStore::new();
        store
            .insert(entry("abc", "u1", false, Timestamp::now()))
            .await
            .unwrap();

        assert!(store.delete(&alias("abc")).await.unwrap());
        assert!(!store.delete(&alias("abc")).await.unwrap());
        assert!(store.get(&alias("abc")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_by_owner_in_creation_order() {
        let store = MemoryStore::new();
        let base = Timestamp::now();

        store
            .insert(entry("second", "u1", false, base + SignedDuration::from_secs(10)))
            .await
            .unwrap();
        store.insert(entry("first", "u1", false, base)).await.unwrap();
        store
            .insert(entry("other", "u2", false, base))
            .await
            .unwrap();

        let links = store.list_by_owner("u1").await.unwrap();
        let aliases: Vec<&str> = links.iter().map(|e| e.alias.as_str()).collect();
        assert_eq!(aliases, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn purge_removes_only_stale_non_permanent() {
        let store = MemoryStore::new();
        let now = Timestamp::now();
        let old = now - SignedDuration::from_hours(24 * 30);

        store.insert(entry("stale", "u1", false, old)).await.unwrap();
        store.insert(entry("eternal", "u1", true, old)).await.unwrap();
        store.insert(entry("fresh", "u1", false, now)).await.unwrap();

        let purged = store.purge_expired(now - SignedDuration::from_hours(24 * 7)).await.unwrap();
        assert_eq!(purged, 1);

        assert!(store.get(&alias("stale")).await.unwrap().is_none());
        assert!(store.get(&alias("eternal")).await.unwrap().is_some());
        assert!(store.get(&alias("fresh")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn purge_count_is_exact_with_concurrent_inserts() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let now = Timestamp::now();
        let old = now - SignedDuration::from_hours(24 * 30);

        for i in 0..5 {
            store
                .insert(entry(&format!("stale-{i}"), "u1", false, old))
                .await
                .unwrap();
        }

        // Fresh inserts racing the sweep may land mid-retain and grow the
        // map, but they must never distort the purged count.
        let threshold = now - SignedDuration::from_hours(24 * 7);
        let mut writers = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            writers.push(tokio::spawn(async move {
                store
                    .insert(entry(&format!("fresh-{i:02}"), "u1", false, Timestamp::now()))
                    .await
                    .unwrap();
            }));
        }
        let sweeper = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.purge_expired(threshold).await.unwrap() })
        };

        for writer in writers {
            writer.await.unwrap();
        }
        assert_eq!(sweeper.await.unwrap(), 5);
        assert_eq!(store.list_by_owner("u1").await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let store = MemoryStore::new();

        store.insert_user(user("u1", "a@b.c")).await.unwrap();
        let err = store.insert_user(user("u2", "a@b.c")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn credentials_must_match_both_fields() {
        let store = MemoryStore::new();
        store.insert_user(user("u1", "a@b.c")).await.unwrap();

        let found = store.find_by_credentials("a@b.c", "hunter2").await.unwrap();
        assert_eq!(found.as_deref(), Some("u1"));

        assert!(store
            .find_by_credentials("a@b.c", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_credentials("x@b.c", "hunter2")
            .await
            .unwrap()
            .is_none());
    }
}
