use crate::alias::Alias;
use crate::error::Result;
use crate::link::LinkEntry;
use crate::user::User;
use async_trait::async_trait;
use jiff::Timestamp;

/// Persistent store of short links.
///
/// Every operation is atomic with respect to itself; no cross-operation
/// locking is assumed. Two racing inserts for the same alias are settled
/// by the store's uniqueness constraint, which rejects the loser with
/// [`StoreError::DuplicateAlias`](crate::StoreError::DuplicateAlias).
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Persists a new entry. Fails with `DuplicateAlias` if the alias is
    /// already taken.
    async fn insert(&self, entry: LinkEntry) -> Result<()>;

    /// Retrieves the entry for an alias. Pure read, no side effect.
    async fn get(&self, alias: &Alias) -> Result<Option<LinkEntry>>;

    /// Atomically increments the visit counter by 1.
    ///
    /// Errors if the alias is absent; callers resolve the entry first and
    /// treat increment failures as non-critical.
    async fn increment_visits(&self, alias: &Alias) -> Result<()>;

    /// Removes an entry. Returns `true` if it existed.
    async fn delete(&self, alias: &Alias) -> Result<bool>;

    /// All entries owned by a user, in creation order.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<LinkEntry>>;

    /// Deletes non-permanent entries created before `threshold`, returning
    /// how many were removed.
    ///
    /// Best-effort cleanup only: resolution never depends on the sweep
    /// having run, since the expiration policy classifies stale entries
    /// independently.
    async fn purge_expired(&self, threshold: Timestamp) -> Result<u64>;
}

/// Persistent store of registered users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persists a new user. Fails with `DuplicateEmail` if the email is
    /// already registered.
    async fn insert_user(&self, user: User) -> Result<()>;

    /// Looks a user up by id.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;

    /// Returns the id of the user matching both email and password.
    async fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<String>>;
}
