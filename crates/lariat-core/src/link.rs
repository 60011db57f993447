use crate::alias::Alias;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored short link.
///
/// `visits` starts at 0 and only ever increases; `created_at` is set once
/// at creation. Whether the entry has expired is derived from
/// `created_at` and `permanent` by the expiration policy, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// The unique alias identifying this link.
    pub alias: Alias,
    /// Id of the owning user. A weak reference used for dashboard lookup,
    /// not ownership: deleting a user does not cascade here.
    pub user_id: String,
    /// The target URL the alias redirects to.
    pub url: String,
    /// Permanent links are exempt from the 7-day expiration.
    pub permanent: bool,
    /// Number of successful resolutions.
    pub visits: i64,
    /// When the link was created.
    pub created_at: Timestamp,
}

impl LinkEntry {
    /// Creates a fresh entry with a zeroed visit counter.
    pub fn new(
        alias: Alias,
        user_id: impl Into<String>,
        url: impl Into<String>,
        permanent: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            alias,
            user_id: user_id.into(),
            url: url.into(),
            permanent,
            visits: 0,
            created_at,
        }
    }
}
