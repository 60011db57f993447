use crate::error::{store_error, ServiceError};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp};
use lariat_core::{
    classify, expiration_label, Alias, Clock, LinkEntry, LinkStatus, LinkStore, SystemClock, User,
    UserStore, EXPIRY_DAYS,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of an alias lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No entry for this alias; the caller redirects home.
    NotFound,
    /// The entry exists but is past its window; the caller redirects to
    /// the view page instead of the target, and no visit is counted.
    Expired,
    /// Live or eternal; the caller redirects to the target URL.
    Resolved(String),
}

/// Validated-at-the-boundary parameters for creating a short link.
#[derive(Debug, Clone)]
pub struct CreateLinkParams {
    pub creator: String,
    pub url: String,
    pub alias: String,
    pub permanent: bool,
}

/// A link plus its expiration label, for the view page.
#[derive(Debug, Clone)]
pub struct LinkView {
    pub entry: LinkEntry,
    pub expiration: String,
}

/// One dashboard row: the entry, its display URL, and expiration label.
#[derive(Debug, Clone)]
pub struct DashboardRow {
    pub entry: LinkEntry,
    pub display_url: String,
    pub expiration: String,
}

/// Everything the dashboard page needs for one user.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: User,
    pub rows: Vec<DashboardRow>,
}

/// Service owning the link lifecycle.
///
/// Wraps a store handle and a clock. The clock is injected so the
/// time-dependent paths (classification, sweep thresholds) are testable
/// without waiting seven days.
pub struct LinkService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for LinkService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: LinkStore + UserStore> LinkService<S> {
    /// Creates a service backed by the wall clock.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a service with an explicit clock.
    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Creates a new short link after running the creation-time checks.
    ///
    /// Checks run in order, short-circuiting at the first failure: alias
    /// shape (charset, length, reserved set), owner existence, URL shape,
    /// alias availability. The store's uniqueness constraint remains the
    /// final arbiter under racing creates. Success is only reported after
    /// the insert is confirmed.
    pub async fn create(&self, params: CreateLinkParams) -> Result<Alias, ServiceError> {
        let alias = Alias::new(params.alias)?;

        if self
            .store
            .find_by_id(&params.creator)
            .await
            .map_err(store_error)?
            .is_none()
        {
            return Err(ServiceError::OwnerNotFound);
        }

        if !looks_like_http_url(&params.url) {
            return Err(ServiceError::InvalidUrl);
        }

        if self.store.get(&alias).await.map_err(store_error)?.is_some() {
            return Err(ServiceError::DuplicateAlias);
        }

        let entry = LinkEntry::new(
            alias.clone(),
            params.creator,
            params.url,
            params.permanent,
            self.clock.now(),
        );
        self.store.insert(entry).await.map_err(store_error)?;

        debug!(alias = %alias, "short link created");
        Ok(alias)
    }

    /// Resolves an alias to its redirect outcome.
    ///
    /// A successful resolution bumps the visit counter, but an increment
    /// failure is logged and swallowed: the redirect must still happen.
    pub async fn resolve(&self, alias: &Alias) -> Result<Resolution, ServiceError> {
        let Some(entry) = self.store.get(alias).await.map_err(store_error)? else {
            return Ok(Resolution::NotFound);
        };

        match classify(&entry, self.clock.now()) {
            LinkStatus::Expired => Ok(Resolution::Expired),
            LinkStatus::Live | LinkStatus::Eternal => {
                if let Err(err) = self.store.increment_visits(alias).await {
                    warn!(alias = %alias, error = %err, "visit increment failed, redirecting anyway");
                }
                Ok(Resolution::Resolved(entry.url))
            }
        }
    }

    /// Fetches a link and its expiration label for the view page.
    /// No side effects; expired entries are still viewable until swept.
    pub async fn view(&self, alias: &Alias) -> Result<Option<LinkView>, ServiceError> {
        let Some(entry) = self.store.get(alias).await.map_err(store_error)? else {
            return Ok(None);
        };

        let expiration = expiration_label(&entry, self.clock.now());
        Ok(Some(LinkView { entry, expiration }))
    }

    /// Assembles the dashboard for a user, or `None` if the user does not
    /// exist (the caller redirects to the login page).
    pub async fn dashboard(&self, user_id: &str) -> Result<Option<Dashboard>, ServiceError> {
        let Some(user) = self.store.find_by_id(user_id).await.map_err(store_error)? else {
            return Ok(None);
        };

        let now = self.clock.now();
        let rows = self
            .store
            .list_by_owner(user_id)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(|entry| DashboardRow {
                display_url: format_display_url(&entry.url),
                expiration: expiration_label(&entry, now),
                entry,
            })
            .collect();

        Ok(Some(Dashboard { user, rows }))
    }

    /// Deletes a link. Errors with `NotFound` if the alias is absent.
    pub async fn delete(&self, alias: &Alias) -> Result<(), ServiceError> {
        if !self.store.delete(alias).await.map_err(store_error)? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    /// Purges non-permanent links past their window. Best effort: the
    /// resolution path never depends on this having run.
    pub async fn sweep(&self) -> Result<u64, ServiceError> {
        let threshold = self
            .clock
            .now()
            .to_zoned(TimeZone::UTC)
            .checked_sub(Span::new().days(EXPIRY_DAYS))
            .map(|zoned| zoned.timestamp())
            .unwrap_or(Timestamp::MIN);

        let purged = self
            .store
            .purge_expired(threshold)
            .await
            .map_err(store_error)?;
        if purged > 0 {
            debug!(purged, "swept expired links");
        }
        Ok(purged)
    }
}

/// Loose check that a string looks like an HTTP(S) host plus optional
/// path: optional lowercase scheme, a dotted host of alphanumeric/hyphen
/// labels, and a path free of whitespace.
fn looks_like_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let (host, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };

    let mut labels = host.split('.');
    let host_ok = host.matches('.').count() >= 1
        && labels.all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    host_ok && !path.chars().any(char::is_whitespace)
}

/// Dashboard display form of a target URL: `https://` stripped, trailing
/// slash dropped, truncated to 30 characters with an ellipsis.
fn format_display_url(url: &str) -> String {
    let url = url.strip_prefix("https://").unwrap_or(url);
    let url = url.strip_suffix('/').unwrap_or(url);
    if url.chars().count() > 30 {
        let truncated: String = url.chars().take(30).collect();
        format!("{truncated}...")
    } else {
        url.to_string()
    }
}
