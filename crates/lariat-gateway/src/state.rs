use std::sync::Arc;

use lariat_core::{Clock, LinkStore, UserStore};
use lariat_service::{AccountService, LinkService};

/// Shared handler state: the two services over one store handle, plus the
/// public base URL used when rendering full short links.
pub struct AppState<S> {
    pub links: LinkService<S>,
    pub accounts: AccountService<S>,
    pub base_url: String,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            links: self.links.clone(),
            accounts: self.accounts.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<S: LinkStore + UserStore> AppState<S> {
    pub fn new(store: Arc<S>, public_base_url: impl Into<String>) -> Self {
        Self {
            links: LinkService::new(Arc::clone(&store)),
            accounts: AccountService::new(store),
            base_url: public_base_url.into(),
        }
    }

    /// State with an explicit clock, for time-travel tests.
    pub fn with_clock(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            links: LinkService::with_clock(Arc::clone(&store), Arc::clone(&clock)),
            accounts: AccountService::with_clock(store, clock),
            base_url: public_base_url.into(),
        }
    }
}
