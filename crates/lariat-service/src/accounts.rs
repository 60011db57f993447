use crate::error::{store_error, ServiceError};
use lariat_core::{Clock, SystemClock, User, UserStore};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Parameters for registering a new account.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Service owning registration and login.
///
/// Credentials are compared in plaintext, matching the system this
/// replaces; see DESIGN.md.
pub struct AccountService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for AccountService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: UserStore> AccountService<S> {
    /// Creates a service backed by the wall clock.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a service with an explicit clock.
    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Registers a new user and returns the generated user id.
    ///
    /// The store's unique email constraint is the arbiter for duplicate
    /// registrations.
    pub async fn register(&self, params: RegisterParams) -> Result<String, ServiceError> {
        let user_id = Uuid::new_v4().to_string();
        let user = User {
            user_id: user_id.clone(),
            name: params.name,
            email: params.email,
            password: params.password,
            created_at: self.clock.now(),
        };

        self.store.insert_user(user).await.map_err(store_error)?;

        debug!(user_id = %user_id, "user registered");
        Ok(user_id)
    }

    /// Returns the id of the user matching the credentials, or `None`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<String>, ServiceError> {
        self.store
            .find_by_credentials(email, password)
            .await
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lariat_storage::MemoryStore;

    fn service() -> AccountService<MemoryStore> {
        AccountService::new(Arc::new(MemoryStore::new()))
    }

    fn params(email: &str) -> RegisterParams {
        RegisterParams {
            name: "Test".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let service = service();

        let user_id = service.register(params("a@b.c")).await.unwrap();

        let found = service.login("a@b.c", "hunter2").await.unwrap();
        assert_eq!(found, Some(user_id));
    }

    #[tokio::test]
    async fn register_generates_distinct_ids() {
        let service = service();

        let first = service.register(params("a@b.c")).await.unwrap();
        let second = service.register(params("x@y.z")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_conflict() {
        let service = service();

        service.register(params("a@b.c")).await.unwrap();
        let err = service.register(params("a@b.c")).await.unwrap_err();
        assert_eq!(err.to_string(), "Email already in use");
    }

    #[tokio::test]
    async fn wrong_password_yields_none() {
        let service = service();

        service.register(params("a@b.c")).await.unwrap();
        assert!(service.login("a@b.c", "wrong").await.unwrap().is_none());
        assert!(service.login("ghost@b.c", "hunter2").await.unwrap().is_none());
    }
}
