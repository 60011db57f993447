//! Core types and traits for the lariat URL shortener.
//!
//! This crate provides the domain model (aliases, link entries, users),
//! the expiration policy, and the store contracts shared by the service
//! layer and the storage backends.

pub mod alias;
pub mod clock;
pub mod error;
pub mod expiry;
pub mod link;
pub mod store;
pub mod user;

pub use alias::{Alias, AliasError, RESERVED_ALIASES};
pub use clock::{Clock, SystemClock};
pub use error::StoreError;
pub use expiry::{classify, expiration_label, expires_at, LinkStatus, EXPIRY_DAYS};
pub use link::LinkEntry;
pub use store::{LinkStore, UserStore};
pub use user::User;
