//! Application services for the lariat URL shortener.
//!
//! `LinkService` owns the link lifecycle: creation-time validation,
//! alias resolution with expiration checks, dashboard listings, deletion,
//! and the background sweep. `AccountService` owns registration and login.

pub mod accounts;
pub mod error;
pub mod links;

pub use accounts::{AccountService, RegisterParams};
pub use error::ServiceError;
pub use links::{CreateLinkParams, Dashboard, DashboardRow, LinkService, LinkView, Resolution};
