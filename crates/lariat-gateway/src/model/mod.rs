pub mod account;
pub mod link;

pub use account::{AccountResponse, LoginRequest, RegisterRequest};
pub use link::{CreateLinkRequest, CreateLinkResponse, DeleteLinkResponse, HealthResponse};
