//! HTTP gateway for the lariat URL shortener.
//!
//! Exposes the JSON API (`/api/register`, `/api/login`, `/create`,
//! `DELETE /{alias}`), the redirect path (`GET /{alias}`), and the
//! HTML view and dashboard pages.

pub mod app;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
