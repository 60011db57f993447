mod accounts;
mod health;
mod links;
mod pages;

pub use accounts::{login_handler, register_handler};
pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, redirect_handler};
pub use pages::{dashboard_handler, home_handler, login_page_handler, view_link_handler};
