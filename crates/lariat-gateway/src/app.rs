use axum::routing::{get, post};
use axum::Router;
use lariat_core::{LinkStore, UserStore};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, dashboard_handler, delete_link_handler, health_handler, home_handler,
    login_handler, login_page_handler, redirect_handler, register_handler, view_link_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Builds the full route table.
    ///
    /// Static routes (`/create`, `/view`, ...) take precedence over the
    /// catch-all `/{alias}` redirect route; the alias validator reserves
    /// those prefixes so they can never be claimed as aliases.
    pub fn router<S: LinkStore + UserStore>(state: AppState<S>) -> Router {
        Router::new()
            .route("/", get(home_handler))
            .route("/login", get(login_page_handler))
            .route("/health", get(health_handler))
            .route("/api/register", post(register_handler::<S>))
            .route("/api/login", post(login_handler::<S>))
            .route("/create", post(create_link_handler::<S>))
            .route("/view/{alias}", get(view_link_handler::<S>))
            .route("/dashboard/{user_id}", get(dashboard_handler::<S>))
            .route(
                "/{alias}",
                get(redirect_handler::<S>).delete(delete_link_handler::<S>),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
