use crate::model::{AccountResponse, LoginRequest, RegisterRequest};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use lariat_core::{LinkStore, UserStore};
use lariat_service::RegisterParams;

/// `POST /api/register`. Always HTTP 200 with an `{error, user_id}`
/// envelope; a duplicate email surfaces as `Email already in use`.
pub async fn register_handler<S: LinkStore + UserStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Json<AccountResponse> {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Json(AccountResponse::error(rejection.body_text())),
    };

    let params = RegisterParams {
        name: request.name,
        email: request.email,
        password: request.password,
    };

    match state.accounts.register(params).await {
        Ok(user_id) => Json(AccountResponse::ok(user_id)),
        Err(err) => Json(AccountResponse::error(err.to_string())),
    }
}

/// `POST /api/login`. Credentials that match nothing yield the fixed
/// `Invalid username or password` message, never a hint at which field
/// was wrong.
pub async fn login_handler<S: LinkStore + UserStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Json<AccountResponse> {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Json(AccountResponse::error(rejection.body_text())),
    };

    match state.accounts.login(&request.email, &request.password).await {
        Ok(Some(user_id)) => Json(AccountResponse::ok(user_id)),
        Ok(None) => Json(AccountResponse::error("Invalid username or password")),
        Err(err) => Json(AccountResponse::error(err.to_string())),
    }
}
