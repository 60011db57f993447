use crate::model::{CreateLinkRequest, CreateLinkResponse, DeleteLinkResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use lariat_core::{Alias, LinkStore, UserStore};
use lariat_service::{CreateLinkParams, Resolution};
use tracing::error;

const MISSING_PARAMETERS: &str = "Missing parameters - requires `url`, `permanent`, and `creator`";
const PERMANENT_NOT_BOOLEAN: &str = "Invalid parameter - `permanent` must be a boolean";

/// `POST /create`. Runs the presence and strictly-boolean checks here,
/// then hands the rest of the validation chain to the service. Every
/// failure is a distinct message in the `{error, short_url}` envelope.
pub async fn create_link_handler<S: LinkStore + UserStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Json<CreateLinkResponse> {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Json(CreateLinkResponse::error(rejection.body_text())),
    };

    let creator = request.creator.unwrap_or_default();
    let url = request.url.unwrap_or_default();
    let alias = request.alias.unwrap_or_default();
    if creator.is_empty() || url.is_empty() || alias.is_empty() || request.permanent.is_none() {
        return Json(CreateLinkResponse::error(MISSING_PARAMETERS));
    }

    // An explicit `"permanent": null` got past the presence check, so it
    // fails here like any other non-boolean value.
    let Some(permanent) = request.permanent.and_then(|value| value.as_bool()) else {
        return Json(CreateLinkResponse::error(PERMANENT_NOT_BOOLEAN));
    };

    let params = CreateLinkParams {
        creator,
        url,
        alias,
        permanent,
    };

    match state.links.create(params).await {
        Ok(alias) => Json(CreateLinkResponse::ok(alias.to_string())),
        Err(err) => Json(CreateLinkResponse::error(err.to_string())),
    }
}

/// `GET /{alias}`. The main redirect path: live and eternal links go to
/// their target (counting the visit), expired ones go to the view page,
/// unknown aliases go home. A store failure also goes home, after logging;
/// the requester never sees a 500 here.
pub async fn redirect_handler<S: LinkStore + UserStore>(
    Path(alias): Path<String>,
    State(state): State<AppState<S>>,
) -> Redirect {
    let alias = Alias::new_unchecked(alias);

    match state.links.resolve(&alias).await {
        Ok(Resolution::Resolved(url)) => Redirect::to(&url),
        Ok(Resolution::Expired) => Redirect::to(&format!("/view/{alias}")),
        Ok(Resolution::NotFound) => Redirect::to("/"),
        Err(err) => {
            error!(alias = %alias, error = %err, "resolve failed");
            Redirect::to("/")
        }
    }
}

/// `DELETE /{alias}`. `{error: null, message: "URL entry deleted"}` on
/// success, `Invalid alias` if the entry never existed.
pub async fn delete_link_handler<S: LinkStore + UserStore>(
    Path(alias): Path<String>,
    State(state): State<AppState<S>>,
) -> Response {
    let alias = Alias::new_unchecked(alias);

    match state.links.delete(&alias).await {
        Ok(()) => Json(DeleteLinkResponse::ok("URL entry deleted")).into_response(),
        Err(err) => Json(DeleteLinkResponse::error(err.to_string())).into_response(),
    }
}
