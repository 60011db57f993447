use crate::model::CreateLinkResponse;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use lariat_core::{Alias, LinkStore, UserStore};
use lariat_service::{Dashboard, LinkView};
use std::fmt::Write;

pub async fn home_handler() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\n<html><head><title>lariat</title></head>\
         <body><h1>lariat</h1><p>Short links that mostly expire.</p>\
         <p><a href=\"/login\">Log in</a></p></body></html>",
    )
}

pub async fn login_page_handler() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\n<html><head><title>Log in - lariat</title></head>\
         <body><h1>Log in</h1>\
         <p>POST your credentials to <code>/api/login</code>.</p></body></html>",
    )
}

/// `GET /view/{alias}`. Renders the link's metadata with its expiration
/// label. Absent aliases get the same `{error, short_url}` envelope the
/// create endpoint uses; no side effects either way.
pub async fn view_link_handler<S: LinkStore + UserStore>(
    Path(alias): Path<String>,
    State(state): State<AppState<S>>,
) -> Response {
    let alias = Alias::new_unchecked(alias);

    match state.links.view(&alias).await {
        Ok(Some(view)) => render_view_page(&view, &state.base_url).into_response(),
        Ok(None) => Json(CreateLinkResponse::error("Invalid alias")).into_response(),
        Err(err) => Json(CreateLinkResponse::error(err.to_string())).into_response(),
    }
}

/// `GET /dashboard/{user_id}`. An unknown user is bounced to the login
/// page rather than told the id was wrong.
pub async fn dashboard_handler<S: LinkStore + UserStore>(
    Path(user_id): Path<String>,
    State(state): State<AppState<S>>,
) -> Response {
    match state.links.dashboard(&user_id).await {
        Ok(Some(dashboard)) => render_dashboard_page(&dashboard).into_response(),
        Ok(None) => Redirect::to("/login").into_response(),
        Err(err) => Json(CreateLinkResponse::error(err.to_string())).into_response(),
    }
}

fn render_view_page(view: &LinkView, base_url: &str) -> Html<String> {
    let short_url = view.entry.alias.to_url(base_url);
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{alias} - lariat</title></head><body>\
         <h1>/{alias}</h1>\
         <p>Short URL: <code>{short}</code></p>\
         <p>Target: <a href=\"{url}\">{url}</a></p>\
         <p>Visits: {visits}</p>\
         <p>Expires: {expiration}</p>\
         </body></html>",
        alias = escape_html(view.entry.alias.as_str()),
        short = escape_html(&short_url),
        url = escape_html(&view.entry.url),
        visits = view.entry.visits,
        expiration = escape_html(&view.expiration),
    ))
}

fn render_dashboard_page(dashboard: &Dashboard) -> Html<String> {
    let mut page = String::new();
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html><head><title>Dashboard - lariat</title></head><body>\
         <h1>{name}'s links</h1>",
        name = escape_html(&dashboard.user.name),
    );

    if dashboard.rows.is_empty() {
        page.push_str("<p>No links yet.</p>");
    } else {
        page.push_str(
            "<table><tr><th>Alias</th><th>URL</th><th>Visits</th><th>Expires</th></tr>",
        );
        for row in &dashboard.rows {
            let _ = write!(
                page,
                "<tr><td><a href=\"/view/{alias}\">{alias}</a></td>\
                 <td>{url}</td><td>{visits}</td><td>{expiration}</td></tr>",
                alias = escape_html(row.entry.alias.as_str()),
                url = escape_html(&row.display_url),
                visits = row.entry.visits,
                expiration = escape_html(&row.expiration),
            );
        }
        page.push_str("</table>");
    }

    page.push_str("</body></html>");
    Html(page)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
