pub mod account;
pub mod auth;
pub mod feed;
pub mod posts;

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use domain::{DomainError, User};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::flash::{self, Flash};
use crate::AppState;

/// `?page=` query parameter, defaulting to the first page.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Render a page through the collaborator, draining queued flash
/// messages into the context.
pub fn render_page(
    state: &AppState,
    headers: &HeaderMap,
    template: &str,
    context: Value,
) -> Response {
    render_page_with(state, headers, template, context, Vec::new())
}

/// Same as [`render_page`], with extra messages flashed directly onto
/// this response (used when a failure re-renders instead of
/// redirecting).
pub fn render_page_with(
    state: &AppState,
    headers: &HeaderMap,
    template: &str,
    mut context: Value,
    mut inline: Vec<Flash>,
) -> Response {
    let (mut flashes, clear) = flash::take(headers);
    flashes.append(&mut inline);
    context["flashes"] = serde_json::json!(flashes);

    let body = state.renderer.render(template, context);
    let mut response = (
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response();
    if let Some(clear) = clear {
        if let Ok(value) = HeaderValue::from_str(&clear) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Redirect with a queued flash message.
pub fn redirect_flash(to: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(to).into_response();
    if let Ok(value) = HeaderValue::from_str(&flash::flash_cookie(&[flash])) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Terminal mapping for failures a handler does not deal with itself.
/// Validation failures are normally re-rendered by the handler; the
/// arm here is only a fallback.
pub fn error_response(err: DomainError) -> Response {
    match err {
        DomainError::NotFound(what) => {
            (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
        }
        DomainError::Forbidden => (
            StatusCode::FORBIDDEN,
            "You are not allowed to do that".to_string(),
        )
            .into_response(),
        DomainError::Validation(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "invalid input".to_string()).into_response()
        }
        other => {
            error!("request failed: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
                .into_response()
        }
    }
}

/// A stored principal always carries an id; a missing one is a wiring
/// bug, not a user error.
pub fn author_id(user: &User) -> Result<i32, Response> {
    user.id.ok_or_else(|| {
        error!("authenticated user without a persisted id");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal error".to_string(),
        )
            .into_response()
    })
}
