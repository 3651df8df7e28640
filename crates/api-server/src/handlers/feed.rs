use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde_json::json;

use crate::handlers::{error_response, render_page, PageQuery};
use crate::AppState;

pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    match state.app.posts.home_feed(query.page()).await {
        Ok(posts) => render_page(&state, &headers, "home", json!({ "posts": posts })),
        Err(err) => error_response(err),
    }
}

pub async fn about(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(&state, &headers, "about", json!({ "title": "About" }))
}

pub async fn user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    match state.app.posts.user_feed(&username, query.page()).await {
        Ok((user, posts)) => render_page(
            &state,
            &headers,
            "user_posts",
            json!({ "posts": posts, "user": user }),
        ),
        Err(err) => error_response(err),
    }
}
