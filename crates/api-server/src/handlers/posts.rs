use axum::extract::{Form, Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Extension;
use domain::{DomainError, PostForm};
use serde::Deserialize;
use serde_json::json;

use crate::flash::Flash;
use crate::handlers::{author_id, error_response, redirect_flash, render_page};
use crate::session::CurrentUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PostPayload {
    title: String,
    content: String,
}

impl From<PostPayload> for PostForm {
    fn from(payload: PostPayload) -> Self {
        PostForm {
            title: payload.title,
            content: payload.content,
        }
    }
}

pub async fn new_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_page(
        &state,
        &headers,
        "create_post",
        json!({ "title": "New Post", "legend": "New Post", "form": {} }),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
    Form(payload): Form<PostPayload>,
) -> Response {
    let form = PostForm::from(payload);

    match state.app.posts.create(&user, &form).await {
        Ok(_) => redirect_flash("/", Flash::success("Your post has been created!")),
        Err(DomainError::Validation(errors)) => render_page(
            &state,
            &headers,
            "create_post",
            json!({
                "title": "New Post",
                "legend": "New Post",
                "form": { "title": form.title, "content": form.content },
                "errors": errors,
            }),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn show(
    State(state): State<AppState>,
    Path(post_id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    match state.app.posts.get(post_id).await {
        Ok(post) => {
            let context = json!({ "title": post.title, "post": post });
            render_page(&state, &headers, "post", context)
        }
        Err(err) => error_response(err),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    let author_id = match author_id(&user) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.app.posts.get_owned(author_id, post_id).await {
        Ok(post) => render_page(
            &state,
            &headers,
            "create_post",
            json!({
                "title": "Update Post",
                "legend": "Update Post",
                "form": { "title": post.title, "content": post.content },
            }),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i32>,
    headers: HeaderMap,
    Form(payload): Form<PostPayload>,
) -> Response {
    let author_id = match author_id(&user) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let form = PostForm::from(payload);

    match state.app.posts.update(author_id, post_id, &form).await {
        Ok(post) => {
            let target = format!("/post/{}", post.id.unwrap_or(post_id));
            redirect_flash(&target, Flash::success("Your post has been updated!"))
        }
        Err(DomainError::Validation(errors)) => render_page(
            &state,
            &headers,
            "create_post",
            json!({
                "title": "Update Post",
                "legend": "Update Post",
                "form": { "title": form.title, "content": form.content },
                "errors": errors,
            }),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i32>,
) -> Response {
    let author_id = match author_id(&user) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.app.posts.delete(author_id, post_id).await {
        Ok(()) => redirect_flash("/", Flash::success("Your post has been deleted!")),
        Err(err) => error_response(err),
    }
}
