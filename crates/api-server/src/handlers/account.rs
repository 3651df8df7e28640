use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use domain::{AvatarUpload, DomainError, UpdateAccountForm, User};
use serde_json::{json, Value};

use crate::flash::Flash;
use crate::handlers::{error_response, redirect_flash, render_page};
use crate::session::CurrentUser;
use crate::AppState;

fn account_context(user: &User, username: &str, email: &str) -> Value {
    json!({
        "title": "Account",
        "image_file": format!("/static/profile_pics/{}", user.image_file),
        "form": { "username": username, "email": email },
    })
}

pub async fn show(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Response {
    let context = account_context(&user, &user.username, &user.email);
    render_page(&state, &headers, "account", context)
}

pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    match state.app.accounts.update_account(&user, &form).await {
        Ok(_) => redirect_flash("/account", Flash::success("Your account has been updated!")),
        Err(DomainError::Validation(errors)) => {
            let mut context = account_context(&user, &form.username, &form.email);
            context["errors"] = json!(errors);
            render_page(&state, &headers, "account", context)
        }
        Err(err) => error_response(err),
    }
}

/// Bind the multipart account form: two text fields plus an optional
/// picture part. Browsers send an empty part for an untouched file
/// input, so blank uploads count as "no picture".
async fn read_form(mut multipart: Multipart) -> Result<UpdateAccountForm, Response> {
    let mut form = UpdateAccountForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("username") => form.username = field.text().await.map_err(bad_request)?,
            Some("email") => form.email = field.text().await.map_err(bad_request)?,
            Some("picture") => {
                let filename = field.file_name().map(str::to_string).unwrap_or_default();
                let bytes = field.bytes().await.map_err(bad_request)?;
                if !filename.is_empty() && !bytes.is_empty() {
                    form.picture = Some(AvatarUpload::new(filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn bad_request(err: MultipartError) -> Response {
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}
