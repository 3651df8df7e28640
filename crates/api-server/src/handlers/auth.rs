use axum::extract::{Form, Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use domain::{DomainError, LoginForm, RegistrationForm};
use serde::Deserialize;
use serde_json::json;

use crate::flash::Flash;
use crate::handlers::{error_response, redirect_flash, render_page, render_page_with};
use crate::session::{self, Principal};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    username: String,
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    email: String,
    password: String,
    #[serde(default)]
    remember: bool,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

pub async fn register_form(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
) -> Response {
    if principal.0.is_some() {
        return Redirect::to("/").into_response();
    }
    render_page(
        &state,
        &headers,
        "register",
        json!({ "title": "Register", "form": {} }),
    )
}

pub async fn register(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Form(payload): Form<RegisterPayload>,
) -> Response {
    if principal.0.is_some() {
        return Redirect::to("/").into_response();
    }

    let form = RegistrationForm {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        confirm_password: payload.confirm_password,
    };

    match state.app.accounts.register(&form).await {
        Ok(_) => redirect_flash(
            "/login",
            Flash::success("Your account has been created! You are now able to log in"),
        ),
        Err(DomainError::Validation(errors)) => render_page(
            &state,
            &headers,
            "register",
            json!({
                "title": "Register",
                "form": { "username": form.username, "email": form.email },
                "errors": errors,
            }),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn login_form(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
) -> Response {
    if principal.0.is_some() {
        return Redirect::to("/").into_response();
    }
    render_page(
        &state,
        &headers,
        "login",
        json!({ "title": "Login", "form": {} }),
    )
}

pub async fn login(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
    Form(payload): Form<LoginPayload>,
) -> Response {
    if principal.0.is_some() {
        return Redirect::to("/").into_response();
    }

    let form = LoginForm {
        email: payload.email,
        password: payload.password,
        remember: payload.remember,
    };

    match state.app.accounts.authenticate(&form).await {
        Ok(Some(user)) => {
            let user_id = match user.id {
                Some(id) => id,
                None => {
                    return error_response(DomainError::Repository(
                        "user has no persisted id".to_string(),
                    ))
                }
            };
            let token = match session::issue_token(user_id, form.remember, &state.jwt_secret) {
                Ok(token) => token,
                Err(err) => return error_response(DomainError::Repository(err.to_string())),
            };

            let target = query.next.as_deref().unwrap_or("/");
            let mut response = Redirect::to(target).into_response();
            if let Ok(value) =
                HeaderValue::from_str(&session::session_cookie(&token, form.remember))
            {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            response
        }
        // Deliberately the same message for a wrong password and an
        // unknown email.
        Ok(None) => render_page_with(
            &state,
            &headers,
            "login",
            json!({ "title": "Login", "form": { "email": form.email } }),
            vec![Flash::danger(
                "Login Unsuccessful. Please check email and password",
            )],
        ),
        Err(DomainError::Validation(errors)) => render_page(
            &state,
            &headers,
            "login",
            json!({
                "title": "Login",
                "form": { "email": form.email },
                "errors": errors,
            }),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn logout() -> Response {
    let mut response = Redirect::to("/").into_response();
    if let Ok(value) = HeaderValue::from_str(&session::clear_session_cookie()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}
