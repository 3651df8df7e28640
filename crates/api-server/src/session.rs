use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use domain::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Token lifetime without "remember me"; the cookie itself is
/// browser-session scoped in that case.
const SESSION_HOURS: i64 = 3;
/// Cookie and token lifetime with "remember me".
const REMEMBER_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub sub: String,
}

/// The request identity resolved by `load_principal`; `None` is an
/// anonymous caller.
#[derive(Clone)]
pub struct Principal(pub Option<User>);

/// Inserted by `require_login` once the principal is known to exist, so
/// protected handlers get the user without re-checking.
#[derive(Clone)]
pub struct CurrentUser(pub User);

pub fn issue_token(
    user_id: i32,
    remember: bool,
    jwt_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let lifetime = if remember {
        Duration::days(REMEMBER_DAYS)
    } else {
        Duration::hours(SESSION_HOURS)
    };
    let claims = Claims {
        exp: (Utc::now() + lifetime).timestamp() as usize,
        sub: format!("{user_id}"),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
}

pub fn session_cookie(token: &str, remember: bool) -> String {
    let base = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    if remember {
        let max_age = Duration::days(REMEMBER_DAYS).num_seconds();
        format!("{base}; Max-Age={max_age}")
    } else {
        base
    }
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Read one cookie out of the Cookie header(s).
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Resolve the session cookie to a stored user. Any failure along the
/// way (missing cookie, bad or expired token, deleted user) yields an
/// anonymous principal, never an error.
pub async fn load_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match cookie_value(request.headers(), SESSION_COOKIE) {
        Some(token) => resolve_token(&state, &token).await,
        None => None,
    };
    request.extensions_mut().insert(Principal(user));

    next.run(request).await
}

async fn resolve_token(state: &AppState, token: &str) -> Option<User> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .ok()?
    .claims;

    let user_id: i32 = claims.sub.parse().ok()?;
    state.app.accounts.find_by_id(user_id).await.ok().flatten()
}

/// Route layer for authenticated routes: anonymous callers are sent to
/// the login page with the original path preserved in `next`.
pub async fn require_login(mut request: Request, next: Next) -> Response {
    let principal = request
        .extensions()
        .get::<Principal>()
        .and_then(|principal| principal.0.clone());

    match principal {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        None => {
            let target = format!("/login?next={}", request.uri().path());
            Redirect::to(&target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn cookie_value_picks_the_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("a=1; session=tok-123; b=2"),
        );
        assert_eq!(cookie_value(&headers, "session"), Some("tok-123".to_string()));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn remember_controls_cookie_persistence() {
        assert!(!session_cookie("t", false).contains("Max-Age"));
        assert!(session_cookie("t", true).contains("Max-Age"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn issued_tokens_decode_back_to_the_user_id() {
        let token = issue_token(42, false, "secret").unwrap();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("secret".as_ref()),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(claims.sub, "42");
    }
}
