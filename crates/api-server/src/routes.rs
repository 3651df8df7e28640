use axum::middleware;
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{account, auth, feed, posts};
use crate::session;
use crate::AppState;

/// Whether a route demands an authenticated principal. Ownership checks
/// stay in the handlers, since they need the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

/// The whole HTTP surface as one enumerable table.
pub fn route_table() -> Vec<(&'static str, MethodRouter<AppState>, Access)> {
    vec![
        ("/", get(feed::home), Access::Public),
        ("/home", get(feed::home), Access::Public),
        ("/about", get(feed::about), Access::Public),
        (
            "/register",
            get(auth::register_form).post(auth::register),
            Access::Public,
        ),
        (
            "/login",
            get(auth::login_form).post(auth::login),
            Access::Public,
        ),
        ("/logout", get(auth::logout), Access::Public),
        (
            "/account",
            get(account::show).post(account::update),
            Access::Authenticated,
        ),
        (
            "/post/new",
            get(posts::new_form).post(posts::create),
            Access::Authenticated,
        ),
        ("/post/:id", get(posts::show), Access::Public),
        (
            "/post/:id/update",
            get(posts::edit_form).post(posts::update),
            Access::Authenticated,
        ),
        ("/post/:id/delete", post(posts::delete), Access::Authenticated),
        ("/user/:username", get(feed::user_posts), Access::Public),
    ]
}

/// Fold the table into the router. Authenticated routes carry the login
/// guard as a route layer; every route resolves the principal first.
pub fn build_router(state: AppState) -> Router {
    let mut public = Router::new();
    let mut protected = Router::new();

    for (path, handler, access) in route_table() {
        match access {
            Access::Public => public = public.route(path, handler),
            Access::Authenticated => protected = protected.route(path, handler),
        }
    }

    let protected = protected.route_layer(middleware::from_fn(session::require_login));

    public
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::load_principal,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_the_documented_surface() {
        let table = route_table();
        assert_eq!(table.len(), 12);

        let authenticated: Vec<&str> = table
            .iter()
            .filter(|(_, _, access)| *access == Access::Authenticated)
            .map(|(path, _, _)| *path)
            .collect();
        assert_eq!(
            authenticated,
            vec!["/account", "/post/new", "/post/:id/update", "/post/:id/delete"]
        );
    }
}
