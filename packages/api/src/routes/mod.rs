//! # Router
//!
//! | Method | Path | Guarded | Handler |
//! |--------|------|---------|---------|
//! | GET | `/` | | [`pages::home`] |
//! | GET | `/about` | | [`pages::about`] |
//! | GET | `/api/quotes?keyword=` | | [`pages::quotes`] |
//! | GET | `/dashboard` | yes | [`dashboard::index`] |
//! | GET, POST | `/dashboard/create` | yes | [`dashboard::create_form`], [`dashboard::create`] |
//! | GET, PUT | `/dashboard/edit/{id}` | yes | [`dashboard::edit_form`], [`dashboard::update`] |
//! | DELETE | `/dashboard/delete/{id}` | yes | [`dashboard::destroy`] |
//! | GET, POST | `/dashboard/search` | yes | [`dashboard::search_form`], [`dashboard::search`] |
//! | GET | `/auth/google` | | [`auth::login`] |
//! | GET | `/google/callback` | | [`auth::callback`] |
//! | GET | `/logout` | | [`auth::logout`] |
//! | GET | `/static/*` | | files under the static directory |
//! | any | anything else | | 404 page |
//!
//! The router expects a `tower_sessions::SessionManagerLayer` to be layered on by
//! the caller, and must be wrapped with [`with_method_override`] for the HTML
//! forms' `PUT` and `DELETE` submissions to reach their handlers.

use std::path::Path;

use axum::extract::{Query, Request};
use axum::http::Method;
use axum::routing::{delete, get};
use axum::Router;
use tower::util::MapRequestLayer;
use tower::Layer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::forms::MethodOverride;
use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod pages;

/// The router wrapped in the method-override rewrite.
pub type App = tower::util::MapRequest<Router, fn(Request) -> Request>;

pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/api/quotes", get(pages::quotes))
        .route("/dashboard", get(dashboard::index))
        .route(
            "/dashboard/create",
            get(dashboard::create_form).post(dashboard::create),
        )
        .route(
            "/dashboard/edit/{id}",
            get(dashboard::edit_form).put(dashboard::update),
        )
        .route("/dashboard/delete/{id}", delete(dashboard::destroy))
        .route(
            "/dashboard/search",
            get(dashboard::search_form).post(dashboard::search),
        )
        .route("/auth/google", get(auth::login))
        .route("/google/callback", get(auth::callback))
        .route("/logout", get(auth::logout))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Rewrite `POST ...?_method=PUT|PATCH|DELETE` to that method.
///
/// Must run before routing, so it wraps the whole router rather than being
/// added with `Router::layer`.
pub fn method_override(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }
    let target = Query::<MethodOverride>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(params)| params.method)
        .and_then(|method| match method.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        });
    if let Some(method) = target {
        *request.method_mut() = method;
    }
    request
}

pub fn with_method_override(router: Router) -> App {
    MapRequestLayer::new(method_override as fn(Request) -> Request).layer(router)
}
