//! # API crate: the HTTP surface of PonderPad
//!
//! Everything between the socket and the store lives here. The `web` binary only
//! builds the concrete collaborators and hands them to [`routes::router`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Google OAuth (authorization code + PKCE), session binding of the signed-in user, and the [`auth::CurrentUser`] guard |
//! | [`error`] | [`AppError`], the single error type handlers return, and its HTTP mapping |
//! | [`forms`] | Strict input structs for every form and query string |
//! | [`quotes`] | Client for the third-party quote API used by `/about` and `/api/quotes` |
//! | [`routes`] | The axum router, method override, and all handlers |
//! | [`settings`] | Layered configuration (defaults, `ponderpad.toml`, environment) |
//! | [`state`] | [`AppState`], the trait objects shared by every handler |
//!
//! ## Request flow
//!
//! 1. The method-override wrapper turns `POST ?_method=PUT|DELETE` into the real method.
//! 2. The session layer (added by the caller) loads the session from its cookie.
//! 3. Dashboard handlers extract [`auth::CurrentUser`]; requests without a bound
//!    user are answered with `401` before any store call.
//! 4. Handlers call the owner-scoped store methods and render a page or redirect.

pub mod auth;
pub mod error;
pub mod forms;
pub mod quotes;
pub mod routes;
pub mod settings;
pub mod state;

pub use error::AppError;
pub use routes::{method_override, router, with_method_override, App};
pub use settings::Settings;
pub use state::AppState;
