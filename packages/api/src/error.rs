use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use store::StoreError;
use thiserror::Error;
use tower_sessions::session;
use tracing::error;

use crate::quotes::QuoteError;

pub const UNAUTHORIZED_MESSAGE: &str = "You must be logged in to view this page";

/// Error returned by handlers. Internal causes are logged, never sent.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not signed in")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Upstream(#[from] QuoteError),

    #[error("session error: {0}")]
    Session(#[from] session::Error),

    #[error("session layer missing: {0}")]
    SessionUnavailable(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE).into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, Html(ui::not_found_page())).into_response(),
            AppError::Store(StoreError::Validation(message)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            other => {
                error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
        }
    }
}
