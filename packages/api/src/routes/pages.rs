//! Public pages and the quotes passthrough.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::error::AppError;
use crate::forms::QuotesQuery;
use crate::quotes::{category_or_default, first_quote, DEFAULT_CATEGORY};
use crate::state::AppState;

pub async fn home() -> Html<String> {
    Html(ui::home_page())
}

/// The quote is decoration; the page renders without it when the API fails.
pub async fn about(State(state): State<AppState>) -> Html<String> {
    let quote = match state.quotes.fetch(DEFAULT_CATEGORY).await {
        Ok(quotes) => first_quote(quotes),
        Err(err) => {
            warn!(error = %err, "could not fetch quote for about page");
            None
        }
    };
    Html(ui::about_page(quote))
}

pub async fn quotes(State(state): State<AppState>, Query(query): Query<QuotesQuery>) -> Response {
    let category = category_or_default(query.keyword.as_deref());
    match state.quotes.fetch(category).await {
        Ok(quotes) => Json(quotes).into_response(),
        Err(err) => {
            error!(error = %err, category, "quote API request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching quotes" })),
            )
                .into_response()
        }
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
