use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Redirect;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::auth::{begin_login, complete_login};
use crate::error::AppError;
use crate::forms::CallbackParams;
use crate::state::AppState;

pub async fn login(State(state): State<AppState>, session: Session) -> Result<Redirect, AppError> {
    let url = begin_login(&state, &session).await?;
    Ok(Redirect::to(&url))
}

/// Any failure sends the visitor back to the landing page.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> Redirect {
    let Query(params) = match params {
        Ok(params) => params,
        Err(err) => {
            warn!(error = %err, "malformed sign-in callback");
            return Redirect::to("/");
        }
    };
    match complete_login(&state, &session, params).await {
        Ok(user) => {
            info!(user_id = %user.id, "user signed in");
            Redirect::to("/dashboard")
        }
        Err(err) => {
            warn!(error = %err, "sign-in failed");
            Redirect::to("/")
        }
    }
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    Ok(Redirect::to("/"))
}
