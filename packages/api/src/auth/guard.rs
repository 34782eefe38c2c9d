use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use store::User;
use tower_sessions::Session;
use tracing::warn;

use super::session::{bound_user_id, SESSION_USER_ID_KEY};
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user. Extracting it is the access check for every dashboard
/// route: a request without a resolvable user is rejected with `401`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, reason)| AppError::SessionUnavailable(reason))?;

        let Some(user_id) = bound_user_id(&session).await? else {
            return Err(AppError::Unauthorized);
        };

        match state.users.find_by_id(user_id).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                warn!(%user_id, "session bound to a user that no longer exists");
                session.remove::<String>(SESSION_USER_ID_KEY).await?;
                Err(AppError::Unauthorized)
            }
        }
    }
}
