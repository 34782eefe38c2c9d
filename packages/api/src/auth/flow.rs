//! The two halves of a sign-in: leaving for the provider and coming back.

use store::{StoreError, User};
use thiserror::Error;
use tower_sessions::{session, Session};
use tracing::debug;

use super::provider::ProviderError;
use super::session::{bind_user, PendingLogin, PENDING_LOGIN_KEY};
use crate::forms::CallbackParams;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("provider returned an error: {0}")]
    Denied(String),

    #[error("callback is missing the authorization code")]
    MissingCode,

    #[error("no sign-in is in progress for this session")]
    NoPendingLogin,

    #[error("state parameter does not match")]
    StateMismatch,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] session::Error),
}

/// Remember the handshake secrets and return the provider URL to redirect to.
pub async fn begin_login(state: &AppState, session: &Session) -> Result<String, session::Error> {
    let request = state.identity.authorize();
    session
        .insert(
            PENDING_LOGIN_KEY,
            PendingLogin {
                csrf_state: request.csrf_state,
                pkce_verifier: request.pkce_verifier,
            },
        )
        .await?;
    Ok(request.url)
}

/// Finish the handshake, resolve the local user and bind it to the session.
///
/// The pending login is consumed whether or not the callback succeeds, so a
/// state value can be used once.
pub async fn complete_login(
    state: &AppState,
    session: &Session,
    params: CallbackParams,
) -> Result<User, LoginError> {
    let pending: Option<PendingLogin> = session.remove(PENDING_LOGIN_KEY).await?;

    if let Some(error) = params.error {
        return Err(LoginError::Denied(error));
    }
    let pending = pending.ok_or(LoginError::NoPendingLogin)?;
    if params.state.as_deref() != Some(pending.csrf_state.as_str()) {
        return Err(LoginError::StateMismatch);
    }
    let code = params.code.ok_or(LoginError::MissingCode)?;

    let profile = state.identity.exchange(&code, &pending.pkce_verifier).await?;
    let user = state.users.find_or_create_by_external_profile(&profile).await?;
    debug!(user_id = %user.id, "resolved external profile");

    bind_user(session, &user).await?;
    Ok(user)
}
