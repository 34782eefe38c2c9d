//! Session keys and the user binding stored under them.

use serde::{Deserialize, Serialize};
use store::User;
use tower_sessions::{session, Session};
use uuid::Uuid;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Key for the handshake secrets between `/auth/google` and the callback.
pub const PENDING_LOGIN_KEY: &str = "pending_login";

/// Secrets remembered while the browser is away at the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLogin {
    pub csrf_state: String,
    pub pkce_verifier: String,
}

/// Bind `user` to the session under a fresh session id.
pub async fn bind_user(session: &Session, user: &User) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user.id.to_string()).await
}

/// The user id bound to this session. Anything unparsable counts as unbound.
pub async fn bound_user_id(session: &Session) -> Result<Option<Uuid>, session::Error> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    Ok(user_id.and_then(|id| Uuid::parse_str(&id).ok()))
}
