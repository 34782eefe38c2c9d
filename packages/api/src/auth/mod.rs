//! Authentication: Google sign-in, session binding and the dashboard guard.

mod config;
mod flow;
mod google;
mod guard;
mod provider;
mod session;

pub use config::OAuthConfig;
pub use flow::{begin_login, complete_login, LoginError};
pub use google::GoogleOAuth;
pub use guard::CurrentUser;
pub use provider::{AuthorizationRequest, IdentityProvider, ProviderError};
pub use session::{bind_user, bound_user_id, PendingLogin, PENDING_LOGIN_KEY, SESSION_USER_ID_KEY};
