use async_trait::async_trait;
use store::ExternalProfile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OAuth misconfigured: {0}")]
    Config(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("profile request failed: {0}")]
    Profile(#[from] reqwest::Error),
}

/// Where to send the browser, plus the secrets needed to finish the handshake.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    pub url: String,
    pub csrf_state: String,
    pub pkce_verifier: String,
}

/// An external identity provider speaking the authorization-code flow.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn authorize(&self) -> AuthorizationRequest;

    async fn exchange(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> Result<ExternalProfile, ProviderError>;
}
