//! # Google OAuth 2.0 implementation
//!
//! Implements the Google Authorization Code flow with PKCE behind the
//! [`IdentityProvider`] trait.
//!
//! ## Types
//!
//! - [`GoogleUser`]: deserialization target for the Google userinfo API response
//!   (`googleapis.com/oauth2/v2/userinfo`).
//! - [`ConfiguredClient`]: a fully-typed `oauth2::Client` alias with auth and token
//!   endpoints set.
//! - [`GoogleOAuth`]: the public handler that wraps an [`OAuthConfig`].
//!
//! ## Flow
//!
//! 1. **[`authorize`](GoogleOAuth::authorize)**: builds an authorization URL
//!    requesting `email` and `profile` scopes and generates a random PKCE
//!    challenge. The CSRF state and verifier are returned to the caller, which
//!    keeps them in the browser's session until the callback arrives.
//!
//! 2. **[`exchange`](GoogleOAuth::exchange)**: called from `/google/callback`
//!    once the state has been checked. It exchanges the authorization code +
//!    PKCE verifier for an access token and fetches the user's profile from the
//!    Google userinfo endpoint. Creating the local user is left to the
//!    [`store::UserDirectory`].

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use serde::Deserialize;
use store::ExternalProfile;

use super::config::OAuthConfig;
use super::provider::{AuthorizationRequest, IdentityProvider, ProviderError};

const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

impl GoogleUser {
    fn into_profile(self) -> ExternalProfile {
        let display_name = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "PonderPad user".to_string());
        ExternalProfile {
            provider_id: self.id,
            display_name,
            given_name: self.given_name,
            family_name: self.family_name,
            avatar_url: self.picture,
        }
    }
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth handler.
pub struct GoogleOAuth {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(config: OAuthConfig) -> Result<Self, ProviderError> {
        // Token endpoints must not be followed through redirects
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { config, http })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuth {
    fn authorize(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = self
            .create_client()
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: auth_url.to_string(),
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        }
    }

    async fn exchange(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> Result<ExternalProfile, ProviderError> {
        let token_result = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| ProviderError::TokenExchange(e.to_string()))?;

        let google_user: GoogleUser = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(token_result.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(google_user.into_profile())
    }
}
