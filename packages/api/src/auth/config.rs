//! OAuth configuration built from [`Settings`].

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use super::provider::ProviderError;
use crate::settings::Settings;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Google endpoints with the client credentials and callback from settings.
    pub fn google(settings: &Settings) -> Result<Self, ProviderError> {
        Ok(Self {
            client_id: ClientId::new(settings.google_client_id.clone()),
            client_secret: ClientSecret::new(settings.google_client_secret.clone()),
            auth_url: AuthUrl::new(GOOGLE_AUTH_URL.to_string())
                .map_err(|e| ProviderError::Config(e.to_string()))?,
            token_url: TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
                .map_err(|e| ProviderError::Config(e.to_string()))?,
            redirect_url: RedirectUrl::new(settings.google_callback_url.clone())
                .map_err(|e| ProviderError::Config(e.to_string()))?,
        })
    }
}
