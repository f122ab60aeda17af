use std::sync::Arc;

use flipkit_engine::db_types::GoogleProfile;
use log::*;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::OauthProvider;
use crate::config::GoogleOauthConfig;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Clone, Error)]
pub enum GoogleApiError {
    #[error("Error communicating with Google. {0}")]
    ResponseError(String),
    #[error("Google rejected the code exchange. {0}")]
    ExchangeFailed(String),
    #[error("Could not deserialize the Google response. {0}")]
    JsonError(String),
}

#[derive(Clone)]
pub struct GoogleOauthApi {
    config: GoogleOauthConfig,
    client: Arc<Client>,
}

impl GoogleOauthApi {
    pub fn new(config: GoogleOauthConfig) -> Self {
        Self { config, client: Arc::new(Client::new()) }
    }
}

impl OauthProvider for GoogleOauthApi {
    fn authorize_url(&self) -> String {
        format!(
            "{GOOGLE_AUTH_URL}?client_id={}&redirect_uri={}&response_type=code&scope=openid%20email%20profile&prompt=select_account",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_url),
        )
    }

    async fn fetch_profile(&self, code: &str) -> Result<GoogleProfile, GoogleApiError> {
        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.reveal().as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| GoogleApiError::ResponseError(e.to_string()))?;
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!("🔌️ Google code exchange failed: {message}");
            return Err(GoogleApiError::ExchangeFailed(message));
        }
        let tokens =
            response.json::<TokenResponse>().await.map_err(|e| GoogleApiError::JsonError(e.to_string()))?;
        trace!("🔌️ Code exchange succeeded. Fetching userinfo profile.");
        let response = self
            .client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&tokens.access_token)
            .send()
            .await
            .map_err(|e| GoogleApiError::ResponseError(e.to_string()))?;
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GoogleApiError::ExchangeFailed(message));
        }
        let info = response.json::<UserInfo>().await.map_err(|e| GoogleApiError::JsonError(e.to_string()))?;
        Ok(GoogleProfile {
            google_id: info.id,
            email: info.email,
            first_name: info.given_name,
            last_name: info.family_name,
            picture: info.picture,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
struct UserInfo {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}
