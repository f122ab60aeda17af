use std::env;

use fk_common::Secret;
use log::*;
use rand::{distributions::Alphanumeric, Rng};

const DEFAULT_FK_HOST: &str = "127.0.0.1";
const DEFAULT_FK_PORT: u16 = 3000;
const DEFAULT_FK_DATABASE_URL: &str = "sqlite://data/flipkit.db";
const DEFAULT_FK_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_PAYSTACK_API_URL: &str = "https://api.paystack.co";
const DEFAULT_RATE_API_URL: &str = "https://api.exchangerate-api.com";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Where successful Google sign-ins are redirected to, with `?token=<jwt>` appended.
    pub frontend_url: String,
    pub auth: AuthConfig,
    pub paystack: PaystackConfig,
    pub google: GoogleOauthConfig,
    pub rate_api_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FK_HOST.to_string(),
            port: DEFAULT_FK_PORT,
            database_url: DEFAULT_FK_DATABASE_URL.to_string(),
            frontend_url: DEFAULT_FK_FRONTEND_URL.to_string(),
            auth: AuthConfig::default(),
            paystack: PaystackConfig::default(),
            google: GoogleOauthConfig::default(),
            rate_api_url: DEFAULT_RATE_API_URL.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("FK_HOST").ok().unwrap_or_else(|| DEFAULT_FK_HOST.into());
        let port = env::var("FK_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for FK_PORT. {e} Using the default, {DEFAULT_FK_PORT}, instead.");
                    DEFAULT_FK_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_FK_PORT);
        let database_url = env::var("FK_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ FK_DATABASE_URL is not set. Using the default, {DEFAULT_FK_DATABASE_URL}.");
            DEFAULT_FK_DATABASE_URL.to_string()
        });
        let frontend_url = env::var("FK_FRONTEND_URL").ok().unwrap_or_else(|| DEFAULT_FK_FRONTEND_URL.into());
        let rate_api_url = env::var("FK_EXCHANGE_RATE_URL").ok().unwrap_or_else(|| DEFAULT_RATE_API_URL.into());
        Self {
            host,
            port,
            database_url,
            frontend_url,
            auth: AuthConfig::from_env_or_default(),
            paystack: PaystackConfig::from_env_or_default(),
            google: GoogleOauthConfig::from_env_or_default(),
            rate_api_url,
        }
    }
}

/// HS256 signing configuration for session tokens.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    pub jwt_secret: Secret<String>,
}

impl AuthConfig {
    pub fn from_env_or_default() -> Self {
        match env::var("FK_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => Self { jwt_secret: Secret::new(secret) },
            _ => {
                let secret: String = rand::thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
                warn!(
                    "🪛️ FK_JWT_SECRET is not set. A random secret has been generated for this session. All issued \
                     tokens will be invalidated when the server restarts. Set FK_JWT_SECRET to a long random value in \
                     production."
                );
                Self { jwt_secret: Secret::new(secret) }
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PaystackConfig {
    /// The Paystack API base, e.g. "https://api.paystack.co".
    pub api_url: String,
    pub secret_key: Secret<String>,
}

impl PaystackConfig {
    pub fn from_env_or_default() -> Self {
        let api_url = env::var("FK_PAYSTACK_API_URL").ok().unwrap_or_else(|| DEFAULT_PAYSTACK_API_URL.into());
        let secret_key = env::var("FK_PAYSTACK_SECRET_KEY").ok().unwrap_or_else(|| {
            error!("🪛️ FK_PAYSTACK_SECRET_KEY is not set. Payment verification will fail without it.");
            String::default()
        });
        Self { api_url, secret_key: Secret::new(secret_key) }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GoogleOauthConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub redirect_url: String,
}

impl GoogleOauthConfig {
    pub fn from_env_or_default() -> Self {
        let client_id = env::var("FK_GOOGLE_CLIENT_ID").ok().unwrap_or_else(|| {
            error!("🪛️ FK_GOOGLE_CLIENT_ID is not set. Google sign-in will fail without it.");
            String::default()
        });
        let client_secret = env::var("FK_GOOGLE_CLIENT_SECRET").ok().unwrap_or_else(|| {
            error!("🪛️ FK_GOOGLE_CLIENT_SECRET is not set. Google sign-in will fail without it.");
            String::default()
        });
        let redirect_url = env::var("FK_GOOGLE_REDIRECT_URL").ok().unwrap_or_else(|| {
            format!("http://{DEFAULT_FK_HOST}:{DEFAULT_FK_PORT}/auth/google/callback")
        });
        Self { client_id, client_secret: Secret::new(client_secret), redirect_url }
    }
}

/// The subset of the configuration that handlers need at request time.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    pub frontend_url: String,
}
