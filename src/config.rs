//! Application configuration.
//!
//! All settings are required and read from the environment once at
//! startup into an immutable [`AppConfig`]; the process refuses to start
//! if any value is missing, empty, or malformed. Components receive the
//! parts they need by reference instead of reading process-wide state.

use chrono::Duration;

use crate::secret::SecretString;
use crate::AuthError;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on.
    pub http_port: u16,
    /// Session token and cookie settings.
    pub session: SessionSettings,
    /// Identity provider settings.
    pub azure: AzureSettings,
}

/// Settings for the session token and the cookie that carries it.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Name of the browser cookie holding the session blob.
    pub cookie_name: String,
    /// Key of the session token inside the blob.
    pub token_field: String,
    /// Shared secret for token and cookie signing.
    pub signing_secret: SecretString,
    /// Session token lifetime.
    pub expiry: Duration,
}

/// Azure AD implicit-flow settings.
#[derive(Debug, Clone)]
pub struct AzureSettings {
    pub tenant_id: String,
    pub client_id: String,
    /// Route path the provider redirects back to. Must start with `/`.
    pub redirect_path: String,
    pub domain_hint: String,
    pub resource: String,
    /// Public base URL of this deployment, without trailing slash.
    pub web_url: String,
}

impl AzureSettings {
    /// Absolute redirect URI registered with the provider.
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.web_url, self.redirect_path)
    }

    /// The provider authorize URL the browser is sent to for login.
    pub fn authorize_url(&self) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/authorize?response_type=token\
             &client_id={}&redirect_uri={}&domain_hint={}&resource={}",
            urlencoding::encode(&self.tenant_id),
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri()),
            urlencoding::encode(&self.domain_hint),
            urlencoding::encode(&self.resource),
        )
    }
}

impl AppConfig {
    /// Reads the full configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` naming the first setting that
    /// is missing, empty, or fails to parse.
    pub fn from_env() -> Result<Self, AuthError> {
        let redirect_path = require("AZURE_REDIRECT_PATH")?;
        if !redirect_path.starts_with('/') {
            return Err(AuthError::Configuration(
                "AZURE_REDIRECT_PATH must start with '/'".to_owned(),
            ));
        }

        let expiry_hours: i64 = require_parsed("TOKEN_EXPIRY_HOURS")?;
        if expiry_hours <= 0 {
            return Err(AuthError::Configuration(
                "TOKEN_EXPIRY_HOURS must be positive".to_owned(),
            ));
        }

        Ok(Self {
            http_port: require_parsed("HTTP_PORT")?,
            session: SessionSettings {
                cookie_name: require("SESSION_COOKIE_NAME")?,
                token_field: require("SESSION_TOKEN_FIELD")?,
                signing_secret: SecretString::new(require("TOKEN_SIGNING_SECRET")?),
                expiry: Duration::hours(expiry_hours),
            },
            azure: AzureSettings {
                tenant_id: require("AZURE_TENANT_ID")?,
                client_id: require("AZURE_CLIENT_ID")?,
                redirect_path,
                domain_hint: require("AZURE_DOMAIN_HINT")?,
                resource: require("AZURE_RESOURCE")?,
                web_url: require("WEB_BASE_URL")?,
            },
        })
    }
}

/// Reads a mandatory environment variable, trimming surrounding
/// whitespace. An empty value counts as missing.
fn require(name: &str) -> Result<String, AuthError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(AuthError::Configuration(format!(
            "mandatory setting \"{name}\" is missing or empty"
        ))),
    }
}

fn require_parsed<T: std::str::FromStr>(name: &str) -> Result<T, AuthError> {
    require(name)?.parse().map_err(|_| {
        AuthError::Configuration(format!("setting \"{name}\" could not be parsed"))
    })
}
