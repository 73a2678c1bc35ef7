use crate::tokbox_api::types::TokboxError;
use std::fmt;
use std::time::Duration;

/// Default TokBox API base URL
pub const DEFAULT_API_URL: &str = "https://api.opentok.com";

/// Default timeout applied to every HTTP request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the project API key
pub const API_KEY_ENV: &str = "TOKBOX_API_KEY";

/// Environment variable holding the project API secret
pub const API_SECRET_ENV: &str = "TOKBOX_API_SECRET";

/// Project credentials used to sign every token
///
/// Immutable once constructed. The secret is never serialized and is
/// redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create credentials from a project API key and secret
    ///
    /// Neither value is validated; a malformed pair only fails once the
    /// remote service rejects a request signed with it.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load credentials from `TOKBOX_API_KEY` and `TOKBOX_API_SECRET`
    pub fn from_env() -> Result<Self, TokboxError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| TokboxError::Config(format!("{} is not set", API_KEY_ENV)))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| TokboxError::Config(format!("{} is not set", API_SECRET_ENV)))?;

        tracing::debug!("Loaded TokBox credentials from environment for key {}", api_key);
        Ok(Self::new(api_key, api_secret))
    }

    /// Project API key (also the partner id embedded in session tokens)
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &[u8] {
        self.api_secret.as_bytes()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Transport settings for [`TokboxClient`](crate::TokboxClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all endpoints are resolved against
    pub api_url: String,
    /// Per-request timeout enforced by the HTTP transport
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL (builder pattern)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout (builder pattern)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
