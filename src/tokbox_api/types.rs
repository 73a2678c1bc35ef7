use std::fmt;

/// TokBox SDK error type
///
/// Represents all possible errors that can occur when minting tokens or
/// interacting with the TokBox API. No variant ever carries the API secret.
#[derive(Debug)]
pub enum TokboxError {
    /// Client configuration is invalid or incomplete
    Config(String),
    /// Token signing (or parsing a signed token) failed
    Signing(String),
    /// API request failed (network, HTTP, or response parsing error)
    Api(ApiError),
}

impl TokboxError {
    /// Whether retrying the same call could succeed.
    ///
    /// Only transport failures qualify; the library itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TokboxError::Api(ApiError::Network(_)))
    }

    /// HTTP status code of a rejected request, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TokboxError::Api(ApiError::Http { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for TokboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokboxError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TokboxError::Signing(msg) => write!(f, "Token signing failed: {}", msg),
            TokboxError::Api(err) => write!(f, "API error: {}", err),
        }
    }
}

impl std::error::Error for TokboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TokboxError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for TokboxError {
    fn from(err: ApiError) -> Self {
        TokboxError::Api(err)
    }
}

impl From<jsonwebtoken::errors::Error> for TokboxError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        TokboxError::Signing(err.to_string())
    }
}

/// API-specific errors
#[derive(Debug)]
pub enum ApiError {
    /// Network error (connection, timeout, etc.)
    Network(String),
    /// Non-200 response; `message` is the raw response body
    Http { status: u16, message: String },
    /// Failed to parse response
    Parse(String),
    /// Request building failed
    Request(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Request(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timeout".to_string())
        } else if err.is_connect() {
            ApiError::Network(format!("Connection failed: {}", err))
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else if err.is_body() {
            ApiError::Network(format!("Failed to read response body: {}", err))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
