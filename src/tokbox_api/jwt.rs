use crate::tokbox_api::config::Credentials;
use crate::tokbox_api::random::RandomSource;
use crate::tokbox_api::types::TokboxError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Header carrying the service token on every API request
pub const AUTH_HEADER: &str = "X-OPENTOK-AUTH";

/// Lifetime of a service token in seconds
///
/// The platform rejects tokens whose `exp` is more than five minutes after
/// `iat`. A fresh token is minted per request, so a short window is enough.
pub const SERVICE_TOKEN_TTL_SECS: i64 = 180;

/// Issuer type claim for project-level credentials
pub const ISSUER_TYPE_PROJECT: &str = "project";

/// Claims of the service token used to authenticate API calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceClaims {
    /// Issuer - the project API key
    pub iss: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
    /// Issuer type, always "project"
    pub ist: String,
}

impl ServiceClaims {
    fn new(api_key: &str, now: i64, jti: String) -> Self {
        Self {
            iss: api_key.to_string(),
            iat: now,
            exp: now + SERVICE_TOKEN_TTL_SECS,
            jti,
            ist: ISSUER_TYPE_PROJECT.to_string(),
        }
    }
}

/// Mint a service token signed with HS256 at an explicit clock reading
pub fn sign_service_token(
    credentials: &Credentials,
    random: &dyn RandomSource,
    now: i64,
) -> Result<String, TokboxError> {
    let claims = ServiceClaims::new(credentials.api_key(), now, random.token_id());

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(credentials.api_secret()),
    )
    .map_err(|e| TokboxError::Signing(format!("Failed to sign service token: {}", e)))?;

    tracing::debug!(
        "Minted service token: jti={}, exp={} (length: {})",
        claims.jti,
        claims.exp,
        token.len()
    );
    Ok(token)
}

/// Validate a service token's signature, expiry and issuer
///
/// Mirrors what the platform checks on its side; useful when a component
/// needs to accept tokens minted by another client of the same project.
pub fn verify_service_token(
    token: &str,
    credentials: &Credentials,
) -> Result<ServiceClaims, TokboxError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[credentials.api_key()]);
    validation.set_required_spec_claims(&["exp", "iss"]);

    let claims = decode::<ServiceClaims>(
        token,
        &DecodingKey::from_secret(credentials.api_secret()),
        &validation,
    )?
    .claims;

    if claims.ist != ISSUER_TYPE_PROJECT {
        return Err(TokboxError::Signing(format!(
            "Unexpected issuer type: {}",
            claims.ist
        )));
    }

    Ok(claims)
}
