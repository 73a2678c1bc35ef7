//! Client session tokens (`T1==` format)
//!
//! A session token authorizes an end-user client to join one session with a
//! given role. It is the legacy TokBox token scheme: an HMAC-SHA1 signature
//! over a form-encoded payload, wrapped in base64.
//!
//! ## Wire contract
//!
//! The payload is built from these pairs, always in this order:
//!
//! | key               | present                        |
//! |-------------------|--------------------------------|
//! | `session_id`      | always                         |
//! | `create_time`     | always (UTC unix seconds)      |
//! | `expire_time`     | only when expiration > 0       |
//! | `role`            | only when a role is given      |
//! | `connection_data` | only when non-empty            |
//! | `nonce`           | always, in `[0, 999999)`       |
//!
//! Keys and values are escaped with `application/x-www-form-urlencoded`
//! rules (space becomes `+`) and joined with `&`. The signed bytes are the
//! same bytes embedded in the token:
//!
//! ```text
//! T1== base64( "partner_id=<api key>&sig=<hex hmac-sha1>:<payload>" )
//! ```

use crate::tokbox_api::config::Credentials;
use crate::tokbox_api::types::TokboxError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

type HmacSha1 = Hmac<Sha1>;

/// Prefix of every session token
pub const TOKEN_PREFIX: &str = "T1==";

/// One hour, in seconds
pub const HOURS_1: u64 = 3_600;
/// Two hours, in seconds
pub const HOURS_2: u64 = 7_200;
/// One day, in seconds
pub const HOURS_24: u64 = 86_400;
/// One week, in seconds
pub const WEEKS_1: u64 = 604_800;
/// Thirty days, in seconds
pub const DAYS_30: u64 = 2_592_000;

/// Capability granted to a session participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can publish streams, subscribe to streams, and signal
    Publisher,
    /// Can only subscribe to streams
    Subscriber,
    /// Publisher privileges plus force-unpublish and force-disconnect
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Publisher => "publisher",
            Role::Subscriber => "subscriber",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TokboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publisher" => Ok(Role::Publisher),
            "subscriber" => Ok(Role::Subscriber),
            "moderator" => Ok(Role::Moderator),
            other => Err(TokboxError::Signing(format!("Unknown role: {}", other))),
        }
    }
}

/// Inputs for minting a session token
#[derive(Debug, Clone, Copy)]
pub struct SessionTokenParams<'a> {
    pub session_id: &'a str,
    pub role: Option<Role>,
    /// Arbitrary metadata handed to other clients; omitted when empty
    pub connection_data: &'a str,
    /// Lifetime in seconds; `0` means the token carries no expiry
    pub expire_in: u64,
}

/// Build the canonical payload that gets signed and embedded
pub(crate) fn encode_payload(params: &SessionTokenParams<'_>, now: i64, nonce: u32) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("session_id", params.session_id);
    serializer.append_pair("create_time", &now.to_string());
    if params.expire_in > 0 {
        let expire_time = now.saturating_add_unsigned(params.expire_in);
        serializer.append_pair("expire_time", &expire_time.to_string());
    }
    if let Some(role) = params.role {
        serializer.append_pair("role", role.as_str());
    }
    if !params.connection_data.is_empty() {
        serializer.append_pair("connection_data", params.connection_data);
    }
    serializer.append_pair("nonce", &nonce.to_string());
    serializer.finish()
}

fn hmac_sha1(secret: &[u8]) -> Result<HmacSha1, TokboxError> {
    HmacSha1::new_from_slice(secret)
        .map_err(|e| TokboxError::Signing(format!("Failed to initialise HMAC-SHA1: {}", e)))
}

/// Sign a session token with an explicit clock reading and nonce
///
/// This is the deterministic core of [`Session::token`](crate::Session::token);
/// the same inputs always produce the same token.
pub fn sign_session_token(
    credentials: &Credentials,
    params: &SessionTokenParams<'_>,
    now: i64,
    nonce: u32,
) -> Result<String, TokboxError> {
    let payload = encode_payload(params, now, nonce);

    let mut mac = hmac_sha1(credentials.api_secret())?;
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    let pre_coded = format!(
        "partner_id={}&sig={}:{}",
        credentials.api_key(),
        signature,
        payload
    );

    tracing::debug!(
        "Signed session token for session {} (payload length: {})",
        params.session_id,
        payload.len()
    );

    Ok(format!("{}{}", TOKEN_PREFIX, BASE64.encode(pre_coded)))
}

/// A session token parsed back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSessionToken {
    pub partner_id: String,
    /// Lowercase hex HMAC-SHA1 digest
    pub signature: String,
    /// The exact bytes that were signed
    pub payload: String,
    pub session_id: String,
    pub create_time: i64,
    pub expire_time: Option<i64>,
    pub role: Option<Role>,
    pub connection_data: Option<String>,
    pub nonce: u32,
}

impl DecodedSessionToken {
    /// Recompute the signature with `credentials` and compare in constant time
    pub fn verify(&self, credentials: &Credentials) -> bool {
        let Ok(expected) = hex::decode(&self.signature) else {
            return false;
        };
        let Ok(mut mac) = hmac_sha1(credentials.api_secret()) else {
            return false;
        };
        mac.update(self.payload.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    /// Whether the token carries an expiry that is at or before `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expire_time.is_some_and(|expire_time| expire_time <= now)
    }
}

fn malformed(reason: &str) -> TokboxError {
    TokboxError::Signing(format!("Malformed session token: {}", reason))
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, TokboxError> {
    value
        .parse()
        .map_err(|_| malformed(&format!("{} is not a number", key)))
}

/// Parse a `T1==` token without checking its signature
pub fn decode_session_token(token: &str) -> Result<DecodedSessionToken, TokboxError> {
    let encoded = token
        .strip_prefix(TOKEN_PREFIX)
        .ok_or_else(|| malformed("missing T1== prefix"))?;
    let raw = BASE64
        .decode(encoded)
        .map_err(|e| malformed(&format!("invalid base64: {}", e)))?;
    let raw = String::from_utf8(raw).map_err(|_| malformed("payload is not UTF-8"))?;

    let rest = raw
        .strip_prefix("partner_id=")
        .ok_or_else(|| malformed("missing partner_id"))?;
    let (partner_id, rest) = rest
        .split_once("&sig=")
        .ok_or_else(|| malformed("missing sig"))?;
    let (signature, payload) = rest
        .split_once(':')
        .ok_or_else(|| malformed("missing signed payload"))?;

    let mut session_id = None;
    let mut create_time = None;
    let mut expire_time = None;
    let mut role = None;
    let mut connection_data = None;
    let mut nonce = None;

    for (key, value) in form_urlencoded::parse(payload.as_bytes()) {
        match key.as_ref() {
            "session_id" => session_id = Some(value.into_owned()),
            "create_time" => create_time = Some(parse_number(&key, &value)?),
            "expire_time" => expire_time = Some(parse_number(&key, &value)?),
            "role" => role = Some(value.parse::<Role>()?),
            "connection_data" => connection_data = Some(value.into_owned()),
            "nonce" => nonce = Some(parse_number(&key, &value)?),
            other => tracing::debug!("Ignoring unknown session token field: {}", other),
        }
    }

    Ok(DecodedSessionToken {
        partner_id: partner_id.to_string(),
        signature: signature.to_string(),
        payload: payload.to_string(),
        session_id: session_id.ok_or_else(|| malformed("missing session_id"))?,
        create_time: create_time.ok_or_else(|| malformed("missing create_time"))?,
        expire_time,
        role,
        connection_data,
        nonce: nonce.ok_or_else(|| malformed("missing nonce"))?,
    })
}
