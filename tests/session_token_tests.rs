//! Session Token Tests
//!
//! Tests for client session token minting through `Session::token` and the
//! standalone signing/decoding functions, including:
//! - Nonce uniqueness across identical requests
//! - Signature verification with the right and wrong secret
//! - Presence and value of the optional payload fields

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokbox_sdk::{
    decode_session_token, sign_session_token, Credentials, RandomSource, Role, SessionTokenParams,
    TokboxClient, DAYS_30, HOURS_1, HOURS_24, NONCE_BOUND, WEEKS_1,
};

const SESSION_ID: &str = "1_MX4xMjM0NTZ-fjE2OTk5OTk5OTk5OTl-abc~";

/// Hands out 1, 2, 3, ... so tests can predict nonces
#[derive(Debug, Default)]
struct CountingRandom {
    next: AtomicU32,
}

impl RandomSource for CountingRandom {
    fn nonce(&self) -> u32 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn token_id(&self) -> String {
        format!("token-{}", self.next.load(Ordering::SeqCst))
    }
}

fn client() -> TokboxClient {
    TokboxClient::new("123456", "test-secret").unwrap()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

// ============================================================================
// Minting Through Session
// ============================================================================

#[test]
fn test_identical_requests_produce_distinct_tokens() {
    let session = client().session_from_id(SESSION_ID);

    let tokens: HashSet<String> = (0..20)
        .map(|_| {
            session
                .token(Some(Role::Publisher), "user=42", HOURS_1)
                .unwrap()
        })
        .collect();
    assert_eq!(tokens.len(), 20);

    for token in &tokens {
        let decoded = decode_session_token(token).unwrap();
        assert_eq!(decoded.session_id, SESSION_ID);
        assert_eq!(decoded.role, Some(Role::Publisher));
        assert_eq!(decoded.connection_data.as_deref(), Some("user=42"));
        assert!(decoded.nonce < NONCE_BOUND);
    }
}

#[test]
fn test_injected_random_source_supplies_nonce() {
    let client = client().with_random_source(Arc::new(CountingRandom::default()));
    let session = client.session_from_id(SESSION_ID);

    let first = decode_session_token(&session.token(None, "", 0).unwrap()).unwrap();
    let second = decode_session_token(&session.token(None, "", 0).unwrap()).unwrap();

    assert_eq!(first.nonce, 1);
    assert_eq!(second.nonce, 2);
}

#[test]
fn test_token_has_t1_prefix_and_partner_id() {
    let session = client().session_from_id(SESSION_ID);
    let token = session.token(Some(Role::Moderator), "", 0).unwrap();

    assert!(token.starts_with("T1=="));
    let decoded = decode_session_token(&token).unwrap();
    assert_eq!(decoded.partner_id, "123456");
    assert_eq!(decoded.signature.len(), 40);
    assert!(decoded
        .signature
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_token_creation_time_is_current() {
    let before = now();
    let token = client()
        .session_from_id(SESSION_ID)
        .token(None, "", 0)
        .unwrap();
    let after = now();

    let decoded = decode_session_token(&token).unwrap();
    assert!(decoded.create_time >= before && decoded.create_time <= after);
}

// ============================================================================
// Signature Verification
// ============================================================================

#[test]
fn test_signature_verifies_with_correct_secret_only() {
    let token = client()
        .session_from_id(SESSION_ID)
        .token(Some(Role::Subscriber), "name=Bob", WEEKS_1)
        .unwrap();
    let decoded = decode_session_token(&token).unwrap();

    assert!(decoded.verify(&Credentials::new("123456", "test-secret")));
    assert!(!decoded.verify(&Credentials::new("123456", "test-secret ")));
    assert!(!decoded.verify(&Credentials::new("123456", "")));
}

#[test]
fn test_corrupted_signature_fails_verification() {
    let token = client()
        .session_from_id(SESSION_ID)
        .token(None, "", 0)
        .unwrap();
    let mut decoded = decode_session_token(&token).unwrap();
    decoded.signature = "zz".repeat(20);

    assert!(!decoded.verify(&Credentials::new("123456", "test-secret")));
}

// ============================================================================
// Optional Fields
// ============================================================================

#[test]
fn test_expire_time_present_only_when_positive() {
    let credentials = Credentials::new("123456", "test-secret");

    for expire_in in [0, 1, HOURS_24, DAYS_30] {
        let params = SessionTokenParams {
            session_id: SESSION_ID,
            role: None,
            connection_data: "",
            expire_in,
        };
        let token = sign_session_token(&credentials, &params, 1_700_000_000, 5).unwrap();
        let decoded = decode_session_token(&token).unwrap();

        if expire_in == 0 {
            assert_eq!(decoded.expire_time, None);
            assert!(!decoded.payload.contains("expire_time"));
        } else {
            assert_eq!(
                decoded.expire_time,
                Some(decoded.create_time + expire_in as i64)
            );
        }
    }
}

#[test]
fn test_role_and_connection_data_omitted_when_empty() {
    let credentials = Credentials::new("123456", "test-secret");
    let params = SessionTokenParams {
        session_id: SESSION_ID,
        role: None,
        connection_data: "",
        expire_in: 0,
    };

    let token = sign_session_token(&credentials, &params, 1_700_000_000, 5).unwrap();
    let decoded = decode_session_token(&token).unwrap();

    assert_eq!(decoded.role, None);
    assert_eq!(decoded.connection_data, None);
    assert_eq!(
        decoded.payload,
        "session_id=1_MX4xMjM0NTZ-fjE2OTk5OTk5OTk5OTl-abc%7E&create_time=1700000000&nonce=5"
    );
}

#[test]
fn test_connection_data_with_reserved_characters_survives() {
    let connection_data = r#"{"name":"Zoë & Co","seat":7}"#;
    let token = client()
        .session_from_id(SESSION_ID)
        .token(Some(Role::Publisher), connection_data, 0)
        .unwrap();

    let decoded = decode_session_token(&token).unwrap();
    assert_eq!(decoded.connection_data.as_deref(), Some(connection_data));
    assert!(decoded.verify(&Credentials::new("123456", "test-secret")));
}
