//! TokBox SDK
//!
//! A Rust library for the TokBox (OpenTok) session, token and archive API.
//!
//! This SDK provides:
//! - Client session tokens (`T1==` HMAC-SHA1 scheme) for end-user clients
//! - Short-lived HS256 service tokens authenticating every API call
//! - Session creation and archive start/stop/list operations
//! - Type definitions for API responses, archive callbacks and errors
//!
//! # Example
//!
//! ```no_run
//! use tokbox_sdk::{MediaMode, Role, TokboxClient, HOURS_24};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TokboxClient::new("45678901", "project-secret")?;
//!
//! // Create a routed session and hand a publisher token to a client
//! let session = client.new_session("", MediaMode::Routed).await?;
//! let token = session.token(Some(Role::Publisher), "name=Alice", HOURS_24)?;
//!
//! // Record it
//! let archive = session.start_archive("weekly-sync").await?;
//! session.stop_archive(&archive.id).await?;
//!
//! let archives = session.list_archives().await?;
//! println!("{} archives, token {}", archives.count, token.len());
//! # Ok(())
//! # }
//! ```

pub mod tokbox_api;

// Re-export commonly used types and functions
pub use tokbox_api::{
    archive::{ArchiveList, ArchiveMetadata, ArchiveOptions, ArchiveStatus, OutputMode, Resolution},
    callback::ArchiveStatusChange,
    client::TokboxClient,
    config::{ClientConfig, Credentials},
    jwt::{sign_service_token, verify_service_token, ServiceClaims, AUTH_HEADER, SERVICE_TOKEN_TTL_SECS},
    random::{RandomSource, ThreadRandom, NONCE_BOUND},
    session::{MediaMode, Session, SessionInfo},
    session_token::{
        decode_session_token, sign_session_token, DecodedSessionToken, Role, SessionTokenParams,
        DAYS_30, HOURS_1, HOURS_2, HOURS_24, WEEKS_1,
    },
    types::{ApiError, TokboxError},
};
