/// TokBox API integration module
///
/// This module provides the credentials, token signing, and API client used
/// to manage sessions and archives on the TokBox (OpenTok) platform.
///
/// ## Request Flow
///
/// 1. The application builds a [`TokboxClient`] from its project key and secret
/// 2. Every API call mints a fresh HS256 service token (`X-OPENTOK-AUTH` header)
/// 3. The request is sent with a 30 second timeout and no retries
/// 4. Only HTTP 200 counts as success; anything else surfaces status and body
/// 5. Client session tokens (`T1==`) are signed locally with HMAC-SHA1 and
///    handed to end-user clients
pub mod archive;
pub mod callback;
pub mod client;
pub mod config;
pub mod jwt;
pub mod random;
pub mod session;
pub mod session_token;
pub mod types;

pub use archive::{ArchiveList, ArchiveMetadata, ArchiveOptions, ArchiveStatus};
pub use callback::ArchiveStatusChange;
pub use client::TokboxClient;
pub use config::{ClientConfig, Credentials};
pub use session::{MediaMode, Session, SessionInfo};
pub use session_token::Role;
pub use types::{ApiError, TokboxError};
