use crate::tokbox_api::archive::{null_as_default, ArchiveList, ArchiveMetadata, ArchiveOptions};
use crate::tokbox_api::client::TokboxClient;
use crate::tokbox_api::session_token::{sign_session_token, Role, SessionTokenParams};
use crate::tokbox_api::types::TokboxError;
use serde::{Deserialize, Serialize};

/// How a session routes media; fixed when the session is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaMode {
    /// Streams go through the media router (required for archiving)
    Routed,
    /// Clients connect directly, falling back to a TURN relay
    RelayedP2P,
}

impl MediaMode {
    /// Value of the `p2p.preference` form field
    pub fn as_preference(&self) -> &'static str {
        match self {
            MediaMode::Routed => "disabled",
            MediaMode::RelayedP2P => "enabled",
        }
    }
}

/// Session description as returned by the session create endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub partner_id: String,
    #[serde(rename = "create_dt", deserialize_with = "null_as_default")]
    pub created_at: String,
    /// `null` in create responses
    #[serde(rename = "session_status")]
    pub status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub media_server_url: String,
}

/// Handle to one session, bound to the client that created it
///
/// All operations go through the owning [`TokboxClient`].
#[derive(Debug, Clone)]
pub struct Session {
    info: SessionInfo,
    client: TokboxClient,
}

impl Session {
    pub(crate) fn new(info: SessionInfo, client: TokboxClient) -> Self {
        Self { info, client }
    }

    pub fn id(&self) -> &str {
        &self.info.session_id
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    /// Mint a client token for this session
    ///
    /// # Arguments
    ///
    /// * `role` - Capability granted to the client; `None` leaves it to the platform default
    /// * `connection_data` - Metadata passed to other clients; empty to omit
    /// * `expire_in` - Lifetime in seconds, `0` for no explicit expiry
    ///
    /// Two calls with the same arguments yield different tokens because each
    /// embeds the creation time and a fresh nonce.
    pub fn token(
        &self,
        role: Option<Role>,
        connection_data: &str,
        expire_in: u64,
    ) -> Result<String, TokboxError> {
        let params = SessionTokenParams {
            session_id: &self.info.session_id,
            role,
            connection_data,
            expire_in,
        };

        sign_session_token(
            self.client.credentials(),
            &params,
            chrono::Utc::now().timestamp(),
            self.client.random().nonce(),
        )
    }

    /// Start a composed 1280x720 archive with audio and video
    pub async fn start_archive(&self, name: &str) -> Result<ArchiveMetadata, TokboxError> {
        self.start_archive_with(name, &ArchiveOptions::default())
            .await
    }

    pub async fn start_archive_with(
        &self,
        name: &str,
        options: &ArchiveOptions,
    ) -> Result<ArchiveMetadata, TokboxError> {
        self.client
            .start_archive(&self.info.session_id, name, options)
            .await
    }

    pub async fn stop_archive(&self, archive_id: &str) -> Result<(), TokboxError> {
        self.client.stop_archive(archive_id).await
    }

    /// List the archives of the owning project
    pub async fn list_archives(&self) -> Result<ArchiveList, TokboxError> {
        self.client.list_archives().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokbox_api::session_token::decode_session_token;
    use serde_json::json;

    #[test]
    fn test_media_mode_preference() {
        assert_eq!(MediaMode::Routed.as_preference(), "disabled");
        assert_eq!(MediaMode::RelayedP2P.as_preference(), "enabled");
    }

    #[test]
    fn test_session_info_deserialization() {
        let info: SessionInfo = serde_json::from_value(json!({
            "session_id": "2_MX4xMjM0NTZ-fg",
            "project_id": "123456",
            "partner_id": "123456",
            "create_dt": "Mon Mar 17 00:41:31 PDT 2014",
            "session_status": null,
            "media_server_url": ""
        }))
        .unwrap();

        assert_eq!(info.session_id, "2_MX4xMjM0NTZ-fg");
        assert_eq!(info.created_at, "Mon Mar 17 00:41:31 PDT 2014");
        assert_eq!(info.status, None);
    }

    #[test]
    fn test_token_uses_session_id() {
        let client = TokboxClient::new("123456", "secret").unwrap();
        let session = client.session_from_id("my-session");

        let token = session.token(Some(Role::Subscriber), "", 0).unwrap();
        let decoded = decode_session_token(&token).unwrap();
        assert_eq!(decoded.session_id, "my-session");
        assert_eq!(decoded.partner_id, "123456");
        assert_eq!(decoded.role, Some(Role::Subscriber));
        assert_eq!(decoded.expire_time, None);
        assert_eq!(decoded.connection_data, None);
    }
}
