use crate::tokbox_api::archive::{millis_to_utc, null_as_default, ArchiveStatus};
use crate::tokbox_api::types::{ApiError, TokboxError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Archive status notification posted to a project's callback URL
///
/// This is a passive shape: receiving and authenticating the callback is up
/// to the application's own HTTP server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchiveStatusChange {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event: String,
    /// Creation time in milliseconds since the epoch
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub partner_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resolution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub url: Option<String>,
}

impl ArchiveStatusChange {
    /// Parse a callback request body
    pub fn from_json(body: &str) -> Result<Self, TokboxError> {
        serde_json::from_str(body).map_err(|e| {
            TokboxError::Api(ApiError::Parse(format!(
                "Invalid archive callback body: {}",
                e
            )))
        })
    }

    pub fn lifecycle(&self) -> ArchiveStatus {
        ArchiveStatus::parse(&self.status)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_at)
    }
}
