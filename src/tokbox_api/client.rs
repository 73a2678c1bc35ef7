use crate::tokbox_api::archive::{ArchiveList, ArchiveMetadata, ArchiveOptions, StartArchiveRequest};
use crate::tokbox_api::config::{ClientConfig, Credentials};
use crate::tokbox_api::jwt::{sign_service_token, AUTH_HEADER};
use crate::tokbox_api::random::{RandomSource, ThreadRandom};
use crate::tokbox_api::session::{MediaMode, Session, SessionInfo};
use crate::tokbox_api::types::{ApiError, TokboxError};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// HTTP client for the TokBox API
///
/// Holds the project credentials and a configured transport. Cloning is
/// cheap and clones share the same connection pool; all state is read-only
/// after construction, so a client can be used from many tasks at once.
#[derive(Debug, Clone)]
pub struct TokboxClient {
    credentials: Arc<Credentials>,
    /// Base URL for the TokBox API
    api_url: String,
    /// HTTP client for making requests
    client: reqwest::Client,
    random: Arc<dyn RandomSource>,
}

impl TokboxClient {
    /// Create a client for the production API with default settings
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tokbox_sdk::TokboxClient;
    ///
    /// # fn example() -> Result<(), tokbox_sdk::TokboxError> {
    /// let client = TokboxClient::new("45678901", "project-secret")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, TokboxError> {
        Self::with_config(Credentials::new(api_key, api_secret), ClientConfig::default())
    }

    /// Create a client from `TOKBOX_API_KEY` / `TOKBOX_API_SECRET`
    pub fn from_env() -> Result<Self, TokboxError> {
        Self::with_config(Credentials::from_env()?, ClientConfig::default())
    }

    /// Create a client with explicit credentials and transport settings
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, TokboxError> {
        tracing::debug!(
            "Creating TokboxClient for key {} with base URL: {}",
            credentials.api_key(),
            config.api_url
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TokboxError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            credentials: Arc::new(credentials),
            api_url: config.api_url,
            client,
            random: Arc::new(ThreadRandom),
        })
    }

    /// Replace the source of nonces and token ids (builder pattern)
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Project API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Get the base URL for this client
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn random(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }

    /// Mint a fresh service token
    ///
    /// A new token is minted for every request; tokens are never cached.
    pub fn service_token(&self) -> Result<String, TokboxError> {
        sign_service_token(
            &self.credentials,
            self.random.as_ref(),
            chrono::Utc::now().timestamp(),
        )
    }

    /// Start a request carrying `Accept: application/json` and a fresh
    /// service token; callers attach the body
    pub(crate) fn build_authenticated_request(
        &self,
        method: Method,
        url: &str,
    ) -> Result<RequestBuilder, TokboxError> {
        let token = self.service_token()?;

        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(AUTH_HEADER, token))
    }

    /// Send a request and return the body of a 200 response
    ///
    /// Any other status becomes `ApiError::Http` carrying the raw body.
    async fn execute(&self, request: RequestBuilder, operation: &str) -> Result<String, TokboxError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send {} request: {}", operation, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        tracing::debug!("{} returned status: {}", operation, status);

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read {} response body: {}", operation, e);
            ApiError::from(e)
        })?;

        if status != StatusCode::OK {
            tracing::error!(
                "{} failed: HTTP {} - {}",
                operation,
                status.as_u16(),
                body
            );
            return Err(TokboxError::Api(ApiError::Http {
                status: status.as_u16(),
                message: body,
            }));
        }

        Ok(body)
    }

    fn decode<T: DeserializeOwned>(body: &str, operation: &str) -> Result<T, TokboxError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!("Failed to parse {} response: {} - Response body: {}", operation, e, body);
            TokboxError::Api(ApiError::Parse(format!("Failed to parse response: {}", e)))
        })
    }

    fn archive_url(&self) -> String {
        format!("{}/v2/project/{}/archive", self.api_url, self.api_key())
    }

    /// Create a new session
    ///
    /// # Arguments
    ///
    /// * `location` - IP address hint for choosing the media server; empty to let the platform decide
    /// * `media_mode` - Whether media goes through the media router or peer to peer
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tokbox_sdk::{MediaMode, Role, TokboxClient};
    ///
    /// # async fn example() -> Result<(), tokbox_sdk::TokboxError> {
    /// let client = TokboxClient::new("45678901", "project-secret")?;
    /// let session = client.new_session("", MediaMode::Routed).await?;
    /// let token = session.token(Some(Role::Publisher), "", tokbox_sdk::HOURS_24)?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_session(
        &self,
        location: &str,
        media_mode: MediaMode,
    ) -> Result<Session, TokboxError> {
        let url = format!("{}/session/create", self.api_url);

        let mut params = vec![("p2p.preference", media_mode.as_preference())];
        if !location.is_empty() {
            params.push(("location", location));
        }

        tracing::info!("Creating session: media_mode={:?}", media_mode);

        let request = self
            .build_authenticated_request(Method::POST, &url)?
            .form(&params);
        let body = self.execute(request, "session create").await?;

        let sessions: Vec<SessionInfo> = Self::decode(&body, "session create")?;
        let info = sessions.into_iter().next().ok_or_else(|| {
            tracing::error!("Session create response contained no sessions");
            TokboxError::Api(ApiError::Parse(
                "Response did not contain a session".to_string(),
            ))
        })?;

        tracing::info!("Session created: session_id={}", info.session_id);
        Ok(Session::new(info, self.clone()))
    }

    /// Get a handle to an existing session without calling the API
    pub fn session_from_id(&self, session_id: impl Into<String>) -> Session {
        let info = SessionInfo {
            session_id: session_id.into(),
            ..Default::default()
        };
        Session::new(info, self.clone())
    }

    /// Start recording a session
    pub async fn start_archive(
        &self,
        session_id: &str,
        name: &str,
        options: &ArchiveOptions,
    ) -> Result<ArchiveMetadata, TokboxError> {
        let url = self.archive_url();
        let payload = StartArchiveRequest::new(session_id, name, options);

        tracing::info!("Starting archive '{}' for session {}", name, session_id);

        let request = self
            .build_authenticated_request(Method::POST, &url)?
            .json(&payload);
        let body = self.execute(request, "start archive").await?;
        let archive: ArchiveMetadata = Self::decode(&body, "start archive")?;

        tracing::info!(
            "Archive started: archive_id={}, status={}",
            archive.id,
            archive.status
        );
        Ok(archive)
    }

    /// Stop a running archive
    pub async fn stop_archive(&self, archive_id: &str) -> Result<(), TokboxError> {
        let url = format!("{}/{}/stop", self.archive_url(), archive_id);

        tracing::info!("Stopping archive {}", archive_id);

        let request = self.build_authenticated_request(Method::POST, &url)?;
        self.execute(request, "stop archive").await?;
        Ok(())
    }

    /// List the archives of this project
    pub async fn list_archives(&self) -> Result<ArchiveList, TokboxError> {
        let url = self.archive_url();

        tracing::debug!("Listing archives from: {}", url);

        let request = self.build_authenticated_request(Method::GET, &url)?;
        let body = self.execute(request, "list archives").await?;
        let list: ArchiveList = Self::decode(&body, "list archives")?;

        tracing::debug!("Listed {} of {} archives", list.items.len(), list.count);
        Ok(list)
    }
}
