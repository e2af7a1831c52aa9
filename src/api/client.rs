use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::error::ApiError;
use super::types::{
    ErrorBody, HealthStatus, LibraryStats, Movie, MovieQuery, Page, ScanRequest,
    ScanStartResponse, ScanStarted, ShowQuery, TvShow,
};
use crate::config::ApiConfig;
use crate::scan::{ScanSnapshot, ScanStatusSource, ScanTask};

/// HTTP client for the library server.
///
/// Constructed explicitly from [`ApiConfig`] and passed to whoever needs it.
#[derive(Debug, Clone)]
pub struct HttpLibraryApi {
    client: Client,
    base_url: Url,
}

impl HttpLibraryApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            scenescape_common::Error::invalid_input(format!(
                "invalid API base URL {:?}: {e}",
                config.base_url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(scenescape_common::Error::invalid_input(format!(
                "API base URL {:?} cannot carry a path",
                config.base_url
            ))
            .into());
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Append `segments` to the base URL, percent-encoding each one, so ids
    /// containing `/`, `?` or `#` stay inside their own segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.client.get(self.url(segments));
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        decode(response).await
    }

    /// Ask the server to scan `path`. The path is trimmed; an empty path is
    /// rejected without contacting the server.
    #[instrument(skip(self))]
    pub async fn start_scan(&self, path: &str) -> Result<ScanStarted, ApiError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(scenescape_common::Error::invalid_input("scan path is empty").into());
        }

        let response = self
            .client
            .post(self.url(&["api", "scan"]))
            .json(&ScanRequest { path })
            .send()
            .await?;
        let body: ScanStartResponse = decode(response).await?;
        let started = body.into_started().ok_or(ApiError::MissingTaskId)?;
        debug!(task_id = %started.task_id, "Scan started");
        Ok(started)
    }

    pub async fn scan_status(&self, task_id: &str) -> Result<ScanTask, ApiError> {
        let snapshot: ScanSnapshot = self
            .get::<_, ()>(&["api", "scan", task_id], None)
            .await?;
        snapshot
            .into_task(task_id)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn movies(&self, query: &MovieQuery) -> Result<Page<Movie>, ApiError> {
        self.get(&["api", "movies"], Some(query)).await
    }

    pub async fn tv_shows(&self, query: &ShowQuery) -> Result<Page<TvShow>, ApiError> {
        self.get(&["api", "tv-shows"], Some(query)).await
    }

    pub async fn movie(&self, id: u64) -> Result<Movie, ApiError> {
        let id = id.to_string();
        self.get::<_, ()>(&["api", "movies", id.as_str()], None).await
    }

    pub async fn tv_show(&self, id: u64) -> Result<TvShow, ApiError> {
        let id = id.to_string();
        self.get::<_, ()>(&["api", "tv-shows", id.as_str()], None).await
    }

    pub async fn stats(&self) -> Result<LibraryStats, ApiError> {
        self.get::<_, ()>(&["api", "stats"], None).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get::<_, ()>(&["api", "health"], None).await
    }
}

#[async_trait]
impl ScanStatusSource for HttpLibraryApi {
    async fn scan_status(&self, task_id: &str) -> Result<ScanTask, ApiError> {
        HttpLibraryApi::scan_status(self, task_id).await
    }
}

/// Map error statuses, then decode the body from bytes so a bad body shows up
/// as [`ApiError::Decode`] rather than a transport failure.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(ErrorBody::into_message);
        return Err(ApiError::from_status(status, message));
    }

    Ok(serde_json::from_slice(&bytes)?)
}
