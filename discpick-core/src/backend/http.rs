use std::time::Duration;

use async_trait::async_trait;
use discpick_model::{
    PendingStatusResponse, SubmitDecisionRequest, SubmitDecisionResponse,
    normalize_base_url,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{BackendError, SelectionBackend};

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    pub base_url: String,
    pub pending_path: String,
    pub submit_path: String,
    pub request_timeout: Duration,
}

/// JSON-over-HTTP client for the ripping backend's metadata endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    pending_path: String,
    submit_path: String,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let base_url = normalize(&config.base_url);
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| BackendError::Transport {
                url: base_url.clone(),
                message: format!("failed to build HTTP client: {err}"),
            })?;

        info!(base_url = %base_url, "created selection backend client");

        Ok(Self {
            client,
            base_url,
            pending_path: config.pending_path,
            submit_path: config.submit_path,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_body(
        url: &str,
        response: reqwest::Response,
    ) -> Result<String, BackendError> {
        response.text().await.map_err(|err| BackendError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

fn normalize(raw: &str) -> String {
    let normalized = normalize_base_url(raw);
    if normalized != raw.trim() {
        warn!(
            "[HttpBackend] Normalized base URL from '{}' to '{}'",
            raw, normalized
        );
    }
    normalized
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|err| BackendError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}

fn transport(url: &str, err: reqwest::Error) -> BackendError {
    BackendError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl SelectionBackend for HttpBackend {
    async fn pending_status(&self) -> Result<PendingStatusResponse, BackendError> {
        let url = self.endpoint(&self.pending_path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| transport(&url, err))?;

        let status = response.status();
        let body = Self::read_body(&url, response).await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }
        decode(&url, &body)
    }

    async fn submit_decision(
        &self,
        request: &SubmitDecisionRequest,
    ) -> Result<SubmitDecisionResponse, BackendError> {
        let url = self.endpoint(&self.submit_path);
        debug!(
            disc_id = %request.disc_id,
            disc_type = %request.disc_type,
            selection = %request.selection,
            "posting selection decision"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| transport(&url, err))?;

        let status = response.status();
        let stale = || BackendError::Stale {
            disc_id: request.disc_id.to_string(),
        };
        if matches!(status, StatusCode::CONFLICT | StatusCode::GONE) {
            return Err(stale());
        }

        let body = Self::read_body(&url, response).await?;
        if status.is_success() {
            return decode(&url, &body);
        }

        // A 404 only means "unknown disc" when the select handler itself
        // answered; a router 404 points at a wrong submit path.
        if status == StatusCode::NOT_FOUND {
            return match serde_json::from_str::<SubmitDecisionResponse>(&body) {
                Ok(_) => Err(stale()),
                Err(_) => Err(BackendError::Status {
                    url,
                    status: status.as_u16(),
                    body,
                }),
            };
        }

        // Error responses usually still carry `{success: false, message}`;
        // prefer that message over the raw status line.
        match serde_json::from_str::<SubmitDecisionResponse>(&body) {
            Ok(parsed) if !parsed.success => Ok(parsed),
            _ => Err(BackendError::Status {
                url,
                status: status.as_u16(),
                body,
            }),
        }
    }
}
