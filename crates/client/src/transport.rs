use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    credentials::Credentials,
    error::{MorphError, SubmissionError},
};

const API_KEY_HEADER: &str = "x-api-key";
const API_SECRET_HEADER: &str = "x-api-secret";

/// Outbound leg of a remote-mode build.
///
/// Implementations resolve `Ok(())` only when the service accepted the
/// document with a 2xx status.
#[async_trait]
pub trait ResponseTransport: Send + Sync {
    async fn post_response(
        &self,
        request_id: &str,
        credentials: &Credentials,
        document: &Value,
    ) -> Result<(), SubmissionError>;
}

/// `.` and `..` are dot-segments: URL normalization drops them, so the
/// document would land on `/v0/requests/response`.
pub fn is_routable_request_id(request_id: &str) -> bool {
    !request_id.trim().is_empty() && !matches!(request_id, "." | "..")
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, MorphError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, MorphError> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| {
            MorphError::configuration(format!("invalid base url '{base_url}': {err}"))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(MorphError::configuration(format!(
                "base url must be an http(s) url, got '{base_url}'"
            )));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/v0/requests/{request_id}/response`, with the request id
    /// encoded as a single path segment.
    pub fn response_url(&self, request_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v0", "requests", request_id, "response"]);
        }
        url
    }
}

#[async_trait]
impl ResponseTransport for HttpTransport {
    async fn post_response(
        &self,
        request_id: &str,
        credentials: &Credentials,
        document: &Value,
    ) -> Result<(), SubmissionError> {
        let url = self.response_url(request_id);
        debug!(%url, "posting response document");

        let mut request = self
            .http
            .post(url)
            .header(API_KEY_HEADER, credentials.api_key())
            .json(document);
        if let Some(secret) = credentials.api_secret() {
            request = request.header(API_SECRET_HEADER, secret);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => format!("<failed to read response body: {err}>"),
        };
        Err(SubmissionError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
