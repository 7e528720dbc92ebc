use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    config::ResponseMode,
    credentials::Credentials,
    error::{MorphError, SubmissionError},
    transport::{is_routable_request_id, ResponseTransport},
};

/// The part both builders share: which request is being answered, how, and
/// with which credentials.
#[derive(Clone)]
pub(crate) struct Responder {
    request_id: String,
    mode: ResponseMode,
    credentials: Credentials,
    transport: Arc<dyn ResponseTransport>,
}

impl Responder {
    pub(crate) fn new(
        request_id: String,
        mode: ResponseMode,
        credentials: Credentials,
        transport: Arc<dyn ResponseTransport>,
    ) -> Result<Self, MorphError> {
        if request_id.trim().is_empty() {
            return Err(MorphError::configuration("a request id is required"));
        }
        if !is_routable_request_id(&request_id) {
            return Err(MorphError::configuration(format!(
                "request id '{request_id}' cannot address a response endpoint"
            )));
        }
        credentials.validate()?;

        Ok(Self {
            request_id,
            mode,
            credentials,
            transport,
        })
    }

    pub(crate) fn request_id(&self) -> &str {
        &self.request_id
    }

    pub(crate) fn mode(&self) -> ResponseMode {
        self.mode
    }

    pub(crate) async fn deliver<T: Serialize>(
        &self,
        document: &T,
        cancel: &CancellationToken,
    ) -> Result<(), SubmissionError> {
        if self.mode == ResponseMode::Inline {
            debug!(request_id = %self.request_id, "inline mode; skipping submission");
            return Ok(());
        }

        let body = serde_json::to_value(document)?;
        tokio::select! {
            _ = cancel.cancelled() => return Err(SubmissionError::Cancelled),
            result = self.transport.post_response(&self.request_id, &self.credentials, &body) => result?,
        }

        info!(request_id = %self.request_id, "response submitted");
        Ok(())
    }
}
