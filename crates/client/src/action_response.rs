use std::sync::Arc;

use morph_protocol::ActionResultDocument;
use tokio_util::sync::CancellationToken;

use crate::{
    config::{MorphSettings, ResponseMode},
    credentials::Credentials,
    error::MorphError,
    responder::Responder,
    transport::{HttpTransport, ResponseTransport},
};

/// Reports the outcome of a `request` action.
pub struct ActionResponseBuilder {
    responder: Responder,
}

impl ActionResponseBuilder {
    pub fn new(
        request_id: impl Into<String>,
        mode: ResponseMode,
        credentials: Credentials,
    ) -> Result<Self, MorphError> {
        let settings = MorphSettings {
            mode,
            ..MorphSettings::default()
        };
        let transport = HttpTransport::new(&settings.base_url)?;
        Self::with_transport(request_id, credentials, &settings, Arc::new(transport))
    }

    pub fn with_transport(
        request_id: impl Into<String>,
        credentials: Credentials,
        settings: &MorphSettings,
        transport: Arc<dyn ResponseTransport>,
    ) -> Result<Self, MorphError> {
        let responder = Responder::new(request_id.into(), settings.mode, credentials, transport)?;
        Ok(Self { responder })
    }

    pub fn request_id(&self) -> &str {
        self.responder.request_id()
    }

    pub fn mode(&self) -> ResponseMode {
        self.responder.mode()
    }

    /// Without a message, "Succeed" or "Failed" is reported.
    pub async fn build(
        &self,
        succeed: bool,
        message: Option<&str>,
    ) -> Result<ActionResultDocument, MorphError> {
        self.build_with_cancel(succeed, message, &CancellationToken::new())
            .await
    }

    pub async fn build_with_cancel(
        &self,
        succeed: bool,
        message: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ActionResultDocument, MorphError> {
        let document = ActionResultDocument::new(succeed, message.map(str::to_string));
        self.responder.deliver(&document, cancel).await?;
        Ok(document)
    }
}
