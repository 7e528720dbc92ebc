use std::sync::Arc;

mod action_response;
mod card_builder;
pub mod config;
mod credentials;
pub mod error;
mod responder;
pub mod transport;

pub use action_response::ActionResponseBuilder;
pub use card_builder::CardBuilder;
pub use config::{MorphSettings, ResponseMode, DEFAULT_BASE_URL};
pub use credentials::Credentials;
pub use error::{MorphError, SubmissionError};
pub use morph_protocol as protocol;
pub use tokio_util::sync::CancellationToken;
pub use transport::{HttpTransport, ResponseTransport};

/// Entry point holding long-lived credentials; hands out one builder per
/// pending request.
#[derive(Clone)]
pub struct Morph {
    credentials: Credentials,
    settings: MorphSettings,
    transport: Arc<dyn ResponseTransport>,
}

impl Morph {
    pub fn new(credentials: Credentials) -> Result<Self, MorphError> {
        Self::with_settings(credentials, MorphSettings::default())
    }

    pub fn with_settings(
        credentials: Credentials,
        settings: MorphSettings,
    ) -> Result<Self, MorphError> {
        let transport = HttpTransport::new(&settings.base_url)?;
        Self::with_transport(credentials, settings, Arc::new(transport))
    }

    pub fn with_transport(
        credentials: Credentials,
        settings: MorphSettings,
        transport: Arc<dyn ResponseTransport>,
    ) -> Result<Self, MorphError> {
        credentials.validate()?;
        Ok(Self {
            credentials,
            settings,
            transport,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn settings(&self) -> &MorphSettings {
        &self.settings
    }

    pub fn card_builder(&self, request_id: impl Into<String>) -> Result<CardBuilder, MorphError> {
        CardBuilder::with_transport(
            request_id,
            self.credentials.clone(),
            &self.settings,
            Arc::clone(&self.transport),
        )
    }

    pub fn action_response_builder(
        &self,
        request_id: impl Into<String>,
    ) -> Result<ActionResponseBuilder, MorphError> {
        ActionResponseBuilder::with_transport(
            request_id,
            self.credentials.clone(),
            &self.settings,
            Arc::clone(&self.transport),
        )
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
