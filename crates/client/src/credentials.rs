use std::fmt;

use crate::error::MorphError;

/// Static API credentials sent with every remote submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: None,
        }
    }

    /// An empty secret leaves the credentials secret-less.
    pub fn with_secret(mut self, api_secret: impl Into<String>) -> Self {
        let api_secret = api_secret.into();
        self.api_secret = (!api_secret.is_empty()).then_some(api_secret);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    pub(crate) fn validate(&self) -> Result<(), MorphError> {
        if self.api_key.trim().is_empty() {
            return Err(MorphError::configuration("an API key is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
