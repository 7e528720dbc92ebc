use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Accepts `OPEN_URL`, `open-url` and `open_url` alike.
fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Request,
    OpenUrl,
    OpenUrlInIframe,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::OpenUrl => "open_url",
            Self::OpenUrlInIframe => "open_url_in_iframe",
        }
    }

    pub fn requires_url(self) -> bool {
        matches!(self, Self::OpenUrl | Self::OpenUrlInIframe)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "request" => Ok(Self::Request),
            "open_url" => Ok(Self::OpenUrl),
            "open_url_in_iframe" => Ok(Self::OpenUrlInIframe),
            _ => Err(ValidationError::UnknownActionType(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Success,
    Warning,
    Danger,
    Info,
    Default,
}

impl StatusColor {
    pub const ALL: [StatusColor; 5] = [
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Info,
        Self::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusColor {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidColor(raw.to_string()))
    }
}

/// Value of the top-level `type` field of a response document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    CardView,
    Action,
}

/// Which per-type requirements [`crate::Action::new`] enforces.
///
/// `UrlOnly` matches the first published contract, where only the open-url
/// variants carried a required field. `UrlAndId` additionally requires an
/// `id` on request actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRuleSet {
    UrlOnly,
    #[default]
    UrlAndId,
}

impl ActionRuleSet {
    pub fn requires_id(self, action_type: ActionType) -> bool {
        matches!(
            (self, action_type),
            (Self::UrlAndId, ActionType::Request)
        )
    }
}

impl FromStr for ActionRuleSet {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "url_only" | "v1" => Ok(Self::UrlOnly),
            "url_and_id" | "v2" => Ok(Self::UrlAndId),
            other => Err(format!("unknown action rule set '{other}'")),
        }
    }
}
