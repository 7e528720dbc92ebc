use std::str::FromStr;

use morph_protocol::ActionRuleSet;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://tlgbrx45cg.execute-api.eu-west-3.amazonaws.com";

/// Whether `build()` performs network I/O at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Return the assembled document to the caller, which answers the
    /// pending request itself.
    Inline,
    /// POST the document to the response endpoint.
    #[default]
    Remote,
}

impl ResponseMode {
    pub fn from_synchronous(synchronous: bool) -> Self {
        if synchronous {
            Self::Inline
        } else {
            Self::Remote
        }
    }
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inline" | "sync" | "synchronous" => Ok(Self::Inline),
            "remote" | "async" | "asynchronous" => Ok(Self::Remote),
            other => Err(format!("unknown response mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MorphSettings {
    pub base_url: String,
    pub mode: ResponseMode,
    pub action_rules: ActionRuleSet,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            mode: ResponseMode::default(),
            action_rules: ActionRuleSet::default(),
        }
    }
}
