use thiserror::Error;

use crate::domain::ActionType;

/// A field-level invariant was violated while assembling a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a URL is required for {0} actions")]
    MissingUrl(ActionType),
    #[error("an id is required for {0} actions")]
    MissingId(ActionType),
    #[error("color is only allowed for card content of type \"status\"")]
    NotStatusContent,
    #[error("invalid status color '{0}'")]
    InvalidColor(String),
    #[error("unknown action type '{0}'")]
    UnknownActionType(String),
}
