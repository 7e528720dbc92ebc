//! Wire model for Morph card views and action results.

pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{ActionRuleSet, ActionType, ContentKind, DocumentKind, StatusColor};
pub use error::ValidationError;
pub use protocol::{
    Action, ActionOutcome, ActionResultDocument, Card, CardContent, CardView, CardViewDocument,
    RootActions,
};
