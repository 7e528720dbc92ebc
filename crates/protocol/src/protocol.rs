use serde::{Deserialize, Serialize};

use crate::{
    domain::{ActionRuleSet, ActionType, ContentKind, DocumentKind, StatusColor},
    error::ValidationError,
};

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

/// A clickable affordance attached to a card or to the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    action_type: ActionType,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl Action {
    pub fn new(
        rules: ActionRuleSet,
        action_type: ActionType,
        label: impl Into<String>,
        url: Option<String>,
        id: Option<String>,
    ) -> Result<Self, ValidationError> {
        if action_type.requires_url() && is_blank(url.as_deref()) {
            return Err(ValidationError::MissingUrl(action_type));
        }
        if rules.requires_id(action_type) && is_blank(id.as_deref()) {
            return Err(ValidationError::MissingId(action_type));
        }

        Ok(Self {
            action_type,
            label: label.into(),
            url,
            id,
        })
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// One labeled value row inside a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    #[serde(rename = "type")]
    kind: ContentKind,
    label: String,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<StatusColor>,
}

impl CardContent {
    pub fn new(kind: ContentKind, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            value: value.into(),
            color: None,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn color(&self) -> Option<StatusColor> {
        self.color
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_color(&mut self, color: StatusColor) -> Result<(), ValidationError> {
        if self.kind != ContentKind::Status {
            return Err(ValidationError::NotStatusContent);
        }
        self.color = Some(color);
        Ok(())
    }

    /// Like [`CardContent::set_color`] for callers holding an unchecked color
    /// name. The content kind is checked first.
    pub fn set_color_str(&mut self, color: &str) -> Result<(), ValidationError> {
        if self.kind != ContentKind::Status {
            return Err(ValidationError::NotStatusContent);
        }
        self.set_color(color.parse()?)
    }
}

/// A titled group of content rows and actions.
///
/// Contents and actions keep insertion order; that order is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default)]
    contents: Vec<CardContent>,
    #[serde(default)]
    actions: Vec<Action>,
    #[serde(skip)]
    rules: ActionRuleSet,
}

impl Card {
    pub fn new(title: impl Into<String>, rules: ActionRuleSet) -> Self {
        Self {
            title: title.into(),
            link: None,
            contents: Vec::new(),
            actions: Vec::new(),
            rules,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn contents(&self) -> &[CardContent] {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> &mut [CardContent] {
        &mut self.contents
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_link(&mut self, url: impl Into<String>) {
        self.link = Some(url.into());
    }

    pub fn new_text(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut CardContent {
        self.push_content(CardContent::new(ContentKind::Text, label, value))
    }

    pub fn new_status(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
        color: StatusColor,
    ) -> Result<&mut CardContent, ValidationError> {
        let mut content = CardContent::new(ContentKind::Status, label, value);
        content.set_color(color)?;
        Ok(self.push_content(content))
    }

    pub fn new_action(
        &mut self,
        action_type: ActionType,
        label: impl Into<String>,
        url: Option<String>,
        id: Option<String>,
    ) -> Result<&Action, ValidationError> {
        let action = Action::new(self.rules, action_type, label, url, id)?;
        let index = self.actions.len();
        self.actions.push(action);
        Ok(&self.actions[index])
    }

    fn push_content(&mut self, content: CardContent) -> &mut CardContent {
        let index = self.contents.len();
        self.contents.push(content);
        &mut self.contents[index]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootActions {
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub root: RootActions,
    pub cards: Vec<Card>,
}

/// Answer to a pending request rendered as one or more cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardViewDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub completed: bool,
    pub card_view: CardView,
}

impl CardViewDocument {
    pub fn new(root_actions: Vec<Action>, cards: Vec<Card>) -> Self {
        Self {
            kind: DocumentKind::CardView,
            completed: true,
            card_view: CardView {
                root: RootActions {
                    actions: root_actions,
                },
                cards,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub succeed: bool,
    pub message: String,
}

/// Answer to a pending request triggered by a `request` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResultDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub completed: bool,
    pub action: ActionOutcome,
}

impl ActionResultDocument {
    pub fn new(succeed: bool, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| {
            if succeed {
                "Succeed".to_string()
            } else {
                "Failed".to_string()
            }
        });
        Self {
            kind: DocumentKind::Action,
            completed: true,
            action: ActionOutcome { succeed, message },
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
