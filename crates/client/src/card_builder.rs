use std::sync::Arc;

use morph_protocol::{Action, ActionRuleSet, ActionType, Card, CardViewDocument, ValidationError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    config::{MorphSettings, ResponseMode},
    credentials::Credentials,
    error::MorphError,
    responder::Responder,
    transport::{HttpTransport, ResponseTransport},
};

/// Assembles a card view answering one pending request.
pub struct CardBuilder {
    responder: Responder,
    rules: ActionRuleSet,
    cards: Vec<Card>,
    actions: Vec<Action>,
}

impl CardBuilder {
    /// Builder against the default endpoint with the default action rules.
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
        Ok(Self {
            responder,
            rules: settings.action_rules,
            cards: Vec::new(),
            actions: Vec::new(),
        })
    }

    pub fn request_id(&self) -> &str {
        self.responder.request_id()
    }

    pub fn mode(&self) -> ResponseMode {
        self.responder.mode()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn root_actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn new_card(&mut self, title: impl Into<String>) -> &mut Card {
        let index = self.cards.len();
        self.cards.push(Card::new(title, self.rules));
        &mut self.cards[index]
    }

    pub fn new_card_with_link(
        &mut self,
        title: impl Into<String>,
        link: impl Into<String>,
    ) -> &mut Card {
        let card = self.new_card(title);
        card.set_link(link);
        card
    }

    /// Adds an action rendered outside every card.
    pub fn new_root_action(
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

    /// The document `build()` would produce, without submitting it.
    pub fn document(&self) -> CardViewDocument {
        CardViewDocument::new(self.actions.clone(), self.cards.clone())
    }

    pub async fn build(&self) -> Result<CardViewDocument, MorphError> {
        self.build_with_cancel(&CancellationToken::new()).await
    }

    pub async fn build_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CardViewDocument, MorphError> {
        let document = self.document();
        debug!(
            request_id = %self.request_id(),
            cards = document.card_view.cards.len(),
            root_actions = document.card_view.root.actions.len(),
            "card view assembled"
        );
        self.responder.deliver(&document, cancel).await?;
        Ok(document)
    }
}
