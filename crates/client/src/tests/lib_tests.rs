use super::*;
use async_trait::async_trait;
use morph_protocol::{ActionRuleSet, ActionType, StatusColor, ValidationError};
use serde_json::{json, Value};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct Submission {
    request_id: String,
    credentials: Credentials,
    document: Value,
}

#[derive(Default)]
struct RecordingTransport {
    submissions: Mutex<Vec<Submission>>,
    reject_with: Option<u16>,
}

impl RecordingTransport {
    fn rejecting(status: u16) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            reject_with: Some(status),
        }
    }

    async fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().await.clone()
    }
}

#[async_trait]
impl ResponseTransport for RecordingTransport {
    async fn post_response(
        &self,
        request_id: &str,
        credentials: &Credentials,
        document: &Value,
    ) -> Result<(), SubmissionError> {
        self.submissions.lock().await.push(Submission {
            request_id: request_id.to_string(),
            credentials: credentials.clone(),
            document: document.clone(),
        });
        match self.reject_with {
            Some(status) => Err(SubmissionError::Status {
                status,
                body: "rejected".into(),
            }),
            None => Ok(()),
        }
    }
}

/// Never completes; only cancellation can end a build.
struct PendingTransport;

#[async_trait]
impl ResponseTransport for PendingTransport {
    async fn post_response(
        &self,
        _request_id: &str,
        _credentials: &Credentials,
        _document: &Value,
    ) -> Result<(), SubmissionError> {
        std::future::pending().await
    }
}

/// Stands in for a non-HTTP transport, e.g. a message queue.
struct QueueTransport;

#[async_trait]
impl ResponseTransport for QueueTransport {
    async fn post_response(
        &self,
        request_id: &str,
        _credentials: &Credentials,
        _document: &Value,
    ) -> Result<(), SubmissionError> {
        Err(SubmissionError::Backend(anyhow::anyhow!(
            "queue full while publishing {request_id}"
        )))
    }
}

fn credentials() -> Credentials {
    Credentials::new("key-123").with_secret("secret-456")
}

fn morph_with(mode: ResponseMode, transport: Arc<dyn ResponseTransport>) -> Morph {
    let settings = MorphSettings {
        mode,
        ..MorphSettings::default()
    };
    Morph::with_transport(credentials(), settings, transport).expect("morph")
}

fn assert_configuration_error(err: Option<MorphError>) {
    match err {
        Some(MorphError::Configuration(_)) => {}
        other => panic!("expected configuration error, got {other:?}"),
    }
}

fn status_card(builder: &mut CardBuilder) {
    builder.new_card("Status").new_text("Env", "prod");
    builder
        .new_root_action(
            ActionType::OpenUrl,
            "Docs",
            Some("https://example.com".into()),
            None,
        )
        .expect("root action");
}

fn status_card_json() -> Value {
    json!({
        "type": "card_view",
        "completed": true,
        "card_view": {
            "root": {"actions": [
                {"type": "open_url", "label": "Docs", "url": "https://example.com"}
            ]},
            "cards": [{
                "title": "Status",
                "contents": [{"type": "text", "label": "Env", "value": "prod"}],
                "actions": [],
            }],
        },
    })
}

#[test]
fn morph_requires_an_api_key() {
    for key in ["", "   "] {
        assert_configuration_error(Morph::new(Credentials::new(key)).err());
    }
    assert!(Morph::new(Credentials::new("key-123")).is_ok());
}

#[test]
fn builders_require_request_id_and_api_key() {
    for (request_id, key) in [("", "key-123"), ("req-1", ""), ("  ", "key-123"), ("", "")] {
        for mode in [ResponseMode::Inline, ResponseMode::Remote] {
            assert_configuration_error(
                CardBuilder::new(request_id, mode, Credentials::new(key)).err(),
            );
            assert_configuration_error(
                ActionResponseBuilder::new(request_id, mode, Credentials::new(key)).err(),
            );
        }
    }

    let morph = morph_with(
        ResponseMode::Remote,
        Arc::new(RecordingTransport::default()),
    );
    assert_configuration_error(morph.card_builder("").err());
    assert_configuration_error(morph.action_response_builder("").err());
}

#[test]
fn builders_reject_dot_segment_request_ids() {
    let morph = morph_with(
        ResponseMode::Remote,
        Arc::new(RecordingTransport::default()),
    );
    for request_id in [".", ".."] {
        assert_configuration_error(morph.card_builder(request_id).err());
        assert_configuration_error(morph.action_response_builder(request_id).err());
        assert_configuration_error(
            CardBuilder::new(request_id, ResponseMode::Inline, credentials()).err(),
        );
    }
    assert!(morph.card_builder("...").is_ok());
}

#[tokio::test]
async fn custom_transport_failures_surface_unchanged() {
    let morph = morph_with(ResponseMode::Remote, Arc::new(QueueTransport));

    let err = morph
        .card_builder("req-3")
        .expect("builder")
        .build()
        .await
        .expect_err("queue rejects");
    match err {
        MorphError::Submission(SubmissionError::Backend(source)) => {
            assert_eq!(source.to_string(), "queue full while publishing req-3");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = morph
        .action_response_builder("req-3")
        .expect("builder")
        .build(true, None)
        .await
        .expect_err("queue rejects");
    assert!(err.to_string().contains("queue full"), "{err}");
}

#[tokio::test]
async fn inline_card_build_returns_document_without_submitting() {
    let transport = Arc::new(RecordingTransport::default());
    let morph = morph_with(ResponseMode::Inline, transport.clone());
    let mut builder = morph.card_builder("req-1").expect("builder");
    status_card(&mut builder);

    let document = builder.build().await.expect("build");

    assert_eq!(
        serde_json::to_value(&document).expect("serialize"),
        status_card_json()
    );
    assert!(transport.submissions().await.is_empty());
}

#[tokio::test]
async fn synchronous_flag_maps_to_inline_mode() {
    let mut builder = CardBuilder::new(
        "req-1",
        ResponseMode::from_synchronous(true),
        Credentials::new("key-123"),
    )
    .expect("builder");
    assert_eq!(builder.mode(), ResponseMode::Inline);
    status_card(&mut builder);

    let document = builder.build().await.expect("inline build never touches the network");
    assert_eq!(
        serde_json::to_value(&document).expect("serialize"),
        status_card_json()
    );
}

#[tokio::test]
async fn remote_card_build_submits_each_time() {
    let transport = Arc::new(RecordingTransport::default());
    let morph = morph_with(ResponseMode::Remote, transport.clone());
    let mut builder = morph.card_builder("req-7").expect("builder");
    status_card(&mut builder);

    let first = builder.build().await.expect("first build");
    let second = builder.build().await.expect("second build");
    assert_eq!(first, second);

    let submissions = transport.submissions().await;
    assert_eq!(submissions.len(), 2);
    for submission in submissions {
        assert_eq!(submission.request_id, "req-7");
        assert_eq!(submission.credentials.api_key(), "key-123");
        assert_eq!(submission.credentials.api_secret(), Some("secret-456"));
        assert_eq!(submission.document, status_card_json());
    }
}

#[tokio::test]
async fn rejected_card_submission_surfaces_as_error() {
    let morph = morph_with(
        ResponseMode::Remote,
        Arc::new(RecordingTransport::rejecting(500)),
    );
    let mut builder = morph.card_builder("req-1").expect("builder");
    status_card(&mut builder);

    let err = builder.build().await.expect_err("must fail");
    assert!(
        matches!(
            err,
            MorphError::Submission(SubmissionError::Status { status: 500, .. })
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn cancelled_build_stops_waiting_on_transport() {
    let morph = morph_with(ResponseMode::Remote, Arc::new(PendingTransport));
    let builder = morph.card_builder("req-1").expect("builder");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = builder
        .build_with_cancel(&cancel)
        .await
        .expect_err("cancelled");
    assert!(matches!(
        err,
        MorphError::Submission(SubmissionError::Cancelled)
    ));

    let responder = morph.action_response_builder("req-1").expect("builder");
    let err = responder
        .build_with_cancel(true, None, &cancel)
        .await
        .expect_err("cancelled");
    assert!(matches!(
        err,
        MorphError::Submission(SubmissionError::Cancelled)
    ));
}

#[tokio::test]
async fn cards_and_root_actions_keep_insertion_order() {
    let morph = morph_with(
        ResponseMode::Inline,
        Arc::new(RecordingTransport::default()),
    );
    let mut builder = morph.card_builder("req-1").expect("builder");
    {
        let card = builder.new_card_with_link("Deploy", "https://ci.example.com/42");
        card.new_status("Pipeline", "passed", StatusColor::Success)
            .expect("status");
        card.new_text("Commit", "abc123");
        card.new_action(ActionType::Request, "Rollback", None, Some("rollback".into()))
            .expect("action");
    }
    builder.new_card("Alerts").new_text("Open", "0");
    for label in ["First", "Second"] {
        builder
            .new_root_action(ActionType::Request, label, None, Some(label.to_lowercase()))
            .expect("root action");
    }
    builder.cards_mut()[1].set_title("Alerting");

    let value = serde_json::to_value(builder.build().await.expect("build")).expect("serialize");
    assert_eq!(
        value["card_view"]["cards"],
        json!([
            {
                "title": "Deploy",
                "link": "https://ci.example.com/42",
                "contents": [
                    {"type": "status", "label": "Pipeline", "value": "passed", "color": "success"},
                    {"type": "text", "label": "Commit", "value": "abc123"},
                ],
                "actions": [{"type": "request", "label": "Rollback", "id": "rollback"}],
            },
            {
                "title": "Alerting",
                "contents": [{"type": "text", "label": "Open", "value": "0"}],
                "actions": [],
            },
        ])
    );
    assert_eq!(
        value["card_view"]["root"]["actions"],
        json!([
            {"type": "request", "label": "First", "id": "first"},
            {"type": "request", "label": "Second", "id": "second"},
        ])
    );
}

#[test]
fn action_rules_follow_settings() {
    let strict = morph_with(
        ResponseMode::Inline,
        Arc::new(RecordingTransport::default()),
    );
    let mut builder = strict.card_builder("req-1").expect("builder");
    assert_eq!(
        builder
            .new_root_action(ActionType::Request, "Ack", None, None)
            .map(|_| ()),
        Err(ValidationError::MissingId(ActionType::Request))
    );
    assert!(builder.root_actions().is_empty());

    let legacy = Morph::with_transport(
        credentials(),
        MorphSettings {
            action_rules: ActionRuleSet::UrlOnly,
            ..MorphSettings::default()
        },
        Arc::new(RecordingTransport::default()),
    )
    .expect("morph");
    let mut builder = legacy.card_builder("req-1").expect("builder");
    builder
        .new_root_action(ActionType::Request, "Ack", None, None)
        .expect("url_only accepts id-less request actions");
    builder
        .new_card("Card")
        .new_action(ActionType::Request, "Ack", None, None)
        .expect("cards inherit the rule set");
    assert_eq!(
        builder
            .new_root_action(ActionType::OpenUrl, "Docs", None, None)
            .map(|_| ()),
        Err(ValidationError::MissingUrl(ActionType::OpenUrl))
    );
}

#[tokio::test]
async fn inline_action_response_uses_default_messages() {
    let transport = Arc::new(RecordingTransport::default());
    let morph = morph_with(ResponseMode::Inline, transport.clone());
    let builder = morph.action_response_builder("req-9").expect("builder");

    for (succeed, message, expected) in [
        (true, None, "Succeed"),
        (false, None, "Failed"),
        (true, Some("Done"), "Done"),
    ] {
        let document = builder.build(succeed, message).await.expect("build");
        assert_eq!(
            serde_json::to_value(&document).expect("serialize"),
            json!({
                "type": "action",
                "completed": true,
                "action": {"succeed": succeed, "message": expected},
            })
        );
    }
    assert!(transport.submissions().await.is_empty());
}

#[tokio::test]
async fn remote_action_response_submits_result() {
    let transport = Arc::new(RecordingTransport::default());
    let morph = morph_with(ResponseMode::Remote, transport.clone());
    let builder = morph.action_response_builder("req-9").expect("builder");

    let document = builder
        .build(false, Some("Pod not found"))
        .await
        .expect("build");
    assert!(!document.action.succeed);

    let submissions = transport.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].request_id, "req-9");
    assert_eq!(
        submissions[0].document,
        json!({
            "type": "action",
            "completed": true,
            "action": {"succeed": false, "message": "Pod not found"},
        })
    );
}

#[tokio::test]
async fn rejected_action_response_surfaces_as_error() {
    let morph = morph_with(
        ResponseMode::Remote,
        Arc::new(RecordingTransport::rejecting(503)),
    );
    let builder = morph.action_response_builder("req-9").expect("builder");

    let err = builder.build(true, None).await.expect_err("must fail");
    match err {
        MorphError::Submission(submission) => assert_eq!(submission.status(), Some(503)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn credentials_debug_redacts_secrets() {
    let rendered = format!("{:?}", credentials());
    assert!(!rendered.contains("key-123"));
    assert!(!rendered.contains("secret-456"));
    assert_eq!(Credentials::new("k").with_secret("").api_secret(), None);
}

#[test]
fn response_mode_parses_aliases() {
    assert_eq!("inline".parse::<ResponseMode>(), Ok(ResponseMode::Inline));
    assert_eq!("SYNC".parse::<ResponseMode>(), Ok(ResponseMode::Inline));
    assert_eq!("remote".parse::<ResponseMode>(), Ok(ResponseMode::Remote));
    assert!("later".parse::<ResponseMode>().is_err());
    assert_eq!(ResponseMode::from_synchronous(false), ResponseMode::Remote);
}
